fn main() {
    println!("Nutrition Advisor - nutrient lookup and dietary requirements tools");
    println!("Please use the specific binaries:");
    println!("  - nutrition-server: index the source data and serve the lookup tools");
    println!("  - nutrition-client: query a running server");
    println!();
    println!("Alternatively, you can install the binaries with:");
    println!("  cargo install --path . --bins");
}
