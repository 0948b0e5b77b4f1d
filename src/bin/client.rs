use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::Duration;

/// Client for the nutrition advisor server
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Server URL
    #[clap(short, long, default_value = "http://localhost:3000")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up nutrition facts for a food
    Nutrition {
        /// Food name or description
        #[clap(short, long)]
        query: String,

        /// Maximum number of results to return
        #[clap(short, long)]
        max_results: Option<i64>,
    },

    /// Look up dietary requirements
    Dietary {
        /// Question, e.g. "iron for a 30-year-old woman"
        #[clap(short, long)]
        query: String,

        /// Age in years
        #[clap(short, long)]
        age: Option<i64>,

        /// male or female
        #[clap(short, long)]
        gender: Option<String>,

        /// Maximum number of results to return
        #[clap(short, long)]
        max_results: Option<i64>,
    },

    /// Show a single food by FDC id
    Food {
        /// FDC id of the food
        #[clap(short, long)]
        id: String,
    },

    /// Resolve an age to its reference age group
    AgeBand {
        /// Age in years
        #[clap(short, long)]
        age: i64,
    },

    /// Show document counts for both indexes
    Stats,

    /// Interactive mode to explore the advisor tools
    Interactive,
}

// Request and response types for API interaction

#[derive(Debug, Serialize)]
struct NutritionLookupRequest {
    food_query: String,
    max_results: Option<i64>,
}

#[derive(Debug, Serialize)]
struct DietaryLookupRequest {
    query: String,
    age: Option<i64>,
    gender: Option<String>,
    max_results: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ToolResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct KeyNutrient {
    name: String,
    amount: serde_json::Number,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct FoodSummaryResponse {
    fdc_id: String,
    description: String,
    category: String,
    document: String,
    key_nutrients: Vec<KeyNutrient>,
}

#[derive(Debug, Deserialize)]
struct AgeBandResponse {
    age: i64,
    age_group: String,
}

#[derive(Debug, Deserialize)]
struct IndexStatsResponse {
    foods: usize,
    dietary: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
    code: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    match cli.command {
        Command::Nutrition { query, max_results } => {
            nutrition_lookup(&client, &cli.server, query, max_results).await?;
        }

        Command::Dietary {
            query,
            age,
            gender,
            max_results,
        } => {
            dietary_lookup(&client, &cli.server, query, age, gender, max_results).await?;
        }

        Command::Food { id } => {
            get_food(&client, &cli.server, &id).await?;
        }

        Command::AgeBand { age } => {
            get_age_band(&client, &cli.server, age).await?;
        }

        Command::Stats => {
            get_stats(&client, &cli.server).await?;
        }

        Command::Interactive => {
            run_interactive_mode(&client, &cli.server).await?;
        }
    }

    Ok(())
}

// API interaction functions

async fn nutrition_lookup(
    client: &Client,
    server: &str,
    food_query: String,
    max_results: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = NutritionLookupRequest {
        food_query,
        max_results,
    };

    let response = client
        .post(&format!("{}/nutrition/lookup", server))
        .json(&request)
        .send()
        .await?;

    if response.status().is_success() {
        let tool: ToolResponse = response.json().await?;
        println!("{}", tool.response);
    } else {
        handle_error_response(response).await?;
    }

    Ok(())
}

async fn dietary_lookup(
    client: &Client,
    server: &str,
    query: String,
    age: Option<i64>,
    gender: Option<String>,
    max_results: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = DietaryLookupRequest {
        query,
        age,
        gender,
        max_results,
    };

    let response = client
        .post(&format!("{}/dietary/lookup", server))
        .json(&request)
        .send()
        .await?;

    if response.status().is_success() {
        let tool: ToolResponse = response.json().await?;
        println!("{}", tool.response);
    } else {
        handle_error_response(response).await?;
    }

    Ok(())
}

async fn get_food(
    client: &Client,
    server: &str,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Retrieving food with FDC id: {}...", id);

    let response = client
        .get(&format!("{}/foods/{}", server, id))
        .send()
        .await?;

    if response.status().is_success() {
        let food: FoodSummaryResponse = response.json().await?;
        println!("FDC ID: {}", food.fdc_id);
        println!("Description: {}", food.description);
        println!("Category: {}", food.category);
        println!("Key nutrients:");
        for nutrient in &food.key_nutrients {
            println!("  - {}: {} {}", nutrient.name, nutrient.amount, nutrient.unit);
        }
        println!();
        println!("Indexed document:");
        println!("{}", food.document);
    } else {
        handle_error_response(response).await?;
    }

    Ok(())
}

async fn get_age_band(
    client: &Client,
    server: &str,
    age: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .get(&format!("{}/age-bands/{}", server, age))
        .send()
        .await?;

    if response.status().is_success() {
        let band: AgeBandResponse = response.json().await?;
        println!("Age {} falls in age group {}", band.age, band.age_group);
    } else {
        handle_error_response(response).await?;
    }

    Ok(())
}

async fn get_stats(client: &Client, server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .get(&format!("{}/index/stats", server))
        .send()
        .await?;

    if response.status().is_success() {
        let stats: IndexStatsResponse = response.json().await?;
        println!("Food documents: {}", stats.foods);
        println!("Dietary documents: {}", stats.dietary);
    } else {
        handle_error_response(response).await?;
    }

    Ok(())
}

async fn handle_error_response(
    response: reqwest::Response,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = response.status();

    match response.json::<ErrorResponse>().await {
        Ok(error) => {
            eprintln!("Error ({}): {} ({})", status, error.message, error.code);
        }
        Err(_) => {
            eprintln!("Error ({}): Failed to parse error response", status);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn optional_number(input: &str) -> Option<i64> {
    input.parse().ok()
}

fn optional_text(input: String) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

// Interactive mode
async fn run_interactive_mode(
    client: &Client,
    server: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Nutrition Advisor Interactive Client ===");
    println!("Server: {}", server);
    println!();

    println!("Checking server connection...");
    match client
        .get(&format!("{}/index/stats", server))
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => {
            println!("Server connection successful!");
        }
        Ok(response) => {
            println!(
                "Connected to server but received status code: {}",
                response.status()
            );
        }
        Err(e) => {
            println!("Failed to connect to server: {}", e);
            println!("Please make sure the server is running at {}", server);
            return Ok(());
        }
    }

    println!();
    println!("Available commands:");
    println!("  1. Look up nutrition for a food");
    println!("  2. Look up dietary requirements");
    println!("  3. Show a food by FDC id");
    println!("  4. Resolve an age group");
    println!("  5. Show index stats");
    println!("  q. Quit");
    println!();

    loop {
        let input = prompt("Enter command (1-5, q): ")?;

        match input.as_str() {
            "1" => {
                let query = prompt("Food: ")?;
                let max_results = optional_number(&prompt("Max results (optional): ")?);
                nutrition_lookup(client, server, query, max_results).await?;
            }
            "2" => {
                let query = prompt("Question: ")?;
                let age = optional_number(&prompt("Age (optional): ")?);
                let gender = optional_text(prompt("Gender (optional): ")?);
                dietary_lookup(client, server, query, age, gender, None).await?;
            }
            "3" => {
                let id = prompt("FDC id: ")?;
                get_food(client, server, &id).await?;
            }
            "4" => match prompt("Age: ")?.parse::<i64>() {
                Ok(age) => get_age_band(client, server, age).await?,
                Err(_) => println!("Please enter a whole number"),
            },
            "5" => {
                get_stats(client, server).await?;
            }
            "q" | "Q" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Unknown command. Please enter 1-5 or q.");
            }
        }
        println!();
    }

    Ok(())
}
