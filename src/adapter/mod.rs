pub mod in_adapters {
    pub use super::input::*;
}

pub mod out_adapters {
    pub use super::output::*;
}

pub mod input;
pub mod output;