pub mod constants;
pub mod error;
pub mod filter;
pub mod input;
pub mod logging;
pub mod output;
pub mod processor;
pub mod settings;
pub mod types;
pub mod utils;
