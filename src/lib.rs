pub mod config;
pub mod discovery;
pub mod errors;
pub mod models;
pub mod output;
pub mod utils;
