pub mod api_connection;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod guidelines;
pub mod logging;
pub mod nutrition;
pub mod planner;
pub mod preferences;
pub mod recipe;
pub mod recipe_aggregator;
pub mod recipe_source;
