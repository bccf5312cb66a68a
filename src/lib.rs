pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod output;
pub mod prompt;
pub mod query;
pub mod store;
