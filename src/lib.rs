pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod glossary;
pub mod logging;
pub mod scoreboard;
pub mod server;
pub mod summary;
