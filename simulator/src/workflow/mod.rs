pub mod config;
pub mod extractor;
pub mod runner;
