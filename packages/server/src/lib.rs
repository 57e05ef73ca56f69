// Page Analyzer - core library
//
// Users submit sites, the service stores them normalized to scheme://host and
// records the status, title, h1 and meta description of every check.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
