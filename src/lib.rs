pub mod commands;
pub mod config;
pub mod labs;
pub mod logging;
pub mod process;
pub mod runner;
pub mod utils;
