pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod ui;
pub mod workflow;

pub use error::{Result, WellchartedError};
