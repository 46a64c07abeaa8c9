//! Core module - configuration
//!
//! - [`Config`] - environment configuration

pub mod config;

pub use config::Config;
