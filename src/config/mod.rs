//! # Configuration Module
//!
//! This module provides the server configuration, its TOML file format, and validation.

pub mod config;

pub use config::{DisplayConfig, ImageEntry, PlaceholderConfig, QuantizationMode, ServerConfig};
