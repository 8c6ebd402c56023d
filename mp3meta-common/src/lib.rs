//! # mp3meta Common Library
//!
//! Shared code for the mp3meta tools:
//! - Error and result types
//! - Bootstrap configuration loading
//! - SQLite pool setup and the `meta` table schema

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
