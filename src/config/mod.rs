//! Configuration module for songrec
//!
//! This module contains the client configuration structures and path management.

mod client_config;
mod paths;

pub use client_config::ClientConfig;
pub use paths::Paths;
