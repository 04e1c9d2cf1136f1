//! Core application modules
//!
//! This module contains configuration, constants, logging, the API client
//! and pagination.

pub mod client;
pub mod config;
pub mod constants;
pub mod logging;
pub mod pagination;
pub mod provider;
