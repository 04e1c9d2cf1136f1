//! Inventory data models
//!
//! This module contains the page documents returned by the API and the
//! values extracted from them.

pub mod inventory;
pub mod page;
