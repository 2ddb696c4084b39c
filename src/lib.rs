//! Roll-stock quoting for large-format prints.
//!
//! [`layout::compute_layout`] picks the cheapest roll and orientation for a
//! print; the remaining modules turn those quotes into an order and a
//! checkout.

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod layout;
pub mod order;
pub mod render;
pub mod types;
