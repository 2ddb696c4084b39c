//! Error types for quoting, catalog lookups and order handling.
//!
//! The layout optimizer itself is total and never returns these; they are
//! raised by the precondition checks its callers run first.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("invalid print request: {0}")]
    InvalidRequest(String),

    #[error("invalid pricing: {0}")]
    InvalidPricing(String),

    #[error("invalid roll catalog: {0}")]
    InvalidRollCatalog(String),

    #[error("no material selected")]
    NoMaterialSelected,

    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("line item {0} not found in order")]
    LineItemNotFound(u64),

    #[error("order has no items")]
    EmptyOrder,

    #[error("invalid value for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, QuoteError>;
