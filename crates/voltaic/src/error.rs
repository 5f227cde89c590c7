//! Error types for Voltaic operations.
//!
//! This module provides the main error type [`VoltaicError`]. Only input and
//! output can fail: layout and routing degrade to partial results instead of
//! returning errors.

use std::io;

use thiserror::Error;

use voltaic_core::netlist::NetlistError;

use crate::render::SymbolError;

/// The main error type for Voltaic operations.
///
/// # Diagnostic Variants
///
/// The `Netlist` variant keeps the source text next to the decode error, so
/// a reporter can point at the offending line and column.
#[derive(Debug, Error)]
pub enum VoltaicError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Netlist { err: NetlistError, src: String },

    #[error("Symbol sheet error: {0}")]
    Symbols(#[from] SymbolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl VoltaicError {
    /// Create a new `Netlist` error with the associated source text.
    pub fn new_netlist_error(err: NetlistError, src: impl Into<String>) -> Self {
        Self::Netlist {
            err,
            src: src.into(),
        }
    }
}
