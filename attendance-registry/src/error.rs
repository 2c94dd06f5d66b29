// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Error module.
//!

use thiserror::Error;

/// Error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or missing caller input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// No record matches the given identifier.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The store connection is not ready yet.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// Underlying read/write failure.
    #[error("Storage error: {0}")]
    Storage(String),
}
