// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Store module.
//!
//! Persistence seam of the registry. The document store owns the canonical
//! copy of every subject; backends implement `SubjectStore` and the rest of
//! the crate never touches a driver type directly.
//!

use async_trait::async_trait;

use crate::{
    error::Error,
    model::{Counter, Subject, SubjectId},
};

pub mod mongo;

#[cfg(any(test, feature = "test"))]
pub mod memory;

/// Operations a subject store backend must provide.
#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// All subjects in insertion order.
    async fn list(&self) -> Result<Vec<Subject>, Error>;

    /// Persists a new subject with zeroed counters and returns it.
    async fn insert(&self, name: &str) -> Result<Subject, Error>;

    /// Applies an atomic +1 to one counter of the matching subject.
    ///
    /// Concurrent increments on the same subject must all be reflected;
    /// backends may not read the counter and write it back.
    async fn increment(
        &self,
        id: &SubjectId,
        counter: Counter,
    ) -> Result<(), Error>;

    /// Removes the matching subject permanently.
    async fn remove(&self, id: &SubjectId) -> Result<(), Error>;
}
