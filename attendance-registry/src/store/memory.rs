// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Memory store module.
//!

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::Error,
    model::{Counter, Subject, SubjectId},
    store::SubjectStore,
};

/// In-memory subject store, kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    subjects: RwLock<Vec<Subject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubjectStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Subject>, Error> {
        Ok(self.subjects.read().await.clone())
    }

    async fn insert(&self, name: &str) -> Result<Subject, Error> {
        let subject = Subject::new(name);
        self.subjects.write().await.push(subject.clone());
        Ok(subject)
    }

    async fn increment(
        &self,
        id: &SubjectId,
        counter: Counter,
    ) -> Result<(), Error> {
        let mut subjects = self.subjects.write().await;
        let subject = subjects
            .iter_mut()
            .find(|subject| subject.id == *id)
            .ok_or_else(|| Error::NotFound("Subject not found".to_owned()))?;
        match counter {
            Counter::Attended => subject.attended += 1,
            Counter::Absent => subject.absent += 1,
        }

        Ok(())
    }

    async fn remove(&self, id: &SubjectId) -> Result<(), Error> {
        let mut subjects = self.subjects.write().await;
        let position = subjects
            .iter()
            .position(|subject| subject.id == *id)
            .ok_or_else(|| Error::NotFound("Subject not found".to_owned()))?;
        subjects.remove(position);

        Ok(())
    }
}
