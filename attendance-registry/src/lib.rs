// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, str::FromStr, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::store::mongo::MongoStore;

pub mod config;
pub mod error;
pub mod model;
pub mod settings;
pub mod store;
pub use clap;

pub use crate::{
    config::Config,
    error::Error,
    model::{Counter, Subject, SubjectId},
    store::SubjectStore,
};

#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn SubjectStore>,
    cancellation: CancellationToken,
}

impl Registry {
    pub async fn build(
        settings: Config,
        token: Option<CancellationToken>,
    ) -> Result<Self, Error> {
        let store = MongoStore::connect(&settings.store).await?;

        let token = if let Some(token) = token {
            token
        } else {
            CancellationToken::new()
        };

        Self::bind_with_shutdown(token.clone(), tokio::signal::ctrl_c());

        Ok(Self {
            store: Arc::new(store),
            cancellation: token,
        })
    }

    /// Builds a registry over the given store, without shutdown wiring.
    #[cfg(any(test, feature = "test"))]
    pub fn with_store(store: Arc<dyn SubjectStore>) -> Self {
        Self {
            store,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancellation
    }

    fn bind_with_shutdown(
        token: CancellationToken,
        shutdown_signal: impl Future + Send + 'static,
    ) {
        let cancellation_token = token.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            cancellation_token.cancel();
        });
    }

    pub async fn get_subjects(&self) -> Result<Vec<Subject>, Error> {
        self.store.list().await
    }

    pub async fn create_subject(
        &self,
        name: String,
    ) -> Result<Subject, Error> {
        // Blank names are rejected; accepted names are stored as supplied.
        if name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Subject name is required".to_owned(),
            ));
        }

        self.store.insert(&name).await
    }

    pub async fn mark_present(&self, subject_id: String) -> Result<(), Error> {
        let subject_id = SubjectId::from_str(&subject_id)?;
        self.store.increment(&subject_id, Counter::Attended).await
    }

    pub async fn mark_absent(&self, subject_id: String) -> Result<(), Error> {
        let subject_id = SubjectId::from_str(&subject_id)?;
        self.store.increment(&subject_id, Counter::Absent).await
    }

    pub async fn delete_subject(
        &self,
        subject_id: String,
    ) -> Result<(), Error> {
        let subject_id = SubjectId::from_str(&subject_id)?;
        self.store.remove(&subject_id).await
    }
}
