// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Mongo store module.
//!

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::{
    config::StoreSettings,
    error::Error,
    model::{Counter, Subject, SubjectId},
    store::SubjectStore,
};

/// Subject record as persisted in the collection.
#[derive(Debug, Serialize, Deserialize)]
struct SubjectDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    attended: i64,
    absent: i64,
}

impl From<SubjectDocument> for Subject {
    fn from(document: SubjectDocument) -> Self {
        Self {
            id: SubjectId::from(document.id),
            name: document.name,
            attended: document.attended.max(0) as u64,
            absent: document.absent.max(0) as u64,
        }
    }
}

/// MongoDB-backed subject store.
///
/// The connection is established by a background task: requests arriving
/// before the first successful ping fail with `Unavailable` instead of
/// waiting on the driver.
pub struct MongoStore {
    collection: Arc<OnceCell<Collection<SubjectDocument>>>,
}

impl MongoStore {
    /// Builds the client and spawns the deferred connection task.
    ///
    /// Fails only on an unusable connection string; an unreachable server
    /// is reported by the background task and leaves the store answering
    /// `Unavailable`.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, Error> {
        let mut options =
            ClientOptions::parse(&settings.url).await.map_err(|e| {
                Error::Storage(format!(
                    "Invalid store connection string: {}",
                    e
                ))
            })?;
        let timeout = Duration::from_secs(settings.request_timeout_secs);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| Error::Storage(e.to_string()))?;
        let database = client.database(&settings.database);
        let collection_name = settings.collection.clone();

        let collection = Arc::new(OnceCell::new());
        let cell = collection.clone();
        tokio::spawn(async move {
            match database.run_command(doc! { "ping": 1 }).await {
                Ok(_) => {
                    info!("Connected to MongoDB database");
                    let _ = cell.set(database.collection(&collection_name));
                }
                Err(e) => {
                    error!("Failed to connect to MongoDB: {}", e);
                }
            }
        });

        Ok(Self { collection })
    }

    fn collection(&self) -> Result<&Collection<SubjectDocument>, Error> {
        self.collection.get().ok_or_else(|| {
            Error::Unavailable("Database not initialized".to_owned())
        })
    }
}

#[async_trait]
impl SubjectStore for MongoStore {
    async fn list(&self) -> Result<Vec<Subject>, Error> {
        let collection = self.collection()?;
        // ObjectIds are time-ordered, so this is insertion order.
        let cursor = collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        let documents: Vec<SubjectDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(documents.into_iter().map(Subject::from).collect())
    }

    async fn insert(&self, name: &str) -> Result<Subject, Error> {
        let collection = self.collection()?;
        let document = SubjectDocument {
            id: ObjectId::new(),
            name: name.to_owned(),
            attended: 0,
            absent: 0,
        };
        collection
            .insert_one(&document)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(Subject::from(document))
    }

    async fn increment(
        &self,
        id: &SubjectId,
        counter: Counter,
    ) -> Result<(), Error> {
        let collection = self.collection()?;
        let update = match counter {
            Counter::Attended => doc! { "$inc": { "attended": 1_i64 } },
            Counter::Absent => doc! { "$inc": { "absent": 1_i64 } },
        };
        let result = collection
            .update_one(doc! { "_id": id.to_object_id() }, update)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("Subject not found".to_owned()));
        }

        Ok(())
    }

    async fn remove(&self, id: &SubjectId) -> Result<(), Error> {
        let collection = self.collection()?;
        let result = collection
            .delete_one(doc! { "_id": id.to_object_id() })
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        if result.deleted_count == 0 {
            return Err(Error::NotFound("Subject not found".to_owned()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_conversion_preserves_fields() {
        let id = ObjectId::new();
        let document = SubjectDocument {
            id,
            name: "Math".to_owned(),
            attended: 3,
            absent: 1,
        };
        let subject = Subject::from(document);
        assert_eq!(subject.id, SubjectId::from(id));
        assert_eq!(subject.name, "Math");
        assert_eq!(subject.attended, 3);
        assert_eq!(subject.absent, 1);
    }

    #[test]
    fn test_document_conversion_clamps_negative_counters() {
        let document = SubjectDocument {
            id: ObjectId::new(),
            name: "History".to_owned(),
            attended: -4,
            absent: -1,
        };
        let subject = Subject::from(document);
        assert_eq!(subject.attended, 0);
        assert_eq!(subject.absent, 0);
    }
}
