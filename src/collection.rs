// Postman collection assembly for req2postman
// Collects normalized requests in encounter order under fixed collection metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::NormalizedRequest;

/// Schema URL of the Postman Collection v2.1.0 format
pub const POSTMAN_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Collection-level metadata, fixed when the run starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "schema")]
    pub schema_url: String,
    #[serde(rename = "_postman_id")]
    pub id: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl CollectionInfo {
    /// Metadata with a fresh id and the current time
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema_url: POSTMAN_SCHEMA_URL.to_string(),
            id: Uuid::new_v4().to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// A Postman collection document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,
    #[serde(rename = "item", default)]
    pub items: Vec<NormalizedRequest>,
}

/// Appends requests to a collection without reordering, merging or deduplicating
#[derive(Debug)]
pub struct CollectionAssembler {
    collection: Collection,
}

impl CollectionAssembler {
    pub fn new(info: CollectionInfo) -> Self {
        Self {
            collection: Collection {
                info,
                items: Vec::new(),
            },
        }
    }

    pub fn append(&mut self, request: NormalizedRequest) {
        self.collection.items.push(request);
    }

    pub fn extend<I: IntoIterator<Item = NormalizedRequest>>(&mut self, requests: I) {
        self.collection.items.extend(requests);
    }

    pub fn len(&self) -> usize {
        self.collection.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.items.is_empty()
    }

    /// Hand over the finished collection; no appends are possible afterwards
    pub fn finish(self) -> Collection {
        self.collection
    }
}
