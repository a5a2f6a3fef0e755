//! Collection resolution.
//!
//! Without an allow-list every collection is paged from `collections.list`.
//! With one, each ID is fetched from `collections.info`; the first failure
//! aborts the whole resolution.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::client::{OutlineClient, COLLECTIONS_INFO, COLLECTIONS_LIST};
use crate::error::{Error, Result};
use crate::models::Collection;
use crate::pager::Pager;
use crate::transport::Transport;

/// Insertion-ordered lookup from collection ID to [`Collection`].
#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    entries: Vec<Collection>,
    positions: HashMap<String, usize>,
}

impl CollectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a collection. A repeated ID replaces the earlier value but
    /// keeps its original position.
    pub fn insert(&mut self, collection: Collection) {
        match self.positions.get(&collection.id).copied() {
            Some(pos) => self.entries[pos] = collection,
            None => {
                self.positions
                    .insert(collection.id.clone(), self.entries.len());
                self.entries.push(collection);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Collection> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn resolve_collections<T: Transport>(
    client: &OutlineClient<T>,
    collection_ids: &[String],
) -> Result<CollectionIndex> {
    let mut index = CollectionIndex::new();

    if collection_ids.is_empty() {
        let body = json!({ "limit": client.config().page_limit, "offset": 0 });
        for item in Pager::new(client, COLLECTIONS_LIST, body) {
            index.insert(decode_collection(item?)?);
        }
        tracing::info!(collections = index.len(), mode = "list", "resolved collections");
    } else {
        for id in collection_ids {
            let data = client.fetch_data(COLLECTIONS_INFO, &json!({ "id": id }))?;
            index.insert(decode_collection(data)?);
        }
        tracing::info!(collections = index.len(), mode = "info", "resolved collections");
    }

    Ok(index)
}

fn decode_collection(item: Value) -> Result<Collection> {
    serde_json::from_value(item).map_err(|source| Error::Decode {
        what: "collection",
        source,
    })
}
