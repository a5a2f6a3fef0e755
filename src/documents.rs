//! Document assembly.
//!
//! [`DocumentStream`] drives one full load:
//!
//! 1. resolve collections (once, before any document request)
//! 2. page `documents.list` for each collection, in index order
//! 3. for each document, look up its collection, fetch its read groups and
//!    emit an [`OutlineRecord`]
//!
//! Everything is sequential and lazy. The first error ends the stream.

use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::client::{OutlineClient, DOCUMENTS_LIST};
use crate::collections::{resolve_collections, CollectionIndex};
use crate::error::{Error, Result};
use crate::groups::resolve_read_groups;
use crate::models::{OutlineRecord, RawDocument};
use crate::pager::Pager;
use crate::transport::Transport;

pub struct DocumentStream<'a, T> {
    client: &'a OutlineClient<T>,
    collections: Option<CollectionIndex>,
    pending: VecDeque<String>,
    pages: Option<Pager<'a, T>>,
    emitted: usize,
    finished: bool,
}

impl<'a, T: Transport> DocumentStream<'a, T> {
    pub fn new(client: &'a OutlineClient<T>) -> Self {
        Self {
            client,
            collections: None,
            pending: VecDeque::new(),
            pages: None,
            emitted: 0,
            finished: false,
        }
    }

    fn advance(&mut self) -> Result<Option<OutlineRecord>> {
        if self.collections.is_none() {
            let index = resolve_collections(self.client, &self.client.config().collection_ids)?;
            self.pending = index.ids().map(str::to_string).collect();
            self.collections = Some(index);
        }

        loop {
            if let Some(pages) = self.pages.as_mut() {
                match pages.next() {
                    Some(item) => return self.assemble(item?).map(Some),
                    None => self.pages = None,
                }
            }

            let Some(collection_id) = self.pending.pop_front() else {
                return Ok(None);
            };
            tracing::debug!(collection_id = %collection_id, "listing documents");
            let body = json!({
                "collectionId": collection_id,
                "limit": self.client.config().page_limit,
                "offset": 0,
            });
            self.pages = Some(Pager::new(self.client, DOCUMENTS_LIST, body));
        }
    }

    fn assemble(&self, item: Value) -> Result<OutlineRecord> {
        let document: RawDocument =
            serde_json::from_value(item).map_err(|source| Error::Decode {
                what: "document",
                source,
            })?;

        let collection = self
            .collections
            .as_ref()
            .and_then(|index| index.get(&document.collection_id))
            .ok_or_else(|| Error::UnknownCollection {
                document_id: document.id.clone(),
                collection_id: document.collection_id.clone(),
            })?;

        let read_groups = resolve_read_groups(self.client, &document.id)?;

        Ok(OutlineRecord::assemble(
            &self.client.config().base_url,
            document,
            collection,
            read_groups,
        ))
    }
}

impl<T: Transport> Iterator for DocumentStream<'_, T> {
    type Item = Result<OutlineRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(record)) => {
                self.emitted += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.finished = true;
                tracing::info!(records = self.emitted, "outline load finished");
                None
            }
            Err(e) => {
                self.finished = true;
                self.pages = None;
                Some(Err(e))
            }
        }
    }
}
