//! Server-driven pagination.
//!
//! Every listing endpoint answers with the same envelope:
//!
//! ```json
//! { "data": [...] | {...}, "pagination": { "nextPath": "/api/...?offset=25", "total": 40 } }
//! ```
//!
//! [`Pager`] follows `nextPath` and flattens the pages into one lazy stream
//! of raw items. A list-shaped `data` yields each element. A mapping-shaped
//! `data` (`documents.group_memberships`) yields the mapping itself, once
//! per page.
//!
//! The walk ends at the first of:
//! - `nextPath` null, absent, or empty
//! - an empty page (`[]`, or a mapping whose values are all empty lists)
//! - the running item count reaching `pagination.total`
//!
//! Outline keeps handing out a `nextPath` on the final page, so `total` is
//! usually what stops the walk.

use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::client::OutlineClient;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// One decoded page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Page {
    pub items: Vec<Value>,
    pub next_path: Option<String>,
    pub total: Option<u64>,
}

/// Lazy, single-pass iterator over the items of a paginated endpoint.
///
/// No request is made until the first call to `next()`. A failed page is
/// reported from the `next()` call that fetched it, after which the pager
/// yields `None`.
pub struct Pager<'a, T> {
    client: &'a OutlineClient<T>,
    pending: Option<(String, Value)>,
    buffer: VecDeque<Value>,
    fetched: u64,
    finished: bool,
}

impl<'a, T: Transport> Pager<'a, T> {
    pub fn new(client: &'a OutlineClient<T>, endpoint: &str, body: Value) -> Self {
        Self {
            client,
            pending: Some((endpoint.to_string(), body)),
            buffer: VecDeque::new(),
            fetched: 0,
            finished: false,
        }
    }

    fn fetch(&mut self, target: &str, body: &Value) -> Result<()> {
        let envelope = self.client.post(target, body)?;
        let page = parse_page(&self.client.resolve_url(target), envelope)?;

        if page.items.is_empty() {
            return Ok(());
        }

        self.fetched += page.items.len() as u64;
        let exhausted = page.total.is_some_and(|total| self.fetched >= total);
        self.buffer.extend(page.items);

        if !exhausted {
            // The next URL already carries limit/offset
            self.pending = page.next_path.map(|path| (path, json!({})));
        }
        Ok(())
    }
}

impl<T: Transport> Iterator for Pager<'_, T> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            let Some((target, body)) = self.pending.take() else {
                self.finished = true;
                return None;
            };
            if let Err(e) = self.fetch(&target, &body) {
                self.finished = true;
                self.buffer.clear();
                return Some(Err(e));
            }
        }
    }
}

/// Decode a `{data, pagination}` envelope.
pub(crate) fn parse_page(url: &str, mut envelope: Value) -> Result<Page> {
    let malformed = |message: &str| Error::MalformedResponse {
        url: url.to_string(),
        message: message.to_string(),
    };

    let Some(object) = envelope.as_object_mut() else {
        return Err(malformed("response is not a JSON object"));
    };

    let items = match object.remove("data") {
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => {
            let empty = map
                .values()
                .all(|v| v.as_array().is_some_and(|a| a.is_empty()));
            if empty {
                Vec::new()
            } else {
                vec![Value::Object(map)]
            }
        }
        Some(Value::Null) | None => return Err(malformed("missing `data`")),
        Some(_) => return Err(malformed("`data` must be a list or an object")),
    };

    let pagination = object
        .get("pagination")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing `pagination`"))?;

    let next_path = pagination
        .get("nextPath")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let total = pagination.get("total").and_then(Value::as_u64);

    Ok(Page {
        items,
        next_path,
        total,
    })
}
