//! Group-membership resolution for a single document.

use serde_json::json;

use crate::client::{OutlineClient, DOCUMENTS_GROUP_MEMBERSHIPS};
use crate::error::{Error, Result};
use crate::models::{GroupMembershipBundle, ReadGroup};
use crate::pager::Pager;
use crate::transport::Transport;

/// Groups with explicit access to `document_id`, in server order.
///
/// Each page of `documents.group_memberships` carries one bundle; the
/// `groups` of every bundle are concatenated. No bundles means no group
/// restrictions are known and the result is empty.
pub fn resolve_read_groups<T: Transport>(
    client: &OutlineClient<T>,
    document_id: &str,
) -> Result<Vec<ReadGroup>> {
    let body = json!({
        "id": document_id,
        "limit": client.config().page_limit,
        "offset": 0,
    });

    let mut groups = Vec::new();
    for item in Pager::new(client, DOCUMENTS_GROUP_MEMBERSHIPS, body) {
        let bundle: GroupMembershipBundle =
            serde_json::from_value(item?).map_err(|source| Error::Decode {
                what: "group membership bundle",
                source,
            })?;
        groups.extend(bundle.groups);
    }

    Ok(groups)
}
