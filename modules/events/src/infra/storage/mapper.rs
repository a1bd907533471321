use anyhow::Context;

use crate::contract::{Event, Tag};
use crate::infra::storage::entity::Model as EventRow;

/// Convert a database row to the contract model. Fails only if the
/// stored tag payload is not valid JSON for the known tag set.
pub fn row_to_contract(row: EventRow) -> anyhow::Result<Event> {
    let tags: Vec<Tag> =
        serde_json::from_str(&row.tags).context("stored tag payload is not decodable")?;
    Ok(Event {
        id: row.id,
        name: row.name,
        description: row.description,
        location: row.location,
        tags,
        created_by: row.created_by,
        datetime: row.datetime,
        image_hash: row.image_hash,
    })
}

/// Serialize the tag list for storage.
pub fn tags_to_column(tags: &[Tag]) -> anyhow::Result<String> {
    serde_json::to_string(tags).context("tag payload is not encodable")
}
