//! Strategy-specific cursor records. Every cursor carries the last-seen
//! `id` (the universal tie-break) plus the strategy's rank field, and
//! rejects unknown fields so a token minted under one ordering fails
//! shape validation under any other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chronological strategies (no filter, date range).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatetimeCursor {
    pub id: i64,
    pub datetime: DateTime<Utc>,
}

/// Free-text search: `relevance` is the edit distance of the last-seen
/// record (ascending order, smaller is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchCursor {
    pub id: i64,
    pub relevance: u64,
}

/// Tag relevance: `matching_tags` of the last-seen record (descending
/// order, larger is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagsCursor {
    pub id: i64,
    pub matching_tags: u64,
}

/// Owner-scoped listing: plain id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdCursor {
    pub id: i64,
}
