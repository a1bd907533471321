//! The pagination engine: one strategy per filter mode, each owning its
//! ordering, cursor shape and truncation rule.
//!
//! All strategies share the same resume semantics: a candidate is
//! included only if it sorts strictly after the cursor position under
//! the strategy's `(primary, id)` order. `id` is always the tie-break
//! and always present in the cursor, so the order is total even when
//! many records share a rank value.

pub mod cursor;
pub mod score;

use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tracing::error;

use crate::contract::{Event, EventsError, EventsFilter, Tag};
use crate::domain::repo::{ChronoKey, DatetimeRange, EventsRepository};
use self::cursor::{DatetimeCursor, SearchCursor, TagsCursor};

/// One page of records, each paired with the edge cursor that resumes
/// immediately after it.
pub struct QueryOutcome {
    pub items: Vec<(Event, String)>,
    pub has_next_page: bool,
}

/// Run the strategy selected by `filter`.
///
/// `first == None` disables truncation (and `has_next_page` is false);
/// `first == Some(0)` is rejected. `now` is the cutoff for the ranking
/// strategies, injected by the caller.
pub async fn execute(
    repo: &dyn EventsRepository,
    filter: Option<&EventsFilter>,
    first: Option<u64>,
    after: Option<&str>,
    now: DateTime<Utc>,
) -> Result<QueryOutcome, EventsError> {
    if first == Some(0) {
        return Err(EventsError::invalid_argument("page size must be at least 1"));
    }

    match filter {
        None => chronological(repo, DatetimeRange::default(), first, after).await,
        Some(EventsFilter::DateRange { from, to }) => {
            if from.is_none() && to.is_none() {
                return Err(EventsError::invalid_argument(
                    "date filter requires at least one bound",
                ));
            }
            let range = DatetimeRange {
                from: *from,
                to: *to,
            };
            chronological(repo, range, first, after).await
        }
        Some(EventsFilter::Search { query }) => search(repo, query, first, after, now).await,
        Some(EventsFilter::Relevance { tags }) => relevance(repo, tags, first, after, now).await,
    }
}

/// Shared by the no-filter and date-range strategies: `(datetime, id)`
/// ascending with the keyset pushed into the repository, fetching one
/// row past the page to learn whether more exist.
async fn chronological(
    repo: &dyn EventsRepository,
    range: DatetimeRange,
    first: Option<u64>,
    after: Option<&str>,
) -> Result<QueryOutcome, EventsError> {
    let after_key = after
        .map(pagecore::decode_cursor::<DatetimeCursor>)
        .transpose()?
        .map(|c| ChronoKey {
            datetime: c.datetime,
            id: c.id,
        });

    let mut events = repo
        .list_chronological(range, after_key, first.map(|f| f.saturating_add(1)))
        .await
        .map_err(internal)?;

    let has_next_page = matches!(first, Some(f) if events.len() as u64 > f);
    if has_next_page {
        events.pop();
    }

    let items = events
        .into_iter()
        .map(|e| {
            let token = pagecore::encode_cursor(&DatetimeCursor {
                id: e.id,
                datetime: e.datetime,
            });
            (e, token)
        })
        .collect();
    Ok(QueryOutcome {
        items,
        has_next_page,
    })
}

/// Free-text search: edit distance to the event name, ascending, over
/// the upcoming-event scan, ranked in memory.
async fn search(
    repo: &dyn EventsRepository,
    query: &str,
    first: Option<u64>,
    after: Option<&str>,
    now: DateTime<Utc>,
) -> Result<QueryOutcome, EventsError> {
    let after_cursor = after
        .map(pagecore::decode_cursor::<SearchCursor>)
        .transpose()?;

    let events = repo.list_upcoming(now).await.map_err(internal)?;
    let mut scored: Vec<(Event, u64)> = events
        .into_iter()
        .map(|e| {
            let distance = score::edit_distance(&e.name, query);
            (e, distance)
        })
        .filter(|(e, distance)| match after_cursor {
            None => true,
            Some(c) => *distance > c.relevance || (*distance == c.relevance && e.id > c.id),
        })
        .collect();
    scored.sort_by_key(|(e, distance)| (*distance, e.id));

    Ok(truncate_ranked(scored, first, |e, distance| {
        pagecore::encode_cursor(&SearchCursor {
            id: e.id,
            relevance: distance,
        })
    }))
}

/// Tag relevance: shared-tag count, descending, over the upcoming-event
/// scan, ranked in memory.
async fn relevance(
    repo: &dyn EventsRepository,
    tags: &[Tag],
    first: Option<u64>,
    after: Option<&str>,
    now: DateTime<Utc>,
) -> Result<QueryOutcome, EventsError> {
    let after_cursor = after
        .map(pagecore::decode_cursor::<TagsCursor>)
        .transpose()?;

    let events = repo.list_upcoming(now).await.map_err(internal)?;
    let mut scored: Vec<(Event, u64)> = events
        .into_iter()
        .map(|e| {
            let matching = score::tag_overlap(&e.tags, tags);
            (e, matching)
        })
        .filter(|(e, matching)| match after_cursor {
            None => true,
            Some(c) => *matching < c.matching_tags || (*matching == c.matching_tags && e.id > c.id),
        })
        .collect();
    scored.sort_by_key(|(e, matching)| (Reverse(*matching), e.id));

    Ok(truncate_ranked(scored, first, |e, matching| {
        pagecore::encode_cursor(&TagsCursor {
            id: e.id,
            matching_tags: matching,
        })
    }))
}

/// Truncation rule shared by the ranked strategies: with a page size,
/// keep `first` records and report whether any were left over.
fn truncate_ranked(
    mut scored: Vec<(Event, u64)>,
    first: Option<u64>,
    to_cursor: impl Fn(&Event, u64) -> String,
) -> QueryOutcome {
    let has_next_page = matches!(first, Some(f) if scored.len() as u64 > f);
    if let Some(f) = first {
        scored.truncate(f as usize);
    }
    let items = scored
        .into_iter()
        .map(|(e, rank)| {
            let token = to_cursor(&e, rank);
            (e, token)
        })
        .collect();
    QueryOutcome {
        items,
        has_next_page,
    }
}

fn internal(e: anyhow::Error) -> EventsError {
    error!(error = %e, "events repository failure");
    EventsError::internal()
}
