//! End-to-end tests of the event service over in-memory SQLite, the
//! in-process broker and the in-process blob store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use events::contract::{EventPatch, EventsError, EventsFilter, NewEvent, Tag};
use events::domain::service::EventsService;
use events::infra::blob::{InMemoryBlobStore, DEFAULT_IMAGE};
use events::infra::storage::migrations::Migrator;
use events::infra::storage::repo::SeaOrmEventsRepository;
use syncmq::{Broker, ConnectOpts, InMemoryBroker, SyncProducer};

fn fast_opts() -> ConnectOpts {
    ConnectOpts {
        attempts: 5,
        delay: Duration::from_millis(5),
    }
}

async fn service() -> (EventsService, Arc<InMemoryBroker>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let broker = Arc::new(InMemoryBroker::new());
    let producer = SyncProducer::connect(broker.clone() as Arc<dyn Broker>, &fast_opts())
        .await
        .unwrap();
    let svc = EventsService::new(
        Arc::new(SeaOrmEventsRepository::new(db)),
        Arc::new(InMemoryBlobStore::new()),
        producer,
    );
    (svc, broker)
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 8, day, hour, 0, 0).unwrap()
}

fn new_event(name: &str, datetime: DateTime<Utc>, tags: Vec<Tag>) -> NewEvent {
    NewEvent {
        name: name.to_owned(),
        description: format!("{name} description"),
        location: "Main Hall".to_owned(),
        tags,
        datetime,
        image: None,
    }
}

/// Walk a paginated listing to exhaustion, returning node names in
/// traversal order.
async fn walk(
    svc: &EventsService,
    filter: Option<EventsFilter>,
    page_size: u64,
) -> Vec<String> {
    let mut names = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let page = svc
            .get_events(filter.clone(), Some(page_size), after)
            .await
            .unwrap();
        assert!(page.edges.len() as u64 <= page_size);
        names.extend(page.nodes().map(|n| n.name.clone()));
        if !page.page_info.has_next_page {
            assert!(page.edges.is_empty() || page.page_info.end_cursor.is_some());
            return names;
        }
        after = page.page_info.end_cursor.clone();
        assert!(after.is_some(), "has_next_page implies an end cursor");
    }
}

#[tokio::test]
async fn create_get_and_conflict() {
    let (svc, _broker) = service().await;

    let created = svc
        .create_event(1, new_event("HackNight", at(2, 18), vec![Tag::WebApps]))
        .await
        .unwrap();
    assert_eq!(created.created_by, Some(1));
    assert_eq!(created.image, DEFAULT_IMAGE);

    let fetched = svc.get_event(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let dup = svc
        .create_event(2, new_event("HackNight", at(2, 18), vec![]))
        .await;
    assert!(matches!(dup, Err(EventsError::Conflict { .. })));

    // Same name at a different time is a distinct event.
    svc.create_event(2, new_event("HackNight", at(3, 18), vec![]))
        .await
        .unwrap();
}

#[tokio::test]
async fn zero_page_size_is_rejected_everywhere() {
    let (svc, _broker) = service().await;
    for filter in [
        None,
        Some(EventsFilter::Search {
            query: "x".into(),
        }),
        Some(EventsFilter::Relevance {
            tags: vec![Tag::Robotics],
        }),
        Some(EventsFilter::DateRange {
            from: Some(at(1, 0)),
            to: None,
        }),
    ] {
        let res = svc.get_events(filter, Some(0), None).await;
        assert!(matches!(res, Err(EventsError::InvalidArgument { .. })));
    }
    let res = svc.my_events(1, Some(0), None).await;
    assert!(matches!(res, Err(EventsError::InvalidArgument { .. })));
}

#[tokio::test]
async fn chronological_walk_is_complete_and_ordered() {
    let (svc, _broker) = service().await;

    // Two of the five share a datetime so the id tie-break is exercised.
    svc.create_event(1, new_event("c", at(3, 12), vec![])).await.unwrap();
    svc.create_event(1, new_event("a", at(1, 12), vec![])).await.unwrap();
    svc.create_event(1, new_event("d", at(3, 12), vec![])).await.unwrap();
    svc.create_event(1, new_event("b", at(2, 12), vec![])).await.unwrap();
    svc.create_event(1, new_event("e", at(4, 12), vec![])).await.unwrap();

    // "c" was inserted before "d", so at the tied datetime it has the
    // smaller id and comes first.
    let names = walk(&svc, None, 2).await;
    assert_eq!(names, ["a", "b", "c", "d", "e"]);

    // Page size one yields the same traversal.
    assert_eq!(walk(&svc, None, 1).await, names);
}

#[tokio::test]
async fn has_next_page_boundary() {
    let (svc, _broker) = service().await;
    for i in 0..4u32 {
        svc.create_event(1, new_event(&format!("e{i}"), at(1 + i, 10), vec![]))
            .await
            .unwrap();
    }

    let exact = svc.get_events(None, Some(4), None).await.unwrap();
    assert_eq!(exact.edges.len(), 4);
    assert!(!exact.page_info.has_next_page);

    let short = svc.get_events(None, Some(3), None).await.unwrap();
    assert_eq!(short.edges.len(), 3);
    assert!(short.page_info.has_next_page);

    let unbounded = svc.get_events(None, None, None).await.unwrap();
    assert_eq!(unbounded.edges.len(), 4);
    assert!(!unbounded.page_info.has_next_page);
}

#[tokio::test]
async fn maximal_page_size_is_an_untruncated_page() {
    let (svc, _broker) = service().await;

    // Empty table first: the look-ahead limit must not overflow.
    let empty = svc.get_events(None, Some(u64::MAX), None).await.unwrap();
    assert!(empty.edges.is_empty());
    assert!(!empty.page_info.has_next_page);
    assert!(empty.page_info.end_cursor.is_none());

    for i in 0..3u32 {
        svc.create_event(7, new_event(&format!("e{i}"), at(1 + i, 10), vec![]))
            .await
            .unwrap();
    }

    let all = svc.get_events(None, Some(u64::MAX), None).await.unwrap();
    assert_eq!(all.edges.len(), 3);
    assert!(!all.page_info.has_next_page);

    let ranked = svc
        .get_events(
            Some(EventsFilter::Search { query: "e0".into() }),
            Some(u64::MAX),
            None,
        )
        .await
        .unwrap();
    assert_eq!(ranked.edges.len(), 3);
    assert!(!ranked.page_info.has_next_page);

    let mine = svc.my_events(7, Some(u64::MAX), None).await.unwrap();
    assert_eq!(mine.edges.len(), 3);
    assert!(!mine.page_info.has_next_page);
}

#[tokio::test]
async fn date_range_is_inclusive_and_needs_a_bound() {
    let (svc, _broker) = service().await;
    svc.create_event(1, new_event("before", at(1, 10), vec![])).await.unwrap();
    svc.create_event(1, new_event("start", at(2, 0), vec![])).await.unwrap();
    svc.create_event(1, new_event("middle", at(3, 10), vec![])).await.unwrap();
    svc.create_event(1, new_event("end", at(4, 0), vec![])).await.unwrap();
    svc.create_event(1, new_event("after", at(5, 10), vec![])).await.unwrap();

    let filter = Some(EventsFilter::DateRange {
        from: Some(at(2, 0)),
        to: Some(at(4, 0)),
    });
    assert_eq!(walk(&svc, filter, 2).await, ["start", "middle", "end"]);

    // A window with no matches is an empty page, not an error.
    let empty = svc
        .get_events(
            Some(EventsFilter::DateRange {
                from: Some(at(20, 0)),
                to: Some(at(25, 0)),
            }),
            Some(10),
            None,
        )
        .await
        .unwrap();
    assert!(empty.edges.is_empty());
    assert!(!empty.page_info.has_next_page);
    assert_eq!(empty.page_info.end_cursor, None);

    // Both bounds absent is a caller error.
    let res = svc
        .get_events(
            Some(EventsFilter::DateRange { from: None, to: None }),
            Some(10),
            None,
        )
        .await;
    assert!(matches!(res, Err(EventsError::InvalidArgument { .. })));
}

#[tokio::test]
async fn search_ranks_exact_name_first() {
    let (svc, _broker) = service().await;
    svc.create_event(1, new_event("Rest Meetup", at(1, 10), vec![])).await.unwrap();
    svc.create_event(1, new_event("Rust Meetup", at(2, 10), vec![])).await.unwrap();
    svc.create_event(1, new_event("Pottery Class", at(3, 10), vec![])).await.unwrap();

    let filter = Some(EventsFilter::Search {
        query: "rust meetup".into(),
    });
    let names = walk(&svc, filter, 1).await;
    assert_eq!(names[0], "Rust Meetup");
    assert_eq!(names[1], "Rest Meetup");
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn relevance_orders_by_shared_tags_descending() {
    let (svc, _broker) = service().await;
    svc.create_event(1, new_event("none", at(1, 10), vec![Tag::UxDesign]))
        .await
        .unwrap();
    svc.create_event(
        1,
        new_event("both", at(2, 10), vec![Tag::Robotics, Tag::WebApps]),
    )
    .await
    .unwrap();
    svc.create_event(1, new_event("one", at(3, 10), vec![Tag::WebApps]))
        .await
        .unwrap();

    let filter = Some(EventsFilter::Relevance {
        tags: vec![Tag::Robotics, Tag::WebApps],
    });
    assert_eq!(walk(&svc, filter.clone(), 1).await, ["both", "one", "none"]);
    assert_eq!(walk(&svc, filter, 2).await, ["both", "one", "none"]);
}

#[tokio::test]
async fn ranked_ties_break_by_id_across_pages() {
    let (svc, _broker) = service().await;
    // All names are equidistant from the query, so order is purely id.
    for (i, name) in ["axx", "bxx", "cxx", "dxx"].iter().enumerate() {
        svc.create_event(1, new_event(name, at(1 + i as u32, 10), vec![]))
            .await
            .unwrap();
    }

    let filter = Some(EventsFilter::Search { query: "zxx".into() });
    assert_eq!(walk(&svc, filter, 1).await, ["axx", "bxx", "cxx", "dxx"]);
}

#[tokio::test]
async fn cursors_do_not_transfer_between_strategies() {
    let (svc, _broker) = service().await;
    svc.create_event(1, new_event("a", at(1, 10), vec![Tag::Robotics]))
        .await
        .unwrap();
    svc.create_event(1, new_event("b", at(2, 10), vec![Tag::Robotics]))
        .await
        .unwrap();

    let chrono_page = svc.get_events(None, Some(1), None).await.unwrap();
    let chrono_cursor = chrono_page.page_info.end_cursor.unwrap();

    let search_filter = Some(EventsFilter::Search { query: "a".into() });
    let res = svc
        .get_events(search_filter.clone(), Some(1), Some(chrono_cursor))
        .await;
    assert!(matches!(res, Err(EventsError::InvalidCursor { .. })));

    let search_page = svc.get_events(search_filter, Some(1), None).await.unwrap();
    let search_cursor = search_page.page_info.end_cursor.unwrap();
    let res = svc.get_events(None, Some(1), Some(search_cursor.clone())).await;
    assert!(matches!(res, Err(EventsError::InvalidCursor { .. })));

    let tags_filter = Some(EventsFilter::Relevance { tags: vec![Tag::Robotics] });
    let res = svc.get_events(tags_filter, Some(1), Some(search_cursor)).await;
    assert!(matches!(res, Err(EventsError::InvalidCursor { .. })));

    let res = svc.get_events(None, Some(1), Some("not base64!".into())).await;
    assert!(matches!(res, Err(EventsError::InvalidCursor { .. })));
}

#[tokio::test]
async fn my_events_is_owner_scoped_and_id_ordered() {
    let (svc, _broker) = service().await;
    svc.create_event(1, new_event("mine-1", at(3, 10), vec![])).await.unwrap();
    svc.create_event(2, new_event("theirs", at(1, 10), vec![])).await.unwrap();
    svc.create_event(1, new_event("mine-2", at(2, 10), vec![])).await.unwrap();
    svc.create_event(1, new_event("mine-3", at(1, 9), vec![])).await.unwrap();

    let mut names = Vec::new();
    let mut after = None;
    loop {
        let page = svc.my_events(1, Some(2), after).await.unwrap();
        names.extend(page.nodes().map(|n| n.name.clone()));
        if !page.page_info.has_next_page {
            break;
        }
        after = page.page_info.end_cursor.clone();
    }
    // Insertion order, not datetime order: id ascending.
    assert_eq!(names, ["mine-1", "mine-2", "mine-3"]);
}

#[tokio::test]
async fn ownership_is_enforced_on_edit_and_delete() {
    let (svc, _broker) = service().await;
    let event = svc
        .create_event(1, new_event("guarded", at(1, 10), vec![]))
        .await
        .unwrap();

    let res = svc
        .edit_event(2, event.id, EventPatch { name: Some("stolen".into()), ..Default::default() })
        .await;
    assert!(matches!(res, Err(EventsError::PermissionDenied { .. })));

    let res = svc.delete_event(2, event.id).await;
    assert!(matches!(res, Err(EventsError::PermissionDenied { .. })));

    let res = svc.delete_event(1, 9999).await;
    assert!(matches!(res, Err(EventsError::NotFound { .. })));

    svc.delete_event(1, event.id).await.unwrap();
    let res = svc.get_event(event.id).await;
    assert!(matches!(res, Err(EventsError::NotFound { .. })));
}

#[tokio::test]
async fn mutations_publish_change_events() {
    let (svc, broker) = service().await;
    let event = svc
        .create_event(7, new_event("synced", at(1, 10), vec![Tag::Databases]))
        .await
        .unwrap();
    // Creation is local to the owning service.
    assert_eq!(broker.depth(), 0);

    svc.edit_event(
        7,
        event.id,
        EventPatch { location: Some("Room 4".into()), ..Default::default() },
    )
    .await
    .unwrap();
    svc.delete_event(7, event.id).await.unwrap();
    assert_eq!(broker.depth(), 2);

    let mut sub = broker.subscribe().await.unwrap();

    let edit = sub.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&edit.payload).unwrap();
    assert_eq!(value["message_type"], 2);
    assert_eq!(value["event_id"], event.id);
    assert_eq!(value["location"], "Room 4");
    assert_eq!(value["tags"], serde_json::json!(["DATABASES"]));
    edit.ack().await.unwrap();

    let delete = sub.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&delete.payload).unwrap();
    assert_eq!(value["message_type"], 3);
    assert_eq!(value["event_id"], event.id);
    delete.ack().await.unwrap();

    assert_eq!(broker.depth(), 0);
}

#[tokio::test]
async fn images_upload_and_resolve() {
    let (svc, _broker) = service().await;
    let mut req = new_event("with-poster", at(1, 10), vec![]);
    req.image = Some("poster-bytes".into());
    let created = svc.create_event(1, req).await.unwrap();
    assert_eq!(created.image, "poster-bytes");

    let updated = svc
        .edit_event(
            1,
            created.id,
            EventPatch { image: Some("new-poster".into()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.image, "new-poster");

    let fetched = svc.get_event(created.id).await.unwrap();
    assert_eq!(fetched.image, "new-poster");
}
