use serde::{Deserialize, Serialize};

use crate::{decode_cursor, encode_cursor, CursorError, Edge, Page};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatetimeCursor {
    id: i64,
    datetime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchCursor {
    id: i64,
    relevance: u32,
}

#[test]
fn cursor_roundtrip() {
    let cursor = SearchCursor {
        id: 42,
        relevance: 3,
    };
    let token = encode_cursor(&cursor);
    let decoded: SearchCursor = decode_cursor(&token).expect("decode should succeed");
    assert_eq!(decoded, cursor);
}

#[test]
fn cursor_token_is_base64_json() {
    use base64::Engine;
    let token = encode_cursor(&DatetimeCursor {
        id: 7,
        datetime: "2024-08-02T12:00:00Z".into(),
    });
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&token)
        .expect("token must be base64");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("payload must be JSON");
    assert_eq!(value["id"], 7);
}

#[test]
fn decode_rejects_invalid_base64() {
    let result: Result<SearchCursor, _> = decode_cursor("not-base64!!!");
    assert_eq!(result.unwrap_err(), CursorError::InvalidBase64);
}

#[test]
fn decode_rejects_non_json_payload() {
    use base64::Engine;
    let token = base64::engine::general_purpose::STANDARD.encode(b"plainly not json");
    let result: Result<SearchCursor, _> = decode_cursor(&token);
    assert_eq!(result.unwrap_err(), CursorError::InvalidShape);
}

#[test]
fn decode_rejects_foreign_cursor_shape() {
    // A token minted under one ordering must not decode under another.
    let token = encode_cursor(&DatetimeCursor {
        id: 1,
        datetime: "2024-08-02T12:00:00Z".into(),
    });
    let result: Result<SearchCursor, _> = decode_cursor(&token);
    assert_eq!(result.unwrap_err(), CursorError::InvalidShape);
}

#[test]
fn page_end_cursor_tracks_last_edge() {
    let page = Page::new(
        vec![
            Edge {
                cursor: "a".into(),
                node: 1,
            },
            Edge {
                cursor: "b".into(),
                node: 2,
            },
        ],
        true,
    );
    assert_eq!(page.page_info.end_cursor.as_deref(), Some("b"));
    assert!(page.page_info.has_next_page);

    let empty: Page<i32> = Page::empty();
    assert!(empty.page_info.end_cursor.is_none());
    assert!(!empty.page_info.has_next_page);
}

#[test]
fn page_map_nodes_preserves_cursors() {
    let page = Page::new(
        vec![Edge {
            cursor: "a".into(),
            node: 2,
        }],
        false,
    );
    let mapped = page.map_nodes(|n| n * 10);
    assert_eq!(mapped.edges[0].node, 20);
    assert_eq!(mapped.edges[0].cursor, "a");
}
