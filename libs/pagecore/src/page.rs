use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// One record of a page together with the cursor that resumes right
/// after it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(edges: Vec<Edge<T>>, has_next_page: bool) -> Self {
        let end_cursor = edges.last().map(|e| e.cursor.clone());
        Self {
            edges,
            page_info: PageInfo {
                end_cursor,
                has_next_page,
            },
        }
    }

    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo {
                end_cursor: None,
                has_next_page: false,
            },
        }
    }

    /// Map nodes while preserving cursors and page info (domain -> DTO
    /// mapping convenience).
    pub fn map_nodes<U>(self, mut f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            edges: self
                .edges
                .into_iter()
                .map(|e| Edge {
                    cursor: e.cursor,
                    node: f(e.node),
                })
                .collect(),
            page_info: self.page_info,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }
}
