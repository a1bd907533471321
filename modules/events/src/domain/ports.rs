use async_trait::async_trait;

/// Output port: content-addressed blob storage for event images.
///
/// The contract absorbs collaborator failures: `upload` falls back to
/// the stable default hash and `fetch` to the default placeholder, so a
/// broken blob store degrades pages instead of failing them.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload content, returning its content hash. Absent content maps
    /// to the stable default hash. Idempotent for identical content.
    async fn upload(&self, content: Option<&str>) -> String;

    /// Resolve a content hash back to content. Any retrieval failure
    /// returns the default placeholder.
    async fn fetch(&self, content_hash: &str) -> String;
}
