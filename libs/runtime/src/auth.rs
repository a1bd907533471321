use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

/// Authenticated principal id supplied by the authentication
/// collaborator, carried on the `x-user-id` header. Extraction failure
/// is a hard authorization failure: every mutating operation and every
/// "my records" query requires a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal(pub i64);

pub const PRINCIPAL_HEADER: &str = "x-user-id";

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .map(Principal)
            .ok_or((StatusCode::UNAUTHORIZED, "missing or invalid principal"))
    }
}
