use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::Span;

use crate::domain::models::identity::{Identity, Role};
use crate::error::AppError;

/// Identity asserted by the upstream identity provider, injected by the
/// gateway as headers. The values are trusted verbatim; this service never
/// authenticates.
pub struct CurrentUser(pub Identity);

fn identity_from_parts(parts: &Parts) -> Option<Identity> {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    let user_id = header("X-User-Id")?;
    let display_name = header("X-User-Name")?;
    let email = header("X-User-Email")?;
    let role = Role::parse(&header("X-User-Role")?)?;

    Some(Identity {
        user_id,
        display_name,
        email,
        role,
    })
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = identity_from_parts(parts).ok_or(AppError::Unauthorized)?;

        Span::current().record("user_id", &identity.user_id);

        Ok(CurrentUser(identity))
    }
}
