//! Identity middleware
//!
//! Authentication happens upstream; the authenticating proxy forwards the
//! user id in a trusted header. This layer resolves that id into a
//! [`SecurityContext`]. When it cannot, the request continues without a
//! context and handlers report it.

use crate::access_control::types::UserId;
use crate::auth::context::SecurityContext;
use crate::store::UserStore;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::{trace, warn};

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Read the user id forwarded by the authenticating proxy
pub fn user_id_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
        .map(UserId)
}

/// Attach a [`SecurityContext`] to the request when the caller can be identified
pub async fn resolve_security_context(
    State(users): State<Arc<dyn UserStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    match user_id_from_headers(request.headers()) {
        Some(user_id) => match SecurityContext::load(users.as_ref(), user_id).await {
            Ok(context) => {
                trace!(user = %user_id, admin = context.is_admin, "Resolved security context");
                request.extensions_mut().insert(context);
            }
            Err(e) => warn!(user = %user_id, error = %e, "Unable to resolve security context"),
        },
        None => trace!("Request carries no user identity"),
    }

    next.run(request).await
}
