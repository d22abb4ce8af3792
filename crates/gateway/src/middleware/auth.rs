//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use common::AppError;
use domain::Caller;

use crate::state::AppState;

/// Resolve the bearer token, if any, into a [`Caller`] request extension.
///
/// A request without an `Authorization` header proceeds as
/// [`Caller::Anonymous`]; each operation decides whether that is enough.
/// A header that is present but malformed, expired or signed with another
/// key is rejected outright.
pub async fn caller_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let caller = match bearer {
        Ok(TypedHeader(Authorization(bearer))) => state.auth.authenticate(bearer.token()).await?,
        Err(rejection) if rejection.is_missing() => Caller::Anonymous,
        Err(_) => return Err(AppError::Unauthorized),
    };

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}
