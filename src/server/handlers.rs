//! `/api/auth` and `/api/auth/refresh`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    oauth::{AuthParams, AuthRedirect},
    server::AppState,
};

/// Append each cookie as its own `Set-Cookie` header.
fn append_cookies<'a>(headers: &mut HeaderMap, cookies: impl IntoIterator<Item = &'a String>) {
    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Dropping unrepresentable cookie"),
        }
    }
}

fn see_other(redirect: &AuthRedirect) -> Response {
    let mut response = StatusCode::SEE_OTHER.into_response();
    let headers = response.headers_mut();

    match HeaderValue::from_str(&redirect.location) {
        Ok(location) => {
            headers.insert(LOCATION, location);
        }
        Err(e) => {
            warn!(error = %e, "Redirect target is not a valid header value");
            headers.insert(LOCATION, HeaderValue::from_static("/"));
        }
    }
    append_cookies(headers, &redirect.set_cookies);
    response
}

/// `GET /api/auth`: start the sign-in or finish it. Always a 303, even for
/// a query that repeats or garbles its parameters.
pub async fn auth(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let params = AuthParams::from_query(uri.query());
    let authority = uri.authority().map(|a| a.as_str());
    let redirect = state.flow.authorize(&params, &headers, authority).await;
    see_other(&redirect)
}

/// `POST /api/auth/refresh`: 204 with the new token cookie, or a bare status.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match state.flow.refresh(&headers, &body).await {
        Ok(refreshed) => {
            let mut response = StatusCode::NO_CONTENT.into_response();
            append_cookies(response.headers_mut(), [&refreshed.set_cookie]);
            response
        }
        Err(err) => {
            warn!(error = %err, "Token refresh failed");
            err.status_code().into_response()
        }
    }
}
