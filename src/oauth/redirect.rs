//! Redirect URI resolution and the provider authorization URL.

use url::Url;

/// Callback used when the service is reached via a loopback host.
pub const LOCAL_REDIRECT_URI: &str = "https://localhost:3000/api/auth";

/// Path of the authorize/callback endpoint on this service.
pub const AUTH_PATH: &str = "/api/auth";

/// Hostname part of a `Host` header value, without port or IPv6 brackets.
fn hostname(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    // A bare IPv6 literal has several colons and no port
    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => name,
        _ => host,
    }
}

fn is_loopback(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1" | "::1")
}

/// Decide the `redirect_uri` sent to the provider.
///
/// A configured URI wins but must be `https://`; anything else is treated as
/// misconfiguration (`None`). Without one, the URI is derived from the
/// request host.
pub fn resolve_redirect_uri(configured: Option<&str>, host: Option<&str>) -> Option<String> {
    if let Some(uri) = configured.filter(|u| !u.is_empty()) {
        return uri.starts_with("https://").then(|| uri.to_string());
    }

    let host = host.map(str::trim).filter(|h| !h.is_empty())?;
    if is_loopback(hostname(host)) {
        return Some(LOCAL_REDIRECT_URI.to_string());
    }
    Some(format!("https://{host}{AUTH_PATH}"))
}

/// Provider authorization URL for the code flow.
pub fn authorization_url(
    authorize_endpoint: &Url,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Url {
    let mut url = authorize_endpoint.clone();
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("state", state);
    url
}
