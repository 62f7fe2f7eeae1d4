//! HTTP route handlers

pub mod activation;
pub mod health;
pub mod verification;

use actix_web::HttpRequest;

/// Resolve the client address used for the IP rate-limit scope
///
/// Proxy headers win over the socket: the first X-Forwarded-For entry,
/// then X-Real-IP, then the peer address. Literal "unknown" entries are
/// treated as absent, matching what some proxies emit for an
/// unresolvable hop.
pub(crate) fn client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = header_str(req, "X-Forwarded-For") {
        if let Some(first) = forwarded.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() && ip != "unknown" {
                return ip.to_string();
            }
        }
    }

    if let Some(real_ip) = header_str(req, "X-Real-IP") {
        if !real_ip.is_empty() && real_ip != "unknown" {
            return real_ip.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name)?.to_str().ok()
}
