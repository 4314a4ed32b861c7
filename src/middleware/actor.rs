use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// The person a request acts for. Recorded on timeline events and used as
/// the default note author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Reads the acting user from the request headers, falling back to
    /// `default` for anything missing, blank or not valid UTF-8.
    pub fn from_headers(headers: &HeaderMap, default: &Actor) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            id: read(USER_ID_HEADER).unwrap_or_else(|| default.id.clone()),
            name: read(USER_NAME_HEADER).unwrap_or_else(|| default.name.clone()),
        }
    }
}

pub async fn resolve_actor(State(default): State<Actor>, mut req: Request, next: Next) -> Response {
    let actor = Actor::from_headers(req.headers(), &default);
    req.extensions_mut().insert(actor);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn headers_override_the_default() {
        let default = Actor::new("current-user", "HR Manager");
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u-7"));
        headers.insert(USER_NAME_HEADER, HeaderValue::from_static("Emily Rodriguez"));

        assert_eq!(
            Actor::from_headers(&headers, &default),
            Actor::new("u-7", "Emily Rodriguez")
        );
    }

    #[test]
    fn blank_headers_fall_back() {
        let default = Actor::new("current-user", "HR Manager");
        let mut headers = HeaderMap::new();
        headers.insert(USER_NAME_HEADER, HeaderValue::from_static("   "));

        assert_eq!(Actor::from_headers(&headers, &default), default);
    }
}
