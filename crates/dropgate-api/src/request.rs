//! Adapter exposing an axum request to the admission checks

use std::net::IpAddr;

use axum::extract::Request;
use dropgate_security::InboundRequest;

/// Borrowed view of an HTTP request plus its peer address
pub struct HttpRequest<'a> {
    request: &'a Request,
    peer: Option<IpAddr>,
}

impl<'a> HttpRequest<'a> {
    pub fn new(request: &'a Request, peer: Option<IpAddr>) -> Self {
        Self { request, peer }
    }
}

impl InboundRequest for HttpRequest<'_> {
    fn path(&self) -> &str {
        self.request.uri().path()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let query = self.request.uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn peer_addr(&self) -> Option<IpAddr> {
        self.peer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_reads_headers_and_query() {
        let request = Request::builder()
            .uri("/api/search/cc?q=a%20b&apikey=k%2B1")
            .header("X-API-Key", "header-key")
            .body(Body::empty())
            .unwrap();
        let view = HttpRequest::new(&request, "127.0.0.1".parse().ok());

        assert_eq!(view.path(), "/api/search/cc");
        assert_eq!(view.header("x-api-key"), Some("header-key"));
        assert_eq!(view.query_param("apikey").as_deref(), Some("k+1"));
        assert_eq!(view.query_param("q").as_deref(), Some("a b"));
        assert_eq!(view.query_param("token"), None);
        assert_eq!(view.peer_addr(), "127.0.0.1".parse().ok());
    }
}
