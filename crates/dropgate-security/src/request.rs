//! Framework-neutral view of an inbound request

use std::net::IpAddr;

/// What the gate and limiter need to know about a request
pub trait InboundRequest {
    fn path(&self) -> &str;

    /// Header value by case-insensitive name, if present and valid text
    fn header(&self, name: &str) -> Option<&str>;

    /// Decoded query parameter
    fn query_param(&self, name: &str) -> Option<String>;

    /// Transport-level peer address
    fn peer_addr(&self) -> Option<IpAddr>;
}

/// Resolve the client address.
///
/// Prefers the first entry of `X-Forwarded-For`, then `X-Real-IP`, then the peer
/// address. Yields `"unknown"` when none is available.
pub fn client_address(request: &dyn InboundRequest) -> String {
    if let Some(forwarded) = request.header("x-forwarded-for") {
        let first = forwarded.split(',').next().unwrap_or_default().trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    if let Some(real_ip) = request.header("x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    request
        .peer_addr()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::net::IpAddr;

    use super::InboundRequest;

    #[derive(Debug, Default)]
    pub struct FakeRequest {
        pub path: String,
        pub headers: HashMap<String, String>,
        pub query: HashMap<String, String>,
        pub peer: Option<IpAddr>,
    }

    impl FakeRequest {
        pub fn get(path: &str) -> Self {
            Self {
                path: path.to_string(),
                ..Default::default()
            }
        }

        pub fn header(mut self, name: &str, value: &str) -> Self {
            self.headers.insert(name.to_ascii_lowercase(), value.to_string());
            self
        }

        pub fn query(mut self, name: &str, value: &str) -> Self {
            self.query.insert(name.to_string(), value.to_string());
            self
        }

        pub fn peer(mut self, ip: &str) -> Self {
            self.peer = ip.parse().ok();
            self
        }
    }

    impl InboundRequest for FakeRequest {
        fn path(&self) -> &str {
            &self.path
        }

        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .get(&name.to_ascii_lowercase())
                .map(String::as_str)
        }

        fn query_param(&self, name: &str) -> Option<String> {
            self.query.get(name).cloned()
        }

        fn peer_addr(&self) -> Option<IpAddr> {
            self.peer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeRequest;
    use super::*;

    #[test]
    fn test_forwarded_for_wins() {
        let req = FakeRequest::get("/api/types")
            .header("X-Forwarded-For", " 203.0.113.7 , 10.0.0.1")
            .header("X-Real-IP", "198.51.100.2")
            .peer("127.0.0.1");
        assert_eq!(client_address(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_then_peer() {
        let req = FakeRequest::get("/").header("X-Real-IP", "198.51.100.2").peer("127.0.0.1");
        assert_eq!(client_address(&req), "198.51.100.2");

        let req = FakeRequest::get("/").peer("::1");
        assert_eq!(client_address(&req), "::1");

        assert_eq!(client_address(&FakeRequest::get("/")), "unknown");
    }

    #[test]
    fn test_blank_forwarded_for_falls_through() {
        let req = FakeRequest::get("/").header("X-Forwarded-For", " ").peer("10.1.1.1");
        assert_eq!(client_address(&req), "10.1.1.1");
    }
}
