//! Deep links to a point and the QR-code image request that encodes them.
//!
//! The link opens the dashboard directly on a point (`{base}/?p={id}`). Which
//! base is used depends on where the dashboard runs:
//!
//! - on a publicly reachable host, the current origin, always;
//! - on a local-only host, the configured public base URL when set (typically
//!   the machine's LAN address), otherwise the current origin.
//!
//! QR pixels are rendered by an external image service; this module only builds
//! the request URL.

use std::net::IpAddr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Default external QR image service.
pub const DEFAULT_QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";
/// Default QR image size in pixels.
pub const DEFAULT_QR_SIZE: u32 = 200;
/// Quiet-zone margin requested from the service, in pixels.
pub const QR_MARGIN: u32 = 10;
/// Error-correction level requested from the service.
pub const QR_ERROR_CORRECTION: &str = "M";
/// Image format requested from the service.
pub const QR_FORMAT: &str = "png";

/// Characters left alone by `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a string for use as a query value.
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Extracts the host name from an origin such as `http://[::1]:8080`.
#[must_use]
pub fn host_of(origin: &str) -> &str {
    let rest = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    if let Some(bracketed) = authority.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or_default();
    }
    authority.split(':').next().unwrap_or_default()
}

/// Whether a host is only reachable from the machine itself.
#[must_use]
pub fn is_local_host(host: &str) -> bool {
    let host = host.trim().to_ascii_lowercase();
    if host.is_empty() || host == "localhost" || host.ends_with(".localhost") {
        return true;
    }

    host.parse::<IpAddr>()
        .is_ok_and(|ip| ip.is_loopback() || ip.is_unspecified())
}

/// Builds per-point deep links and QR image requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrLinkBuilder {
    origin: String,
    public_base_url: Option<String>,
    service_url: String,
}

impl QrLinkBuilder {
    /// Creates a builder for a dashboard served at `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            public_base_url: None,
            service_url: DEFAULT_QR_SERVICE.to_string(),
        }
    }

    /// Sets the operator-configured public base URL. Blank values count as unset.
    #[must_use]
    pub fn with_public_base_url(mut self, url: Option<impl Into<String>>) -> Self {
        self.public_base_url = url
            .map(Into::into)
            .filter(|u: &String| !u.trim().is_empty());
        self
    }

    /// Overrides the QR image service endpoint.
    #[must_use]
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Whether the current origin is a local-only host.
    #[must_use]
    pub fn is_local(&self) -> bool {
        is_local_host(host_of(&self.origin))
    }

    /// The base the links are built on, without trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        let base = match (&self.public_base_url, self.is_local()) {
            (Some(public), true) => public.trim(),
            _ => self.origin.as_str(),
        };
        base.trim_end_matches('/')
    }

    /// Deep link opening the dashboard on `point_id`.
    #[must_use]
    pub fn link(&self, point_id: &str) -> String {
        format!("{}/?p={}", self.base(), encode_component(point_id))
    }

    /// URL of a `size`×`size` QR image encoding the deep link to `point_id`.
    #[must_use]
    pub fn image_request(&self, point_id: &str, size: u32) -> String {
        format!(
            "{}?size={size}x{size}&data={}&margin={QR_MARGIN}&ecc={QR_ERROR_CORRECTION}&format={QR_FORMAT}",
            self.service_url,
            encode_component(&self.link(point_id)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_origin_without_override_uses_origin() {
        let builder = QrLinkBuilder::new("http://localhost:5173");
        assert_eq!(builder.link("P-07"), "http://localhost:5173/?p=P-07");
    }

    #[test]
    fn test_local_origin_with_override_uses_public_base() {
        let builder = QrLinkBuilder::new("http://127.0.0.1:3000")
            .with_public_base_url(Some("http://192.168.1.40:3000/"));
        assert_eq!(builder.link("P-07"), "http://192.168.1.40:3000/?p=P-07");
    }

    #[test]
    fn test_public_origin_ignores_override() {
        let builder = QrLinkBuilder::new("https://centerline.example.com")
            .with_public_base_url(Some("http://192.168.1.40:3000"));
        assert!(!builder.is_local());
        assert_eq!(
            builder.link("P-07"),
            "https://centerline.example.com/?p=P-07"
        );
    }

    #[test]
    fn test_blank_override_counts_as_unset() {
        let builder = QrLinkBuilder::new("http://localhost:5173").with_public_base_url(Some("  "));
        assert_eq!(builder.base(), "http://localhost:5173");
    }

    #[test]
    fn test_point_id_is_percent_encoded() {
        let builder = QrLinkBuilder::new("http://localhost");
        assert_eq!(builder.link("P 07&x=1"), "http://localhost/?p=P%2007%26x%3D1");
        assert_eq!(builder.link("P-07"), "http://localhost/?p=P-07");
    }

    #[test]
    fn test_image_request_encodes_link() {
        let builder = QrLinkBuilder::new("http://localhost:5173");
        assert_eq!(
            builder.image_request("P-07", 150),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150\
             &data=http%3A%2F%2Flocalhost%3A5173%2F%3Fp%3DP-07&margin=10&ecc=M&format=png"
        );
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("http://localhost:5173"), "localhost");
        assert_eq!(host_of("https://user@plant.example.com/path"), "plant.example.com");
        assert_eq!(host_of("http://[::1]:8080"), "::1");
        assert_eq!(host_of("10.0.0.5:3000"), "10.0.0.5");
    }

    #[test]
    fn test_is_local_host() {
        assert!(is_local_host("localhost"));
        assert!(is_local_host("app.localhost"));
        assert!(is_local_host("127.0.0.1"));
        assert!(is_local_host("::1"));
        assert!(is_local_host("0.0.0.0"));
        assert!(!is_local_host("192.168.1.40"));
        assert!(!is_local_host("centerline.example.com"));
    }
}
