//! Page loading: URL parsing and resolution, and the fetcher seam the
//! navigator drives.

pub mod http;

use std::fmt;

use softnav_types::Result;

/// A fetched page.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final URL of the response (after any redirects).
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Whether the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetches same-origin pages for the navigator.
///
/// `target` is always a path with optional query (`/about`,
/// `/posts?page=2`) -- never an absolute URL; the implementation binds
/// the origin.
pub trait PageFetcher {
    fn fetch(&self, target: &str) -> Result<FetchResponse>;
}

// ---------------------------------------------------------------------------
// URL parsing and resolution (simplified RFC 3986)
// ---------------------------------------------------------------------------

/// A parsed URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    /// Scheme component (e.g. `"http"`).
    pub scheme: String,
    /// Host component (e.g. `"example.com"`).
    pub host: String,
    /// Optional explicit port number.
    pub port: Option<u16>,
    /// Path component starting with `/`.
    pub path: String,
    /// Optional query string (without the leading `?`).
    pub query: Option<String>,
    /// Optional fragment (without the leading `#`).
    pub fragment: Option<String>,
}

impl Url {
    /// Parse a URL string.
    ///
    /// Handles full URLs (`http://host/path`), protocol-relative
    /// (`//host/path`), and fragment-only (`#section`) references.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        // Fragment-only reference.
        if let Some(frag) = url.strip_prefix('#') {
            return Some(Url {
                scheme: String::new(),
                host: String::new(),
                port: None,
                path: String::new(),
                query: None,
                fragment: Some(frag.to_string()),
            });
        }

        // Protocol-relative URL: //host/path
        if let Some(rest) = url.strip_prefix("//") {
            return Self::parse_authority_and_path("", rest);
        }

        // Full URL with scheme.
        if let Some(idx) = url.find("://") {
            let scheme = &url[..idx];
            let rest = &url[idx + 3..];
            return Self::parse_authority_and_path(scheme, rest);
        }

        None
    }

    /// Internal helper: parse `host[:port]/path?query#fragment` after
    /// the scheme has been stripped.
    fn parse_authority_and_path(scheme: &str, rest: &str) -> Option<Url> {
        // Split off fragment first.
        let (rest, fragment) = match rest.find('#') {
            Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
            None => (rest, None),
        };

        // Split off query.
        let (rest, query) = match rest.find('?') {
            Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
            None => (rest, None),
        };

        // Split authority from path.
        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        // Parse host and optional port from authority.
        let (host, port) = match authority.rfind(':') {
            Some(i) => {
                let maybe_port = &authority[i + 1..];
                if let Ok(p) = maybe_port.parse::<u16>() {
                    (&authority[..i], Some(p))
                } else {
                    (authority, None)
                }
            },
            None => (authority, None),
        };

        let path = if path.is_empty() { "/" } else { path };

        Some(Url {
            scheme: scheme.to_lowercase(),
            host: host.to_string(),
            port,
            path: path.to_string(),
            query,
            fragment,
        })
    }

    /// Resolve a reference against this base URL.
    ///
    /// Handles absolute URLs (returned as-is), protocol-relative
    /// (`//host/path`), absolute paths (`/path`), relative paths
    /// (`path`, `../path`), query-only (`?q=x`), and fragment-only
    /// (`#frag`) references. Anything else (e.g. `mailto:` hrefs)
    /// resolves to `None`.
    pub fn resolve(&self, reference: &str) -> Option<Url> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Some(self.clone());
        }

        // Absolute URL (has scheme) -- return as-is.
        if reference.contains("://") {
            return Url::parse(reference);
        }

        // Protocol-relative.
        if reference.starts_with("//") {
            return Url::parse(&format!("{}:{}", self.scheme, reference));
        }

        // Fragment-only.
        if let Some(frag) = reference.strip_prefix('#') {
            let mut resolved = self.clone();
            resolved.fragment = Some(frag.to_string());
            return Some(resolved);
        }

        // Query-only.
        if let Some(query) = reference.strip_prefix('?') {
            let mut resolved = self.clone();
            resolved.query = Some(query.to_string());
            resolved.fragment = None;
            return Some(resolved);
        }

        // Scheme-prefixed non-hierarchical references (mailto:, tel:,
        // javascript:) are not ours to interpret.
        if let Some(colon) = reference.find(':')
            && reference[..colon]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
            && reference[..colon].starts_with(|c: char| c.is_ascii_alphabetic())
        {
            return None;
        }

        // Absolute path.
        if reference.starts_with('/') {
            let (path, query, fragment) = split_path_query_fragment(reference);
            return Some(Url {
                scheme: self.scheme.clone(),
                host: self.host.clone(),
                port: self.port,
                path,
                query,
                fragment,
            });
        }

        // Relative path -- resolve against the base directory.
        let base_dir = self.directory();
        let (rel_path, query, fragment) = split_path_query_fragment(reference);
        let resolved_path = resolve_path(base_dir, &rel_path);
        Some(Url {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: self.port,
            path: resolved_path,
            query,
            fragment,
        })
    }

    /// Get the directory portion of the path (everything up to and
    /// including the last `/`).
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(i) => &self.path[..=i],
            None => "/",
        }
    }

    /// Get the origin (`scheme://host[:port]`).
    pub fn origin(&self) -> String {
        let mut s = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            s.push_str(&format!(":{port}"));
        }
        s
    }

    /// The request target: path plus query, origin and fragment
    /// stripped (`/posts?page=2`).
    pub fn request_target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "{}", self.path)?;
        if let Some(ref q) = self.query {
            write!(f, "?{q}")?;
        }
        if let Some(ref frag) = self.fragment {
            write!(f, "#{frag}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Split a target string (`/path?query#fragment`) into its parts.
pub fn split_path_query_fragment(s: &str) -> (String, Option<String>, Option<String>) {
    let (s, fragment) = match s.find('#') {
        Some(i) => (&s[..i], Some(s[i + 1..].to_string())),
        None => (s, None),
    };
    let (path, query) = match s.find('?') {
        Some(i) => (s[..i].to_string(), Some(s[i + 1..].to_string())),
        None => (s.to_string(), None),
    };
    (path, query, fragment)
}

/// Resolve a relative path against a base directory, handling `..` and
/// `.` segments.
fn resolve_path(base_dir: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

    for seg in relative.split('/') {
        match seg {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- URL parsing -------------------------------------------------------

    #[test]
    fn parse_full_http_url() {
        let url = Url::parse("http://example.com/page.html").unwrap();
        assert_eq!(url.scheme, "http");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.port, None);
        assert_eq!(url.path, "/page.html");
        assert_eq!(url.query, None);
        assert_eq!(url.fragment, None);
    }

    #[test]
    fn parse_url_with_port() {
        let url = Url::parse("http://localhost:8080/api").unwrap();
        assert_eq!(url.host, "localhost");
        assert_eq!(url.port, Some(8080));
        assert_eq!(url.path, "/api");
    }

    #[test]
    fn parse_url_with_query_and_fragment() {
        let url = Url::parse("https://example.com/search?q=test#results").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.path, "/search");
        assert_eq!(url.query, Some("q=test".to_string()));
        assert_eq!(url.fragment, Some("results".to_string()));
    }

    #[test]
    fn parse_bare_origin_gets_root_path() {
        let url = Url::parse("http://example.com").unwrap();
        assert_eq!(url.path, "/");
    }

    #[test]
    fn parse_empty_returns_none() {
        assert!(Url::parse("").is_none());
        assert!(Url::parse("no-scheme").is_none());
    }

    // -- Resolution --------------------------------------------------------

    #[test]
    fn resolve_absolute_path() {
        let base = Url::parse("http://example.com/docs/intro.html").unwrap();
        let resolved = base.resolve("/other/page.html").unwrap();
        assert_eq!(resolved.host, "example.com");
        assert_eq!(resolved.path, "/other/page.html");
    }

    #[test]
    fn resolve_relative_path() {
        let base = Url::parse("http://example.com/docs/intro.html").unwrap();
        let resolved = base.resolve("chapter2.html").unwrap();
        assert_eq!(resolved.path, "/docs/chapter2.html");
    }

    #[test]
    fn resolve_dotdot_in_relative_paths() {
        let base = Url::parse("http://example.com/a/b/c.html").unwrap();
        let resolved = base.resolve("../../d.html").unwrap();
        assert_eq!(resolved.path, "/d.html");
    }

    #[test]
    fn resolve_fragment_only() {
        let base = Url::parse("http://example.com/page.html").unwrap();
        let resolved = base.resolve("#section2").unwrap();
        assert_eq!(resolved.path, "/page.html");
        assert_eq!(resolved.fragment, Some("section2".to_string()));
    }

    #[test]
    fn resolve_query_only() {
        let base = Url::parse("http://example.com/search?old=1#s").unwrap();
        let resolved = base.resolve("?q=new").unwrap();
        assert_eq!(resolved.path, "/search");
        assert_eq!(resolved.query, Some("q=new".to_string()));
        assert_eq!(resolved.fragment, None);
    }

    #[test]
    fn resolve_absolute_url_ignores_base() {
        let base = Url::parse("http://example.com/page").unwrap();
        let resolved = base.resolve("https://other.net/x").unwrap();
        assert_eq!(resolved.origin(), "https://other.net");
    }

    #[test]
    fn resolve_protocol_relative() {
        let base = Url::parse("https://example.com/page.html").unwrap();
        let resolved = base.resolve("//cdn.example.com/style.css").unwrap();
        assert_eq!(resolved.scheme, "https");
        assert_eq!(resolved.host, "cdn.example.com");
    }

    #[test]
    fn resolve_mailto_is_none() {
        let base = Url::parse("http://example.com/").unwrap();
        assert!(base.resolve("mailto:ben@example.com").is_none());
        assert!(base.resolve("javascript:void(0)").is_none());
        assert!(base.resolve("tel:+123456").is_none());
    }

    #[test]
    fn resolve_empty_returns_self() {
        let base = Url::parse("http://example.com/page.html").unwrap();
        let resolved = base.resolve("").unwrap();
        assert_eq!(resolved, base);
    }

    // -- Accessors ---------------------------------------------------------

    #[test]
    fn url_origin() {
        let url = Url::parse("https://example.com:8443/path").unwrap();
        assert_eq!(url.origin(), "https://example.com:8443");
    }

    #[test]
    fn request_target_with_and_without_query() {
        let url = Url::parse("http://example.com/posts?page=2#top").unwrap();
        assert_eq!(url.request_target(), "/posts?page=2");

        let url = Url::parse("http://example.com/about").unwrap();
        assert_eq!(url.request_target(), "/about");
    }

    #[test]
    fn url_display_round_trip() {
        let url = Url::parse("https://example.com:443/path?q=1#frag").unwrap();
        assert_eq!(url.to_string(), "https://example.com:443/path?q=1#frag");
    }

    // -- FetchResponse -----------------------------------------------------

    #[test]
    fn response_success_range() {
        let mut resp = FetchResponse {
            url: "/".into(),
            status: 200,
            body: Vec::new(),
        };
        assert!(resp.is_success());
        resp.status = 204;
        assert!(resp.is_success());
        resp.status = 301;
        assert!(!resp.is_success());
        resp.status = 404;
        assert!(!resp.is_success());
        resp.status = 500;
        assert!(!resp.is_success());
    }

    #[test]
    fn response_text_is_lossy() {
        let resp = FetchResponse {
            url: "/".into(),
            status: 200,
            body: vec![b'h', b'i', 0xFF],
        };
        assert!(resp.text().starts_with("hi"));
    }

    #[test]
    fn split_target_parts() {
        assert_eq!(
            split_path_query_fragment("/a?x=1#top"),
            ("/a".into(), Some("x=1".into()), Some("top".into()))
        );
        assert_eq!(split_path_query_fragment("/a"), ("/a".into(), None, None));
    }
}
