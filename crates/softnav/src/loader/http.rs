//! Minimal blocking HTTP/1.1 GET client.
//!
//! Implements [`PageFetcher`] over `std::net::TcpStream` for one fixed
//! origin. Plain HTTP only: an `https` origin is rejected at
//! construction, and a redirect onto a scheme or origin this client
//! cannot reach is an error (which the navigator turns into fallback
//! navigation).

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use softnav_types::{NavError, Result};

use super::{FetchResponse, PageFetcher, Url};

/// Maximum response body size (8 MB).
const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: u8 = 5;

/// TCP connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP read timeout.
const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// A [`PageFetcher`] bound to a single HTTP origin.
#[derive(Debug)]
pub struct HttpFetcher {
    origin: Url,
}

impl HttpFetcher {
    /// Create a fetcher for `origin` (e.g. `"http://localhost:8000"`).
    pub fn new(origin: &str) -> Result<Self> {
        let origin =
            Url::parse(origin).ok_or_else(|| NavError::Parse(format!("invalid origin: {origin}")))?;
        if origin.scheme != "http" {
            return Err(NavError::Fetch(format!(
                "unsupported scheme for HTTP client: {}",
                origin.scheme,
            )));
        }
        Ok(Self { origin })
    }

    /// The origin this fetcher is bound to.
    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

impl PageFetcher for HttpFetcher {
    /// Perform a GET request for `target` (path + optional query).
    ///
    /// Follows same-origin redirects (301/302/307/308) up to
    /// [`MAX_REDIRECTS`] hops.
    fn fetch(&self, target: &str) -> Result<FetchResponse> {
        let mut current = self
            .origin
            .resolve(target)
            .ok_or_else(|| NavError::Parse(format!("invalid fetch target: {target}")))?;

        for _ in 0..MAX_REDIRECTS {
            if current.origin() != self.origin.origin() {
                return Err(NavError::Fetch(format!(
                    "redirect left the page origin: {current}",
                )));
            }

            let resp = do_request(&current)?;

            if is_redirect(resp.status_code)
                && let Some(location) = find_header(&resp.headers, "location")
            {
                let location = location.to_string();
                current = current.resolve(&location).ok_or_else(|| {
                    NavError::Parse(format!("bad redirect Location: {location}"))
                })?;
                continue;
            }

            return Ok(FetchResponse {
                url: current.to_string(),
                status: resp.status_code,
                body: resp.body,
            });
        }

        Err(NavError::Fetch("too many redirects".to_string()))
    }
}

// -------------------------------------------------------------------
// Internal types
// -------------------------------------------------------------------

/// A raw parsed HTTP response.
#[derive(Debug)]
struct HttpResponse {
    /// HTTP status code (e.g. 200, 404).
    status_code: u16,
    /// Response headers as (name, value) pairs.
    headers: Vec<(String, String)>,
    /// Response body bytes.
    body: Vec<u8>,
}

// -------------------------------------------------------------------
// Internals
// -------------------------------------------------------------------

/// Connect, send GET, read and parse.
fn do_request(url: &Url) -> Result<HttpResponse> {
    let port = url.port.unwrap_or(80);
    let mut stream = tcp_connect(&url.host, port)?;
    send_request(&mut stream, url)?;
    let raw = read_response(&mut stream)?;
    parse_response(&raw)
}

/// Open a TCP connection with a connect timeout.
fn tcp_connect(host: &str, port: u16) -> Result<TcpStream> {
    use std::net::ToSocketAddrs;

    let addr = format!("{host}:{port}")
        .to_socket_addrs()
        .map_err(|e| NavError::Fetch(format!("DNS resolution failed: {e}")))?
        .next()
        .ok_or_else(|| NavError::Fetch(format!("no addresses for {host}:{port}")))?;

    let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .map_err(|e| NavError::Fetch(format!("TCP connect failed: {e}")))?;

    stream
        .set_read_timeout(Some(READ_TIMEOUT))
        .map_err(|e| NavError::Fetch(format!("set read timeout: {e}")))?;

    Ok(stream)
}

/// Send an HTTP/1.1 GET request.
fn send_request(stream: &mut impl Write, url: &Url) -> Result<()> {
    let host_header = match url.port {
        Some(p) if p != 80 => format!("{}:{}", url.host, p),
        _ => url.host.clone(),
    };

    let request = format!(
        "GET {target} HTTP/1.1\r\n\
         Host: {host_header}\r\n\
         User-Agent: softnav/0.1\r\n\
         Accept: text/html,*/*\r\n\
         Connection: close\r\n\
         \r\n",
        target = url.request_target(),
    );

    stream
        .write_all(request.as_bytes())
        .map_err(|e| NavError::Fetch(format!("send request: {e}")))?;

    Ok(())
}

/// Read the entire response until EOF or until the read timeout fires.
fn read_response(stream: &mut impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(8192);
    let mut chunk = [0u8; 8192];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                if buf.len() + n > MAX_BODY_SIZE + 4096 {
                    return Err(NavError::Fetch("response too large".to_string()));
                }
                buf.extend_from_slice(&chunk[..n]);
            },
            Err(e)
                if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut =>
            {
                break;
            },
            Err(e) => {
                return Err(NavError::Fetch(format!("read response: {e}")));
            },
        }
    }
    Ok(buf)
}

/// Parse raw bytes into status code, headers, and body.
fn parse_response(data: &[u8]) -> Result<HttpResponse> {
    // Find the header/body boundary (\r\n\r\n).
    let header_end = find_subsequence(data, b"\r\n\r\n").ok_or_else(|| {
        NavError::Fetch("malformed HTTP response: no header terminator".to_string())
    })?;

    let header_bytes = &data[..header_end];
    let body_start = header_end + 4;

    let header_str = std::str::from_utf8(header_bytes)
        .map_err(|_| NavError::Fetch("non-UTF-8 headers".to_string()))?;

    let mut lines = header_str.split("\r\n");

    // Status line: "HTTP/1.x STATUS REASON"
    let status_line = lines
        .next()
        .ok_or_else(|| NavError::Fetch("empty response".to_string()))?;
    let status_code = parse_status_line(status_line)?;

    // Parse headers.
    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_lowercase(), value.trim().to_string()));
        }
    }

    // Decode body.
    let raw_body = &data[body_start..];
    let body = if find_header(&headers, "transfer-encoding").is_some_and(|v| v.contains("chunked"))
    {
        decode_chunked(raw_body)?
    } else if let Some(cl) = find_header(&headers, "content-length") {
        let len: usize = cl
            .parse()
            .map_err(|_| NavError::Fetch("bad Content-Length".to_string()))?;
        if len > MAX_BODY_SIZE {
            return Err(NavError::Fetch(
                "response body exceeds 8 MB limit".to_string(),
            ));
        }
        raw_body[..raw_body.len().min(len)].to_vec()
    } else {
        raw_body.to_vec()
    };

    if body.len() > MAX_BODY_SIZE {
        return Err(NavError::Fetch(
            "response body exceeds 8 MB limit".to_string(),
        ));
    }

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

/// Parse the HTTP status code from the status line.
fn parse_status_line(line: &str) -> Result<u16> {
    // Expected: "HTTP/1.x NNN ..."
    let parts: Vec<&str> = line.splitn(3, ' ').collect();
    if parts.len() < 2 {
        return Err(NavError::Fetch(format!("bad status line: {line}")));
    }
    parts[1]
        .parse()
        .map_err(|_| NavError::Fetch(format!("bad status code in: {line}")))
}

/// Case-insensitive header lookup.
fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    let name_lower = name.to_lowercase();
    headers
        .iter()
        .find(|(k, _)| k == &name_lower)
        .map(|(_, v)| v.as_str())
}

/// Decode a chunked transfer-encoded body.
fn decode_chunked(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let mut pos = 0;

    while let Some(i) = find_subsequence(&data[pos..], b"\r\n") {
        let line_end = pos + i;

        let size_str = std::str::from_utf8(&data[pos..line_end])
            .map_err(|_| NavError::Fetch("bad chunk size".to_string()))?
            .trim();

        // Strip optional chunk extensions (after `;`).
        let size_str = size_str.split(';').next().unwrap_or("").trim();

        let chunk_size = usize::from_str_radix(size_str, 16)
            .map_err(|_| NavError::Fetch("bad chunk size".to_string()))?;

        if chunk_size == 0 {
            break;
        }

        let chunk_start = line_end + 2;
        let chunk_end = chunk_start + chunk_size;

        if chunk_end > data.len() {
            // Partial chunk -- take what we have.
            result.extend_from_slice(&data[chunk_start..]);
            break;
        }

        if result.len() + chunk_size > MAX_BODY_SIZE {
            return Err(NavError::Fetch(
                "chunked body exceeds 8 MB limit".to_string(),
            ));
        }

        result.extend_from_slice(&data[chunk_start..chunk_end]);
        // Skip past chunk data and trailing \r\n.
        pos = chunk_end + 2;
    }

    Ok(result)
}

/// Whether a status code is a redirect we should follow.
fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 307 | 308)
}

/// Find the position of a byte subsequence in a slice.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
