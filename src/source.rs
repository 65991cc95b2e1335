//! Prioritized data-source chain
//!
//! The timeline document can arrive from three places, tried strictly in
//! sequence with the first success winning: an embedded payload handed over
//! by the host page, a primary HTTP fetch, and a legacy low-level retry of
//! the same resource (raw HTTP/1.0 over a TCP stream for `http://` URLs, a
//! direct filesystem read for plain paths). Each source is attempted exactly
//! once; there are no retries beyond the chain itself.

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::document::{parse_document, TimelineDocument};
use crate::error::{SourceError, TimelineError};

/// Fixed relative resource name for the external data file
pub const DATA_FILE: &str = "data.json";

/// Identifies which chain position a source occupies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Payload inlined in the host page
    Embedded,
    /// Primary HTTP fetch
    Fetch,
    /// Low-level fallback transport
    LegacyFetch,
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SourceKind::Embedded => write!(f, "embedded"),
            SourceKind::Fetch => write!(f, "fetch"),
            SourceKind::LegacyFetch => write!(f, "legacy fetch"),
        }
    }
}

/// One attemptable data source
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChapterSource {
    /// Raw JSON text read from the host page, parsed synchronously
    Embedded {
        /// Inline payload text
        raw: String,
    },
    /// HTTP GET of the resource URL via the standard client
    #[cfg(feature = "fetch")]
    Fetch {
        /// Absolute resource URL
        url: String,
    },
    /// Same resource through lower-level primitives: raw HTTP for `http://`
    /// URLs, a filesystem read for plain paths (the no-transport success
    /// path)
    LegacyFetch {
        /// Resource URL or filesystem path
        resource: String,
    },
}

impl ChapterSource {
    /// Which chain position this source occupies.
    pub fn kind(&self) -> SourceKind {
        match self {
            ChapterSource::Embedded { .. } => SourceKind::Embedded,
            #[cfg(feature = "fetch")]
            ChapterSource::Fetch { .. } => SourceKind::Fetch,
            ChapterSource::LegacyFetch { .. } => SourceKind::LegacyFetch,
        }
    }

    /// Attempt this source once, producing a parsed document or the reason
    /// it failed.
    pub async fn attempt(&self) -> Result<TimelineDocument, SourceError> {
        match self {
            ChapterSource::Embedded { raw } => parse_document(raw),
            #[cfg(feature = "fetch")]
            ChapterSource::Fetch { url } => fetch_document(url).await,
            ChapterSource::LegacyFetch { resource } => {
                if resource.contains("://") {
                    let body = legacy_http_get(resource)?;
                    parse_document(&body)
                } else {
                    let bytes = tokio::fs::read(resource)
                        .await
                        .map_err(|e| SourceError::Transport(e.to_string()))?;
                    let text = String::from_utf8(bytes)
                        .map_err(|_| SourceError::Parse("payload is not valid UTF-8".into()))?;
                    parse_document(&text)
                }
            }
        }
    }
}

/// Build the standard source chain for a resource.
///
/// The embedded payload (when the host page carries one) is tried first.
/// URLs get the primary fetch before the legacy retry; plain paths skip
/// straight to the legacy filesystem read, which needs no transport at all.
pub fn default_sources(embedded: Option<String>, resource: &str) -> Vec<ChapterSource> {
    let mut sources = Vec::new();
    if let Some(raw) = embedded {
        sources.push(ChapterSource::Embedded { raw });
    }
    #[cfg(feature = "fetch")]
    if resource.contains("://") {
        sources.push(ChapterSource::Fetch {
            url: resource.to_string(),
        });
    }
    sources.push(ChapterSource::LegacyFetch {
        resource: resource.to_string(),
    });
    sources
}

/// Run the source chain: try each source in order, first success wins.
///
/// An embedded parse failure is non-fatal and logged as a warning; so is any
/// transport failure along the chain. Only full exhaustion produces an
/// error.
pub async fn load_document(sources: &[ChapterSource]) -> Result<TimelineDocument, TimelineError> {
    for source in sources {
        match source.attempt().await {
            Ok(document) => {
                log::debug!("loaded timeline data from {} source", source.kind());
                return Ok(document);
            }
            Err(err) => {
                log::warn!("{} source failed: {}", source.kind(), err);
            }
        }
    }
    Err(TimelineError::NoData)
}

#[cfg(feature = "fetch")]
async fn fetch_document(url: &str) -> Result<TimelineDocument, SourceError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus(status.as_u16()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;
    parse_document(&body)
}

// Minimal HTTP/1.0 GET, accepting only status 200. Tolerates hosts where
// the standard client is unavailable or restricted.
fn legacy_http_get(url: &str) -> Result<String, SourceError> {
    let rest = url.strip_prefix("http://").ok_or_else(|| {
        SourceError::Transport(format!("legacy client supports only http URLs, got {}", url))
    })?;
    let (authority, path) = match rest.split_once('/') {
        Some((authority, path)) => (authority, format!("/{}", path)),
        None => (rest, String::from("/")),
    };
    let addr = if authority.contains(':') {
        authority.to_string()
    } else {
        format!("{}:80", authority)
    };

    let mut stream =
        TcpStream::connect(&addr).map_err(|e| SourceError::Transport(e.to_string()))?;
    let request = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, authority
    );
    stream
        .write_all(request.as_bytes())
        .map_err(|e| SourceError::Transport(e.to_string()))?;

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .map_err(|e| SourceError::Transport(e.to_string()))?;

    let status_line = response.lines().next().unwrap_or_default();
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| SourceError::Transport(format!("malformed response: {}", status_line)))?;
    if status != 200 {
        return Err(SourceError::HttpStatus(status));
    }

    match response.split_once("\r\n\r\n") {
        Some((_, body)) => Ok(body.to_string()),
        None => Err(SourceError::Transport("response carried no body".into())),
    }
}
