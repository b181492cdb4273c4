//! Content-negotiated decoding of fetched indices
//!
//! Repository servers are not reliable about content types, so the decision is:
//! - `gzip`, `application/x-gzip`, `application/gzip`: gunzip
//! - `application/octet-stream`: gunzip only if the URL path ends in `.gz`
//! - anything else (including no header): plain text

use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::index::error::{DecodeError, IndexParseError};
use crate::index::parser::IndexParser;
use crate::index::source::FetchedIndex;
use crate::index::types::PackageVersionRecord;

/// How the body of a fetched index is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Plain,
}

/// Pick the decoding strategy from the advertised content type and the URL
pub fn select_compression(content_type: Option<&str>, url: &str) -> Compression {
    let media_type = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase());

    match media_type.as_deref() {
        Some("gzip" | "application/x-gzip" | "application/gzip") => Compression::Gzip,
        Some("application/octet-stream") if url_path(url).ends_with(".gz") => Compression::Gzip,
        _ => Compression::Plain,
    }
}

/// URL without query string or fragment
fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Decompress (if needed) and parse a fetched index into records
pub fn decode_index(
    fetched: &FetchedIndex,
    parser: &dyn IndexParser,
) -> Result<Vec<PackageVersionRecord>, IndexParseError> {
    let compression = select_compression(fetched.content_type.as_deref(), &fetched.url);

    decode_body(&fetched.body, compression, parser).map_err(|source| IndexParseError {
        url: fetched.url.clone(),
        source,
    })
}

fn decode_body(
    body: &[u8],
    compression: Compression,
    parser: &dyn IndexParser,
) -> Result<Vec<PackageVersionRecord>, DecodeError> {
    let content = match compression {
        Compression::Gzip => {
            let mut content = String::new();
            MultiGzDecoder::new(body)
                .read_to_string(&mut content)
                .map_err(DecodeError::Gzip)?;
            content
        }
        Compression::Plain => std::str::from_utf8(body)?.to_string(),
    };

    Ok(parser.parse(&content)?)
}
