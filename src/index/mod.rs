//! Repository index layer
//! - source.rs: IndexSource trait for fetching raw indices
//! - http.rs: reqwest-backed IndexSource
//! - decoder.rs: content-type / suffix based decompression
//! - parser.rs: IndexParser trait definition
//! - packages.rs: Debian `Packages` parser
//! - types.rs: PackageVersionRecord

pub mod decoder;
pub mod error;
pub mod http;
pub mod packages;
pub mod parser;
pub mod source;
pub mod types;

pub use decoder::{Compression, decode_index, select_compression};
pub use error::{DecodeError, FetchError, IndexParseError};
pub use http::HttpIndexSource;
pub use packages::PackagesParser;
pub use parser::{IndexParser, ParseError};
pub use source::{FetchedIndex, IndexSource};
pub use types::PackageVersionRecord;
