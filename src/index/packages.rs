//! Debian `Packages` index parser
//!
//! A `Packages` file is a sequence of deb822 stanzas separated by blank lines:
//!
//! ```text
//! Package: libfoo
//! Version: 1.2.0-1
//! Description: example library
//!  with a continuation line
//!
//! Package: libbar
//! Version: 2:0.9
//! ```
//!
//! Only `Package` and `Version` are extracted; every other field is skipped.

use regex::Regex;

use crate::index::parser::{IndexParser, ParseError};
use crate::index::types::PackageVersionRecord;
use crate::version::debian::DebianVersion;

/// Parser for Debian binary package indices
pub struct PackagesParser {
    /// Regex for a field line: `Name: value`
    field_re: Regex,
}

impl PackagesParser {
    pub fn new() -> Self {
        Self {
            // Field names are printable ASCII without ':'
            field_re: Regex::new(r"^([!-9;-~]+):[ \t]*(.*?)[ \t]*$").unwrap(),
        }
    }
}

impl Default for PackagesParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields collected for the stanza currently being read
#[derive(Default)]
struct Stanza {
    start_line: Option<usize>,
    package: Option<String>,
    version: Option<(String, usize)>,
}

impl Stanza {
    fn finish(&mut self) -> Result<Option<PackageVersionRecord>, ParseError> {
        let stanza = std::mem::take(self);
        let Some(start_line) = stanza.start_line else {
            return Ok(None);
        };

        let package = stanza.package.ok_or(ParseError::MissingField {
            field: "Package",
            line: start_line,
        })?;
        let (version, line) = stanza.version.ok_or(ParseError::MissingField {
            field: "Version",
            line: start_line,
        })?;
        let version = DebianVersion::parse(&version)
            .map_err(|source| ParseError::InvalidVersion { line, source })?;

        Ok(Some(PackageVersionRecord::new(package, version)))
    }
}

impl IndexParser for PackagesParser {
    fn parse(&self, content: &str) -> Result<Vec<PackageVersionRecord>, ParseError> {
        let mut records = Vec::new();
        let mut stanza = Stanza::default();

        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;

            if line.trim().is_empty() {
                records.extend(stanza.finish()?);
                continue;
            }

            if line.starts_with('#') {
                continue;
            }

            if line.starts_with([' ', '\t']) {
                if stanza.start_line.is_none() {
                    return Err(ParseError::DanglingContinuation { line: line_num });
                }
                continue;
            }

            let Some(caps) = self.field_re.captures(line) else {
                return Err(ParseError::InvalidSyntax {
                    line: line_num,
                    content: line.to_string(),
                });
            };

            stanza.start_line.get_or_insert(line_num);
            let value = caps[2].to_string();
            match caps[1].to_ascii_lowercase().as_str() {
                "package" => stanza.package = Some(value),
                "version" => stanza.version = Some((value, line_num)),
                _ => {}
            }
        }

        records.extend(stanza.finish()?);

        Ok(records)
    }
}
