//! Format revision detection
//!
//! Reads only the `__xctestrun_metadata__` block; the rest of the document
//! is ignored at this stage.

use serde::Deserialize;
use std::fmt;

use crate::common::{Error, Result};

/// Top-level key holding the format metadata
pub const METADATA_KEY: &str = "__xctestrun_metadata__";

/// Supported xctestrun format revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Scheme configuration under a key named after the scheme
    V1,
    /// Test targets under `TestConfigurations[].TestTargets`
    V2,
}

impl FormatVersion {
    /// Every revision this crate can decode
    pub const ALL: &'static [FormatVersion] = &[FormatVersion::V1, FormatVersion::V2];

    /// Map a `FormatVersion` number to a known revision
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(FormatVersion::V1),
            2 => Some(FormatVersion::V2),
            _ => None,
        }
    }

    /// The number written in the document
    pub fn number(self) -> i64 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Deserialize, Default)]
struct Metadata {
    #[serde(rename = "FormatVersion", default)]
    format_version: i64,
}

#[derive(Deserialize)]
struct MetadataEnvelope {
    #[serde(rename = "__xctestrun_metadata__", default)]
    metadata: Metadata,
}

/// Read the raw `FormatVersion` number of a document
///
/// A document without metadata reports `0`.
pub fn format_version(content: &[u8]) -> Result<i64> {
    let envelope: MetadataEnvelope = plist::from_bytes(content)
        .map_err(|e| Error::MalformedDocument(format!("failed to parse format version: {e}")))?;
    Ok(envelope.metadata.format_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V2_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>SomethingElse</key>
    <array><string>ignored</string></array>
    <key>__xctestrun_metadata__</key>
    <dict>
        <key>FormatVersion</key>
        <integer>2</integer>
    </dict>
</dict>
</plist>"#;

    #[test]
    fn test_reads_version() {
        assert_eq!(format_version(V2_METADATA.as_bytes()).unwrap(), 2);
    }

    #[test]
    fn test_missing_metadata_is_zero() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>Foo</key><string>bar</string></dict></plist>"#;
        assert_eq!(format_version(doc.as_bytes()).unwrap(), 0);
    }

    #[test]
    fn test_binary_plist() {
        let xml = plist::Value::from_reader(std::io::Cursor::new(V2_METADATA.as_bytes())).unwrap();
        let mut binary = Vec::new();
        xml.to_writer_binary(&mut binary).unwrap();
        assert_eq!(format_version(&binary).unwrap(), 2);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = format_version(b"definitely not a plist").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_known_versions() {
        assert_eq!(FormatVersion::from_number(1), Some(FormatVersion::V1));
        assert_eq!(FormatVersion::from_number(2), Some(FormatVersion::V2));
        assert_eq!(FormatVersion::from_number(3), None);
        assert_eq!(FormatVersion::V2.to_string(), "2");
    }
}
