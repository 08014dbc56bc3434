//! xctestrun parsing
//!
//! Detects the format revision of an `.xctestrun` property list, decodes the
//! test targets it describes and turns them into [`TestConfig`]s for a test
//! driver. Both XML and binary property lists are accepted.

pub mod builder;
pub mod bundle;
pub mod format;
pub mod scheme;
pub mod v1;
pub mod v2;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::common::{Error, Result};

pub use builder::{ResolutionPolicy, TestConfig};
pub use bundle::{load_inventory, resolve_bundle_id, InstalledApp};
pub use format::{format_version, FormatVersion};
pub use scheme::{EnvMap, SchemeData};

/// Read the raw bytes of an xctestrun file
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::unreadable(path, &e))
}

/// Read and decode an xctestrun file
pub fn parse_file(path: &Path) -> Result<Vec<SchemeData>> {
    decode(&read_file(path)?)
}

/// Read everything from `reader` and decode it
pub fn decode_reader<R: Read>(mut reader: R) -> Result<Vec<SchemeData>> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    decode(&content)
}

/// Decode a document of any supported format revision
pub fn decode(content: &[u8]) -> Result<Vec<SchemeData>> {
    decode_with(content, FormatVersion::ALL)
}

/// Decode a document, accepting only the listed format revisions
pub fn decode_with(content: &[u8], accepted: &[FormatVersion]) -> Result<Vec<SchemeData>> {
    let number = format_version(content)?;
    let version = FormatVersion::from_number(number)
        .filter(|version| accepted.contains(version))
        .ok_or_else(|| {
            let supported: Vec<i64> = accepted.iter().map(|v| v.number()).collect();
            Error::unsupported_version(number, &supported)
        })?;

    debug!(%version, "detected xctestrun format");

    let schemes = match version {
        FormatVersion::V1 => v1::decode(content)?,
        FormatVersion::V2 => v2::decode(content)?,
    };

    debug!(targets = schemes.len(), "decoded test targets");
    Ok(schemes)
}

/// Pick the test target named `name` (its `BlueprintName`)
pub fn select_target(schemes: Vec<SchemeData>, name: &str) -> Result<SchemeData> {
    let available: Vec<String> = schemes
        .iter()
        .map(|scheme| scheme.display_name().to_string())
        .collect();

    schemes
        .into_iter()
        .find(|scheme| scheme.blueprint_name.as_deref() == Some(name))
        .ok_or_else(|| Error::target_not_found(name, &available))
}

/// Final component of a `/`-separated path, ignoring trailing slashes
pub(crate) fn last_path_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
