//! Format revision 1
//!
//! The scheme configuration sits under a top-level key named after the
//! scheme, so the key cannot be known up front. The document is first read
//! as a generic dictionary, then the first non-metadata dictionary entry is
//! decoded as a [`SchemeData`].

use std::io::Cursor;

use plist::{Dictionary, Value};
use tracing::debug;

use super::format::METADATA_KEY;
use super::SchemeData;
use crate::common::{Error, Result};

/// Decode a revision 1 document
///
/// Returns at most one scheme. A document without any scheme dictionary
/// decodes to an empty list.
pub fn decode(content: &[u8]) -> Result<Vec<SchemeData>> {
    let root = Value::from_reader(Cursor::new(content))
        .map_err(|e| Error::MalformedDocument(format!("failed to unmarshal plist: {e}")))?;
    let root = root
        .into_dictionary()
        .ok_or_else(|| Error::SchemaMismatch("document root is not a dictionary".to_string()))?;

    let mut schemes = root
        .iter()
        .filter(|(key, _)| key.as_str() != METADATA_KEY)
        .filter_map(|(key, value)| value.as_dictionary().map(|dict| (key, dict)));

    let Some((key, scheme)) = schemes.next() else {
        debug!("no scheme dictionary found");
        return Ok(Vec::new());
    };

    let ignored: Vec<&str> = schemes.map(|(key, _)| key.as_str()).collect();
    if !ignored.is_empty() {
        debug!(scheme = %key, ?ignored, "using first scheme, ignoring the rest");
    }

    Ok(vec![decode_scheme(key, scheme)?])
}

fn decode_scheme(key: &str, scheme: &Dictionary) -> Result<SchemeData> {
    let mut buf = Vec::new();
    Value::Dictionary(scheme.clone())
        .to_writer_binary(&mut buf)
        .map_err(|e| Error::SchemaMismatch(format!("failed to encode scheme {key}: {e}")))?;

    plist::from_bytes(&buf)
        .map_err(|e| Error::SchemaMismatch(format!("failed to decode scheme {key}: {e}")))
}
