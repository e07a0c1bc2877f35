//! Archive member name repair
//!
//! Zip tools on legacy regional systems store member names in the local
//! codepage (GBK on Simplified Chinese Windows) without setting the UTF-8
//! flag. Readers then decode those bytes as CP437 and produce mojibake.
//! Re-decoding the raw bytes with the right codepage recovers the name.

use crate::ExtractionError;
use encoding_rs::Encoding;
use std::path::{Component, Path, PathBuf};

/// Picks the best display name for an archive member
///
/// # Arguments
///
/// * `raw` - The member name bytes as stored in the archive
/// * `decoded` - The name as decoded by the archive reader (UTF-8 when
///   flagged, CP437 otherwise)
/// * `encoding` - The legacy codepage to try
///
/// # Returns
///
/// `decoded` when the archive already stored a UTF-8 (or plain ASCII) name,
/// else `raw` decoded with `encoding`, else `decoded` if that fails.
pub fn decode_member_name(raw: &[u8], decoded: &str, encoding: &'static Encoding) -> String {
    if std::str::from_utf8(raw).map_or(false, |utf8| utf8 == decoded) {
        return decoded.to_string();
    }

    match encoding.decode_without_bom_handling_and_without_replacement(raw) {
        Some(repaired) => repaired.into_owned(),
        None => decoded.to_string(),
    }
}

/// Turns a member name into a relative path that stays inside the
/// extraction directory
///
/// Absolute names and names with `..` components are rejected.
pub fn member_path(name: &str) -> Result<PathBuf, ExtractionError> {
    let mut path = PathBuf::new();

    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ExtractionError::UnsafePath {
                    name: name.to_string(),
                })
            }
        }
    }

    if path.as_os_str().is_empty() {
        return Err(ExtractionError::UnsafePath {
            name: name.to_string(),
        });
    }

    Ok(path)
}
