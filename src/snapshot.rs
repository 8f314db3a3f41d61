//! Binary snapshot channel
//!
//! A snapshot stores a whole list in one file:
//!
//! ```text
//! [8-byte magic "ROSTERDB"][u32 LE version][u32 LE payload length][payload]
//! ```
//!
//! The payload is the list encoded as a sequence with `bincode` (serde,
//! standard config). Only round-trip fidelity between builds that share
//! [`SNAPSHOT_VERSION`] is promised; older or newer versions are rejected.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};
use crate::list::List;

/// Magic number for snapshot files
pub const SNAPSHOT_MAGIC: [u8; 8] = *b"ROSTERDB";

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Size of the snapshot header
const HEADER_SIZE: usize = 16;

/// Encode a list into snapshot bytes
pub fn encode<T: Serialize>(list: &List<T>) -> CodecResult<Vec<u8>> {
    let payload = bincode::serde::encode_to_vec(list, bincode::config::standard())
        .map_err(|e| CodecError::Serialize(e.to_string()))?;
    let len = u32::try_from(payload.len())
        .map_err(|_| CodecError::Serialize(format!("payload of {} bytes is too large", payload.len())))?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&SNAPSHOT_MAGIC);
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&len.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode snapshot bytes back into a list
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<List<T>> {
    if bytes.len() < HEADER_SIZE {
        return Err(CodecError::InvalidFormat("file too small for header".into()));
    }
    let (header, payload) = bytes.split_at(HEADER_SIZE);

    if header[..8] != SNAPSHOT_MAGIC {
        return Err(CodecError::InvalidFormat("bad magic number".into()));
    }

    let version = read_u32(&header[8..12]);
    if version != SNAPSHOT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let expected = read_u32(&header[12..16]) as usize;
    if payload.len() < expected {
        return Err(CodecError::Truncated {
            expected,
            found: payload.len(),
        });
    }
    if payload.len() > expected {
        return Err(CodecError::InvalidFormat(format!(
            "{} bytes after the declared payload",
            payload.len() - expected
        )));
    }

    let (list, consumed) = bincode::serde::decode_from_slice(payload, bincode::config::standard())
        .map_err(|e| CodecError::Deserialize(e.to_string()))?;
    if consumed != expected {
        return Err(CodecError::InvalidFormat(format!(
            "payload decoded from {} of {} bytes",
            consumed, expected
        )));
    }
    Ok(list)
}

/// Write a snapshot of `list` to `path`, replacing the file
pub fn write<T: Serialize>(list: &List<T>, path: &Path) -> CodecResult<()> {
    let bytes = encode(list)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;
    file.flush()?;
    log::info!("Saved snapshot of {} records to {}", list.len(), path.display());
    Ok(())
}

/// Read a snapshot from `path`
pub fn read<T: DeserializeOwned>(path: &Path) -> CodecResult<List<T>> {
    let bytes = std::fs::read(path)?;
    let list = decode(&bytes)?;
    log::info!("Loaded snapshot of {} records from {}", list.len(), path.display());
    Ok(list)
}

/// Read a snapshot, falling back to an empty list on any failure
///
/// The failure is logged, not returned.
pub fn load_or_empty<T: DeserializeOwned>(path: &Path) -> List<T> {
    match read(path) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Could not load snapshot {}: {}", path.display(), err);
            List::new()
        }
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}
