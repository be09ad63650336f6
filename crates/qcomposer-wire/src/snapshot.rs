//! Shareable snapshot tokens.
//!
//! A token is the circuit's JSON document, zlib-compressed, then encoded as
//! URL-safe base64 without padding, so it can sit in a query parameter as-is:
//!
//! ```text
//! {qubitCount, qubitNames, gates, momentCount} ─json─▶ zlib ─▶ base64url
//! ```
//!
//! Decoding checks every circuit invariant; a token that parses but
//! describes an inconsistent circuit is rejected like a corrupt one.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qcomposer_ir::{CircuitState, Gate};

use crate::error::{SnapshotError, SnapshotResult};

/// Upper bound on the decompressed document size.
pub const MAX_DOCUMENT_BYTES: u64 = 1 << 20;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    qubit_count: usize,
    qubit_names: &'a [String],
    gates: &'a [Gate],
    moment_count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    qubit_count: usize,
    qubit_names: Vec<String>,
    gates: Vec<Gate>,
    moment_count: usize,
}

/// Encode `state` as a URL-safe token.
pub fn encode(state: &CircuitState) -> SnapshotResult<String> {
    let document = SnapshotRef {
        qubit_count: state.qubit_count(),
        qubit_names: state.qubit_names(),
        gates: state.gates(),
        moment_count: state.moment_count(),
    };
    let json = serde_json::to_vec(&document)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    let token = URL_SAFE_NO_PAD.encode(compressed);
    debug!(json_bytes = json.len(), token_len = token.len(), "encoded snapshot");
    Ok(token)
}

/// Decode a token produced by [`encode`].
pub fn decode(token: &str) -> SnapshotResult<CircuitState> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SnapshotError::Empty);
    }

    let compressed = URL_SAFE_NO_PAD.decode(token)?;
    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .take(MAX_DOCUMENT_BYTES + 1)
        .read_to_end(&mut json)?;
    if json.len() as u64 > MAX_DOCUMENT_BYTES {
        return Err(SnapshotError::TooLarge {
            limit: MAX_DOCUMENT_BYTES,
        });
    }

    let document: SnapshotDocument = serde_json::from_slice(&json)?;
    let state = CircuitState::from_parts(
        document.qubit_count,
        document.qubit_names,
        document.moment_count,
        document.gates,
    )?;
    Ok(state)
}
