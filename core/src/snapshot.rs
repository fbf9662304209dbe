// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-state board documents for sharing a position
//!
//! A document carries the shown moves, the tiles they produced and the
//! exploratory branch. It is encoded with CBOR for the wire and JSON for
//! storage; the receiving side replaces its state with it wholesale.

use crate::board::Tile;
use crate::Move;
use serde::{Deserialize, Serialize};

/// Shared navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    pub moves: Vec<Move>,
    pub tiles: Vec<Tile>,
    pub branch: Vec<Move>,
}

impl BoardDocument {
    /// Blake3 hash of the CBOR encoding, or `None` when encoding failed
    pub fn digest(&self) -> Option<[u8; 32]> {
        digest_bytes(&encode_document(self))
    }
}

/// Empty output marks a failed encode and has no digest
fn digest_bytes(bytes: &[u8]) -> Option<[u8; 32]> {
    if bytes.is_empty() {
        return None;
    }
    Some(*blake3::hash(bytes).as_bytes())
}

/// Serialize a document to CBOR
pub fn encode_document(document: &BoardDocument) -> Vec<u8> {
    match serde_cbor::to_vec(document) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to serialize board document: {}", err);
            Vec::new()
        }
    }
}

/// Deserialize a document from CBOR
pub fn decode_document(data: &[u8]) -> Option<BoardDocument> {
    if data.is_empty() {
        return None;
    }

    match serde_cbor::from_slice(data) {
        Ok(document) => Some(document),
        Err(err) => {
            tracing::error!("Failed to deserialize board document: {}", err);
            None
        }
    }
}

pub fn to_json(document: &BoardDocument) -> serde_json::Result<String> {
    serde_json::to_string(document)
}

pub fn from_json(json: &str) -> serde_json::Result<BoardDocument> {
    serde_json::from_str(json)
}
