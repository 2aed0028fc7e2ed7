//! Builds the exact byte string that gets signed: the ASCII concatenation
//! of the base64url-encoded protected header, a `.`, and the base64url-
//! encoded payload — RFC 7515 §5.1, steps 7-8.
//!
//! The protected-header half must be the *exact* text that was (or will
//! be) transmitted, never a re-serialization of the parsed header: JSON
//! allows multiple valid encodings of the same value, and RFC 7515 signs
//! bytes, not structure.

use crate::pool::BufferPool;
use std::ops::Deref;

/// A signing input held in a buffer borrowed from a [`BufferPool`].
///
/// Dereferences to `&[u8]`; returns its buffer to the pool on drop.
pub struct SigningInput<'pool> {
    pool: &'pool BufferPool,
    bytes: Vec<u8>,
}

impl<'pool> SigningInput<'pool> {
    /// Builds `raw_protected_b64 || "." || payload_b64` using a buffer
    /// checked out of `pool`.
    pub fn build(pool: &'pool BufferPool, raw_protected_b64: &str, payload_b64: &str) -> Self {
        let mut bytes = pool.get();
        bytes.reserve(raw_protected_b64.len() + 1 + payload_b64.len());
        bytes.extend_from_slice(raw_protected_b64.as_bytes());
        bytes.push(b'.');
        bytes.extend_from_slice(payload_b64.as_bytes());
        Self { pool, bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for SigningInput<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SigningInput<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.bytes));
    }
}

/// Builds the signing input without a pool, for callers that don't need one
/// (e.g. a single one-off signature).
pub fn build_signing_input(raw_protected_b64: &str, payload_b64: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(raw_protected_b64.len() + 1 + payload_b64.len());
    bytes.extend_from_slice(raw_protected_b64.as_bytes());
    bytes.push(b'.');
    bytes.extend_from_slice(payload_b64.as_bytes());
    bytes
}
