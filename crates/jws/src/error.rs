//! Error kinds surfaced by the crate.
//!
//! Every public operation returns [`JwsError`]; there is no silent recovery
//! anywhere in the crate.

/// Everything that can go wrong while parsing, signing or verifying a JWS.
#[derive(Debug, thiserror::Error)]
pub enum JwsError {
    /// Wrong number of `.` separators, a non-base64url character in a
    /// segment, or an empty top-level input in compact serialization.
    #[error("malformed compact serialization: {0}")]
    MalformedCompact(String),

    /// JSON syntax error, both flattened- and general-form signature shapes
    /// present at once, or a missing `payload` field.
    #[error("malformed JSON serialization: {0}")]
    MalformedJson(String),

    /// A reserved header field has the wrong JSON type, `alg` is absent from
    /// a protected header that requires it, or `crit` names a reserved
    /// field (or a field absent from the header it appears in).
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The `payload` field was present but decoded to zero bytes.
    #[error("payload is empty")]
    EmptyPayload,

    /// The `alg` token is not one this registry can dispatch.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The key variant supplied is not compatible with the algorithm.
    #[error("key type does not match algorithm")]
    KeyMismatch,

    /// Cryptographic verification failed for every attempted (signature,
    /// key) pair. Deliberately uninformative about *why* (wrong key vs.
    /// tampered signature) so as not to leak which key in a set matched.
    #[error("signature verification failed")]
    BadSignature,

    /// `VerifyWithKeySet` exhausted every candidate without success.
    #[error("no matching key found")]
    NoMatchingKey,

    /// Asked to serialize a [`crate::message::Message`] as compact form
    /// when it has more than one signature, or a non-empty public header.
    /// An implementation necessity of the Rust API surface; see `DESIGN.md`.
    #[error("message cannot be represented in compact serialization: {0}")]
    IncompatibleSerialization(String),

    /// I/O failure while streaming a compact-serialization reader.
    #[error("i/o error reading serialization: {0}")]
    Io(#[from] std::io::Error),
}
