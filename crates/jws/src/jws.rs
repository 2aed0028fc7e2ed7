//! The top-level, serialization-agnostic API: sign, verify, and parse.

use crate::error::JwsError;
use crate::header::{Algorithm, Header};
use crate::key::{Key, KeySet};
use crate::message::{Message, SignatureEntry};
use crate::pool::BufferPool;
use crate::signing_input::SigningInput;
use crate::{alg, repr, serialize};
use std::sync::OnceLock;

fn pool() -> &'static BufferPool {
    static POOL: OnceLock<BufferPool> = OnceLock::new();
    POOL.get_or_init(BufferPool::new)
}

/// Signs `payload` with `key`, constructing the protected header from
/// `header` (whose `alg` must already be set to match `key`).
pub fn sign(header: &Header, payload: &[u8], key: &Key) -> Result<Message, JwsError> {
    let algorithm = header
        .algorithm
        .clone()
        .ok_or_else(|| JwsError::MalformedHeader("protected header is missing alg".to_string()))?;

    let raw_protected = repr::encode_value(header)?;
    let payload_b64 = repr::encode_bytes(payload);
    let signing_input = SigningInput::build(pool(), &raw_protected, &payload_b64);
    let signature = alg::sign(&algorithm, key, &signing_input)?;

    let mut message = Message::new(payload.to_vec());
    message.append_signature(SignatureEntry {
        protected: Some(header.clone()),
        raw_protected: Some(raw_protected),
        header: None,
        signature,
    });
    Ok(message)
}

/// Signs `payload` with `key` under `algorithm`, merging `algorithm` into
/// `extra_headers` to build the protected header (`alg` always wins, even if
/// `extra_headers` happened to set one).
///
/// This is the `WithHeaders(h)` option from the top-level `Sign` API: the
/// common [`sign`] entry point requires the caller to build the whole
/// [`Header`] (including `alg`) themselves, which is awkward when all a
/// caller wants is to add a `kid` or other extension field alongside the
/// algorithm dispatch already known from `algorithm`/`key`.
pub fn sign_with_headers(
    algorithm: Algorithm,
    extra_headers: &Header,
    payload: &[u8],
    key: &Key,
) -> Result<Message, JwsError> {
    let header = extra_headers.merge(&Header::new(algorithm));
    sign(&header, payload, key)
}

/// Signs using protected-header bytes supplied verbatim by the caller,
/// bypassing [`Header`] construction entirely. The bytes are used exactly
/// as given — base64url-encoded once, never re-serialized — so a caller
/// that needs byte-exact control over the protected header's JSON encoding
/// (for interop with a producer that doesn't follow this crate's own
/// serialization) can get it.
pub fn sign_literal(
    raw_protected_json: &[u8],
    payload: &[u8],
    algorithm: &Algorithm,
    key: &Key,
) -> Result<Message, JwsError> {
    let protected: Header = serde_json::from_slice(raw_protected_json)
        .map_err(|e| JwsError::MalformedHeader(e.to_string()))?;
    if protected.algorithm.as_ref() != Some(algorithm) {
        return Err(JwsError::MalformedHeader(
            "protected header's alg does not match the supplied algorithm".to_string(),
        ));
    }

    let raw_protected = repr::encode_bytes(raw_protected_json);
    let payload_b64 = repr::encode_bytes(payload);
    let signing_input = SigningInput::build(pool(), &raw_protected, &payload_b64);
    let signature = alg::sign(algorithm, key, &signing_input)?;

    let mut message = Message::new(payload.to_vec());
    message.append_signature(SignatureEntry {
        protected: Some(protected),
        raw_protected: Some(raw_protected),
        header: None,
        signature,
    });
    Ok(message)
}

/// Produces one [`Message`] signed by every `(header, key)` pair, for
/// general-JSON serialization with multiple signatures over the same
/// payload.
pub fn sign_multi(payload: &[u8], signers: &[(Header, Key)]) -> Result<Message, JwsError> {
    let mut message = Message::new(payload.to_vec());
    for (header, key) in signers {
        let algorithm = header.algorithm.clone().ok_or_else(|| {
            JwsError::MalformedHeader("protected header is missing alg".to_string())
        })?;
        let raw_protected = repr::encode_value(header)?;
        let payload_b64 = repr::encode_bytes(payload);
        let signing_input = SigningInput::build(pool(), &raw_protected, &payload_b64);
        let signature = alg::sign(&algorithm, key, &signing_input)?;
        message.append_signature(SignatureEntry {
            protected: Some(header.clone()),
            raw_protected: Some(raw_protected),
            header: None,
            signature,
        });
    }
    Ok(message)
}

/// Parses `input`, detecting compact vs. JSON serialization from whether
/// it starts with `{`.
pub fn parse(input: &str) -> Result<Message, JwsError> {
    if input.trim_start().starts_with('{') {
        serialize::parse_json(input)
    } else {
        serialize::parse_compact(input)
    }
}

fn verify_entry(entry: &SignatureEntry, payload: &[u8], key: &Key) -> Result<(), JwsError> {
    let protected = entry.protected.as_ref().ok_or_else(|| {
        JwsError::MalformedHeader("signature has no protected header".to_string())
    })?;
    let algorithm = protected
        .algorithm
        .clone()
        .ok_or_else(|| JwsError::MalformedHeader("alg missing from protected header".to_string()))?;

    let public = entry.header.clone().unwrap_or_default();
    protected.validate_critical(&public)?;
    if entry.header.is_some() {
        public.validate_critical(protected)?;
    }

    let raw_protected = entry.raw_protected.as_deref().ok_or_else(|| {
        JwsError::MalformedHeader("missing raw protected header bytes".to_string())
    })?;
    let payload_b64 = repr::encode_bytes(payload);
    let signing_input = SigningInput::build(pool(), raw_protected, &payload_b64);
    alg::verify(&algorithm, key, &signing_input, &entry.signature)
}

/// Parses `input` and verifies it against `key`, trying every signature
/// present until one succeeds. Returns the payload on success.
///
/// The algorithm is taken from each signature's own protected header, as
/// RFC 7515 §8.5's unsecured `none` algorithm must be explicitly requested
/// by the caller; signatures whose protected `alg` is `none` are never
/// attempted here. Use [`verify`] with `algorithm = &Algorithm::None` to
/// accept an unsecured JWS.
pub fn verify_with_key(input: &str, key: &Key) -> Result<Vec<u8>, JwsError> {
    let message = parse(input)?;
    verify_message(&message, key)
}

/// As [`verify_with_key`], but against an already-parsed [`Message`].
pub fn verify_message(message: &Message, key: &Key) -> Result<Vec<u8>, JwsError> {
    if message.payload.is_empty() {
        return Err(JwsError::EmptyPayload);
    }
    for entry in &message.signatures {
        if entry.algorithm() == Some(&Algorithm::None) {
            continue;
        }
        if verify_entry(entry, &message.payload, key).is_ok() {
            return Ok(message.payload.clone());
        }
    }
    Err(JwsError::BadSignature)
}

/// Parses `input`, then attempts verification against `key` only for
/// signatures whose protected `alg` equals `algorithm`. Returns the
/// payload from the first one that verifies.
///
/// Passing `algorithm = &Algorithm::None` is this crate's explicit opt-in
/// to accept an unsecured JWS (RFC 7515 §8.5) — the caller has to name
/// `none` deliberately, it is never matched implicitly the way a real
/// algorithm is by [`verify_with_key`].
///
/// Fails with [`JwsError::NoMatchingKey`] if no signature's protected `alg`
/// equals `algorithm`, or [`JwsError::BadSignature`] if at least one did
/// but none verified.
pub fn verify(input: &str, algorithm: &Algorithm, key: &Key) -> Result<Vec<u8>, JwsError> {
    let message = parse(input)?;
    if message.payload.is_empty() {
        return Err(JwsError::EmptyPayload);
    }
    let mut matched_any = false;
    for entry in &message.signatures {
        if entry.algorithm() != Some(algorithm) {
            continue;
        }
        matched_any = true;
        if verify_entry(entry, &message.payload, key).is_ok() {
            return Ok(message.payload.clone());
        }
    }
    if !matched_any {
        return Err(JwsError::NoMatchingKey);
    }
    Err(JwsError::BadSignature)
}

/// Options controlling [`verify_with_key_set`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyWithKeySetOptions {
    /// When set, signatures with no `kid` in either header are skipped
    /// entirely rather than being tried against every key in the set.
    pub require_kid: bool,
}

/// Parses `input` and verifies it against whichever key in `keys` matches:
/// a signature naming a `kid` is only tried against keys sharing that
/// `kid`; a signature with no `kid` is tried against every key in the set,
/// unless `options.require_kid` is set, in which case it is skipped.
/// Returns the payload from the first signature/key pair that verifies.
///
/// As with [`verify_with_key`], a signature whose protected `alg` is
/// `none` is never attempted — unsecured JWS has no place in key-set-based
/// verification, where the whole point is picking a key to trust.
pub fn verify_with_key_set(input: &str, keys: &KeySet) -> Result<Vec<u8>, JwsError> {
    verify_with_key_set_opts(input, keys, VerifyWithKeySetOptions::default())
}

/// As [`verify_with_key_set`], with explicit [`VerifyWithKeySetOptions`].
pub fn verify_with_key_set_opts(
    input: &str,
    keys: &KeySet,
    options: VerifyWithKeySetOptions,
) -> Result<Vec<u8>, JwsError> {
    let message = parse(input)?;
    if message.payload.is_empty() {
        return Err(JwsError::EmptyPayload);
    }
    for entry in &message.signatures {
        if entry.algorithm() == Some(&Algorithm::None) {
            continue;
        }
        let candidates: Vec<&Key> = match entry.key_id() {
            Some(kid) => keys.by_key_id(kid).collect(),
            None if options.require_kid => Vec::new(),
            None => keys.all().collect(),
        };
        for key in candidates {
            if verify_entry(entry, &message.payload, key).is_ok() {
                return Ok(message.payload.clone());
            }
        }
    }
    Err(JwsError::NoMatchingKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyEntry;

    #[test]
    fn sign_then_verify_round_trips() {
        let key = Key::Symmetric(b"your-256-bit-secret".to_vec());
        let header = Header::new(Algorithm::Hs256);
        let message = sign(&header, b"hello world", &key).unwrap();
        let compact = serialize::to_compact(&message).unwrap();

        let payload = verify_with_key(&compact, &key).unwrap();
        assert_eq!(payload, b"hello world");

        let payload = verify(&compact, &Algorithm::Hs256, &key).unwrap();
        assert_eq!(payload, b"hello world");
    }

    #[test]
    fn wrong_key_fails_verification() {
        let key = Key::Symmetric(b"your-256-bit-secret".to_vec());
        let wrong_key = Key::Symmetric(b"a-different-secret-key".to_vec());
        let header = Header::new(Algorithm::Hs256);
        let message = sign(&header, b"hello world", &key).unwrap();
        let compact = serialize::to_compact(&message).unwrap();

        assert!(verify_with_key(&compact, &wrong_key).is_err());
    }

    #[test]
    fn verify_with_algorithm_rejects_non_matching_alg() {
        let key = Key::Symmetric(b"your-256-bit-secret".to_vec());
        let header = Header::new(Algorithm::Hs256);
        let message = sign(&header, b"hello world", &key).unwrap();
        let compact = serialize::to_compact(&message).unwrap();

        assert!(matches!(
            verify(&compact, &Algorithm::Hs384, &key),
            Err(JwsError::NoMatchingKey)
        ));
    }

    #[test]
    fn unsecured_jws_rejected_unless_none_explicitly_requested() {
        let token = "eyJhbGciOiJub25lIn0.eyJpc3MiOiJqb2UifQ.";
        let key = Key::Symmetric(b"whatever-key-is-supplied".to_vec());

        // Neither generic entry point implicitly accepts `none`...
        assert!(verify_with_key(token, &key).is_err());
        assert!(verify(token, &Algorithm::Hs256, &key).is_err());

        // ...but explicitly requesting `none` does.
        let payload = verify(token, &Algorithm::None, &key).unwrap();
        assert_eq!(payload, br#"{"iss":"joe"}"#);
    }

    #[test]
    fn empty_json_object_fails_to_parse() {
        assert!(parse("{}").is_err());
    }

    #[test]
    fn sign_with_headers_merges_alg_in() {
        let key = Key::Symmetric(b"secret".to_vec());
        let mut extra = Header::default();
        extra.key_id = Some("my-kid".to_string());

        let message = sign_with_headers(Algorithm::Hs256, &extra, b"hello", &key).unwrap();
        let entry = &message.signatures[0];
        assert_eq!(entry.protected.as_ref().unwrap().algorithm, Some(Algorithm::Hs256));
        assert_eq!(entry.protected.as_ref().unwrap().key_id, Some("my-kid".to_string()));

        let compact = serialize::to_compact(&message).unwrap();
        assert_eq!(verify_with_key(&compact, &key).unwrap(), b"hello");
    }

    #[test]
    fn sign_with_headers_alg_wins_over_conflicting_extra_alg() {
        let key = Key::Symmetric(b"secret".to_vec());
        let extra = Header::new(Algorithm::Hs384);

        let message = sign_with_headers(Algorithm::Hs256, &extra, b"hello", &key).unwrap();
        assert_eq!(
            message.signatures[0].protected.as_ref().unwrap().algorithm,
            Some(Algorithm::Hs256)
        );
    }

    #[test]
    fn sign_literal_rejects_mismatched_algorithm() {
        let key = Key::Symmetric(b"secret".to_vec());
        let raw = br#"{"alg":"HS384"}"#;
        assert!(sign_literal(raw, b"payload", &Algorithm::Hs256, &key).is_err());
    }

    #[test]
    fn sign_literal_uses_caller_supplied_bytes_verbatim() {
        let key = Key::Symmetric(b"secret".to_vec());
        let raw = br#"{"alg":"HS256","kid":"literal-kid"}"#;
        let message = sign_literal(raw, b"payload", &Algorithm::Hs256, &key).unwrap();
        assert_eq!(
            message.signatures[0].raw_protected.as_deref(),
            Some(repr::encode_bytes(raw).as_str())
        );
        let compact = serialize::to_compact(&message).unwrap();
        assert!(verify_with_key(&compact, &key).is_ok());
    }

    #[test]
    fn verify_with_key_set_matches_by_kid() {
        let key_a = Key::Symmetric(b"key-a-secret-value".to_vec());
        let key_b = Key::Symmetric(b"key-b-secret-value".to_vec());

        let mut header = Header::new(Algorithm::Hs256);
        header.key_id = Some("b".to_string());
        let message = sign(&header, b"hello", &key_b).unwrap();
        let compact = serialize::to_compact(&message).unwrap();

        let mut keys = KeySet::new();
        keys.push(KeyEntry::with_key_id(key_a, "a"));
        keys.push(KeyEntry::with_key_id(key_b, "b"));

        let payload = verify_with_key_set(&compact, &keys).unwrap();
        assert_eq!(payload, b"hello");
    }

    #[test]
    fn verify_with_key_set_no_match_errors() {
        let key = Key::Symmetric(b"your-256-bit-secret".to_vec());
        let header = Header::new(Algorithm::Hs256);
        let message = sign(&header, b"hello", &key).unwrap();
        let compact = serialize::to_compact(&message).unwrap();

        let keys = KeySet::new();
        assert!(verify_with_key_set(&compact, &keys).is_err());
    }

    #[test]
    fn empty_payload_rejected() {
        let key = Key::Symmetric(b"your-256-bit-secret".to_vec());
        let header = Header::new(Algorithm::Hs256);
        let message = sign(&header, b"", &key).unwrap();
        let compact = serialize::to_compact(&message).unwrap();
        assert!(matches!(
            verify_with_key(&compact, &key),
            Err(JwsError::EmptyPayload)
        ));
    }

    #[test]
    fn verify_with_key_set_require_kid_skips_keyless_signature() {
        let key = Key::Symmetric(b"your-256-bit-secret".to_vec());
        let header = Header::new(Algorithm::Hs256);
        let message = sign(&header, b"hello", &key).unwrap();
        let compact = serialize::to_compact(&message).unwrap();

        let mut keys = KeySet::new();
        keys.push(KeyEntry::new(key));

        assert!(verify_with_key_set(&compact, &keys).is_ok());
        assert!(matches!(
            verify_with_key_set_opts(
                &compact,
                &keys,
                VerifyWithKeySetOptions { require_kid: true },
            ),
            Err(JwsError::NoMatchingKey)
        ));
    }
}
