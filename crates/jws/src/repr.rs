//! Base64url (RFC 4648 §5, unpadded) encoding and the JSON+base64url
//! combination used throughout the wire formats.

use crate::error::JwsError;
use base64ct::Encoding;

/// Encodes to the preferred base64 format specified by RFC 7515:
///
/// > Base64 encoding using the URL- and filename-safe character set
/// > defined in [Section 5 of RFC 4648](https://www.rfc-editor.org/rfc/rfc4648.html#section-5),
/// > with all trailing '=' characters omitted (as permitted by Section 3.2) and without the
/// > inclusion of any line breaks, whitespace, or other additional
/// > characters.
///
/// This internally uses `base64ct`, since `jws` is not here to reinvent the wheel.
#[inline(always)]
pub fn encode_bytes(bytes: &[u8]) -> String {
    base64ct::Base64UrlUnpadded::encode_string(bytes)
}

/// Decodes bytes from the preferred base64 format specified by RFC 7515.
///
/// Rejects padded input and any character outside the URL-safe alphabet;
/// see [`is_base64url_byte`] for the character set the streaming compact
/// splitter uses to validate segments before they ever reach this function.
pub fn decode_bytes(s: &str) -> Result<Vec<u8>, JwsError> {
    base64ct::Base64UrlUnpadded::decode_vec(s)
        .map_err(|e| JwsError::MalformedCompact(format!("invalid base64url: {e}")))
}

/// Encodes a value as a base64url-encoded JSON string.
pub fn encode_value<T>(value: &T) -> Result<String, JwsError>
where
    T: serde::Serialize,
{
    let bytes = serde_json::to_vec(value)
        .map_err(|e| JwsError::MalformedHeader(format!("could not encode header: {e}")))?;
    Ok(encode_bytes(&bytes))
}

/// Decodes a value from a base64url-encoded JSON string.
pub fn decode_value<T>(s: &str) -> Result<T, JwsError>
where
    T: serde::de::DeserializeOwned,
{
    let decoded = decode_bytes(s)?;
    serde_json::from_slice(&decoded)
        .map_err(|e| JwsError::MalformedHeader(format!("invalid header JSON: {e}")))
}

/// Whether `b` is a member of the unpadded base64url alphabet
/// (`A`-`Z`, `a`-`z`, `0`-`9`, `-`, `_`).
///
/// Used by [`crate::serialize::split_compact`] to validate each compact
/// segment while scanning, without needing to fully decode it first.
#[inline]
pub fn is_base64url_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}
