//! The JWS header: reserved fields from RFC 7515 §4.1, plus any extension
//! fields a producer chose to add.

use crate::error::JwsError;
use crate::util::enum_like_str;
use std::collections::HashSet;

enum_like_str! {
    /// A JSON Web Algorithm token, per RFC 7518 §3.1 and RFC 8037 §3.1.
    ///
    /// Closed for the algorithms this crate knows about; anything else
    /// round-trips as [`Algorithm::Other`] rather than failing to parse.
    /// Only algorithm dispatch (signing/verification) rejects a value it
    /// cannot act on, via [`crate::error::JwsError::UnsupportedAlgorithm`].
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum Algorithm {
        /// The unsecured JWS algorithm. No signature is produced or checked.
        None = "none",
        Hs256 = "HS256",
        Hs384 = "HS384",
        Hs512 = "HS512",
        Rs256 = "RS256",
        Rs384 = "RS384",
        Rs512 = "RS512",
        Ps256 = "PS256",
        Ps384 = "PS384",
        Ps512 = "PS512",
        Es256 = "ES256",
        Es384 = "ES384",
        Es512 = "ES512",
        EdDsa = "EdDSA",
    }
}

/// Header parameter names reserved by RFC 7515 §4.1 and RFC 7518. A `crit`
/// list must never name one of these: they're always understood, by
/// definition, so listing them as critical is meaningless and rejected.
const RESERVED_NAMES: &[&str] = &[
    "alg", "jku", "jwk", "kid", "x5u", "x5c", "x5t", "x5t#S256", "typ", "cty", "crit",
];

/// A JWS header: either the protected header, the unprotected ("public")
/// header, or the logical union of both used when validating `crit`.
///
/// Unknown fields are preserved verbatim in `extensions` so that re-emitting
/// a parsed header (e.g. when appending a signature to a general-JSON
/// message) never silently drops data a producer included.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Header {
    #[serde(rename = "alg", default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(rename = "cty", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(rename = "jwk", default, skip_serializing_if = "Option::is_none")]
    pub jwk: Option<serde_json::Value>,

    #[serde(rename = "jku", default, skip_serializing_if = "Option::is_none")]
    pub jwk_set_url: Option<String>,

    #[serde(rename = "x5u", default, skip_serializing_if = "Option::is_none")]
    pub x509_url: Option<String>,

    #[serde(rename = "x5c", default, skip_serializing_if = "Option::is_none")]
    pub x509_chain: Option<Vec<String>>,

    #[serde(rename = "x5t", default, skip_serializing_if = "Option::is_none")]
    pub x509_sha1_thumbprint: Option<String>,

    #[serde(
        rename = "x5t#S256",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub x509_sha256_thumbprint: Option<String>,

    #[serde(rename = "crit", default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<Vec<String>>,

    #[serde(flatten)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl Header {
    /// A bare header carrying only `alg`, for the common case of signing
    /// with no other parameters.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm: Some(algorithm),
            ..Self::default()
        }
    }

    /// Field-wise union of `self` and `other`, with `other` winning on
    /// conflict. Extension fields are unioned the same way, key by key.
    pub fn merge(&self, other: &Header) -> Header {
        let mut extensions = self.extensions.clone();
        for (key, value) in &other.extensions {
            extensions.insert(key.clone(), value.clone());
        }
        Header {
            algorithm: other.algorithm.clone().or_else(|| self.algorithm.clone()),
            key_id: other.key_id.clone().or_else(|| self.key_id.clone()),
            media_type: other.media_type.clone().or_else(|| self.media_type.clone()),
            content_type: other
                .content_type
                .clone()
                .or_else(|| self.content_type.clone()),
            jwk: other.jwk.clone().or_else(|| self.jwk.clone()),
            jwk_set_url: other
                .jwk_set_url
                .clone()
                .or_else(|| self.jwk_set_url.clone()),
            x509_url: other.x509_url.clone().or_else(|| self.x509_url.clone()),
            x509_chain: other.x509_chain.clone().or_else(|| self.x509_chain.clone()),
            x509_sha1_thumbprint: other
                .x509_sha1_thumbprint
                .clone()
                .or_else(|| self.x509_sha1_thumbprint.clone()),
            x509_sha256_thumbprint: other
                .x509_sha256_thumbprint
                .clone()
                .or_else(|| self.x509_sha256_thumbprint.clone()),
            critical: other.critical.clone().or_else(|| self.critical.clone()),
            extensions,
        }
    }

    /// Whether `name` is present in this header, reserved field or
    /// extension alike.
    fn has_field(&self, name: &str) -> bool {
        match name {
            "alg" => self.algorithm.is_some(),
            "kid" => self.key_id.is_some(),
            "typ" => self.media_type.is_some(),
            "cty" => self.content_type.is_some(),
            "jwk" => self.jwk.is_some(),
            "jku" => self.jwk_set_url.is_some(),
            "x5u" => self.x509_url.is_some(),
            "x5c" => self.x509_chain.is_some(),
            "x5t" => self.x509_sha1_thumbprint.is_some(),
            "x5t#S256" => self.x509_sha256_thumbprint.is_some(),
            "crit" => self.critical.is_some(),
            other => self.extensions.contains_key(other),
        }
    }

    /// Validates this header's own `crit` list: it must be absent or
    /// non-empty, and must name only non-reserved fields that are actually
    /// present in `union_with` (this header merged with its counterpart,
    /// protected-or-public, at verification time).
    pub fn validate_critical(&self, union_with: &Header) -> Result<(), JwsError> {
        let Some(crit) = &self.critical else {
            return Ok(());
        };
        if crit.is_empty() {
            return Err(JwsError::MalformedHeader(
                "crit must not be an empty list".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(crit.len());
        for name in crit {
            if RESERVED_NAMES.contains(&name.as_str()) {
                return Err(JwsError::MalformedHeader(format!(
                    "crit names reserved header parameter {name:?}"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(JwsError::MalformedHeader(format!(
                    "crit lists {name:?} more than once"
                )));
            }
            if !self.has_field(name) && !union_with.has_field(name) {
                return Err(JwsError::MalformedHeader(format!(
                    "crit names {name:?}, which is not understood"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alg_value() {
        macro_rules! test {
            ($value:expr => $expected:expr) => {
                let value = $value;
                let json = serde_json::to_string(&value).expect("could not serialise");
                assert_eq!(json, $expected);
            };
        }
        test!(Algorithm::None => "\"none\"");
        test!(Algorithm::Hs256 => "\"HS256\"");
        test!(Algorithm::Hs384 => "\"HS384\"");
        test!(Algorithm::Hs512 => "\"HS512\"");
        test!(Algorithm::Rs256 => "\"RS256\"");
        test!(Algorithm::Rs384 => "\"RS384\"");
        test!(Algorithm::Rs512 => "\"RS512\"");
        test!(Algorithm::Ps256 => "\"PS256\"");
        test!(Algorithm::Ps384 => "\"PS384\"");
        test!(Algorithm::Ps512 => "\"PS512\"");
        test!(Algorithm::Es256 => "\"ES256\"");
        test!(Algorithm::Es384 => "\"ES384\"");
        test!(Algorithm::Es512 => "\"ES512\"");
        test!(Algorithm::EdDsa => "\"EdDSA\"");
    }

    #[test]
    fn unknown_algorithm_round_trips() {
        let header: Header = serde_json::from_str(r#"{"alg":"XX999"}"#).unwrap();
        assert_eq!(header.algorithm, Some(Algorithm::Other("XX999".to_string())));
    }

    #[test]
    fn unknown_fields_preserved_as_extensions() {
        let header: Header = serde_json::from_str(r#"{"alg":"HS256","custom":"value"}"#).unwrap();
        assert_eq!(
            header.extensions.get("custom"),
            Some(&serde_json::Value::String("value".to_string()))
        );
        let back = serde_json::to_value(&header).unwrap();
        assert_eq!(back.get("custom").unwrap(), "value");
    }

    #[test]
    fn crit_rejects_reserved_name() {
        let header = Header {
            critical: Some(vec!["alg".to_string()]),
            ..Header::new(Algorithm::Hs256)
        };
        assert!(header.validate_critical(&Header::default()).is_err());
    }

    #[test]
    fn crit_rejects_empty_list() {
        let header = Header {
            critical: Some(vec![]),
            ..Header::new(Algorithm::Hs256)
        };
        assert!(header.validate_critical(&Header::default()).is_err());
    }

    #[test]
    fn crit_accepts_understood_extension() {
        let mut header = Header::new(Algorithm::Hs256);
        header.critical = Some(vec!["exp-check".to_string()]);
        header
            .extensions
            .insert("exp-check".to_string(), serde_json::Value::Bool(true));
        assert!(header.validate_critical(&Header::default()).is_ok());
    }

    #[test]
    fn crit_rejects_unresolved_extension() {
        let mut header = Header::new(Algorithm::Hs256);
        header.critical = Some(vec!["exp-check".to_string()]);
        assert!(header.validate_critical(&Header::default()).is_err());
    }

    #[test]
    fn merge_prefers_other_on_conflict() {
        let mut a = Header::new(Algorithm::Hs256);
        a.key_id = Some("a".to_string());
        let mut b = Header::new(Algorithm::Hs384);
        b.media_type = Some("JWT".to_string());

        let merged = a.merge(&b);
        assert_eq!(merged.algorithm, Some(Algorithm::Hs384));
        assert_eq!(merged.key_id, Some("a".to_string()));
        assert_eq!(merged.media_type, Some("JWT".to_string()));
    }

    #[test]
    fn merge_unions_extensions_with_other_winning() {
        let mut a = Header::new(Algorithm::Hs256);
        a.extensions
            .insert("x".to_string(), serde_json::Value::from(1));
        a.extensions
            .insert("y".to_string(), serde_json::Value::from("a"));
        let mut b = Header::default();
        b.extensions
            .insert("y".to_string(), serde_json::Value::from("b"));

        let merged = a.merge(&b);
        assert_eq!(merged.extensions.get("x"), Some(&serde_json::Value::from(1)));
        assert_eq!(
            merged.extensions.get("y"),
            Some(&serde_json::Value::from("b"))
        );
    }
}
