//! Key material the algorithm registry dispatches over.
//!
//! This is deliberately not a JWK type: JWK parsing/serialization is kept
//! external (a consumer builds a [`Key`] however it likes — from a JWK
//! library, from PEM, from raw bytes — and hands it to this crate). `Key`
//! only needs to carry what the registry needs to pick and run an
//! algorithm implementation.

/// One piece of key material, tagged by family.
///
/// A single `Key` value is matched against whichever [`crate::header::Algorithm`]
/// the caller asks to use; the registry is what decides whether the pairing
/// is valid (see [`crate::error::JwsError::KeyMismatch`]).
#[derive(Clone)]
pub enum Key {
    /// A shared secret, used with the `HSxxx` family.
    Symmetric(Vec<u8>),

    #[cfg(any(feature = "rsa-pkcs1", feature = "rsa-pss"))]
    RsaPrivate(std::sync::Arc<rsa::RsaPrivateKey>),
    #[cfg(any(feature = "rsa-pkcs1", feature = "rsa-pss"))]
    RsaPublic(std::sync::Arc<rsa::RsaPublicKey>),

    #[cfg(feature = "ecdsa")]
    EcdsaP256Private(std::sync::Arc<p256::ecdsa::SigningKey>),
    #[cfg(feature = "ecdsa")]
    EcdsaP256Public(std::sync::Arc<p256::ecdsa::VerifyingKey>),
    #[cfg(feature = "ecdsa")]
    EcdsaP384Private(std::sync::Arc<p384::ecdsa::SigningKey>),
    #[cfg(feature = "ecdsa")]
    EcdsaP384Public(std::sync::Arc<p384::ecdsa::VerifyingKey>),
    #[cfg(feature = "ecdsa")]
    EcdsaP521Private(std::sync::Arc<p521::ecdsa::SigningKey>),
    #[cfg(feature = "ecdsa")]
    EcdsaP521Public(std::sync::Arc<p521::ecdsa::VerifyingKey>),

    #[cfg(feature = "eddsa")]
    Ed25519Private(std::sync::Arc<ed25519_dalek::SigningKey>),
    #[cfg(feature = "eddsa")]
    Ed25519Public(std::sync::Arc<ed25519_dalek::VerifyingKey>),
}

impl Key {
    /// A short, stable name for the key family, used only in error messages.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Symmetric(_) => "symmetric",
            #[cfg(any(feature = "rsa-pkcs1", feature = "rsa-pss"))]
            Self::RsaPrivate(_) | Self::RsaPublic(_) => "rsa",
            #[cfg(feature = "ecdsa")]
            Self::EcdsaP256Private(_) | Self::EcdsaP256Public(_) => "ecdsa-p256",
            #[cfg(feature = "ecdsa")]
            Self::EcdsaP384Private(_) | Self::EcdsaP384Public(_) => "ecdsa-p384",
            #[cfg(feature = "ecdsa")]
            Self::EcdsaP521Private(_) | Self::EcdsaP521Public(_) => "ecdsa-p521",
            #[cfg(feature = "eddsa")]
            Self::Ed25519Private(_) | Self::Ed25519Public(_) => "ed25519",
        }
    }
}

/// One entry in a [`KeySet`]: a key plus the `kid` it answers to, if any.
///
/// This is the narrow "JWK Set as key provider" shape multi-key verification
/// needs — not a JWK Set parser. A consumer that already has a JWK Set
/// library builds `KeyEntry` values from it.
#[derive(Clone)]
pub struct KeyEntry {
    pub key_id: Option<String>,
    pub key: Key,
}

impl KeyEntry {
    pub fn new(key: Key) -> Self {
        Self { key_id: None, key }
    }

    pub fn with_key_id(key: Key, key_id: impl Into<String>) -> Self {
        Self {
            key_id: Some(key_id.into()),
            key,
        }
    }
}

/// An ordered collection of candidate keys, used by
/// [`crate::jws::verify_with_key_set`] to try every key that could plausibly
/// match a signature's `kid`.
#[derive(Clone, Default)]
pub struct KeySet {
    entries: Vec<KeyEntry>,
}

impl KeySet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: KeyEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Keys whose `kid` matches `key_id` exactly, in insertion order.
    /// Keys with no `kid` at all are never returned — a signature naming a
    /// `kid` must match one explicitly, not fall back to an anonymous key.
    pub fn by_key_id<'a>(&'a self, key_id: &'a str) -> impl Iterator<Item = &'a Key> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.key_id.as_deref() == Some(key_id))
            .map(|entry| &entry.key)
    }

    /// Every key in the set, in insertion order. Used when a signature
    /// carries no `kid` at all: every candidate must be tried.
    pub fn all(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
