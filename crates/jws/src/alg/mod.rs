//! The algorithm registry: one marker type per `alg` token, dispatched
//! against whatever [`Key`] the caller supplies at sign/verify time.
//!
//! Each marker is a zero-sized type implementing [`AlgorithmSigner`] and/or
//! [`AlgorithmVerifier`]. Unlike holding the key inside the algorithm
//! instance (the natural shape when an algorithm is chosen at compile
//! time), the registry here needs one [`Algorithm`](crate::header::Algorithm)
//! value to be usable with any compatible key chosen at runtime, so the key
//! is a parameter to `sign`/`verify` rather than a field.

#[cfg(feature = "ecdsa")]
pub mod ecdsa;
#[cfg(feature = "eddsa")]
pub mod eddsa;
#[cfg(feature = "hmac-sha2")]
pub mod hmac;
mod none;
#[cfg(feature = "rsa-pkcs1")]
pub mod rsa_pkcs1;
#[cfg(feature = "rsa-pss")]
pub mod rsa_pss;

use crate::error::JwsError;
use crate::header::Algorithm;
use crate::key::Key;

/// Produces a signature over `signing_input` using `key`.
pub trait AlgorithmSigner {
    fn sign(&self, key: &Key, signing_input: &[u8]) -> Result<Vec<u8>, JwsError>;
}

/// Checks a signature over `signing_input` using `key`.
pub trait AlgorithmVerifier {
    fn verify(&self, key: &Key, signing_input: &[u8], signature: &[u8]) -> Result<(), JwsError>;
}

/// Signs `signing_input` with the algorithm named by `alg`.
///
/// Fails with [`JwsError::UnsupportedAlgorithm`] if `alg` isn't one this
/// registry can dispatch (including any feature-gated algorithm whose
/// crate wasn't compiled in), and [`JwsError::KeyMismatch`] if `key`'s
/// family doesn't match what `alg` needs.
pub fn sign(alg: &Algorithm, key: &Key, signing_input: &[u8]) -> Result<Vec<u8>, JwsError> {
    match alg {
        Algorithm::None => none::None_.sign(key, signing_input),
        #[cfg(feature = "hmac-sha2")]
        Algorithm::Hs256 => hmac::Hs256.sign(key, signing_input),
        #[cfg(feature = "hmac-sha2")]
        Algorithm::Hs384 => hmac::Hs384.sign(key, signing_input),
        #[cfg(feature = "hmac-sha2")]
        Algorithm::Hs512 => hmac::Hs512.sign(key, signing_input),
        #[cfg(feature = "rsa-pkcs1")]
        Algorithm::Rs256 => rsa_pkcs1::Rs256.sign(key, signing_input),
        #[cfg(feature = "rsa-pkcs1")]
        Algorithm::Rs384 => rsa_pkcs1::Rs384.sign(key, signing_input),
        #[cfg(feature = "rsa-pkcs1")]
        Algorithm::Rs512 => rsa_pkcs1::Rs512.sign(key, signing_input),
        #[cfg(feature = "rsa-pss")]
        Algorithm::Ps256 => rsa_pss::Ps256.sign(key, signing_input),
        #[cfg(feature = "rsa-pss")]
        Algorithm::Ps384 => rsa_pss::Ps384.sign(key, signing_input),
        #[cfg(feature = "rsa-pss")]
        Algorithm::Ps512 => rsa_pss::Ps512.sign(key, signing_input),
        #[cfg(feature = "ecdsa")]
        Algorithm::Es256 => ecdsa::Es256.sign(key, signing_input),
        #[cfg(feature = "ecdsa")]
        Algorithm::Es384 => ecdsa::Es384.sign(key, signing_input),
        #[cfg(feature = "ecdsa")]
        Algorithm::Es512 => ecdsa::Es512.sign(key, signing_input),
        #[cfg(feature = "eddsa")]
        Algorithm::EdDsa => eddsa::EdDsaAlg.sign(key, signing_input),
        other => Err(JwsError::UnsupportedAlgorithm(other.as_str().to_string())),
    }
}

/// Verifies `signature` over `signing_input` with the algorithm named by
/// `alg`. See [`sign`] for the error conditions shared with signing.
pub fn verify(
    alg: &Algorithm,
    key: &Key,
    signing_input: &[u8],
    signature: &[u8],
) -> Result<(), JwsError> {
    match alg {
        Algorithm::None => none::None_.verify(key, signing_input, signature),
        #[cfg(feature = "hmac-sha2")]
        Algorithm::Hs256 => hmac::Hs256.verify(key, signing_input, signature),
        #[cfg(feature = "hmac-sha2")]
        Algorithm::Hs384 => hmac::Hs384.verify(key, signing_input, signature),
        #[cfg(feature = "hmac-sha2")]
        Algorithm::Hs512 => hmac::Hs512.verify(key, signing_input, signature),
        #[cfg(feature = "rsa-pkcs1")]
        Algorithm::Rs256 => rsa_pkcs1::Rs256.verify(key, signing_input, signature),
        #[cfg(feature = "rsa-pkcs1")]
        Algorithm::Rs384 => rsa_pkcs1::Rs384.verify(key, signing_input, signature),
        #[cfg(feature = "rsa-pkcs1")]
        Algorithm::Rs512 => rsa_pkcs1::Rs512.verify(key, signing_input, signature),
        #[cfg(feature = "rsa-pss")]
        Algorithm::Ps256 => rsa_pss::Ps256.verify(key, signing_input, signature),
        #[cfg(feature = "rsa-pss")]
        Algorithm::Ps384 => rsa_pss::Ps384.verify(key, signing_input, signature),
        #[cfg(feature = "rsa-pss")]
        Algorithm::Ps512 => rsa_pss::Ps512.verify(key, signing_input, signature),
        #[cfg(feature = "ecdsa")]
        Algorithm::Es256 => ecdsa::Es256.verify(key, signing_input, signature),
        #[cfg(feature = "ecdsa")]
        Algorithm::Es384 => ecdsa::Es384.verify(key, signing_input, signature),
        #[cfg(feature = "ecdsa")]
        Algorithm::Es512 => ecdsa::Es512.verify(key, signing_input, signature),
        #[cfg(feature = "eddsa")]
        Algorithm::EdDsa => eddsa::EdDsaAlg.verify(key, signing_input, signature),
        other => Err(JwsError::UnsupportedAlgorithm(other.as_str().to_string())),
    }
}
