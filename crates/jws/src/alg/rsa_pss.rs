//! RSASSA-PSS algorithms (`PS256`, `PS384`, `PS512`), RFC 7518 §3.5.
//!
//! Salt length equals the hash's output length and MGF1 uses the same
//! hash, per RFC 7518 §3.5. Unlike PKCS#1 v1.5 signing, PSS is randomized
//! and needs an RNG on every signature, so this module (unlike
//! `rsa-pkcs1`) always pulls in `rand_core` rather than gating it behind
//! the optional key-generation feature.

use super::{AlgorithmSigner, AlgorithmVerifier};
use crate::error::JwsError;
use crate::key::Key;
use rsa::pss::{BlindedSigningKey, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use sha2::{Sha256, Sha384, Sha512};

macro_rules! impl_rsa_pss {
    ($ident:ident, $hash:ty) => {
        pub struct $ident;

        impl AlgorithmSigner for $ident {
            fn sign(&self, key: &Key, signing_input: &[u8]) -> Result<Vec<u8>, JwsError> {
                let Key::RsaPrivate(private_key) = key else {
                    return Err(JwsError::KeyMismatch);
                };
                let signing_key = BlindedSigningKey::<$hash>::new((**private_key).clone());
                let signature = signing_key.sign_with_rng(&mut rand_core::OsRng, signing_input);
                Ok(signature.to_vec())
            }
        }

        impl AlgorithmVerifier for $ident {
            fn verify(
                &self,
                key: &Key,
                signing_input: &[u8],
                signature: &[u8],
            ) -> Result<(), JwsError> {
                let Key::RsaPublic(public_key) = key else {
                    return Err(JwsError::KeyMismatch);
                };
                let verifying_key = VerifyingKey::<$hash>::new((**public_key).clone());
                let signature = rsa::pss::Signature::try_from(signature)
                    .map_err(|_| JwsError::BadSignature)?;
                verifying_key
                    .verify(signing_input, &signature)
                    .map_err(|_| JwsError::BadSignature)
            }
        }
    };
}

impl_rsa_pss!(Ps256, Sha256);
impl_rsa_pss!(Ps384, Sha384);
impl_rsa_pss!(Ps512, Sha512);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_keypair() -> (rsa::RsaPrivateKey, rsa::RsaPublicKey) {
        let private_key = rsa::RsaPrivateKey::new(&mut rand_core::OsRng, 2048)
            .expect("could not generate test key");
        let public_key = private_key.to_public_key();
        (private_key, public_key)
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let (private_key, public_key) = test_keypair();
        let signing_input = b"test payload";

        let signature = Ps256
            .sign(&Key::RsaPrivate(Arc::new(private_key)), signing_input)
            .expect("signing failed");

        assert!(Ps256
            .verify(
                &Key::RsaPublic(Arc::new(public_key)),
                signing_input,
                &signature,
            )
            .is_ok());
    }

    #[test]
    fn signatures_are_randomized() {
        let (private_key, _) = test_keypair();
        let key = Key::RsaPrivate(Arc::new(private_key));
        let a = Ps256.sign(&key, b"same input").unwrap();
        let b = Ps256.sign(&key, b"same input").unwrap();
        assert_ne!(a, b, "PSS signatures must not be deterministic");
    }

    #[test]
    fn wrong_key_family_rejected() {
        assert!(Ps256
            .sign(&Key::Symmetric(vec![0u8; 32]), b"data")
            .is_err());
    }
}
