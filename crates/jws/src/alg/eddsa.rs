//! EdDSA over Ed25519, RFC 8037 §3.1.

use super::{AlgorithmSigner, AlgorithmVerifier};
use crate::error::JwsError;
use crate::key::Key;
use ed25519_dalek::{Signature, Signer, Verifier};

pub struct EdDsaAlg;

impl AlgorithmSigner for EdDsaAlg {
    fn sign(&self, key: &Key, signing_input: &[u8]) -> Result<Vec<u8>, JwsError> {
        let Key::Ed25519Private(signing_key) = key else {
            return Err(JwsError::KeyMismatch);
        };
        let signature = signing_key.sign(signing_input);
        Ok(signature.to_bytes().to_vec())
    }
}

impl AlgorithmVerifier for EdDsaAlg {
    fn verify(&self, key: &Key, signing_input: &[u8], signature: &[u8]) -> Result<(), JwsError> {
        let bytes: &[u8; 64] = signature
            .try_into()
            .map_err(|_| JwsError::BadSignature)?;
        let signature = Signature::from_bytes(bytes);

        match key {
            Key::Ed25519Private(signing_key) => signing_key
                .verifying_key()
                .verify(signing_input, &signature)
                .map_err(|_| JwsError::BadSignature),
            Key::Ed25519Public(verifying_key) => verifying_key
                .verify(signing_input, &signature)
                .map_err(|_| JwsError::BadSignature),
            _ => Err(JwsError::KeyMismatch),
        }
    }
}
