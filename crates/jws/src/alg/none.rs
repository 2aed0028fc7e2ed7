//! The unsecured JWS algorithm (RFC 7515 §8.5). Produces no signature and
//! accepts only an empty one.

use super::{AlgorithmSigner, AlgorithmVerifier};
use crate::error::JwsError;
use crate::key::Key;

pub struct None_;

impl AlgorithmSigner for None_ {
    fn sign(&self, _key: &Key, _signing_input: &[u8]) -> Result<Vec<u8>, JwsError> {
        Ok(Vec::new())
    }
}

impl AlgorithmVerifier for None_ {
    fn verify(&self, _key: &Key, _signing_input: &[u8], signature: &[u8]) -> Result<(), JwsError> {
        if signature.is_empty() {
            Ok(())
        } else {
            Err(JwsError::BadSignature)
        }
    }
}
