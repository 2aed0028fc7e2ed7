#![cfg_attr(docsrs, feature(doc_cfg))]

//! JSON Web Signature (RFC 7515) parsing, construction, signing and
//! verification, with the algorithm set from RFC 7518 and the EdDSA
//! addition from RFC 8037.
//!
//! JWK parsing, JWE, and JWT claim validation are deliberately out of
//! scope — a [`Key`] is built however the caller likes, and the payload
//! this crate signs/verifies is opaque bytes.

pub mod alg;
pub mod error;
pub mod header;
pub mod key;
pub mod message;
pub mod pool;
pub mod repr;
pub mod serialize;
pub mod signing_input;
mod util;

mod jws;

pub use error::JwsError;
pub use header::{Algorithm, Header};
pub use jws::{
    parse, sign, sign_literal, sign_multi, sign_with_headers, verify, verify_message,
    verify_with_key, verify_with_key_set, verify_with_key_set_opts, VerifyWithKeySetOptions,
};
pub use key::{Key, KeyEntry, KeySet};
pub use message::{Message, SignatureEntry};
