//! The parsed/in-progress representation of a JWS: a payload plus one or
//! more signatures over it.
//!
//! This is serialization-format-agnostic — the same `Message` is produced
//! by parsing compact, flattened-JSON, or general-JSON input, and the same
//! `Message` can be emitted in whichever of those forms fits (see
//! `crate::serialize`).

use crate::header::Header;

/// One signature over a [`Message`]'s payload, along with the header data
/// that produced it.
#[derive(Debug, Clone)]
pub struct SignatureEntry {
    /// The parsed protected header, if one was present.
    pub protected: Option<Header>,

    /// The *exact* base64url text of the protected header as it appeared
    /// on the wire (or will appear, for a signature being built). Signing
    /// input reconstruction must use this, never a re-serialization of
    /// `protected` — JSON has more than one valid encoding of the same
    /// value, and RFC 7515 signs bytes, not structure.
    pub raw_protected: Option<String>,

    /// The unprotected ("public") header, if one was present. Only
    /// meaningful for JSON serializations; compact serialization has none.
    pub header: Option<Header>,

    pub signature: Vec<u8>,
}

impl SignatureEntry {
    /// The `kid` this signature should be looked up by: the protected
    /// header's, falling back to the public header's.
    pub fn key_id(&self) -> Option<&str> {
        self.protected
            .as_ref()
            .and_then(|h| h.key_id.as_deref())
            .or_else(|| self.header.as_ref().and_then(|h| h.key_id.as_deref()))
    }

    /// The effective algorithm for this signature: the protected header's,
    /// since `alg` MUST be carried there per RFC 7515 §4.1.1 (the
    /// unprotected header is not permitted to carry `alg` for compact/
    /// flattened forms, and this crate doesn't special-case the
    /// difference for general-JSON since no algorithm needs unprotected
    /// placement in practice).
    pub fn algorithm(&self) -> Option<&crate::header::Algorithm> {
        self.protected.as_ref().and_then(|h| h.algorithm.as_ref())
    }
}

/// A JWS message: a payload and the signatures over it.
#[derive(Debug, Clone)]
pub struct Message {
    pub payload: Vec<u8>,
    pub signatures: Vec<SignatureEntry>,
}

impl Message {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            signatures: Vec::new(),
        }
    }

    pub fn append_signature(&mut self, entry: SignatureEntry) -> &mut Self {
        self.signatures.push(entry);
        self
    }

    /// All signatures whose effective `kid` (see [`SignatureEntry::key_id`])
    /// equals `key_id`, in the order they appear in the message.
    pub fn lookup_by_key_id<'a>(
        &'a self,
        key_id: &'a str,
    ) -> impl Iterator<Item = &'a SignatureEntry> + 'a {
        self.signatures
            .iter()
            .filter(move |entry| entry.key_id() == Some(key_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Algorithm;

    #[test]
    fn lookup_finds_kid_in_protected_header_only() {
        let mut message = Message::new(b"payload".to_vec());
        let mut protected = Header::new(Algorithm::Hs256);
        protected.key_id = Some("2010-12-29".to_string());
        message.append_signature(SignatureEntry {
            protected: Some(protected),
            raw_protected: Some("ignored".to_string()),
            header: None,
            signature: vec![1, 2, 3],
        });

        let found: Vec<_> = message.lookup_by_key_id("2010-12-29").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(message.lookup_by_key_id("missing").count(), 0);
    }

    #[test]
    fn lookup_falls_back_to_public_header_kid() {
        let mut message = Message::new(b"payload".to_vec());
        let mut public = Header::default();
        public.key_id = Some("e9bc097a".to_string());
        message.append_signature(SignatureEntry {
            protected: Some(Header::new(Algorithm::Es256)),
            raw_protected: Some("ignored".to_string()),
            header: Some(public),
            signature: vec![4, 5, 6],
        });

        assert_eq!(message.lookup_by_key_id("e9bc097a").count(), 1);
    }
}
