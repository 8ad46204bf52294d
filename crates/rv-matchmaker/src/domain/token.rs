//! Pair-token derivation.
//!
//! Both sides of a pair must end up with the same token no matter which of
//! them is "self". The two entries are put in canonical order by their
//! ordering keys before hashing:
//!
//! ```text
//! left  = entry with the strictly greater ordering key (ties: first argument)
//! right = the other one
//!
//! token = base64( SHA-256( le32(left.key) ‖ le32(left.id) ‖ le32(right.key) ‖ le32(right.id) )[..22] )
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use super::entry::Entry;

/// Number of digest bytes kept in a token.
pub const TOKEN_DIGEST_LEN: usize = 22;

/// Size of the hash input: two (key, id) pairs of little-endian u32.
const HASH_INPUT_LEN: usize = 16;

/// Symmetric shared value for one pair of entries in the same round.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairToken(String);

impl PairToken {
    /// Derive the token for `a` and `b`. See [`pair_token`].
    pub fn derive(a: &Entry, b: &Entry) -> Self {
        pair_token(a, b)
    }

    /// Wrap an already-encoded token.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Base64 text, as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the raw digest prefix.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }

    /// Consume into the base64 text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PairToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the token shared by `a` and `b`.
///
/// `pair_token(a, b) == pair_token(b, a)` whenever the ordering keys differ.
/// A self-pair (or equal keys) takes the tie branch and still yields a
/// well-defined value.
pub fn pair_token(a: &Entry, b: &Entry) -> PairToken {
    let (left, right) = if b.ordering_key() > a.ordering_key() {
        (b, a)
    } else {
        (a, b)
    };

    let mut input = [0u8; HASH_INPUT_LEN];
    input[0..4].copy_from_slice(&left.ordering_key().get().to_le_bytes());
    input[4..8].copy_from_slice(&left.id().get().to_le_bytes());
    input[8..12].copy_from_slice(&right.ordering_key().get().to_le_bytes());
    input[12..16].copy_from_slice(&right.id().get().to_le_bytes());

    let digest = Sha256::digest(input);
    PairToken(STANDARD.encode(&digest[..TOKEN_DIGEST_LEN]))
}
