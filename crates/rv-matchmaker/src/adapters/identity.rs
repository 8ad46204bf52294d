use rand::Rng;

use crate::domain::{EntryId, OrderingKey, MAX_IDENTIFIER};
use crate::ports::IdentitySource;

/// Draws public identifiers and ordering keys independently from the
/// thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentitySource;

impl RandomIdentitySource {
    /// Create a new random identity source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl IdentitySource for RandomIdentitySource {
    fn next_identity(&self) -> (EntryId, OrderingKey) {
        let mut rng = rand::thread_rng();
        let id = rng.gen_range(0..=MAX_IDENTIFIER);
        let key = rng.gen_range(0..=MAX_IDENTIFIER);
        (EntryId::new(id), OrderingKey::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_stay_in_31_bit_range() {
        let source = RandomIdentitySource::new();
        for _ in 0..1_000 {
            let (id, key) = source.next_identity();
            assert!(id.get() <= MAX_IDENTIFIER);
            assert!(key.get() <= MAX_IDENTIFIER);
        }
    }
}
