//! # Issuer Key Directory
//!
//! [`IssuerKeyring`] maps issuer DIDs to their Ed25519 verifying keys.
//! The verification component resolves `expected_issuer` through the
//! keyring before running the signature check; an unregistered issuer is a
//! typed failure, not a silent pass.
//!
//! Thread-safe via `DashMap`. Re-registering an issuer replaces the key
//! (key rotation); resolution always sees the latest registration.

use dashmap::DashMap;

use vidp_core::Did;

use crate::ed25519::VerifyingKey;
use crate::error::CryptoError;

/// In-memory directory of issuer verifying keys.
pub struct IssuerKeyring {
    keys: DashMap<Did, VerifyingKey>,
}

impl IssuerKeyring {
    /// Create an empty keyring.
    pub fn new() -> Self {
        Self {
            keys: DashMap::new(),
        }
    }

    /// Register (or rotate) the verifying key for an issuer.
    ///
    /// Returns the previously registered key, if any.
    pub fn register(&self, issuer: Did, key: VerifyingKey) -> Option<VerifyingKey> {
        self.keys.insert(issuer, key)
    }

    /// Resolve the verifying key for an issuer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnknownIssuer`] if no key is registered.
    pub fn resolve(&self, issuer: &Did) -> Result<VerifyingKey, CryptoError> {
        self.keys
            .get(issuer)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CryptoError::UnknownIssuer(issuer.uri()))
    }

    /// Whether a key is registered for the issuer.
    pub fn contains(&self, issuer: &Did) -> bool {
        self.keys.contains_key(issuer)
    }

    /// Number of registered issuers.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the keyring is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for IssuerKeyring {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IssuerKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerKeyring")
            .field("issuer_count", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ed25519::SigningKey;
    use rand_core::OsRng;

    #[test]
    fn register_and_resolve() {
        let keyring = IssuerKeyring::new();
        let issuer = Did::from_bytes([1u8; 32]);
        let vk = SigningKey::generate(&mut OsRng).verifying_key();

        assert!(keyring.register(issuer, vk.clone()).is_none());
        assert_eq!(keyring.resolve(&issuer).unwrap(), vk);
        assert!(keyring.contains(&issuer));
        assert_eq!(keyring.len(), 1);
    }

    #[test]
    fn resolve_unknown_issuer_fails() {
        let keyring = IssuerKeyring::new();
        let result = keyring.resolve(&Did::from_bytes([9u8; 32]));
        assert!(matches!(result, Err(CryptoError::UnknownIssuer(_))));
    }

    #[test]
    fn rotation_replaces_key() {
        let keyring = IssuerKeyring::new();
        let issuer = Did::from_bytes([1u8; 32]);
        let old = SigningKey::generate(&mut OsRng).verifying_key();
        let new = SigningKey::generate(&mut OsRng).verifying_key();

        keyring.register(issuer, old.clone());
        let previous = keyring.register(issuer, new.clone());
        assert_eq!(previous, Some(old));
        assert_eq!(keyring.resolve(&issuer).unwrap(), new);
    }
}
