use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Salted SHA-256 digest of an account secret.
///
/// Both parts are stored base64url encoded (no padding).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    salt: String,
    digest: String,
}

impl Credential {
    /// Derives a credential from a secret with a fresh random salt.
    pub fn new(secret: &str) -> Self {
        let mut salt = [0u8; 16];
        rand::rng().fill(&mut salt);

        Self {
            salt: URL_SAFE_NO_PAD.encode(salt),
            digest: Self::digest(&salt, secret),
        }
    }

    /// Returns true if the secret produces the stored digest.
    pub fn verify(&self, secret: &str) -> bool {
        match URL_SAFE_NO_PAD.decode(&self.salt) {
            Ok(salt) => Self::digest(&salt, secret) == self.digest,
            Err(e) => {
                tracing::warn!("Stored credential has an undecodable salt: {}", e);
                false
            }
        }
    }

    fn digest(salt: &[u8], secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(secret.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_matching_secret() {
        let credential = Credential::new("secret1");
        assert!(credential.verify("secret1"));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let credential = Credential::new("secret1");
        assert!(!credential.verify("secret2"));
        assert!(!credential.verify(""));
        assert!(!credential.verify("Secret1"));
    }

    #[test]
    fn test_salt_differs_per_credential() {
        let a = Credential::new("same");
        let b = Credential::new("same");

        assert_ne!(a, b);
        assert!(a.verify("same"));
        assert!(b.verify("same"));
    }

    #[test]
    fn test_secret_not_serialized() {
        let credential = Credential::new("hunter2");
        let json = serde_json::to_string(&credential).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_corrupt_salt_never_verifies() {
        let credential: Credential =
            serde_json::from_str(r#"{"salt":"!!!","digest":"abc"}"#).unwrap();
        assert!(!credential.verify("anything"));
    }

    #[test]
    fn test_debug_hides_digest() {
        let credential = Credential::new("secret1");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains(&credential.digest));
    }
}
