//! Session key material
//!
//! One Ed25519 keypair is minted per linking session. The public key becomes
//! the session's public identifier; the signing key never leaves this type
//! and is zeroized when the pair is dropped.

use core::fmt;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::errors::CryptoError;
use crate::Result;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Length of an Ed25519 seed in bytes
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of a legacy NaCl secret key (seed followed by public key)
pub const NACL_SECRET_KEY_LENGTH: usize = 64;

/// Length of a detached Ed25519 signature in bytes
pub const SIGNATURE_LENGTH: usize = 64;

// ----------------------------------------------------------------------------
// Session Key Pair (Ed25519)
// ----------------------------------------------------------------------------

/// Ed25519 signing key pair scoped to one linking session
///
/// The signing key is zeroized on drop. Each session must hold its own pair;
/// pairs are never reused across sessions.
#[derive(Clone)]
pub struct SessionKeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl SessionKeyPair {
    /// Generate a new random session key pair
    pub fn generate() -> Result<Self> {
        let mut rng = rand_core::OsRng;
        Self::generate_with_rng(&mut rng)
    }

    /// Generate a new session key pair with a custom RNG
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        rng.try_fill_bytes(&mut seed)
            .map_err(|e| CryptoError::KeyGenerationFailed {
                reason: e.to_string(),
            })?;

        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        let verifying_key = signing_key.verifying_key();

        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Create from raw secret key bytes
    ///
    /// Accepts a 32-byte Ed25519 seed, or the legacy 64-byte NaCl layout
    /// (seed followed by the public key) minted by older tooling. Any other
    /// length is rejected before signing is ever attempted.
    pub fn from_bytes(secret_key: &[u8]) -> Result<Self> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        match secret_key.len() {
            SECRET_KEY_LENGTH => seed.copy_from_slice(secret_key),
            NACL_SECRET_KEY_LENGTH => seed.copy_from_slice(&secret_key[..SECRET_KEY_LENGTH]),
            actual => return Err(CryptoError::InvalidKeyLength { actual }.into()),
        }

        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        let verifying_key = signing_key.verifying_key();

        // The NaCl layout embeds the public half; reject inconsistent material
        if secret_key.len() == NACL_SECRET_KEY_LENGTH
            && secret_key[SECRET_KEY_LENGTH..] != verifying_key.to_bytes()
        {
            return Err(CryptoError::KeyMismatch.into());
        }

        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Get the public key bytes
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Produce a detached signature over the given bytes
    pub fn sign<T: AsRef<[u8]>>(&self, data: T) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(data.as_ref()).to_bytes()
    }

    /// Verify a detached signature against a public key
    pub fn verify<D: AsRef<[u8]>>(
        public_key: &[u8; 32],
        data: D,
        signature: &[u8; SIGNATURE_LENGTH],
    ) -> Result<()> {
        let verifying_key = VerifyingKey::from_bytes(public_key)
            .map_err(|_| CryptoError::VerificationFailed)?;
        let signature = Signature::from_bytes(signature);

        verifying_key
            .verify(data.as_ref(), &signature)
            .map_err(|_| CryptoError::VerificationFailed.into())
    }
}

// The secret half must never reach logs
impl fmt::Debug for SessionKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeyPair")
            .field("public_key", &hex::encode(self.verifying_key.to_bytes()))
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_pairs_are_independent() {
        let pairs: Vec<SessionKeyPair> = (0..16)
            .map(|_| SessionKeyPair::generate().unwrap())
            .collect();

        for (i, a) in pairs.iter().enumerate() {
            for b in pairs.iter().skip(i + 1) {
                assert_ne!(a.public_key_bytes(), b.public_key_bytes());
            }
        }
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let pair = SessionKeyPair::generate().unwrap();
        let signature = pair.sign(b"linking payload");

        assert!(
            SessionKeyPair::verify(&pair.public_key_bytes(), b"linking payload", &signature)
                .is_ok()
        );
        assert!(
            SessionKeyPair::verify(&pair.public_key_bytes(), b"tampered payload", &signature)
                .is_err()
        );
    }

    #[test]
    fn test_from_bytes_accepts_seed() {
        let seed = [7u8; SECRET_KEY_LENGTH];
        let pair = SessionKeyPair::from_bytes(&seed).unwrap();
        let signature = pair.sign(b"payload");
        assert!(SessionKeyPair::verify(&pair.public_key_bytes(), b"payload", &signature).is_ok());
    }

    #[test]
    fn test_from_bytes_accepts_nacl_layout() {
        let seed = [9u8; SECRET_KEY_LENGTH];
        let pair = SessionKeyPair::from_bytes(&seed).unwrap();

        let mut nacl = [0u8; NACL_SECRET_KEY_LENGTH];
        nacl[..SECRET_KEY_LENGTH].copy_from_slice(&seed);
        nacl[SECRET_KEY_LENGTH..].copy_from_slice(&pair.public_key_bytes());

        let from_nacl = SessionKeyPair::from_bytes(&nacl).unwrap();
        assert_eq!(from_nacl.public_key_bytes(), pair.public_key_bytes());
        // Both layouts sign identically
        assert_eq!(from_nacl.sign(b"data"), pair.sign(b"data"));
    }

    #[test]
    fn test_from_bytes_rejects_mismatched_nacl_public_half() {
        let mut nacl = [0u8; NACL_SECRET_KEY_LENGTH];
        nacl[..SECRET_KEY_LENGTH].copy_from_slice(&[9u8; SECRET_KEY_LENGTH]);
        // Wrong public half
        nacl[SECRET_KEY_LENGTH..].copy_from_slice(&[1u8; 32]);

        assert!(SessionKeyPair::from_bytes(&nacl).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert!(SessionKeyPair::from_bytes(&[0u8; 16]).is_err());
        assert!(SessionKeyPair::from_bytes(&[0u8; 33]).is_err());
        assert!(SessionKeyPair::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let pair = SessionKeyPair::generate().unwrap();
        let debug = format!("{:?}", pair);
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains(&hex::encode(pair.public_key_bytes())));
    }
}
