use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use thiserror::Error;

use crate::config::PasswordConfig;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid hashing parameters: {0}")]
    Params(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Turns plaintext passwords into storable hashes and checks them later.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, PasswordError>;

    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// Argon2id with a per-password salt and a server-wide pepper.
#[derive(Clone)]
pub struct Argon2Hasher {
    pepper: String,
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            config.rounds,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::Params(e.to_string()))?;

        Ok(Self {
            pepper: config.pepper.clone(),
            params,
        })
    }

    fn peppered(&self, plain: &str) -> String {
        format!("{plain}{}", self.pepper)
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let hash = argon2
            .hash_password(self.peppered(plain).as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        // Cost parameters are read back from the encoded hash.
        Argon2::default()
            .verify_password(self.peppered(plain).as_bytes(), &parsed)
            .is_ok()
    }
}
