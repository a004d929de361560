use thiserror::Error;

/// Work factor bounds accepted by bcrypt
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted bcrypt hashing with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// A digest that is not valid bcrypt never verifies
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        bcrypt::verify(plaintext, digest).unwrap_or(false)
    }

    /// `hash` on the blocking pool; bcrypt is deliberately slow
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await?
    }

    pub async fn verify_blocking(&self, plaintext: String, digest: String) -> Result<bool, PasswordError> {
        let hasher = *self;
        Ok(tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hasher = PasswordHasher::new(MIN_COST);
        let digest = hasher.hash("hermitcrab").unwrap();

        assert_ne!(digest, "hermitcrab");
        assert!(hasher.verify("hermitcrab", &digest));
        assert!(!hasher.verify("hermitcrab2", &digest));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = PasswordHasher::new(MIN_COST);
        let a = hasher.hash("p").unwrap();
        let b = hasher.hash("p").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_digest_does_not_verify() {
        let hasher = PasswordHasher::new(MIN_COST);
        assert!(!hasher.verify("p", "not-a-bcrypt-hash"));
    }

    #[tokio::test]
    async fn blocking_variants_agree() {
        let hasher = PasswordHasher::new(MIN_COST);
        let digest = hasher.hash_blocking("p".to_string()).await.unwrap();
        assert!(hasher.verify_blocking("p".to_string(), digest.clone()).await.unwrap());
        assert!(!hasher.verify_blocking("q".to_string(), digest).await.unwrap());
    }
}
