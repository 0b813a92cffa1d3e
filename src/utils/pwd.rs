use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::errors::{Error, Result};

pub fn hash(password: &[u8]) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(password, &salt)?.to_string())
}

pub fn validate(password: &[u8], hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();

    match argon2.verify_password(password, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Argon2Error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_validate_round_trip() {
        let password = b"Passw0rd";

        let hashed = hash(password).expect("Failed to hash password");

        assert!(validate(password, &hashed).expect("Validation failed"));
        assert!(!validate(b"Passw0rd!", &hashed).expect("Validation failed"));
    }

    #[test]
    fn validate_rejects_garbage_hash() {
        assert!(validate(b"Passw0rd", "not-a-phc-string").is_err());
    }
}
