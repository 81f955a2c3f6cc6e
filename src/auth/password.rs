use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Punctuation accepted by the "special character" policy rule.
const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Checks the password policy rules in order and reports the first
/// violation; later rules are not evaluated.
pub fn validate_password(plain: &str) -> Result<(), &'static str> {
    if plain.len() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !plain.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain an uppercase letter");
    }
    if !plain.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lowercase letter");
    }
    if !plain.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a digit");
    }
    if !plain.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err("Password must contain a special character");
    }
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("Correct-h0rse").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn policy_rules_checked_in_order() {
        assert_eq!(
            validate_password("Ab1!"),
            Err("Password must be at least 8 characters long")
        );
        // Long enough but fails uppercase first even though digit and
        // special are missing too.
        assert_eq!(
            validate_password("alllowercase"),
            Err("Password must contain an uppercase letter")
        );
        assert_eq!(
            validate_password("ALLUPPERCASE"),
            Err("Password must contain a lowercase letter")
        );
        assert_eq!(
            validate_password("NoDigitsHere!"),
            Err("Password must contain a digit")
        );
        assert_eq!(
            validate_password("NoSpecial1"),
            Err("Password must contain a special character")
        );
        assert_eq!(validate_password("GoodPass1!"), Ok(()));
    }
}
