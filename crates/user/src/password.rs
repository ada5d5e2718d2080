use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

pub fn hash(password: &str) -> foodgram_shared::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub fn verify(password: &str, hash: &str) -> foodgram_shared::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    #[test]
    fn hash_then_verify() {
        let hashed = super::hash("my_password").unwrap();

        assert_ne!(hashed, "my_password");
        assert!(super::verify("my_password", &hashed).unwrap());
        assert!(!super::verify("other_password", &hashed).unwrap());
    }
}
