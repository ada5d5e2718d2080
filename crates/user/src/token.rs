use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Token id, persisted so the token can be revoked.
    pub jti: String,
    pub iat: u64,
    pub exp: u64,
}

/// HS256 signer for the opaque tokens handed out on login.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: u64,
}

impl TokenSigner {
    pub fn new(secret: &str, lifetime_days: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs: lifetime_days * 24 * 60 * 60,
        }
    }

    pub fn sign(&self, user_id: i64, jti: &str, now: u64) -> anyhow::Result<(String, u64)> {
        let exp = now + self.lifetime_secs;
        let claims = Claims {
            sub: user_id.to_string(),
            jti: jti.to_owned(),
            iat: now,
            exp,
        };

        Ok((encode(&Header::default(), &claims, &self.encoding)?, exp))
    }

    /// Checks signature and expiry. Revocation is checked against the
    /// database by the caller.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}
