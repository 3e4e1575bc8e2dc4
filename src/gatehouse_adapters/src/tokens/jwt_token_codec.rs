use chrono::{DateTime, Utc};
use gatehouse_core::{Email, IssuedToken, TokenClaims, TokenCodec, TokenError, TokenKind};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub access_token_ttl_in_seconds: i64,
    pub refresh_token_ttl_in_seconds: i64,
}

impl JwtConfig {
    fn ttl_in_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_token_ttl_in_seconds,
            TokenKind::Refresh => self.refresh_token_ttl_in_seconds,
        }
    }
}

/// HS256 codec over a single shared secret.
pub struct JwtTokenCodec {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: &Email, kind: TokenKind) -> Result<IssuedToken, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.ttl_in_seconds(kind)).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?;

        let claims = TokenClaims {
            sub: subject.as_str().to_owned(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::UnexpectedError(e.to_string()))?;

        // `exp` is whole seconds; report the instant the token actually lapses.
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(expires_at);
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str, kind: Option<TokenKind>) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidToken,
            })?;

        match kind {
            Some(expected) if expected != claims.kind => Err(TokenError::WrongKind { expected }),
            _ => Ok(claims),
        }
    }
}
