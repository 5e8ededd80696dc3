use crate::config::{Config, Login};
use crate::domain::models::auth::{Claims, SessionUser};
use crate::error::AppError;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_DAYS: i64 = 7;

pub struct AuthService {
    logins: Vec<Login>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        let secret = config.session_secret.as_bytes();
        Self {
            logins: config.logins.clone(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Looks the user up in the configured logins and checks the password.
    pub fn verify_credentials(&self, user: &str, password: &str) -> Option<&Login> {
        let login = self.logins.iter().find(|l| l.user == user)?;
        let parsed_hash = PasswordHash::new(&login.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .ok()
            .map(|_| login)
    }

    /// Issues a signed session token and the CSRF token bound to it.
    pub fn issue_session(&self, login: &Login) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();

        let claims = Claims {
            sub: login.user.clone(),
            admin: login.admin,
            csrf: csrf_token.clone(),
            exp: (now + Duration::days(SESSION_DAYS)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Session encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok((token, csrf_token))
    }

    pub fn decode_session(&self, token: &str) -> Result<SessionUser, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        Ok(SessionUser {
            name: data.claims.sub,
            admin: data.claims.admin,
            csrf_token: data.claims.csrf,
        })
    }
}
