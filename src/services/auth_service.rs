//! Admin authentication service

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    config::Config,
    constants::{ADMIN_AUTH_COOKIE_NAME, ADMIN_TOKEN_SUBJECT},
    error::{AppError, AppResult},
    utils::{
        SessionCookie,
        password::{constant_time_eq, verify_password},
    },
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Issued admin session
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Check admin credentials and issue a session token
    pub fn login(config: &Config, username: &str, password: &str) -> AppResult<IssuedToken> {
        let admin = &config.admin;
        let Some(expected_username) = admin.username.as_deref() else {
            error!("Admin login attempted but ADMIN_USERNAME is not set");
            return Err(AppError::Configuration("Admin credentials are not configured".to_string()));
        };

        let password_ok = match (admin.password_hash.as_deref(), admin.password.as_deref()) {
            (Some(hash), _) => verify_password(password, hash)?,
            (None, Some(plain)) => constant_time_eq(password, plain),
            (None, None) => {
                error!("Admin login attempted but no admin password is configured");
                return Err(AppError::Configuration(
                    "Admin credentials are not configured".to_string(),
                ));
            }
        };
        let username_ok = constant_time_eq(username, expected_username);
        let blank = username.trim().is_empty() || password.is_empty();

        if blank || !(username_ok && password_ok) {
            warn!("Rejected admin login attempt");
            return Err(AppError::InvalidCredentials);
        }

        let issued = Self::generate_token(config, username)?;
        info!(username = %username, "Admin logged in");
        Ok(issued)
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;

        if token_data.claims.sub != ADMIN_TOKEN_SUBJECT {
            return Err(AppError::InvalidToken);
        }

        Ok(token_data.claims)
    }

    /// Cookie carrying the admin session
    pub fn session_cookie(config: &Config) -> SessionCookie {
        SessionCookie {
            name: ADMIN_AUTH_COOKIE_NAME,
            path: "/",
            secure: config.admin.secure_cookie,
            max_age_secs: config.jwt.expiry_hours * 60 * 60,
        }
    }

    fn generate_token(config: &Config, username: &str) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_in = config.jwt.expiry_hours * 60 * 60;
        let exp = now + Duration::seconds(expires_in);

        let claims = Claims {
            sub: ADMIN_TOKEN_SUBJECT.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(IssuedToken { token, expires_in })
    }
}
