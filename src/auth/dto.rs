use axum::http::StatusCode;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Token type used to distinguish access, refresh and password-reset JWTs.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Reset,
}

/// Standard JWT claims used in the app.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,       // user ID
    pub exp: usize,      // expiration time
    pub iat: usize,      // issued at
    pub iss: String,     // issuer
    pub aud: String,     // audience
    pub kind: TokenKind, // access, refresh or reset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwd: Option<String>, // reset only: fingerprint of the password hash
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub reset_ttl: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResetRequest {
    pub token: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Response returned after sign-up, sign-in or refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

/// Generic error shape reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct AuthError {
    pub code: String,
    pub message: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn email_in_use() -> Self {
        Self::new(
            "auth/email-already-in-use",
            "Cette adresse e-mail est déjà utilisée",
        )
    }

    pub fn invalid_credential() -> Self {
        Self::new("auth/invalid-credential", "Identifiants invalides")
    }

    pub fn invalid_token() -> Self {
        Self::new("auth/invalid-token", "Jeton invalide ou expiré")
    }

    pub fn user_not_found() -> Self {
        Self::new("auth/user-not-found", "Utilisateur introuvable")
    }

    pub fn internal() -> Self {
        Self::new(
            "auth/internal-error",
            "Erreur interne du service d'authentification",
        )
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "auth/email-already-in-use" => StatusCode::CONFLICT,
            "auth/invalid-credential" | "auth/invalid-token" => StatusCode::UNAUTHORIZED,
            "auth/user-not-found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
