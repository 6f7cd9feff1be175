use axum::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, info, trace, warn};

use crate::auth::{
    dto::{AuthError, AuthResponse, Claims, JwtKeys, PublicUser, TokenKind},
    password::{hash_password, verify_password},
    repo::is_unique_violation,
    repo_types::User,
};

/// Identity collaborator behind the auth routes.
///
/// Callers validate payloads before reaching the provider, so emails arrive
/// normalized and passwords already satisfy the length rule.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;
    async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AuthError>;
    /// Succeeds whether or not the account exists.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
    async fn confirm_password_reset(&self, token: &str, new_password: &str) -> Result<(), AuthError>;
}

/// Provider backed by the `users` table, Argon2 hashes and HS256 tokens.
pub struct LocalAuthProvider {
    db: PgPool,
    keys: JwtKeys,
}

impl LocalAuthProvider {
    pub fn new(db: PgPool, keys: JwtKeys) -> Self {
        Self { db, keys }
    }

    fn issue(&self, user: User) -> Result<AuthResponse, AuthError> {
        let access_token = self.keys.sign_access(user.id).map_err(internal("sign access"))?;
        let refresh_token = self
            .keys
            .sign_refresh(user.id)
            .map_err(internal("sign refresh"))?;
        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: PublicUser {
                id: user.id,
                email: user.email,
            },
        })
    }
}

fn internal(what: &'static str) -> impl Fn(anyhow::Error) -> AuthError {
    move |e| {
        error!(error = %e, "{} failed", what);
        AuthError::internal()
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        if User::find_by_email(&self.db, email)
            .await
            .map_err(internal("find_by_email"))?
            .is_some()
        {
            warn!(%email, "email already registered");
            return Err(AuthError::email_in_use());
        }

        let hash = hash_password(password).map_err(internal("hash_password"))?;
        let user = match User::create(&self.db, email, &hash).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                warn!(%email, "email registered concurrently");
                return Err(AuthError::email_in_use());
            }
            Err(e) => return Err(internal("create user")(e)),
        };

        info!(user_id = %user.id, "user registered");
        self.issue(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let Some(user) = User::find_by_email(&self.db, email)
            .await
            .map_err(internal("find_by_email"))?
        else {
            warn!(%email, "sign-in for unknown email");
            return Err(AuthError::invalid_credential());
        };

        let ok = verify_password(password, &user.password_hash)
            .map_err(internal("verify_password"))?;
        if !ok {
            warn!(user_id = %user.id, "sign-in with wrong password");
            return Err(AuthError::invalid_credential());
        }

        info!(user_id = %user.id, "user signed in");
        self.issue(user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AuthError> {
        let claims = self
            .keys
            .verify_kind(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                warn!(error = %e, "refresh rejected");
                AuthError::invalid_token()
            })?;

        let user = User::find_by_id(&self.db, claims.sub)
            .await
            .map_err(internal("find_by_id"))?
            .ok_or_else(AuthError::user_not_found)?;
        self.issue(user)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let user = User::find_by_email(&self.db, email)
            .await
            .map_err(internal("find_by_email"))?;
        let Some(user) = user else {
            debug!(%email, "password reset for unknown email ignored");
            return Ok(());
        };

        let token = self
            .keys
            .sign_reset(user.id, &user.password_hash)
            .map_err(internal("sign reset"))?;
        info!(user_id = %user.id, "password reset requested");
        // No mail transport: the token is only visible at trace level.
        trace!(user_id = %user.id, %token, "password reset token issued");
        Ok(())
    }

    async fn confirm_password_reset(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let claims = self
            .keys
            .verify_kind(token, TokenKind::Reset)
            .map_err(|e| {
                warn!(error = %e, "reset token rejected");
                AuthError::invalid_token()
            })?;

        let user = User::find_by_id(&self.db, claims.sub)
            .await
            .map_err(internal("find_by_id"))?
            .ok_or_else(AuthError::user_not_found)?;
        authorize_reset(&claims, &user.password_hash)?;

        let hash = hash_password(new_password).map_err(internal("hash_password"))?;
        let updated = User::update_password(&self.db, user.id, &user.password_hash, &hash)
            .await
            .map_err(internal("update_password"))?;
        if !updated {
            warn!(user_id = %user.id, "password changed while the reset was in flight");
            return Err(AuthError::invalid_token());
        }

        info!(user_id = %claims.sub, "password reset completed");
        Ok(())
    }
}

/// A reset token is spent once the password it was issued against is gone.
fn authorize_reset(claims: &Claims, current_hash: &str) -> Result<(), AuthError> {
    if claims.matches_password(current_hash) {
        Ok(())
    } else {
        warn!(user_id = %claims.sub, "reset token already used");
        Err(AuthError::invalid_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use uuid::Uuid;

    fn keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: "reset-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        })
    }

    #[test]
    fn second_confirm_with_the_same_token_is_rejected() {
        let keys = keys();
        let stored = hash_password("first-password").unwrap();
        let token = keys.sign_reset(Uuid::new_v4(), &stored).unwrap();
        let claims = keys.verify_kind(&token, TokenKind::Reset).unwrap();

        assert!(authorize_reset(&claims, &stored).is_ok());

        // The first confirm replaced the stored hash.
        let stored = hash_password("second-password").unwrap();
        assert_eq!(
            authorize_reset(&claims, &stored).unwrap_err(),
            AuthError::invalid_token()
        );
    }

    #[test]
    fn reset_token_without_fingerprint_is_rejected() {
        let keys = keys();
        let stored = hash_password("first-password").unwrap();
        let claims = Claims {
            pwd: None,
            ..keys
                .verify(&keys.sign_access(Uuid::new_v4()).unwrap())
                .unwrap()
        };
        assert!(authorize_reset(&claims, &stored).is_err());
    }
}
