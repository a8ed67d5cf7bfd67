//! Registration and login.

use std::time::SystemTime;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::auth::{hash_password, mint_access_token, verify_password};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{self, NewUser, UserProfile};
use crate::state::security_config::SecurityConfig;
use crate::validation::schemas::{LoginUser, RegisterUser};

/// `data` of a successful register or login.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserProfile,
    pub token: String,
}

/// Create an account and issue its first token.
///
/// The email must already be normalized (the register schema does this). A
/// taken email is `Conflict(UniqueEmail)`, whether seen by the lookup or by
/// the unique constraint on a concurrent insert.
pub async fn register(
    db: &DatabaseConnection,
    security: &SecurityConfig,
    input: RegisterUser,
) -> Result<AuthPayload, AppError> {
    if users::find_user_by_email(db, &input.email).await?.is_some() {
        info!(email = %Redacted(&input.email), "registration for existing email");
        return Err(DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered").into());
    }

    let password_hash = hash_password(&input.password, security.bcrypt_cost).await?;
    let new_user = NewUser {
        email: input.email,
        name: input.name,
        password_hash,
    };

    let user = with_txn(db, move |txn| {
        Box::pin(async move { Ok(users::insert_user(txn, new_user).await?) })
    })
    .await?;

    let token = mint_access_token(&user.id, &user.email, SystemTime::now(), security)?;
    info!(user_id = %user.id, email = %Redacted(&user.email), "user registered");

    Ok(AuthPayload {
        user: user.into(),
        token,
    })
}

/// Check credentials and issue a token.
///
/// Unknown email and wrong password both answer `InvalidCredentials`.
pub async fn login(
    db: &DatabaseConnection,
    security: &SecurityConfig,
    input: LoginUser,
) -> Result<AuthPayload, AppError> {
    let Some(user) = users::find_user_by_email(db, &input.email).await? else {
        security::login_failed("unknown_email", &input.email);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&input.password, &user.password_hash).await? {
        security::login_failed("wrong_password", &input.email);
        return Err(AppError::InvalidCredentials);
    }

    let token = mint_access_token(&user.id, &user.email, SystemTime::now(), security)?;
    security::login_succeeded(&user.id, &user.email);

    Ok(AuthPayload {
        user: user.into(),
        token,
    })
}
