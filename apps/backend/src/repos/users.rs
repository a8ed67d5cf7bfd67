//! User repository: domain models over the users_sea adapter.

use std::fmt;

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::adapters::users_sea::{self as users_adapter, UserCreate, UserListQuery, UserUpdate};
use crate::entities::users;
use crate::errors::domain::DomainError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// User domain model, including the stored credential.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// Outward projection of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Data for a new account. `email` must already be normalized.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Missing values take defaults; page is at least 1 and limit is clamped to 1..=MAX_LIMIT.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Page metadata returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PageInfo {
    pub fn new(pagination: Pagination, total: u64) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
            pages: total.div_ceil(pagination.limit),
        }
    }
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, id).await?;
    Ok(user.map(User::from))
}

/// Insert with a fresh ULID. A taken email surfaces as
/// `Conflict(UniqueEmail)`.
pub async fn insert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<User, DomainError> {
    let dto = UserCreate::new(
        Ulid::new().to_string(),
        new_user.email,
        new_user.password_hash,
    )
    .with_name(new_user.name);
    let user = users_adapter::insert_user(conn, dto).await?;
    Ok(User::from(user))
}

pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    name: Option<String>,
) -> Result<User, DomainError> {
    users_adapter::update_user(conn, id, UserUpdate { name })
        .await?
        .map(User::from)
        .ok_or_else(DomainError::user_not_found)
}

pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), DomainError> {
    match users_adapter::delete_user(conn, id).await? {
        0 => Err(DomainError::user_not_found()),
        _ => Ok(()),
    }
}

pub async fn count_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    search: Option<&str>,
) -> Result<u64, DomainError> {
    Ok(users_adapter::count_users(conn, search).await?)
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pagination: Pagination,
    search: Option<&str>,
) -> Result<Vec<User>, DomainError> {
    let query = UserListQuery {
        offset: pagination.offset(),
        limit: pagination.limit,
        search: search.map(str::to_owned),
    };
    let users = users_adapter::list_users(conn, &query).await?;
    Ok(users.into_iter().map(User::from).collect())
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
