use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::users::{self, PageInfo, Pagination, UserProfile};

/// `data` of a user listing.
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<UserProfile>,
    pub pagination: PageInfo,
}

pub async fn list_users(
    db: &DatabaseConnection,
    pagination: Pagination,
    search: Option<&str>,
) -> Result<UserPage, AppError> {
    let search = search.map(str::trim).filter(|s| !s.is_empty());

    let (rows, total) = futures_util::try_join!(
        users::list_users(db, pagination, search),
        users::count_users(db, search),
    )?;

    Ok(UserPage {
        users: rows.into_iter().map(UserProfile::from).collect(),
        pagination: PageInfo::new(pagination, total),
    })
}

pub async fn get_user(db: &DatabaseConnection, id: &str) -> Result<UserProfile, AppError> {
    users::find_user_by_id(db, id)
        .await?
        .map(UserProfile::from)
        .ok_or_else(|| DomainError::user_not_found().into())
}

/// Update the display name of `id`; `None` leaves it unchanged.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: &str,
    name: Option<String>,
) -> Result<UserProfile, AppError> {
    let id = id.to_owned();
    let user = with_txn(db, move |txn| {
        Box::pin(async move { Ok(users::update_user(txn, &id, name).await?) })
    })
    .await?;
    info!(user_id = %user.id, "profile updated");
    Ok(user.into())
}

pub async fn delete_account(db: &DatabaseConnection, id: &str) -> Result<(), AppError> {
    users::delete_user(db, id).await?;
    info!(user_id = %id, "account deleted");
    Ok(())
}
