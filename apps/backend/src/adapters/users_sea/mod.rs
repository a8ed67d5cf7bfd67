//! SeaORM adapter for the users table.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::users;

pub mod dto;

pub use dto::{UserCreate, UserListQuery, UserUpdate};

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id.to_owned()).one(conn).await
}

pub async fn insert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: Set(dto.id),
        email: Set(dto.email),
        name: Set(dto.name),
        password_hash: Set(dto.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// Apply `dto` and bump `updated_at`. `Ok(None)` when the row is gone.
pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    dto: UserUpdate,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(existing) = find_user_by_id(conn, id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    if let Some(name) = dto.name {
        active.name = Set(Some(name));
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = users::Entity::delete_by_id(id.to_owned()).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn count_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    search: Option<&str>,
) -> Result<u64, sea_orm::DbErr> {
    users::Entity::find()
        .filter(search_condition(search))
        .count(conn)
        .await
}

/// Newest first; ties broken by id so paging is stable.
pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &UserListQuery,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(search_condition(query.search.as_deref()))
        .order_by_desc(users::Column::CreatedAt)
        .order_by_desc(users::Column::Id)
        .offset(query.offset)
        .limit(query.limit)
        .all(conn)
        .await
}

/// Case-insensitive substring match on email or name. Empty search matches all.
fn search_condition(search: Option<&str>) -> Condition {
    let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) else {
        return Condition::all();
    };

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    Condition::any()
        .add(
            Expr::expr(Func::lower(Expr::col(users::Column::Email)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
        .add(
            Expr::expr(Func::lower(Expr::col(users::Column::Name)))
                .like(LikeExpr::new(pattern).escape('\\')),
        )
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
