//! DTOs for the users_sea adapter.

/// Insert payload. `id` is generated by the caller.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

impl UserCreate {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            password_hash: password_hash.into(),
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }
}

/// Partial update; `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
}

/// Offset/limit window plus an optional free-text filter.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub offset: u64,
    pub limit: u64,
    pub search: Option<String>,
}
