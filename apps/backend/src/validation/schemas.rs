//! The request schemas and the typed payloads they produce.

use std::fmt;

use serde::Deserialize;

use super::{Check, FieldRule, Normalize, Presence, Schema, Validated};

const EMAIL_FIELD: FieldRule = FieldRule {
    name: "email",
    presence: Presence::Required("Email is required"),
    normalize: Normalize::TrimLowercase,
    checks: &[Check::Email("Please provide a valid email address")],
};

const NAME_FIELD: FieldRule = FieldRule {
    name: "name",
    presence: Presence::Optional,
    normalize: Normalize::Trim,
    checks: &[
        Check::MinChars(2, "Name must be at least 2 characters long"),
        Check::MaxChars(50, "Name cannot exceed 50 characters"),
    ],
};

pub static REGISTER_USER: Schema = Schema {
    name: "registerUser",
    fields: &[
        EMAIL_FIELD,
        FieldRule {
            name: "password",
            presence: Presence::Required("Password is required"),
            normalize: Normalize::Keep,
            checks: &[Check::MinChars(6, "Password must be at least 6 characters long")],
        },
        NAME_FIELD,
    ],
};

pub static LOGIN_USER: Schema = Schema {
    name: "loginUser",
    fields: &[
        EMAIL_FIELD,
        FieldRule {
            name: "password",
            presence: Presence::Required("Password is required"),
            normalize: Normalize::Keep,
            checks: &[],
        },
    ],
};

pub static USER_ID: Schema = Schema {
    name: "id",
    fields: &[FieldRule {
        name: "id",
        presence: Presence::Required("ID is required"),
        normalize: Normalize::Uppercase,
        checks: &[Check::Identifier("Invalid ID format")],
    }],
};

pub static UPDATE_PROFILE: Schema = Schema {
    name: "updateProfile",
    fields: &[NAME_FIELD],
};

#[derive(Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl Validated for RegisterUser {
    const SCHEMA: &'static Schema = &REGISTER_USER;
}

#[derive(Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

impl Validated for LoginUser {
    const SCHEMA: &'static Schema = &LOGIN_USER;
}

#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub id: String,
}

impl Validated for UserIdPath {
    const SCHEMA: &'static Schema = &USER_ID;
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
}

impl Validated for UpdateProfile {
    const SCHEMA: &'static Schema = &UPDATE_PROFILE;
}

// Payloads holding a password never print it.
impl fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUser")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for LoginUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUser").finish_non_exhaustive()
    }
}
