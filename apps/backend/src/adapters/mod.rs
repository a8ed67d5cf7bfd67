//! SeaORM adapters. Functions here speak `DbErr`; the repos layer maps to
//! `DomainError`.

pub mod users_sea;
