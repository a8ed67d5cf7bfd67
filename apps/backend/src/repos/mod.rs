//! Repository functions for the domain layer (generic over `ConnectionTrait`).

pub mod users;
