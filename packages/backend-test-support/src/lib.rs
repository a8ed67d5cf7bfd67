//! Helpers shared by the backend's integration tests: logging setup, unique
//! test data and assertions on the JSON response envelope. Nothing here
//! depends on backend types.

pub mod envelope;
pub mod logging;
pub mod unique_helpers;
