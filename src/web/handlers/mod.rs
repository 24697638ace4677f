//! Request handlers for the doorkeep web API.

pub mod account;

pub use account::{AppState, SharedDatabase};
