//! Crop yield prediction API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, model
//! loading) so integration tests and the binary entrypoint can both access
//! them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
