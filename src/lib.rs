// Library exports for testing
pub mod audio;
pub mod chat;
pub mod config;
pub mod errors;
pub mod routes;
pub mod speech;
pub mod state;
