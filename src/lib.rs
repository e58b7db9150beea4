//! Employee records over PostgreSQL: an HTTP CRUD service and a CSV batch loader
//! sharing one model and one connection factory.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod utils;
