//! Adapters for the task module.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   tests and local development
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//! - [`http`]: the REST surface that drives the task service

pub mod http;
pub mod memory;
pub mod postgres;
