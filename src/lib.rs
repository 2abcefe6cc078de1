//! Task manager: a JSON REST API for creating, reading, updating and
//! deleting tasks.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: the task entity and its status, free of infrastructure
//! - **Ports**: the repository trait the service depends on
//! - **Adapters**: in-memory and `PostgreSQL` repositories, and the HTTP API
//!
//! # Modules
//!
//! - [`task`]: task domain, storage, service and HTTP routes
//! - [`config`]: environment-driven configuration
//! - [`telemetry`]: tracing subscriber setup
//! - [`server`]: listener lifecycle with graceful shutdown

pub mod config;
pub mod server;
pub mod task;
pub mod telemetry;
