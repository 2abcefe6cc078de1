//! Task management.
//!
//! A request flows from the HTTP adapter through the service to a
//! repository:
//!
//! - Domain types in [`domain`]
//! - Wire shapes in [`dto`] and conversions in [`mapper`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod dto;
pub mod mapper;
pub mod ports;
pub mod services;
