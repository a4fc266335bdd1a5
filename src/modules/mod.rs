//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the workflow database's stored procedures.

pub mod procedures;
