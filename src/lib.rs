//! Taskboard: optimistic kanban board state for a project-management API.
//!
//! This crate keeps the cards of a kanban board in a local cache, applies
//! drag-and-drop moves to that cache immediately, and reconciles them with the
//! REST API that owns the task records.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote store and user
//!   notifications
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory, logs)
//!
//! # Modules
//!
//! - [`board`]: Task cache, drag tracking and drop reconciliation
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
