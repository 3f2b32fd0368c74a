//! Kanban board state for a single project.
//!
//! Dragging a card to another column updates the local cache at once and
//! persists the new status in the background. A failed update moves the card
//! back and notifies the user; a late response for a card that has since
//! moved again is ignored. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
