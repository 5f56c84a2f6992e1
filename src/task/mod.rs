//! Tasks, their schedules, and the status they report.
//!
//! A task is either private to its creator or scoped to a group. Its
//! reported status is derived from its dates on every read; the stored
//! status only applies to tasks without dates. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
