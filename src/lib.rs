//! Atelier: group-scoped task collaboration.
//!
//! Users register, form groups through invite codes, and keep tasks either
//! privately or inside a group. Every request is decided in the same order:
//! verify the identity token, load the entities involved, authorize, validate
//! the proposed change, write it, and report each task with the status
//! derived from its dates.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and identity
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration returning [`error::ServiceResult`]
//!
//! # Modules
//!
//! - [`access`]: Permission decisions for groups and tasks
//! - [`identity`]: Registration, login, and token verification
//! - [`group`]: Groups, membership, invite codes, and cascade delete
//! - [`task`]: Tasks, schedules, and derived lifecycle status
//! - [`error`]: Service error taxonomy and status mapping
//! - [`config`]: Environment-driven configuration
//! - [`persistence`]: Connection pool and blocking-offload helpers

pub mod access;
pub mod config;
pub mod error;
pub mod group;
pub mod identity;
pub mod persistence;
pub mod task;
