//! Step definitions for group collaboration scenarios.

pub mod world;

mod given;
mod then;
mod when;
