//! Step definitions for drag-and-drop board scenarios.

pub mod world;

mod given;
mod then;
mod when;
