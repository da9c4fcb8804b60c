//! Core logic layer
//!
//! Hosts the typewriter instances and owns their lifecycle.
//! NO imports from frontend/ or rendering code.
//! Core updates widget state, frontends read and render.

pub mod app_core;

pub use app_core::AppCore;
