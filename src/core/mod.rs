//! Core driver infrastructure
//!
//! Shared plumbing used by the platform and device layers.

pub mod logging;
