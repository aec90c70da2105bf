//! Admission score conversion engine and its service plumbing.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
