//! Command orchestrators for business logic
//!
//! This module provides orchestrators that coordinate between the CLI layer
//! and the core library services.

pub mod generate_orchestrator;

pub use generate_orchestrator::{FailedFile, GenerateOrchestrator, RunSummary};
