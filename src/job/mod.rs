// src/job/mod.rs

//! Managed external job layer.
//!
//! This module owns the lifecycle of one long-running external process at a
//! time, using `tokio::process::Command`, and reports back to the
//! presentation layer via [`JobEvent`]s on an mpsc channel.
//!
//! - [`state`] holds the job data model ([`JobSpec`], [`JobState`],
//!   [`JobOutcome`], [`JobHandle`]).
//! - [`events`] defines the [`JobEvent`] notification type.
//! - [`runner`] exposes `start` / `cancel` and enforces the
//!   one-job-at-a-time rule.
//! - [`supervisor`] is the background task that owns the child process and
//!   its output pipes.
//!
//! This is the only part of the crate permitted to spawn or kill OS
//! processes.

pub mod events;
pub mod runner;
pub mod state;
pub(crate) mod supervisor;

pub use events::JobEvent;
pub use runner::JobRunner;
pub use state::{JobHandle, JobId, JobOutcome, JobSpec, JobState};
