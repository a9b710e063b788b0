//! # Workflows Module
//!
//! End-to-end procedures built on top of [`JobClient`](crate::client::JobClient).
//!
//! - **Render Workflow** ([`render`]) - submits a structure/ligand pair, waits
//!   for the service to finish and downloads the requested artifact.

pub mod render;
