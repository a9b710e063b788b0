//! # PoseView Client Library
//!
//! Client for the proteins.plus PoseView service, which renders 2D
//! protein-ligand interaction diagrams for a given PDB structure.
//!
//! ## Layout
//!
//! - **[`models`]**: the request/response records exchanged with the service and the
//!   closed set of output formats.
//! - **[`client`]**: `JobClient`, issuing the submit, poll and download requests with a
//!   single configured timeout.
//! - **[`workflows`]**: the complete submit → wait → download sequence.
//!
//! [`config`], [`error`] and [`progress`] carry the settings, error kinds and UI-agnostic
//! progress events shared by the layers above.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod workflows;

#[cfg(test)]
mod test_support;
