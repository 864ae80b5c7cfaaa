//! Stacklens Core Types and Definitions
//!
//! This crate provides the foundational types for Stacklens error reports.
//! It includes:
//!
//! - **Thrown values**: The canonical error shape and the raw values callers
//!   hand to the pipeline ([`thrown`] module)
//! - **Frames**: Raw and enhanced stack frames plus source chunks ([`frame`] module)
//! - **Reports**: The assembled [`report::ParsedError`]
//! - **Classification**: Origin and location kind of a frame ([`classify`] module)
//! - **Windows**: Line-numbered source excerpts around a frame ([`window`] module)

pub mod classify;
pub mod frame;
pub mod report;
pub mod thrown;
pub mod window;
