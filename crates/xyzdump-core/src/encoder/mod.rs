//! # Encoder Module
//!
//! The record-to-text conversion pipeline: selecting particles, computing
//! emitted coordinates, resolving species names, rendering records through
//! a configurable line template, and managing the growable batch buffer
//! with its signed-32-bit length ceiling.
//!
//! ## Overview
//!
//! [`extxyz::ExtxyzEncoder`] is the assembled dump style. Its collaborating
//! pieces are deliberately small:
//!
//! - [`typenames`] - Species code to display name registry
//! - [`template`] - Compiled printf-style per-record line template
//! - [`buffer`] - Frame-reused render buffer and its growth policy
//! - [`error`] - Configuration and per-frame error taxonomy
//!
//! Geometry handling (orthogonal vs. triclinic) and the output path
//! (batch vs. per-line) are fixed once at initialization and never
//! re-examined during per-frame calls.

pub mod error;
pub mod extxyz;
pub mod template;
pub mod typenames;

mod buffer;
