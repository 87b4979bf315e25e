//! # Workflows Module
//!
//! The highest-level, user-facing layer. It ties the [`crate::core`]
//! models and the [`crate::encoder`] pipeline together into complete
//! operations, currently the single-process per-frame driver in
//! [`frame`]. Hosts with their own parallel collection call the encoder
//! steps directly instead.

pub mod frame;
