//! Provides input functionality for driving trajectory frames.
//!
//! This module contains the on-disk snapshot format used when the encoder
//! runs standalone instead of embedded in a host framework. Trajectory
//! output itself is not file I/O from this crate's perspective: the encoder
//! writes to any `std::io::Write` sink whose lifecycle the caller owns.

pub mod snapshot;
