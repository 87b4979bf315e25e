//! # Core Models Module
//!
//! This module contains the data structures mirroring the host framework's
//! view of a simulation: particle storage, box geometry, and output
//! selection. These models are read-only collaborators from the encoder's
//! perspective and are designed to:
//!
//! - **Represent per-process state** - Identifiers, species codes, positions, and membership bits
//! - **Carry geometry faithfully** - Axis bounds plus the orthogonal/triclinic distinction
//! - **Keep selection explicit** - Bitmask membership tests instead of ad-hoc filtering
//! - **Eliminate positional layouts** - Packed records are named structures, not stride arithmetic
//!
//! ## Key Components
//!
//! - [`store`] - Per-process particle columns with a row iterator
//! - [`region`] - Simulation box bounds, extents, and cell shape
//! - [`selection`] - Group-membership bitmask tests
//! - [`record`] - One packed record of a selected particle

pub mod record;
pub mod region;
pub mod selection;
pub mod store;
