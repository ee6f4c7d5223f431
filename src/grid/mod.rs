//! Polar-binned spatial index over one event's spacepoints.
//!
//! Overview
//! - [`layout`] sizes a two-dimensional (phi, z) grid from the seeding
//!   configuration: the phi bin width follows the azimuthal deflection of a
//!   minimum-pT helix between the outermost radius and the deepest partner
//!   search, the z bin width covers the steepest accepted doublet.
//! - [`index`] adapts external spacepoints into the beam frame and fills the
//!   grid so that every cell is sorted by non-decreasing radius, up to the
//!   width of the millimetre bucketing used during the build.
//! - [`binfinder`] is the pluggable neighbourhood strategy: given a middle
//!   cell, which cells may hold bottom respectively top partners.
//!
//! The index is immutable once built and can be shared across worker threads
//! without locking; distinct middle cells are independent.

pub mod binfinder;
pub mod index;
pub mod layout;

pub use binfinder::{BinFinder, PhiNeighborBinFinder, SameCellBinFinder};
pub use index::SpacePointIndex;
pub use layout::{Cell, GridLayout};
