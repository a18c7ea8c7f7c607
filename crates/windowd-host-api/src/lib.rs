//! Collaborator trait interfaces for windowd
//!
//! This crate defines the boundary between the reconciler and the outside
//! world: a [`StateController`] that starts, stops, and queries the managed
//! service, and a [`Clock`] that reads UTC time and sleeps cancellably.
//! It contains no service-manager code itself.

mod clock;
mod mock;
mod traits;

pub use clock::*;
pub use mock::*;
pub use traits::*;
