//! Window reconciler for windowd
//!
//! This crate is the heart of windowd, containing:
//! - Desired state evaluation against the daily UTC window
//! - Reconciliation of desired vs observed state (NoAction / Start / Stop)
//! - Sleep scheduling across window and day boundaries
//! - The cancellable control loop

mod decision;
mod reconciler;
mod schedule;

pub use decision::*;
pub use reconciler::*;
pub use schedule::*;
