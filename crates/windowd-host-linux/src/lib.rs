//! Linux host support for windowd
//!
//! Provides:
//! - A [`StateController`](windowd_host_api::StateController) backed by `systemctl`
//! - Privilege checks for the daemon's startup diagnostics

mod privilege;
mod systemd;

pub use privilege::*;
pub use systemd::*;
