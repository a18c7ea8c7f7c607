//! Privilege checks

use nix::unistd::{Uid, geteuid};

/// Whether the process runs with an effective UID of root.
///
/// `systemctl start`/`stop` on system units normally requires this.
pub fn running_as_root() -> bool {
    geteuid().is_root()
}

/// Effective UID, for diagnostics
pub fn effective_uid() -> u32 {
    Uid::effective().as_raw()
}
