//! Base directory for the install script and other scratch files.
//!
//! The script is executed from inside the sandbox, so it has to live somewhere
//! the container tool shares with the host. Distrobox bind-mounts `/tmp` and
//! `$HOME`; `SIGNAL_SANDBOX_TMPDIR` can point elsewhere for unusual setups.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the scratch directory
pub const TMPDIR_ENV: &str = "SIGNAL_SANDBOX_TMPDIR";

/// Returns an absolute directory suitable for scratch files.
///
/// A relative `TMPDIR` (e.g. `TMPDIR=tmp`) would resolve differently inside
/// the sandbox, so relative values fall back to `/tmp`.
pub fn temp_dir_base() -> PathBuf {
    let candidate = env::var_os(TMPDIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir);
    if candidate.is_absolute() {
        candidate
    } else {
        PathBuf::from("/tmp")
    }
}
