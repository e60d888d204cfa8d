//! platform
//!
//! Platform-abstracted filesystem primitives.
//!
//! # Architecture
//!
//! Link detection, link resolution, and copy-command construction differ
//! between the POSIX family and Windows. The [`FileOps`] trait has exactly
//! two implementations:
//!
//! - [`PosixFileOps`]: native symlinks, `cp -r` copies
//! - [`WindowsFileOps`]: reparse points (symlinks and junctions), `xcopy`
//!   copies with native separators
//!
//! [`native`] performs platform detection once; call sites hold the trait
//! object and never branch on the platform themselves.
//!
//! # Example
//!
//! ```
//! use stevedore::platform;
//! use std::path::Path;
//!
//! let ops = platform::native();
//! let cmd = ops.copy_command(Path::new("/a"), Path::new("/b"));
//! assert!(cmd.contains("/a") || cmd.contains("\\a"));
//! ```

mod posix;
mod traits;
mod windows;

pub use posix::PosixFileOps;
pub use traits::{FileOps, FileOpsError};
pub use windows::WindowsFileOps;

/// The [`FileOps`] implementation for the platform this process runs on.
///
/// Selection happens here, once, by platform detection. Everything else in
/// the crate takes `&dyn FileOps` and stays platform-agnostic.
pub fn native() -> &'static dyn FileOps {
    if cfg!(windows) {
        &WindowsFileOps
    } else {
        &PosixFileOps
    }
}
