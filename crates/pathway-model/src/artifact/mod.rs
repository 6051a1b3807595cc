//! On-disk artifact handling: locating files and decoding both formats.

pub mod compat;
pub mod legacy;
pub mod locator;
pub mod native;

pub use locator::{resolve_exe_relative, ArtifactLocator};
