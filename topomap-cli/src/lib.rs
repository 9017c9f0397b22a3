//! Support library for the `topomap` CLI binary.
//!
//! Exposes the command pipeline and logging set-up so doctests and
//! integration tests can drive a projection without forking a subprocess.

pub mod cli;
pub mod logging;
