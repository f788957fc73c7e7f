//! Core operations.
//!
//! The logic behind each command, separated from argument parsing and
//! output rendering.

pub mod check;
pub mod init;
pub mod order;
pub mod synth;

pub use check::check;
pub use init::init;
pub use order::order;
pub use synth::synth;
