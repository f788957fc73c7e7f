//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an [`Output`].

mod check;
mod diagnostics;
mod init;
mod order;
mod output;
mod synth;

pub use check::CheckReport;
pub use diagnostics::Diagnostics;
pub use init::InitReport;
pub use order::{OrderReport, OrderedResource};
#[cfg(test)]
pub use output::RecordingOutput;
pub use output::{Report, TerminalOutput};
pub use synth::SynthReport;
