//! Conversion planning.
//!
//! For every candidate input the planner probes its title and picks one of:
//!
//! - skip, because conversion is disabled (`ffmpeg.run: false`)
//! - skip as a duplicate, because the title is already in the catalog; the
//!   input is cleaned up and, with `input.on_duplicate: abort` (the
//!   default), the rest of the run is abandoned
//! - skip, because the output path is already taken
//! - convert, then clean up the input
//!
//! `output.overwrite: true` bypasses both duplicate and existing-output
//! checks. Tool failures are fatal; there are no retries.

mod cleanup;
mod config;
mod error;
mod runner;
mod types;
mod verify;

pub use cleanup::cleanup_input;
pub use config::PlannerSettings;
pub use error::PlannerError;
pub use runner::ConversionPlanner;
pub use types::{Outcome, ReportEntry, RunReport};
pub use verify::verify_output;
