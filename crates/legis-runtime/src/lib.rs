//! Runtime orchestrator — runs the pipeline stages against one configuration.
//!
//! Each stage reads what the previous stage left on disk, so stages can be run
//! one at a time or all together with [`Pipeline::run_all`].

pub mod orchestrator;
pub mod types;

pub use orchestrator::Pipeline;
pub use types::*;
