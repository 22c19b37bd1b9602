pub mod config;
pub mod error;
pub mod executor;
pub mod language;
pub mod outcome;

pub use error::ExecuteError;
pub use executor::{ExecutionRequest, Executor, ScratchWorkspace};
pub use language::{LanguageProfile, LanguageRegistry, Seconds};
pub use outcome::{ExecutionOutcome, Status};
