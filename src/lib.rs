pub mod assembler;
pub mod config;
pub mod directive;
pub mod error;
pub mod logging;

pub use assembler::{Assembler, AssemblyReport, CheckOutcome, assemble, run};
pub use config::Config;
pub use error::AssembleError;
