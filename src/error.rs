use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("failed to read template {}: {source}", .path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read include {}: {source}", .path.display())]
    ReadInclude {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("include not found: {}", .path.display())]
    MissingInclude { path: PathBuf },
    #[error("failed to read existing output {}: {source}", .path.display())]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is out of date with {}", .output.display(), .template.display())]
    StaleOutput { output: PathBuf, template: PathBuf },
    #[error("{} has not been generated", .path.display())]
    OutputNotGenerated { path: PathBuf },
    #[error("invalid include pattern: {0}")]
    Pattern(#[from] regex::Error),
}
