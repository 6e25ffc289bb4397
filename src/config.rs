use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};

pub const DEFAULT_TEMPLATE: &str = "index.template.html";
pub const DEFAULT_OUTPUT: &str = "index.html";

#[derive(Debug, Parser)]
#[command(
    name = "site-assembler",
    version,
    about = "Assemble a static HTML page by splicing <!-- include: path --> directives into a template."
)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Directory used to resolve the template, every include, and the output.
    #[arg(long, env = "SITE_ASSEMBLER_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Template file, relative to the base directory.
    #[arg(long, env = "SITE_ASSEMBLER_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Output file, relative to the base directory.
    #[arg(long, env = "SITE_ASSEMBLER_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Fail the run when an include target does not exist.
    #[arg(long, env = "SITE_ASSEMBLER_STRICT")]
    pub strict: bool,

    /// Print debug output.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assemble in memory and fail if the output file is missing or out of date.
    Check,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub strict: bool,
    pub verbosity: Verbosity,
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Build,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Config {
    pub fn from_cli() -> Result<Self> {
        let cli = Cli::parse();
        Config::from_parts(cli.common, cli.command)
    }

    /// Default layout rooted at `base_dir`.
    pub fn for_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            template_path: base_dir.join(DEFAULT_TEMPLATE),
            output_path: base_dir.join(DEFAULT_OUTPUT),
            base_dir,
            strict: false,
            verbosity: Verbosity::Normal,
            mode: Mode::Build,
        }
    }

    fn from_parts(common: CommonArgs, command: Option<Command>) -> Result<Self> {
        let template_path = common.base_dir.join(&common.template);
        let output_path = common.base_dir.join(&common.output);
        if same_path(&template_path, &output_path) {
            return Err(anyhow!(
                "output {} would overwrite the template",
                output_path.display()
            ));
        }

        let verbosity = if common.quiet {
            Verbosity::Quiet
        } else if common.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        let mode = match command {
            Some(Command::Check) => Mode::Check,
            None => Mode::Build,
        };

        Ok(Self {
            base_dir: common.base_dir,
            template_path,
            output_path,
            strict: common.strict,
            verbosity,
            mode,
        })
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.components().eq(b.components()),
    }
}
