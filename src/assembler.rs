use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{Config, Mode};
use crate::directive::{IncludeDirective, IncludePattern};
use crate::error::AssembleError;

/// Summary of one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    /// Resolved include paths in the order they were spliced in.
    pub included: Vec<PathBuf>,
    /// Directive paths, as written, whose targets did not exist.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Assembled {
    pub content: String,
    pub report: AssemblyReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Stale,
    MissingOutput,
}

#[derive(Debug, Clone)]
pub struct Assembler {
    base_dir: PathBuf,
    template_path: PathBuf,
    output_path: PathBuf,
    strict: bool,
    pattern: IncludePattern,
}

/// Assemble `base_dir/index.template.html` into `base_dir/index.html`.
pub fn assemble(base_dir: impl Into<PathBuf>) -> Result<AssemblyReport, AssembleError> {
    Assembler::new(&Config::for_base_dir(base_dir))?.assemble()
}

/// One run in the configured mode. A stale or absent output fails a check run.
pub fn run(config: &Config) -> Result<AssemblyReport, AssembleError> {
    let assembler = Assembler::new(config)?;
    match config.mode {
        Mode::Build => assembler.assemble(),
        Mode::Check => {
            let (outcome, report) = assembler.check()?;
            match outcome {
                CheckOutcome::UpToDate => {
                    info!("{} is up to date", report.output_path.display());
                    Ok(report)
                }
                CheckOutcome::Stale => Err(AssembleError::StaleOutput {
                    output: report.output_path,
                    template: report.template_path,
                }),
                CheckOutcome::MissingOutput => Err(AssembleError::OutputNotGenerated {
                    path: report.output_path,
                }),
            }
        }
    }
}

impl Assembler {
    pub fn new(config: &Config) -> Result<Self, AssembleError> {
        Ok(Self {
            base_dir: config.base_dir.clone(),
            template_path: config.template_path.clone(),
            output_path: config.output_path.clone(),
            strict: config.strict,
            pattern: IncludePattern::new()?,
        })
    }

    /// Runs the substitution pass without touching the output file.
    pub fn render(&self) -> Result<Assembled, AssembleError> {
        info!("Reading template from {}", self.template_path.display());
        let template =
            fs::read_to_string(&self.template_path).map_err(|source| AssembleError::ReadTemplate {
                path: self.template_path.clone(),
                source,
            })?;

        let mut report = AssemblyReport {
            template_path: self.template_path.clone(),
            output_path: self.output_path.clone(),
            ..AssemblyReport::default()
        };

        let mut content = String::with_capacity(template.len());
        let mut last_end = 0;
        for directive in self.pattern.directives(&template) {
            content.push_str(&template[last_end..directive.span.start]);
            content.push_str(&self.resolve(&directive, &mut report)?);
            last_end = directive.span.end;
        }
        content.push_str(&template[last_end..]);

        debug!(
            included = report.included.len(),
            missing = report.missing.len(),
            "substitution pass finished"
        );
        Ok(Assembled { content, report })
    }

    /// Renders and writes the output file. Nothing is written if rendering fails.
    pub fn assemble(&self) -> Result<AssemblyReport, AssembleError> {
        let Assembled { content, report } = self.render()?;
        fs::write(&self.output_path, content).map_err(|source| AssembleError::WriteOutput {
            path: self.output_path.clone(),
            source,
        })?;
        info!("Successfully generated {}", self.output_path.display());
        Ok(report)
    }

    /// Compares a fresh render against the output file on disk.
    pub fn check(&self) -> Result<(CheckOutcome, AssemblyReport), AssembleError> {
        let Assembled { content, report } = self.render()?;
        let outcome = match fs::read(&self.output_path) {
            Ok(existing) if existing == content.as_bytes() => CheckOutcome::UpToDate,
            Ok(_) => CheckOutcome::Stale,
            Err(err) if err.kind() == io::ErrorKind::NotFound => CheckOutcome::MissingOutput,
            Err(source) => {
                return Err(AssembleError::ReadOutput {
                    path: self.output_path.clone(),
                    source,
                });
            }
        };
        Ok((outcome, report))
    }

    fn resolve(
        &self,
        directive: &IncludeDirective,
        report: &mut AssemblyReport,
    ) -> Result<String, AssembleError> {
        let file_path = directive.path();
        let abs_path = self.base_dir.join(file_path);

        info!("  Including {file_path}");

        if !abs_path.exists() {
            if self.strict {
                return Err(AssembleError::MissingInclude { path: abs_path });
            }
            warn!("  File not found: {}", abs_path.display());
            report.missing.push(file_path.to_string());
            return Ok(directive.missing_marker());
        }

        let included = fs::read_to_string(&abs_path).map_err(|source| {
            AssembleError::ReadInclude {
                path: abs_path.clone(),
                source,
            }
        })?;
        report.included.push(abs_path);
        Ok(included)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn assembler(dir: &Path) -> Assembler {
        Assembler::new(&Config::for_base_dir(dir)).unwrap()
    }

    #[test]
    fn render_does_not_write_output() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.template.html"), "plain").unwrap();

        let assembled = assembler(dir.path()).render().unwrap();

        assert_eq!(assembled.content, "plain");
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn report_tracks_included_and_missing_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "A").unwrap();
        fs::write(dir.path().join("c.html"), "C").unwrap();
        fs::write(
            dir.path().join("index.template.html"),
            "<!-- include: c.html --><!-- include: b.html --><!-- include: a.html -->",
        )
        .unwrap();

        let report = assembler(dir.path()).assemble().unwrap();

        assert_eq!(
            report.included,
            vec![dir.path().join("c.html"), dir.path().join("a.html")]
        );
        assert_eq!(report.missing, vec!["b.html".to_string()]);
        assert_eq!(report.output_path, dir.path().join("index.html"));
    }

    #[test]
    fn strict_mode_fails_on_missing_include() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index.template.html"),
            "<!-- include: gone.html -->",
        )
        .unwrap();
        let mut config = Config::for_base_dir(dir.path());
        config.strict = true;

        let err = Assembler::new(&config).unwrap().assemble().unwrap_err();

        assert!(matches!(err, AssembleError::MissingInclude { .. }));
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn unreadable_include_is_fatal() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(
            dir.path().join("index.template.html"),
            "<!-- include: partials -->",
        )
        .unwrap();

        let err = assembler(dir.path()).assemble().unwrap_err();

        assert!(matches!(err, AssembleError::ReadInclude { .. }));
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn non_utf8_include_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bin.html"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(
            dir.path().join("index.template.html"),
            "<!-- include: bin.html -->",
        )
        .unwrap();

        let err = assembler(dir.path()).assemble().unwrap_err();

        assert!(matches!(err, AssembleError::ReadInclude { .. }));
    }

    #[test]
    fn check_reports_each_outcome() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("part.html"), "P").unwrap();
        fs::write(
            dir.path().join("index.template.html"),
            "[<!-- include: part.html -->]",
        )
        .unwrap();
        let assembler = assembler(dir.path());

        let (outcome, _) = assembler.check().unwrap();
        assert_eq!(outcome, CheckOutcome::MissingOutput);

        assembler.assemble().unwrap();
        let (outcome, _) = assembler.check().unwrap();
        assert_eq!(outcome, CheckOutcome::UpToDate);

        fs::write(dir.path().join("part.html"), "Q").unwrap();
        let (outcome, _) = assembler.check().unwrap();
        assert_eq!(outcome, CheckOutcome::Stale);
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "[P]"
        );
    }
}
