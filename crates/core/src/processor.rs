//! File- and batch-level driver around the per-unit analysis.

use crate::cache::AnalysisCache;
use crate::error::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use varscope_api::models::{DeclarationOutcome, RefactorOptions};
use varscope_java::{ParseError, UnitAnalysis, analyze_source};

/// What happened to one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcomes: Vec<DeclarationOutcome>,
    pub unresolved: usize,
    /// Set when the file did not parse; it then has no outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<ParseError>,
    /// The rewritten text differs from the file on disk.
    pub changed: bool,
    /// The rewritten text was written back.
    pub written: bool,
}

impl FileReport {
    fn failed(path: &Path, error: ParseError) -> Self {
        Self {
            path: path.to_path_buf(),
            outcomes: Vec::new(),
            unresolved: 0,
            parse_error: Some(error),
            changed: false,
            written: false,
        }
    }

    fn from_analysis(path: &Path, analysis: &UnitAnalysis) -> Self {
        Self {
            path: path.to_path_buf(),
            outcomes: analysis.outcomes.clone(),
            unresolved: analysis.unresolved.len(),
            parse_error: None,
            changed: false,
            written: false,
        }
    }

    pub fn eligible_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.verdict.is_eligible()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    Check,
    DryRun,
    Write,
}

/// Shares one set of options (and optionally a cache) across any number of
/// files. Cheap to clone.
#[derive(Clone)]
pub struct Refactorer {
    options: Arc<RefactorOptions>,
    cache: Option<Arc<AnalysisCache>>,
}

impl Refactorer {
    pub fn new(options: RefactorOptions) -> Self {
        Self {
            options: Arc::new(options),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<AnalysisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn options(&self) -> &RefactorOptions {
        &self.options
    }

    pub fn analyze_source(&self, source: &str) -> std::result::Result<Arc<UnitAnalysis>, ParseError> {
        match &self.cache {
            Some(cache) => {
                cache.get_or_analyze(&self.options, source, || analyze_source(source, &self.options))
            }
            None => analyze_source(source, &self.options).map(Arc::new),
        }
    }

    /// Rewrite every eligible declaration of `source` in one pass.
    pub fn refactor_source(&self, source: &str) -> Result<String> {
        let analysis = self.analyze_source(source)?;
        Ok(analysis.rewrite(source)?)
    }

    /// Like [`Refactorer::refactor_source`] over many sources at once. Output
    /// order matches input order; a source that fails to parse comes back
    /// unchanged.
    pub fn refactor_batch(&self, sources: &[String]) -> Vec<String> {
        sources
            .par_iter()
            .enumerate()
            .map(|(i, source)| match self.refactor_source(source) {
                Ok(out) => out,
                Err(e) => {
                    warn!("source #{i} left unchanged: {e}");
                    source.clone()
                }
            })
            .collect()
    }

    pub fn analyze_file(&self, path: &Path) -> Result<FileReport> {
        self.process_file(path, FixMode::Check)
    }

    pub fn fix_file(&self, path: &Path, dry_run: bool) -> Result<FileReport> {
        let mode = if dry_run { FixMode::DryRun } else { FixMode::Write };
        self.process_file(path, mode)
    }

    pub fn process_file(&self, path: &Path, mode: FixMode) -> Result<FileReport> {
        let source = fs::read_to_string(path)?;
        let analysis = match self.analyze_source(&source) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                return Ok(FileReport::failed(path, e));
            }
        };

        let mut report = FileReport::from_analysis(path, &analysis);
        if mode != FixMode::Check {
            let rewritten = analysis.rewrite(&source)?;
            report.changed = rewritten != source;
            if report.changed && mode == FixMode::Write {
                fs::write(path, rewritten)?;
                report.written = true;
            }
        }

        info!(
            "{}: {} declarations, {} eligible",
            path.display(),
            report.outcomes.len(),
            report.eligible_count()
        );
        Ok(report)
    }

    /// Process files in parallel. Results keep the order of `paths`.
    pub fn process_files(&self, paths: &[PathBuf], mode: FixMode) -> Vec<(PathBuf, Result<FileReport>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.process_file(path, mode)))
            .collect()
    }
}
