use crate::view::FileView;
use anyhow::Context;
use std::path::PathBuf;
use tabled::{Table, settings::Style};
use varscope_core::{FixMode, LoadedConfig, Refactorer, Scanner};

pub fn run(paths: &[PathBuf], config: &LoadedConfig, dry_run: bool) -> anyhow::Result<()> {
    let files = Scanner::collect_java_files(paths);
    let mode = if dry_run { FixMode::DryRun } else { FixMode::Write };
    tracing::info!("fixing {} Java files ({:?})", files.len(), mode);

    let refactorer = Refactorer::new(config.options.clone());
    let mut rows = Vec::with_capacity(files.len());
    for (path, result) in refactorer.process_files(&files, mode) {
        let report = result.with_context(|| format!("failed to fix {}", path.display()))?;
        rows.push(FileView::from_report(&report));
    }

    if rows.is_empty() {
        println!("no Java files found");
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
    }
    Ok(())
}
