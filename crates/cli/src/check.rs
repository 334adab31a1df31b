use crate::OutputFormat;
use crate::view::DeclarationView;
use anyhow::Context;
use std::path::PathBuf;
use tabled::{Table, settings::Style};
use varscope_core::{FileReport, FixMode, LoadedConfig, Refactorer, Scanner};

pub fn run(paths: &[PathBuf], config: &LoadedConfig, format: OutputFormat) -> anyhow::Result<()> {
    let files = Scanner::collect_java_files(paths);
    tracing::info!("checking {} Java files", files.len());

    let refactorer = Refactorer::new(config.options.clone());
    let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());
    for (path, result) in refactorer.process_files(&files, FixMode::Check) {
        let report = result.with_context(|| format!("failed to check {}", path.display()))?;
        reports.push(report);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            let rows: Vec<DeclarationView> = reports
                .iter()
                .flat_map(|r| r.outcomes.iter().map(|o| DeclarationView::from_outcome(&r.path, o)))
                .collect();
            if !rows.is_empty() {
                println!("{}", Table::new(&rows).with(Style::psql()));
            }
            for report in &reports {
                if let Some(e) = &report.parse_error {
                    eprintln!("{}: no suggestions ({e})", report.path.display());
                }
            }
            let total: usize = reports.iter().map(|r| r.outcomes.len()).sum();
            let eligible: usize = reports.iter().map(FileReport::eligible_count).sum();
            println!(
                "{} files, {} declarations, {} can use var",
                reports.len(),
                total,
                eligible
            );
        }
    }
    Ok(())
}
