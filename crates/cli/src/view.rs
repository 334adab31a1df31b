use std::path::Path;
use tabled::Tabled;
use varscope_api::models::{DeclarationOutcome, EligibilityVerdict};
use varscope_core::FileReport;

/// One declaration in the `check` table.
#[derive(Tabled)]
pub struct DeclarationView {
    pub location: String,
    pub name: String,
    #[tabled(rename = "type")]
    pub declared_type: String,
    pub verdict: String,
    pub detail: String,
}

impl DeclarationView {
    pub fn from_outcome(path: &Path, outcome: &DeclarationOutcome) -> Self {
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("-");
        let location = format!("{}:{}", filename, outcome.location.range.start_line + 1);

        let (verdict, detail) = match &outcome.verdict {
            EligibilityVerdict::Eligible { hint } => {
                let mut detail: Vec<String> = hint.notes.clone();
                if let Some(fill) = &hint.explicit_type_arguments {
                    detail.insert(0, format!("fill {}", fill.text));
                }
                let detail = if detail.is_empty() {
                    "-".to_string()
                } else {
                    detail.join("; ")
                };
                ("var".to_string(), detail)
            }
            EligibilityVerdict::Ineligible { reason, message } => {
                (reason.to_string(), message.clone())
            }
        };

        Self {
            location,
            name: outcome.name.clone(),
            declared_type: outcome.declared_type.clone(),
            verdict,
            detail,
        }
    }
}

/// Per-file line of the `fix` summary.
#[derive(Tabled)]
pub struct FileView {
    pub file: String,
    pub declarations: usize,
    pub eligible: usize,
    pub status: String,
}

impl FileView {
    pub fn from_report(report: &FileReport) -> Self {
        let status = match (&report.parse_error, report.written, report.changed) {
            (Some(e), _, _) => format!("parse error {e}"),
            (None, true, _) => "rewritten".to_string(),
            (None, false, true) => "would change".to_string(),
            (None, false, false) => "unchanged".to_string(),
        };
        Self {
            file: report.path.display().to_string(),
            declarations: report.outcomes.len(),
            eligible: report.eligible_count(),
            status,
        }
    }
}

#[derive(Tabled)]
pub struct OptionView {
    pub key: String,
    pub value: String,
    pub safest: String,
}
