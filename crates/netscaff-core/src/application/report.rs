//! Results reported back to API and CLI clients.

use std::path::PathBuf;

use serde::Serialize;

use crate::application::ports::ArchiveSummary;
use crate::domain::DomainError;
use crate::error::ScaffError;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
    Created,
    Overwritten,
    /// Destination existed and `force` was off.
    Skipped,
    /// Registration lines were inserted.
    Patched,
    /// Every registration line was already present.
    Unchanged,
    Removed,
}

/// A file touched by a step, relative to the solution directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }
}

/// Result of one generation step.
///
/// A failed step carries the error message; the pipeline keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub resource: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<GeneratedFile>,
}

impl StepResult {
    pub fn succeeded(resource: impl Into<String>, files: Vec<GeneratedFile>) -> Self {
        let written = files
            .iter()
            .filter(|f| {
                matches!(
                    f.outcome,
                    FileOutcome::Created | FileOutcome::Overwritten | FileOutcome::Patched
                )
            })
            .count();
        let message = match (written, files.len()) {
            (0, 0) => "Nothing to do".to_string(),
            (0, _) => "Up to date".to_string(),
            (n, _) => format!("Wrote {n} file(s)"),
        };
        Self {
            resource: resource.into(),
            success: true,
            message,
            files,
        }
    }

    pub fn failed(resource: impl Into<String>, error: &ScaffError) -> Self {
        Self {
            resource: resource.into(),
            success: false,
            message: error.user_message(),
            files: Vec::new(),
        }
    }

    /// Run `step`, turning an error into a failed result.
    pub fn capture<F>(resource: impl Into<String>, step: F) -> Self
    where
        F: FnOnce() -> Result<Vec<GeneratedFile>, ScaffError>,
    {
        let resource = resource.into();
        match step() {
            Ok(files) => Self::succeeded(resource, files),
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "Generation step failed");
                Self::failed(resource, &e)
            }
        }
    }

    /// Fold several steps into one result for a single-resource route.
    pub fn merge(resource: impl Into<String>, steps: Vec<StepResult>) -> Self {
        let resource = resource.into();
        let failures: Vec<String> = steps
            .iter()
            .filter(|s| !s.success)
            .map(|s| format!("{}: {}", s.resource, s.message))
            .collect();
        let files: Vec<GeneratedFile> = steps.into_iter().flat_map(|s| s.files).collect();

        if failures.is_empty() {
            Self::succeeded(resource, files)
        } else {
            Self {
                resource,
                success: false,
                message: failures.join("; "),
                files,
            }
        }
    }
}

/// Outcome of a full scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldReport {
    pub project: String,
    pub solution_dir: PathBuf,
    /// True only when every step succeeded.
    pub success: bool,
    pub steps: Vec<StepResult>,
}

impl ScaffoldReport {
    pub fn new(project: impl Into<String>, solution_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            solution_dir: solution_dir.into(),
            success: true,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: StepResult) {
        self.success &= step.success;
        self.steps.push(step);
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.success)
    }

    pub fn file_count(&self) -> usize {
        self.steps.iter().map(|s| s.files.len()).sum()
    }
}

/// Response of the validate route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_violations(violations: &[DomainError]) -> Self {
        let errors: Vec<String> = violations.iter().map(ToString::to_string).collect();
        let message = match errors.len() {
            0 => "Request is valid".to_string(),
            1 => "Request has 1 problem".to_string(),
            n => format!("Request has {n} problems"),
        };
        Self {
            success: errors.is_empty(),
            message,
            errors,
        }
    }
}

/// A scaffolded solution packed into an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedProject {
    pub report: ScaffoldReport,
    pub archive: ArchiveSummary,
    /// Download name, `{Name}.zip`.
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;

    #[test]
    fn capture_records_failures_without_propagating() {
        let step = StepResult::capture("Entity Product", || {
            Err(ApplicationError::TemplateNotFound {
                key: "domain/entity.cs.hbs".into(),
            }
            .into())
        });

        assert!(!step.success);
        assert_eq!(step.message, "Template not found: domain/entity.cs.hbs");
    }

    #[test]
    fn report_success_requires_every_step() {
        let mut report = ScaffoldReport::new("Shop", "/out/Shop");
        report.push(StepResult::succeeded(
            "a",
            vec![GeneratedFile::new("a.cs", FileOutcome::Created)],
        ));
        assert!(report.success);

        report.push(StepResult::failed(
            "b",
            &ScaffError::Internal {
                message: "x".into(),
            },
        ));
        assert!(!report.success);
        assert_eq!(report.failed_steps().count(), 1);
        assert_eq!(report.file_count(), 1);
    }

    #[test]
    fn merge_keeps_files_and_joins_failures() {
        let merged = StepResult::merge(
            "Repository Product",
            vec![
                StepResult::succeeded("x", vec![GeneratedFile::new("x.cs", FileOutcome::Skipped)]),
                StepResult::failed(
                    "y",
                    &ScaffError::Internal {
                        message: "bad".into(),
                    },
                ),
            ],
        );

        assert!(!merged.success);
        assert_eq!(merged.message, "y: bad");
        assert_eq!(merged.files.len(), 1);
    }

    #[test]
    fn succeeded_message_counts_written_files() {
        let step = StepResult::succeeded(
            "Commands Product",
            vec![
                GeneratedFile::new("a.cs", FileOutcome::Created),
                GeneratedFile::new("b.cs", FileOutcome::Skipped),
            ],
        );
        assert_eq!(step.message, "Wrote 1 file(s)");

        let unchanged =
            StepResult::succeeded("x", vec![GeneratedFile::new("a.cs", FileOutcome::Skipped)]);
        assert_eq!(unchanged.message, "Up to date");
    }

    #[test]
    fn validation_report_from_violations() {
        let report = ValidationReport::from_violations(&[DomainError::NoEntities]);
        assert!(!report.success);
        assert_eq!(report.errors, vec!["Request has no entities".to_string()]);
        assert!(ValidationReport::from_violations(&[]).success);
    }
}
