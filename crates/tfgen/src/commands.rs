//! Command implementations.

use crate::cli::GenerateArgs;
use crate::errors::{CliError, Result};
use crate::model::ModelFile;
use crate::sync::{FileStatus, dry_run_status, write_file};
use std::path::{Path, PathBuf};
use tfgen_emitter::{DOCUMENT_FILE_NAME, FeatureFlags, assemble};
use tracing::instrument;

/// How generated files are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write changed files.
    Write,
    /// Report what would change.
    DryRun,
    /// Report what would change and fail if anything would.
    Check,
}

impl From<&GenerateArgs> for WriteMode {
    fn from(args: &GenerateArgs) -> Self {
        if args.check {
            Self::Check
        } else if args.dry_run {
            Self::DryRun
        } else {
            Self::Write
        }
    }
}

/// Outcome for one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path relative to the output directory.
    pub path: String,
    /// What happened to it.
    pub status: FileStatus,
}

/// Outcome of a generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Every generated file, in path order.
    pub files: Vec<FileReport>,
}

impl GenerateReport {
    /// Number of files with the given status.
    #[must_use]
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

/// Load a model and assemble its files in memory.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or the document cannot be
/// assembled.
pub fn render_files(input: &Path, features: FeatureFlags) -> Result<Vec<(String, Vec<u8>)>> {
    let mut ctx = ModelFile::load(input)?.into_context(features)?;
    assemble(&mut ctx)?;
    Ok(ctx.into_files().into_iter().collect())
}

/// Load a model and return the rendered document.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or the document cannot be
/// assembled.
pub fn render_document_text(input: &Path, features: FeatureFlags) -> Result<String> {
    render_files(input, features)?
        .into_iter()
        .find(|(path, _)| path == DOCUMENT_FILE_NAME)
        .map(|(_, bytes)| String::from_utf8_lossy(&bytes).into_owned())
        .ok_or_else(|| CliError::invalid_model("no document was generated"))
}

/// Generate all files for a model into `out_dir`.
///
/// # Errors
///
/// Returns an error if generation or file I/O fails, and
/// [`CliError::OutOfDate`] in check mode when any file would change.
#[instrument(
    name = "generate",
    skip_all,
    fields(input = %input.display(), out_dir = %out_dir.display())
)]
pub fn run_generate(
    input: &Path,
    out_dir: &Path,
    mode: WriteMode,
    features: FeatureFlags,
) -> Result<GenerateReport> {
    let files = render_files(input, features)?;

    let mut report = GenerateReport::default();
    for (path, content) in files {
        let target: PathBuf = out_dir.join(&path);
        let status = match mode {
            WriteMode::Write => write_file(&target, &content)?,
            WriteMode::DryRun | WriteMode::Check => dry_run_status(&target, &content)?,
        };
        tracing::info!(path = %path, status = %status, "Processed generated file");
        report.files.push(FileReport { path, status });
    }

    if mode == WriteMode::Check {
        let pending: Vec<String> = report
            .files
            .iter()
            .filter(|f| f.status.is_pending())
            .map(|f| f.path.clone())
            .collect();
        if !pending.is_empty() {
            return Err(CliError::OutOfDate { paths: pending });
        }
    }

    Ok(report)
}

/// Generate using parsed CLI arguments.
///
/// # Errors
///
/// See [`run_generate`].
pub fn generate(args: &GenerateArgs) -> Result<GenerateReport> {
    run_generate(
        &args.input,
        &args.out_dir,
        WriteMode::from(args),
        FeatureFlags {
            spotinst: args.spotinst,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MODEL: &str = r#"{
        "provider": { "cloud": "aws", "region": "us-east-1" },
        "resources": [
            { "type": "aws_iam_role", "name": "masters.example.com", "item": { "name": "masters" } }
        ],
        "files": [
            { "resourceType": "aws_iam_role", "resourceName": "masters.example.com",
              "key": "policy", "content": "{}", "attribute": "assume_role_policy" }
        ]
    }"#;

    fn write_model(dir: &Path) -> PathBuf {
        let path = dir.join("model.json");
        std::fs::write(&path, MODEL).unwrap();
        path
    }

    #[test]
    fn test_write_mode_from_args() {
        let args = GenerateArgs {
            input: PathBuf::from("m.json"),
            out_dir: PathBuf::from("."),
            dry_run: true,
            check: false,
            spotinst: false,
            stdout: false,
        };
        assert_eq!(WriteMode::from(&args), WriteMode::DryRun);
        assert_eq!(
            WriteMode::from(&GenerateArgs { check: true, dry_run: false, ..args.clone() }),
            WriteMode::Check
        );
        assert_eq!(
            WriteMode::from(&GenerateArgs { dry_run: false, ..args }),
            WriteMode::Write
        );
    }

    #[test]
    fn test_generate_writes_document_and_data() {
        let temp = TempDir::new().unwrap();
        let input = write_model(temp.path());
        let out = temp.path().join("out");

        let report = run_generate(&input, &out, WriteMode::Write, FeatureFlags::default()).unwrap();

        assert_eq!(report.count(FileStatus::Created), 2);
        let document = std::fs::read_to_string(out.join("kubernetes.tf")).unwrap();
        assert!(document.contains("resource \"aws_iam_role\" \"masters_example_com\" {"));
        let data = "data/aws_iam_role_masters_example_com_policy";
        assert!(document.contains(&format!(
            "assume_role_policy = file(\"${{path.module}}/{data}\")"
        )));
        assert_eq!(std::fs::read_to_string(out.join(data)).unwrap(), "{}");
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let input = write_model(temp.path());
        let out = temp.path().join("out");

        run_generate(&input, &out, WriteMode::Write, FeatureFlags::default()).unwrap();
        let report = run_generate(&input, &out, WriteMode::Write, FeatureFlags::default()).unwrap();
        assert_eq!(report.count(FileStatus::Unchanged), 2);
    }

    #[test]
    fn test_dry_run_reports_would_create() {
        let temp = TempDir::new().unwrap();
        let input = write_model(temp.path());
        let out = temp.path().join("out");

        let report =
            run_generate(&input, &out, WriteMode::DryRun, FeatureFlags::default()).unwrap();
        assert_eq!(report.count(FileStatus::WouldCreate), 2);
        assert!(!out.exists());
    }

    #[test]
    fn test_check_fails_on_drift() {
        let temp = TempDir::new().unwrap();
        let input = write_model(temp.path());
        let out = temp.path().join("out");

        let err =
            run_generate(&input, &out, WriteMode::Check, FeatureFlags::default()).unwrap_err();
        assert!(matches!(err, CliError::OutOfDate { ref paths } if paths.len() == 2));

        run_generate(&input, &out, WriteMode::Write, FeatureFlags::default()).unwrap();
        run_generate(&input, &out, WriteMode::Check, FeatureFlags::default()).unwrap();
    }

    #[test]
    fn test_render_document_text() {
        let temp = TempDir::new().unwrap();
        let input = write_model(temp.path());

        let text = render_document_text(&input, FeatureFlags { spotinst: true }).unwrap();
        assert!(text.starts_with("provider \"aws\" {"));
        assert!(text.contains("\"spotinst/spotinst\""));
    }

    #[test]
    fn test_file_keys_cannot_escape_out_dir() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("model.json");
        std::fs::write(
            &input,
            r#"{
                "provider": { "cloud": "aws", "region": "us-east-1" },
                "files": [
                    { "resourceType": "../t", "resourceName": "n", "key": "../../evil",
                      "content": "x" }
                ]
            }"#,
        )
        .unwrap();
        let out = temp.path().join("nested").join("out");

        let report = run_generate(&input, &out, WriteMode::Write, FeatureFlags::default()).unwrap();

        let data: Vec<_> = report.files.iter().filter(|f| f.path.starts_with("data/")).collect();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].path, "data/___t_n_______evil");
        assert!(out.join(&data[0].path).is_file());
        assert!(!temp.path().join("evil").exists());
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        let err = render_files(&missing, FeatureFlags::default()).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
