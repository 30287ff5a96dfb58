//! Write-once, timestamped report and checklist files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::checklist::render_checklist;
use crate::error::AuditError;
use crate::report::AuditReport;

/// Paths of the artifacts one audit run produced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuditArtifacts {
    pub report: PathBuf,
    pub checklist: PathBuf,
}

/// Write `report` as `<out_dir>/audit-<ts>.json` and its checklist as
/// `<tasklist_dir>/remediation-<ts>.md`.
///
/// # Errors
///
/// Returns `AuditError::Artifact` on any filesystem failure and
/// `AuditError::Serialize` if the report cannot be encoded.
pub fn write_artifacts(
    report: &AuditReport,
    out_dir: &Path,
    tasklist_dir: &Path,
) -> Result<AuditArtifacts, AuditError> {
    let stamp = report.generated_at.format("%Y%m%dT%H%M%S%.3fZ").to_string();
    let body = serde_json::to_vec_pretty(report)?;
    let report_path = write_once(out_dir, &format!("audit-{stamp}"), "json", &body)?;
    let checklist = render_checklist(report);
    let checklist_path = write_once(
        tasklist_dir,
        &format!("remediation-{stamp}"),
        "md",
        checklist.as_bytes(),
    )?;
    tracing::info!(
        report = %report_path.display(),
        checklist = %checklist_path.display(),
        "audit artifacts written"
    );
    Ok(AuditArtifacts {
        report: report_path,
        checklist: checklist_path,
    })
}

/// Create `dir/stem.ext`, adding `-N` to the stem while the name is taken.
fn write_once(dir: &Path, stem: &str, ext: &str, body: &[u8]) -> Result<PathBuf, AuditError> {
    std::fs::create_dir_all(dir).map_err(|source| AuditError::Artifact {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut suffix = 0u32;
    loop {
        let path = if suffix == 0 {
            dir.join(format!("{stem}.{ext}"))
        } else {
            dir.join(format!("{stem}-{suffix}.{ext}"))
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(body)
                    .and_then(|()| file.sync_all())
                    .map_err(|source| AuditError::Artifact {
                        path: path.clone(),
                        source,
                    })?;
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => suffix += 1,
            Err(source) => return Err(AuditError::Artifact { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::report::{AuditSettings, Rollup};

    fn report() -> AuditReport {
        AuditReport {
            generated_at: Utc::now(),
            oracle_version: "rules-v1".into(),
            settings: AuditSettings::default(),
            totals: Rollup::default(),
            families: Vec::new(),
        }
    }

    #[test]
    fn writes_both_files_and_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let tasks = dir.path().join("reports/tasks");
        let r = report();

        let first = write_artifacts(&r, &out, &tasks).unwrap();
        let second = write_artifacts(&r, &out, &tasks).unwrap();

        assert_ne!(first.report, second.report);
        assert_ne!(first.checklist, second.checklist);
        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&first.report).unwrap()).unwrap();
        assert_eq!(json["oracle_version"], "rules-v1");
        let md = std::fs::read_to_string(&second.checklist).unwrap();
        assert!(md.starts_with("# Quiz remediation checklist"));
        assert!(
            first
                .checklist
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("remediation-")
        );
    }
}
