use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AdminGateway, ApiError, ReportDownload, RequestScope};

use super::catalog::{FilterField, ReportFormat, ReportKind};
use super::request::{FilterDraft, ReportPayload, ReportRequest};
use super::{ReportError, INVALID_FILE_TYPE};

/// A report written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub path: PathBuf,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportState {
    /// No report type chosen yet.
    #[default]
    Idle,
    /// A type is chosen and its filters are editable.
    Selected,
    Generating,
    Done(SavedReport),
    Failed(String),
}

/// Report panel state machine.
///
/// `Idle -> Selected -> Generating -> Done | Failed`; from `Done` or `Failed` the
/// filters stay editable and the report can be generated again.
pub struct ReportBuilder<G> {
    gateway: Arc<G>,
    scope: RequestScope,
    download_dir: PathBuf,
    kind: Option<ReportKind>,
    format: ReportFormat,
    draft: FilterDraft,
    state: ReportState,
}

impl<G> ReportBuilder<G>
where
    G: AdminGateway,
{
    pub fn new(gateway: Arc<G>, scope: RequestScope, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            gateway,
            scope,
            download_dir: download_dir.into(),
            kind: None,
            format: ReportFormat::default(),
            draft: FilterDraft::default(),
            state: ReportState::Idle,
        }
    }

    pub fn kind(&self) -> Option<ReportKind> {
        self.kind
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn draft(&self) -> &FilterDraft {
        &self.draft
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, ReportState::Generating)
    }

    /// Filters shown for the current selection.
    pub fn visible_filters(&self) -> &'static [FilterField] {
        self.kind.map(ReportKind::filters).unwrap_or(&[])
    }

    /// Choose a report type. The filter draft starts over.
    pub fn select(&mut self, kind: ReportKind) -> Result<(), ReportError> {
        if self.is_generating() {
            return Err(ReportError::Busy);
        }
        self.kind = Some(kind);
        self.draft = FilterDraft::default();
        self.state = ReportState::Selected;
        Ok(())
    }

    pub fn set_format(&mut self, format: ReportFormat) {
        self.format = format;
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) -> Result<(), ReportError> {
        let kind = self.kind.ok_or(ReportError::NoReportSelected)?;
        if !kind.filters().contains(&field) {
            return Err(ReportError::FilterNotAvailable {
                field: field.label(),
                report: kind,
            });
        }
        self.draft.set(field, value)
    }

    /// The body the next generation would post.
    pub fn payload(&self) -> Option<ReportPayload> {
        self.kind
            .map(|kind| ReportRequest::from_draft(kind, &self.draft).into_payload(self.format))
    }

    /// File name the download is saved under.
    pub fn file_name(&self) -> Option<String> {
        self.kind
            .map(|kind| format!("{}_report.{}", kind.value(), self.format.extension()))
    }

    /// Post the current selection and save the returned file in the download
    /// directory.
    pub async fn generate(&mut self) -> Result<SavedReport, ReportError> {
        if self.is_generating() {
            return Err(ReportError::Busy);
        }
        let (payload, file_name) = match (self.payload(), self.file_name()) {
            (Some(payload), Some(file_name)) => (payload, file_name),
            _ => return Err(ReportError::NoReportSelected),
        };

        let previous = mem::replace(&mut self.state, ReportState::Generating);
        let result = self.fetch(&payload).await;

        let outcome = match result {
            Ok(download) => save(&self.download_dir.join(&file_name), download).await,
            Err(ApiError::Cancelled) => {
                self.state = previous;
                return Err(ReportError::Api(ApiError::Cancelled));
            }
            Err(err) => Err(ReportError::Api(err)),
        };

        match outcome {
            Ok(saved) => {
                info!(
                    report = %payload.report_type,
                    output = payload.format.value(),
                    path = %saved.path.display(),
                    "report saved"
                );
                self.state = ReportState::Done(saved.clone());
                Ok(saved)
            }
            Err(err) => {
                warn!(report = %payload.report_type, error = %err, "report generation failed");
                self.state = ReportState::Failed(err.user_message());
                Err(err)
            }
        }
    }

    async fn fetch(&self, payload: &ReportPayload) -> Result<ReportDownload, ApiError> {
        let download = self.scope.run(self.gateway.generate_report(payload)).await?;
        if download.content_type.contains("application/") {
            return Ok(download);
        }

        let text = String::from_utf8_lossy(&download.bytes).trim().to_string();
        Err(ApiError::UnexpectedContentType(if text.is_empty() {
            INVALID_FILE_TYPE.to_string()
        } else {
            text
        }))
    }
}

async fn save(path: &Path, download: ReportDownload) -> Result<SavedReport, ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, &download.bytes)
        .await
        .map_err(io_error)?;

    Ok(SavedReport {
        path: path.to_path_buf(),
        content_type: download.content_type,
        size: download.bytes.len(),
    })
}

impl<G> Drop for ReportBuilder<G> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
