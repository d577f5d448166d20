//! Cluster connection and request plumbing
//!
//! A [`Cluster`] wraps a blocking HTTP client pointed at one Treeline
//! instance. All calls are sequential and any failure aborts the operation;
//! there is no retry layer.

mod schemas;

pub use schemas::{
    ColumnInfo, ColumnType, ColumnTypeRequest, FrameInfo, HealthResponse, ImportRequest,
    JobStatus, JobStatusResponse, ModelParams, ModelSummary, ModelType, TrainRequest,
    TrainSubmitted, TreeSummary,
};

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, TreelineError};
use crate::frame::FrameHandle;
use crate::model::ModelHandle;

use schemas::ErrorBody;

/// How often a running training job is re-checked.
const JOB_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Connection to a running Treeline cluster.
pub struct Cluster {
    http: HttpClient,
    base: String,
    version: String,
}

impl Cluster {
    /// Connect to a cluster and verify it is healthy.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let base = format!("http://{}:{}", host, port);
        let http = HttpClient::new();

        let response = http
            .get(format!("{}/api/health", base))
            .send()
            .map_err(|e| {
                TreelineError::Connection(format!("cluster at {} is unreachable: {}", base, e))
            })?;
        let health: HealthResponse = decode(response)?;
        if health.status != "ok" {
            return Err(TreelineError::Connection(format!(
                "cluster at {} reported status '{}'",
                base, health.status
            )));
        }

        info!(url = %base, version = %health.version, "Connected to Treeline cluster");
        Ok(Self {
            http,
            base,
            version: health.version,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Server version reported at connect time.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Re-check cluster health.
    pub fn health(&self) -> Result<HealthResponse> {
        self.get("/api/health")
    }

    /// Ask the cluster to import a dataset from a path it can resolve.
    pub fn import_file(&self, path: &Path) -> Result<FrameHandle> {
        let request = ImportRequest {
            path: path.display().to_string(),
            destination_frame: Some(format!("frame_{}", short_id())),
        };
        let info: FrameInfo = self.post("/api/data/import", &request)?;
        info!(
            frame_id = %info.id,
            rows = info.rows,
            columns = info.columns.len(),
            "Imported frame"
        );
        Ok(FrameHandle::new(info))
    }

    /// Refetch a frame's schema by id.
    pub fn frame(&self, id: &str) -> Result<FrameHandle> {
        let info: FrameInfo = self.get(&format!("/api/frames/{}", id))?;
        Ok(FrameHandle::new(info))
    }

    /// Submit a training job and block until it finishes, then fetch the
    /// resulting model. A failed job surfaces as [`TreelineError::JobFailed`].
    pub fn train(&self, request: &TrainRequest) -> Result<ModelHandle> {
        let submitted: TrainSubmitted = self.post("/api/train", request)?;
        info!(
            job_id = %submitted.job_id,
            model_type = %request.model_type,
            target = %request.target,
            "Training job submitted"
        );

        let model_id = self.wait_for_job(&submitted.job_id)?;
        let summary: ModelSummary = self.get(&format!("/api/models/{}", model_id))?;
        info!(model_id = %summary.id, "Training finished");
        Ok(ModelHandle::new(summary))
    }

    fn wait_for_job(&self, job_id: &str) -> Result<String> {
        loop {
            let response: JobStatusResponse = self.get(&format!("/api/train/status/{}", job_id))?;
            match response.status {
                JobStatus::Pending => {}
                JobStatus::Running { progress, message } => {
                    debug!(job_id = %job_id, progress, message = %message, "Training in progress");
                }
                JobStatus::Completed { model_id } => return Ok(model_id),
                JobStatus::Failed { error } => return Err(TreelineError::JobFailed(error)),
            }
            std::thread::sleep(JOB_POLL_INTERVAL);
        }
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(format!("{}{}", self.base, path)).send()?;
        decode(response)
    }

    pub(crate) fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base, path))
            .json(body)
            .send()?;
        decode(response)
    }

    pub(crate) fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .http
            .put(format!("{}{}", self.base, path))
            .json(body)
            .send()?;
        decode(response)
    }
}

/// Decode a response, translating the cluster's `{"error": true, "message"}`
/// envelope into a typed error.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json()?)
    } else {
        let message = response
            .json::<ErrorBody>()
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        Err(TreelineError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn short_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}
