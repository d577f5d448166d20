//! Wire types for the cluster REST API

use serde::{Deserialize, Serialize};

/// `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `POST /api/data/import`
#[derive(Debug, Clone, Serialize)]
pub struct ImportRequest {
    /// Path the cluster resolves on its own filesystem.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_frame: Option<String>,
}

/// Column type as the cluster reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Text,
    Bool,
    Time,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: ColumnType,
    pub null_count: usize,
    pub unique_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameInfo {
    pub id: String,
    pub name: String,
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

/// `PUT /api/frames/:id/columns/:name`
#[derive(Debug, Clone, Serialize)]
pub struct ColumnTypeRequest {
    pub dtype: ColumnType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    DecisionTree,
    RandomForest,
    GradientBoosting,
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelType::DecisionTree => write!(f, "decision_tree"),
            ModelType::RandomForest => write!(f, "random_forest"),
            ModelType::GradientBoosting => write!(f, "gradient_boosting"),
        }
    }
}

/// `POST /api/train`
#[derive(Debug, Clone, Serialize)]
pub struct TrainRequest {
    pub frame_id: String,
    /// Feature columns; empty means every column except the target.
    pub features: Vec<String>,
    pub target: String,
    pub model_type: ModelType,
    pub ntrees: u32,
    pub max_depth: u32,
    pub nbins: u32,
}

impl TrainRequest {
    /// Random-forest request with the cluster's default hyperparameters.
    pub fn random_forest(frame_id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            frame_id: frame_id.into(),
            features: Vec::new(),
            target: target.into(),
            model_type: ModelType::RandomForest,
            ntrees: 50,
            max_depth: 20,
            nbins: 20,
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ntrees(mut self, ntrees: u32) -> Self {
        self.ntrees = ntrees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_nbins(mut self, nbins: u32) -> Self {
        self.nbins = nbins;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainSubmitted {
    pub job_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
}

/// Training job status, as serialized by the cluster
#[derive(Debug, Clone, Deserialize)]
pub enum JobStatus {
    Pending,
    Running { progress: f64, message: String },
    Completed { model_id: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelParams {
    pub ntrees: u32,
    pub max_depth: u32,
    pub nbins: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeSummary {
    pub index: u32,
    pub depth: u32,
    pub leaves: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSummary {
    pub id: String,
    pub name: String,
    pub model_type: ModelType,
    pub target: String,
    pub features: Vec<String>,
    pub params: ModelParams,
    #[serde(default)]
    pub metrics: serde_json::Value,
    #[serde(default)]
    pub trees: Vec<TreeSummary>,
}

/// Error envelope the cluster wraps failures in
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
