//! In-process stand-in for a Treeline cluster.
//!
//! Implements just enough of the REST surface for the client to exercise a
//! full import → mutate → train → fetch sequence. Captured train requests are
//! exposed so tests can assert on the exact parameters the client sent.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use polars::prelude::*;
use serde_json::{json, Value};

pub struct MockFrame {
    pub name: String,
    pub df: DataFrame,
}

pub struct MockJob {
    polls_left: u32,
    outcome: Result<String, String>,
}

#[derive(Default)]
pub struct MockState {
    pub frames: Mutex<HashMap<String, MockFrame>>,
    pub jobs: Mutex<HashMap<String, MockJob>>,
    pub models: Mutex<HashMap<String, Value>>,
    pub train_requests: Mutex<Vec<Value>>,
}

impl MockState {
    /// The most recent train request the client sent, if any.
    pub fn last_train_request(&self) -> Option<Value> {
        self.train_requests.lock().unwrap().last().cloned()
    }

    /// The dtype of a column as the stand-in currently holds it.
    pub fn column_dtype(&self, frame_id: &str, column: &str) -> Option<DataType> {
        let frames = self.frames.lock().unwrap();
        let frame = frames.get(frame_id)?;
        frame.df.column(column).ok().map(|c| c.dtype().clone())
    }
}

pub struct MockCluster {
    pub host: String,
    pub port: u16,
    pub state: Arc<MockState>,
}

/// Start a stand-in cluster on an ephemeral port and return its address
/// together with a handle on the shared state.
pub fn spawn() -> MockCluster {
    let state = Arc::new(MockState::default());
    let router = build_router(state.clone());
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    let addr = rx.recv().unwrap();
    MockCluster {
        host: addr.ip().to_string(),
        port: addr.port(),
        state,
    }
}

fn build_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/data/import", post(import_data))
        .route("/api/frames/:id", get(get_frame))
        .route("/api/frames/:id/columns/:name", put(set_column_type))
        .route("/api/train", post(start_training))
        .route("/api/train/status/:job_id", get(job_status))
        .route("/api/models/:model_id", get(get_model))
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": true, "message": message}))).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

fn frame_info(id: &str, name: &str, df: &DataFrame) -> Value {
    let columns: Vec<Value> = df
        .get_columns()
        .iter()
        .map(|col| {
            let dtype = match col.dtype() {
                DataType::Categorical(_, _) => "categorical",
                DataType::String => "text",
                DataType::Boolean => "bool",
                DataType::Date | DataType::Time | DataType::Datetime(_, _) => "time",
                _ => "numeric",
            };
            json!({
                "name": col.name().to_string(),
                "dtype": dtype,
                "null_count": col.null_count(),
                "unique_count": col.n_unique().unwrap_or(0),
            })
        })
        .collect();

    json!({"id": id, "name": name, "rows": df.height(), "columns": columns})
}

async fn import_data(State(state): State<Arc<MockState>>, Json(request): Json<Value>) -> Response {
    let Some(path) = request.get("path").and_then(Value::as_str) else {
        return error_response(StatusCode::BAD_REQUEST, "missing path");
    };
    if !std::path::Path::new(path).exists() {
        return error_response(StatusCode::NOT_FOUND, &format!("File not found: {}", path));
    }

    let df = match CsvReadOptions::default()
        .with_infer_schema_length(Some(1000))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => df,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let id = request
        .get("destination_frame")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("frame_{}", state.frames.lock().unwrap().len()));
    let name = std::path::Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame")
        .to_string();

    let info = frame_info(&id, &name, &df);
    state
        .frames
        .lock()
        .unwrap()
        .insert(id, MockFrame { name, df });
    Json(info).into_response()
}

async fn get_frame(State(state): State<Arc<MockState>>, UrlPath(id): UrlPath<String>) -> Response {
    let frames = state.frames.lock().unwrap();
    match frames.get(&id) {
        Some(frame) => Json(frame_info(&id, &frame.name, &frame.df)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, &format!("Frame not found: {}", id)),
    }
}

async fn set_column_type(
    State(state): State<Arc<MockState>>,
    UrlPath((id, column)): UrlPath<(String, String)>,
    Json(request): Json<Value>,
) -> Response {
    if request.get("dtype").and_then(Value::as_str) != Some("categorical") {
        return error_response(
            StatusCode::BAD_REQUEST,
            "only categorical reinterpretation is supported",
        );
    }

    let mut frames = state.frames.lock().unwrap();
    let Some(frame) = frames.get_mut(&id) else {
        return error_response(StatusCode::NOT_FOUND, &format!("Frame not found: {}", id));
    };

    let casted = match frame.df.column(&column) {
        Ok(col) => col.cast(&DataType::Categorical(None, CategoricalOrdering::Physical)),
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Column not found: {}", column),
            )
        }
    };
    let casted = match casted {
        Ok(col) => col,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    if let Err(e) = frame.df.with_column(casted) {
        return error_response(StatusCode::BAD_REQUEST, &e.to_string());
    }

    Json(frame_info(&id, &frame.name, &frame.df)).into_response()
}

async fn start_training(
    State(state): State<Arc<MockState>>,
    Json(request): Json<Value>,
) -> Response {
    state.train_requests.lock().unwrap().push(request.clone());

    let frame_id = request
        .get("frame_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let target = request
        .get("target")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let features: Vec<String> = request
        .get("features")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let frames = state.frames.lock().unwrap();
    let Some(frame) = frames.get(&frame_id) else {
        return error_response(StatusCode::NOT_FOUND, &format!("Frame not found: {}", frame_id));
    };

    let column_names: Vec<String> = frame
        .df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for feature in &features {
        if !column_names.contains(feature) {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Unknown feature column: {}", feature),
            );
        }
    }

    // Target validation happens "during" the job, so a bad target exercises
    // the client's failed-job path rather than the request-rejected path.
    let outcome = if column_names.contains(&target) {
        let model_type = request
            .get("model_type")
            .and_then(Value::as_str)
            .unwrap_or("random_forest");
        let ntrees = request.get("ntrees").and_then(Value::as_u64).unwrap_or(50);
        let max_depth = request.get("max_depth").and_then(Value::as_u64).unwrap_or(20);
        let nbins = request.get("nbins").and_then(Value::as_u64).unwrap_or(20);

        let model_id = format!("model_{}", state.models.lock().unwrap().len());
        let trees: Vec<Value> = (0..ntrees)
            .map(|i| {
                json!({
                    "index": i,
                    "depth": max_depth,
                    "leaves": 1u64 << max_depth.min(16),
                })
            })
            .collect();
        let model = json!({
            "id": model_id,
            "name": format!("{}_{}", model_type, frame_id),
            "model_type": model_type,
            "target": target,
            "features": features,
            "params": {"ntrees": ntrees, "max_depth": max_depth, "nbins": nbins},
            "metrics": {"accuracy": 1.0},
            "trees": trees,
        });
        state
            .models
            .lock()
            .unwrap()
            .insert(model_id.clone(), model);
        Ok(model_id)
    } else {
        Err(format!("Column not found: {}", target))
    };

    let job_id = format!("job_{}", state.jobs.lock().unwrap().len());
    state.jobs.lock().unwrap().insert(
        job_id.clone(),
        MockJob {
            polls_left: 1,
            outcome,
        },
    );

    Json(json!({"job_id": job_id})).into_response()
}

async fn job_status(
    State(state): State<Arc<MockState>>,
    UrlPath(job_id): UrlPath<String>,
) -> Response {
    let mut jobs = state.jobs.lock().unwrap();
    let Some(job) = jobs.get_mut(&job_id) else {
        return error_response(StatusCode::NOT_FOUND, &format!("Job not found: {}", job_id));
    };

    if job.polls_left > 0 {
        job.polls_left -= 1;
        return Json(json!({
            "job_id": job_id,
            "status": {"Running": {"progress": 0.5, "message": "training"}},
        }))
        .into_response();
    }

    let status = match &job.outcome {
        Ok(model_id) => json!({"Completed": {"model_id": model_id}}),
        Err(error) => json!({"Failed": {"error": error}}),
    };
    Json(json!({"job_id": job_id, "status": status})).into_response()
}

async fn get_model(
    State(state): State<Arc<MockState>>,
    UrlPath(model_id): UrlPath<String>,
) -> Response {
    let models = state.models.lock().unwrap();
    match models.get(&model_id) {
        Some(model) => Json(model.clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, &format!("Model not found: {}", model_id)),
    }
}
