//! Treeline cluster client
//!
//! Blocking client for the Treeline analytics cluster REST API, plus the
//! smoke-test harness built on top of it. The cluster does the heavy lifting
//! (parsing, training, model storage); this crate sequences calls against it
//! and renders the results.
//!
//! # Modules
//!
//! - [`client`] - Cluster connection and request plumbing
//! - [`frame`] - Remote dataset handles
//! - [`model`] - Remote model handles
//! - [`harness`] - Test runner and dataset locator
//! - [`smoke`] - The big-categorical forest smoke test
//! - [`cli`] - Command-line interface

pub mod error;

pub mod client;
pub mod frame;
pub mod model;

pub mod harness;
pub mod smoke;

pub mod cli;

pub use error::{Result, TreelineError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{Cluster, ColumnType, ModelType, TrainRequest};
    pub use crate::error::{Result, TreelineError};
    pub use crate::frame::FrameHandle;
    pub use crate::model::ModelHandle;
}
