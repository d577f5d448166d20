//! The big-categorical forest smoke test
//!
//! The training set has 100 categories, cat001 through cat100. Odd categories
//! are perfect predictors of y = 1, even categories of y = 0. Training a
//! single depth-1 tree with one histogram bin per category exercises the
//! cluster's naive-split path over a wide categorical feature.

use std::path::Path;

use crate::client::{Cluster, TrainRequest};
use crate::error::Result;

/// Default dataset, resolved with [`crate::harness::locate`].
pub const BIGCAT_DATA: &str = "data/bigcat_5000x2.csv";

/// Import the big-categorical dataset, make the label categorical, train a
/// single-tree forest, and print the model.
pub fn bigcat_forest(cluster: &Cluster, data: &Path) -> Result<()> {
    let mut bigcat = cluster.import_file(data)?;
    bigcat.to_categorical(cluster, "y")?;

    let request = TrainRequest::random_forest(bigcat.id(), "y")
        .with_features(["X"])
        .with_ntrees(1)
        .with_max_depth(1)
        .with_nbins(100);
    let model = cluster.train(&request)?;
    model.show();

    Ok(())
}
