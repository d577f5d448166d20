//! Remote model handles

use std::fmt;

use colored::*;

use crate::client::ModelSummary;

/// Handle to a trained model living on the cluster.
pub struct ModelHandle {
    summary: ModelSummary,
}

impl ModelHandle {
    pub(crate) fn new(summary: ModelSummary) -> Self {
        Self { summary }
    }

    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn summary(&self) -> &ModelSummary {
        &self.summary
    }

    /// Print a human-readable description of the model to stdout.
    pub fn show(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f)?;
        writeln!(f, "{}", format!("Model: {}", s.name).bold())?;
        writeln!(f, "{}", "─".repeat(50))?;
        writeln!(f, "{:<16} {}", "Id", s.id)?;
        writeln!(f, "{:<16} {}", "Type", s.model_type)?;
        writeln!(f, "{:<16} {}", "Target", s.target)?;
        writeln!(f, "{:<16} {}", "Features", s.features.join(", "))?;

        writeln!(f)?;
        writeln!(f, "{}", "Parameters".bold())?;
        writeln!(f, "{}", "─".repeat(50))?;
        writeln!(f, "{:<16} {}", "Trees", s.params.ntrees)?;
        writeln!(f, "{:<16} {}", "Max depth", s.params.max_depth)?;
        writeln!(f, "{:<16} {}", "Histogram bins", s.params.nbins)?;

        if let Some(metrics) = s.metrics.as_object() {
            if !metrics.is_empty() {
                writeln!(f)?;
                writeln!(f, "{}", "Metrics".bold())?;
                writeln!(f, "{}", "─".repeat(50))?;
                for (key, value) in metrics {
                    writeln!(f, "{:<16} {}", key, render_metric(value))?;
                }
            }
        }

        if !s.trees.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", "Trees".bold())?;
            writeln!(f, "{}", "─".repeat(50))?;
            writeln!(f, "{:<8} {:>8} {:>8}", "Tree", "Depth", "Leaves")?;
            for tree in &s.trees {
                writeln!(f, "{:<8} {:>8} {:>8}", tree.index, tree.depth, tree.leaves)?;
            }
        }

        Ok(())
    }
}

fn render_metric(value: &serde_json::Value) -> String {
    match value.as_f64() {
        Some(v) => format!("{:.4}", v),
        None => value.to_string(),
    }
}
