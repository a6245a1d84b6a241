// Series domain model
use crate::domain::metric::{Metric, MetricWire};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// Ordered collection of metrics keyed by name, the unit the API
/// accepts for metric submission.
///
/// Adding a metric whose name is already present silently replaces the
/// earlier entry.
#[derive(Debug, Clone, Default)]
pub struct Series {
    metrics: IndexMap<String, Metric>,
}

/// Wire shape of a series payload.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesWire {
    pub series: Vec<MetricWire>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.values()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn add_metric(&mut self, metric: Metric) {
        self.metrics.insert(metric.name().to_string(), metric);
    }

    pub fn add_metrics(&mut self, metrics: impl IntoIterator<Item = Metric>) {
        for metric in metrics {
            self.add_metric(metric);
        }
    }

    pub fn get_metric(&self, name: &str) -> Result<&Metric> {
        self.metrics
            .get(name)
            .ok_or_else(|| Error::MetricNotFound(name.to_string()))
    }

    /// Remove and return a metric by name.
    pub fn remove_metric(&mut self, name: &str) -> Result<Metric> {
        self.metrics
            .shift_remove(name)
            .ok_or_else(|| Error::MetricNotFound(name.to_string()))
    }

    /// Clearing an already empty series is a no-op, not an error.
    pub fn remove_metrics(&mut self) {
        self.metrics.clear();
    }

    /// Replace all metrics.
    pub fn set_metrics(&mut self, metrics: Vec<Metric>) {
        self.remove_metrics();
        self.add_metrics(metrics);
    }

    pub fn to_wire_format(&self) -> SeriesWire {
        SeriesWire {
            series: self.metrics.values().map(Metric::to_wire_format).collect(),
        }
    }
}

impl From<Metric> for Series {
    fn from(metric: Metric) -> Self {
        let mut series = Series::new();
        series.add_metric(metric);
        series
    }
}

impl From<Vec<Metric>> for Series {
    fn from(metrics: Vec<Metric>) -> Self {
        let mut series = Series::new();
        series.add_metrics(metrics);
        series
    }
}
