// Metric domain model
use crate::domain::clock::{Clock, SystemClock};
use crate::error::Error;
use indexmap::IndexMap;
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Metric types accepted by the ingestion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricType {
    #[default]
    Gauge,
    Counter,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
            MetricType::Counter => "counter",
        }
    }
}

impl FromStr for MetricType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gauge" => Ok(MetricType::Gauge),
            "counter" => Ok(MetricType::Counter),
            other => Err(Error::InvalidMetricType(other.to_string())),
        }
    }
}

/// A sampled value. The integer/float distinction is preserved so that
/// integer samples serialize as JSON integers on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointValue {
    Integer(i64),
    Float(f64),
}

impl From<i64> for PointValue {
    fn from(v: i64) -> Self {
        PointValue::Integer(v)
    }
}

impl From<i32> for PointValue {
    fn from(v: i32) -> Self {
        PointValue::Integer(v as i64)
    }
}

impl From<f64> for PointValue {
    fn from(v: f64) -> Self {
        PointValue::Float(v)
    }
}

impl Serialize for PointValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PointValue::Integer(v) => serializer.serialize_i64(*v),
            PointValue::Float(v) => serializer.serialize_f64(*v),
        }
    }
}

/// A single (timestamp, value) sample. Serializes as the two-element
/// array `[timestamp, value]` the API expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub timestamp: i64,
    pub value: PointValue,
}

impl Point {
    pub fn new(timestamp: i64, value: impl Into<PointValue>) -> Self {
        Self {
            timestamp,
            value: value.into(),
        }
    }

    /// Build a point stamped with the clock's current time.
    pub fn now(value: impl Into<PointValue>, clock: &dyn Clock) -> Self {
        Self::new(clock.epoch_seconds(), value)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.timestamp)?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

/// A named, typed time series of points with optional host and tags.
///
/// A metric with zero points is valid in memory; emptiness is only an
/// error when the client is asked to send it.
#[derive(Debug, Clone)]
pub struct Metric {
    name: String,
    metric_type: MetricType,
    host: Option<String>,
    tags: IndexMap<String, String>,
    points: Vec<Point>,
}

/// Wire shape of a metric inside a series payload.
#[derive(Debug, Clone, Serialize)]
pub struct MetricWire {
    pub metric: String,
    #[serde(rename = "type")]
    pub metric_type: &'static str,
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Metric {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            metric_type: MetricType::Gauge,
            host: None,
            tags: IndexMap::new(),
            points,
        }
    }

    /// Convenience for the common one-sample case.
    pub fn with_point(name: impl Into<String>, point: Point) -> Self {
        Self::new(name, vec![point])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    pub fn set_type(&mut self, metric_type: MetricType) {
        self.metric_type = metric_type;
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = Some(host.into());
    }

    pub fn remove_host(&mut self) {
        self.host = None;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Append a fully specified point.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn add_points(&mut self, points: impl IntoIterator<Item = Point>) {
        self.points.extend(points);
    }

    /// Append a value stamped with the wall clock. The time is captured
    /// at append time, so two values added back to back get independent
    /// timestamps.
    pub fn add_value(&mut self, value: impl Into<PointValue>) {
        self.add_value_with(value, &SystemClock);
    }

    pub fn add_value_with(&mut self, value: impl Into<PointValue>, clock: &dyn Clock) {
        self.points.push(Point::now(value, clock));
    }

    /// Replace all points.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn remove_points(&mut self) {
        self.points.clear();
    }

    pub fn tags(&self) -> &IndexMap<String, String> {
        &self.tags
    }

    pub fn set_tags(&mut self, tags: IndexMap<String, String>) {
        self.tags = tags;
    }

    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(name.into(), value.into());
    }

    /// Removing an absent tag is a no-op.
    pub fn remove_tag(&mut self, name: &str) {
        self.tags.shift_remove(name);
    }

    pub fn remove_tags(&mut self) {
        self.tags.clear();
    }

    pub fn to_wire_format(&self) -> MetricWire {
        MetricWire {
            metric: self.name.clone(),
            metric_type: self.metric_type.as_str(),
            points: self.points.clone(),
            host: self.host.clone(),
            tags: flatten_tags(&self.tags),
        }
    }
}

/// Flatten a tag map into the `"name:value"` strings the wire format
/// uses, preserving insertion order. Empty maps flatten to `None` so
/// the `tags` key is omitted entirely.
pub(crate) fn flatten_tags(tags: &IndexMap<String, String>) -> Option<Vec<String>> {
    if tags.is_empty() {
        None
    } else {
        Some(
            tags.iter()
                .map(|(name, value)| format!("{}:{}", name, value))
                .collect(),
        )
    }
}
