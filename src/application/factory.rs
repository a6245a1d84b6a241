// Factory - builds typed domain objects from loosely-typed option bundles
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::event::Event;
use crate::domain::metric::{Metric, Point, PointValue};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Optional metric fields supplied as loose strings, validated here
/// when they are converted into the typed domain values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricOptions {
    #[serde(default, alias = "type")]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub tags: Option<IndexMap<String, String>>,
}

/// Optional event fields, same loose-input contract as
/// [`MetricOptions`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventOptions {
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, alias = "type")]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub tags: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub aggregation_key: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Build a metric from a name, a JSON point bundle and loose options.
///
/// The point bundle accepts the same shorthands as the wire format:
/// `[20]` (auto-stamped value), `[1234567, 20]` (explicit timestamp)
/// or a list of either. An empty list yields a metric with no points.
pub fn build_metric(name: impl Into<String>, points: &Value, options: MetricOptions) -> Result<Metric> {
    build_metric_with_clock(name, points, options, &SystemClock)
}

pub fn build_metric_with_clock(
    name: impl Into<String>,
    points: &Value,
    options: MetricOptions,
    clock: &dyn Clock,
) -> Result<Metric> {
    let mut metric = Metric::new(name, parse_points(points, clock)?);
    if let Some(metric_type) = options.metric_type {
        metric.set_type(metric_type.parse()?);
    }
    if let Some(host) = options.host {
        metric.set_host(host);
    }
    if let Some(tags) = options.tags {
        metric.set_tags(tags);
    }
    Ok(metric)
}

/// Build an event from text, title and loose options.
pub fn build_event(
    text: impl Into<String>,
    title: impl Into<String>,
    options: EventOptions,
) -> Result<Event> {
    build_event_with_clock(text, title, options, &SystemClock)
}

pub fn build_event_with_clock(
    text: impl Into<String>,
    title: impl Into<String>,
    options: EventOptions,
    clock: &dyn Clock,
) -> Result<Event> {
    let mut event = Event::new_with_clock(text, clock);
    event.set_title(title);
    if let Some(timestamp) = options.timestamp {
        event.set_timestamp(timestamp);
    }
    if let Some(priority) = options.priority {
        event.set_priority(priority.parse()?);
    }
    if let Some(alert_type) = options.alert_type {
        event.set_alert_type(alert_type.parse()?);
    }
    if let Some(tags) = options.tags {
        event.set_tags(tags);
    }
    if let Some(key) = options.aggregation_key {
        event.set_aggregation_key(key);
    }
    if let Some(source_type) = options.source_type {
        event.set_source_type(source_type.parse()?);
    }
    Ok(event)
}

/// Normalize a JSON point bundle into a list of points.
///
/// A bare point (`[20]` or `[1234567, 20]`, recognized by a numeric
/// first element) becomes a one-element list.
pub fn parse_points(points: &Value, clock: &dyn Clock) -> Result<Vec<Point>> {
    let items = points
        .as_array()
        .ok_or_else(|| Error::InvalidPoint("points must be a JSON array".to_string()))?;

    if let Some(first) = items.first() {
        if first.is_number() {
            return Ok(vec![parse_point(items, clock)?]);
        }
    }

    items
        .iter()
        .map(|point| {
            let parts = point
                .as_array()
                .ok_or_else(|| Error::InvalidPoint("each point must be a JSON array".to_string()))?;
            parse_point(parts, clock)
        })
        .collect()
}

fn parse_point(parts: &[Value], clock: &dyn Clock) -> Result<Point> {
    match parts {
        [value] => Ok(Point::new(clock.epoch_seconds(), parse_value(value)?)),
        [timestamp, value] => {
            let timestamp = timestamp
                .as_i64()
                .ok_or_else(|| Error::InvalidPoint("timestamp must be an integer".to_string()))?;
            Ok(Point::new(timestamp, parse_value(value)?))
        }
        _ => Err(Error::InvalidPoint(
            "a point is [value] or [timestamp, value]".to_string(),
        )),
    }
}

fn parse_value(value: &Value) -> Result<PointValue> {
    if let Some(integer) = value.as_i64() {
        Ok(PointValue::Integer(integer))
    } else if let Some(float) = value.as_f64() {
        Ok(PointValue::Float(float))
    } else {
        Err(Error::InvalidPoint(
            "value must be integer or float".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::event::{AlertType, Priority, SourceType};
    use crate::domain::metric::MetricType;
    use serde_json::json;

    const CLOCK: FixedClock = FixedClock(1234567);

    #[test]
    fn test_parse_points_single_point_normalizes_to_list() {
        let points = parse_points(&json!([1000, 20]), &CLOCK).unwrap();
        assert_eq!(points, vec![Point::new(1000, 20)]);
    }

    #[test]
    fn test_parse_points_value_only_is_auto_stamped() {
        let points = parse_points(&json!([20.5]), &CLOCK).unwrap();
        assert_eq!(points, vec![Point::new(1234567, 20.5)]);
    }

    #[test]
    fn test_parse_points_list_of_points() {
        let points = parse_points(&json!([[1000, 20], [2000, 21]]), &CLOCK).unwrap();
        assert_eq!(points, vec![Point::new(1000, 20), Point::new(2000, 21)]);
    }

    #[test]
    fn test_parse_points_empty_list_yields_no_points() {
        assert!(parse_points(&json!([]), &CLOCK).unwrap().is_empty());
    }

    #[test]
    fn test_parse_points_rejects_non_integer_timestamp() {
        assert!(matches!(
            parse_points(&json!([[1000.5, 20]]), &CLOCK),
            Err(Error::InvalidPoint(msg)) if msg.contains("timestamp")
        ));
    }

    #[test]
    fn test_parse_points_rejects_non_numeric_value() {
        assert!(matches!(
            parse_points(&json!([[1000, "twenty"]]), &CLOCK),
            Err(Error::InvalidPoint(msg)) if msg.contains("value")
        ));
    }

    #[test]
    fn test_build_metric_applies_options() {
        let options = MetricOptions {
            metric_type: Some("counter".to_string()),
            host: Some("web-1".to_string()),
            tags: Some(IndexMap::from([("env".to_string(), "prod".to_string())])),
        };
        let metric = build_metric_with_clock("app.requests", &json!([20]), options, &CLOCK).unwrap();
        assert_eq!(metric.metric_type(), MetricType::Counter);
        assert_eq!(metric.host(), Some("web-1"));
        assert_eq!(metric.tags().get("env").map(String::as_str), Some("prod"));
        assert_eq!(metric.points(), &[Point::new(1234567, 20)]);
    }

    #[test]
    fn test_build_metric_rejects_unknown_type() {
        let options = MetricOptions {
            metric_type: Some("rate".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_metric_with_clock("app.requests", &json!([20]), options, &CLOCK),
            Err(Error::InvalidMetricType(_))
        ));
    }

    #[test]
    fn test_build_event_applies_options() {
        let options = EventOptions {
            timestamp: Some(1700000000),
            priority: Some("low".to_string()),
            alert_type: Some("success".to_string()),
            source_type: Some("my apps".to_string()),
            aggregation_key: Some("unittest".to_string()),
            ..Default::default()
        };
        let event = build_event_with_clock("TestEvent", "title", options, &CLOCK).unwrap();
        assert_eq!(event.timestamp(), 1700000000);
        assert_eq!(event.priority(), Priority::Low);
        assert_eq!(event.alert_type(), AlertType::Success);
        assert_eq!(event.source_type(), Some(SourceType::MyApps));
    }

    #[test]
    fn test_build_event_rejects_unknown_priority() {
        let options = EventOptions {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_event_with_clock("TestEvent", "", options, &CLOCK),
            Err(Error::InvalidPriority(_))
        ));
    }

    #[test]
    fn test_options_deserialize_from_loose_json() {
        let options: MetricOptions =
            serde_json::from_value(json!({"type": "counter", "host": "web-1"})).unwrap();
        assert_eq!(options.metric_type.as_deref(), Some("counter"));

        let options: EventOptions =
            serde_json::from_value(json!({"type": "error", "source_type": "chef"})).unwrap();
        assert_eq!(options.alert_type.as_deref(), Some("error"));
    }
}
