//! Client library for the Datadog HTTP ingestion API.
//!
//! Build [`Metric`]s (grouped into a [`Series`]) or [`Event`]s, then
//! hand them to a [`Client`] which validates, serializes to the wire
//! format and POSTs them over HTTPS. The HTTP stack sits behind the
//! [`Transport`] trait, so tests run against a mock.
//!
//! ```no_run
//! use datadog_client::{Client, Metric, Point};
//!
//! # async fn example() -> datadog_client::Result<()> {
//! let client = Client::new("my-api-key");
//! let metric = Metric::with_point("app.requests", Point::new(1234567, 20));
//! client.send_metric(&metric).await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::client::Client;
pub use application::factory::{
    build_event, build_metric, parse_points, EventOptions, MetricOptions,
};
pub use application::transport::{Transport, TransportResponse};
pub use domain::clock::{Clock, FixedClock, SystemClock};
pub use domain::event::{AlertType, Event, EventWire, Priority, SourceType};
pub use domain::metric::{Metric, MetricType, MetricWire, Point, PointValue};
pub use domain::series::{Series, SeriesWire};
pub use error::{Error, Result};
pub use infrastructure::config::{load_datadog_config, DatadogConfig};
pub use infrastructure::reqwest_transport::ReqwestTransport;
