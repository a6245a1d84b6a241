// Client - validates, serializes and submits series and events
use crate::application::factory::{self, EventOptions, MetricOptions};
use crate::application::transport::Transport;
use crate::domain::event::Event;
use crate::domain::metric::Metric;
use crate::domain::series::Series;
use crate::error::{Error, Result};
use crate::infrastructure::config::load_datadog_config;
use crate::infrastructure::reqwest_transport::ReqwestTransport;
use serde_json::Value;
use std::sync::Arc;

const SERIES_ENDPOINT: &str = "https://app.datadoghq.com/api/v1/series";
const EVENT_ENDPOINT: &str = "https://app.datadoghq.com/api/v1/events";

/// Submits series and events to the ingestion API.
///
/// The client validates objects before serializing them, so an empty
/// series or metric never reaches the wire. It holds no state between
/// calls beyond the credential pair, and independent clients may be
/// used concurrently without coordination.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    application_key: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, Arc::new(ReqwestTransport::new()))
    }

    /// Build a client over a custom transport. Tests inject a mock
    /// here; everything above the transport behaves identically.
    pub fn with_transport(api_key: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_key: api_key.into(),
            application_key: None,
            transport,
        }
    }

    /// Build a client from the `config/datadog` file and `DATADOG_*`
    /// environment variables.
    pub fn from_config() -> anyhow::Result<Self> {
        let config = load_datadog_config()?;
        let mut client = Self::new(config.api_key);
        if let Some(application_key) = config.application_key {
            client.set_application_key(application_key);
        }
        Ok(client)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn application_key(&self) -> Option<&str> {
        self.application_key.as_deref()
    }

    /// The application key is only needed for read endpoints, which
    /// this client does not implement yet. It is carried so configured
    /// credentials survive a round trip through the client.
    pub fn set_application_key(&mut self, application_key: impl Into<String>) {
        self.application_key = Some(application_key.into());
    }

    /// Send a series of metrics in one API call.
    pub async fn send_series(&self, series: &Series) -> Result<()> {
        if series.is_empty() {
            return Err(Error::EmptySeries);
        }
        let body = to_body(&series.to_wire_format())?;
        self.send(SERIES_ENDPOINT, body).await
    }

    /// Send a single metric, wrapped in a one-metric series as the API
    /// requires.
    pub async fn send_metric(&self, metric: &Metric) -> Result<()> {
        if metric.points().is_empty() {
            return Err(Error::EmptyMetric(metric.name().to_string()));
        }
        self.send_series(&Series::from(metric.clone())).await
    }

    /// Send an event. Events carry mandatory text from construction,
    /// so there is no emptiness precondition.
    pub async fn send_event(&self, event: &Event) -> Result<()> {
        let body = to_body(&event.to_wire_format())?;
        self.send(EVENT_ENDPOINT, body).await
    }

    /// Build a metric from loose values and send it in one call.
    pub async fn metric(
        &self,
        name: impl Into<String>,
        points: &Value,
        options: MetricOptions,
    ) -> Result<()> {
        let metric = factory::build_metric(name, points, options)?;
        self.send_metric(&metric).await
    }

    /// Build an event from loose values and send it in one call.
    pub async fn event(
        &self,
        text: impl Into<String>,
        title: impl Into<String>,
        options: EventOptions,
    ) -> Result<()> {
        let event = factory::build_event(text, title, options)?;
        self.send_event(&event).await
    }

    async fn send(&self, endpoint: &str, body: Value) -> Result<()> {
        let url = format!("{}?api_key={}", endpoint, urlencoding::encode(&self.api_key));
        tracing::debug!(endpoint, "submitting payload to datadog");

        let response = self
            .transport
            .post_json(&url, &body)
            .await
            .map_err(Error::Transport)?;

        if response.status >= 400 {
            tracing::debug!(status = response.status, "datadog rejected the payload");
            return Err(Error::Request {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("application_key", &self.application_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn to_body<T: serde::Serialize>(wire: &T) -> Result<Value> {
    serde_json::to_value(wire)
        .map_err(|err| Error::Transport(anyhow::Error::new(err).context("Failed to serialize payload")))
}

/// Concatenate the `errors` and `warnings` arrays of a rejection body.
/// A missing or unparseable body yields an empty message; the status
/// code alone still identifies the failure.
fn error_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::new();
    for key in ["errors", "warnings"] {
        if let Some(items) = parsed.get(key).and_then(Value::as_array) {
            parts.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
        }
    }
    parts.join(" ")
}
