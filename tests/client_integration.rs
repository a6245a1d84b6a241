// End-to-end submission flow against a mock transport
use async_trait::async_trait;
use datadog_client::{
    AlertType, Client, Error, Event, EventOptions, FixedClock, Metric, Point, Priority, Series,
    SourceType, Transport, TransportResponse,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[derive(Default)]
struct CapturingTransport {
    status: u16,
    body: String,
    requests: Mutex<Vec<(String, Value)>>,
}

impl CapturingTransport {
    fn accepting() -> Arc<Self> {
        Arc::new(Self {
            status: 202,
            body: r#"{"status":"ok"}"#.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn rejecting(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for CapturingTransport {
    async fn post_json(&self, url: &str, body: &Value) -> anyhow::Result<TransportResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        Ok(TransportResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

#[tokio::test]
async fn series_of_two_metrics_goes_out_in_one_call() {
    init_tracing();
    let transport = CapturingTransport::accepting();
    let client = Client::with_transport("integration-key", transport.clone());

    let mut cpu = Metric::new("system.cpu", vec![Point::new(1000, 0.5)]);
    cpu.set_host("web-1");
    let mut series = Series::from(cpu);
    series.add_metric(Metric::new("system.mem", vec![Point::new(1000, 2048)]));

    client.send_series(&series).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].0,
        "https://app.datadoghq.com/api/v1/series?api_key=integration-key"
    );
    assert_eq!(
        requests[0].1,
        json!({
            "series": [
                {
                    "metric": "system.cpu",
                    "type": "gauge",
                    "points": [[1000, 0.5]],
                    "host": "web-1",
                },
                {
                    "metric": "system.mem",
                    "type": "gauge",
                    "points": [[1000, 2048]],
                },
            ]
        })
    );
}

#[tokio::test]
async fn fully_populated_event_round_trips_to_the_wire() {
    init_tracing();
    let transport = CapturingTransport::accepting();
    let client = Client::with_transport("integration-key", transport.clone());

    let mut event = Event::new_with_clock("TestEvent", &FixedClock(1700000000));
    event.set_title("This is a testevent");
    event.add_tag("foo", "bar");
    event.set_alert_type(AlertType::Success);
    event.set_source_type(SourceType::MyApps);
    event.set_aggregation_key("unittest");
    event.set_priority(Priority::Low);

    client.send_event(&event).await.unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].0,
        "https://app.datadoghq.com/api/v1/events?api_key=integration-key"
    );
    assert_eq!(
        requests[0].1,
        json!({
            "title": "This is a testevent",
            "text": "TestEvent",
            "date_happened": 1700000000,
            "priority": "low",
            "alert_type": "success",
            "tags": ["foo:bar"],
            "aggregation_key": "unittest",
            "source_type_name": "my apps",
        })
    );
}

#[tokio::test]
async fn rejected_event_surfaces_server_error_text() {
    init_tracing();
    let transport = CapturingTransport::rejecting(400, r#"{"errors":["bad tag"]}"#);
    let client = Client::with_transport("integration-key", transport);

    let err = client.send_event(&Event::new("TestEvent")).await.unwrap_err();
    match err {
        Error::Request { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("bad tag"));
        }
        other => panic!("expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_objects_never_reach_the_transport() {
    init_tracing();
    let transport = CapturingTransport::accepting();
    let client = Client::with_transport("integration-key", transport.clone());

    assert!(matches!(
        client.send_series(&Series::new()).await,
        Err(Error::EmptySeries)
    ));
    assert!(matches!(
        client.send_metric(&Metric::new("app.requests", vec![])).await,
        Err(Error::EmptyMetric(_))
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn loose_convenience_path_builds_validates_and_sends() {
    init_tracing();
    let transport = CapturingTransport::accepting();
    let client = Client::with_transport("integration-key", transport.clone());

    client
        .event(
            "deploy finished",
            "deploy",
            EventOptions {
                timestamp: Some(1500),
                alert_type: Some("success".to_string()),
                source_type: Some("jenkins".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].1["alert_type"], "success");
    assert_eq!(requests[0].1["source_type_name"], "jenkins");

    // An invalid enum in the option bundle fails before any request.
    let err = client
        .event(
            "deploy finished",
            "",
            EventOptions {
                priority: Some("urgent".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPriority(_)));
    assert_eq!(transport.requests().len(), 1);
}
