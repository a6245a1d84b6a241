// Event domain model
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::metric::flatten_tags;
use crate::error::Error;
use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

/// Event priorities accepted by the ingestion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            other => Err(Error::InvalidPriority(other.to_string())),
        }
    }
}

/// Alert types shown on the event timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertType {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Info => "info",
            AlertType::Warning => "warning",
            AlertType::Error => "error",
            AlertType::Success => "success",
        }
    }
}

impl FromStr for AlertType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AlertType::Info),
            "warning" => Ok(AlertType::Warning),
            "error" => Ok(AlertType::Error),
            "success" => Ok(AlertType::Success),
            other => Err(Error::InvalidAlertType(other.to_string())),
        }
    }
}

/// The closed set of integration names the platform accepts as an
/// event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Nagios,
    Hudson,
    Jenkins,
    User,
    MyApps,
    Feed,
    Chef,
    Puppet,
    Git,
    Bitbucket,
    Fabric,
    Capistrano,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Nagios => "nagios",
            SourceType::Hudson => "hudson",
            SourceType::Jenkins => "jenkins",
            SourceType::User => "user",
            SourceType::MyApps => "my apps",
            SourceType::Feed => "feed",
            SourceType::Chef => "chef",
            SourceType::Puppet => "puppet",
            SourceType::Git => "git",
            SourceType::Bitbucket => "bitbucket",
            SourceType::Fabric => "fabric",
            SourceType::Capistrano => "capistrano",
        }
    }
}

impl FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nagios" => Ok(SourceType::Nagios),
            "hudson" => Ok(SourceType::Hudson),
            "jenkins" => Ok(SourceType::Jenkins),
            "user" => Ok(SourceType::User),
            "my apps" => Ok(SourceType::MyApps),
            "feed" => Ok(SourceType::Feed),
            "chef" => Ok(SourceType::Chef),
            "puppet" => Ok(SourceType::Puppet),
            "git" => Ok(SourceType::Git),
            "bitbucket" => Ok(SourceType::Bitbucket),
            "fabric" => Ok(SourceType::Fabric),
            "capistrano" => Ok(SourceType::Capistrano),
            other => Err(Error::InvalidSourceType(other.to_string())),
        }
    }
}

/// A titled, timestamped text record shown on the platform timeline.
///
/// Only the text is mandatory. The timestamp defaults to construction
/// time, taken from the injected clock.
#[derive(Debug, Clone)]
pub struct Event {
    title: String,
    text: String,
    timestamp: i64,
    priority: Priority,
    alert_type: AlertType,
    tags: IndexMap<String, String>,
    aggregation_key: Option<String>,
    source_type: Option<SourceType>,
}

/// Wire shape of an event payload.
#[derive(Debug, Clone, Serialize)]
pub struct EventWire {
    pub title: String,
    pub text: String,
    pub date_happened: i64,
    pub priority: &'static str,
    pub alert_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type_name: Option<&'static str>,
}

impl Event {
    pub fn new(text: impl Into<String>) -> Self {
        Self::new_with_clock(text, &SystemClock)
    }

    pub fn new_with_clock(text: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            title: String::new(),
            text: text.into(),
            timestamp: clock.epoch_seconds(),
            priority: Priority::Normal,
            alert_type: AlertType::Info,
            tags: IndexMap::new(),
            aggregation_key: None,
            source_type: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    pub fn set_alert_type(&mut self, alert_type: AlertType) {
        self.alert_type = alert_type;
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

    pub fn aggregation_key(&self) -> Option<&str> {
        self.aggregation_key.as_deref()
    }

    pub fn set_aggregation_key(&mut self, key: impl Into<String>) {
        self.aggregation_key = Some(key.into());
    }

    pub fn remove_aggregation_key(&mut self) {
        self.aggregation_key = None;
    }

    pub fn source_type(&self) -> Option<SourceType> {
        self.source_type
    }

    pub fn set_source_type(&mut self, source_type: SourceType) {
        self.source_type = Some(source_type);
    }

    pub fn remove_source_type(&mut self) {
        self.source_type = None;
    }

    pub fn to_wire_format(&self) -> EventWire {
        EventWire {
            title: self.title.clone(),
            text: self.text.clone(),
            date_happened: self.timestamp,
            priority: self.priority.as_str(),
            alert_type: self.alert_type.as_str(),
            tags: flatten_tags(&self.tags),
            aggregation_key: self.aggregation_key.clone(),
            source_type_name: self.source_type.map(|s| s.as_str()),
        }
    }
}
