use crate::action_types::SET_ANALYTICS_ENABLED;
use crate::error::{EventError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Discriminating `type` tag of a host event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(String);

impl ActionType {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self(action_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Conversion of a structured in-process value into plain JSON.
///
/// Implemented for everything that is `Serialize`, so shared containers such
/// as `Arc<Vec<Layer>>` or `Arc<HashMap<String, Palette>>` can ride on an event
/// without being converted by the dispatcher.
pub trait ToPlain: fmt::Debug + Send + Sync {
    fn to_plain(&self) -> serde_json::Result<Value>;
}

impl<T> ToPlain for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_plain(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// A single event field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Already plain JSON
    Plain(Value),
    /// Structured container that is converted when the event is recorded
    Container(Arc<dyn ToPlain>),
}

impl FieldValue {
    pub fn container<T>(value: T) -> Self
    where
        T: ToPlain + 'static,
    {
        Self::Container(Arc::new(value))
    }

    /// Plain JSON copy of this field. Containers that fail to convert become `null`.
    pub fn to_plain(&self) -> Value {
        match self {
            FieldValue::Plain(value) => value.clone(),
            FieldValue::Container(container) => container.to_plain().unwrap_or_else(|e| {
                tracing::warn!("Failed to convert event field to plain value: {}", e);
                Value::Null
            }),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Plain(value)
    }
}

/// Any host event other than the analytics control event.
#[derive(Debug, Clone)]
pub struct GenericEvent {
    pub action_type: ActionType,
    pub fields: BTreeMap<String, FieldValue>,
}

impl GenericEvent {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), FieldValue::Plain(value.into()));
        self
    }

    pub fn with_container<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: ToPlain + 'static,
    {
        self.fields.insert(name.into(), FieldValue::container(value));
        self
    }

    pub fn with_shared(mut self, name: impl Into<String>, value: Arc<dyn ToPlain>) -> Self {
        self.fields.insert(name.into(), FieldValue::Container(value));
        self
    }

    /// The `isEnabled` flag carried by a control event, if it is a boolean.
    pub fn enabled_flag(&self) -> Option<bool> {
        self.fields.get("isEnabled").and_then(|value| value.to_plain().as_bool())
    }

    /// Fresh plain-JSON snapshot of the event, `type` included.
    ///
    /// The event itself is left untouched.
    pub fn to_plain_action(&self) -> Value {
        let mut action = Map::with_capacity(self.fields.len() + 1);
        action.insert("type".to_string(), Value::String(self.action_type.to_string()));
        for (name, value) in &self.fields {
            if name == "type" {
                continue;
            }
            action.insert(name.clone(), value.to_plain());
        }
        Value::Object(action)
    }
}

/// Event dispatched by the host into the batcher.
#[derive(Debug, Clone)]
pub enum Event {
    SetAnalyticsEnabled { is_enabled: bool },
    Action(GenericEvent),
}

impl Event {
    pub fn set_analytics_enabled(is_enabled: bool) -> Self {
        Event::SetAnalyticsEnabled { is_enabled }
    }

    pub fn action_type(&self) -> &str {
        match self {
            Event::SetAnalyticsEnabled { .. } => SET_ANALYTICS_ENABLED,
            Event::Action(event) => event.action_type.as_str(),
        }
    }

    /// Parse a raw JSON event as dispatched by the host.
    ///
    /// ```
    /// use beacon_types::Event;
    /// use serde_json::json;
    ///
    /// let event = Event::from_value(json!({"type": "SET_ANALYTICS_ENABLED", "isEnabled": false})).unwrap();
    /// assert!(matches!(event, Event::SetAnalyticsEnabled { is_enabled: false }));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(EventError::NotAnObject);
        };

        let action_type = match object.remove("type") {
            Some(Value::String(action_type)) => action_type,
            _ => return Err(EventError::MissingType),
        };

        if action_type == SET_ANALYTICS_ENABLED {
            return match object.get("isEnabled") {
                Some(Value::Bool(is_enabled)) => Ok(Event::set_analytics_enabled(*is_enabled)),
                _ => Err(EventError::InvalidControlFlag(action_type)),
            };
        }

        let fields = object
            .into_iter()
            .map(|(name, value)| (name, FieldValue::Plain(value)))
            .collect();

        Ok(Event::Action(GenericEvent {
            action_type: ActionType::from(action_type),
            fields,
        }))
    }
}

impl From<GenericEvent> for Event {
    fn from(event: GenericEvent) -> Self {
        if event.action_type.as_str() == SET_ANALYTICS_ENABLED {
            if let Some(is_enabled) = event.enabled_flag() {
                return Event::set_analytics_enabled(is_enabled);
            }
        }
        Event::Action(event)
    }
}
