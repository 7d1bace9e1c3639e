use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope delivered to every subscriber when the store changes. `seq` is
/// strictly monotonic across all event types for the lifetime of the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub r#type: String,
    pub payload: Value,
    pub timestamp: DateTime<Utc>,
    pub seq: i64,
}

type Subscriber = Box<dyn Fn(&EventEnvelope)>;

/// Synchronous fan-out of store change events. Callbacks run in registration
/// order on the calling thread before the mutating operation returns.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(u64, Subscriber)>,
    next_subscription: u64,
    seq: i64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&EventEnvelope) + 'static) -> u64 {
        self.next_subscription += 1;
        let subscription = self.next_subscription;
        self.subscribers.push((subscription, Box::new(callback)));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: u64) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event_type: &str, payload: Value) {
        self.seq += 1;
        let envelope = EventEnvelope {
            r#type: event_type.to_string(),
            payload,
            timestamp: Utc::now(),
            seq: self.seq,
        };
        for (_, subscriber) in &self.subscribers {
            subscriber(&envelope);
        }
    }
}
