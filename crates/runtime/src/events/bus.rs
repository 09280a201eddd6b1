//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use idle_core::CombatLog;

use super::types::SessionEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-exchange narration (hits, evasions, rewards, potions)
    Combat,
    /// Session lifecycle and player snapshots
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "event", rename_all = "snake_case")]
pub enum Event {
    Log(CombatLog),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Combat,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic's channel is created up front, so
/// publishing and subscribing never fail.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            combat: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Number of live receivers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channel(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_only_reach_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut session = bus.subscribe(Topic::Session);

        bus.publish(Event::Log(CombatLog::PlayerEvaded));
        bus.publish(Event::Session(SessionEvent::Stopped));

        assert_eq!(
            combat.recv().await.unwrap(),
            Event::Log(CombatLog::PlayerEvaded)
        );
        assert_eq!(
            session.recv().await.unwrap(),
            Event::Session(SessionEvent::Stopped)
        );
        assert!(combat.try_recv().is_err());
        assert!(session.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(Topic::Combat), 0);
        bus.publish(Event::Log(CombatLog::MonsterEvaded));
    }

    #[test]
    fn events_serialize_with_topic_tag() {
        let json = serde_json::to_value(Event::Session(SessionEvent::Stopped)).unwrap();
        assert_eq!(json["topic"], "session");
        assert_eq!(json["event"]["type"], "stopped");
    }
}
