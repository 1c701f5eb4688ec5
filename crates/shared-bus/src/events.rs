//! # Custody Events
//!
//! Notifications published after an action commits. Dashboards subscribe
//! to these instead of polling the ledger.

use serde::{Deserialize, Serialize};
use shared_types::{
    ActorId, AuditId, CertificateId, NonComplianceId, Role, ShipmentId, Timestamp, WasteId,
};
use uuid::Uuid;

/// Subsystem identifiers used as event sources.
pub mod subsystem_ids {
    pub const IDENTITY_REGISTRY: u8 = 1;
    pub const WASTE_STORE: u8 = 2;
    pub const SHIPMENT_TRACKER: u8 = 3;
    pub const COMPLIANCE_ENGINE: u8 = 4;
}

/// Every event that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CustodyEvent {
    // =========================================================================
    // SUBSYSTEM 1: IDENTITY REGISTRY
    // =========================================================================
    /// An actor was granted a role, by themselves or by the admin.
    ActorRegistered {
        actor: ActorId,
        role: Role,
        /// Set when the admin registered on the actor's behalf.
        assigned_by: Option<ActorId>,
    },

    /// The admin seat moved.
    AdminChanged { previous: ActorId, current: ActorId },

    // =========================================================================
    // SUBSYSTEM 2: WASTE STORE
    // =========================================================================
    /// A producer logged a waste item.
    WasteLogged {
        waste_id: WasteId,
        producer: ActorId,
        deadline: Timestamp,
    },

    /// A recycler processed a waste item.
    WasteProcessed { waste_id: WasteId, recycler: ActorId },

    // =========================================================================
    // SUBSYSTEM 3: SHIPMENT TRACKER
    // =========================================================================
    /// A transporter opened a shipment.
    ShipmentCreated {
        shipment_id: ShipmentId,
        waste_id: WasteId,
        transporter: ActorId,
    },

    /// A shipment's status or location changed.
    ShipmentStatusChanged {
        shipment_id: ShipmentId,
        from: String,
        to: String,
        location: String,
    },

    // =========================================================================
    // SUBSYSTEM 4: COMPLIANCE ENGINE
    // =========================================================================
    /// A regulator recorded an audit.
    AuditRecorded {
        audit_id: AuditId,
        waste_id: WasteId,
        status: String,
    },

    /// A non-compliant audit opened a case.
    NonComplianceOpened {
        record_id: NonComplianceId,
        waste_id: WasteId,
        responsible: ActorId,
    },

    /// A non-compliance case moved forward.
    NonComplianceUpdated {
        record_id: NonComplianceId,
        status: String,
    },

    /// A certificate was issued.
    CertificateIssued {
        certificate_id: CertificateId,
        waste_id: WasteId,
        recipient: ActorId,
    },
}

impl CustodyEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ActorRegistered { .. } | Self::AdminChanged { .. } => EventTopic::Identity,
            Self::WasteLogged { .. } | Self::WasteProcessed { .. } => EventTopic::Waste,
            Self::ShipmentCreated { .. } | Self::ShipmentStatusChanged { .. } => {
                EventTopic::Shipment
            }
            Self::AuditRecorded { .. }
            | Self::NonComplianceOpened { .. }
            | Self::NonComplianceUpdated { .. }
            | Self::CertificateIssued { .. } => EventTopic::Compliance,
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self.topic() {
            EventTopic::Identity => subsystem_ids::IDENTITY_REGISTRY,
            EventTopic::Waste => subsystem_ids::WASTE_STORE,
            EventTopic::Shipment => subsystem_ids::SHIPMENT_TRACKER,
            EventTopic::Compliance | EventTopic::All => subsystem_ids::COMPLIANCE_ENGINE,
        }
    }

    /// The waste item this event concerns, if any.
    #[must_use]
    pub fn waste_id(&self) -> Option<WasteId> {
        match self {
            Self::WasteLogged { waste_id, .. }
            | Self::WasteProcessed { waste_id, .. }
            | Self::ShipmentCreated { waste_id, .. }
            | Self::AuditRecorded { waste_id, .. }
            | Self::NonComplianceOpened { waste_id, .. }
            | Self::CertificateIssued { waste_id, .. } => Some(*waste_id),
            Self::ActorRegistered { .. }
            | Self::AdminChanged { .. }
            | Self::ShipmentStatusChanged { .. }
            | Self::NonComplianceUpdated { .. } => None,
        }
    }
}

/// A published event with its bus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusMessage {
    /// Unique id for de-duplication by consumers.
    pub event_id: Uuid,
    /// Actor whose action produced the event.
    pub emitted_by: ActorId,
    /// Commit time.
    pub emitted_at: Timestamp,
    pub event: CustodyEvent,
}

impl BusMessage {
    /// Wrap an event with a fresh id.
    #[must_use]
    pub fn new(event: CustodyEvent, emitted_by: ActorId, emitted_at: Timestamp) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            emitted_by,
            emitted_at,
            event,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Subsystem 1 events.
    Identity,
    /// Subsystem 2 events.
    Waste,
    /// Subsystem 3 events.
    Shipment,
    /// Subsystem 4 events.
    Compliance,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Emitting actors to include. Empty means all actors.
    pub actors: Vec<ActorId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            actors: Vec::new(),
        }
    }

    /// Create a filter for events emitted by specific actors.
    #[must_use]
    pub fn from_actors(actors: Vec<ActorId>) -> Self {
        Self {
            topics: Vec::new(),
            actors,
        }
    }

    /// Check if a message matches this filter.
    #[must_use]
    pub fn matches(&self, message: &BusMessage) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&message.event.topic());

        let actor_match = self.actors.is_empty() || self.actors.contains(&message.emitted_by);

        topic_match && actor_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged(producer: ActorId) -> BusMessage {
        BusMessage::new(
            CustodyEvent::WasteLogged {
                waste_id: WasteId(1),
                producer,
                deadline: 100,
            },
            producer,
            10,
        )
    }

    #[test]
    fn test_event_topic_mapping() {
        let event = CustodyEvent::CertificateIssued {
            certificate_id: CertificateId(1),
            waste_id: WasteId(4),
            recipient: ActorId([2; 20]),
        };
        assert_eq!(event.topic(), EventTopic::Compliance);
        assert_eq!(event.source_subsystem(), 4);
        assert_eq!(event.waste_id(), Some(WasteId(4)));
    }

    #[test]
    fn test_filter_all() {
        assert!(EventFilter::all().matches(&logged(ActorId([1; 20]))));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Shipment]);
        assert!(!filter.matches(&logged(ActorId([1; 20]))));

        let filter = EventFilter::topics(vec![EventTopic::Waste]);
        assert!(filter.matches(&logged(ActorId([1; 20]))));
    }

    #[test]
    fn test_filter_by_actor() {
        let filter = EventFilter::from_actors(vec![ActorId([9; 20])]);
        assert!(!filter.matches(&logged(ActorId([1; 20]))));
        assert!(filter.matches(&logged(ActorId([9; 20]))));
    }

    #[test]
    fn test_event_serde_tag() {
        let json = serde_json::to_value(CustodyEvent::WasteProcessed {
            waste_id: WasteId(3),
            recycler: ActorId([1; 20]),
        })
        .unwrap();
        assert_eq!(json["event"], "waste_processed");
        assert_eq!(json["waste_id"], 3);
    }

    #[test]
    fn test_messages_get_distinct_ids() {
        let a = logged(ActorId([1; 20]));
        let b = logged(ActorId([1; 20]));
        assert_ne!(a.event_id, b.event_id);
    }
}
