//! Driven Ports (SPI - Outbound)
//!
//! The orchestrator drives the four subsystem APIs and publishes to the
//! event bus. It owns no state of its own.

pub use ew_01_identity_registry::IdentityRegistryApi;
pub use ew_02_waste_store::WasteStoreApi;
pub use ew_03_shipment_tracker::ShipmentTrackerApi;
pub use ew_04_compliance_engine::ComplianceEngineApi;
pub use shared_bus::EventPublisher;
