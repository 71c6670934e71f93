//! Core Kernel - Foundational types shared by every billbook crate
//!
//! - Strongly-typed identifiers for tenants, bills and ledger entries
//! - Business calendar (`YYYY-MM-DD` dates, tenant timezones)
//! - Port error vocabulary and health-check traits for adapters

pub mod calendar;
pub mod identifiers;
pub mod ports;

pub use calendar::{BusinessDate, CalendarError, Timezone};
pub use identifiers::{BusinessId, BillId, TransactionId};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
