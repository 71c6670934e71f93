//! Business Domain
//!
//! Tenants of the billing system: registration with a subscription plan,
//! settings lists used on bills, and the record that carries the numbering
//! counters (`domain_billing::TenantCounterState`).

pub mod business;
pub mod settings;
pub mod error;
pub mod ports;
pub mod services;

pub use business::{Business, Plan, RegisterBusiness};
pub use settings::{BusinessSettings, SettingsList, SettingsPatch};
pub use error::BusinessError;
pub use ports::BusinessPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockBusinessPort;
pub use services::BusinessService;
