//! Business Domain Ports
//!
//! `BusinessPort` stores tenant records. Adapters for it also back
//! `domain_billing::CounterPort`, since the numbering counters live inside
//! the tenant record.

use async_trait::async_trait;

use core_kernel::{BusinessId, DomainPort, PortError};
use crate::business::Business;
use crate::settings::BusinessSettings;

#[async_trait]
pub trait BusinessPort: DomainPort {
    /// Inserts a new business
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if the owner email is already registered.
    async fn create(&self, business: &Business) -> Result<(), PortError>;

    async fn get(&self, id: BusinessId) -> Result<Business, PortError>;

    /// Replaces the settings document, leaving counters untouched
    async fn save_settings(&self, id: BusinessId, settings: &BusinessSettings) -> Result<(), PortError>;

    /// Looks up a business by owner email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<Business>, PortError>;
}

/// In-memory tenant store for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use chrono::Utc;
    use tokio::sync::RwLock;

    use core_kernel::BusinessDate;
    use domain_billing::{CounterPort, TenantCounterState};

    /// Mock business store that also serves the embedded counters
    #[derive(Debug, Default)]
    pub struct MockBusinessPort {
        businesses: Arc<RwLock<HashMap<BusinessId, Business>>>,
    }

    impl MockBusinessPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a business directly, bypassing the email check
        pub async fn insert(&self, business: Business) {
            self.businesses.write().await.insert(business.id, business);
        }

        pub async fn deactivate(&self, id: BusinessId) {
            if let Some(business) = self.businesses.write().await.get_mut(&id) {
                business.is_active = false;
            }
        }
    }

    impl DomainPort for MockBusinessPort {}

    #[async_trait]
    impl BusinessPort for MockBusinessPort {
        async fn create(&self, business: &Business) -> Result<(), PortError> {
            let mut businesses = self.businesses.write().await;
            if businesses
                .values()
                .any(|b| b.owner_email.eq_ignore_ascii_case(&business.owner_email))
            {
                return Err(PortError::conflict(business.owner_email.clone()));
            }
            businesses.insert(business.id, business.clone());
            Ok(())
        }

        async fn get(&self, id: BusinessId) -> Result<Business, PortError> {
            self.businesses
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Business", id))
        }

        async fn save_settings(&self, id: BusinessId, settings: &BusinessSettings) -> Result<(), PortError> {
            let mut businesses = self.businesses.write().await;
            let business = businesses
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Business", id))?;
            business.settings = settings.clone();
            business.updated_at = Utc::now();
            Ok(())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Business>, PortError> {
            let email = email.trim();
            Ok(self
                .businesses
                .read()
                .await
                .values()
                .find(|b| b.owner_email.eq_ignore_ascii_case(email))
                .cloned())
        }
    }

    #[async_trait]
    impl CounterPort for MockBusinessPort {
        async fn increment_and_fetch(
            &self,
            business_id: BusinessId,
            today: BusinessDate,
        ) -> Result<TenantCounterState, PortError> {
            let mut businesses = self.businesses.write().await;
            let business = businesses
                .get_mut(&business_id)
                .ok_or_else(|| PortError::not_found("Business", business_id))?;
            business.counters = business.counters.advance(today);
            business.updated_at = Utc::now();
            Ok(business.counters)
        }

        async fn load_counters(&self, business_id: BusinessId) -> Result<TenantCounterState, PortError> {
            self.businesses
                .read()
                .await
                .get(&business_id)
                .map(|b| b.counters)
                .ok_or_else(|| PortError::not_found("Business", business_id))
        }
    }
}
