//! Business domain services

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::BusinessId;
use crate::business::{Business, RegisterBusiness};
use crate::error::BusinessError;
use crate::ports::BusinessPort;
use crate::settings::{BusinessSettings, SettingsList, SettingsPatch};

/// Registration and settings management for tenants
#[derive(Clone)]
pub struct BusinessService {
    businesses: Arc<dyn BusinessPort>,
}

impl BusinessService {
    pub fn new(businesses: Arc<dyn BusinessPort>) -> Self {
        Self { businesses }
    }

    /// Registers a new business
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` / `PaymentRequired` from [`Business::register`]
    /// - `DuplicateEmail` if the owner email is taken
    #[instrument(skip(self, input), fields(plan = input.plan.as_str()))]
    pub async fn register(&self, input: RegisterBusiness) -> Result<Business, BusinessError> {
        let business = Business::register(input)?;

        if self.businesses.find_by_email(&business.owner_email).await?.is_some() {
            return Err(BusinessError::DuplicateEmail(business.owner_email));
        }
        self.businesses.create(&business).await?;

        info!(business_id = %business.id, "Business registered");
        Ok(business)
    }

    pub async fn get(&self, id: BusinessId) -> Result<Business, BusinessError> {
        Ok(self.businesses.get(id).await?)
    }

    /// Loads a business and rejects deactivated ones
    pub async fn get_active(&self, id: BusinessId) -> Result<Business, BusinessError> {
        let business = self.get(id).await?;
        business.ensure_active()?;
        Ok(business)
    }

    pub async fn update_settings(
        &self,
        id: BusinessId,
        patch: SettingsPatch,
    ) -> Result<BusinessSettings, BusinessError> {
        self.modify_settings(id, |settings| settings.apply(patch)).await
    }

    pub async fn add_entry(
        &self,
        id: BusinessId,
        list: SettingsList,
        name: &str,
    ) -> Result<BusinessSettings, BusinessError> {
        self.modify_settings(id, |settings| settings.add_entry(list, name).map(|_| ()))
            .await
    }

    pub async fn remove_entry(
        &self,
        id: BusinessId,
        list: SettingsList,
        name: &str,
    ) -> Result<BusinessSettings, BusinessError> {
        self.modify_settings(id, |settings| {
            if settings.remove_entry(list, name) {
                Ok(())
            } else {
                Err(BusinessError::NotFound(format!("{} entry '{}'", list.as_str(), name.trim())))
            }
        })
        .await
    }

    async fn modify_settings<F>(&self, id: BusinessId, change: F) -> Result<BusinessSettings, BusinessError>
    where
        F: FnOnce(&mut BusinessSettings) -> Result<(), BusinessError>,
    {
        let business = self.get_active(id).await?;
        let mut settings = business.settings;
        change(&mut settings)?;
        self.businesses.save_settings(id, &settings).await?;

        info!(business_id = %id, "Business settings updated");
        Ok(settings)
    }
}
