//! Receipt and invoice number allocation
//!
//! Receipt numbers are `<YYYY-MM-DD>-<n>` with `n` restarting every day per
//! tenant. Invoice numbers are a per-tenant sequence that never resets.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{BusinessDate, BusinessId};
use crate::counter::{AllocatedNumbers, InvoiceNumberFormat};
use crate::error::BillingError;
use crate::ports::CounterPort;

/// Hands out bill numbers from the tenant counters
#[derive(Clone)]
pub struct NumberingAllocator {
    counters: Arc<dyn CounterPort>,
    format: InvoiceNumberFormat,
}

impl NumberingAllocator {
    pub fn new(counters: Arc<dyn CounterPort>) -> Self {
        Self {
            counters,
            format: InvoiceNumberFormat::default(),
        }
    }

    pub fn with_format(mut self, format: InvoiceNumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> InvoiceNumberFormat {
        self.format
    }

    /// Consumes the next receipt and invoice numbers for `business_id`
    ///
    /// The counters are committed before this returns. Two calls always
    /// yield two different results. If the tenant already issued receipts for
    /// a later day, numbering continues on that day.
    ///
    /// # Errors
    ///
    /// - `BillingError::NotFound` if the tenant does not exist
    /// - `BillingError::Persistence` if the counter update was not committed;
    ///   no numbers are allocated in that case
    #[instrument(skip(self), fields(business_id = %business_id, today = %today))]
    pub async fn allocate(
        &self,
        business_id: BusinessId,
        today: BusinessDate,
    ) -> Result<AllocatedNumbers, BillingError> {
        let state = self.counters.increment_and_fetch(business_id, today).await?;

        let numbers = AllocatedNumbers::from_state(&state, &self.format).ok_or_else(|| {
            BillingError::Persistence("counter store returned a state without a receipt date".to_string())
        })?;
        if numbers.receipt_date < today {
            return Err(BillingError::Persistence(format!(
                "counter store committed receipt date {} for allocation on {}",
                numbers.receipt_date, today
            )));
        }

        info!(
            receipt_no = %numbers.receipt_no,
            invoice_no = %numbers.invoice_no,
            "Allocated bill numbers"
        );
        Ok(numbers)
    }

    /// Previews what [`allocate`](Self::allocate) would return right now
    ///
    /// Reads the counters without writing; previewing never burns a number.
    /// A concurrent allocation may still claim the previewed numbers first.
    pub async fn peek_next(
        &self,
        business_id: BusinessId,
        today: BusinessDate,
    ) -> Result<AllocatedNumbers, BillingError> {
        let state = self.counters.load_counters(business_id).await?;
        let next = state.advance(today);

        AllocatedNumbers::from_state(&next, &self.format)
            .ok_or_else(|| BillingError::Persistence("advanced counter lacks a receipt date".to_string()))
    }
}
