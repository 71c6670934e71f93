//! Bill mutation service
//!
//! Orchestrates the three steps of every bill write: number allocation (on
//! create only), the bill store, and the ledger. Allocation and store errors
//! fail the call; ledger errors become a warning on the result.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{BillId, BusinessDate, BusinessId, OperationMetadata};
use crate::bill::{Bill, BillUpdate, BillingProfile, NewBill};
use crate::error::BillingError;
use crate::ledger::{LedgerOperation, LedgerRecorder};
use crate::numbering::NumberingAllocator;
use crate::ports::{BillPort, BillQuery};

/// A committed bill write plus any ledger degradation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub bill: Bill,
    pub ledger_warning: Option<String>,
}

impl MutationOutcome {
    pub fn warnings(&self) -> Vec<String> {
        self.ledger_warning.iter().cloned().collect()
    }
}

/// Service for creating, updating and deleting bills
#[derive(Clone)]
pub struct BillService {
    allocator: NumberingAllocator,
    bills: Arc<dyn BillPort>,
    recorder: LedgerRecorder,
}

impl BillService {
    pub fn new(allocator: NumberingAllocator, bills: Arc<dyn BillPort>, recorder: LedgerRecorder) -> Self {
        Self {
            allocator,
            bills,
            recorder,
        }
    }

    pub fn allocator(&self) -> &NumberingAllocator {
        &self.allocator
    }

    pub fn recorder(&self) -> &LedgerRecorder {
        &self.recorder
    }

    /// Creates a bill with freshly allocated numbers
    ///
    /// The draft is validated before allocation so a rejected draft never
    /// consumes a number. If the bill insert fails after allocation, the
    /// allocated numbers are not reused.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed draft
    /// - `NotFound` if the tenant does not exist
    /// - `Persistence` if allocation or the bill insert failed
    #[instrument(skip(self, draft, profile, metadata), fields(business_id = %business_id, bill_type = draft.bill_type.as_str()))]
    pub async fn create_bill(
        &self,
        business_id: BusinessId,
        draft: NewBill,
        profile: BillingProfile,
        today: BusinessDate,
        metadata: Option<&OperationMetadata>,
    ) -> Result<MutationOutcome, BillingError> {
        draft.validate()?;

        let numbers = self.allocator.allocate(business_id, today).await?;
        let bill = Bill::issue(business_id, draft, &numbers, &profile);
        self.bills.insert_bill(&bill).await?;

        info!(
            bill_id = %bill.id,
            receipt_no = %bill.receipt_no,
            invoice_no = %bill.invoice_no,
            net_amount = %bill.net_amount,
            "Bill created"
        );

        let outcome = self
            .recorder
            .record_mutation(business_id, LedgerOperation::Add, &bill, metadata)
            .await;
        Ok(MutationOutcome {
            bill,
            ledger_warning: outcome.into_warning(),
        })
    }

    /// Applies a payment/party update to a stored bill
    #[instrument(skip(self, update, metadata), fields(business_id = %business_id, bill_id = %bill_id))]
    pub async fn update_bill(
        &self,
        business_id: BusinessId,
        bill_id: BillId,
        update: BillUpdate,
        metadata: Option<&OperationMetadata>,
    ) -> Result<MutationOutcome, BillingError> {
        if update.is_empty() {
            return Err(BillingError::validation("update contains no changes"));
        }

        let mut bill = self.bills.get_bill(business_id, bill_id).await?;
        bill.apply(update)?;
        self.bills.update_bill(&bill).await?;

        info!(receipt_no = %bill.receipt_no, "Bill updated");

        let outcome = self
            .recorder
            .record_mutation(business_id, LedgerOperation::Update, &bill, metadata)
            .await;
        Ok(MutationOutcome {
            bill,
            ledger_warning: outcome.into_warning(),
        })
    }

    /// Removes a bill; the ledger keeps its last state
    #[instrument(skip(self, metadata), fields(business_id = %business_id, bill_id = %bill_id))]
    pub async fn delete_bill(
        &self,
        business_id: BusinessId,
        bill_id: BillId,
        metadata: Option<&OperationMetadata>,
    ) -> Result<MutationOutcome, BillingError> {
        let bill = self.bills.get_bill(business_id, bill_id).await?;
        self.bills.delete_bill(business_id, bill_id).await?;

        info!(receipt_no = %bill.receipt_no, "Bill deleted");

        let outcome = self
            .recorder
            .record_mutation(business_id, LedgerOperation::Delete, &bill, metadata)
            .await;
        Ok(MutationOutcome {
            bill,
            ledger_warning: outcome.into_warning(),
        })
    }

    pub async fn get_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<Bill, BillingError> {
        Ok(self.bills.get_bill(business_id, bill_id).await?)
    }

    pub async fn list_bills(
        &self,
        business_id: BusinessId,
        query: &BillQuery,
    ) -> Result<Vec<Bill>, BillingError> {
        Ok(self.bills.list_bills(business_id, query).await?)
    }
}
