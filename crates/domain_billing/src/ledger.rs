//! Append-only transaction ledger
//!
//! Every committed bill mutation is mirrored as one immutable entry holding a
//! full copy of the bill. Entries are never updated or deleted; a deleted
//! bill keeps its history here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::{BillId, BusinessId, OperationMetadata, TransactionId};
use crate::bill::{Bill, BillType};
use crate::ports::LedgerPort;

/// The bill mutation an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerOperation {
    Add,
    Update,
    Delete,
}

impl LedgerOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerOperation::Add => "add",
            LedgerOperation::Update => "update",
            LedgerOperation::Delete => "delete",
        }
    }
}

impl std::str::FromStr for LedgerOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(LedgerOperation::Add),
            "update" => Ok(LedgerOperation::Update),
            "delete" => Ok(LedgerOperation::Delete),
            other => Err(format!("unknown ledger operation '{other}'")),
        }
    }
}

/// One immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: TransactionId,
    pub business_id: BusinessId,
    pub operation: LedgerOperation,
    pub bill_type: BillType,
    /// Reference to the bill; the bill may no longer exist
    pub bill_id: BillId,
    /// Owned copy of the bill at the moment of the operation
    pub data_snapshot: Bill,
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Captures `bill` by value so later edits to the live bill cannot reach the entry
    pub fn capture(
        business_id: BusinessId,
        operation: LedgerOperation,
        bill: &Bill,
        recorded_by: Option<String>,
    ) -> Self {
        Self {
            id: TransactionId::new_v7(),
            business_id,
            operation,
            bill_type: bill.bill_type,
            bill_id: bill.id,
            data_snapshot: bill.clone(),
            recorded_by,
            created_at: Utc::now(),
        }
    }
}

/// Result of a best-effort ledger append
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Recorded { entry_id: TransactionId },
    /// The append failed; the bill mutation stands and the caller gets a warning
    Degraded { warning: String },
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded { .. })
    }

    pub fn into_warning(self) -> Option<String> {
        match self {
            RecordOutcome::Recorded { .. } => None,
            RecordOutcome::Degraded { warning } => Some(warning),
        }
    }
}

/// Appends ledger entries after bill mutations have committed
///
/// Performs no validation of the bill. Failures are logged and returned as
/// `RecordOutcome::Degraded`, never as errors.
#[derive(Clone)]
pub struct LedgerRecorder {
    ledger: Arc<dyn LedgerPort>,
}

impl LedgerRecorder {
    pub fn new(ledger: Arc<dyn LedgerPort>) -> Self {
        Self { ledger }
    }

    pub fn port(&self) -> &Arc<dyn LedgerPort> {
        &self.ledger
    }

    /// Records `bill` as it stands after `operation` (before removal for deletes)
    pub async fn record_mutation(
        &self,
        business_id: BusinessId,
        operation: LedgerOperation,
        bill: &Bill,
        metadata: Option<&OperationMetadata>,
    ) -> RecordOutcome {
        let recorded_by = metadata.and_then(|m| m.initiated_by.clone());
        let entry = LedgerEntry::capture(business_id, operation, bill, recorded_by);

        match self.ledger.append(&entry).await {
            Ok(()) => {
                debug!(
                    business_id = %business_id,
                    bill_id = %bill.id,
                    operation = operation.as_str(),
                    entry_id = %entry.id,
                    "Ledger entry appended"
                );
                RecordOutcome::Recorded { entry_id: entry.id }
            }
            Err(e) => {
                warn!(
                    business_id = %business_id,
                    bill_id = %bill.id,
                    operation = operation.as_str(),
                    correlation_id = ?metadata.and_then(|m| m.correlation_id.as_deref()),
                    error = %e,
                    "Ledger append failed; bill mutation kept"
                );
                RecordOutcome::Degraded {
                    warning: format!(
                        "bill {} saved but its {} was not recorded in the transaction ledger: {}",
                        bill.receipt_no,
                        operation.as_str(),
                        e
                    ),
                }
            }
        }
    }
}
