//! Billing Domain Ports
//!
//! Store interfaces the billing services depend on. `infra_db` provides the
//! PostgreSQL adapters; the `mock` module provides in-memory ones.
//!
//! The one hard requirement on adapters is that
//! [`CounterPort::increment_and_fetch`] is a single atomic read-modify-write
//! on the tenant record. Separate read and write calls would hand the same
//! receipt number to two concurrent bill creations.

use async_trait::async_trait;

use core_kernel::{BillId, BusinessDate, BusinessId, DomainPort, PortError};
use crate::bill::{Bill, BillType};
use crate::counter::TenantCounterState;
use crate::ledger::LedgerEntry;

/// Access to the counters embedded in the tenant record
#[async_trait]
pub trait CounterPort: DomainPort {
    /// Atomically applies [`TenantCounterState::advance`] for `today` and
    /// returns the committed post-image
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if the tenant does not exist; any other error
    /// means nothing was committed.
    async fn increment_and_fetch(
        &self,
        business_id: BusinessId,
        today: BusinessDate,
    ) -> Result<TenantCounterState, PortError>;

    /// Reads the current counters without modifying them
    async fn load_counters(&self, business_id: BusinessId) -> Result<TenantCounterState, PortError>;
}

/// Filters for listing bills
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillQuery {
    pub bill_type: Option<BillType>,
    /// Inclusive lower bound on the bill date
    pub from: Option<BusinessDate>,
    /// Inclusive upper bound on the bill date
    pub to: Option<BusinessDate>,
}

impl BillQuery {
    pub fn of_type(bill_type: BillType) -> Self {
        Self {
            bill_type: Some(bill_type),
            ..Default::default()
        }
    }

    pub fn between(mut self, from: BusinessDate, to: BusinessDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, bill: &Bill) -> bool {
        self.bill_type.map_or(true, |t| t == bill.bill_type)
            && self.from.map_or(true, |from| bill.date >= from)
            && self.to.map_or(true, |to| bill.date <= to)
    }
}

/// Bill document collection
#[async_trait]
pub trait BillPort: DomainPort {
    async fn insert_bill(&self, bill: &Bill) -> Result<(), PortError>;

    /// Fetches a bill owned by `business_id`; other tenants' bills are NotFound
    async fn get_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<Bill, PortError>;

    /// Replaces the stored document
    async fn update_bill(&self, bill: &Bill) -> Result<(), PortError>;

    async fn delete_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<(), PortError>;

    /// Bills ordered by date then creation time, newest first
    async fn list_bills(
        &self,
        business_id: BusinessId,
        query: &BillQuery,
    ) -> Result<Vec<Bill>, PortError>;
}

/// Filters for reading the ledger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerQuery {
    pub bill_id: Option<BillId>,
    pub limit: Option<u32>,
}

impl LedgerQuery {
    pub fn for_bill(bill_id: BillId) -> Self {
        Self {
            bill_id: Some(bill_id),
            limit: None,
        }
    }
}

/// Append-only ledger store
#[async_trait]
pub trait LedgerPort: DomainPort {
    /// Appends one entry atomically
    async fn append(&self, entry: &LedgerEntry) -> Result<(), PortError>;

    /// Entries for the tenant in reverse commit order
    async fn query_by_tenant(
        &self,
        business_id: BusinessId,
        query: &LedgerQuery,
    ) -> Result<Vec<LedgerEntry>, PortError>;
}

/// In-memory port implementations for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Counters keyed by tenant; the write lock makes increment-and-fetch atomic
    #[derive(Debug, Default)]
    pub struct MockCounterPort {
        counters: Arc<RwLock<HashMap<BusinessId, TenantCounterState>>>,
        failing: AtomicBool,
    }

    impl MockCounterPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_tenant(business_id: BusinessId, state: TenantCounterState) -> Self {
            let port = Self::new();
            port.counters.write().await.insert(business_id, state);
            port
        }

        pub async fn register(&self, business_id: BusinessId) {
            self.counters.write().await.entry(business_id).or_default();
        }

        /// Makes every subsequent write fail as if the store were down
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl DomainPort for MockCounterPort {}

    #[async_trait]
    impl CounterPort for MockCounterPort {
        async fn increment_and_fetch(
            &self,
            business_id: BusinessId,
            today: BusinessDate,
        ) -> Result<TenantCounterState, PortError> {
            let mut counters = self.counters.write().await;
            let state = counters
                .get_mut(&business_id)
                .ok_or_else(|| PortError::not_found("Business", business_id))?;
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("counter store unavailable"));
            }
            *state = state.advance(today);
            Ok(*state)
        }

        async fn load_counters(&self, business_id: BusinessId) -> Result<TenantCounterState, PortError> {
            self.counters
                .read()
                .await
                .get(&business_id)
                .copied()
                .ok_or_else(|| PortError::not_found("Business", business_id))
        }
    }

    #[derive(Debug, Default)]
    pub struct MockBillPort {
        bills: Arc<RwLock<HashMap<BillId, Bill>>>,
    }

    impl MockBillPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn len(&self) -> usize {
            self.bills.read().await.len()
        }
    }

    impl DomainPort for MockBillPort {}

    #[async_trait]
    impl BillPort for MockBillPort {
        async fn insert_bill(&self, bill: &Bill) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            if bills.contains_key(&bill.id) {
                return Err(PortError::conflict(format!("bill {} already exists", bill.id)));
            }
            bills.insert(bill.id, bill.clone());
            Ok(())
        }

        async fn get_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<Bill, PortError> {
            self.bills
                .read()
                .await
                .get(&bill_id)
                .filter(|b| b.business_id == business_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Bill", bill_id))
        }

        async fn update_bill(&self, bill: &Bill) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            match bills.get_mut(&bill.id) {
                Some(stored) if stored.business_id == bill.business_id => {
                    *stored = bill.clone();
                    Ok(())
                }
                _ => Err(PortError::not_found("Bill", bill.id)),
            }
        }

        async fn delete_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            match bills.get(&bill_id) {
                Some(stored) if stored.business_id == business_id => {
                    bills.remove(&bill_id);
                    Ok(())
                }
                _ => Err(PortError::not_found("Bill", bill_id)),
            }
        }

        async fn list_bills(
            &self,
            business_id: BusinessId,
            query: &BillQuery,
        ) -> Result<Vec<Bill>, PortError> {
            let mut bills: Vec<Bill> = self
                .bills
                .read()
                .await
                .values()
                .filter(|b| b.business_id == business_id && query.matches(b))
                .cloned()
                .collect();
            bills.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            Ok(bills)
        }
    }

    /// Ledger kept in commit order
    #[derive(Debug, Default)]
    pub struct MockLedgerPort {
        entries: Arc<RwLock<Vec<LedgerEntry>>>,
        failing: AtomicBool,
    }

    impl MockLedgerPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.entries.read().await.len()
        }
    }

    impl DomainPort for MockLedgerPort {}

    #[async_trait]
    impl LedgerPort for MockLedgerPort {
        async fn append(&self, entry: &LedgerEntry) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("ledger store unavailable"));
            }
            self.entries.write().await.push(entry.clone());
            Ok(())
        }

        async fn query_by_tenant(
            &self,
            business_id: BusinessId,
            query: &LedgerQuery,
        ) -> Result<Vec<LedgerEntry>, PortError> {
            let entries = self.entries.read().await;
            let limit = query.limit.map_or(usize::MAX, |l| l as usize);
            Ok(entries
                .iter()
                .rev()
                .filter(|e| e.business_id == business_id)
                .filter(|e| query.bill_id.map_or(true, |id| e.bill_id == id))
                .take(limit)
                .cloned()
                .collect())
        }
    }
}
