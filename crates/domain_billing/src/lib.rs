//! Billing Domain - Bill numbering, bills and the transaction ledger
//!
//! Every bill gets two numbers when it is created:
//!
//! - a **receipt number** `<YYYY-MM-DD>-<n>` where `n` restarts at 1 on the
//!   first bill of each tenant-local day
//! - an **invoice number**, a per-tenant sequence that never resets
//!
//! Both come from counters embedded in the tenant record and are advanced in
//! one atomic store operation (see [`ports::CounterPort`]).
//!
//! Every committed create, update and delete is mirrored into an append-only
//! ledger holding an owned snapshot of the bill. Ledger failures never undo
//! the bill write; they surface as a warning on [`service::MutationOutcome`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillService, NewBill, BillType, PaymentType, LineItem};
//!
//! let draft = NewBill::new(BillType::Sales, PaymentType::Cash)
//!     .item(LineItem::new("Wheat", 10, dec!(500), dec!(22.40)));
//!
//! let outcome = service.create_bill(business_id, draft, profile, today, None).await?;
//! assert_eq!(outcome.bill.receipt_no, "2024-03-10-1");
//! ```

pub mod counter;
pub mod numbering;
pub mod bill;
pub mod ledger;
pub mod ports;
pub mod service;
pub mod report;
pub mod error;

pub use counter::{AllocatedNumbers, InvoiceNumberFormat, TenantCounterState};
pub use numbering::NumberingAllocator;
pub use bill::{
    Bill, BillType, BillUpdate, BillingProfile, Expense, LineItem, NewBill, PaymentStatus,
    PaymentType,
};
pub use ledger::{LedgerEntry, LedgerOperation, LedgerRecorder, RecordOutcome};
pub use ports::{BillPort, BillQuery, CounterPort, LedgerPort, LedgerQuery};
pub use service::{BillService, MutationOutcome};
pub use report::{BillSummary, DailyTotal, TypeSummary};
pub use error::BillingError;
