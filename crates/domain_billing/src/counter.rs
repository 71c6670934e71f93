//! Per-tenant numbering counters
//!
//! The counters live inside the tenant record. `advance` is the single
//! read-modify-write step; stores must apply it atomically (see
//! `ports::CounterPort::increment_and_fetch`).

use core_kernel::BusinessDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Counter state embedded in every business record
///
/// `last_receipt_number` is only meaningful for `last_receipt_date`;
/// `last_invoice_number` never decreases for the lifetime of the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TenantCounterState {
    pub last_receipt_number: u64,
    #[serde(
        serialize_with = "serialize_optional_date",
        deserialize_with = "deserialize_optional_date",
        default
    )]
    pub last_receipt_date: Option<BusinessDate>,
    pub last_invoice_number: u64,
}

impl TenantCounterState {
    /// Returns the state after one allocation on `today`
    ///
    /// The receipt date never moves backwards. A later `today` (or a first
    /// allocation) restarts the receipt sequence at 1; a `today` earlier than
    /// `last_receipt_date` continues the stored day's sequence, so a tenant
    /// whose local day shifts back cannot reissue a receipt number. The
    /// invoice sequence always increments.
    pub fn advance(&self, today: BusinessDate) -> Self {
        let (receipt_date, receipt_number) = match self.last_receipt_date {
            Some(last) if last >= today => (last, self.last_receipt_number + 1),
            _ => (today, 1),
        };

        Self {
            last_receipt_number: receipt_number,
            last_receipt_date: Some(receipt_date),
            last_invoice_number: self.last_invoice_number + 1,
        }
    }
}

/// Presentation of invoice numbers
///
/// Padding is cosmetic; uniqueness comes from the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceNumberFormat {
    width: usize,
}

impl InvoiceNumberFormat {
    pub const MAX_WIDTH: usize = 12;

    /// Zero-pads to `width` digits, clamped to `1..=MAX_WIDTH`
    pub fn zero_padded(width: usize) -> Self {
        Self {
            width: width.clamp(1, Self::MAX_WIDTH),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn format(&self, sequence: u64) -> String {
        format!("{:0width$}", sequence, width = self.width)
    }
}

impl Default for InvoiceNumberFormat {
    fn default() -> Self {
        Self::zero_padded(1)
    }
}

/// Formats a receipt number as `<YYYY-MM-DD>-<n>`
pub fn format_receipt_number(date: BusinessDate, sequence: u64) -> String {
    format!("{}-{}", date, sequence)
}

/// Numbers handed to a new bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedNumbers {
    pub receipt_no: String,
    pub invoice_no: String,
    pub receipt_date: BusinessDate,
    pub receipt_sequence: u64,
    pub invoice_sequence: u64,
}

impl AllocatedNumbers {
    /// Renders the numbers carried by a post-allocation counter state
    ///
    /// Returns `None` for a state that has never allocated (no receipt date).
    pub fn from_state(state: &TenantCounterState, format: &InvoiceNumberFormat) -> Option<Self> {
        let date = state.last_receipt_date?;
        Some(Self {
            receipt_no: format_receipt_number(date, state.last_receipt_number),
            invoice_no: format.format(state.last_invoice_number),
            receipt_date: date,
            receipt_sequence: state.last_receipt_number,
            invoice_sequence: state.last_invoice_number,
        })
    }
}

fn serialize_optional_date<S>(date: &Option<BusinessDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.collect_str(date),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<BusinessDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
