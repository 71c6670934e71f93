//! Request and response bodies

pub mod business;
pub mod bill;
pub mod ledger;
pub mod report;
