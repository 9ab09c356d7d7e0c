//! Business logic services
//!
//! Services hold a reference to the storage coordinator and enforce the
//! rules around it: validation, series generation, load-time
//! reconciliation, and reporting. Generation and reporting are pure and
//! take an explicit `today` where dates matter.

pub mod category;
pub mod generation;
pub mod payout;
pub mod person;
pub mod reconciliation;
pub mod reports;
pub mod tag;
pub mod transaction;
pub mod validation;

pub use category::CategoryService;
pub use generation::{
    expand_template, payout_series, salary_series, ExpansionMode, NewTransaction,
    DEFAULT_RECURRING_MONTHS,
};
pub use payout::PayoutService;
pub use person::PersonService;
pub use reconciliation::{ReconciliationReport, ReconciliationService};
pub use reports::{
    balance, filter_by_period, monthly_projections, total, totals_by_category, totals_by_tag,
    PeriodFilter,
};
pub use tag::TagService;
pub use transaction::{TransactionPatch, TransactionService};
