use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One renewal payment. Entries are append-only: once pushed onto an
/// account's history they are never edited or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    /// Amount label as displayed, e.g. "$22".
    pub package: String,
    /// Duration label as entered, e.g. "1 month".
    pub added: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// A subscription slot, keyed by its `account` id. The stored `status`
/// is advisory only; it is recomputed from `expire` on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account: String,
    pub expire: NaiveDate,
    pub status: AccountStatus,
    /// Mirrors the `package` of the most recent history entry.
    pub package: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Day,
    Week,
    Month,
}

impl DurationUnit {
    /// A "month" is a flat 30 days here, matching what subscribers were
    /// sold. Do not switch this to calendar-month arithmetic.
    pub fn days(self) -> i64 {
        match self {
            DurationUnit::Day => 1,
            DurationUnit::Week => 7,
            DurationUnit::Month => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationUnit::Day => "day",
            DurationUnit::Week => "week",
            DurationUnit::Month => "month",
        }
    }
}

/// Dashboard figures derived from the collection on demand, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_revenue: f64,
    pub this_month_revenue: f64,
    pub last_package_amount: f64,
    pub active_accounts: usize,
    pub expiring_soon: usize,
}

/// One bar of the revenue chart. The series is always 12 long, Jan-Dec.
#[derive(Debug, Clone, Serialize)]
pub struct MonthRevenue {
    pub month: &'static str,
    pub revenue: f64,
}

#[derive(Debug, Deserialize)]
pub struct RenewRequest {
    pub account: String,
    /// Numeric amount without the currency sign, e.g. "22".
    pub package: String,
    pub count: i64,
    pub unit: DurationUnit,
}

#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub account: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    /// "ready" when `text` matches the current collection, "pending"
    /// while a fresh summary is being generated.
    pub status: &'static str,
    pub text: Option<String>,
}

/// Reads the numeric part of a "$22"-style label. Unparseable labels
/// count as zero revenue rather than poisoning the totals.
pub fn package_amount(label: &str) -> f64 {
    label.trim().trim_start_matches('$').parse().unwrap_or(0.0)
}
