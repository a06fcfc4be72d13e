use crate::errors::AppError;
use crate::models::{Account, AccountStatus, DurationUnit, HistoryEntry};
use chrono::{Duration, NaiveDate};

/// An account is inactive only once its expiry date is strictly in the
/// past. On the expiry day itself it still counts as active.
pub fn derive_status(expire: NaiveDate, today: NaiveDate) -> AccountStatus {
    if today > expire {
        AccountStatus::Inactive
    } else {
        AccountStatus::Active
    }
}

/// Recomputes every stored status against today. Storage is not trusted
/// here: a file written yesterday may carry statuses that expired overnight.
pub fn normalize_statuses(accounts: &mut [Account], today: NaiveDate) {
    for account in accounts {
        account.status = derive_status(account.expire, today);
    }
}

/// New expiry for a renewal of `count` units. When the current expiry is
/// still in the future the paid-for time stacks on top of it; lapsed and
/// new accounts start counting from today. Returns `None` when the
/// duration overflows or the result leaves the representable date range.
pub fn compute_renewal_expiry(
    existing_expiry: Option<NaiveDate>,
    today: NaiveDate,
    count: i64,
    unit: DurationUnit,
) -> Option<NaiveDate> {
    let base = match existing_expiry {
        Some(expire) if expire > today => expire,
        _ => today,
    };
    let days = count.checked_mul(unit.days())?;
    base.checked_add_signed(Duration::try_days(days)?)
}

/// Adds a new account or renews an existing one, appending exactly one
/// history entry either way. Input is validated before anything is
/// touched; on error the collection is unchanged.
pub fn add_or_renew(
    accounts: &mut Vec<Account>,
    account_id: &str,
    package: &str,
    count: i64,
    unit: DurationUnit,
    today: NaiveDate,
) -> Result<Account, AppError> {
    let account_id = account_id.trim();
    if account_id.is_empty() {
        return Err(AppError::bad_request("account id must not be empty"));
    }

    let package = package.trim();
    let amount: f64 = package
        .parse()
        .map_err(|_| AppError::bad_request("package must be a numeric amount"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::bad_request("package must be a non-negative amount"));
    }

    if count < 1 {
        return Err(AppError::bad_request("count must be a positive integer"));
    }

    let package_label = format!("${package}");
    let entry = HistoryEntry {
        date: today,
        package: package_label.clone(),
        added: format!("{count} {}", unit.label()),
    };

    if let Some(existing) = accounts.iter_mut().find(|a| a.account == account_id) {
        // expiry is computed before anything is assigned so an
        // out-of-range count leaves the account untouched
        let expire = compute_renewal_expiry(Some(existing.expire), today, count, unit)
            .ok_or_else(|| AppError::bad_request("renewal duration is out of range"))?;
        existing.expire = expire;
        existing.status = AccountStatus::Active;
        existing.package = package_label;
        existing.history.push(entry);
        return Ok(existing.clone());
    }

    let expire = compute_renewal_expiry(None, today, count, unit)
        .ok_or_else(|| AppError::bad_request("renewal duration is out of range"))?;
    let account = Account {
        account: account_id.to_string(),
        expire,
        status: AccountStatus::Active,
        package: package_label,
        history: vec![entry],
    };
    accounts.push(account.clone());
    Ok(account)
}

/// Removes the account with the given id. Returns whether anything was
/// removed; asking to remove an unknown id is not an error. The id is
/// trimmed here, at the same layer add_or_renew normalizes its input.
pub fn remove(accounts: &mut Vec<Account>, account_id: &str) -> bool {
    let account_id = account_id.trim();
    let before = accounts.len();
    accounts.retain(|a| a.account != account_id);
    accounts.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_flips_only_after_expiry_day() {
        let expire = date(2025, 5, 10);
        assert_eq!(derive_status(expire, date(2025, 5, 9)), AccountStatus::Active);
        assert_eq!(derive_status(expire, date(2025, 5, 10)), AccountStatus::Active);
        assert_eq!(derive_status(expire, date(2025, 5, 11)), AccountStatus::Inactive);
    }

    #[test]
    fn renewal_stacks_on_future_expiry() {
        let expire = compute_renewal_expiry(
            Some(date(2025, 6, 1)),
            date(2025, 5, 1),
            1,
            DurationUnit::Month,
        );
        assert_eq!(expire, Some(date(2025, 7, 1)));
    }

    #[test]
    fn renewal_restarts_from_today_when_lapsed() {
        let expire = compute_renewal_expiry(
            Some(date(2024, 1, 1)),
            date(2025, 5, 1),
            1,
            DurationUnit::Week,
        );
        assert_eq!(expire, Some(date(2025, 5, 8)));
    }

    #[test]
    fn renewal_on_expiry_day_counts_as_lapsed() {
        // expire == today is not strictly in the future, so the base is today
        let expire = compute_renewal_expiry(
            Some(date(2025, 5, 1)),
            date(2025, 5, 1),
            2,
            DurationUnit::Day,
        );
        assert_eq!(expire, Some(date(2025, 5, 3)));
    }

    #[test]
    fn add_inserts_account_with_single_history_entry() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);
        let added = add_or_renew(&mut accounts, "EA-100", "22", 1, DurationUnit::Month, today)
            .unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(added.account, "EA-100");
        assert_eq!(added.package, "$22");
        assert_eq!(added.status, AccountStatus::Active);
        assert_eq!(added.expire, date(2025, 5, 31));
        assert_eq!(added.history.len(), 1);
        assert_eq!(added.history[0].added, "1 month");
        assert_eq!(added.history[0].date, today);
    }

    #[test]
    fn renew_appends_history_and_preserves_prior_entries() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);
        add_or_renew(&mut accounts, "EA-100", "22", 1, DurationUnit::Month, today).unwrap();
        let renewed =
            add_or_renew(&mut accounts, "EA-100", "25", 2, DurationUnit::Week, today).unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(renewed.history.len(), 2);
        assert_eq!(renewed.history[0].package, "$22");
        assert_eq!(renewed.history[1].package, "$25");
        assert_eq!(renewed.package, "$25");
        // first renewal expires 2025-05-31, second stacks 14 days on top
        assert_eq!(renewed.expire, date(2025, 6, 14));
    }

    #[test]
    fn invalid_input_leaves_collection_unchanged() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);

        assert!(add_or_renew(&mut accounts, "  ", "22", 1, DurationUnit::Day, today).is_err());
        assert!(add_or_renew(&mut accounts, "EA-1", "abc", 1, DurationUnit::Day, today).is_err());
        assert!(add_or_renew(&mut accounts, "EA-1", "NaN", 1, DurationUnit::Day, today).is_err());
        assert!(add_or_renew(&mut accounts, "EA-1", "22", 0, DurationUnit::Day, today).is_err());
        assert!(add_or_renew(&mut accounts, "EA-1", "22", -3, DurationUnit::Day, today).is_err());
        assert!(accounts.is_empty());
    }

    #[test]
    fn oversized_count_is_rejected_not_wrapped() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);

        // multiplication by the unit would overflow i64
        let result =
            add_or_renew(&mut accounts, "EA-1", "22", i64::MAX, DurationUnit::Month, today);
        assert!(result.is_err());

        // fits in i64 but lands beyond the representable date range
        let result = add_or_renew(
            &mut accounts,
            "EA-1",
            "22",
            100_000_000_000,
            DurationUnit::Day,
            today,
        );
        assert!(result.is_err());
        assert!(accounts.is_empty());

        // same guard on the renewal path: the existing account is untouched
        add_or_renew(&mut accounts, "EA-1", "22", 1, DurationUnit::Month, today).unwrap();
        let result =
            add_or_renew(&mut accounts, "EA-1", "25", i64::MAX, DurationUnit::Day, today);
        assert!(result.is_err());
        assert_eq!(accounts[0].expire, date(2025, 5, 31));
        assert_eq!(accounts[0].history.len(), 1);
        assert_eq!(accounts[0].package, "$22");
    }

    #[test]
    fn expiry_out_of_range_returns_none() {
        let today = date(2025, 5, 1);
        assert_eq!(
            compute_renewal_expiry(None, today, i64::MAX, DurationUnit::Month),
            None
        );
        assert_eq!(
            compute_renewal_expiry(None, today, 100_000_000_000, DurationUnit::Day),
            None
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);
        add_or_renew(&mut accounts, "EA-100", "22", 1, DurationUnit::Month, today).unwrap();

        assert!(remove(&mut accounts, "EA-100"));
        assert!(!remove(&mut accounts, "EA-100"));
        assert!(!remove(&mut accounts, "never-existed"));
        assert!(accounts.is_empty());
    }

    #[test]
    fn remove_trims_surrounding_whitespace() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);
        add_or_renew(&mut accounts, "EA-100", "22", 1, DurationUnit::Month, today).unwrap();

        assert!(remove(&mut accounts, "  EA-100 "));
        assert!(accounts.is_empty());
    }

    #[test]
    fn normalize_recomputes_stale_statuses() {
        let mut accounts = Vec::new();
        let today = date(2025, 5, 1);
        add_or_renew(&mut accounts, "EA-100", "22", 1, DurationUnit::Day, today).unwrap();

        normalize_statuses(&mut accounts, date(2025, 5, 3));
        assert_eq!(accounts[0].status, AccountStatus::Inactive);

        normalize_statuses(&mut accounts, today);
        assert_eq!(accounts[0].status, AccountStatus::Active);
    }
}
