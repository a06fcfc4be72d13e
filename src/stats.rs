use crate::lifecycle::derive_status;
use crate::models::{package_amount, Account, AccountStatus, AdminStats, MonthRevenue};
use chrono::{Datelike, Local, NaiveDate};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn compute_stats(accounts: &[Account]) -> AdminStats {
    compute_stats_at(Local::now().date_naive(), accounts)
}

/// Single pass over every account and every history entry. An account
/// with no history contributes nothing to revenue.
pub fn compute_stats_at(today: NaiveDate, accounts: &[Account]) -> AdminStats {
    let mut total_revenue = 0.0;
    let mut this_month_revenue = 0.0;
    // "Last" means last visited in collection order, not most recent by
    // date. Long-standing dashboard behavior; keep it until product says
    // otherwise.
    let mut last_package_amount = 0.0;
    let mut active_accounts = 0;
    let mut expiring_soon = 0;

    for account in accounts {
        if derive_status(account.expire, today) == AccountStatus::Active {
            active_accounts += 1;
        }

        let days_left = (account.expire - today).num_days();
        if (0..=3).contains(&days_left) {
            expiring_soon += 1;
        }

        for entry in &account.history {
            let amount = package_amount(&entry.package);
            total_revenue += amount;
            if entry.date.month() == today.month() && entry.date.year() == today.year() {
                this_month_revenue += amount;
            }
            last_package_amount = amount;
        }
    }

    AdminStats {
        total_revenue,
        this_month_revenue,
        last_package_amount,
        active_accounts,
        expiring_soon,
    }
}

pub fn monthly_revenue_series(accounts: &[Account]) -> Vec<MonthRevenue> {
    monthly_revenue_series_for(Local::now().year(), accounts)
}

/// Revenue bucketed by calendar month of the given year. Always exactly
/// 12 entries, zero-filled, so the chart axis never shifts.
pub fn monthly_revenue_series_for(year: i32, accounts: &[Account]) -> Vec<MonthRevenue> {
    let mut revenue = [0.0f64; 12];
    for account in accounts {
        for entry in &account.history {
            if entry.date.year() == year {
                revenue[entry.date.month0() as usize] += package_amount(&entry.package);
            }
        }
    }

    MONTH_LABELS
        .iter()
        .zip(revenue)
        .map(|(&month, revenue)| MonthRevenue { month, revenue })
        .collect()
}
