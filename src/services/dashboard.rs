//! Dashboard statistics aggregated from six upstream collections.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::record::{self, coerce_f64, is_truthy};
use crate::services::growth::StatBucket;
use crate::upstream::UpstreamClient;

/// Aggregated statistics for the dashboard page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub users_today: u64,
    pub users_without_subs: u64,

    pub total_payments: u64,
    pub payments_today: u64,
    pub payments_sum: f64,
    pub payments_sum_today: f64,

    pub total_subs: u64,
    pub expired_subs: u64,

    pub total_refs: u64,
    pub refs_today: u64,

    pub servers_used: u64,
    pub servers_available: u64,
    pub servers_disabled: u64,

    pub total_gifts: u64,
    pub gifts_today: u64,
    pub gifts_used: u64,
    pub gifts_unlimited: u64,

    pub last_30_days: Vec<String>,
    pub users_growth_month: Vec<u64>,
    pub subs_growth_month: Vec<u64>,
}

/// Raw collections the statistics are computed from.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub users: Vec<Value>,
    pub payments: Vec<Value>,
    pub subscriptions: Vec<Value>,
    pub referrals: Vec<Value>,
    pub servers: Vec<Value>,
    pub gifts: Vec<Value>,
}

/// Fetch every collection one after another. A failed fetch leaves its
/// collection empty and does not affect the others.
pub async fn collect(client: &UpstreamClient) -> DashboardData {
    DashboardData {
        users: client.fetch_list("/users/", "users").await,
        payments: client.fetch_list("/payments/", "payments").await,
        subscriptions: client.fetch_list("/keys/", "subscriptions").await,
        referrals: client.fetch_list("/referrals/", "referrals").await,
        servers: client.fetch_list("/servers/", "servers").await,
        gifts: client.fetch_list("/gifts/", "gifts").await,
    }
}

/// Fetch all collections and aggregate them as of the current time.
pub async fn get_stats(client: &UpstreamClient) -> DashboardStats {
    let data = collect(client).await;
    compute(&data, Utc::now())
}

/// Aggregate the collections as of `now`.
pub fn compute(data: &DashboardData, now: DateTime<Utc>) -> DashboardStats {
    let today = now.date_naive();
    let today_prefix = today.format("%Y-%m-%d").to_string();
    let created_today = |r: &&Value| record::starts_with(r, "created_at", &today_prefix);
    let now_secs = now.timestamp_millis() as f64 / 1000.0;

    let payments_today: Vec<&Value> = data.payments.iter().filter(created_today).collect();

    let expired_subs = data
        .subscriptions
        .iter()
        .filter(|s| is_expired(s, now_secs))
        .count();

    let owners: HashSet<String> = data
        .subscriptions
        .iter()
        .map(|s| record::identity(s, "tg_id"))
        .collect();
    let users_without_subs = data
        .users
        .iter()
        .filter(|u| !owners.contains(&record::identity(u, "tg_id")))
        .count();

    let servers_used = data
        .servers
        .iter()
        .filter(|s| record::flag(s, "enabled"))
        .count();
    let servers_available = data
        .servers
        .iter()
        .filter(|s| record::flag(s, "enabled") && record::number_or_zero(s, "max_keys") > 0.0)
        .count();

    let mut users_growth = StatBucket::last_30_days(today);
    for day in data.users.iter().filter_map(|u| date_prefix(u.get("created_at")?.as_str()?)) {
        users_growth.record(day);
    }

    let mut subs_growth = StatBucket::last_30_days(today);
    for day in data.subscriptions.iter().filter_map(|s| subscription_created_on(s.get("created_at")?)) {
        subs_growth.record(day);
    }

    DashboardStats {
        total_users: data.users.len() as u64,
        users_today: data.users.iter().filter(created_today).count() as u64,
        users_without_subs: users_without_subs as u64,

        total_payments: data.payments.len() as u64,
        payments_today: payments_today.len() as u64,
        payments_sum: sum_amounts(data.payments.iter()),
        payments_sum_today: sum_amounts(payments_today.into_iter()),

        total_subs: data.subscriptions.len() as u64,
        expired_subs: expired_subs as u64,

        total_refs: data.referrals.len() as u64,
        refs_today: data.referrals.iter().filter(created_today).count() as u64,

        servers_used: servers_used as u64,
        servers_available: servers_available as u64,
        servers_disabled: (data.servers.len() - servers_used) as u64,

        total_gifts: data.gifts.len() as u64,
        gifts_today: data.gifts.iter().filter(created_today).count() as u64,
        gifts_used: data.gifts.iter().filter(|g| record::flag(g, "is_used")).count() as u64,
        gifts_unlimited: data
            .gifts
            .iter()
            .filter(|g| record::flag(g, "is_unlimited"))
            .count() as u64,

        last_30_days: users_growth.labels(),
        users_growth_month: users_growth.counts(),
        subs_growth_month: subs_growth.counts(),
    }
}

fn sum_amounts<'a>(payments: impl Iterator<Item = &'a Value>) -> f64 {
    payments.map(|p| record::number_or_zero(p, "amount")).sum()
}

/// Expiry is compared in epoch seconds. Falsy or non-numeric expiry never
/// counts as expired.
fn is_expired(subscription: &Value, now_secs: f64) -> bool {
    subscription
        .get("expiry_time")
        .filter(|v| is_truthy(v))
        .and_then(coerce_f64)
        .is_some_and(|expiry| expiry < now_secs)
}

/// Calendar date from the first ten characters of an ISO timestamp.
fn date_prefix(value: &str) -> Option<NaiveDate> {
    let end = value.char_indices().nth(10).map_or(value.len(), |(i, _)| i);
    NaiveDate::parse_from_str(&value[..end], "%Y-%m-%d").ok()
}

/// UTC calendar date of an epoch-milliseconds value.
fn date_from_millis(millis: f64) -> Option<NaiveDate> {
    let secs = (millis / 1000.0).floor();
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.date_naive())
}

/// Subscription creation date. Accepts epoch milliseconds (number or numeric
/// string) or a string whose first ten characters look like `YYYY-MM-DD`.
fn subscription_created_on(created: &Value) -> Option<NaiveDate> {
    if !is_truthy(created) {
        return None;
    }
    match created {
        Value::Number(n) => date_from_millis(n.as_f64()?),
        Value::String(s) => {
            let head: String = s.chars().take(10).collect();
            if head.chars().count() == 10 && head.matches('-').count() == 2 {
                NaiveDate::parse_from_str(&head, "%Y-%m-%d").ok()
            } else {
                date_from_millis(s.trim().parse::<f64>().ok()?)
            }
        }
        _ => None,
    }
}
