use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::asset::Asset;
use crate::report::classifier::{has_expired, is_expiring_soon, DEFAULT_THRESHOLD_DAYS};

/// Label used when grouping assets whose category is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssetSummary {
    #[schema(example = 120)]
    pub total_assets: u64,
    #[schema(example = 95)]
    pub assigned_assets: u64,
    #[schema(example = 25)]
    pub not_assigned_assets: u64,
    #[schema(example = 4)]
    pub expired_assets: u64,
    #[schema(example = 9)]
    pub expiring_soon_assets: u64,
}

/// Summary counts over the FULL asset list, not a filtered view.
/// Expiring-soon excludes already-expired so the two never overlap.
pub fn summarize(assets: &[Asset], today: NaiveDate) -> AssetSummary {
    let total = assets.len() as u64;
    let assigned = assets.iter().filter(|a| a.user_id.is_some()).count() as u64;
    let expired = assets
        .iter()
        .filter(|a| has_expired(a.expiry_date, today))
        .count() as u64;
    let expiring_soon = assets
        .iter()
        .filter(|a| {
            is_expiring_soon(a.expiry_date, today, DEFAULT_THRESHOLD_DAYS)
                && !has_expired(a.expiry_date, today)
        })
        .count() as u64;

    AssetSummary {
        total_assets: total,
        assigned_assets: assigned,
        not_assigned_assets: total - assigned,
        expired_assets: expired,
        expiring_soon_assets: expiring_soon,
    }
}

pub fn count_by_status(assets: &[Asset]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for asset in assets {
        *counts.entry(asset.status.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_category(assets: &[Asset]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for asset in assets {
        let category = if asset.category_name.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            asset.category_name.clone()
        };
        *counts.entry(category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testutil::{sample_asset, today};

    #[test]
    fn test_assigned_plus_not_assigned_equals_total() {
        let mut a = sample_asset(1);
        a.user_id = Some(3);
        let mut b = sample_asset(2);
        b.user_id = None;
        let mut c = sample_asset(3);
        c.user_id = Some(4);

        let summary = summarize(&[a, b, c], today());
        assert_eq!(summary.total_assets, 3);
        assert_eq!(
            summary.assigned_assets + summary.not_assigned_assets,
            summary.total_assets
        );
        assert_eq!(summary.assigned_assets, 2);
    }

    #[test]
    fn test_expired_and_expiring_counts_do_not_overlap() {
        let now = today();
        let mut expired = sample_asset(1);
        expired.expiry_date = Some(now - chrono::Duration::days(2));
        let mut soon = sample_asset(2);
        soon.expiry_date = Some(now + chrono::Duration::days(5));
        let mut none = sample_asset(3);
        none.expiry_date = None;

        let summary = summarize(&[expired, soon, none], now);
        assert_eq!(summary.expired_assets, 1);
        assert_eq!(summary.expiring_soon_assets, 1);
    }

    #[test]
    fn test_group_by_status() {
        let mut a = sample_asset(1);
        a.status = "Active".to_string();
        let mut b = sample_asset(2);
        b.status = "Active".to_string();
        let mut c = sample_asset(3);
        c.status = "Disposed".to_string();

        let counts = count_by_status(&[a, b, c]);
        assert_eq!(counts.get("Active"), Some(&2));
        assert_eq!(counts.get("Disposed"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_group_by_category_uses_placeholder_for_blank() {
        let mut a = sample_asset(1);
        a.category_name = "Laptops".to_string();
        let mut b = sample_asset(2);
        b.category_name = String::new();

        let counts = count_by_category(&[a, b]);
        assert_eq!(counts.get("Laptops"), Some(&1));
        assert_eq!(counts.get(UNCATEGORIZED), Some(&1));
    }

    #[test]
    fn test_empty_list() {
        let summary = summarize(&[], today());
        assert_eq!(summary.total_assets, 0);
        assert_eq!(summary.not_assigned_assets, 0);
        assert!(count_by_status(&[]).is_empty());
    }
}
