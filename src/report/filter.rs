use std::str::FromStr;

use chrono::NaiveDate;
use strum_macros::{Display, EnumString};

use crate::model::asset::{Asset, AssetStatus, WarrantyStatus};
use crate::report::classifier::{has_expired, is_expiring_soon, DEFAULT_THRESHOLD_DAYS};

/// Assigned-user criterion. The report UI uses the literal string "null" as
/// a sentinel for "no assigned user".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeFilter {
    Unassigned,
    User(u64),
}

impl FromStr for AssigneeFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "null" {
            return Ok(AssigneeFilter::Unassigned);
        }
        value
            .parse::<u64>()
            .map(AssigneeFilter::User)
            .map_err(|_| format!("invalid user filter: {value}"))
    }
}

/// Warranty-expiry bucket criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ExpiryWindow {
    #[strum(serialize = "expired")]
    Expired,
    #[strum(serialize = "expiring_30_days")]
    ExpiringSoon,
    #[strum(serialize = "not_expiring_soon")]
    NotExpiringSoon,
}

impl ExpiryWindow {
    fn matches(&self, expiry_date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match self {
            ExpiryWindow::Expired => has_expired(expiry_date, today),
            ExpiryWindow::ExpiringSoon => {
                is_expiring_soon(expiry_date, today, DEFAULT_THRESHOLD_DAYS)
                    && !has_expired(expiry_date, today)
            }
            ExpiryWindow::NotExpiringSoon => {
                !is_expiring_soon(expiry_date, today, DEFAULT_THRESHOLD_DAYS)
                    && !has_expired(expiry_date, today)
            }
        }
    }
}

/// Independently-optional criteria, AND-composed. An unset criterion is
/// skipped, never treated as "match empty".
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub search: Option<String>,
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub assignee: Option<AssigneeFilter>,
    pub warranty_status: Option<WarrantyStatus>,
    pub expiry: Option<ExpiryWindow>,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset, today: NaiveDate) -> bool {
        if let Some(term) = &self.search {
            if !search_matches(asset, term) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if asset.status != status.as_str() {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if &asset.category_name != category {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if &asset.location_name != location {
                return false;
            }
        }

        if let Some(assignee) = self.assignee {
            let matched = match assignee {
                AssigneeFilter::Unassigned => asset.user_id.is_none(),
                AssigneeFilter::User(id) => asset.user_id == Some(id),
            };
            if !matched {
                return false;
            }
        }

        if let Some(warranty) = self.warranty_status {
            if asset.warranty_status != warranty.as_str() {
                return false;
            }
        }

        if let Some(window) = self.expiry {
            if !window.matches(asset.expiry_date, today) {
                return false;
            }
        }

        true
    }

    /// Stable filter: keeps input order, drops non-matching assets.
    pub fn apply(&self, assets: Vec<Asset>, today: NaiveDate) -> Vec<Asset> {
        assets
            .into_iter()
            .filter(|asset| self.matches(asset, today))
            .collect()
    }
}

fn search_matches(asset: &Asset, term: &str) -> bool {
    let needle = term.to_lowercase();

    let haystacks = [
        Some(asset.asset_code.as_str()),
        Some(asset.serial_number.as_str()),
        asset.asset_type.as_deref(),
        asset.asset_description.as_deref(),
        asset.make.as_deref(),
        asset.model.as_deref(),
        Some(asset.category_name.as_str()),
        Some(asset.location_name.as_str()),
        asset.user_name.as_deref(),
    ];

    haystacks
        .iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testutil::{sample_asset, today};

    #[test]
    fn test_no_criteria_returns_list_unchanged() {
        let assets = vec![sample_asset(1), sample_asset(2), sample_asset(3)];
        let filtered = AssetFilter::default().apply(assets.clone(), today());

        let ids: Vec<u64> = filtered.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(filtered.len(), assets.len());
    }

    #[test]
    fn test_status_filter_keeps_relative_order() {
        let mut a = sample_asset(1);
        a.status = "Active".to_string();
        let mut b = sample_asset(2);
        b.status = "Disposed".to_string();
        let mut c = sample_asset(3);
        c.status = "Disposed".to_string();

        let filter = AssetFilter {
            status: Some(AssetStatus::Disposed),
            ..Default::default()
        };
        let filtered = filter.apply(vec![a, b, c], today());
        let ids: Vec<u64> = filtered.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_unassigned_sentinel() {
        let mut a = sample_asset(1);
        a.user_id = Some(5);
        a.user_name = Some("Jane Smith".to_string());
        let mut b = sample_asset(2);
        b.user_id = None;
        b.user_name = None;
        let mut c = sample_asset(3);
        c.user_id = None;
        c.user_name = None;

        let filter = AssetFilter {
            assignee: Some("null".parse().unwrap()),
            ..Default::default()
        };
        let filtered = filter.apply(vec![a, b, c], today());
        let ids: Vec<u64> = filtered.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_user_id_filter() {
        let mut a = sample_asset(1);
        a.user_id = Some(5);
        let mut b = sample_asset(2);
        b.user_id = Some(9);

        let filter = AssetFilter {
            assignee: Some("9".parse().unwrap()),
            ..Default::default()
        };
        let filtered = filter.apply(vec![a, b], today());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_assignee_filter_rejects_garbage() {
        assert!("nobody".parse::<AssigneeFilter>().is_err());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut a = sample_asset(1);
        a.make = Some("Dell".to_string());
        let mut b = sample_asset(2);
        b.user_name = Some("Jane DELLAWARE".to_string());
        let mut c = sample_asset(3);
        c.make = Some("Lenovo".to_string());
        c.user_name = None;

        let filter = AssetFilter {
            search: Some("dell".to_string()),
            ..Default::default()
        };
        let filtered = filter.apply(vec![a, b, c], today());
        let ids: Vec<u64> = filtered.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_expiry_buckets() {
        let now = today();
        let mut expired = sample_asset(1);
        expired.expiry_date = Some(now - chrono::Duration::days(1));
        let mut soon = sample_asset(2);
        soon.expiry_date = Some(now + chrono::Duration::days(10));
        let mut later = sample_asset(3);
        later.expiry_date = Some(now + chrono::Duration::days(40));

        let assets = vec![expired, soon, later];

        let pick = |window: &str| {
            let filter = AssetFilter {
                expiry: Some(window.parse().unwrap()),
                ..Default::default()
            };
            filter
                .apply(assets.clone(), now)
                .iter()
                .map(|a| a.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(pick("expired"), vec![1]);
        assert_eq!(pick("expiring_30_days"), vec![2]);
        assert_eq!(pick("not_expiring_soon"), vec![3]);
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let mut a = sample_asset(1);
        a.status = "Active".to_string();
        a.location_name = "Head Office".to_string();
        let mut b = sample_asset(2);
        b.status = "Active".to_string();
        b.location_name = "Plant 2".to_string();

        let filter = AssetFilter {
            status: Some(AssetStatus::Active),
            location: Some("Plant 2".to_string()),
            ..Default::default()
        };
        let filtered = filter.apply(vec![a, b], today());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut a = sample_asset(1);
        a.category_name = "Laptops".to_string();
        let mut b = sample_asset(2);
        b.category_name = "Printers".to_string();
        let mut c = sample_asset(3);
        c.category_name = "Laptops".to_string();

        let filter = AssetFilter {
            category: Some("Laptops".to_string()),
            ..Default::default()
        };
        let once = filter.apply(vec![a, b, c], today());
        let twice = filter.apply(once.clone(), today());

        let ids = |list: &[Asset]| list.iter().map(|x| x.id).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
    }
}
