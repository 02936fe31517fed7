use chrono::{Duration, NaiveDate};

/// Default window for the "expiring soon" bucket, in days.
pub const DEFAULT_THRESHOLD_DAYS: i64 = 30;

/// Derived warranty state of an asset, computed from its expiry date and a
/// reference "today" at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyState {
    /// No expiry date recorded.
    NoDate,
    /// Expiry date is strictly before today.
    Expired,
    /// Expiry date falls within `[today, today + threshold]`, inclusive.
    ExpiringSoon,
    Normal,
}

pub fn classify(
    expiry_date: Option<NaiveDate>,
    today: NaiveDate,
    threshold_days: i64,
) -> WarrantyState {
    let Some(expiry) = expiry_date else {
        return WarrantyState::NoDate;
    };

    if expiry < today {
        WarrantyState::Expired
    } else if expiry <= today + Duration::days(threshold_days) {
        WarrantyState::ExpiringSoon
    } else {
        WarrantyState::Normal
    }
}

/// Whether the warranty has already expired. Expired takes precedence over
/// expiring-soon when both labels are decided together.
pub fn has_expired(expiry_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    classify(expiry_date, today, DEFAULT_THRESHOLD_DAYS) == WarrantyState::Expired
}

pub fn is_expiring_soon(
    expiry_date: Option<NaiveDate>,
    today: NaiveDate,
    threshold_days: i64,
) -> bool {
    classify(expiry_date, today, threshold_days) == WarrantyState::ExpiringSoon
}

/// Signed day count until expiry: negative once overdue, `None` without an
/// expiry date. Feeds the "Days Remaining/Overdue" column on the alerts view.
pub fn days_until_expiry(expiry_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    expiry_date.map(|expiry| (expiry - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_expiry_date() {
        let today = day(2025, 6, 15);
        assert_eq!(classify(None, today, 30), WarrantyState::NoDate);
        assert!(!has_expired(None, today));
        assert!(!is_expiring_soon(None, today, 30));
    }

    #[test]
    fn test_yesterday_is_expired() {
        let today = day(2025, 6, 15);
        let yesterday = day(2025, 6, 14);
        assert_eq!(classify(Some(yesterday), today, 30), WarrantyState::Expired);
        assert!(has_expired(Some(yesterday), today));
        assert!(!is_expiring_soon(Some(yesterday), today, 30));
    }

    #[test]
    fn test_ten_days_out_is_expiring_soon() {
        let today = day(2025, 6, 15);
        let soon = day(2025, 6, 25);
        assert_eq!(classify(Some(soon), today, 30), WarrantyState::ExpiringSoon);
        assert!(is_expiring_soon(Some(soon), today, 30));
        assert!(!has_expired(Some(soon), today));
    }

    #[test]
    fn test_forty_days_out_is_normal() {
        let today = day(2025, 6, 15);
        let later = day(2025, 7, 25);
        assert_eq!(classify(Some(later), today, 30), WarrantyState::Normal);
        assert!(!is_expiring_soon(Some(later), today, 30));
        assert!(!has_expired(Some(later), today));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let today = day(2025, 6, 15);
        // expiring today still counts as expiring-soon, not expired
        assert_eq!(classify(Some(today), today, 30), WarrantyState::ExpiringSoon);
        // exactly threshold days out is still inside the window
        assert_eq!(
            classify(Some(day(2025, 7, 15)), today, 30),
            WarrantyState::ExpiringSoon
        );
        // one past the threshold is not
        assert_eq!(
            classify(Some(day(2025, 7, 16)), today, 30),
            WarrantyState::Normal
        );
    }

    #[test]
    fn test_expired_and_expiring_soon_are_mutually_exclusive() {
        let today = day(2025, 6, 15);
        for offset in -60i64..=60 {
            let date = today + Duration::days(offset);
            let expired = has_expired(Some(date), today);
            let expiring = is_expiring_soon(Some(date), today, 30);
            assert!(
                !(expired && expiring),
                "both labels set for offset {offset}"
            );
        }
    }

    #[test]
    fn test_days_until_expiry() {
        let today = day(2025, 6, 15);
        assert_eq!(days_until_expiry(Some(day(2025, 6, 25)), today), Some(10));
        assert_eq!(days_until_expiry(Some(day(2025, 6, 10)), today), Some(-5));
        assert_eq!(days_until_expiry(None, today), None);
    }
}
