use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::api::asset::fetch_all;
use crate::model::asset::{Asset, AssetStatus};
use crate::report::classifier::{days_until_expiry, has_expired, is_expiring_soon};

/// Row for the warranty alerts view. `days_remaining` goes negative once
/// the warranty is overdue.
#[derive(Debug, Serialize, ToSchema)]
pub struct WarrantyAlert {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "AST-0001")]
    pub asset_code: String,
    #[schema(example = "SN-93K20")]
    pub serial_number: String,
    #[schema(example = "Laptop", nullable = true)]
    pub asset_type: Option<String>,
    #[schema(example = "Jane Smith", nullable = true)]
    pub user_name: Option<String>,
    #[schema(example = "Active")]
    pub status: String,
    #[schema(example = "In Warranty")]
    pub warranty_status: String,
    #[schema(example = "2025-07-01", value_type = String, format = "date", nullable = true)]
    pub expiry_date: Option<NaiveDate>,
    #[schema(example = 12, nullable = true)]
    pub days_remaining: Option<i64>,
    #[schema(example = false)]
    pub expired: bool,
}

/// Disposed assets are out of scope for alerting; everything else alerts
/// once its warranty is inside the threshold window or already expired.
fn build_alerts(assets: Vec<Asset>, today: NaiveDate, threshold_days: i64) -> Vec<WarrantyAlert> {
    assets
        .into_iter()
        .filter(|asset| {
            if asset.status == AssetStatus::Disposed.as_str() {
                return false;
            }
            is_expiring_soon(asset.expiry_date, today, threshold_days)
                || has_expired(asset.expiry_date, today)
        })
        .map(|asset| WarrantyAlert {
            days_remaining: days_until_expiry(asset.expiry_date, today),
            expired: has_expired(asset.expiry_date, today),
            id: asset.id,
            asset_code: asset.asset_code,
            serial_number: asset.serial_number,
            asset_type: asset.asset_type,
            user_name: asset.user_name,
            status: asset.status,
            warranty_status: asset.warranty_status,
            expiry_date: asset.expiry_date,
        })
        .collect()
}

fn scrap_related(assets: Vec<Asset>) -> Vec<Asset> {
    assets
        .into_iter()
        .filter(|asset| {
            asset.status == AssetStatus::PendingScrapApproval.as_str()
                || asset.status == AssetStatus::Disposed.as_str()
        })
        .collect()
}

/// Warranty alerts: non-disposed assets expiring soon or already expired
#[utoipa::path(
    get,
    path = "/api/warranty-alerts",
    responses(
        (status = 200, description = "Assets needing warranty attention", body = [WarrantyAlert]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Warranty",
    security(("bearer_auth" = []))
)]
pub async fn warranty_alerts(
    pool: web::Data<MySqlPool>,
    config: web::Data<crate::config::Config>,
) -> actix_web::Result<impl Responder> {
    let assets = fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch assets for warranty alerts");
        ErrorInternalServerError("Database error")
    })?;

    let alerts = build_alerts(
        assets,
        Local::now().date_naive(),
        config.warranty_alert_days,
    );

    Ok(HttpResponse::Ok().json(alerts))
}

/// Scrap & disposal queue: assets pending scrap approval or already disposed
#[utoipa::path(
    get,
    path = "/api/scrap",
    responses(
        (status = 200, description = "Scrap-related assets", body = [Asset]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Warranty",
    security(("bearer_auth" = []))
)]
pub async fn scrap_queue(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let assets = fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch assets for scrap queue");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(scrap_related(assets)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::classifier::DEFAULT_THRESHOLD_DAYS;
    use crate::report::testutil::{sample_asset, today};
    use chrono::Duration;

    #[test]
    fn test_disposed_assets_never_alert() {
        let mut disposed = sample_asset(1);
        disposed.status = "Disposed".to_string();
        disposed.expiry_date = Some(today() - Duration::days(10));

        let alerts = build_alerts(vec![disposed], today(), DEFAULT_THRESHOLD_DAYS);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_alerts_cover_expired_and_expiring() {
        let now = today();
        let mut expired = sample_asset(1);
        expired.expiry_date = Some(now - Duration::days(3));
        let mut soon = sample_asset(2);
        soon.expiry_date = Some(now + Duration::days(7));
        let mut fine = sample_asset(3);
        fine.expiry_date = Some(now + Duration::days(90));
        let mut undated = sample_asset(4);
        undated.expiry_date = None;

        let alerts = build_alerts(
            vec![expired, soon, fine, undated],
            now,
            DEFAULT_THRESHOLD_DAYS,
        );
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].id, 1);
        assert!(alerts[0].expired);
        assert_eq!(alerts[0].days_remaining, Some(-3));

        assert_eq!(alerts[1].id, 2);
        assert!(!alerts[1].expired);
        assert_eq!(alerts[1].days_remaining, Some(7));
    }

    #[test]
    fn test_scrap_queue_filters_by_status() {
        let mut active = sample_asset(1);
        active.status = "Active".to_string();
        let mut pending = sample_asset(2);
        pending.status = "Pending Scrap Approval".to_string();
        let mut disposed = sample_asset(3);
        disposed.status = "Disposed".to_string();

        let queue = scrap_related(vec![active, pending, disposed]);
        let ids: Vec<u64> = queue.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
