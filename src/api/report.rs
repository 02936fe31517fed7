use std::collections::BTreeMap;
use std::str::FromStr;

use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::asset::fetch_all;
use crate::model::asset::{Asset, AssetStatus, WarrantyStatus};
use crate::report::csv::render_report;
use crate::report::filter::{AssetFilter, AssigneeFilter, ExpiryWindow};
use crate::report::summary::{count_by_category, count_by_status, summarize, AssetSummary};

/// Report filter criteria as they arrive on the query string. Empty values
/// mean "no constraint", matching the UI sending blank selects.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Case-insensitive keyword matched across code, serial, type,
    /// description, make, model, category, location and assigned user
    pub search: Option<String>,
    /// Exact status, e.g. "Pending Scrap Approval"
    pub status: Option<String>,
    /// Exact category name
    pub category: Option<String>,
    /// Exact location name
    pub location: Option<String>,
    /// Assigned user id, or "null" for unassigned assets
    pub user: Option<String>,
    /// "In Warranty" or "Out of Warranty"
    pub warranty_status: Option<String>,
    /// "expired", "expiring_30_days" or "not_expiring_soon"
    pub expiry: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ReportQuery {
    pub fn into_filter(self) -> Result<AssetFilter, String> {
        let status = non_empty(self.status)
            .map(|s| AssetStatus::from_str(&s).map_err(|_| format!("invalid status: {s}")))
            .transpose()?;

        let warranty_status = non_empty(self.warranty_status)
            .map(|s| {
                WarrantyStatus::from_str(&s).map_err(|_| format!("invalid warranty_status: {s}"))
            })
            .transpose()?;

        let assignee = non_empty(self.user)
            .map(|s| AssigneeFilter::from_str(&s))
            .transpose()?;

        let expiry = non_empty(self.expiry)
            .map(|s| ExpiryWindow::from_str(&s).map_err(|_| format!("invalid expiry filter: {s}")))
            .transpose()?;

        Ok(AssetFilter {
            search: non_empty(self.search),
            status,
            category: non_empty(self.category),
            location: non_empty(self.location),
            assignee,
            warranty_status,
            expiry,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReportSummaryResponse {
    pub summary: AssetSummary,
    #[schema(value_type = Object, example = json!({"Active": 2, "Disposed": 1}))]
    pub assets_by_status: BTreeMap<String, u64>,
    #[schema(value_type = Object, example = json!({"Laptops": 2, "Printers": 1}))]
    pub assets_by_category: BTreeMap<String, u64>,
}

#[derive(Serialize, ToSchema)]
pub struct FilteredAssetsResponse {
    pub data: Vec<Asset>,
    #[schema(example = 3)]
    pub total: usize,
}

/// Summary counts and groupings over the full asset list
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    responses(
        (status = 200, description = "Report summary", body = ReportSummaryResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report",
    security(("bearer_auth" = []))
)]
pub async fn report_summary(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let assets = fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch assets for summary");
        ErrorInternalServerError("Database error")
    })?;

    let today = Local::now().date_naive();

    Ok(HttpResponse::Ok().json(ReportSummaryResponse {
        summary: summarize(&assets, today),
        assets_by_status: count_by_status(&assets),
        assets_by_category: count_by_category(&assets),
    }))
}

/// Filtered asset list for the report table
#[utoipa::path(
    get,
    path = "/api/reports/assets",
    params(ReportQuery),
    responses(
        (status = 200, description = "Assets matching all supplied criteria", body = FilteredAssetsResponse),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report",
    security(("bearer_auth" = []))
)]
pub async fn report_assets(
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = match query.into_inner().into_filter() {
        Ok(f) => f,
        Err(reason) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "error": reason })));
        }
    };

    let assets = fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch assets for report");
        ErrorInternalServerError("Database error")
    })?;

    let filtered = filter.apply(assets, Local::now().date_naive());

    Ok(HttpResponse::Ok().json(FilteredAssetsResponse {
        total: filtered.len(),
        data: filtered,
    }))
}

/// CSV download of the filtered asset list
#[utoipa::path(
    get,
    path = "/api/reports/export",
    params(ReportQuery),
    responses(
        (status = 200, description = "asset_report.csv", body = String, content_type = "text/csv"),
        (status = 400, description = "Invalid filter value"),
        (status = 404, description = "Nothing to export", body = Object, example = json!({
            "error": "No assets match the current filters"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report",
    security(("bearer_auth" = []))
)]
pub async fn export_report(
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = match query.into_inner().into_filter() {
        Ok(f) => f,
        Err(reason) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "error": reason })));
        }
    };

    let assets = fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch assets for export");
        ErrorInternalServerError("Database error")
    })?;

    let filtered = filter.apply(assets, Local::now().date_naive());

    match render_report(&filtered) {
        Some(csv) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"asset_report.csv\"",
            ))
            .body(csv)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "No assets match the current filters"
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_builds_unconstrained_filter() {
        let filter = ReportQuery::default().into_filter().unwrap();
        assert!(filter.search.is_none());
        assert!(filter.status.is_none());
        assert!(filter.assignee.is_none());
        assert!(filter.expiry.is_none());
    }

    #[test]
    fn test_blank_values_are_treated_as_unset() {
        let query = ReportQuery {
            search: Some(String::new()),
            status: Some(String::new()),
            user: Some(String::new()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert!(filter.search.is_none());
        assert!(filter.status.is_none());
        assert!(filter.assignee.is_none());
    }

    #[test]
    fn test_typed_criteria_parse() {
        let query = ReportQuery {
            status: Some("Pending Scrap Approval".to_string()),
            warranty_status: Some("Out of Warranty".to_string()),
            user: Some("null".to_string()),
            expiry: Some("expiring_30_days".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(AssetStatus::PendingScrapApproval));
        assert_eq!(filter.warranty_status, Some(WarrantyStatus::OutOfWarranty));
        assert_eq!(filter.assignee, Some(AssigneeFilter::Unassigned));
        assert_eq!(filter.expiry, Some(ExpiryWindow::ExpiringSoon));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let query = ReportQuery {
            status: Some("Scrapped".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());

        let query = ReportQuery {
            expiry: Some("next_week".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());

        let query = ReportQuery {
            user: Some("nobody".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }
}
