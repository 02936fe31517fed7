use crate::{
    auth::auth::AuthAccount,
    model::asset::{Asset, AssetStatus, WarrantyStatus},
    utils::{asset_code_cache, asset_code_filter},
};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

/// Asset list/detail SELECT with the assigned user's name joined in.
const ASSET_SELECT: &str = r#"
SELECT
    a.id, a.asset_code, a.serial_number, a.capital_date, a.year,
    a.asset_type, a.asset_description, a.make, a.model, a.status,
    a.department, a.division, a.plant_code, a.warranty_status,
    a.expiry_date, a.category_name, a.location_name, a.user_id,
    u.name AS user_name
FROM assets a
LEFT JOIN users u ON a.user_id = u.id
"#;

/// Payload for both POST and PUT. PUT is a full-record replacement: every
/// field must be resupplied even when changing only one.
#[derive(Deserialize, ToSchema)]
pub struct AssetPayload {
    #[schema(example = "AST-0001")]
    pub asset_code: String,
    #[schema(example = "SN-93K20")]
    pub serial_number: String,
    #[schema(example = "2023-04-01", format = "date", value_type = String, nullable = true)]
    pub capital_date: Option<NaiveDate>,
    #[schema(example = 2023, nullable = true)]
    pub year: Option<i32>,
    #[schema(example = "Laptop", nullable = true)]
    pub asset_type: Option<String>,
    #[schema(example = "Dell Latitude 5440", nullable = true)]
    pub asset_description: Option<String>,
    #[schema(example = "Dell", nullable = true)]
    pub make: Option<String>,
    #[schema(example = "Latitude 5440", nullable = true)]
    pub model: Option<String>,
    /// Defaults to Active when omitted
    pub status: Option<AssetStatus>,
    #[schema(example = "IT", nullable = true)]
    pub department: Option<String>,
    #[schema(example = "Corporate", nullable = true)]
    pub division: Option<String>,
    #[schema(example = "PL-01", nullable = true)]
    pub plant_code: Option<String>,
    /// Defaults to In Warranty when omitted
    pub warranty_status: Option<WarrantyStatus>,
    #[schema(example = "2026-04-01", format = "date", value_type = String, nullable = true)]
    pub expiry_date: Option<NaiveDate>,
    #[schema(example = "Laptops")]
    pub category_name: String,
    #[schema(example = "Head Office")]
    pub location_name: String,
    #[schema(example = 7, nullable = true)]
    pub user_id: Option<u64>,
}

fn validate(payload: &AssetPayload) -> Result<(), &'static str> {
    if payload.asset_code.trim().is_empty() {
        return Err("asset_code must not be empty");
    }
    if payload.serial_number.trim().is_empty() {
        return Err("serial_number must not be empty");
    }
    if payload.category_name.trim().is_empty() {
        return Err("category_name must not be empty");
    }
    if payload.location_name.trim().is_empty() {
        return Err("location_name must not be empty");
    }
    Ok(())
}

/// true  => asset code AVAILABLE
/// false => asset code TAKEN
pub async fn is_asset_code_available(code: &str, pool: &MySqlPool) -> bool {
    // 1. Cuckoo filter — fast negative
    if !asset_code_filter::might_exist(code) {
        return true;
    }

    // 2. Moka cache — fast positive
    if asset_code_cache::is_taken(code).await {
        return false;
    }

    // 3. Database fallback
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM assets WHERE asset_code = ? LIMIT 1)",
    )
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap_or(true); // fail-safe

    !exists
}

#[derive(Deserialize, IntoParams)]
pub struct CheckCodeQuery {
    /// Asset code to probe
    pub code: String,
}

/// Asset code availability probe, backed by the filter/cache/DB tiers
#[utoipa::path(
    get,
    path = "/api/assets/check-code",
    params(CheckCodeQuery),
    responses(
        (status = 200, description = "Availability flag", body = Object, example = json!({
            "available": true
        })),
        (status = 400, description = "Missing code")
    ),
    tag = "Asset",
    security(("bearer_auth" = []))
)]
pub async fn check_asset_code(
    pool: web::Data<MySqlPool>,
    query: web::Query<CheckCodeQuery>,
) -> impl Responder {
    let code = query.code.trim();
    if code.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "code must not be empty"
        }));
    }

    let available = is_asset_code_available(code, pool.get_ref()).await;
    HttpResponse::Ok().json(json!({ "available": available }))
}

/// Fetch every asset with the assigned user joined in, in id order.
/// The report and warranty views run over this same list.
pub(crate) async fn fetch_all(pool: &MySqlPool) -> Result<Vec<Asset>, sqlx::Error> {
    let sql = format!("{ASSET_SELECT} ORDER BY a.id");
    debug!(sql = %sql, "Fetching assets");
    sqlx::query_as::<_, Asset>(&sql).fetch_all(pool).await
}

/// List all assets, assigned user name included
#[utoipa::path(
    get,
    path = "/api/assets",
    responses(
        (status = 200, description = "All assets", body = [Asset]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asset",
    security(("bearer_auth" = []))
)]
pub async fn list_assets(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let assets = fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch assets");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(assets))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    params(("id", Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset found", body = Asset),
        (status = 404, description = "Asset not found", body = Object, example = json!({
            "error": "Asset not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asset",
    security(("bearer_auth" = []))
)]
pub async fn get_asset(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let asset_id = path.into_inner();

    let sql = format!("{ASSET_SELECT} WHERE a.id = ?");
    let asset = sqlx::query_as::<_, Asset>(&sql)
        .bind(asset_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, asset_id, "Failed to fetch asset");
            ErrorInternalServerError("Database error")
        })?;

    match asset {
        Some(found) => Ok(HttpResponse::Ok().json(found)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "Asset not found"
        }))),
    }
}

/// Create asset
#[utoipa::path(
    post,
    path = "/api/assets",
    request_body = AssetPayload,
    responses(
        (status = 201, description = "Asset created", body = Object, example = json!({
            "message": "Asset added successfully",
            "id": 42
        })),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Manager/Admin only"),
        (status = 409, description = "Duplicate asset code or serial number"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asset",
    security(("bearer_auth" = []))
)]
pub async fn create_asset(
    auth: AuthAccount,
    pool: web::Data<MySqlPool>,
    payload: web::Json<AssetPayload>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    if let Err(reason) = validate(&payload) {
        return Ok(HttpResponse::BadRequest().json(json!({ "error": reason })));
    }

    if !is_asset_code_available(&payload.asset_code, pool.get_ref()).await {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "Asset code already exists"
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO assets
            (asset_code, serial_number, capital_date, year, asset_type,
             asset_description, make, model, status, department, division,
             plant_code, warranty_status, expiry_date, category_name,
             location_name, user_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.asset_code.trim())
    .bind(payload.serial_number.trim())
    .bind(payload.capital_date)
    .bind(payload.year)
    .bind(&payload.asset_type)
    .bind(&payload.asset_description)
    .bind(&payload.make)
    .bind(&payload.model)
    .bind(payload.status.unwrap_or_default().as_str())
    .bind(&payload.department)
    .bind(&payload.division)
    .bind(&payload.plant_code)
    .bind(payload.warranty_status.unwrap_or_default().as_str())
    .bind(payload.expiry_date)
    .bind(payload.category_name.trim())
    .bind(payload.location_name.trim())
    .bind(payload.user_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(done) => {
            // keep the availability tiers in sync with the new code
            asset_code_filter::insert(&payload.asset_code);
            asset_code_cache::mark_taken(&payload.asset_code).await;

            Ok(HttpResponse::Created().json(json!({
                "message": "Asset added successfully",
                "id": done.last_insert_id()
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "error": "Duplicate asset code or serial number, or unknown assigned user"
                    })));
                }
            }

            error!(error = %e, "Failed to create asset");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to add asset"
            })))
        }
    }
}

/// Update asset (full-record replacement)
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    params(("id", Path, description = "Asset ID")),
    request_body = AssetPayload,
    responses(
        (status = 200, description = "Asset updated", body = Object, example = json!({
            "message": "Asset updated successfully"
        })),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Manager/Admin only"),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Duplicate asset code or serial number"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asset",
    security(("bearer_auth" = []))
)]
pub async fn update_asset(
    auth: AuthAccount,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<AssetPayload>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let asset_id = path.into_inner();

    if let Err(reason) = validate(&payload) {
        return Ok(HttpResponse::BadRequest().json(json!({ "error": reason })));
    }

    let previous_code = match sqlx::query_scalar::<_, String>(
        "SELECT asset_code FROM assets WHERE id = ?",
    )
    .bind(asset_id)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(code)) => code,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Asset not found"
            })))
        }
        Err(e) => {
            error!(error = %e, asset_id, "Failed to fetch asset for update");
            return Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            })));
        }
    };

    let result = sqlx::query(
        r#"
        UPDATE assets SET
            asset_code = ?, serial_number = ?, capital_date = ?, year = ?,
            asset_type = ?, asset_description = ?, make = ?, model = ?,
            status = ?, department = ?, division = ?, plant_code = ?,
            warranty_status = ?, expiry_date = ?, category_name = ?,
            location_name = ?, user_id = ?
        WHERE id = ?
        "#,
    )
    .bind(payload.asset_code.trim())
    .bind(payload.serial_number.trim())
    .bind(payload.capital_date)
    .bind(payload.year)
    .bind(&payload.asset_type)
    .bind(&payload.asset_description)
    .bind(&payload.make)
    .bind(&payload.model)
    .bind(payload.status.unwrap_or_default().as_str())
    .bind(&payload.department)
    .bind(&payload.division)
    .bind(&payload.plant_code)
    .bind(payload.warranty_status.unwrap_or_default().as_str())
    .bind(payload.expiry_date)
    .bind(payload.category_name.trim())
    .bind(payload.location_name.trim())
    .bind(payload.user_id)
    .bind(asset_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            if !previous_code.eq_ignore_ascii_case(payload.asset_code.trim()) {
                asset_code_filter::remove(&previous_code);
                asset_code_cache::forget(&previous_code).await;
                asset_code_filter::insert(&payload.asset_code);
                asset_code_cache::mark_taken(&payload.asset_code).await;
            }

            Ok(HttpResponse::Ok().json(json!({
                "message": "Asset updated successfully"
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "error": "Duplicate asset code or serial number, or unknown assigned user"
                    })));
                }
            }

            error!(error = %e, asset_id, "Failed to update asset");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to update asset"
            })))
        }
    }
}

/// Delete asset
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    params(("id", Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted", body = Object, example = json!({
            "message": "Asset deleted successfully"
        })),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Asset not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asset",
    security(("bearer_auth" = []))
)]
pub async fn delete_asset(
    auth: AuthAccount,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let asset_id = path.into_inner();

    let code = sqlx::query_scalar::<_, String>("SELECT asset_code FROM assets WHERE id = ?")
        .bind(asset_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, asset_id, "Failed to fetch asset for delete");
            ErrorInternalServerError("Database error")
        })?;

    let Some(code) = code else {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "Asset not found"
        })));
    };

    let result = sqlx::query("DELETE FROM assets WHERE id = ?")
        .bind(asset_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {
            asset_code_filter::remove(&code);
            asset_code_cache::forget(&code).await;

            Ok(HttpResponse::Ok().json(json!({
                "message": "Asset deleted successfully"
            })))
        }
        Err(e) => {
            error!(error = %e, asset_id, "Failed to delete asset");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to delete asset"
            })))
        }
    }
}
