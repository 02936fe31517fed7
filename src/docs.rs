use crate::api::asset::AssetPayload;
use crate::api::report::{FilteredAssetsResponse, ReportSummaryResponse};
use crate::api::user::UserPayload;
use crate::api::warranty::WarrantyAlert;
use crate::model::asset::{Asset, AssetStatus, WarrantyStatus};
use crate::model::user::{User, UserRole, UserStatus};
use crate::report::summary::AssetSummary;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Management System API",
        version = "1.0.0",
        description = r#"
## Asset Management System (AMS)

This API powers an internal **asset-tracking** system: physical assets, the
employees they are assigned to, and lifecycle status from purchase to scrap.

### Key Features
- **Asset Management**
  - Create, update, list, view and delete assets (full-record PUT)
  - Asset-code availability probe backed by an in-memory filter + cache
- **User (Employee) Management**
  - Create, update, list, view and delete employee records
- **Reports & Analytics**
  - Summary counts, status and category groupings
  - Multi-criteria filtering and CSV download (`asset_report.csv`)
- **Warranty & Scrap**
  - Expiring/expired warranty alerts with days remaining
  - Scrap & disposal queue

### Security
Endpoints under the API prefix are protected with **JWT Bearer
authentication**; tokens are issued by the `/auth` routes.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::asset::list_assets,
        crate::api::asset::get_asset,
        crate::api::asset::create_asset,
        crate::api::asset::update_asset,
        crate::api::asset::delete_asset,
        crate::api::asset::check_asset_code,

        crate::api::user::list_users,
        crate::api::user::get_user,
        crate::api::user::create_user,
        crate::api::user::update_user,
        crate::api::user::delete_user,

        crate::api::report::report_summary,
        crate::api::report::report_assets,
        crate::api::report::export_report,

        crate::api::warranty::warranty_alerts,
        crate::api::warranty::scrap_queue
    ),
    components(
        schemas(
            Asset,
            AssetStatus,
            WarrantyStatus,
            AssetPayload,
            User,
            UserRole,
            UserStatus,
            UserPayload,
            AssetSummary,
            ReportSummaryResponse,
            FilteredAssetsResponse,
            WarrantyAlert
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Asset", description = "Asset management APIs"),
        (name = "User", description = "Employee management APIs"),
        (name = "Report", description = "Reporting, filtering and CSV export APIs"),
        (name = "Warranty", description = "Warranty alert and scrap/disposal APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
