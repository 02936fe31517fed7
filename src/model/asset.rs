use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle status of an asset. The value set is closed, but transitions
/// are not: any status may be written over any other via PUT.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AssetStatus {
    Active,
    #[serde(rename = "In Repair")]
    #[strum(serialize = "In Repair")]
    InRepair,
    #[serde(rename = "Pending Scrap Approval")]
    #[strum(serialize = "Pending Scrap Approval")]
    PendingScrapApproval,
    Disposed,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "Active",
            AssetStatus::InRepair => "In Repair",
            AssetStatus::PendingScrapApproval => "Pending Scrap Approval",
            AssetStatus::Disposed => "Disposed",
        }
    }
}

impl Default for AssetStatus {
    fn default() -> Self {
        AssetStatus::Active
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum WarrantyStatus {
    #[serde(rename = "In Warranty")]
    #[strum(serialize = "In Warranty")]
    InWarranty,
    #[serde(rename = "Out of Warranty")]
    #[strum(serialize = "Out of Warranty")]
    OutOfWarranty,
}

impl WarrantyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyStatus::InWarranty => "In Warranty",
            WarrantyStatus::OutOfWarranty => "Out of Warranty",
        }
    }
}

impl Default for WarrantyStatus {
    fn default() -> Self {
        WarrantyStatus::InWarranty
    }
}

/// Asset record as served to clients: the `assets` row plus the assigned
/// user's name denormalized from the `users` join.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "asset_code": "AST-0001",
        "serial_number": "SN-93K20",
        "capital_date": "2023-04-01",
        "year": 2023,
        "asset_type": "Laptop",
        "asset_description": "Dell Latitude 5440",
        "make": "Dell",
        "model": "Latitude 5440",
        "status": "Active",
        "department": "IT",
        "division": "Corporate",
        "plant_code": "PL-01",
        "warranty_status": "In Warranty",
        "expiry_date": "2026-04-01",
        "category_name": "Laptops",
        "location_name": "Head Office",
        "user_id": 7,
        "user_name": "Jane Smith"
    })
)]
pub struct Asset {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "AST-0001")]
    pub asset_code: String,

    #[schema(example = "SN-93K20")]
    pub serial_number: String,

    #[schema(example = "2023-04-01", value_type = String, format = "date", nullable = true)]
    pub capital_date: Option<NaiveDate>,

    #[schema(example = 2023, nullable = true)]
    pub year: Option<i32>,

    #[schema(example = "Laptop", nullable = true)]
    pub asset_type: Option<String>,

    #[schema(example = "Dell Latitude 5440", nullable = true)]
    pub asset_description: Option<String>,

    #[schema(example = "Dell", nullable = true)]
    pub make: Option<String>,

    #[schema(example = "Dell", nullable = true)]
    pub model: Option<String>,

    #[schema(example = "Active")]
    pub status: String,

    #[schema(example = "IT", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "Corporate", nullable = true)]
    pub division: Option<String>,

    #[schema(example = "PL-01", nullable = true)]
    pub plant_code: Option<String>,

    #[schema(example = "In Warranty")]
    pub warranty_status: String,

    #[schema(example = "2026-04-01", value_type = String, format = "date", nullable = true)]
    pub expiry_date: Option<NaiveDate>,

    #[schema(example = "Laptops")]
    pub category_name: String,

    #[schema(example = "Head Office")]
    pub location_name: String,

    #[schema(example = 7, nullable = true)]
    pub user_id: Option<u64>,

    #[schema(example = "Jane Smith", nullable = true)]
    pub user_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_asset_status_round_trip() {
        for status in [
            AssetStatus::Active,
            AssetStatus::InRepair,
            AssetStatus::PendingScrapApproval,
            AssetStatus::Disposed,
        ] {
            let text = status.as_str();
            assert_eq!(AssetStatus::from_str(text).unwrap(), status);
            assert_eq!(status.to_string(), text);
        }
    }

    #[test]
    fn test_asset_status_rejects_unknown_value() {
        assert!(AssetStatus::from_str("Scrapped").is_err());
        assert!(AssetStatus::from_str("").is_err());
    }

    #[test]
    fn test_warranty_status_round_trip() {
        assert_eq!(
            WarrantyStatus::from_str("Out of Warranty").unwrap(),
            WarrantyStatus::OutOfWarranty
        );
        assert_eq!(WarrantyStatus::InWarranty.as_str(), "In Warranty");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AssetStatus::default(), AssetStatus::Active);
        assert_eq!(WarrantyStatus::default(), WarrantyStatus::InWarranty);
    }
}
