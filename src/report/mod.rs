//! Pure report logic: warranty classification, asset filtering, summary
//! aggregation, and CSV rendering. Nothing here touches the database or the
//! clock — handlers pass in the asset list and a reference "today".

pub mod classifier;
pub mod csv;
pub mod filter;
pub mod summary;

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::NaiveDate;

    use crate::model::asset::Asset;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    pub fn sample_asset(id: u64) -> Asset {
        Asset {
            id,
            asset_code: format!("AST-{id:04}"),
            serial_number: format!("SN-{id:05}"),
            capital_date: None,
            year: None,
            asset_type: Some("Laptop".to_string()),
            asset_description: None,
            make: None,
            model: None,
            status: "Active".to_string(),
            department: None,
            division: None,
            plant_code: None,
            warranty_status: "In Warranty".to_string(),
            expiry_date: None,
            category_name: "Laptops".to_string(),
            location_name: "Head Office".to_string(),
            user_id: None,
            user_name: None,
        }
    }
}
