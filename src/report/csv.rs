use chrono::NaiveDate;

use crate::model::asset::Asset;

/// Report columns, in download order.
pub const REPORT_HEADERS: [&str; 17] = [
    "Asset Code",
    "Serial Number",
    "Asset Type",
    "Make",
    "Model",
    "Assigned User",
    "Status",
    "Category",
    "Location",
    "Warranty Status",
    "Expiry Date",
    "Capital Date",
    "Year",
    "Asset Description",
    "Department",
    "Division",
    "Plant Code",
];

/// Short display form, e.g. "Jan 5, 2025". Missing dates render "N/A".
pub fn format_short_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn lookup(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

fn required(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

// Every value is wrapped in double quotes verbatim; embedded quotes and
// commas are NOT escaped.
fn row(asset: &Asset) -> String {
    let fields = [
        asset.asset_code.clone(),
        asset.serial_number.clone(),
        text(&asset.asset_type),
        text(&asset.make),
        text(&asset.model),
        lookup(&asset.user_name),
        asset.status.clone(),
        required(&asset.category_name),
        required(&asset.location_name),
        asset.warranty_status.clone(),
        format_short_date(asset.expiry_date),
        format_short_date(asset.capital_date),
        asset.year.map(|y| y.to_string()).unwrap_or_default(),
        text(&asset.asset_description),
        text(&asset.department),
        text(&asset.division),
        text(&asset.plant_code),
    ];

    fields
        .iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders the report, or `None` when there is nothing to export — an empty
/// filtered list must not produce a header-only file.
pub fn render_report(assets: &[Asset]) -> Option<String> {
    if assets.is_empty() {
        return None;
    }

    let header = REPORT_HEADERS
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(assets.len() + 1);
    lines.push(header);
    lines.extend(assets.iter().map(row));

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testutil::sample_asset;
    use chrono::NaiveDate;

    fn fields_of(line: &str) -> Vec<String> {
        line.split("\",\"")
            .map(|part| part.trim_matches('"').to_string())
            .collect()
    }

    #[test]
    fn test_empty_list_produces_no_report() {
        assert_eq!(render_report(&[]), None);
    }

    #[test]
    fn test_header_and_row_have_seventeen_quoted_fields() {
        let mut asset = sample_asset(1);
        asset.expiry_date = NaiveDate::from_ymd_opt(2025, 1, 5);
        asset.capital_date = NaiveDate::from_ymd_opt(2023, 4, 1);
        asset.year = Some(2023);
        asset.user_id = Some(7);
        asset.user_name = Some("Jane Smith".to_string());

        let report = render_report(&[asset]).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);

        for line in &lines {
            assert_eq!(fields_of(line).len(), 17);
            assert!(line.starts_with('"') && line.ends_with('"'));
            // every field is individually wrapped, so quotes come in pairs
            assert_eq!(line.matches('"').count(), 17 * 2);
        }
    }

    #[test]
    fn test_column_order_matches_headers() {
        let mut asset = sample_asset(1);
        asset.asset_code = "AST-42".to_string();
        asset.plant_code = Some("PL-09".to_string());

        let report = render_report(&[asset]).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        let header = fields_of(lines[0]);
        let row = fields_of(lines[1]);

        assert_eq!(header[0], "Asset Code");
        assert_eq!(row[0], "AST-42");
        assert_eq!(header[16], "Plant Code");
        assert_eq!(row[16], "PL-09");
    }

    #[test]
    fn test_missing_value_conventions() {
        let mut asset = sample_asset(1);
        asset.user_id = None;
        asset.user_name = None;
        asset.expiry_date = None;
        asset.capital_date = None;
        asset.year = None;
        asset.make = None;
        asset.asset_description = None;

        let report = render_report(&[asset]).unwrap();
        let row = fields_of(report.lines().nth(1).unwrap());

        // lookups and dates fall back to N/A
        assert_eq!(row[5], "N/A");
        assert_eq!(row[10], "N/A");
        assert_eq!(row[11], "N/A");
        // plain optional text renders empty
        assert_eq!(row[3], "");
        assert_eq!(row[12], "");
        assert_eq!(row[13], "");
    }

    #[test]
    fn test_short_date_format() {
        assert_eq!(
            format_short_date(NaiveDate::from_ymd_opt(2025, 1, 5)),
            "Jan 5, 2025"
        );
        assert_eq!(
            format_short_date(NaiveDate::from_ymd_opt(2024, 12, 31)),
            "Dec 31, 2024"
        );
        assert_eq!(format_short_date(None), "N/A");
    }
}
