pub mod asset_code_cache;
pub mod asset_code_filter;
