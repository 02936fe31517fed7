use anyhow::{anyhow, Result};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;

/// Expected capacity and false-positive rate.
/// Tune these based on real asset counts.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static ASSET_CODE_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

#[inline]
fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Check if an asset code might exist (false positives possible)
pub fn might_exist(code: &str) -> bool {
    let code = normalize(code);
    ASSET_CODE_FILTER
        .read()
        .expect("asset code filter poisoned")
        .contains(&code)
}

/// Insert a single asset code into the filter
pub fn insert(code: &str) {
    let code = normalize(code);
    ASSET_CODE_FILTER
        .write()
        .expect("asset code filter poisoned")
        .add(&code);
}

/// Remove an asset code from the filter
pub fn remove(code: &str) {
    let code = normalize(code);
    ASSET_CODE_FILTER
        .write()
        .expect("asset code filter poisoned")
        .remove(&code);
}

/// Warm up the asset code filter using streaming + batching
pub async fn warmup_asset_code_filter(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>("SELECT asset_code FROM assets").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (code,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.push(normalize(&code));
        total += 1;

        if batch.len() == batch_size {
            insert_batch(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch);
    }

    log::info!("Asset code filter warmup complete: {} assets", total);
    Ok(())
}

/// Insert a batch of normalized asset codes
fn insert_batch(codes: &[String]) {
    let mut filter = ASSET_CODE_FILTER
        .write()
        .expect("asset code filter poisoned");

    for code in codes {
        filter.add(code);
    }
}
