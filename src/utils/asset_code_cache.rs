use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// true  => asset code is TAKEN
/// false => asset code is AVAILABLE (usually we store only taken)
pub static ASSET_CODE_CACHE: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(500_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Mark a single asset code as taken
pub async fn mark_taken(code: &str) {
    ASSET_CODE_CACHE
        .insert(code.trim().to_uppercase(), true)
        .await;
}

/// Check if an asset code is taken
pub async fn is_taken(code: &str) -> bool {
    ASSET_CODE_CACHE
        .get(&code.trim().to_uppercase())
        .await
        .unwrap_or(false)
}

/// Drop an asset code from the cache (after delete or re-code)
pub async fn forget(code: &str) {
    ASSET_CODE_CACHE.invalidate(&code.trim().to_uppercase()).await;
}

/// Batch mark asset codes as taken
async fn batch_mark(codes: &[String]) {
    let futures: Vec<_> = codes
        .iter()
        .map(|c| ASSET_CODE_CACHE.insert(c.trim().to_uppercase(), true))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load only the most recently registered asset codes into the cache
/// (batched); the cuckoo filter holds the full set.
pub async fn warmup_asset_code_cache(
    pool: &MySqlPool,
    limit: u32,
    batch_size: usize,
) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT asset_code
        FROM assets
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (code,) = row?;
        batch.push(code);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_mark(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_mark(&batch).await;
    }

    log::info!(
        "Asset code cache warmup complete: {} recent codes (limit {})",
        total_count,
        limit
    );

    Ok(())
}
