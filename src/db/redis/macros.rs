/// Read-through caching over a [`Cache`](crate::db::Cache).
///
/// Checks the cache for `$key`; on a miss, runs `$block` to compute the
/// value, queues it for a background cache write with `$ttl` seconds to
/// live, and returns it. The block must evaluate to an `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let history = cached!(self.cache, key, 300, async {
///     self.call_api("user.rating", &query).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
