//! Rendered-page cache
//!
//! Dashboard pages are cached by request path. Each path carries a
//! generation that revalidation bumps. A page rendered under an older
//! generation is never stored, so a render that raced a write cannot
//! repopulate the cache with pre-write data.

mod memory_page_cache;
mod redis_page_cache;

use async_trait::async_trait;

use crate::domain::invoice::PathRevalidator;

pub use memory_page_cache::InMemoryPageCache;
pub use redis_page_cache::RedisPageCache;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
  Hit(String),
  /// Render, then `put` with this generation
  Miss(u64),
  /// Backend unreachable; render without caching
  Unavailable,
}

#[async_trait]
pub trait PageCache: PathRevalidator {
  /// Must read the generation before any data the page is rendered from
  async fn lookup(&self, path: &str) -> PageLookup;

  /// Stores `body` unless `path` was revalidated after `generation` was read
  async fn put(&self, path: &str, generation: u64, body: &str);
}
