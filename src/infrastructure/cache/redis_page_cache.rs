use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::invoice::PathRevalidator;

use super::{PageCache, PageLookup};

/// Page cache shared between instances through Redis.
///
/// Pages live under `page:{path}:{generation}` and revalidation `INCR`s
/// `page:{path}:gen`. A render that started before a revalidation writes to
/// a key no reader looks up any more; it expires after `ttl_seconds`.
/// Redis errors are logged and otherwise ignored.
pub struct RedisPageCache {
  redis: ConnectionManager,
  ttl_seconds: u64,
}

impl RedisPageCache {
  pub fn new(redis: ConnectionManager, ttl_seconds: u64) -> Self {
    Self { redis, ttl_seconds }
  }

  fn generation_key(path: &str) -> String {
    format!("page:{}:gen", path)
  }

  fn page_key(path: &str, generation: u64) -> String {
    format!("page:{}:{}", path, generation)
  }
}

#[async_trait]
impl PathRevalidator for RedisPageCache {
  async fn revalidate_path(&self, path: &str) {
    let mut conn = self.redis.clone();
    let generation: u64 = match conn.incr(Self::generation_key(path), 1u64).await {
      Ok(generation) => generation,
      Err(e) => {
        tracing::warn!(path, "Failed to revalidate cached page: {}", e);
        return;
      }
    };

    let result: redis::RedisResult<()> = conn.del(Self::page_key(path, generation - 1)).await;
    match result {
      Ok(()) => tracing::debug!(path, generation, "Dropped cached page"),
      Err(e) => tracing::debug!(path, "Failed to drop superseded page: {}", e),
    }
  }
}

#[async_trait]
impl PageCache for RedisPageCache {
  async fn lookup(&self, path: &str) -> PageLookup {
    let mut conn = self.redis.clone();
    let generation = match conn
      .get::<_, Option<u64>>(Self::generation_key(path))
      .await
    {
      Ok(generation) => generation.unwrap_or(0),
      Err(e) => {
        tracing::warn!(path, "Failed to read page generation: {}", e);
        return PageLookup::Unavailable;
      }
    };

    match conn
      .get::<_, Option<String>>(Self::page_key(path, generation))
      .await
    {
      Ok(Some(body)) => PageLookup::Hit(body),
      Ok(None) => PageLookup::Miss(generation),
      Err(e) => {
        tracing::warn!(path, "Failed to read cached page: {}", e);
        PageLookup::Unavailable
      }
    }
  }

  async fn put(&self, path: &str, generation: u64, body: &str) {
    let mut conn = self.redis.clone();
    let result: redis::RedisResult<()> = conn
      .set_ex(Self::page_key(path, generation), body, self.ttl_seconds)
      .await;
    if let Err(e) = result {
      tracing::warn!(path, "Failed to cache page: {}", e);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_keys_are_namespaced_by_generation() {
    assert_eq!(
      RedisPageCache::generation_key("/dashboard/invoices"),
      "page:/dashboard/invoices:gen"
    );
    assert_eq!(
      RedisPageCache::page_key("/dashboard/invoices", 0),
      "page:/dashboard/invoices:0"
    );
    assert_ne!(
      RedisPageCache::page_key("/dashboard/invoices", 1),
      RedisPageCache::page_key("/dashboard/invoices", 0)
    );
  }
}
