use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::invoice::PathRevalidator;

use super::{PageCache, PageLookup};

#[derive(Default)]
struct Pages {
  generations: HashMap<String, u64>,
  entries: HashMap<String, (Instant, String)>,
}

impl Pages {
  fn generation(&self, path: &str) -> u64 {
    self.generations.get(path).copied().unwrap_or(0)
  }
}

/// Process-local page cache with a fixed time-to-live
pub struct InMemoryPageCache {
  ttl: Duration,
  pages: RwLock<Pages>,
}

impl InMemoryPageCache {
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      pages: RwLock::new(Pages::default()),
    }
  }
}

#[async_trait]
impl PathRevalidator for InMemoryPageCache {
  async fn revalidate_path(&self, path: &str) {
    let mut pages = self.pages.write().await;
    *pages.generations.entry(path.to_string()).or_insert(0) += 1;
    if pages.entries.remove(path).is_some() {
      tracing::debug!(path, "Dropped cached page");
    }
  }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
  async fn lookup(&self, path: &str) -> PageLookup {
    let pages = self.pages.read().await;
    match pages.entries.get(path) {
      Some((stored_at, body)) if stored_at.elapsed() < self.ttl => PageLookup::Hit(body.clone()),
      _ => PageLookup::Miss(pages.generation(path)),
    }
  }

  async fn put(&self, path: &str, generation: u64, body: &str) {
    let mut pages = self.pages.write().await;
    if pages.generation(path) != generation {
      tracing::debug!(path, generation, "Skipped caching page rendered before revalidation");
      return;
    }
    pages
      .entries
      .insert(path.to_string(), (Instant::now(), body.to_string()));
  }
}
