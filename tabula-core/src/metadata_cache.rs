use crate::{Entity, EntityDef, Result, TableMetadata};
use dashmap::DashMap;
use std::{
    any::TypeId,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

/// Memoized [`TableMetadata`] keyed by entity type.
///
/// Lookups are lock free. On a miss the metadata is built without holding any
/// shard lock and then published, when two threads race on the same type the
/// first published value wins and both get it. Entries are never evicted.
#[derive(Default)]
pub struct MetadataCache {
    entries: DashMap<TypeId, Arc<TableMetadata>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata of `E`, built on first request.
    pub fn get_or_build<E: Entity>(&self) -> Result<Arc<TableMetadata>> {
        self.get_or_build_with(TypeId::of::<E>(), E::describe)
    }

    /// Metadata registered under `id`, building it from `describe` when missing.
    ///
    /// A build failure is returned to the caller and nothing is cached, the next
    /// request will try again.
    pub fn get_or_build_with(
        &self,
        id: TypeId,
        describe: impl FnOnce() -> EntityDef,
    ) -> Result<Arc<TableMetadata>> {
        if let Some(found) = self.entries.get(&id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(found.clone());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let built = Arc::new(TableMetadata::build(&describe())?);
        let published = self.entries.entry(id).or_insert(built).clone();
        log::debug!(
            "Cached metadata for `{}` (table `{}`)",
            published.type_name(),
            published.table_name()
        );
        Ok(published)
    }

    /// Already published metadata, does not build.
    pub fn get(&self, id: &TypeId) -> Option<Arc<TableMetadata>> {
        self.entries.get(id).map(|v| v.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Requests served from an already published entry.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Requests that had to build, including the ones that lost a race.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

static METADATA_CACHE: LazyLock<MetadataCache> = LazyLock::new(MetadataCache::new);

/// The process wide cache used by [`Entity::metadata`].
pub fn metadata_cache() -> &'static MetadataCache {
    &METADATA_CACHE
}
