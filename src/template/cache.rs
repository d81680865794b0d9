use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use metrics::{counter, histogram};
use tracing::debug;

use super::error::TemplateError;
use super::source::TemplateSource;
use super::tokenize::tokenize;
use super::CompiledTemplate;

/// Concurrent compile-on-miss store of compiled templates.
///
/// Keys are template names lowercased at exactly this boundary, making
/// addressing case-insensitive on both the hit and miss path. Mutation is
/// insert-only apart from [`TemplateCache::clear`]; entries are immutable
/// snapshots, so a clear never affects in-flight renders. Concurrent first
/// access for the same name may compile twice; both results are equivalent and
/// the map insert is last-writer-wins.
#[derive(Default)]
pub struct TemplateCache {
    entries: DashMap<String, Arc<CompiledTemplate>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the compiled form of `name`, compiling and storing it on miss.
    ///
    /// Failures (`NotFound`, `UnclosedTag`, source read errors) are never
    /// cached; a later call retries from source.
    pub async fn get_or_compile(
        &self,
        name: &str,
        source: &dyn TemplateSource,
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let key = name.to_lowercase();

        if let Some(entry) = self.entries.get(&key) {
            counter!("featherlite_template_cache_hit_total").increment(1);
            return Ok(Arc::clone(&entry));
        }
        counter!("featherlite_template_cache_miss_total").increment(1);

        let Some(raw) = source.load(name).await? else {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
                location: source.location(name),
            });
        };

        let started = Instant::now();
        let compiled = Arc::new(tokenize(&raw)?);
        histogram!("featherlite_template_compile_ms")
            .record(started.elapsed().as_secs_f64() * 1000.0);

        debug!(
            target = "featherlite::template",
            template = %key,
            placeholders = compiled.placeholder_count(),
            "compiled template"
        );

        self.entries.insert(key, Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Atomically drop every cached entry; subsequent lookups recompile from
    /// source.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
