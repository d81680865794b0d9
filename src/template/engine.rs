use std::collections::HashMap;
use std::sync::Arc;

use super::cache::TemplateCache;
use super::error::TemplateError;
use super::render::render;
use super::source::TemplateSource;

/// Façade combining the cache, tokenizer, and renderer.
///
/// Constructed once at process start and shared by reference; the cache it
/// owns lives for the process lifetime.
pub struct TemplateEngine {
    cache: TemplateCache,
    source: Arc<dyn TemplateSource>,
}

impl TemplateEngine {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self {
            cache: TemplateCache::new(),
            source,
        }
    }

    /// Render `name` against `variables`, compiling the template on first use.
    pub async fn render(
        &self,
        name: &str,
        variables: Option<&HashMap<String, String>>,
    ) -> Result<String, TemplateError> {
        let compiled = self.cache.get_or_compile(name, self.source.as_ref()).await?;
        Ok(render(&compiled, variables))
    }

    /// Compile `name` without rendering it. Used by the batch `check` path.
    pub async fn compile(&self, name: &str) -> Result<(), TemplateError> {
        self.cache
            .get_or_compile(name, self.source.as_ref())
            .await
            .map(|_| ())
    }

    /// Drop every cached template, forcing recompilation from source.
    /// Intended for hot-reload workflows.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }
}
