use crate::domain::model::{CardTemplate, TemplateName};
use crate::domain::ports::TemplateStore;
use crate::utils::error::{CardError, Result};
use std::sync::{Arc, Mutex, OnceLock};

/// Load-once handle to a named template.
///
/// The store is consulted at most once per successful load; concurrent first
/// callers wait on the loader and all observe the same `Arc`. A failed load
/// is not cached.
pub struct TemplateCache<S: TemplateStore> {
    store: S,
    name: TemplateName,
    template: OnceLock<Arc<CardTemplate>>,
    init_lock: Mutex<()>,
}

impl<S: TemplateStore> TemplateCache<S> {
    pub fn new(store: S, name: TemplateName) -> Self {
        Self {
            store,
            name,
            template: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> TemplateName {
        self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.template.get().is_some()
    }

    pub fn get(&self) -> Result<Arc<CardTemplate>> {
        if let Some(template) = self.template.get() {
            return Ok(Arc::clone(template));
        }

        let _guard = self.init_lock.lock().map_err(|_| CardError::Internal {
            message: format!("template cache for '{}' is poisoned", self.name),
        })?;

        if let Some(template) = self.template.get() {
            return Ok(Arc::clone(template));
        }

        tracing::debug!("Loading template '{}'", self.name);
        let loaded = Arc::new(self.store.load_template(self.name)?);
        Ok(Arc::clone(self.template.get_or_init(|| loaded)))
    }
}
