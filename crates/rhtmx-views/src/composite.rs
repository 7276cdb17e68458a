// File: src/composite.rs
// Purpose: Chain of view engines tried in order

use crate::engine::ViewEngine;
use crate::error::ViewError;
use crate::result::ViewEngineResult;
use crate::route::ActionContext;
use std::fmt;
use std::sync::Arc;

/// Tries each engine in registration order and returns the first view found
///
/// When no engine finds the view, the searched locations of every engine are
/// reported together, in engine order.
#[derive(Clone, Default)]
pub struct CompositeViewEngine {
    engines: Vec<Arc<dyn ViewEngine>>,
}

impl CompositeViewEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: Arc<dyn ViewEngine>) -> Self {
        self.engines.push(engine);
        self
    }

    pub fn engines(&self) -> &[Arc<dyn ViewEngine>] {
        &self.engines
    }

    fn find(
        &self,
        context: &ActionContext,
        view_name: &str,
        is_partial: bool,
    ) -> Result<ViewEngineResult, ViewError> {
        let argument = if is_partial { "partial_view_name" } else { "view_name" };
        ViewError::ensure_not_empty(view_name, argument)?;

        let mut searched_locations = Vec::new();
        for engine in &self.engines {
            let result = if is_partial {
                engine.find_partial_view(context, view_name)?
            } else {
                engine.find_view(context, view_name)?
            };

            match result {
                found @ ViewEngineResult::Found { .. } => return Ok(found),
                ViewEngineResult::NotFound {
                    searched_locations: searched,
                    ..
                } => searched_locations.extend(searched),
            }
        }

        Ok(ViewEngineResult::not_found(view_name, searched_locations))
    }
}

impl ViewEngine for CompositeViewEngine {
    fn name(&self) -> &str {
        "composite"
    }

    fn find_view(&self, context: &ActionContext, view_name: &str) -> Result<ViewEngineResult, ViewError> {
        self.find(context, view_name, false)
    }

    fn find_partial_view(
        &self,
        context: &ActionContext,
        partial_view_name: &str,
    ) -> Result<ViewEngineResult, ViewError> {
        self.find(context, partial_view_name, true)
    }
}

impl fmt::Debug for CompositeViewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.engines.iter().map(|engine| engine.name()).collect();
        f.debug_struct("CompositeViewEngine").field("engines", &names).finish()
    }
}
