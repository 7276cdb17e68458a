// File: src/view.rs
// Purpose: Renderable views and the factory that wraps pages into them

use crate::engine::ViewEngine;
use crate::error::ViewError;
use crate::page::{Page, RenderResult, Variables};
use std::fmt;
use std::sync::Arc;

/// A located view, ready to render
pub trait View: Send + Sync + fmt::Debug {
    /// Location of the page behind this view
    fn path(&self) -> &str;

    fn is_partial(&self) -> bool;

    fn render(&self, variables: &Variables) -> Result<RenderResult, ViewError>;
}

/// Wraps a located page into a view
pub trait ViewFactory: Send + Sync {
    fn get_view(&self, engine: &dyn ViewEngine, page: Arc<dyn Page>, is_partial: bool) -> Arc<dyn View>;
}

/// View that renders its page directly
#[derive(Debug, Clone)]
pub struct TemplateView {
    page: Arc<dyn Page>,
    is_partial: bool,
    engine_name: String,
}

impl TemplateView {
    pub fn new(page: Arc<dyn Page>, is_partial: bool, engine_name: impl Into<String>) -> Self {
        Self {
            page,
            is_partial,
            engine_name: engine_name.into(),
        }
    }

    pub fn page(&self) -> &Arc<dyn Page> {
        &self.page
    }

    /// Name of the engine that located this view
    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }
}

impl View for TemplateView {
    fn path(&self) -> &str {
        self.page.path()
    }

    fn is_partial(&self) -> bool {
        self.is_partial
    }

    fn render(&self, variables: &Variables) -> Result<RenderResult, ViewError> {
        self.page.render(variables)
    }
}

/// Creates [`TemplateView`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateViewFactory;

impl ViewFactory for TemplateViewFactory {
    fn get_view(&self, engine: &dyn ViewEngine, page: Arc<dyn Page>, is_partial: bool) -> Arc<dyn View> {
        Arc::new(TemplateView::new(page, is_partial, engine.name()))
    }
}
