//! # RHTMX Views
//!
//! Resolves a view name to a template location for the current request.
//!
//! ## Features
//!
//! - **Conventional locations**: `/Views/{controller}/{name}.cshtml`, then
//!   `/Views/Shared/{name}.cshtml`, with area-aware variants
//! - **Location expanders**: plug-ins that add lookup values and rewrite the
//!   searched locations (a language expander ships with the crate)
//! - **Location cache**: successful lookups are remembered per request shape and
//!   re-verified on every use
//! - **Diagnostics**: a failed lookup reports every location it searched
//!
//! ## Example
//!
//! ```rust
//! use rhtmx_views::{
//!     ActionContext, MemoryPageFactory, RouteValues, TemplateViewEngine, TemplateViewFactory, ViewEngine,
//! };
//! use std::sync::Arc;
//!
//! let pages = MemoryPageFactory::new()
//!     .with_page("/Areas/admin/Views/users/index.cshtml", "<h1>{title}</h1>");
//! let engine = TemplateViewEngine::new(Arc::new(pages), Arc::new(TemplateViewFactory));
//!
//! let context = ActionContext::new(
//!     RouteValues::new().with("area", "admin").with("controller", "users"),
//! );
//! let view = engine.find_view(&context, "index").unwrap().ensure_successful().unwrap();
//! assert_eq!(view.path(), "/Areas/admin/Views/users/index.cshtml");
//! ```

pub mod cache;
pub mod composite;
pub mod config;
pub mod engine;
pub mod error;
pub mod expander;
pub mod location;
pub mod page;
pub mod result;
pub mod route;
pub mod view;

pub use cache::{CacheStats, MemoryViewLocationCache, ViewLocationCache, ViewLocationCacheKey};
pub use composite::CompositeViewEngine;
pub use config::{Config, LanguageConfig, ViewsConfig};
pub use engine::{TemplateViewEngine, ViewEngine};
pub use error::ViewError;
pub use expander::{
    LanguageViewLocationExpander, LanguageViewLocationFormat, ViewLocationExpander,
    ViewLocationExpanderContext, ViewLocationExpanderProvider,
};
pub use location::LocationFormats;
pub use page::{
    FileSystemPageFactory, MemoryPageFactory, Page, PageFactory, RenderResult, TemplatePage, Variables,
};
pub use result::{PageResult, ViewEngineResult};
pub use route::{ActionContext, RouteValues};
pub use view::{TemplateView, TemplateViewFactory, View, ViewFactory};
