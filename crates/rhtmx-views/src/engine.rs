//! View lookup
//!
//! [`TemplateViewEngine`] turns a view name and the request's route values into
//! an ordered list of candidate locations and returns the first one the page
//! factory can load.
//!
//! ## Lookup Flow
//!
//! ```text
//! view name ──► rooted? ──yes──► extension ok? ──► probe that path only
//!                  │
//!                  no
//!                  ▼
//!        populate expander values ──► cache key
//!                  │
//!                  ▼
//!        formats (area / no area) ──► expanders ──► substitute {0} {1} {2}
//!                                                         │
//!                                                         ▼
//!                         cached location among candidates and still loads? ──yes──► view
//!                                                         │
//!                                                         no
//!                                                         ▼
//!                                      probe candidates in order ──► first hit: cache + view
//!                                                         │
//!                                                         ▼
//!                                            none: NotFound(searched locations)
//! ```
//!
//! A cached location that no longer loads, or that is not one of this engine's
//! candidates, triggers a full scan; the entry is overwritten by whatever the
//! scan finds.

use crate::cache::{MemoryViewLocationCache, ViewLocationCache, ViewLocationCacheKey};
use crate::config::ViewsConfig;
use crate::error::ViewError;
use crate::expander::{
    LanguageViewLocationExpander, ViewLocationExpander, ViewLocationExpanderContext,
    ViewLocationExpanderProvider,
};
use crate::location::{self, LocationFormats, DEFAULT_EXTENSION};
use crate::page::{FileSystemPageFactory, Page, PageFactory};
use crate::result::{PageResult, ViewEngineResult};
use crate::route::ActionContext;
use crate::view::{TemplateViewFactory, ViewFactory};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Finds views by name for the current request
pub trait ViewEngine: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Finds a full view (one that takes part in layout rendering)
    fn find_view(&self, context: &ActionContext, view_name: &str) -> Result<ViewEngineResult, ViewError>;

    /// Finds a partial view
    fn find_partial_view(
        &self,
        context: &ActionContext,
        partial_view_name: &str,
    ) -> Result<ViewEngineResult, ViewError>;
}

/// Name reported by [`TemplateViewEngine`]
pub const TEMPLATE_ENGINE_NAME: &str = "template";

/// Where a lookup ended up
enum Located {
    Found(Arc<dyn Page>),
    NotFound(Vec<String>),
}

/// Conventional view engine over location templates
///
/// # Examples
///
/// ```
/// use rhtmx_views::{
///     ActionContext, MemoryPageFactory, RouteValues, TemplateViewEngine, TemplateViewFactory, ViewEngine,
/// };
/// use std::sync::Arc;
///
/// let pages = MemoryPageFactory::new().with_page("/Views/Shared/footer.cshtml", "<footer/>");
/// let engine = TemplateViewEngine::new(Arc::new(pages), Arc::new(TemplateViewFactory));
/// let context = ActionContext::new(RouteValues::new().with("controller", "home"));
///
/// let found = engine.find_partial_view(&context, "footer").unwrap();
/// assert_eq!(found.view().unwrap().path(), "/Views/Shared/footer.cshtml");
///
/// let missing = engine.find_view(&context, "about").unwrap();
/// assert_eq!(
///     missing.searched_locations(),
///     ["/Views/home/about.cshtml", "/Views/Shared/about.cshtml"]
/// );
/// ```
#[derive(Clone)]
pub struct TemplateViewEngine {
    page_factory: Arc<dyn PageFactory>,
    view_factory: Arc<dyn ViewFactory>,
    expander_provider: ViewLocationExpanderProvider,
    cache: Arc<dyn ViewLocationCache>,
    formats: LocationFormats,
    extension: String,
}

impl TemplateViewEngine {
    /// Engine with default formats, no expanders and an in-memory cache
    pub fn new(page_factory: Arc<dyn PageFactory>, view_factory: Arc<dyn ViewFactory>) -> Self {
        Self {
            page_factory,
            view_factory,
            expander_provider: ViewLocationExpanderProvider::new(),
            cache: Arc::new(MemoryViewLocationCache::new()),
            formats: LocationFormats::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Engine reading templates from `config.root_dir`
    pub fn from_config(config: &ViewsConfig) -> Self {
        let engine = Self::new(
            Arc::new(FileSystemPageFactory::new(&config.root_dir)),
            Arc::new(TemplateViewFactory),
        )
        .with_formats(config.formats())
        .with_extension(config.extension.clone());

        match &config.language {
            Some(language) => engine.with_expander(Arc::new(
                LanguageViewLocationExpander::new(language.format).with_route_key(language.route_key.clone()),
            )),
            None => engine,
        }
    }

    /// Replace both template sequences
    pub fn with_formats(mut self, formats: LocationFormats) -> Self {
        self.formats = formats;
        self
    }

    /// Register an expander after those already registered
    pub fn with_expander(mut self, expander: Arc<dyn ViewLocationExpander>) -> Self {
        self.expander_provider = self.expander_provider.with_expander(expander);
        self
    }

    pub fn with_expander_provider(mut self, expander_provider: ViewLocationExpanderProvider) -> Self {
        self.expander_provider = expander_provider;
        self
    }

    /// Use `cache` for resolved locations
    ///
    /// A cache may be shared between engines. A cached location is only used
    /// when it is one of this engine's candidates for the lookup.
    pub fn with_cache(mut self, cache: Arc<dyn ViewLocationCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Extension a rooted view path must end with
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn formats(&self) -> &LocationFormats {
        &self.formats
    }

    pub fn expander_provider(&self) -> &ViewLocationExpanderProvider {
        &self.expander_provider
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Finds a page by name without caching or wrapping it in a view
    ///
    /// Expanders see the lookup as partial.
    pub fn find_page(&self, context: &ActionContext, page_name: &str) -> Result<PageResult, ViewError> {
        ViewError::ensure_not_empty(page_name, "page_name")?;

        let located = if location::is_rooted(page_name) {
            self.locate_rooted(page_name)
        } else {
            let mut expander_context = ViewLocationExpanderContext::new(context, page_name, true);
            self.expander_provider.populate_values(&mut expander_context);

            let candidates = self.candidate_locations(&expander_context);
            match self.full_scan(&candidates) {
                Some((_, page)) => Located::Found(page),
                None => Located::NotFound(candidates),
            }
        };

        Ok(match located {
            Located::Found(page) => PageResult::found(page_name, page),
            Located::NotFound(searched) => PageResult::not_found(page_name, searched),
        })
    }

    fn find_view_core(
        &self,
        context: &ActionContext,
        view_name: &str,
        is_partial: bool,
    ) -> Result<ViewEngineResult, ViewError> {
        let argument = if is_partial { "partial_view_name" } else { "view_name" };
        ViewError::ensure_not_empty(view_name, argument)?;

        let located = if location::is_rooted(view_name) {
            self.locate_rooted(view_name)
        } else {
            self.locate_cached(context, view_name, is_partial)
        };

        Ok(match located {
            Located::Found(page) => {
                let view = self.view_factory.get_view(self, page, is_partial);
                ViewEngineResult::found(view_name, view)
            }
            Located::NotFound(searched) => {
                debug!(view_name, searched = searched.len(), "view not found");
                ViewEngineResult::not_found(view_name, searched)
            }
        })
    }

    /// Rooted names are a single candidate, outside the templates and the cache
    fn locate_rooted(&self, path: &str) -> Located {
        if !location::has_extension(path, &self.extension) {
            debug!(path, extension = %self.extension, "rooted view path without view extension");
            return Located::NotFound(Vec::new());
        }

        match self.page_factory.create_instance(path) {
            Some(page) => Located::Found(page),
            None => Located::NotFound(vec![path.to_string()]),
        }
    }

    fn locate_cached(&self, context: &ActionContext, view_name: &str, is_partial: bool) -> Located {
        let mut expander_context = ViewLocationExpanderContext::new(context, view_name, is_partial);
        self.expander_provider.populate_values(&mut expander_context);

        let key = ViewLocationCacheKey::from_context(&expander_context);
        let candidates = self.candidate_locations(&expander_context);
        if let Some(page) = self.try_cached_candidate(&key, &candidates) {
            return Located::Found(page);
        }

        match self.full_scan(&candidates) {
            Some((location, page)) => {
                self.cache.set(key, location.to_string());
                Located::Found(page)
            }
            None => Located::NotFound(candidates),
        }
    }

    /// Probes only the cached location for the key
    fn try_cached_candidate(&self, key: &ViewLocationCacheKey, candidates: &[String]) -> Option<Arc<dyn Page>> {
        let location = self.cache.get(key)?;
        if !candidates.contains(&location) {
            debug!(location = %location, "cached view location is not a candidate for this engine");
            return None;
        }

        match self.page_factory.create_instance(&location) {
            Some(page) => {
                trace!(location = %location, "view location cache hit");
                Some(page)
            }
            None => {
                debug!(location = %location, "cached view location no longer resolves");
                None
            }
        }
    }

    /// Probes candidates in order and stops at the first page
    fn full_scan<'c>(&self, candidates: &'c [String]) -> Option<(&'c str, Arc<dyn Page>)> {
        candidates.iter().find_map(|location| {
            trace!(location = %location, "probing view location");
            self.page_factory
                .create_instance(location)
                .map(|page| (location.as_str(), page))
        })
    }

    /// Templates for the request, run through the expanders, with tokens substituted
    fn candidate_locations(&self, context: &ViewLocationExpanderContext<'_>) -> Vec<String> {
        let area = context.area_name();
        let seeds = self.formats.select(area.is_some()).to_vec();
        let controller = context.controller_name().unwrap_or_default();

        self.expander_provider
            .expand_view_locations(context, seeds)
            .iter()
            .map(|template| {
                location::expand_template(template, context.view_name(), controller, area.unwrap_or_default())
            })
            .collect()
    }
}

impl ViewEngine for TemplateViewEngine {
    fn name(&self) -> &str {
        TEMPLATE_ENGINE_NAME
    }

    fn find_view(&self, context: &ActionContext, view_name: &str) -> Result<ViewEngineResult, ViewError> {
        self.find_view_core(context, view_name, false)
    }

    fn find_partial_view(
        &self,
        context: &ActionContext,
        partial_view_name: &str,
    ) -> Result<ViewEngineResult, ViewError> {
        self.find_view_core(context, partial_view_name, true)
    }
}

impl fmt::Debug for TemplateViewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateViewEngine")
            .field("formats", &self.formats)
            .field("expander_provider", &self.expander_provider)
            .field("extension", &self.extension)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanguageConfig;
    use crate::expander::LanguageViewLocationFormat;
    use crate::page::MemoryPageFactory;
    use crate::route::RouteValues;

    fn context(controller: &str) -> ActionContext {
        ActionContext::new(RouteValues::new().with("controller", controller))
    }

    #[test]
    fn test_rooted_view_is_probed_directly() {
        let pages = MemoryPageFactory::new().with_page("~/custom/page.cshtml", "x");
        let engine = TemplateViewEngine::new(Arc::new(pages), Arc::new(TemplateViewFactory));

        let result = engine.find_view(&context("home"), "~/custom/page.cshtml").unwrap();
        assert!(result.success());
        assert_eq!(result.view().unwrap().path(), "~/custom/page.cshtml");

        let missing = engine.find_view(&context("home"), "/custom/other.cshtml").unwrap();
        assert_eq!(missing.searched_locations(), ["/custom/other.cshtml".to_string()]);
    }

    #[test]
    fn test_custom_extension_for_rooted_paths() {
        let pages = MemoryPageFactory::new().with_page("/pages/index.rhtmx", "x");
        let engine = TemplateViewEngine::new(Arc::new(pages), Arc::new(TemplateViewFactory))
            .with_extension(".rhtmx");

        assert!(engine.find_view(&context("home"), "/pages/index.rhtmx").unwrap().success());
        assert!(!engine.find_view(&context("home"), "/pages/index.cshtml").unwrap().success());
    }

    #[test]
    fn test_view_knows_engine_and_partial_flag() {
        let pages = MemoryPageFactory::new().with_page("/Views/Shared/nav.cshtml", "x");
        let engine = TemplateViewEngine::new(Arc::new(pages), Arc::new(TemplateViewFactory));

        let partial = engine.find_partial_view(&context("home"), "nav").unwrap();
        assert!(partial.view().unwrap().is_partial());

        let full = engine.find_view(&context("home"), "nav").unwrap();
        assert!(!full.view().unwrap().is_partial());
        assert_eq!(engine.name(), TEMPLATE_ENGINE_NAME);
    }

    #[test]
    fn test_from_config_registers_language_expander() {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("Views").join("home");
        std::fs::create_dir_all(&views).unwrap();
        std::fs::write(views.join("index.fr.cshtml"), "bonjour").unwrap();
        std::fs::write(views.join("index.cshtml"), "hello").unwrap();

        let config = ViewsConfig {
            root_dir: dir.path().to_string_lossy().into_owned(),
            language: Some(LanguageConfig {
                format: LanguageViewLocationFormat::Suffix,
                route_key: "culture".to_string(),
            }),
            ..ViewsConfig::default()
        };
        let engine = TemplateViewEngine::from_config(&config);
        assert_eq!(engine.expander_provider().len(), 1);

        let french = ActionContext::new(
            RouteValues::new().with("controller", "home").with("culture", "fr"),
        );
        let view = engine.find_view(&french, "index").unwrap().ensure_successful().unwrap();
        assert_eq!(view.path(), "/Views/home/index.fr.cshtml");

        let view = engine.find_view(&context("home"), "index").unwrap().ensure_successful().unwrap();
        assert_eq!(view.path(), "/Views/home/index.cshtml");
    }
}
