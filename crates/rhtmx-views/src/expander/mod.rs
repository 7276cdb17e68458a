//! View location expanders
//!
//! An expander takes part in every lookup in two steps:
//!
//! 1. [`ViewLocationExpander::populate_values`] adds values to the per-call
//!    [`ViewLocationExpanderContext`]. These values become part of the location
//!    cache key, so an expander must record here everything its second step depends on.
//! 2. [`ViewLocationExpander::expand_view_locations`] receives the current ordered
//!    location templates and returns a replacement sequence.
//!
//! Expanders run in registration order for both steps. The output of one
//! expander's `expand_view_locations` is the input of the next.

use crate::route::ActionContext;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub mod language;

pub use language::{LanguageViewLocationExpander, LanguageViewLocationFormat, LANGUAGE_VALUE_KEY};

/// Per-call state shared by the expanders of one lookup
#[derive(Debug, Clone)]
pub struct ViewLocationExpanderContext<'a> {
    action_context: &'a ActionContext,
    view_name: &'a str,
    is_partial: bool,
    values: BTreeMap<String, String>,
}

impl<'a> ViewLocationExpanderContext<'a> {
    pub fn new(action_context: &'a ActionContext, view_name: &'a str, is_partial: bool) -> Self {
        Self {
            action_context,
            view_name,
            is_partial,
            values: BTreeMap::new(),
        }
    }

    pub fn action_context(&self) -> &'a ActionContext {
        self.action_context
    }

    pub fn view_name(&self) -> &'a str {
        self.view_name
    }

    pub fn controller_name(&self) -> Option<&'a str> {
        self.action_context.route_values().controller()
    }

    /// Non-empty area of the request
    pub fn area_name(&self) -> Option<&'a str> {
        self.action_context.route_values().area()
    }

    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Contributes values to a lookup and rewrites its location templates
pub trait ViewLocationExpander: Send + Sync {
    /// Records the values `expand_view_locations` depends on
    fn populate_values(&self, context: &mut ViewLocationExpanderContext<'_>);

    /// Returns the templates to search, given the templates produced so far
    fn expand_view_locations(
        &self,
        context: &ViewLocationExpanderContext<'_>,
        view_locations: Vec<String>,
    ) -> Vec<String>;
}

/// The ordered expanders registered with an engine
///
/// Built once at startup; read-only while requests are served.
#[derive(Clone, Default)]
pub struct ViewLocationExpanderProvider {
    expanders: Vec<Arc<dyn ViewLocationExpander>>,
}

impl ViewLocationExpanderProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expander(mut self, expander: Arc<dyn ViewLocationExpander>) -> Self {
        self.expanders.push(expander);
        self
    }

    pub fn expanders(&self) -> &[Arc<dyn ViewLocationExpander>] {
        &self.expanders
    }

    pub fn len(&self) -> usize {
        self.expanders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanders.is_empty()
    }

    /// Runs every expander's `populate_values` in registration order
    pub fn populate_values(&self, context: &mut ViewLocationExpanderContext<'_>) {
        for expander in &self.expanders {
            expander.populate_values(context);
        }
    }

    /// Folds the seeds through every expander in registration order
    pub fn expand_view_locations(
        &self,
        context: &ViewLocationExpanderContext<'_>,
        seeds: Vec<String>,
    ) -> Vec<String> {
        self.expanders
            .iter()
            .fold(seeds, |locations, expander| {
                expander.expand_view_locations(context, locations)
            })
    }
}

impl fmt::Debug for ViewLocationExpanderProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewLocationExpanderProvider")
            .field("expanders", &self.expanders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteValues;
    use pretty_assertions::assert_eq;

    struct Prefix(&'static str);

    impl ViewLocationExpander for Prefix {
        fn populate_values(&self, context: &mut ViewLocationExpanderContext<'_>) {
            let seen = context.value("trail").unwrap_or("").to_string();
            context.set_value("trail", format!("{}{}", seen, self.0));
        }

        fn expand_view_locations(
            &self,
            _context: &ViewLocationExpanderContext<'_>,
            view_locations: Vec<String>,
        ) -> Vec<String> {
            view_locations
                .into_iter()
                .map(|location| format!("/{}{}", self.0, location))
                .collect()
        }
    }

    #[test]
    fn test_empty_provider_is_identity() {
        let action = ActionContext::new(RouteValues::new().with("controller", "home"));
        let context = ViewLocationExpanderContext::new(&action, "index", false);
        let seeds = vec!["/a/{0}".to_string(), "/b/{0}".to_string()];

        let provider = ViewLocationExpanderProvider::new();
        assert_eq!(provider.expand_view_locations(&context, seeds.clone()), seeds);
    }

    #[test]
    fn test_expanders_chain_in_order() {
        let action = ActionContext::new(RouteValues::new().with("controller", "home"));
        let mut context = ViewLocationExpanderContext::new(&action, "index", true);
        let provider = ViewLocationExpanderProvider::new()
            .with_expander(Arc::new(Prefix("x")))
            .with_expander(Arc::new(Prefix("y")));

        provider.populate_values(&mut context);
        assert_eq!(context.value("trail"), Some("xy"));

        let expanded = provider.expand_view_locations(&context, vec!["/{0}".to_string()]);
        assert_eq!(expanded, vec!["/y/x/{0}".to_string()]);
    }

    #[test]
    fn test_context_reads_route_values() {
        let action = ActionContext::new(
            RouteValues::new().with("area", "admin").with("controller", "users"),
        );
        let context = ViewLocationExpanderContext::new(&action, "edit", false);

        assert_eq!(context.view_name(), "edit");
        assert_eq!(context.controller_name(), Some("users"));
        assert_eq!(context.area_name(), Some("admin"));
        assert!(!context.is_partial());
        assert!(context.values().is_empty());
    }
}
