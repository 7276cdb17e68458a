// File: src/expander/language.rs
// Purpose: Expander that prefers language-specific views

use super::{ViewLocationExpander, ViewLocationExpanderContext};
use crate::location::VIEW_NAME_TOKEN;
use serde::{Deserialize, Serialize};
use std::iter;

/// Context value holding the request language
pub const LANGUAGE_VALUE_KEY: &str = "language";

/// Route value the language is read from unless configured otherwise
pub const DEFAULT_LANGUAGE_ROUTE_KEY: &str = "culture";

/// Where the language goes in a location template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageViewLocationFormat {
    /// `/Views/Home/Index.en.cshtml`
    #[default]
    Suffix,
    /// `/Views/Home/en/Index.cshtml`
    SubFolder,
}

/// Searches language-specific variants of every location before the location itself
///
/// For `en-US` the order is `en-US` variant, `en` variant, then the plain
/// location. Requests without a language leave the locations untouched.
///
/// # Examples
///
/// ```
/// use rhtmx_views::expander::{
///     LanguageViewLocationExpander, LanguageViewLocationFormat, ViewLocationExpander,
///     ViewLocationExpanderContext,
/// };
/// use rhtmx_views::{ActionContext, RouteValues};
///
/// let action = ActionContext::new(
///     RouteValues::new().with("controller", "home").with("culture", "fr"),
/// );
/// let expander = LanguageViewLocationExpander::new(LanguageViewLocationFormat::Suffix);
/// let mut context = ViewLocationExpanderContext::new(&action, "index", false);
///
/// expander.populate_values(&mut context);
/// let locations = expander.expand_view_locations(&context, vec!["/Views/{1}/{0}.cshtml".into()]);
/// assert_eq!(locations, vec!["/Views/{1}/{0}.fr.cshtml", "/Views/{1}/{0}.cshtml"]);
/// ```
#[derive(Debug, Clone)]
pub struct LanguageViewLocationExpander {
    format: LanguageViewLocationFormat,
    route_key: String,
}

impl LanguageViewLocationExpander {
    pub fn new(format: LanguageViewLocationFormat) -> Self {
        Self {
            format,
            route_key: DEFAULT_LANGUAGE_ROUTE_KEY.to_string(),
        }
    }

    /// Read the language from a different route value
    pub fn with_route_key(mut self, route_key: impl Into<String>) -> Self {
        self.route_key = route_key.into();
        self
    }

    pub fn format(&self) -> LanguageViewLocationFormat {
        self.format
    }

    fn localize(&self, location: &str, language: &str) -> String {
        let replacement = match self.format {
            LanguageViewLocationFormat::Suffix => format!("{}.{}", VIEW_NAME_TOKEN, language),
            LanguageViewLocationFormat::SubFolder => format!("{}/{}", language, VIEW_NAME_TOKEN),
        };
        location.replace(VIEW_NAME_TOKEN, &replacement)
    }
}

impl Default for LanguageViewLocationExpander {
    fn default() -> Self {
        Self::new(LanguageViewLocationFormat::default())
    }
}

impl ViewLocationExpander for LanguageViewLocationExpander {
    fn populate_values(&self, context: &mut ViewLocationExpanderContext<'_>) {
        let language = context
            .action_context()
            .route_values()
            .get(&self.route_key)
            .filter(|language| !language.is_empty());

        if let Some(language) = language {
            context.set_value(LANGUAGE_VALUE_KEY, language);
        }
    }

    fn expand_view_locations(
        &self,
        context: &ViewLocationExpanderContext<'_>,
        view_locations: Vec<String>,
    ) -> Vec<String> {
        let Some(language) = context.value(LANGUAGE_VALUE_KEY) else {
            return view_locations;
        };

        // "en-US" also falls back to the neutral "en"
        let neutral = language
            .split_once('-')
            .map(|(neutral, _)| neutral)
            .filter(|neutral| !neutral.is_empty());
        let languages: Vec<&str> = iter::once(language).chain(neutral).collect();

        view_locations
            .into_iter()
            .flat_map(|location| {
                let mut variants: Vec<String> = languages
                    .iter()
                    .map(|language| self.localize(&location, language))
                    .collect();
                variants.push(location);
                variants
            })
            .collect()
    }
}
