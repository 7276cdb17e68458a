// File: src/location.rs
// Purpose: Location templates, their defaults and token substitution

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extension a rooted view path must carry to be looked up
pub const DEFAULT_EXTENSION: &str = ".cshtml";

/// Placeholder for the view name
pub const VIEW_NAME_TOKEN: &str = "{0}";

/// Placeholder for the controller name
pub const CONTROLLER_TOKEN: &str = "{1}";

/// Placeholder for the area name
pub const AREA_TOKEN: &str = "{2}";

pub fn default_view_location_formats() -> Vec<String> {
    vec![
        "/Views/{1}/{0}.cshtml".to_string(),
        "/Views/Shared/{0}.cshtml".to_string(),
    ]
}

pub fn default_area_view_location_formats() -> Vec<String> {
    vec![
        "/Areas/{2}/Views/{1}/{0}.cshtml".to_string(),
        "/Areas/{2}/Views/Shared/{0}.cshtml".to_string(),
        "/Views/Shared/{0}.cshtml".to_string(),
    ]
}

/// The two ordered template sequences the engine searches
///
/// `view_location_formats` is used when the request has no area,
/// `area_view_location_formats` when it does. Either can be replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFormats {
    #[serde(default = "default_view_location_formats")]
    pub view_location_formats: Vec<String>,

    #[serde(default = "default_area_view_location_formats")]
    pub area_view_location_formats: Vec<String>,
}

impl Default for LocationFormats {
    fn default() -> Self {
        Self {
            view_location_formats: default_view_location_formats(),
            area_view_location_formats: default_area_view_location_formats(),
        }
    }
}

impl LocationFormats {
    pub fn new(view_location_formats: Vec<String>, area_view_location_formats: Vec<String>) -> Self {
        Self {
            view_location_formats,
            area_view_location_formats,
        }
    }

    pub fn with_view_location_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view_location_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_area_view_location_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.area_view_location_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Templates for a request with or without an area
    pub fn select(&self, has_area: bool) -> &[String] {
        if has_area {
            &self.area_view_location_formats
        } else {
            &self.view_location_formats
        }
    }
}

/// Substitutes `{0}`, `{1}` and `{2}` in a single pass
///
/// Substituted values are never rescanned, so a view name containing `{1}`
/// stays intact.
///
/// # Examples
///
/// ```
/// use rhtmx_views::location::expand_template;
///
/// let path = expand_template("/Areas/{2}/Views/{1}/{0}.cshtml", "index", "home", "admin");
/// assert_eq!(path, "/Areas/admin/Views/home/index.cshtml");
/// ```
pub fn expand_template(template: &str, view_name: &str, controller: &str, area: &str) -> String {
    static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([0-2])\}").unwrap());

    TOKEN_REGEX
        .replace_all(template, |caps: &regex::Captures| match &caps[1] {
            "0" => view_name,
            "1" => controller,
            _ => area,
        })
        .into_owned()
}

/// Whether a name is an app-relative (`~/`) or absolute (`/`) path
pub fn is_rooted(name: &str) -> bool {
    name.starts_with("~/") || name.starts_with('/')
}

/// Case-insensitive extension check
pub fn has_extension(name: &str, extension: &str) -> bool {
    name.len() >= extension.len()
        && name.is_char_boundary(name.len() - extension.len())
        && name[name.len() - extension.len()..].eq_ignore_ascii_case(extension)
}
