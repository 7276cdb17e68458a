// File: src/page.rs
// Purpose: Pages and the factories that produce them from locations

use crate::error::ViewError;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{trace, warn};

/// Variables available to a page while rendering
pub type Variables = HashMap<String, Value>;

/// Result of a rendering operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub html: String,
}

impl RenderResult {
    pub fn new(html: String) -> Self {
        Self { html }
    }
}

/// An executable page located by the engine
pub trait Page: Send + Sync + fmt::Debug {
    /// Location the page was created from
    fn path(&self) -> &str;

    fn render(&self, variables: &Variables) -> Result<RenderResult, ViewError>;
}

/// Turns a location into a page
///
/// Returns `None` when nothing exists at the location. A missing page is never
/// an error.
pub trait PageFactory: Send + Sync {
    fn create_instance(&self, location: &str) -> Option<Arc<dyn Page>>;
}

/// Page backed by template source with `{name}` interpolation
///
/// Dotted names (`{user.name}`) walk into JSON objects. Unknown names are left
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePage {
    path: String,
    source: String,
}

impl TemplatePage {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn interpolate(&self, variables: &Variables) -> String {
        static VAR_REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_\.]*)\}").unwrap());

        VAR_REGEX
            .replace_all(&self.source, |caps: &regex::Captures| {
                let name = &caps[1];
                lookup(variables, name)
                    .map(display_value)
                    .unwrap_or_else(|| format!("{{{}}}", name))
            })
            .into_owned()
    }
}

impl Page for TemplatePage {
    fn path(&self) -> &str {
        &self.path
    }

    fn render(&self, variables: &Variables) -> Result<RenderResult, ViewError> {
        Ok(RenderResult::new(self.interpolate(variables)))
    }
}

fn lookup<'v>(variables: &'v Variables, name: &str) -> Option<&'v Value> {
    let mut parts = name.split('.');
    let mut current = variables.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Pages held in memory, keyed by exact location
///
/// Pages can be added and removed while the engine is serving requests.
#[derive(Debug, Default)]
pub struct MemoryPageFactory {
    pages: DashMap<String, Arc<TemplatePage>>,
}

impl MemoryPageFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, location: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(location, source);
        self
    }

    pub fn insert(&self, location: impl Into<String>, source: impl Into<String>) {
        let location = location.into();
        let page = Arc::new(TemplatePage::new(location.clone(), source));
        self.pages.insert(location, page);
    }

    pub fn remove(&self, location: &str) -> bool {
        self.pages.remove(location).is_some()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageFactory for MemoryPageFactory {
    fn create_instance(&self, location: &str) -> Option<Arc<dyn Page>> {
        let page = self.pages.get(location)?;
        let page: Arc<dyn Page> = page.value().clone();
        Some(page)
    }
}

/// Pages read from template files under a root directory
///
/// `~/Views/home/index.cshtml` and `/Views/home/index.cshtml` both map to
/// `<root>/Views/home/index.cshtml`. Locations that would leave the root are
/// treated as missing.
#[derive(Debug, Clone)]
pub struct FileSystemPageFactory {
    root: PathBuf,
}

impl FileSystemPageFactory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a location maps to, if it stays inside the root
    pub fn file_path(&self, location: &str) -> Option<PathBuf> {
        let relative = location
            .strip_prefix('~')
            .unwrap_or(location)
            .trim_start_matches('/');

        if relative.is_empty() || relative.split(['/', '\\']).any(|segment| segment == "..") {
            return None;
        }

        Some(self.root.join(relative))
    }
}

impl PageFactory for FileSystemPageFactory {
    fn create_instance(&self, location: &str) -> Option<Arc<dyn Page>> {
        let path = self.file_path(location)?;
        if !path.is_file() {
            trace!(location, path = %path.display(), "no template file");
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(source) => Some(Arc::new(TemplatePage::new(location, source))),
            Err(err) => {
                warn!(location, path = %path.display(), error = %err, "failed to read template");
                None
            }
        }
    }
}
