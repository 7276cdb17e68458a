// File: src/result.rs
// Purpose: Outcomes of view and page lookups

use crate::error::ViewError;
use crate::page::Page;
use crate::view::View;
use std::sync::Arc;

/// Outcome of `find_view` / `find_partial_view`
#[derive(Debug, Clone)]
pub enum ViewEngineResult {
    Found {
        view_name: String,
        view: Arc<dyn View>,
    },
    NotFound {
        view_name: String,
        /// Every location tried, in search order
        searched_locations: Vec<String>,
    },
}

impl ViewEngineResult {
    pub fn found(view_name: impl Into<String>, view: Arc<dyn View>) -> Self {
        Self::Found {
            view_name: view_name.into(),
            view,
        }
    }

    pub fn not_found(view_name: impl Into<String>, searched_locations: Vec<String>) -> Self {
        Self::NotFound {
            view_name: view_name.into(),
            searched_locations,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The name that was requested
    pub fn view_name(&self) -> &str {
        match self {
            Self::Found { view_name, .. } | Self::NotFound { view_name, .. } => view_name,
        }
    }

    pub fn view(&self) -> Option<&Arc<dyn View>> {
        match self {
            Self::Found { view, .. } => Some(view),
            Self::NotFound { .. } => None,
        }
    }

    /// Locations searched; empty for a found view
    pub fn searched_locations(&self) -> &[String] {
        match self {
            Self::Found { .. } => &[],
            Self::NotFound {
                searched_locations, ..
            } => searched_locations,
        }
    }

    /// The view, or [`ViewError::ViewNotFound`] listing the searched locations
    pub fn ensure_successful(self) -> Result<Arc<dyn View>, ViewError> {
        match self {
            Self::Found { view, .. } => Ok(view),
            Self::NotFound {
                view_name,
                searched_locations,
            } => Err(ViewError::ViewNotFound {
                name: view_name,
                searched_locations,
            }),
        }
    }
}

/// Outcome of `find_page`
///
/// `searched_locations` is only set when no page was found.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub name: String,
    pub page: Option<Arc<dyn Page>>,
    pub searched_locations: Option<Vec<String>>,
}

impl PageResult {
    pub fn found(name: impl Into<String>, page: Arc<dyn Page>) -> Self {
        Self {
            name: name.into(),
            page: Some(page),
            searched_locations: None,
        }
    }

    pub fn not_found(name: impl Into<String>, searched_locations: Vec<String>) -> Self {
        Self {
            name: name.into(),
            page: None,
            searched_locations: Some(searched_locations),
        }
    }

    pub fn success(&self) -> bool {
        self.page.is_some()
    }
}
