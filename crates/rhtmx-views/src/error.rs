// File: src/error.rs
// Purpose: Error type shared by view lookup and rendering

/// Errors raised by the view engine.
///
/// Failing to find a view is *not* an error during lookup: the engine reports it
/// as [`ViewEngineResult::NotFound`](crate::ViewEngineResult::NotFound) so callers
/// can show the searched locations. [`ViewError::ViewNotFound`] only appears when a
/// caller asks for a fault via
/// [`ViewEngineResult::ensure_successful`](crate::ViewEngineResult::ensure_successful).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A required name argument was empty
    #[error("value cannot be null or empty: `{argument}`")]
    InvalidArgument { argument: &'static str },

    /// No view was found at any of the searched locations
    #[error(
        "the view '{name}' was not found. The following locations were searched:{}",
        searched_list(.searched_locations)
    )]
    ViewNotFound {
        name: String,
        searched_locations: Vec<String>,
    },

    /// A located page failed to render
    #[error("failed to render '{path}': {message}")]
    Render { path: String, message: String },
}

impl ViewError {
    /// Fails with [`ViewError::InvalidArgument`] when `value` is empty.
    pub(crate) fn ensure_not_empty(value: &str, argument: &'static str) -> Result<(), ViewError> {
        if value.is_empty() {
            return Err(ViewError::InvalidArgument { argument });
        }
        Ok(())
    }
}

fn searched_list(locations: &[String]) -> String {
    locations.iter().map(|location| format!("\n{}", location)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_locations() {
        let error = ViewError::ViewNotFound {
            name: "index".to_string(),
            searched_locations: vec![
                "/Views/home/index.cshtml".to_string(),
                "/Views/Shared/index.cshtml".to_string(),
            ],
        };

        assert_eq!(
            error.to_string(),
            "the view 'index' was not found. The following locations were searched:\n\
             /Views/home/index.cshtml\n\
             /Views/Shared/index.cshtml"
        );
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(ViewError::ensure_not_empty("index", "view_name").is_ok());
        assert_eq!(
            ViewError::ensure_not_empty("", "view_name"),
            Err(ViewError::InvalidArgument {
                argument: "view_name"
            })
        );
    }
}
