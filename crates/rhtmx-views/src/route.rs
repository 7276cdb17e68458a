// File: src/route.rs
// Purpose: Route values and the action context handed to the view engine

use indexmap::IndexMap;

/// Route value naming the controller that handled the request
pub const CONTROLLER_KEY: &str = "controller";

/// Route value naming the area the controller lives in
pub const AREA_KEY: &str = "area";

/// Ordered route values produced by the router for one request
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    values: IndexMap<String, String>,
}

impl RouteValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_views::RouteValues;
    ///
    /// let values = RouteValues::new()
    ///     .with("area", "admin")
    ///     .with("controller", "users");
    /// assert_eq!(values.area(), Some("admin"));
    /// assert_eq!(values.controller(), Some("users"));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn controller(&self) -> Option<&str> {
        self.get(CONTROLLER_KEY)
    }

    /// The area, if present and non-empty
    pub fn area(&self) -> Option<&str> {
        self.get(AREA_KEY).filter(|area| !area.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = RouteValues::new();
        for (key, value) in iter {
            values.insert(key, value);
        }
        values
    }
}

/// What the view engine knows about the current request
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    route_values: RouteValues,
}

impl ActionContext {
    pub fn new(route_values: RouteValues) -> Self {
        Self { route_values }
    }

    pub fn route_values(&self) -> &RouteValues {
        &self.route_values
    }
}

impl From<RouteValues> for ActionContext {
    fn from(route_values: RouteValues) -> Self {
        Self::new(route_values)
    }
}
