//! Declarative request descriptions.
//!
//! Every operation method produces exactly one [`RequestSpec`]: the HTTP
//! verb, the fixed location id identifying the server-side endpoint
//! template, the API version tag for the operation family, route values,
//! query parameters, an optional JSON body, and the desired response
//! content type. Building a spec performs no I/O, which keeps each
//! operation's request construction directly testable.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Error;
use crate::version::ApiVersion;

/// Desired response content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Accept {
    Json,
    OctetStream,
    Text,
    Zip,
}

impl Accept {
    /// The base media type, before api-version and charset parameters.
    pub(crate) fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text => "text/plain",
            Self::Zip => "application/zip",
        }
    }
}

/// Named path-substitution values for a route template.
#[derive(Debug, Clone, Default)]
pub(crate) struct RouteValues(BTreeMap<String, String>);

impl RouteValues {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set a route value.
    pub(crate) fn insert(&mut self, name: &str, value: impl Display) {
        self.0.insert(name.to_string(), value.to_string());
    }

    /// Set a route value when present; omitted values leave their template
    /// segments to collapse.
    pub(crate) fn insert_opt(&mut self, name: &str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub(crate) fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

/// Query-string parameters with the service's omission rules.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a parameter unless the value is absent.
    pub(crate) fn add(&mut self, name: &str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.0.push((name.to_string(), value.to_string()));
        }
    }

    /// Append a string parameter unless the value is absent or empty.
    pub(crate) fn add_string(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.0.push((name.to_string(), value.to_string()));
            }
            _ => {}
        }
    }

    /// Flatten a filter model into dotted query parameters.
    ///
    /// Scalar fields become `prefix.field=value` pairs; null and empty
    /// fields are omitted. Filter models on this API surface are flat, so
    /// non-scalar fields do not travel on the query string.
    pub(crate) fn add_model(&mut self, prefix: &str, model: &impl Serialize) -> Result<(), Error> {
        let value = serde_json::to_value(model)?;
        if let Value::Object(fields) = value {
            for (name, field) in fields {
                let rendered = match field {
                    Value::Null | Value::Array(_) | Value::Object(_) => continue,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                };
                if !rendered.is_empty() {
                    self.0.push((format!("{prefix}.{name}"), rendered));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Look up a parameter by name (first match).
    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The declarative description of one outbound API call.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) location_id: Uuid,
    pub(crate) api_version: ApiVersion,
    pub(crate) route_values: RouteValues,
    pub(crate) query: QueryParams,
    pub(crate) body: Option<Value>,
    pub(crate) accept: Accept,
}

impl RequestSpec {
    /// A GET spec with JSON response, the default for this API surface.
    pub(crate) fn get(location_id: Uuid, api_version: ApiVersion) -> Self {
        Self {
            method: Method::GET,
            location_id,
            api_version,
            route_values: RouteValues::new(),
            query: QueryParams::new(),
            body: None,
            accept: Accept::Json,
        }
    }

    /// A POST spec with a JSON body and JSON response.
    pub(crate) fn post(location_id: Uuid, api_version: ApiVersion, body: Value) -> Self {
        Self {
            method: Method::POST,
            location_id,
            api_version,
            route_values: RouteValues::new(),
            query: QueryParams::new(),
            body: Some(body),
            accept: Accept::Json,
        }
    }

    /// Same spec with a different response content type.
    pub(crate) fn accepting(mut self, accept: Accept) -> Self {
        self.accept = accept;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SampleCriteria {
        item_path: Option<String>,
        author: Option<String>,
        from_id: Option<i32>,
        include_links: Option<bool>,
    }

    #[test]
    fn test_add_skips_absent_values() {
        let mut query = QueryParams::new();
        query.add("includeParent", Some(true));
        query.add("includeChildren", None::<bool>);
        query.add("$top", Some(25));

        assert_eq!(
            query.pairs(),
            &[
                ("includeParent".to_string(), "true".to_string()),
                ("$top".to_string(), "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_add_string_skips_empty_values() {
        let mut query = QueryParams::new();
        query.add_string("path", Some("$/Fabrikam/Main"));
        query.add_string("scopePath", Some(""));
        query.add_string("fileName", None);

        assert_eq!(query.pairs().len(), 1);
        assert_eq!(query.get("path"), Some("$/Fabrikam/Main"));
    }

    #[test]
    fn test_add_model_flattens_with_dotted_prefix() {
        let criteria = SampleCriteria {
            item_path: Some("$/Fabrikam".to_string()),
            author: None,
            from_id: Some(100),
            include_links: Some(false),
        };

        let mut query = QueryParams::new();
        query
            .add_model("searchCriteria", &criteria)
            .expect("should flatten");

        assert_eq!(query.get("searchCriteria.itemPath"), Some("$/Fabrikam"));
        assert_eq!(query.get("searchCriteria.fromId"), Some("100"));
        assert_eq!(query.get("searchCriteria.includeLinks"), Some("false"));
        assert_eq!(query.get("searchCriteria.author"), None);
    }

    #[test]
    fn test_route_values_insert_opt() {
        let mut route_values = RouteValues::new();
        route_values.insert_opt("project", Some("Fabrikam"));
        route_values.insert_opt("id", None::<i32>);

        assert_eq!(route_values.get("project"), Some("Fabrikam"));
        assert_eq!(route_values.get("id"), None);
    }

    #[test]
    fn test_spec_constructors() {
        let location_id = Uuid::new_v4();
        let spec = RequestSpec::get(location_id, ApiVersion::new(2, 0));
        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.accept, Accept::Json);
        assert!(spec.body.is_none());

        let spec = RequestSpec::post(location_id, ApiVersion::new(2, 0), serde_json::json!({}))
            .accepting(Accept::Zip);
        assert_eq!(spec.method, Method::POST);
        assert_eq!(spec.accept, Accept::Zip);
        assert!(spec.body.is_some());
    }

    proptest! {
        #[test]
        fn prop_add_model_omits_nothing_but_null_and_empty(
            item_path in prop::option::of("[a-zA-Z0-9$/ ]{1,20}"),
            from_id in prop::option::of(0..10_000i32),
        ) {
            let criteria = SampleCriteria {
                item_path: item_path.clone(),
                author: None,
                from_id,
                include_links: None,
            };

            let mut query = QueryParams::new();
            query.add_model("searchCriteria", &criteria).expect("should flatten");

            prop_assert_eq!(
                query.get("searchCriteria.itemPath").map(str::to_string),
                item_path
            );
            prop_assert_eq!(
                query.get("searchCriteria.fromId").map(str::to_string),
                from_id.map(|id| id.to_string())
            );
        }
    }
}
