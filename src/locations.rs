//! API resource locations.
//!
//! The service does not publish fixed URLs per operation. Instead each
//! operation carries a stable location id, and the server advertises a
//! location table (id, area, resource, route template, version range) on
//! its options endpoint. The transport resolves ids against that table and
//! expands the route template with the operation's route values.

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::Error;
use crate::request::RouteValues;
use crate::version::{parse_api_pair, ApiVersion};

/// Relative path of the location discovery endpoint.
pub(crate) const OPTIONS_RELATIVE_PATH: &str = "_apis";

/// Relative path of the connection data endpoint used by connection checks.
pub(crate) const CONNECTION_DATA_RELATIVE_PATH: &str = "_apis/connectiondata";

const AREA_PARAMETER_NAME: &str = "area";
const RESOURCE_PARAMETER_NAME: &str = "resource";

/// One routable resource advertised by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceLocation {
    /// Stable location identifier.
    pub id: Uuid,
    /// Area the resource belongs to (e.g. "tfvc").
    pub area: String,
    /// Resource name within the area (e.g. "branches").
    pub resource_name: String,
    /// Route template with `{name}` and `{*name}` placeholders.
    pub route_template: String,
    /// Server-side resource revision.
    #[serde(default)]
    pub resource_version: u32,
    /// Oldest api-version the server still serves for this resource.
    pub min_version: String,
    /// Newest api-version the server serves for this resource.
    pub max_version: String,
    /// Newest non-preview api-version.
    #[serde(default)]
    pub released_version: String,
}

impl ApiResourceLocation {
    /// Negotiate the version to send for this location.
    ///
    /// A request below the server's minimum means the resource has been
    /// retired for that version and fails. A request above the maximum is
    /// negotiated down to the maximum, marked preview when the maximum has
    /// not been released. Otherwise the requested version is sent with the
    /// resource version capped to the server's, marked preview when the
    /// released version lags the request.
    pub fn negotiate(&self, requested: &ApiVersion) -> Result<ApiVersion, Error> {
        let min = parse_api_pair(&self.min_version).unwrap_or((0, 0));
        let max = parse_api_pair(&self.max_version).unwrap_or((u32::MAX, 0));
        let released = parse_api_pair(&self.released_version);
        let req = requested.api_pair();

        if min > req {
            return Err(Error::UnsupportedApiVersion {
                requested: requested.to_string(),
                supported: self.min_version.clone(),
            });
        }

        if max < req {
            let preview = released.map_or(false, |rel| rel < max);
            return Ok(ApiVersion::new(max.0, max.1).with(0, preview));
        }

        let resource_version = requested.resource_version().min(self.resource_version);
        let preview = match released {
            Some(rel) if rel < req => true,
            _ => requested.is_preview(),
        };
        Ok(requested.with(resource_version, preview))
    }

    /// Expand this location's route template with the given route values.
    ///
    /// Template segments are split on `/`. `{name}` and `{*name}` segments
    /// are replaced by the matching route value and dropped entirely when
    /// no non-empty value was supplied; literal segments pass through. The
    /// `area` and `resource` placeholders are filled from the location
    /// unless the caller supplied them.
    pub(crate) fn expand_route(&self, route_values: &RouteValues) -> String {
        let mut dictionary: BTreeMap<&str, &str> = route_values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        dictionary
            .entry(AREA_PARAMETER_NAME)
            .or_insert(self.area.as_str());
        dictionary
            .entry(RESOURCE_PARAMETER_NAME)
            .or_insert(self.resource_name.as_str());

        let mut segments: Vec<&str> = Vec::new();
        for segment in self.route_template.split('/') {
            let name = segment
                .strip_prefix("{*")
                .or_else(|| segment.strip_prefix('{'))
                .and_then(|rest| rest.strip_suffix('}'));

            match name {
                Some(name) => {
                    if let Some(value) = dictionary.get(name).copied() {
                        if !value.is_empty() {
                            segments.push(value);
                        }
                    }
                }
                None => {
                    if !segment.is_empty() {
                        segments.push(segment);
                    }
                }
            }
        }

        segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn branches_location() -> ApiResourceLocation {
        ApiResourceLocation {
            id: Uuid::parse_str("bc1f417e-239d-42e7-85e1-76e80cb2d6eb").expect("valid uuid"),
            area: "tfvc".to_string(),
            resource_name: "branches".to_string(),
            route_template: "{project}/_apis/{area}/{resource}/{*path}".to_string(),
            resource_version: 1,
            min_version: "1.0".to_string(),
            max_version: "2.2".to_string(),
            released_version: "2.0".to_string(),
        }
    }

    #[test]
    fn test_expand_route_with_all_values() {
        let mut route_values = RouteValues::new();
        route_values.insert("project", "Fabrikam");
        route_values.insert("path", "$/Fabrikam/Main");

        assert_eq!(
            branches_location().expand_route(&route_values),
            "Fabrikam/_apis/tfvc/branches/$/Fabrikam/Main"
        );
    }

    #[test]
    fn test_expand_route_drops_missing_segments() {
        let route_values = RouteValues::new();

        assert_eq!(
            branches_location().expand_route(&route_values),
            "_apis/tfvc/branches"
        );
    }

    #[test]
    fn test_expand_route_caller_overrides_area() {
        let mut route_values = RouteValues::new();
        route_values.insert("area", "other");

        assert_eq!(
            branches_location().expand_route(&route_values),
            "_apis/other/branches"
        );
    }

    #[test]
    fn test_negotiate_in_range() {
        let negotiated = branches_location()
            .negotiate(&ApiVersion::new(2, 0))
            .expect("should negotiate");

        assert_eq!(negotiated.to_string(), "2.0");
    }

    #[test]
    fn test_negotiate_down_to_server_maximum() {
        let negotiated = branches_location()
            .negotiate(&ApiVersion::new(3, 0))
            .expect("should negotiate");

        // The server's maximum (2.2) is past its released version (2.0),
        // so the negotiated tag is a preview.
        assert_eq!(negotiated.api_pair(), (2, 2));
        assert!(negotiated.is_preview());
    }

    #[test]
    fn test_negotiate_preview_when_released_lags() {
        let negotiated = branches_location()
            .negotiate(&ApiVersion::new(2, 1))
            .expect("should negotiate");

        assert!(negotiated.is_preview());
    }

    #[test]
    fn test_negotiate_rejects_retired_version() {
        let mut location = branches_location();
        location.min_version = "2.0".to_string();

        let result = location.negotiate(&ApiVersion::new(1, 0));
        assert!(matches!(result, Err(Error::UnsupportedApiVersion { .. })));
    }

    #[test]
    fn test_negotiate_caps_resource_version() {
        let negotiated = branches_location()
            .negotiate(&ApiVersion::preview(2, 0, 3))
            .expect("should negotiate");

        assert_eq!(negotiated.resource_version(), 1);
    }

    #[test]
    fn test_location_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "0bc8f0a4-6bfb-42a9-ba84-139da7b99c49",
            "area": "tfvc",
            "resourceName": "changesets",
            "routeTemplate": "{project}/_apis/{area}/{resource}/{id}",
            "resourceVersion": 2,
            "minVersion": "1.0",
            "maxVersion": "2.2",
            "releasedVersion": "2.0"
        }"#;

        let location: ApiResourceLocation = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(location.area, "tfvc");
        assert_eq!(location.resource_name, "changesets");
        assert_eq!(location.resource_version, 2);
    }

    proptest! {
        #[test]
        fn prop_expand_route_keeps_literal_segments(
            project in "[A-Za-z][A-Za-z0-9]{0,12}",
        ) {
            let mut route_values = RouteValues::new();
            route_values.insert("project", &project);

            let expanded = branches_location().expand_route(&route_values);
            let prefix = format!("{}/_apis/tfvc/branches", project);
            prop_assert!(expanded.starts_with(&prefix));
        }

        #[test]
        fn prop_expand_route_never_produces_adjacent_separators(
            path in prop::option::of("[A-Za-z0-9 $.][A-Za-z0-9 $/.]{0,29}"),
        ) {
            let mut route_values = RouteValues::new();
            if let Some(path) = &path {
                route_values.insert("path", path);
            }

            let expanded = branches_location().expand_route(&route_values);
            prop_assert!(!expanded.contains("//") || path.as_deref().map_or(false, |p| p.contains("//")));
        }
    }
}
