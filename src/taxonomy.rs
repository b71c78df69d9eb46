//! Open Tree taxonomy scenarios
//!
//! The built-in check asks `/v2/taxonomy/taxon` for taxon 515698 with its
//! children embedded and requires the known child 503056 to be among them.

use serde::{Serialize, Serializer};

use crate::http::Method;
use crate::testing::{Assertion, RequestConfig, ResponseExpectation, TestScenario};

/// Path of the taxon report endpoint
pub const TAXON_PATH: &str = "/v2/taxonomy/taxon";

/// Taxon requested by the built-in scenario
pub const REQUESTED_OTT_ID: u64 = 515698;

/// A child the service is known to report for [`REQUESTED_OTT_ID`]
pub const EXPECTED_CHILD_OTT_ID: u64 = 503056;

/// Response field carrying a taxon's OTT id
pub const OTT_ID_FIELD: &str = "ot:ottId";

/// Response field holding embedded child taxa
pub const CHILDREN_FIELD: &str = "children";

/// Payload for the taxon report endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TaxonRequest {
    pub ott_id: u64,
    /// The service reads this flag as a string
    #[serde(serialize_with = "bool_as_string")]
    pub include_children: bool,
}

fn bool_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

impl TaxonRequest {
    pub fn with_children(ott_id: u64) -> Self {
        Self {
            ott_id,
            include_children: true,
        }
    }
}

/// Taxon 515698 is returned with child 503056 embedded
pub fn taxon_include_children() -> TestScenario {
    let payload = TaxonRequest::with_children(REQUESTED_OTT_ID);

    TestScenario {
        name: "taxon_include_children".to_string(),
        description: Some(format!(
            "{} returns ott {} with child {} when include_children is set",
            TAXON_PATH, REQUESTED_OTT_ID, EXPECTED_CHILD_OTT_ID
        )),
        request: RequestConfig {
            method: Method::Post,
            path: TAXON_PATH.to_string(),
            body: Some(serde_json::json!(payload)),
        },
        expect: ResponseExpectation { status: 200 },
        asserts: vec![
            Assertion::FieldPresent {
                field: OTT_ID_FIELD.to_string(),
            },
            Assertion::FieldEquals {
                field: OTT_ID_FIELD.to_string(),
                value: REQUESTED_OTT_ID.into(),
            },
            Assertion::NonEmpty {
                field: CHILDREN_FIELD.to_string(),
            },
            Assertion::ContainsEntry {
                field: CHILDREN_FIELD.to_string(),
                key: OTT_ID_FIELD.to_string(),
                value: EXPECTED_CHILD_OTT_ID.into(),
            },
        ],
    }
}

/// Scenarios run when no scenario files are given
pub fn builtin_scenarios() -> Vec<TestScenario> {
    vec![taxon_include_children()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_flag_as_string() {
        let body = serde_json::to_value(TaxonRequest::with_children(515698)).unwrap();
        assert_eq!(body, json!({"ott_id": 515698, "include_children": "true"}));

        let body = serde_json::to_value(TaxonRequest {
            ott_id: 1,
            include_children: false,
        })
        .unwrap();
        assert_eq!(body["include_children"], "false");
    }

    #[test]
    fn test_builtin_scenario_shape() {
        let scenario = taxon_include_children();
        assert_eq!(scenario.request.path, TAXON_PATH);
        assert_eq!(scenario.request.method, Method::Post);
        assert_eq!(scenario.expect.status, 200);
        assert_eq!(
            scenario.asserts.last(),
            Some(&Assertion::ContainsEntry {
                field: "children".into(),
                key: "ot:ottId".into(),
                value: json!(503056),
            })
        );
        assert_eq!(builtin_scenarios().len(), 1);
    }

    #[test]
    fn test_sample_scenario_file_matches_builtin() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("scenarios")
            .join("taxon_include_children.yaml");
        let from_file = crate::testing::load_scenario(&path).unwrap();
        let builtin = taxon_include_children();

        assert_eq!(from_file.name, builtin.name);
        assert_eq!(from_file.description, builtin.description);
        assert_eq!(from_file.request.method, builtin.request.method);
        assert_eq!(from_file.request.path, builtin.request.path);
        assert_eq!(from_file.request.body, builtin.request.body);
        assert_eq!(from_file.expect.status, builtin.expect.status);
        assert_eq!(from_file.asserts, builtin.asserts);
    }
}
