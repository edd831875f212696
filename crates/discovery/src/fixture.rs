//! The canned `test:v1` discovery document

use crate::types::{
    DiscoveryDoc, MediaUpload, Method, Parameter, Resource, Schema, SchemaRef, UploadProtocol,
    UploadProtocols,
};
use indexmap::IndexMap;

/// URL the fake server answers with the test document
pub const TEST_DOCUMENT_PATH: &str = "test-v1.json";

fn entries<V, const N: usize>(items: [(&str, V); N]) -> IndexMap<String, V> {
    items
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn common_parameters() -> IndexMap<String, Parameter> {
    let alt = Parameter {
        enum_values: vec!["json".to_string()],
        enum_descriptions: vec!["Responses with Content-Type of application/json".to_string()],
        ..Parameter::query("string", "Data format for the response.").with_default("json")
    };

    entries([
        ("alt", alt),
        (
            "fields",
            Parameter::query(
                "string",
                "Selector specifying which fields to include in a partial response.",
            ),
        ),
        (
            "key",
            Parameter::query(
                "string",
                "API key. Your API key identifies your project and provides you with API access, quota, and reports. Required unless you provide an OAuth 2.0 token.",
            ),
        ),
        (
            "oauth_token",
            Parameter::query("string", "OAuth 2.0 token for the current user."),
        ),
        (
            "prettyPrint",
            Parameter::query(
                "boolean",
                "Returns response with indentations and line breaks.",
            )
            .with_default("true"),
        ),
        (
            "quotaUser",
            Parameter::query(
                "string",
                "Available to use for quota purposes for server-side applications. Can be any arbitrary string assigned to a user, but should not exceed 40 characters. Overrides userIp if both are provided.",
            ),
        ),
        (
            "userIp",
            Parameter::query(
                "string",
                "IP address of the site where the request originates. Use this if you want to enforce per-user limits.",
            ),
        ),
    ])
}

fn test_schema() -> Schema {
    Schema {
        id: Some("Test".to_string()),
        schema_type: Some("object".to_string()),
        description: Some("Test object.".to_string()),
        properties: entries([
            ("testBoolean", Schema::scalar("boolean", "Test boolean.")),
            ("testString", Schema::scalar("string", "Test string.")),
        ]),
        ..Schema::default()
    }
}

// Query parameters shared by every method of the `test` resource
fn method_parameters() -> IndexMap<String, Parameter> {
    entries([
        (
            "testParameter1",
            Parameter::query("boolean", "Test parameter 1").with_default("false"),
        ),
        (
            "testParameter12",
            Parameter::query("string", "Test parameter 2"),
        ),
    ])
}

fn post_method() -> Method {
    Method {
        id: "test.test.post".to_string(),
        path: "test".to_string(),
        http_method: "POST".to_string(),
        description: Some("Creates a new test object.".to_string()),
        parameters: method_parameters(),
        request: Some(SchemaRef::new("Test")),
        response: Some(SchemaRef::new("Test")),
        supports_media_upload: true,
        media_upload: Some(MediaUpload {
            accept: vec!["*/*".to_string()],
            protocols: UploadProtocols {
                simple: Some(UploadProtocol {
                    multipart: true,
                    path: "/upload/test/v1/test".to_string(),
                }),
            },
        }),
        supports_subscription: true,
        ..Method::default()
    }
}

fn get_method() -> Method {
    let mut parameters = method_parameters();
    parameters.insert(
        "testId".to_string(),
        Parameter::path("string", "The ID of the file."),
    );

    Method {
        id: "test.test.get".to_string(),
        path: "test/{testId}".to_string(),
        http_method: "GET".to_string(),
        description: Some("Gets a test object.".to_string()),
        parameters,
        parameter_order: vec!["testId".to_string()],
        response: Some(SchemaRef::new("Test")),
        ..Method::default()
    }
}

fn list_method() -> Method {
    Method {
        id: "test.test.list".to_string(),
        path: "test".to_string(),
        http_method: "GET".to_string(),
        description: Some("Lists test objects.".to_string()),
        parameters: method_parameters(),
        // TestList is referenced but never defined in `schemas`
        response: Some(SchemaRef::new("TestList")),
        ..Method::default()
    }
}

/// Build the discovery document for the synthetic `test:v1` API
pub fn test_api_document() -> DiscoveryDoc {
    let test_resource = Resource {
        methods: entries([
            ("post", post_method()),
            ("get", get_method()),
            ("list", list_method()),
        ]),
        resources: IndexMap::new(),
    };

    DiscoveryDoc {
        mock: true,
        kind: Some("discovery#restDescription".to_string()),
        discovery_version: "v1".to_string(),
        id: Some("test:v1".to_string()),
        name: "test".to_string(),
        version: "v1".to_string(),
        title: "Test API".to_string(),
        description: Some("API to test discovery-api-elements".to_string()),
        protocol: Some("rest".to_string()),
        base_url: Some("https://www.example.com/test/v1/".to_string()),
        base_path: Some("/test/v1/".to_string()),
        root_url: "https://www.example.com/".to_string(),
        service_path: "test/v1/".to_string(),
        batch_path: Some("batch".to_string()),
        parameters: common_parameters(),
        schemas: entries([("Test", test_schema())]),
        resources: entries([("test", test_resource)]),
        methods: IndexMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_key_order() {
        let value = serde_json::to_value(test_api_document()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        // serde_json::Value may sort keys; order is checked on the text below
        let mut expected = vec![
            "mock",
            "kind",
            "discoveryVersion",
            "id",
            "name",
            "version",
            "title",
            "description",
            "protocol",
            "baseUrl",
            "basePath",
            "rootUrl",
            "servicePath",
            "batchPath",
            "parameters",
            "schemas",
            "resources",
        ];
        let mut sorted_keys = keys.clone();
        sorted_keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(sorted_keys, expected);

        let json = test_api_document().to_json().unwrap();
        assert!(json.starts_with(
            r##"{"mock":true,"kind":"discovery#restDescription","discoveryVersion":"v1","id":"test:v1""##
        ));
        assert!(json.find("\"batchPath\"").unwrap() < json.find("\"parameters\"").unwrap());
        assert!(json.find("\"schemas\"").unwrap() < json.find("\"resources\"").unwrap());
    }

    #[test]
    fn test_get_method_path_parameter() {
        let doc = test_api_document();
        let get = doc.find_method("test.test.get").unwrap();
        assert_eq!(get.parameter_order, vec!["testId".to_string()]);

        let test_id = &get.parameters["testId"];
        assert!(test_id.required);
        assert_eq!(test_id.location.as_deref(), Some("path"));
    }

    #[test]
    fn test_list_references_undefined_schema() {
        let doc = test_api_document();
        let list = doc.find_method("test.test.list").unwrap();
        let reference = &list.response.as_ref().unwrap().ref_schema;
        assert_eq!(reference, "TestList");
        assert!(doc.resolve_schema_ref(reference).is_none());
        assert!(doc.resolve_schema_ref("Test").is_some());
    }
}
