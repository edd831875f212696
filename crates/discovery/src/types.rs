//! Discovery document type definitions
//!
//! Based on JSON Schema Draft 3 with Google-specific extensions. Maps are
//! insertion-ordered and absent members are skipped, so a document built in
//! code serializes with the same keys, in the same order, as it was written.

use indexmap::IndexMap;
use mock_api_server_common::Result;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Discovery Document root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDoc {
    /// Marks a document served by a test double
    #[serde(default, skip_serializing_if = "is_false")]
    pub mock: bool,

    /// Document kind (e.g., "discovery#restDescription")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Discovery version (e.g., "v1")
    #[serde(rename = "discoveryVersion")]
    pub discovery_version: String,

    /// API identifier (e.g., "test:v1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// API name (e.g., "storage", "test")
    pub name: String,

    /// API version (e.g., "v1")
    pub version: String,

    /// API title
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Protocol (always "rest" for REST descriptions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Legacy base URL (rootUrl + servicePath)
    #[serde(rename = "baseUrl")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(rename = "basePath")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Root URL (e.g., "<https://www.example.com/>")
    #[serde(rename = "rootUrl")]
    pub root_url: String,

    /// Service path (e.g., "test/v1/")
    #[serde(rename = "servicePath")]
    pub service_path: String,

    /// Path of the batch endpoint, relative to rootUrl
    #[serde(rename = "batchPath")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_path: Option<String>,

    /// Parameters common to every method
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,

    /// Schemas (data types)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,

    /// Resources (collections of methods)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub resources: IndexMap<String, Resource>,

    /// Methods (at root level, rare)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, Method>,
}

/// Parameter definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter type (string, integer, boolean, etc.)
    #[serde(rename = "type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value, always carried as a string ("true", "json", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(rename = "enum")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// One description per entry of `enum_values`
    #[serde(rename = "enumDescriptions")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_descriptions: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Location (query, path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Parameter {
    /// A parameter of the given type carried in the query string
    pub fn query(param_type: &str, description: &str) -> Self {
        Self {
            param_type: Some(param_type.to_string()),
            description: Some(description.to_string()),
            location: Some("query".to_string()),
            ..Self::default()
        }
    }

    /// A required parameter substituted into the method path
    pub fn path(param_type: &str, description: &str) -> Self {
        Self {
            param_type: Some(param_type.to_string()),
            description: Some(description.to_string()),
            required: true,
            location: Some("path".to_string()),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }
}

/// Schema (data type) definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Type (string, object, array, etc.)
    #[serde(rename = "type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
}

impl Schema {
    /// A scalar property schema (e.g., "boolean", "string")
    pub fn scalar(schema_type: &str, description: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            description: Some(description.to_string()),
            ..Self::default()
        }
    }
}

/// Resource (collection of methods)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, Method>,

    /// Nested resources
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub resources: IndexMap<String, Resource>,
}

/// Method (API operation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Method ID (e.g., "test.test.get")
    pub id: String,

    /// HTTP path, relative to the service path
    pub path: String,

    /// HTTP method (GET, POST, PUT, DELETE, PATCH)
    #[serde(rename = "httpMethod")]
    pub http_method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,

    /// Order of required parameters in generated client signatures
    #[serde(rename = "parameterOrder")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_order: Vec<String>,

    /// Request body schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<SchemaRef>,

    /// Response schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<SchemaRef>,

    #[serde(rename = "supportsMediaUpload")]
    #[serde(default, skip_serializing_if = "is_false")]
    pub supports_media_upload: bool,

    #[serde(rename = "mediaUpload")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_upload: Option<MediaUpload>,

    #[serde(rename = "supportsSubscription")]
    #[serde(default, skip_serializing_if = "is_false")]
    pub supports_subscription: bool,
}

/// Reference to a named schema, used for method request and response bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub ref_schema: String,
}

impl SchemaRef {
    pub fn new(name: &str) -> Self {
        Self {
            ref_schema: name.to_string(),
        }
    }
}

/// Media upload descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaUpload {
    /// Accepted MIME ranges (e.g., "*/*")
    #[serde(default)]
    pub accept: Vec<String>,

    #[serde(default)]
    pub protocols: UploadProtocols,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadProtocols {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple: Option<UploadProtocol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProtocol {
    pub multipart: bool,
    pub path: String,
}

impl DiscoveryDoc {
    /// Get a schema by reference
    /// e.g., "Test" -> returns Test schema
    pub fn resolve_schema_ref(&self, ref_name: &str) -> Option<&Schema> {
        self.schemas.get(ref_name)
    }

    /// Find a method by its ID, searching root methods and nested resources
    pub fn find_method(&self, method_id: &str) -> Option<&Method> {
        fn search<'a>(
            methods: &'a IndexMap<String, Method>,
            resources: &'a IndexMap<String, Resource>,
            method_id: &str,
        ) -> Option<&'a Method> {
            methods
                .values()
                .find(|method| method.id == method_id)
                .or_else(|| {
                    resources.values().find_map(|resource| {
                        search(&resource.methods, &resource.resources, method_id)
                    })
                })
        }

        search(&self.methods, &self.resources, method_id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
