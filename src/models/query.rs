use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GraphQL request body sent by dashboard clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    #[serde(
        rename = "operationName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl QueryEnvelope {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// Standard GraphQL response shape as seen by dashboard clients
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_keeps_wire_names() {
        let raw = json!({
            "query": "{ bundles { id } }",
            "variables": {"first": 5},
            "operationName": "Bundles"
        });
        let envelope: QueryEnvelope = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(envelope.operation_name.as_deref(), Some("Bundles"));
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let envelope = QueryEnvelope::new("{ factories { id } }");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"query": "{ factories { id } }"})
        );
    }

    #[test]
    fn test_response_with_errors_only() {
        let resp: GraphQlResponse<Value> =
            serde_json::from_value(json!({"errors": [{"message": "bad field"}]})).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors[0].message, "bad field");
    }
}
