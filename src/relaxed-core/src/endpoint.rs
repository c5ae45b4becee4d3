use serde::{Deserialize, Serialize};

use crate::schema::KeySchema;

/// Marks both ends of a placeholder in a path template: `/_node/:node_name:/_stats`
pub const PLACEHOLDER_DELIMITER: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// POST and PUT carry parameters in the body, everything else in the query string
    pub fn has_body(self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub path_template: &'static str,
    pub method: Method,
    pub key_schema: Option<KeySchema>,
}

impl Endpoint {
    pub const fn get(name: &'static str, path_template: &'static str) -> Self {
        Self {
            name,
            path_template,
            method: Method::Get,
            key_schema: None,
        }
    }

    pub const fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub const fn with_keys(mut self, key_schema: KeySchema) -> Self {
        self.key_schema = Some(key_schema);
        self
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholders(self.path_template)
    }
}

/// Placeholders are whole path segments of the form `:name:`.
pub fn placeholders(template: &str) -> Vec<&str> {
    template
        .split('/')
        .filter_map(|segment| {
            segment
                .strip_prefix(PLACEHOLDER_DELIMITER)?
                .strip_suffix(PLACEHOLDER_DELIMITER)
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(
            placeholders("/_node/:node_name:/_config/:key:"),
            vec!["node_name", "key"]
        );
        assert!(placeholders("/_all_dbs").is_empty());
        assert!(placeholders("/").is_empty());
    }

    #[test]
    fn test_literal_colons_are_not_placeholders() {
        assert!(placeholders("/_config/a:b").is_empty());
        assert!(placeholders("/::/x").is_empty());
    }

    #[test]
    fn test_builder_sets_method() {
        let endpoint = Endpoint::get("restart_node", "/_node/:node_name:/_restart").with_method(Method::Post);
        assert_eq!(endpoint.method, Method::Post);
        assert!(endpoint.key_schema.is_none());
        assert!(endpoint.method.has_body());
        assert!(!Method::Delete.has_body());
    }
}
