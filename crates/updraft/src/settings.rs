//! Metadata attached to the create request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Optional metadata for the remote video record.
///
/// Immutable once constructed; title and description are whitespace-trimmed
/// on the way in, and empty fields are omitted from the request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSettings {
    pub title: Option<String>,
    pub description: Option<String>,
    /// View privacy value understood by the remote service.
    pub privacy: Option<String>,
    /// URIs of users allowed to view the video, for user-restricted privacy.
    pub users: Option<Vec<String>>,
    pub password: Option<String>,
}

impl VideoSettings {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        privacy: Option<String>,
        users: Option<Vec<String>>,
        password: Option<String>,
    ) -> Self {
        Self {
            title: trim(title),
            description: trim(description),
            privacy,
            users,
            password,
        }
    }

    pub fn with_privacy(privacy: impl Into<String>) -> Self {
        Self {
            privacy: Some(privacy.into()),
            ..Self::default()
        }
    }

    /// Request parameters in the shape the remote create endpoint expects.
    pub fn parameters(&self) -> Map<String, Value> {
        let mut parameters = Map::new();

        if let Some(title) = &self.title
            && !title.is_empty()
        {
            parameters.insert("name".to_string(), json!(title));
        }

        if let Some(description) = &self.description
            && !description.is_empty()
        {
            parameters.insert("description".to_string(), json!(description));
        }

        if let Some(privacy) = &self.privacy
            && !privacy.is_empty()
        {
            parameters.insert("privacy".to_string(), json!({ "view": privacy }));
        }

        if let Some(users) = &self.users {
            let uris: Vec<Value> = users.iter().map(|uri| json!({ "uri": uri })).collect();
            parameters.insert("users".to_string(), Value::Array(uris));
        }

        if let Some(password) = &self.password {
            parameters.insert("password".to_string(), json!(password));
        }

        parameters
    }
}

fn trim(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_description_are_trimmed() {
        let settings = VideoSettings::new(
            Some("  My Video  ".to_string()),
            Some(" about things ".to_string()),
            None,
            None,
            None,
        );
        assert_eq!(settings.title.as_deref(), Some("My Video"));
        assert_eq!(settings.description.as_deref(), Some("about things"));
    }

    #[test]
    fn test_parameters_skip_empty_fields() {
        let settings = VideoSettings::new(Some("   ".to_string()), None, None, None, None);
        assert!(settings.parameters().is_empty());
    }

    #[test]
    fn test_parameters_shape() {
        let settings = VideoSettings::new(
            Some("Trip".to_string()),
            None,
            Some("unlisted".to_string()),
            Some(vec!["/users/1".to_string()]),
            Some("hunter2".to_string()),
        );
        let parameters = settings.parameters();

        assert_eq!(parameters["name"], json!("Trip"));
        assert_eq!(parameters["privacy"], json!({ "view": "unlisted" }));
        assert_eq!(parameters["users"], json!([{ "uri": "/users/1" }]));
        assert_eq!(parameters["password"], json!("hunter2"));
        assert!(!parameters.contains_key("description"));
    }
}
