use serde::{Deserialize, Serialize};

/// Body of `POST /search-news`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchNewsRequest {
    pub keyword: String,
}

/// One web citation the provider grounded its answer on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSource {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchNewsResponse {
    pub response: String,
    pub source: Vec<SearchSource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_serializes_empty_fields_instead_of_null() {
        let body = serde_json::to_value(SearchNewsResponse {
            response: String::new(),
            source: Vec::new(),
        })
        .unwrap();

        assert_eq!(body, json!({ "response": "", "source": [] }));
    }

    #[test]
    fn request_ignores_unknown_fields() {
        let request: SearchNewsRequest =
            serde_json::from_value(json!({ "keyword": "rust", "lang": "en" })).unwrap();
        assert_eq!(request.keyword, "rust");
    }

    #[test]
    fn request_rejects_non_string_keyword() {
        assert!(serde_json::from_value::<SearchNewsRequest>(json!({ "keyword": 42 })).is_err());
    }
}
