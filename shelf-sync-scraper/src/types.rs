use serde::{Deserialize, Serialize};

/// Request body for Backloggery's `fetch_library` endpoint.
#[derive(Debug, Serialize)]
pub struct LibraryRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub username: &'a str,
}

impl<'a> LibraryRequest<'a> {
    pub fn load_user_library(username: &'a str) -> Self {
        Self {
            kind: "load_user_library",
            username,
        }
    }
}

/// Response from `fetch_library`.
#[derive(Debug, Deserialize)]
pub struct LibraryResponse {
    #[serde(default)]
    pub payload: Vec<LibraryEntry>,
}

/// One library row. Backloggery sends many more fields; only these matter.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryEntry {
    pub title: String,
    pub platform_title: String,
}
