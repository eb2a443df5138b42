use serde::{Deserialize, Serialize};

/// Shown in place of a blank `full_name`.
pub const UNNAMED: &str = "Unnamed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            UNNAMED
        } else {
            &self.full_name
        }
    }
}
