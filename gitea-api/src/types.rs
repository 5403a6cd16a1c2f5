//! Wire objects of the Gitea REST v1 API (subset used for repositories and
//! organizations).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gitea's default page size for list endpoints is configurable per
/// instance; 50 is the stock maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Metadata of an HTTP response, returned next to the decoded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Value of the `X-Total-Count` header on list endpoints.
    pub total_count: Option<u64>,
}

/// Paging parameters (`?page=&limit=`), pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListOptions {
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("limit", self.page_size.to_string()),
        ]
    }
}

/// A Gitea user (also used as repository owner).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

/// A repository as returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub clone_url: String,
    #[serde(default)]
    pub ssh_url: String,
    #[serde(default)]
    pub default_branch: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An organization as returned by `GET /orgs/{org}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: i64,
    /// Gitea names the organization's login `username`.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub visibility: String,
}

/// Body of `POST /user/repos` and `POST /orgs/{org}/repos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub auto_init: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub readme: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_branch: String,
}

/// Body of `PATCH /repos/{owner}/{repo}`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRepoOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_decodes_partial_payload() {
        let repo: Repository = serde_json::from_str(
            r#"{
                "id": 7,
                "owner": {"id": 1, "login": "fluxcd"},
                "name": "flux2",
                "full_name": "fluxcd/flux2",
                "private": true,
                "default_branch": "main",
                "created_at": "2023-05-01T10:00:00Z",
                "unknown_field": 1
            }"#,
        )
        .unwrap();
        assert_eq!(repo.name, "flux2");
        assert_eq!(repo.owner.unwrap().login, "fluxcd");
        assert!(repo.private);
        assert_eq!(repo.description, "");
        assert!(repo.created_at.is_some());
    }

    #[test]
    fn create_option_skips_empty_strings() {
        let opt = CreateRepoOption {
            name: "flux2".into(),
            private: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&opt).unwrap();
        assert_eq!(json["name"], "flux2");
        assert!(json.get("license").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["auto_init"], false);
    }

    #[test]
    fn edit_option_only_sends_set_fields() {
        let opt = EditRepoOption {
            description: Some(String::new()),
            ..Default::default()
        };
        let json = serde_json::to_string(&opt).unwrap();
        assert_eq!(json, r#"{"description":""}"#);
    }

    #[test]
    fn list_options_render_query() {
        let q = ListOptions {
            page: 3,
            page_size: 10,
        }
        .query();
        assert_eq!(q[0], ("page", "3".to_string()));
        assert_eq!(q[1], ("limit", "10".to_string()));
    }
}
