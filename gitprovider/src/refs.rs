//! Structured identifiers for organizations, users and their repositories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GitProviderResult, Validator};

/// Anything that names an owning identity on a specific domain.
pub trait IdentityRef {
    /// Domain of the Git server, e.g. "gitea.com" or "git.example.com:3000".
    fn domain(&self) -> &str;
    /// Login of the user or name of the top-level organization.
    fn identity(&self) -> &str;
    /// Checks that every required field is set.
    fn validate_fields(&self) -> GitProviderResult<()>;
}

/// A reference to a repository owned by some identity.
pub trait RepositoryRef: IdentityRef + fmt::Display + Clone + Send + Sync {
    fn repository(&self) -> &str;
    /// Name of the owning organization, `None` for user repositories.
    fn organization(&self) -> Option<&str>;
}

/// Points to an organization, optionally nested (for providers that have
/// sub-groups).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OrganizationRef {
    pub domain: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_organizations: Vec<String>,
}

impl OrganizationRef {
    pub fn new(domain: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            organization: organization.into(),
            sub_organizations: Vec::new(),
        }
    }
}

impl IdentityRef for OrganizationRef {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn identity(&self) -> &str {
        &self.organization
    }

    fn validate_fields(&self) -> GitProviderResult<()> {
        let mut v = Validator::new("OrganizationRef");
        v.required("domain", &self.domain)
            .required("organization", &self.organization);
        for sub in &self.sub_organizations {
            v.required("sub_organizations", sub);
        }
        v.finish()
    }
}

impl fmt::Display for OrganizationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.organization)?;
        for sub in &self.sub_organizations {
            write!(f, "/{sub}")?;
        }
        Ok(())
    }
}

/// Points to a user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserRef {
    pub domain: String,
    pub user_login: String,
}

impl UserRef {
    pub fn new(domain: impl Into<String>, user_login: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            user_login: user_login.into(),
        }
    }
}

impl IdentityRef for UserRef {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn identity(&self) -> &str {
        &self.user_login
    }

    fn validate_fields(&self) -> GitProviderResult<()> {
        let mut v = Validator::new("UserRef");
        v.required("domain", &self.domain)
            .required("user_login", &self.user_login);
        v.finish()
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.user_login)
    }
}

/// Points to a repository owned by an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OrgRepositoryRef {
    #[serde(flatten)]
    pub organization: OrganizationRef,
    pub repository_name: String,
}

impl OrgRepositoryRef {
    pub fn new(organization: OrganizationRef, repository_name: impl Into<String>) -> Self {
        Self {
            organization,
            repository_name: repository_name.into(),
        }
    }
}

impl IdentityRef for OrgRepositoryRef {
    fn domain(&self) -> &str {
        self.organization.domain()
    }

    fn identity(&self) -> &str {
        self.organization.identity()
    }

    fn validate_fields(&self) -> GitProviderResult<()> {
        self.organization.validate_fields()?;
        let mut v = Validator::new("OrgRepositoryRef");
        v.required("repository_name", &self.repository_name);
        v.finish()
    }
}

impl RepositoryRef for OrgRepositoryRef {
    fn repository(&self) -> &str {
        &self.repository_name
    }

    fn organization(&self) -> Option<&str> {
        Some(&self.organization.organization)
    }
}

impl fmt::Display for OrgRepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository_name)
    }
}

/// Points to a repository owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserRepositoryRef {
    #[serde(flatten)]
    pub user: UserRef,
    pub repository_name: String,
}

impl UserRepositoryRef {
    pub fn new(user: UserRef, repository_name: impl Into<String>) -> Self {
        Self {
            user,
            repository_name: repository_name.into(),
        }
    }
}

impl IdentityRef for UserRepositoryRef {
    fn domain(&self) -> &str {
        self.user.domain()
    }

    fn identity(&self) -> &str {
        self.user.identity()
    }

    fn validate_fields(&self) -> GitProviderResult<()> {
        self.user.validate_fields()?;
        let mut v = Validator::new("UserRepositoryRef");
        v.required("repository_name", &self.repository_name);
        v.finish()
    }
}

impl RepositoryRef for UserRepositoryRef {
    fn repository(&self) -> &str {
        &self.repository_name
    }

    fn organization(&self) -> Option<&str> {
        None
    }
}

impl fmt::Display for UserRepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.repository_name)
    }
}
