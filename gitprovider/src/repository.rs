//! Provider-neutral description of repository and organization state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GitProviderResult, Validator};

/// Default branch assumed when the caller does not set one.
pub const DEFAULT_BRANCH: &str = "main";

/// Who can see a repository.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryVisibility {
    Public,
    #[default]
    Private,
    /// Visible to every member of the instance (not supported by every provider).
    Internal,
}

impl fmt::Display for RepositoryVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Desired or actual repository state.
///
/// Callers build this as the desired state; providers produce it from their
/// API objects as the actual state. `None` means "not specified".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RepositoryInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<RepositoryVisibility>,
}

impl RepositoryInfo {
    /// Fills unset fields with their defaults.
    pub fn default_fields(&mut self) {
        if self.default_branch.is_none() {
            self.default_branch = Some(DEFAULT_BRANCH.to_string());
        }
        if self.visibility.is_none() {
            self.visibility = Some(RepositoryVisibility::default());
        }
    }

    /// Validates set fields without defaulting.
    pub fn validate_info(&self) -> GitProviderResult<()> {
        let mut v = Validator::new("RepositoryInfo");
        if let Some(branch) = &self.default_branch {
            v.required("default_branch", branch);
        }
        v.finish()
    }

    /// Defaults then validates, leaving a fully-populated object.
    pub fn validate_and_default(&mut self) -> GitProviderResult<()> {
        self.default_fields();
        self.validate_info()
    }

    /// Semantic equality used by reconciliation, with `self` as the desired
    /// state and `other` as the actual one.
    ///
    /// Both sides are compared in their defaulted form. A description left
    /// unset on `self` matches any actual description, the same way
    /// [`RepositoryInfo`] fields left unset are not written on update.
    pub fn equals(&self, other: &RepositoryInfo) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        a.default_fields();
        b.default_fields();

        let description_matches = match a.description.as_deref() {
            Some(desired) => desired == b.description.as_deref().unwrap_or_default(),
            None => true,
        };
        description_matches
            && a.default_branch == b.default_branch
            && a.visibility == b.visibility
    }

    /// Visibility, falling back to the default when unset.
    pub fn visibility(&self) -> RepositoryVisibility {
        self.visibility.unwrap_or_default()
    }
}

/// Name of a license template as understood by the neutral layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LicenseTemplate(pub String);

impl LicenseTemplate {
    pub const APACHE_2_0: &'static str = "apache-2.0";
    pub const MIT: &'static str = "mit";
    pub const GPL_3_0: &'static str = "gpl-3.0";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Options applied only when a repository gets created.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryCreateOptions {
    /// Initialize the repository with a first commit (README/license).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_template: Option<LicenseTemplate>,
}

impl RepositoryCreateOptions {
    pub fn with_auto_init(mut self, auto_init: bool) -> Self {
        self.auto_init = Some(auto_init);
        self
    }

    pub fn with_license_template(mut self, template: impl Into<String>) -> Self {
        self.license_template = Some(LicenseTemplate::new(template));
        self
    }
}

/// Reconcile accepts the same options as create; they are used when the
/// repository has to be created.
pub type RepositoryReconcileOptions = RepositoryCreateOptions;

/// Organization metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrganizationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Permissions a token may be asked about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenPermission {
    RepositoryWrite,
}
