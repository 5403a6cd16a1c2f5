//! Traits every provider implementation exposes.
//!
//! The traits use associated types and `impl Future + Send` return types, so
//! each provider keeps its concrete handle types and callers stay generic.

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::errors::GitProviderResult;
use crate::refs::{OrgRepositoryRef, OrganizationRef, RepositoryRef, UserRef, UserRepositoryRef};
use crate::repository::{
    OrganizationInfo, RepositoryCreateOptions, RepositoryInfo, RepositoryReconcileOptions,
    TokenPermission,
};

/// Identifier of a provider implementation, e.g. "gitea".
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProviderId(&'static str);

impl ProviderId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Entry point of a provider: reports identity and hands out scoped clients.
pub trait Client: Send + Sync {
    type Organizations: OrganizationsClient;
    type OrgRepositories: OrgRepositoriesClient;
    type UserRepositories: UserRepositoriesClient;
    /// Underlying SDK client.
    type Raw;

    /// Domain this client talks to, fixed at construction.
    fn supported_domain(&self) -> &str;
    fn provider_id(&self) -> ProviderId;
    /// Escape hatch to the SDK client used under the hood.
    fn raw(&self) -> &Self::Raw;

    fn organizations(&self) -> &Self::Organizations;
    fn org_repositories(&self) -> &Self::OrgRepositories;
    fn user_repositories(&self) -> &Self::UserRepositories;

    fn has_token_permission(
        &self,
        permission: TokenPermission,
    ) -> impl Future<Output = GitProviderResult<bool>> + Send;
}

/// Handle to a single organization.
pub trait Organization: Send + Sync {
    type ApiObject;

    fn api_object(&self) -> &Self::ApiObject;
    fn organization(&self) -> &OrganizationRef;
    fn get(&self) -> OrganizationInfo;
}

/// Operations on the set of organizations visible to the caller.
pub trait OrganizationsClient: Send + Sync {
    type Organization: Organization;

    /// Fails with `NotFound` if the organization does not exist.
    fn get(
        &self,
        org: &OrganizationRef,
    ) -> impl Future<Output = GitProviderResult<Self::Organization>> + Send;

    /// Every organization the authenticated user belongs to.
    fn list(&self) -> impl Future<Output = GitProviderResult<Vec<Self::Organization>>> + Send;

    /// Sub-organizations of `org`.
    fn children(
        &self,
        org: &OrganizationRef,
    ) -> impl Future<Output = GitProviderResult<Vec<Self::Organization>>> + Send;
}

/// Handle to one repository: read current state, stage desired state, push it.
///
/// A handle is owned by whoever obtained it and is not meant to be shared.
pub trait Repository: Send + Sync {
    type Ref: RepositoryRef;
    type ApiObject;

    fn api_object(&self) -> &Self::ApiObject;
    fn repository(&self) -> &Self::Ref;

    /// Neutral view of the state held by this handle.
    fn get(&self) -> RepositoryInfo;

    /// Stages `info` onto the handle; nothing is sent until [`Repository::update`].
    fn set(&mut self, info: RepositoryInfo) -> GitProviderResult<()>;

    /// Pushes the staged state to the provider and refreshes the handle.
    fn update(&mut self) -> impl Future<Output = GitProviderResult<()>> + Send;

    /// Makes the staged state the actual state, creating the repository if
    /// needed. Returns whether any action was taken.
    fn reconcile(&mut self) -> impl Future<Output = GitProviderResult<bool>> + Send;

    /// Deletes the repository. Only allowed when destructive calls are enabled.
    fn delete(&self) -> impl Future<Output = GitProviderResult<()>> + Send;
}

/// Operations on repositories owned by an organization.
pub trait OrgRepositoriesClient: Send + Sync {
    type Repository: Repository<Ref = OrgRepositoryRef>;

    fn get(
        &self,
        r: &OrgRepositoryRef,
    ) -> impl Future<Output = GitProviderResult<Self::Repository>> + Send;

    fn list(
        &self,
        org: &OrganizationRef,
    ) -> impl Future<Output = GitProviderResult<Vec<Self::Repository>>> + Send;

    /// Fails with `AlreadyExists` if the repository exists.
    fn create(
        &self,
        r: &OrgRepositoryRef,
        info: RepositoryInfo,
        options: RepositoryCreateOptions,
    ) -> impl Future<Output = GitProviderResult<Self::Repository>> + Send;

    /// Makes `info` the actual state; the boolean reports whether an action
    /// (create or update) was taken.
    fn reconcile(
        &self,
        r: &OrgRepositoryRef,
        info: RepositoryInfo,
        options: RepositoryReconcileOptions,
    ) -> impl Future<Output = GitProviderResult<(Self::Repository, bool)>> + Send;
}

/// Operations on repositories owned by a user.
pub trait UserRepositoriesClient: Send + Sync {
    type Repository: Repository<Ref = UserRepositoryRef>;

    fn get(
        &self,
        r: &UserRepositoryRef,
    ) -> impl Future<Output = GitProviderResult<Self::Repository>> + Send;

    fn list(
        &self,
        user: &UserRef,
    ) -> impl Future<Output = GitProviderResult<Vec<Self::Repository>>> + Send;

    fn create(
        &self,
        r: &UserRepositoryRef,
        info: RepositoryInfo,
        options: RepositoryCreateOptions,
    ) -> impl Future<Output = GitProviderResult<Self::Repository>> + Send;

    fn reconcile(
        &self,
        r: &UserRepositoryRef,
        info: RepositoryInfo,
        options: RepositoryReconcileOptions,
    ) -> impl Future<Output = GitProviderResult<(Self::Repository, bool)>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_displays_and_serializes() {
        const ID: ProviderId = ProviderId::new("gitea");
        assert_eq!(ID.to_string(), "gitea");
        assert_eq!(serde_json::to_string(&ID).unwrap(), "\"gitea\"");
    }
}
