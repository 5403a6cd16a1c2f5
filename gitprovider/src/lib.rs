//! Provider-neutral contract for Git hosting clients.
//!
//! This crate defines what a provider implementation has to offer:
//!   * structured references to organizations, users and repositories
//!   * the neutral [`RepositoryInfo`] model compared during reconciliation
//!   * client construction options ([`ClientOptions`])
//!   * the client/handle traits and the sentinel error taxonomy.
//!
//! It performs no network I/O itself.

pub mod client;
pub mod errors;
pub mod options;
pub mod refs;
pub mod repository;

pub use client::{
    Client, Organization, OrganizationsClient, OrgRepositoriesClient, ProviderId, Repository,
    UserRepositoriesClient,
};
pub use errors::{GitProviderError, GitProviderResult, ValidationError, Validator};
pub use options::{ClientOptions, TransportHook};
pub use refs::{
    IdentityRef, OrgRepositoryRef, OrganizationRef, RepositoryRef, UserRef, UserRepositoryRef,
};
pub use repository::{
    DEFAULT_BRANCH, LicenseTemplate, OrganizationInfo, RepositoryCreateOptions, RepositoryInfo,
    RepositoryReconcileOptions, RepositoryVisibility, TokenPermission,
};

/// Brings the client and handle traits into scope for method calls.
pub mod prelude {
    pub use crate::client::{
        Client as _, Organization as _, OrganizationsClient as _, OrgRepositoriesClient as _,
        Repository as _, UserRepositoriesClient as _,
    };
}
