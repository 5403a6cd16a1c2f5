//! Repository clients scoped to organizations and users, plus the Gitea
//! calls they share.

mod org;
mod user;

pub use org::OrgRepositoriesClient;
pub use user::UserRepositoriesClient;

use gitea_api::{CreateRepoOption, EditRepoOption, GiteaApi, Repository};
use gitprovider::{
    GitProviderError, GitProviderResult, RepositoryCreateOptions, RepositoryInfo, RepositoryRef,
};
use tracing::{debug, info};

use crate::errors::handle_http_error;
use crate::repository::repository_to_api;
use crate::validation::validate_repository_api_resp;

/// License templates known to the neutral layer, mapped to Gitea's names.
const KNOWN_LICENSE_TEMPLATES: [(&str, &str); 3] = [
    ("apache-2.0", "Apache-2.0"),
    ("mit", "MIT"),
    ("gpl-3.0", "GPL-3.0-only"),
];

/// Gitea license name for a neutral license template.
///
/// Unknown templates map to the empty string, which Gitea treats as "no
/// license".
pub fn license_template_name(template: &str) -> &'static str {
    KNOWN_LICENSE_TEMPLATES
        .iter()
        .find(|(neutral, _)| *neutral == template)
        .map(|(_, gitea)| *gitea)
        .unwrap_or_default()
}

/// Fetches and validates one repository.
pub(crate) async fn get_repo<A: GiteaApi>(
    api: &A,
    owner: &str,
    repo: &str,
) -> GitProviderResult<Repository> {
    debug!(owner, repo, "get repository");
    validate_repository_api_resp(api.get_repo(owner, repo).await)
}

/// Creates the repository `r` from `info`, applying create-only options.
///
/// Organization references create under the organization, user references
/// under the authenticated user.
pub(crate) async fn create_repository<A: GiteaApi, R: RepositoryRef>(
    api: &A,
    r: &R,
    mut info: RepositoryInfo,
    options: RepositoryCreateOptions,
) -> GitProviderResult<Repository> {
    info.validate_and_default()?;

    let mut api_opts = repository_to_api(&info, r)?;
    if let Some(auto_init) = options.auto_init {
        api_opts.auto_init = auto_init;
    }
    if let Some(template) = &options.license_template {
        api_opts.license = license_template_name(template.as_str()).to_string();
    }

    let created = create_repo(api, r.organization(), api_opts).await?;
    info!(repository = %r, "repository created");
    Ok(created)
}

async fn create_repo<A: GiteaApi>(
    api: &A,
    org: Option<&str>,
    api_opts: CreateRepoOption,
) -> GitProviderResult<Repository> {
    match org.filter(|org| !org.is_empty()) {
        Some(org) => {
            debug!(org, repo = %api_opts.name, "create organization repository");
            validate_repository_api_resp(api.create_org_repo(org, api_opts).await)
        }
        None => {
            debug!(repo = %api_opts.name, "create user repository");
            validate_repository_api_resp(api.create_repo(api_opts).await)
        }
    }
}

pub(crate) async fn update_repo<A: GiteaApi>(
    api: &A,
    owner: &str,
    repo: &str,
    opt: EditRepoOption,
) -> GitProviderResult<Repository> {
    debug!(owner, repo, "edit repository");
    validate_repository_api_resp(api.edit_repo(owner, repo, opt).await)
}

/// Deletes a repository; refused without contacting Gitea unless destructive
/// calls are enabled.
pub(crate) async fn delete_repo<A: GiteaApi>(
    api: &A,
    owner: &str,
    repo: &str,
    destructive_actions: bool,
) -> GitProviderResult<()> {
    if !destructive_actions {
        return Err(GitProviderError::DestructiveCallDisallowed {
            action: "delete repository",
        });
    }
    debug!(owner, repo, "delete repository");
    api.delete_repo(owner, repo)
        .await
        .map_err(handle_http_error)?;
    Ok(())
}

/// Brings `actual` to the `desired` state. Returns whether an update was sent.
pub(crate) async fn reconcile_repository<H: gitprovider::Repository>(
    actual: &mut H,
    desired: RepositoryInfo,
) -> GitProviderResult<bool> {
    if desired.equals(&actual.get()) {
        return Ok(false);
    }
    actual.set(desired)?;
    actual.update().await?;
    Ok(true)
}
