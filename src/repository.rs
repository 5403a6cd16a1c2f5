//! Repository handles and the translation between Gitea repository objects
//! and the neutral [`RepositoryInfo`].

use std::sync::Arc;

use gitea_api::{CreateRepoOption, EditRepoOption, GiteaApi, GiteaClient, Repository};
use gitprovider::{
    GitProviderResult, OrgRepositoryRef, RepositoryCreateOptions, RepositoryInfo, RepositoryRef,
    RepositoryVisibility, UserRepositoryRef, Validator,
};
use tracing::{debug, info};

use crate::client::ClientContext;
use crate::repositories::{create_repository, delete_repo, get_repo, update_repo};
use crate::validation::GiteaRepositoryRef;

/// Handle to a Gitea repository: the API object plus the reference it was
/// obtained with.
#[derive(Debug)]
pub struct GiteaRepository<A, R> {
    ctx: Arc<ClientContext<A>>,
    api_obj: Repository,
    reference: R,
}

/// Repository owned by an organization.
pub type OrgRepository<A = GiteaClient> = GiteaRepository<A, OrgRepositoryRef>;

/// Repository owned by a user.
pub type UserRepository<A = GiteaClient> = GiteaRepository<A, UserRepositoryRef>;

impl<A, R> GiteaRepository<A, R> {
    pub(crate) fn new(ctx: Arc<ClientContext<A>>, api_obj: Repository, reference: R) -> Self {
        Self {
            ctx,
            api_obj,
            reference,
        }
    }
}

impl<A: GiteaApi, R: GiteaRepositoryRef> gitprovider::Repository for GiteaRepository<A, R> {
    type Ref = R;
    type ApiObject = Repository;

    fn api_object(&self) -> &Repository {
        &self.api_obj
    }

    fn repository(&self) -> &R {
        &self.reference
    }

    fn get(&self) -> RepositoryInfo {
        repository_from_api(&self.api_obj)
    }

    fn set(&mut self, info: RepositoryInfo) -> GitProviderResult<()> {
        info.validate_info()?;
        repository_info_to_api_obj(&info, &mut self.api_obj)
    }

    async fn update(&mut self) -> GitProviderResult<()> {
        self.reference.validate_for_domain(&self.ctx.domain)?;
        let opt = repository_to_edit_option(&self.api_obj);
        let api_obj = update_repo(
            &self.ctx.api,
            self.reference.identity(),
            self.reference.repository(),
            opt,
        )
        .await?;
        self.api_obj = api_obj;
        info!(repository = %self.reference, "repository updated");
        Ok(())
    }

    async fn reconcile(&mut self) -> GitProviderResult<bool> {
        self.reference.validate_for_domain(&self.ctx.domain)?;
        let owner = self.reference.identity();
        let name = self.reference.repository();

        let actual = match get_repo(&self.ctx.api, owner, name).await {
            Ok(actual) => actual,
            Err(e) if e.is_not_found() => {
                debug!(repository = %self.reference, "repository missing, creating it");
                let created = create_repository(
                    &self.ctx.api,
                    &self.reference,
                    self.get(),
                    RepositoryCreateOptions::default(),
                )
                .await?;
                self.api_obj = created;
                return Ok(true);
            }
            Err(e) => return Err(e),
        };

        if self.get().equals(&repository_from_api(&actual)) {
            debug!(repository = %self.reference, "repository already up to date");
            return Ok(false);
        }
        self.update().await?;
        Ok(true)
    }

    async fn delete(&self) -> GitProviderResult<()> {
        self.reference.validate_for_domain(&self.ctx.domain)?;
        delete_repo(
            &self.ctx.api,
            self.reference.identity(),
            self.reference.repository(),
            self.ctx.destructive_actions,
        )
        .await?;
        info!(repository = %self.reference, "repository deleted");
        Ok(())
    }
}

/// Neutral view of a Gitea repository.
///
/// Gitea reports an empty default branch for repositories without commits;
/// that is surfaced as unset.
pub(crate) fn repository_from_api(api_obj: &Repository) -> RepositoryInfo {
    let visibility = if api_obj.private {
        RepositoryVisibility::Private
    } else {
        RepositoryVisibility::Public
    };
    RepositoryInfo {
        description: Some(api_obj.description.clone()),
        default_branch: (!api_obj.default_branch.is_empty())
            .then(|| api_obj.default_branch.clone()),
        visibility: Some(visibility),
    }
}

/// Builds the create request for `r` from a defaulted `info`.
pub(crate) fn repository_to_api<R: RepositoryRef>(
    info: &RepositoryInfo,
    r: &R,
) -> GitProviderResult<CreateRepoOption> {
    let mut opt = CreateRepoOption {
        name: r.repository().to_string(),
        ..Default::default()
    };
    if let Some(description) = &info.description {
        opt.description = description.clone();
    }
    if let Some(branch) = &info.default_branch {
        opt.default_branch = branch.clone();
    }
    opt.private = gitea_private_flag(info.visibility())?;
    Ok(opt)
}

/// Stages the set fields of `info` onto a repository object.
fn repository_info_to_api_obj(
    info: &RepositoryInfo,
    api_obj: &mut Repository,
) -> GitProviderResult<()> {
    if let Some(visibility) = info.visibility {
        api_obj.private = gitea_private_flag(visibility)?;
    }
    if let Some(description) = &info.description {
        api_obj.description = description.clone();
    }
    if let Some(branch) = &info.default_branch {
        api_obj.default_branch = branch.clone();
    }
    Ok(())
}

/// Edit request carrying the mutable fields of a (staged) repository object.
pub(crate) fn repository_to_edit_option(api_obj: &Repository) -> EditRepoOption {
    EditRepoOption {
        description: Some(api_obj.description.clone()),
        private: Some(api_obj.private),
        default_branch: (!api_obj.default_branch.is_empty())
            .then(|| api_obj.default_branch.clone()),
        ..Default::default()
    }
}

/// Gitea repositories only know public and private.
fn gitea_private_flag(visibility: RepositoryVisibility) -> GitProviderResult<bool> {
    match visibility {
        RepositoryVisibility::Public => Ok(false),
        RepositoryVisibility::Private => Ok(true),
        RepositoryVisibility::Internal => {
            let mut v = Validator::new("RepositoryInfo");
            v.invalid("visibility", "gitea does not support internal repositories");
            v.finish().map(|_| true)
        }
    }
}
