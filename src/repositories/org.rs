//! Repositories owned by Gitea organizations.

use std::sync::Arc;

use gitea_api::{GiteaApi, GiteaClient};
use gitprovider::{
    GitProviderResult, OrgRepositoryRef, OrganizationRef, RepositoryCreateOptions, RepositoryInfo,
    RepositoryReconcileOptions,
};
use tracing::{debug, info};

use super::{create_repository, get_repo, reconcile_repository};
use crate::client::ClientContext;
use crate::pagination::all_pages;
use crate::repository::OrgRepository;
use crate::validation::{
    validate_org_repository_ref, validate_organization_ref, validate_repository_objects,
};

/// Operates on the repositories of organizations the token has access to.
#[derive(Debug)]
pub struct OrgRepositoriesClient<A = GiteaClient> {
    ctx: Arc<ClientContext<A>>,
}

impl<A> OrgRepositoriesClient<A> {
    pub(crate) fn new(ctx: Arc<ClientContext<A>>) -> Self {
        Self { ctx }
    }
}

impl<A: GiteaApi> gitprovider::OrgRepositoriesClient for OrgRepositoriesClient<A> {
    type Repository = OrgRepository<A>;

    /// Returns the repository at `r`; `NotFound` if it does not exist.
    async fn get(&self, r: &OrgRepositoryRef) -> GitProviderResult<OrgRepository<A>> {
        validate_org_repository_ref(r, &self.ctx.domain)?;
        let api_obj = get_repo(
            &self.ctx.api,
            &r.organization.organization,
            &r.repository_name,
        )
        .await?;
        Ok(OrgRepository::new(self.ctx.clone(), api_obj, r.clone()))
    }

    /// Lists every repository of `org`, following pagination.
    async fn list(&self, org: &OrganizationRef) -> GitProviderResult<Vec<OrgRepository<A>>> {
        validate_organization_ref(org, &self.ctx.domain)?;

        let api = &self.ctx.api;
        let name = org.organization.as_str();
        let api_objs = all_pages(|opts| api.list_org_repos(name, opts)).await?;
        let api_objs = validate_repository_objects(api_objs)?;
        debug!(org = %org, count = api_objs.len(), "listed organization repositories");

        Ok(api_objs
            .into_iter()
            .map(|api_obj| {
                let reference = OrgRepositoryRef::new(org.clone(), api_obj.name.clone());
                OrgRepository::new(self.ctx.clone(), api_obj, reference)
            })
            .collect())
    }

    /// Creates `r` from `info`; `AlreadyExists` if the name is taken.
    async fn create(
        &self,
        r: &OrgRepositoryRef,
        info: RepositoryInfo,
        options: RepositoryCreateOptions,
    ) -> GitProviderResult<OrgRepository<A>> {
        validate_org_repository_ref(r, &self.ctx.domain)?;
        let api_obj = create_repository(&self.ctx.api, r, info, options).await?;
        Ok(OrgRepository::new(self.ctx.clone(), api_obj, r.clone()))
    }

    /// Makes `info` the actual state of `r`.
    ///
    /// Missing repositories are created (`true`), differing ones updated
    /// (`true`), matching ones left alone (`false`).
    async fn reconcile(
        &self,
        r: &OrgRepositoryRef,
        mut info: RepositoryInfo,
        options: RepositoryReconcileOptions,
    ) -> GitProviderResult<(OrgRepository<A>, bool)> {
        // Default first so unset fields do not show up as a diff.
        info.validate_and_default()?;

        let mut actual = match self.get(r).await {
            Ok(actual) => actual,
            Err(e) if e.is_not_found() => {
                let created = self.create(r, info, options).await?;
                info!(repository = %r, "reconcile created repository");
                return Ok((created, true));
            }
            Err(e) => return Err(e),
        };

        let action_taken = reconcile_repository(&mut actual, info).await?;
        info!(repository = %r, action_taken, "reconciled repository");
        Ok((actual, action_taken))
    }
}
