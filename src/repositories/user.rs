//! Repositories owned by Gitea users.

use std::sync::Arc;

use gitea_api::{GiteaApi, GiteaClient};
use gitprovider::{
    GitProviderResult, RepositoryCreateOptions, RepositoryInfo, RepositoryReconcileOptions, UserRef,
    UserRepositoryRef,
};
use tracing::{debug, info};

use super::{create_repository, get_repo, reconcile_repository};
use crate::client::ClientContext;
use crate::pagination::all_pages;
use crate::repository::UserRepository;
use crate::validation::{
    validate_repository_objects, validate_user_ref, validate_user_repository_ref,
};

/// Operates on repositories owned by users.
///
/// Gitea only creates user repositories for the authenticated user, so
/// `create` and `reconcile` act on the token owner's account.
#[derive(Debug)]
pub struct UserRepositoriesClient<A = GiteaClient> {
    ctx: Arc<ClientContext<A>>,
}

impl<A> UserRepositoriesClient<A> {
    pub(crate) fn new(ctx: Arc<ClientContext<A>>) -> Self {
        Self { ctx }
    }
}

impl<A: GiteaApi> gitprovider::UserRepositoriesClient for UserRepositoriesClient<A> {
    type Repository = UserRepository<A>;

    async fn get(&self, r: &UserRepositoryRef) -> GitProviderResult<UserRepository<A>> {
        validate_user_repository_ref(r, &self.ctx.domain)?;
        let api_obj = get_repo(&self.ctx.api, &r.user.user_login, &r.repository_name).await?;
        Ok(UserRepository::new(self.ctx.clone(), api_obj, r.clone()))
    }

    async fn list(&self, user: &UserRef) -> GitProviderResult<Vec<UserRepository<A>>> {
        validate_user_ref(user, &self.ctx.domain)?;

        let api = &self.ctx.api;
        let login = user.user_login.as_str();
        let api_objs = all_pages(|opts| api.list_user_repos(login, opts)).await?;
        let api_objs = validate_repository_objects(api_objs)?;
        debug!(user = %user, count = api_objs.len(), "listed user repositories");

        Ok(api_objs
            .into_iter()
            .map(|api_obj| {
                let reference = UserRepositoryRef::new(user.clone(), api_obj.name.clone());
                UserRepository::new(self.ctx.clone(), api_obj, reference)
            })
            .collect())
    }

    async fn create(
        &self,
        r: &UserRepositoryRef,
        info: RepositoryInfo,
        options: RepositoryCreateOptions,
    ) -> GitProviderResult<UserRepository<A>> {
        validate_user_repository_ref(r, &self.ctx.domain)?;
        let api_obj = create_repository(&self.ctx.api, r, info, options).await?;
        Ok(UserRepository::new(self.ctx.clone(), api_obj, r.clone()))
    }

    async fn reconcile(
        &self,
        r: &UserRepositoryRef,
        mut info: RepositoryInfo,
        options: RepositoryReconcileOptions,
    ) -> GitProviderResult<(UserRepository<A>, bool)> {
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
