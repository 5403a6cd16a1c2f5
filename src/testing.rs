//! In-memory Gitea used by the adapter tests.

use std::collections::HashMap;
use std::sync::Mutex;

use gitea_api::{
    ApiError, ApiResult, CreateRepoOption, EditRepoOption, GiteaApi, ListOptions, Organization,
    Repository, Response, User,
};
use tracing_subscriber::EnvFilter;

/// Login of the user the fake treats as authenticated.
pub(crate) const AUTH_USER: &str = "octo";

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default)]
struct State {
    repos: Vec<Repository>,
    orgs: Vec<Organization>,
    calls: Vec<String>,
    max_page_size: Option<u32>,
    page_errors: HashMap<u32, ApiError>,
    next_error: Option<ApiError>,
    last_create: Option<CreateRepoOption>,
    next_id: i64,
}

impl State {
    fn position(&self, owner: &str, name: &str) -> Option<usize> {
        self.repos.iter().position(|r| {
            r.name.eq_ignore_ascii_case(name)
                && r.owner
                    .as_ref()
                    .is_some_and(|o| o.login.eq_ignore_ascii_case(owner))
        })
    }

    /// Records the call and returns the injected failure, if any.
    fn record(&mut self, call: String) -> ApiResult<()> {
        self.calls.push(call);
        match self.next_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn page<T>(&mut self, items: Vec<T>, opts: ListOptions) -> ApiResult<(Vec<T>, Response)> {
        if let Some(e) = self.page_errors.remove(&opts.page) {
            return Err(e);
        }
        let size = self
            .max_page_size
            .map_or(opts.page_size, |max| max.min(opts.page_size))
            .max(1) as usize;
        let total = items.len() as u64;
        let page = items
            .into_iter()
            .skip(opts.page.saturating_sub(1) as usize * size)
            .take(size)
            .collect();
        Ok((page, ok(Some(total))))
    }

    fn insert(&mut self, owner: &str, opt: CreateRepoOption) -> ApiResult<Repository> {
        if self.position(owner, &opt.name).is_some() {
            return Err(ApiError::Status {
                status: 409,
                message: "The repository with the same name already exists.".into(),
                url: None,
            });
        }
        self.next_id += 1;
        let repo = Repository {
            id: self.next_id,
            owner: Some(user(owner)),
            full_name: format!("{owner}/{}", opt.name),
            description: opt.description.clone(),
            empty: !opt.auto_init,
            private: opt.private,
            default_branch: if opt.default_branch.is_empty() {
                "main".into()
            } else {
                opt.default_branch.clone()
            },
            name: opt.name.clone(),
            ..Default::default()
        };
        self.last_create = Some(opt);
        self.repos.push(repo.clone());
        Ok(repo)
    }
}

fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        ..Default::default()
    }
}

fn ok(total_count: Option<u64>) -> Response {
    Response {
        status: 200,
        total_count,
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "The target couldn't be found.".into(),
        url: None,
    }
}

/// `GiteaApi` backed by vectors behind a mutex, with a call log and
/// failure injection.
#[derive(Debug, Default)]
pub(crate) struct FakeGitea {
    state: Mutex<State>,
}

impl FakeGitea {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn with_repo(
        self,
        owner: &str,
        name: &str,
        private: bool,
        description: &str,
    ) -> Self {
        {
            let mut s = self.state();
            s.next_id += 1;
            let repo = Repository {
                id: s.next_id,
                owner: Some(user(owner)),
                name: name.to_string(),
                full_name: format!("{owner}/{name}"),
                description: description.to_string(),
                private,
                default_branch: "main".into(),
                ..Default::default()
            };
            s.repos.push(repo);
        }
        self
    }

    pub(crate) fn with_org(self, username: &str, full_name: &str, description: &str) -> Self {
        {
            let mut s = self.state();
            s.next_id += 1;
            let org = Organization {
                id: s.next_id,
                username: username.to_string(),
                full_name: full_name.to_string(),
                description: description.to_string(),
                visibility: "public".into(),
                ..Default::default()
            };
            s.orgs.push(org);
        }
        self
    }

    /// Caps every list page at `size` items regardless of the requested limit.
    pub(crate) fn with_max_page_size(self, size: u32) -> Self {
        self.state().max_page_size = Some(size);
        self
    }

    /// Stores `repo` as-is, without any consistency checks.
    pub(crate) fn insert_raw(&self, repo: Repository) {
        self.state().repos.push(repo);
    }

    pub(crate) fn insert_raw_org(&self, org: Organization) {
        self.state().orgs.push(org);
    }

    /// Makes the next list request for `page` fail with `err`.
    pub(crate) fn fail_page(&self, page: u32, err: ApiError) {
        self.state().page_errors.insert(page, err);
    }

    /// Makes the next call of any kind fail with `err`.
    pub(crate) fn fail_next(&self, err: ApiError) {
        self.state().next_error = Some(err);
    }

    pub(crate) fn repo(&self, owner: &str, name: &str) -> Option<Repository> {
        let s = self.state();
        s.position(owner, name).map(|i| s.repos[i].clone())
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub(crate) fn last_create(&self) -> Option<CreateRepoOption> {
        self.state().last_create.clone()
    }

    fn owned_by(&self, owner: &str) -> Vec<Repository> {
        self.state()
            .repos
            .iter()
            .filter(|r| {
                r.owner
                    .as_ref()
                    .is_some_and(|o| o.login.eq_ignore_ascii_case(owner))
            })
            .cloned()
            .collect()
    }
}

impl GiteaApi for FakeGitea {
    async fn get_repo(&self, owner: &str, repo: &str) -> ApiResult<(Repository, Response)> {
        let mut s = self.state();
        s.record(format!("get_repo {owner}/{repo}"))?;
        let i = s.position(owner, repo).ok_or_else(not_found)?;
        Ok((s.repos[i].clone(), ok(None)))
    }

    async fn list_org_repos(
        &self,
        org: &str,
        opts: ListOptions,
    ) -> ApiResult<(Vec<Repository>, Response)> {
        let items = self.owned_by(org);
        let mut s = self.state();
        s.record(format!("list_org_repos {org} page={}", opts.page))?;
        s.page(items, opts)
    }

    async fn list_user_repos(
        &self,
        user: &str,
        opts: ListOptions,
    ) -> ApiResult<(Vec<Repository>, Response)> {
        let items = self.owned_by(user);
        let mut s = self.state();
        s.record(format!("list_user_repos {user} page={}", opts.page))?;
        s.page(items, opts)
    }

    async fn create_org_repo(
        &self,
        org: &str,
        opt: CreateRepoOption,
    ) -> ApiResult<(Repository, Response)> {
        let mut s = self.state();
        s.record(format!("create_org_repo {org}/{}", opt.name))?;
        let repo = s.insert(org, opt)?;
        Ok((repo, Response { status: 201, total_count: None }))
    }

    async fn create_repo(&self, opt: CreateRepoOption) -> ApiResult<(Repository, Response)> {
        let mut s = self.state();
        s.record(format!("create_repo {AUTH_USER}/{}", opt.name))?;
        let repo = s.insert(AUTH_USER, opt)?;
        Ok((repo, Response { status: 201, total_count: None }))
    }

    async fn edit_repo(
        &self,
        owner: &str,
        repo: &str,
        opt: EditRepoOption,
    ) -> ApiResult<(Repository, Response)> {
        let mut s = self.state();
        s.record(format!("edit_repo {owner}/{repo}"))?;
        let i = s.position(owner, repo).ok_or_else(not_found)?;
        let stored = &mut s.repos[i];
        if let Some(name) = opt.name {
            stored.name = name;
        }
        if let Some(description) = opt.description {
            stored.description = description;
        }
        if let Some(private) = opt.private {
            stored.private = private;
        }
        if let Some(branch) = opt.default_branch {
            stored.default_branch = branch;
        }
        if let Some(archived) = opt.archived {
            stored.archived = archived;
        }
        Ok((stored.clone(), ok(None)))
    }

    async fn delete_repo(&self, owner: &str, repo: &str) -> ApiResult<Response> {
        let mut s = self.state();
        s.record(format!("delete_repo {owner}/{repo}"))?;
        let i = s.position(owner, repo).ok_or_else(not_found)?;
        s.repos.remove(i);
        Ok(Response {
            status: 204,
            total_count: None,
        })
    }

    async fn get_org(&self, org: &str) -> ApiResult<(Organization, Response)> {
        let mut s = self.state();
        s.record(format!("get_org {org}"))?;
        let found = s
            .orgs
            .iter()
            .find(|o| o.username.eq_ignore_ascii_case(org))
            .cloned()
            .ok_or_else(not_found)?;
        Ok((found, ok(None)))
    }

    async fn list_my_orgs(&self, opts: ListOptions) -> ApiResult<(Vec<Organization>, Response)> {
        let mut s = self.state();
        s.record(format!("list_my_orgs page={}", opts.page))?;
        let items = s.orgs.clone();
        s.page(items, opts)
    }
}
