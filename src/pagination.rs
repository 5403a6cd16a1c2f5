//! Page-by-page accumulation for Gitea list endpoints.

use std::future::Future;

use gitea_api::{ApiResult, ListOptions, Response};
use gitprovider::GitProviderResult;
use tracing::debug;

use crate::errors::handle_http_error;

/// Fetches pages 1, 2, ... until a page comes back empty and returns every
/// item in the order received.
///
/// A failing page aborts the whole listing, even when it carried no items.
pub(crate) async fn all_pages<T, F, Fut>(mut fetch: F) -> GitProviderResult<Vec<T>>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = ApiResult<(Vec<T>, Response)>>,
{
    let mut opts = ListOptions::default();
    let mut items = Vec::new();

    loop {
        let (page, resp) = fetch(opts).await.map_err(handle_http_error)?;
        if page.is_empty() {
            debug!(pages = opts.page - 1, items = items.len(), "pagination finished");
            return Ok(items);
        }

        debug!(
            page = opts.page,
            count = page.len(),
            total = ?resp.total_count,
            "fetched page"
        );
        items.extend(page);
        opts.page += 1;
    }
}
