use std::future::Future;

use futures::future::try_join_all;

use crate::error::FetchError;

/// Resolve every reference concurrently and collect the results in input order
///
/// All resolutions start together and are joined in the calling task. The
/// first failure fails the whole fan-out and the other results are dropped.
pub async fn fan_out<R, T, F, Fut>(
    refs: impl IntoIterator<Item = R>,
    resolve: F,
) -> Result<Vec<T>, FetchError>
where
    F: FnMut(R) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    try_join_all(refs.into_iter().map(resolve)).await
}
