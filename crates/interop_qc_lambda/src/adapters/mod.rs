pub mod fastq_api;
pub mod project_data;
pub mod workflow_api;

/// Bridge an async client call into the synchronous handler seam. Requires
/// the multi-thread Lambda runtime.
pub(crate) fn block_on_current<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
