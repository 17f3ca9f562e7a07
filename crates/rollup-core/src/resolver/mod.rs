//! Resolver - ジョブ集合の集約ステータス
//!
//! Reduces a collection of jobs to one status. Pure and stateless: the
//! result depends only on the multiset of `(status, allow_failure)` pairs.

mod builder;
mod tally;

pub use builder::{DEFAULT_EMPTY_STATUS, ResolverBuilder, ResolverConfig};
pub use tally::Tally;

use crate::domain::{DescribeJob, Status};

/// Resolves aggregate statuses with a given configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusResolver {
    config: ResolverConfig,
}

impl StatusResolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Aggregate status of `jobs`. Input order is irrelevant.
    pub fn resolve<I>(&self, jobs: I) -> Status
    where
        I: IntoIterator,
        I::Item: DescribeJob,
    {
        self.resolve_tally(&jobs.into_iter().collect())
    }

    pub fn resolve_tally(&self, tally: &Tally) -> Status {
        tracing::trace!(?tally, "resolving tally");
        let status = tally.resolve().unwrap_or(self.config.empty_status);
        tracing::debug!(jobs = tally.total, %status, "resolved aggregate status");
        status
    }
}

/// Aggregate status of `jobs` with the default configuration.
///
/// An empty collection resolves to [`DEFAULT_EMPTY_STATUS`] (`skipped`).
///
/// ```
/// use rollup_core::{JobDescriptor, Status, aggregate};
///
/// let jobs = [
///     JobDescriptor::new(Status::Success),
///     JobDescriptor::allowed_to_fail(Status::Failed),
/// ];
/// assert_eq!(aggregate(&jobs), Status::Success);
/// ```
pub fn aggregate<I>(jobs: I) -> Status
where
    I: IntoIterator,
    I::Item: DescribeJob,
{
    StatusResolver::default().resolve(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobDescriptor;
    use proptest::prelude::*;
    use rstest::rstest;

    fn job(status: Status) -> JobDescriptor {
        JobDescriptor::new(status)
    }

    fn allowed(status: Status) -> JobDescriptor {
        JobDescriptor::allowed_to_fail(status)
    }

    #[rstest]
    #[case::all_successful(vec![job(Status::Success), job(Status::Success)], Status::Success)]
    #[case::at_least_one_failed(vec![job(Status::Success), job(Status::Failed)], Status::Failed)]
    #[case::at_least_one_running(vec![job(Status::Success), job(Status::Running)], Status::Running)]
    #[case::at_least_one_pending(vec![job(Status::Success), job(Status::Pending)], Status::Running)]
    #[case::success_and_failed_but_allowed(
        vec![job(Status::Success), allowed(Status::Failed)],
        Status::Success
    )]
    #[case::one_failed_but_allowed(vec![allowed(Status::Failed)], Status::Skipped)]
    #[case::success_and_canceled(vec![job(Status::Success), job(Status::Canceled)], Status::Canceled)]
    #[case::failed_and_canceled(vec![job(Status::Failed), job(Status::Canceled)], Status::Failed)]
    #[case::failed_but_allowed_and_canceled(
        vec![allowed(Status::Failed), job(Status::Canceled)],
        Status::Canceled
    )]
    #[case::running_and_canceled(vec![job(Status::Running), job(Status::Canceled)], Status::Running)]
    #[case::all_canceled(vec![job(Status::Canceled), job(Status::Canceled)], Status::Canceled)]
    #[case::success_and_canceled_but_allowed(
        vec![job(Status::Success), allowed(Status::Canceled)],
        Status::Success
    )]
    #[case::success_and_running_but_allowed(
        vec![job(Status::Success), allowed(Status::Running)],
        Status::Running
    )]
    #[case::blocking_manual(vec![job(Status::Failed), job(Status::Manual)], Status::Manual)]
    #[case::non_blocking_manual(vec![job(Status::Failed), allowed(Status::Manual)], Status::Failed)]
    fn build_status_summary(#[case] jobs: Vec<JobDescriptor>, #[case] expected: Status) {
        assert_eq!(aggregate(&jobs), expected);
    }

    #[rstest]
    #[case::blocking_manual_over_running(vec![job(Status::Running), job(Status::Manual)], Status::Manual)]
    #[case::failed_over_running(vec![job(Status::Running), job(Status::Failed)], Status::Failed)]
    #[case::all_created(vec![job(Status::Created), job(Status::Created)], Status::Created)]
    #[case::created_and_success(vec![job(Status::Created), job(Status::Success)], Status::Success)]
    #[case::created_and_skipped(vec![job(Status::Created), job(Status::Skipped)], Status::Skipped)]
    #[case::all_skipped(vec![job(Status::Skipped)], Status::Skipped)]
    #[case::success_and_skipped(vec![job(Status::Success), job(Status::Skipped)], Status::Success)]
    #[case::lone_canceled_but_allowed(vec![allowed(Status::Canceled)], Status::Success)]
    #[case::lone_manual_but_allowed(vec![allowed(Status::Manual)], Status::Skipped)]
    #[case::manual_but_allowed_and_success(
        vec![allowed(Status::Manual), job(Status::Success)],
        Status::Success
    )]
    #[case::success_allowed_to_fail(vec![allowed(Status::Success)], Status::Success)]
    fn composite_edge_cases(#[case] jobs: Vec<JobDescriptor>, #[case] expected: Status) {
        assert_eq!(aggregate(&jobs), expected);
    }

    // Both tolerated: no counterexample known, so the least severe outcome wins.
    #[test]
    fn canceled_and_failed_both_allowed_resolve_to_success() {
        let jobs = [allowed(Status::Canceled), allowed(Status::Failed)];
        assert_eq!(aggregate(jobs), Status::Success);
    }

    #[test]
    fn empty_collection_is_skipped_by_default() {
        assert_eq!(aggregate(Vec::<JobDescriptor>::new()), Status::Skipped);
    }

    #[test]
    fn empty_collection_uses_configured_status() {
        let resolver = StatusResolver::builder()
            .empty_status(Status::Created)
            .build()
            .unwrap();
        assert_eq!(resolver.resolve(Vec::<JobDescriptor>::new()), Status::Created);
        // Non-empty input is unaffected by the setting.
        assert_eq!(resolver.resolve([Status::Success]), Status::Success);
    }

    #[test]
    fn accepts_bare_statuses() {
        assert_eq!(aggregate([Status::Success, Status::Pending]), Status::Running);
    }

    #[test]
    fn concurrent_resolution_matches_sequential() {
        let jobs = vec![
            job(Status::Success),
            allowed(Status::Failed),
            job(Status::Canceled),
            job(Status::Skipped),
        ];
        let expected = aggregate(&jobs);

        let results: Vec<Status> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| aggregate(&jobs))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(expected, Status::Canceled);
        assert!(results.iter().all(|&status| status == expected));
    }

    fn any_job() -> impl Strategy<Value = JobDescriptor> {
        (proptest::sample::select(Status::ALL.to_vec()), any::<bool>()).prop_map(
            |(status, allow_failure)| JobDescriptor {
                status,
                allow_failure,
            },
        )
    }

    proptest! {
        #[test]
        fn order_does_not_change_aggregate(
            (jobs, shuffled) in proptest::collection::vec(any_job(), 0..12)
                .prop_flat_map(|jobs| (Just(jobs.clone()), Just(jobs).prop_shuffle()))
        ) {
            let expected = aggregate(&jobs);
            prop_assert_eq!(aggregate(&shuffled), expected);

            let mut reversed = jobs.clone();
            reversed.reverse();
            prop_assert_eq!(aggregate(&reversed), expected);
        }

        #[test]
        fn blocking_manual_always_surfaces(
            jobs in proptest::collection::vec(any_job(), 0..12)
        ) {
            let mut jobs = jobs;
            jobs.push(job(Status::Manual));
            prop_assert_eq!(aggregate(&jobs), Status::Manual);
        }

        #[test]
        fn cancelable_jobs_never_force_a_terminal_aggregate(
            statuses in proptest::collection::vec(
                proptest::sample::select(vec![Status::Created, Status::Pending, Status::Running]),
                1..8,
            )
        ) {
            prop_assert!(!aggregate(&statuses).is_completed());
        }
    }
}
