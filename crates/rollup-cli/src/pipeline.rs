//! Pipeline document: stages of heterogeneous job records.

use serde::{Deserialize, Serialize};

use rollup_core::{DescribeJob, JobDescriptor, ResolverConfig, Scope, Status, StatusResolver, Tally};

/// A build job run by the pipeline itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildJob {
    pub name: String,
    pub status: Status,
    #[serde(default)]
    pub allow_failure: bool,
}

/// A status reported by an external system (e.g. a third-party check).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenericStatus {
    pub name: String,
    pub state: Status,
    #[serde(default)]
    pub allow_failure: bool,
}

impl DescribeJob for BuildJob {
    fn descriptor(&self) -> JobDescriptor {
        JobDescriptor {
            status: self.status,
            allow_failure: self.allow_failure,
        }
    }
}

impl DescribeJob for GenericStatus {
    fn descriptor(&self) -> JobDescriptor {
        JobDescriptor {
            status: self.state,
            allow_failure: self.allow_failure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobRecord {
    Build(BuildJob),
    GenericStatus(GenericStatus),
}

impl JobRecord {
    pub fn name(&self) -> &str {
        match self {
            JobRecord::Build(job) => &job.name,
            JobRecord::GenericStatus(job) => &job.name,
        }
    }
}

impl DescribeJob for JobRecord {
    fn descriptor(&self) -> JobDescriptor {
        match self {
            JobRecord::Build(job) => job.descriptor(),
            JobRecord::GenericStatus(job) => job.descriptor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub resolver: ResolverConfig,
    pub stages: Vec<Stage>,
}

impl Pipeline {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn jobs(&self) -> impl Iterator<Item = (&Stage, &JobRecord)> {
        self.stages
            .iter()
            .flat_map(|stage| stage.jobs.iter().map(move |job| (stage, job)))
    }

    /// Status of every stage plus the pipeline as a whole.
    pub fn report(&self, resolver: &StatusResolver) -> PipelineReport {
        let mut overall = Tally::new();
        let stages = self
            .stages
            .iter()
            .map(|stage| {
                let tally: Tally = stage.jobs.iter().collect();
                overall = overall.merge(tally);
                StageReport {
                    name: stage.name.clone(),
                    status: resolver.resolve_tally(&tally),
                    jobs: tally.total,
                }
            })
            .collect();

        PipelineReport {
            status: resolver.resolve_tally(&overall),
            stages,
        }
    }

    /// `stage/job` names of the jobs in `scope`.
    pub fn select(&self, scope: Scope) -> Vec<String> {
        self.jobs()
            .filter(|(_, job)| scope.matches(job))
            .map(|(stage, job)| format!("{}/{}", stage.name, job.name()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub name: String,
    pub status: Status,
    pub jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub status: Status,
    pub stages: Vec<StageReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOCUMENT: &str = r#"{
        "stages": [
            {
                "name": "build",
                "jobs": [
                    {"kind": "build", "name": "compile", "status": "success"},
                    {"kind": "generic_status", "name": "ci/lint", "state": "failed", "allow_failure": true}
                ]
            },
            {
                "name": "test",
                "jobs": [
                    {"kind": "build", "name": "unit", "status": "running"},
                    {"kind": "build", "name": "flaky", "status": "canceled"}
                ]
            },
            {
                "name": "deploy",
                "jobs": [
                    {"kind": "build", "name": "production", "status": "manual"}
                ]
            },
            {"name": "cleanup"}
        ]
    }"#;

    fn pipeline() -> Pipeline {
        Pipeline::from_json(DOCUMENT).unwrap()
    }

    #[test]
    fn parses_both_job_kinds() {
        let pipeline = pipeline();
        assert_eq!(pipeline.stages.len(), 4);
        assert_eq!(pipeline.resolver, ResolverConfig::default());
        assert!(matches!(
            &pipeline.stages[0].jobs[1],
            JobRecord::GenericStatus(GenericStatus { state: Status::Failed, allow_failure: true, .. })
        ));
    }

    #[test]
    fn reports_each_stage_and_the_pipeline() {
        let report = pipeline().report(&StatusResolver::default());
        let stages: Vec<(&str, Status)> = report
            .stages
            .iter()
            .map(|stage| (stage.name.as_str(), stage.status))
            .collect();

        assert_eq!(
            stages,
            vec![
                ("build", Status::Success),
                ("test", Status::Running),
                ("deploy", Status::Manual),
                ("cleanup", Status::Skipped),
            ]
        );
        assert_eq!(report.status, Status::Manual);
    }

    #[test]
    fn empty_stage_follows_resolver_config() {
        let resolver = StatusResolver::builder()
            .empty_status(Status::Created)
            .build()
            .unwrap();
        let report = pipeline().report(&resolver);
        assert_eq!(report.stages[3].status, Status::Created);
        assert_eq!(report.stages[3].jobs, 0);
    }

    #[rstest]
    #[case::cancelable(Scope::Cancelable, vec!["test/unit"])]
    #[case::finished(Scope::Finished, vec!["build/compile", "build/ci/lint", "test/flaky"])]
    #[case::manual(Scope::Manual, vec!["deploy/production"])]
    #[case::failed_but_allowed(Scope::FailedButAllowed, vec!["build/ci/lint"])]
    fn selects_jobs_by_scope(#[case] scope: Scope, #[case] expected: Vec<&str>) {
        assert_eq!(pipeline().select(scope), expected);
    }

    #[test]
    fn rejects_unknown_status_in_document() {
        let doc = r#"{"stages":[{"name":"s","jobs":[{"kind":"build","name":"j","status":"bogus"}]}]}"#;
        assert!(Pipeline::from_json(doc).is_err());
    }

    #[test]
    fn reads_resolver_section() {
        let doc = r#"{"resolver":{"empty_status":"success"},"stages":[]}"#;
        let pipeline = Pipeline::from_json(doc).unwrap();
        assert_eq!(pipeline.resolver.empty_status, Status::Success);
    }
}
