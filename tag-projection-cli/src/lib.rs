//! Batch tag projection over JSON job files
//!
//! Jobs are split into contiguous batches, each projected on its own scoped
//! thread. Outcomes come back in job order whatever the thread count.

pub mod error;
pub mod job;

pub use error::{CliError, CliResult};
pub use job::{AlignmentSpec, JobSpec, SentenceSpec, TagSpec, load_jobs, parse_jobs};

use serde::Serialize;
use std::thread;
use tag_projection::{Tag, project, render};

/// Which rendering of the projected translation to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_tags: bool,
    pub include_whitespace: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            include_tags: true,
            include_whitespace: true,
        }
    }
}

/// Result of one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Project and render a single job
pub fn run_job(index: usize, job: &JobSpec, options: RenderOptions) -> JobOutcome {
    let projected = job.to_translation().and_then(|mut translation| {
        project(&mut translation)?;
        Ok(translation)
    });

    match projected {
        Ok(translation) => JobOutcome {
            index,
            id: job.id.clone(),
            rendered: Some(render(
                &translation,
                options.include_tags,
                options.include_whitespace,
            )),
            tags: translation.tags().to_vec(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(index, error = %e, "job failed");
            JobOutcome {
                index,
                id: job.id.clone(),
                rendered: None,
                tags: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Run `jobs` on up to `threads` scoped worker threads
pub fn run_jobs(jobs: &[JobSpec], options: RenderOptions, threads: usize) -> Vec<JobOutcome> {
    if jobs.is_empty() {
        return Vec::new();
    }

    let batch_size = jobs.len().div_ceil(threads.max(1));
    tracing::debug!(jobs = jobs.len(), batch_size, "running jobs");

    thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .chunks(batch_size)
            .enumerate()
            .map(|(batch, chunk)| {
                scope.spawn(move || {
                    let offset = batch * batch_size;
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, job)| run_job(offset + i, job, options))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, alignment: &str) -> String {
        format!(
            r#"{{
                "id": "{}",
                "source": {{
                    "words": [
                        {{"text": "hello", "space_after": true}},
                        {{"text": "world"}},
                        {{"text": "!"}}
                    ],
                    "tags": [{{"text": "<b>", "anchor": 1}}, {{"text": "</b>", "anchor": 2}}]
                }},
                "target": [
                    {{"text": "ciao", "space_after": true}},
                    {{"text": "mondo"}},
                    {{"text": "!"}}
                ],
                "alignment": "{}"
            }}"#,
            id, alignment
        )
    }

    fn jobs(specs: &[(&str, &str)]) -> Vec<JobSpec> {
        let items: Vec<String> = specs.iter().map(|(id, a)| job(id, a)).collect();
        parse_jobs(&format!("[{}]", items.join(","))).unwrap()
    }

    #[test]
    fn test_run_job_renders_markup() {
        let jobs = jobs(&[("a", "0-0 1-1 2-2")]);
        let outcome = run_job(0, &jobs[0], RenderOptions::default());
        assert!(outcome.is_success());
        assert_eq!(outcome.rendered.as_deref(), Some("ciao <b>mondo</b>!"));
        assert_eq!(outcome.tags.len(), 2);
        assert_eq!(outcome.id.as_deref(), Some("a"));
    }

    #[test]
    fn test_run_job_plain() {
        let jobs = jobs(&[("a", "0-0 1-1 2-2")]);
        let options = RenderOptions {
            include_tags: false,
            include_whitespace: true,
        };
        let outcome = run_job(0, &jobs[0], options);
        assert_eq!(outcome.rendered.as_deref(), Some("ciao mondo !"));
    }

    #[test]
    fn test_run_job_reports_errors() {
        let jobs = jobs(&[("bad", "0-0 1-9")]);
        let outcome = run_job(3, &jobs[0], RenderOptions::default());
        assert!(!outcome.is_success());
        assert_eq!(outcome.index, 3);
        assert!(outcome.rendered.is_none());
        assert!(outcome.error.unwrap().contains("1-9"));
    }

    #[test]
    fn test_run_jobs_keeps_order_across_threads() {
        let specs: Vec<(String, &str)> = (0..7)
            .map(|i| {
                let alignment = if i % 2 == 0 { "0-0 1-1 2-2" } else { "0-1 1-0 2-2" };
                (format!("job-{}", i), alignment)
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = specs.iter().map(|(id, a)| (id.as_str(), *a)).collect();
        let jobs = jobs(&borrowed);

        for threads in [1, 2, 3, 16] {
            let outcomes = run_jobs(&jobs, RenderOptions::default(), threads);
            assert_eq!(outcomes.len(), 7);
            for (i, outcome) in outcomes.iter().enumerate() {
                assert_eq!(outcome.index, i);
                assert_eq!(outcome.id.as_deref(), Some(format!("job-{}", i).as_str()));
                let expected = if i % 2 == 0 {
                    "ciao <b>mondo</b>!"
                } else {
                    "<b>ciao</b> mondo!"
                };
                assert_eq!(outcome.rendered.as_deref(), Some(expected));
            }
        }
    }

    #[test]
    fn test_run_jobs_empty() {
        assert!(run_jobs(&[], RenderOptions::default(), 4).is_empty());
    }

    #[test]
    fn test_outcome_json() {
        let jobs = jobs(&[("a", "0-0 1-1 2-2")]);
        let outcome = run_job(0, &jobs[0], RenderOptions::default());
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["rendered"], "ciao <b>mondo</b>!");
        assert_eq!(value["tags"][1]["text"], "</b>");
        assert_eq!(value["tags"][1]["anchor"], 2);
        assert!(value.get("error").is_none());
    }
}
