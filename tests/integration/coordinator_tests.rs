//! Coordinator integration tests
//!
//! Exercises submit/poll/cancel/results through the crate's public surface
//! on a multi-threaded runtime.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::fast_batch;
    use crate::common::{ScriptedService, UnreachableService};
    use cds_bias_lab::core::completion::ServiceError;
    use cds_bias_lab::{BatchCoordinator, BatchJob, JobStatus, LabError, PromptTemplate, WorkItem};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn numbered(count: usize) -> Vec<WorkItem> {
        (1..=count)
            .map(|n| WorkItem::new(format!("{}", n), format!("Q{}", n)))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_item_gets_exactly_one_result() {
        let service = Arc::new(ScriptedService::new());
        let coordinator = BatchCoordinator::new(service.clone(), fast_batch(8, 2));
        let job = BatchJob::new(numbered(200), PromptTemplate::passthrough("sys"));

        let handle = coordinator.submit(job).unwrap();
        let snapshot = coordinator.wait(&handle).await.unwrap();

        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(snapshot.completed, 200);
        assert_eq!(service.calls(), 200);

        let results = coordinator.results(&handle).unwrap();
        let sequences: HashSet<usize> = results.iter().map(|r| r.sequence()).collect();
        assert_eq!(sequences.len(), 200);
        assert!(results.iter().all(|r| r.attempts() == 1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_two_item_example() {
        let service = Arc::new(ScriptedService::new().answer("Q1", "A1").answer("Q2", "A2"));
        let coordinator = BatchCoordinator::new(service, fast_batch(2, 3));
        let job = BatchJob::new(
            vec![WorkItem::new("1", "Q1"), WorkItem::new("2", "Q2")],
            PromptTemplate::passthrough("sys"),
        );

        let handle = coordinator.submit(job).unwrap();
        coordinator.wait(&handle).await.unwrap();

        let mut results = coordinator.results(&handle).unwrap();
        results.sort_by_key(|r| r.sequence());
        let rows: Vec<(&str, Option<&str>, bool)> = results
            .iter()
            .map(|r| (r.id(), r.response(), r.error().is_some()))
            .collect();
        assert_eq!(rows, vec![("1", Some("A1"), false), ("2", Some("A2"), false)]);
        assert_eq!(
            coordinator.poll(&handle).unwrap().status,
            JobStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_failing_item_does_not_stop_batch() {
        let service = Arc::new(
            ScriptedService::new()
                .answer("Q1", "A1")
                .fail("Q2", ServiceError::server(500, "internal")),
        );
        let coordinator = BatchCoordinator::new(service.clone(), fast_batch(1, 3));
        let job = BatchJob::new(numbered(3), PromptTemplate::passthrough("sys"));

        let handle = coordinator.submit(job).unwrap();
        let snapshot = coordinator.wait(&handle).await.unwrap();

        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(snapshot.succeeded, 2);
        assert_eq!(snapshot.failed, 1);
        // one call each for Q1 and Q3, three for Q2
        assert_eq!(service.calls(), 5);

        let failed: Vec<_> = coordinator
            .results(&handle)
            .unwrap()
            .into_iter()
            .filter(|r| !r.is_success())
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id(), "2");
        assert!(failed[0].response().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_marks_job_failed() {
        let service = Arc::new(UnreachableService::default());
        let coordinator = BatchCoordinator::new(service.clone(), fast_batch(2, 2));
        let job = BatchJob::new(numbered(4), PromptTemplate::passthrough("sys"));

        let handle = coordinator.submit(job).unwrap();
        let snapshot = coordinator.wait(&handle).await.unwrap();

        assert_eq!(snapshot.status, JobStatus::Failed);
        assert_eq!(snapshot.failed, 4);
        assert_eq!(service.calls(), 8);
    }

    #[tokio::test]
    async fn test_template_is_applied_to_every_item() {
        let service = Arc::new(ScriptedService::new());
        let coordinator = BatchCoordinator::new(service.clone(), fast_batch(1, 1));
        let template = PromptTemplate::new("You are a physician.", "Question:\n{question}\nAnswer:");
        let job = BatchJob::new(numbered(2), template);

        let handle = coordinator.submit(job).unwrap();
        coordinator.wait(&handle).await.unwrap();

        let seen = service.seen();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(system, _)| system == "You are a physician."));
        assert!(seen.iter().any(|(_, user)| user == "Question:\nQ1\nAnswer:"));
    }

    #[tokio::test]
    async fn test_jobs_are_isolated() {
        let coordinator = BatchCoordinator::new(Arc::new(ScriptedService::new()), fast_batch(2, 1));
        let first = coordinator
            .submit(BatchJob::new(numbered(3), PromptTemplate::passthrough("sys")))
            .unwrap();
        let second = coordinator
            .submit(BatchJob::new(numbered(5), PromptTemplate::passthrough("sys")))
            .unwrap();

        assert_eq!(coordinator.list().len(), 2);
        assert_eq!(coordinator.wait(&first).await.unwrap().total, 3);
        assert_eq!(coordinator.wait(&second).await.unwrap().total, 5);
        assert_eq!(coordinator.active_jobs(), 0);

        coordinator.discard(&first).unwrap();
        assert!(matches!(
            coordinator.results(&first),
            Err(LabError::JobNotFound(_))
        ));
        assert_eq!(coordinator.results(&second).unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_job_rejected_without_registration() {
        let coordinator = BatchCoordinator::new(Arc::new(ScriptedService::new()), fast_batch(2, 1));
        let err = coordinator
            .submit(BatchJob::new(Vec::new(), PromptTemplate::default()))
            .unwrap_err();

        assert!(matches!(err, LabError::InvalidJob(_)));
        assert!(err.is_caller_error());
        assert!(coordinator.list().is_empty());
    }
}
