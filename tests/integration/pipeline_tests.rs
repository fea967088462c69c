//! Question bank to results CSV

#[cfg(test)]
mod tests {
    use crate::common::fixtures::config_for;
    use crate::common::{BankFixture, ScriptedService};
    use cds_bias_lab::core::completion::ServiceError;
    use cds_bias_lab::core::dataset::{QuestionRange, Selection, VignetteType, load_questions};
    use cds_bias_lab::core::demographics::expand_work_items;
    use cds_bias_lab::core::export::{summarize_by_variant, write_results_file};
    use cds_bias_lab::{BatchCoordinator, BatchJob, JobStatus, PromptTemplate};
    use std::sync::Arc;

    fn read_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[tokio::test]
    async fn test_customized_range_runs_every_variant() {
        let bank_file = BankFixture::sample();
        let config = config_for("http://unused.invalid");

        let bank = load_questions(bank_file.path(), VignetteType::Customized, &config.dataset)
            .unwrap();
        let questions = bank
            .select(&Selection::Range(QuestionRange::new(1, 2)))
            .unwrap();
        let variants = config.demographics.select(&[]).unwrap();
        let items = expand_work_items(&questions, VignetteType::Customized, &variants).unwrap();
        assert_eq!(items.len(), 4);

        let service = Arc::new(ScriptedService::new());
        let coordinator = BatchCoordinator::new(service.clone(), config.batch.clone());
        let handle = coordinator
            .submit(BatchJob::new(items, PromptTemplate::passthrough("sys")))
            .unwrap();
        let snapshot = coordinator.wait(&handle).await.unwrap();
        assert_eq!(snapshot.status, JobStatus::Completed);

        let results = coordinator.discard(&handle).unwrap();
        let output = bank_file.output_path("results.csv");
        write_results_file(&output, &results).await.unwrap();

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 4);
        // submission order: question-major, then variant
        assert_eq!(&rows[0][0], "Q1");
        assert_eq!(&rows[0][5], "black-female");
        assert_eq!(
            &rows[0][1],
            "A Black woman presents with chest pain. What next?"
        );
        assert_eq!(&rows[1][0], "Q1");
        assert_eq!(&rows[1][5], "white-male");
        assert_eq!(&rows[3][0], "Q2");
        assert!(rows[3][2].starts_with("echo: A White man"));
        assert!(rows.iter().all(|r| r[3].is_empty()));

        let summary = summarize_by_variant(&results);
        assert_eq!(summary["black-female"].succeeded, 2);
        assert_eq!(summary["white-male"].succeeded, 2);
    }

    #[tokio::test]
    async fn test_baseline_ids_with_failures_in_error_column() {
        let bank_file = BankFixture::sample();
        let config = config_for("http://unused.invalid");

        let bank =
            load_questions(bank_file.path(), VignetteType::Baseline, &config.dataset).unwrap();
        let questions = bank
            .select(&Selection::Ids(vec!["Q3".into(), "Q1".into()]))
            .unwrap();
        let items = expand_work_items(&questions, VignetteType::Baseline, &[]).unwrap();

        let service = Arc::new(
            ScriptedService::new()
                .answer("A patient presents with chest pain. What next?", "B")
                .fail(
                    "A patient presents with fever. What next?",
                    ServiceError::invalid_request("context length exceeded"),
                ),
        );
        let coordinator = BatchCoordinator::new(service.clone(), config.batch.clone());
        let handle = coordinator
            .submit(BatchJob::new(items, PromptTemplate::passthrough("sys")))
            .unwrap();
        coordinator.wait(&handle).await.unwrap();

        let results = coordinator.discard(&handle).unwrap();
        let output = bank_file.output_path("nested/baseline.csv");
        write_results_file(&output, &results).await.unwrap();

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Q3");
        assert_eq!(&rows[0][2], "");
        assert!(rows[0][3].contains("context length exceeded"));
        assert_eq!(&rows[0][6], "1");
        assert_eq!(&rows[1][0], "Q1");
        assert_eq!(&rows[1][2], "B");
        assert_eq!(&rows[1][5], "");
        // invalid requests are not retried
        assert_eq!(service.calls(), 2);
    }

    #[test]
    fn test_customized_bank_without_values_fails_expansion() {
        let bank_file = BankFixture::sample();
        let config = config_for("http://unused.invalid");
        let bank = load_questions(bank_file.path(), VignetteType::Customized, &config.dataset)
            .unwrap();

        let partial = vec![
            cds_bias_lab::DemographicVariant::new("race-only").with_value("race", "Asian"),
        ];
        let err =
            expand_work_items(bank.questions(), VignetteType::Customized, &partial).unwrap_err();
        assert!(err.to_string().contains("gender"));
    }
}
