//! Configuration file loading

#[cfg(test)]
mod tests {
    use cds_bias_lab::config::{Config, LogFormat};
    use cds_bias_lab::LabError;

    const YAML: &str = r#"
provider:
  model: gpt-4o
  temperature: 0.2
batch:
  retry:
    base_delay_ms: 250
dataset:
  id_column: question_id
  catalog:
    cardiology: data/cardiology.csv
demographics:
  variants:
    - label: hispanic-female
      values:
        race: Hispanic
        gender: woman
prompts:
  system_message: You are a cautious clinician.
  user_template: "{question}\nAnswer with a single letter."
logging:
  format: json
"#;

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cds-bias.yaml");
        std::fs::write(&path, YAML).unwrap();

        let config = Config::from_file(&path).await.unwrap();
        assert_eq!(config.dataset.id_column, "question_id");
        assert_eq!(config.dataset.baseline_column, "full_qa_no_demo");
        assert!(config.dataset.resolve_category("cardiology").is_some());
        assert_eq!(config.batch.retry.base_delay_ms, 250);
        assert_eq!(config.demographics.variants.len(), 1);
        assert_eq!(config.prompts.system_message, "You are a cautious clinician.");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, LabError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_values_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "prompts:\n  system_message: \"\"\n").unwrap();

        let err = Config::from_file(&path).await.unwrap_err();
        assert!(matches!(err, LabError::Config(ref msg) if msg.contains("Prompt")));
    }
}
