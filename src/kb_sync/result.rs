use serde::Serialize;

/// Outcome of one configuration entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionStatus {
    Started,
    Error,
    Skipped,
}

/// Per-entry record returned by the sync handler.
///
/// Built once through one of the constructors and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_id: Option<String>,
    pub status: IngestionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl IngestionResult {
    pub fn started(knowledge_base_id: &str, data_source_id: &str, job_id: String) -> Self {
        Self {
            knowledge_base_id: Some(knowledge_base_id.to_string()),
            data_source_id: Some(data_source_id.to_string()),
            status: IngestionStatus::Started,
            job_id: Some(job_id),
            error: None,
            reason: None,
        }
    }

    pub fn error(
        knowledge_base_id: Option<&str>,
        data_source_id: Option<&str>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.map(str::to_string),
            data_source_id: data_source_id.map(str::to_string),
            status: IngestionStatus::Error,
            job_id: None,
            error: Some(error.into()),
            reason: None,
        }
    }

    pub fn skipped(knowledge_base_id: &str, reason: impl Into<String>) -> Self {
        Self {
            knowledge_base_id: Some(knowledge_base_id.to_string()),
            data_source_id: None,
            status: IngestionStatus::Skipped,
            job_id: None,
            error: None,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_only_present_fields() {
        let started = IngestionResult::started("kb-2", "ds-1", "job-9".into());
        assert_eq!(
            serde_json::to_value(&started).unwrap(),
            json!({
                "knowledgeBaseId": "kb-2",
                "dataSourceId": "ds-1",
                "status": "started",
                "jobId": "job-9"
            })
        );

        let skipped = IngestionResult::skipped("kb-1", "legacy");
        assert_eq!(
            serde_json::to_value(&skipped).unwrap(),
            json!({"knowledgeBaseId": "kb-1", "status": "skipped", "reason": "legacy"})
        );

        let invalid = IngestionResult::error(None, None, "invalid configuration format");
        assert_eq!(
            serde_json::to_value(&invalid).unwrap(),
            json!({"status": "error", "error": "invalid configuration format"})
        );
    }
}
