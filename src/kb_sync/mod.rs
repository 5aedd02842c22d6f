//! Scheduled Bedrock knowledge base sync.
//!
//! Reads the list of knowledge base entries from Parameter Store and starts
//! one ingestion job per entry.

pub mod aggregator;
pub mod clients;
pub mod entry;
pub mod handler;
pub mod result;

pub use aggregator::{load_entries, parse_entries, sync_knowledge_bases};
pub use clients::{BedrockIngestion, IngestionStarter, ParameterSource, SsmParameters};
pub use entry::IngestionEntry;
pub use handler::{function_handler, SyncResponse, SyncService};
pub use result::{IngestionResult, IngestionStatus};

#[cfg(test)]
pub(crate) mod testing {
    use super::clients::{IngestionStarter, ParameterSource};
    use crate::error::SyncError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Parameter store double returning a fixed value or failing
    pub struct FakeParameters {
        value: Option<String>,
    }

    impl FakeParameters {
        pub fn with_value(value: impl Into<String>) -> Self {
            Self {
                value: Some(value.into()),
            }
        }

        pub fn failing() -> Self {
            Self { value: None }
        }
    }

    #[async_trait]
    impl ParameterSource for FakeParameters {
        async fn get_parameter(&self, name: &str) -> Result<String, SyncError> {
            self.value.clone().ok_or_else(|| SyncError::ParameterFetch {
                name: name.to_string(),
                reason: "ParameterNotFound".to_string(),
            })
        }
    }

    /// Ingestion double that records calls and fails for chosen ids
    #[derive(Default)]
    pub struct FakeStarter {
        failing: Vec<String>,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl FakeStarter {
        pub fn failing_for(ids: &[&str]) -> Self {
            Self {
                failing: ids.iter().map(|id| id.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IngestionStarter for FakeStarter {
        async fn start_ingestion_job(
            &self,
            knowledge_base_id: &str,
            data_source_id: Option<&str>,
        ) -> Result<String, SyncError> {
            self.calls.lock().unwrap().push((
                knowledge_base_id.to_string(),
                data_source_id.map(str::to_string),
            ));
            if self.failing.iter().any(|id| id == knowledge_base_id) {
                return Err(SyncError::IngestionStart(format!(
                    "AccessDenied for {knowledge_base_id}"
                )));
            }
            Ok(format!("job-{knowledge_base_id}"))
        }
    }
}
