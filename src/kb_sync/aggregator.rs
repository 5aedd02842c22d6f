use super::clients::{IngestionStarter, ParameterSource};
use super::entry::IngestionEntry;
use super::result::IngestionResult;
use crate::error::SyncError;
use serde_json::Value;
use tracing::{error, info, warn};

/// Reason recorded for bare-string entries
pub const LEGACY_SKIP_REASON: &str = "legacy format without dataSourceId is not supported";

/// Error recorded for entries of unknown shape
pub const INVALID_FORMAT: &str = "invalid configuration format";

/// Fetches the configuration parameter and classifies every entry.
///
/// Any failure here is fatal for the whole batch.
pub async fn load_entries(
    params: &dyn ParameterSource,
    name: &str,
) -> Result<Vec<IngestionEntry>, SyncError> {
    info!(parameter = name, "Retrieving knowledge base entries");
    let raw = params.get_parameter(name).await?;
    parse_entries(&raw)
}

/// Parses the parameter value, which must be a JSON array.
pub fn parse_entries(raw: &str) -> Result<Vec<IngestionEntry>, SyncError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok(items.iter().map(IngestionEntry::from_value).collect()),
        _ => Err(SyncError::NotAList),
    }
}

/// Starts one ingestion job per entry, in order.
///
/// Never fails: every entry yields exactly one result and a failed start
/// does not stop the remaining entries.
pub async fn sync_knowledge_bases(
    entries: &[IngestionEntry],
    starter: &dyn IngestionStarter,
) -> Vec<IngestionResult> {
    let mut results = Vec::with_capacity(entries.len());

    for entry in entries {
        let result = match entry {
            IngestionEntry::Pair {
                knowledge_base_id,
                data_source_id,
            } => {
                info!(
                    knowledge_base_id = %knowledge_base_id,
                    data_source_id = %data_source_id,
                    "Starting ingestion job"
                );
                match starter
                    .start_ingestion_job(knowledge_base_id, Some(data_source_id))
                    .await
                {
                    Ok(job_id) => {
                        info!(
                            knowledge_base_id = %knowledge_base_id,
                            job_id = %job_id,
                            "Ingestion job started"
                        );
                        IngestionResult::started(knowledge_base_id, data_source_id, job_id)
                    }
                    Err(e) => {
                        error!(
                            knowledge_base_id = %knowledge_base_id,
                            "Error syncing knowledge base: {}", e
                        );
                        IngestionResult::error(
                            Some(knowledge_base_id),
                            Some(data_source_id),
                            e.to_string(),
                        )
                    }
                }
            }
            IngestionEntry::Legacy { knowledge_base_id } => {
                warn!(
                    knowledge_base_id = %knowledge_base_id,
                    "Skipping legacy entry without dataSourceId"
                );
                IngestionResult::skipped(knowledge_base_id, LEGACY_SKIP_REASON)
            }
            IngestionEntry::Invalid { knowledge_base_id } => {
                warn!(?knowledge_base_id, "Invalid knowledge base entry");
                IngestionResult::error(knowledge_base_id.as_deref(), None, INVALID_FORMAT)
            }
        };
        results.push(result);
    }

    results
}
