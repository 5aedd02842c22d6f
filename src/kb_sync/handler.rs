use super::aggregator::{load_entries, sync_knowledge_bases};
use super::clients::{IngestionStarter, ParameterSource};
use super::result::IngestionResult;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Lambda proxy style response: status code plus a JSON encoded body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub status_code: u16,
    pub body: String,
}

#[derive(Serialize)]
struct SyncSummary<'a> {
    message: String,
    results: &'a [IngestionResult],
}

#[derive(Serialize)]
struct SyncFailure {
    message: &'static str,
    error: String,
}

/// Collaborators and settings shared by every invocation
pub struct SyncService {
    params: Arc<dyn ParameterSource>,
    starter: Arc<dyn IngestionStarter>,
    parameter_name: String,
}

impl SyncService {
    pub fn new(
        params: Arc<dyn ParameterSource>,
        starter: Arc<dyn IngestionStarter>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            params,
            starter,
            parameter_name: parameter_name.into(),
        }
    }

    /// Runs one sync pass. Every path produces a response.
    pub async fn run(&self) -> Result<SyncResponse, serde_json::Error> {
        let entries = match load_entries(self.params.as_ref(), &self.parameter_name).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error in sync process: {}", e);
                let body = serde_json::to_string(&SyncFailure {
                    message: "Error in knowledge base sync process",
                    error: e.to_string(),
                })?;
                return Ok(SyncResponse {
                    status_code: 500,
                    body,
                });
            }
        };
        info!("Retrieved {} knowledge base entries", entries.len());

        let results = sync_knowledge_bases(&entries, self.starter.as_ref()).await;

        let body = serde_json::to_string(&SyncSummary {
            message: format!(
                "Knowledge base sync process completed for {} knowledge bases",
                entries.len()
            ),
            results: &results,
        })?;

        Ok(SyncResponse {
            status_code: 200,
            body,
        })
    }
}

/// Lambda handler function.
///
/// Invoked by the EventBridge schedule; the event payload carries nothing
/// the sync needs and is only logged.
pub async fn function_handler(
    service: Arc<SyncService>,
    event: LambdaEvent<Value>,
) -> Result<SyncResponse, Error> {
    info!(request_id = %event.context.request_id, payload = %event.payload, "Sync triggered");
    Ok(service.run().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb_sync::testing::{FakeParameters, FakeStarter};
    use lambda_runtime::Context;
    use serde_json::json;

    fn service(params: FakeParameters, starter: Arc<FakeStarter>) -> Arc<SyncService> {
        Arc::new(SyncService::new(
            Arc::new(params),
            starter,
            "/bedrock/kb/autosync/ids",
        ))
    }

    fn body(resp: &SyncResponse) -> Value {
        serde_json::from_str(&resp.body).unwrap()
    }

    #[tokio::test]
    async fn reports_every_entry_with_200_even_on_partial_failure() {
        let params = FakeParameters::with_value(
            json!([
                {"knowledgeBaseId": "kb-1", "dataSourceId": "ds-1"},
                {"knowledgeBaseId": "kb-2", "dataSourceId": "ds-2"}
            ])
            .to_string(),
        );
        let starter = Arc::new(FakeStarter::failing_for(&["kb-2"]));

        let event = LambdaEvent::new(json!({"source": "aws.events"}), Context::default());
        let resp = function_handler(service(params, starter), event)
            .await
            .unwrap();

        assert_eq!(resp.status_code, 200);
        let body = body(&resp);
        assert_eq!(
            body["message"],
            "Knowledge base sync process completed for 2 knowledge bases"
        );
        assert_eq!(body["results"][0]["status"], "started");
        assert_eq!(body["results"][1]["status"], "error");
        assert_eq!(body["results"][1]["error"], "AccessDenied for kb-2");
    }

    #[tokio::test]
    async fn unreadable_parameter_is_a_single_500() {
        let starter = Arc::new(FakeStarter::default());
        let resp = service(FakeParameters::failing(), starter.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(resp.status_code, 500);
        let body = body(&resp);
        assert_eq!(body["message"], "Error in knowledge base sync process");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("/bedrock/kb/autosync/ids"));
        assert!(body.get("results").is_none());
        assert!(starter.calls().is_empty());
    }

    #[tokio::test]
    async fn unparseable_parameter_is_a_single_500() {
        let starter = Arc::new(FakeStarter::default());
        let resp = service(FakeParameters::with_value("kb-1,kb-2"), starter)
            .run()
            .await
            .unwrap();

        assert_eq!(resp.status_code, 500);
    }

    #[test]
    fn response_uses_lambda_proxy_field_names() {
        let resp = SyncResponse {
            status_code: 200,
            body: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"statusCode": 200, "body": "{}"})
        );
    }
}
