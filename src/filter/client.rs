use crate::error::FilterError;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct PredictBody<'a> {
    image: &'a str,
}

/// HTTP client for the API Gateway fronted inference proxy.
#[derive(Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl PredictionClient {
    /// `base_url` has no trailing `/`; `route` starts with one (e.g. `/predict`).
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        route: &str,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            url: format!("{base_url}{route}"),
            api_key: api_key.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One POST of a bare base64 image. Non-2xx answers are errors.
    pub async fn predict(&self, image_base64: &str) -> Result<Value, FilterError> {
        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .json(&PredictBody {
                image: image_base64,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FilterError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn posts_image_with_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .match_header("x-api-key", "secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"image": "AAA"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"prediction": {"label": "dog"}}).to_string())
            .create_async()
            .await;

        let client =
            PredictionClient::new(reqwest::Client::new(), &server.url(), "/predict", "secret");
        let result = client.predict("AAA").await.unwrap();

        assert_eq!(result, json!({"prediction": {"label": "dog"}}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/predict")
            .with_status(403)
            .with_body(r#"{"message":"Forbidden"}"#)
            .create_async()
            .await;

        let client = PredictionClient::new(reqwest::Client::new(), &server.url(), "/predict", "");
        let err = client.predict("AAA").await.unwrap_err();

        match err {
            FilterError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("Forbidden"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
