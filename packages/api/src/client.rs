//! HTTP side of the mood backend.

use mood::config::BackendConfig;
use mood::{HistoryEntry, Identity, MoodRecord};
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

use crate::error::ApiError;
use crate::realtime::RealtimeClient;

const START_DETECTION: &str = "/start-mood-detection";
const MOOD_TRACK: &str = "/mood-track";
const MOOD_HISTORY: &str = "/mood-history";

/// Stateless handle to the backend; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl PartialEq for BackendClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Ask the backend to start its detection loop. No body.
    pub async fn start_mood_detection(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.config.endpoint(START_DETECTION))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(START_DETECTION, response)?;
        Ok(())
    }

    /// Persist one detected mood.
    pub async fn track_mood(&self, record: &MoodRecord) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.config.endpoint(MOOD_TRACK))
            .json(record)
            .send()
            .await?;
        ensure_success(MOOD_TRACK, response)?;
        tracing::info!(mood = %record.mood, "mood recorded");
        Ok(())
    }

    /// Every stored mood for `identity`, oldest first.
    pub async fn mood_history(&self, identity: &Identity) -> Result<Vec<HistoryEntry>, ApiError> {
        let response = self
            .http
            .get(self.config.endpoint(MOOD_HISTORY))
            .query(&[("name", identity.name.as_str()), ("age", identity.age.as_str())])
            .send()
            .await?;
        let body = ensure_success(MOOD_HISTORY, response)?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Open the realtime channel on the same host.
    pub fn realtime(&self) -> Result<RealtimeClient, ApiError> {
        RealtimeClient::connect(&self.config.realtime_url()?)
    }
}

fn ensure_success(endpoint: &'static str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            endpoint,
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mood::Mood;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(BackendConfig {
            url: server.uri(),
            ..BackendConfig::default()
        })
    }

    fn record(mood: Mood) -> MoodRecord {
        let at = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        MoodRecord::new(&Identity::new("Ada", "36"), mood, at)
    }

    #[tokio::test]
    async fn test_track_mood_posts_record_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mood-track"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "name": "Ada",
                "age": "36",
                "mood": "happy",
                "time": "2024-01-02T00:00:00.000Z",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).track_mood(&record(Mood::Happy)).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mood-track"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).track_mood(&record(Mood::Sad)).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { endpoint: "/mood-track", status: 500 }));
    }

    #[tokio::test]
    async fn test_history_sends_encoded_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mood-history"))
            .and(query_param("name", "Ada & L"))
            .and(query_param("age", "36"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"mood": "sad", "time": "2024-01-01T00:00:00Z"},
                {"mood": "happy", "time": "2024-01-02T00:00:00Z"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let history = client_for(&server)
            .mood_history(&Identity::new("Ada & L", "36"))
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[1].mood, "happy");
    }

    #[tokio::test]
    async fn test_malformed_history_is_a_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mood-history"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .mood_history(&Identity::new("Ada", "36"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[tokio::test]
    async fn test_start_detection_posts_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start-mood-detection"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).start_mood_detection().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    #[test]
    fn test_realtime_url_comes_from_config() {
        let client = BackendClient::new(BackendConfig::default());
        let realtime = client.realtime().unwrap();
        assert!(!realtime.is_connected());
    }
}
