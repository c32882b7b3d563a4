use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::errors::ApiError;
use crate::api::types::{
    ActionResponse, EmailProcessingRequest, HumanInputReply, LeadSearchRequest, SdrRequest,
};
use crate::meetings::Meeting;
use crate::outreach::SdrSession;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Typed client for the RapidReach backend HTTP endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn start_lead_finding(&self, request: &LeadSearchRequest) -> Result<(), ApiError> {
        self.start("/start_lead_finding", request).await
    }

    pub async fn start_sdr(&self, request: &SdrRequest) -> Result<(), ApiError> {
        self.start("/start_sdr", request).await
    }

    pub async fn start_email_processing(
        &self,
        request: &EmailProcessingRequest,
    ) -> Result<(), ApiError> {
        self.start("/start_email_processing", request).await
    }

    /// Latest SDR session snapshot, in the order the server listed them.
    ///
    /// `None` when the response carries no `sessions` key; the caller keeps
    /// what it had. Entries that do not decode are skipped.
    pub async fn fetch_sdr_sessions(&self) -> Result<Option<Vec<SdrSession>>, ApiError> {
        let endpoint = "/api/sdr_sessions";
        let body: Value = self.get_json(endpoint).await?;

        let sessions = match body.get("sessions") {
            None | Some(Value::Null) => {
                debug!(event = "core.api.sessions_absent");
                return Ok(None);
            }
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(ApiError::InvalidResponse {
                    endpoint: endpoint.to_string(),
                    message: format!("'sessions' is not an object: {other}"),
                });
            }
        };

        let mut out = Vec::with_capacity(sessions.len());
        for (id, value) in sessions {
            match SdrSession::deserialize(value) {
                Ok(mut session) => {
                    session.id = id.clone();
                    out.push(session);
                }
                Err(e) => {
                    warn!(event = "core.api.session_skipped", session_id = %id, error = %e);
                }
            }
        }

        info!(event = "core.api.sessions_fetched", count = out.len());
        Ok(Some(out))
    }

    /// External meetings. A missing `meetings` key is an empty list.
    pub async fn fetch_meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        #[derive(Deserialize)]
        struct MeetingsBody {
            #[serde(default)]
            meetings: Option<Vec<Meeting>>,
        }

        let body: MeetingsBody = self.get_json("/api/meetings").await?;
        let meetings = body.meetings.unwrap_or_default();
        info!(event = "core.api.meetings_fetched", count = meetings.len());
        Ok(meetings)
    }

    /// Answer a human-input prompt. The acknowledgement body is not read.
    pub async fn respond_human_input(&self, reply: &HumanInputReply) -> Result<(), ApiError> {
        let endpoint = "/api/human-input/respond";
        info!(
            event = "core.api.human_input_started",
            request_id = %reply.request_id
        );
        self.http
            .post(self.url(endpoint))
            .json(reply)
            .send()
            .await?;
        info!(
            event = "core.api.human_input_completed",
            request_id = %reply.request_id
        );
        Ok(())
    }

    /// POST a workflow start and interpret the `{status, message}` reply.
    ///
    /// The body is read whatever the HTTP status: the backend reports
    /// refusals in the body.
    async fn start<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<(), ApiError> {
        info!(event = "core.api.start_started", endpoint = endpoint);

        let response = self.http.post(self.url(endpoint)).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let reply: ActionResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        if reply.is_error() {
            let message = reply.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            warn!(
                event = "core.api.start_rejected",
                endpoint = endpoint,
                http_status = status.as_u16(),
                message = %message
            );
            return Err(ApiError::Rejected { message });
        }

        info!(event = "core.api.start_completed", endpoint = endpoint);
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let text = self.http.get(self.url(endpoint)).send().await?.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri()).unwrap()
    }

    fn lead_request() -> LeadSearchRequest {
        LeadSearchRequest {
            city: "Austin".to_string(),
            max_results: 20,
            business_types: vec![],
            exclude_chains: true,
            min_rating: 0.0,
        }
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = ApiClient::new("ws://localhost:8000");
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/api/meetings"), "http://localhost:8000/api/meetings");
    }

    #[tokio::test]
    async fn test_start_lead_finding_sends_full_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start_lead_finding"))
            .and(body_json(json!({
                "city": "Austin",
                "max_results": 20,
                "business_types": [],
                "exclude_chains": true,
                "min_rating": 0.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .start_lead_finding(&lead_request())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_rejection_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start_sdr"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "status": "error",
                "message": "No phone number"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .start_sdr(&SdrRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { ref message } if message == "No phone number"));
    }

    #[tokio::test]
    async fn test_error_status_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start_email_processing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .start_email_processing(&EmailProcessingRequest { max_emails: 10 })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start_lead_finding"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .start_lead_finding(&lead_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        assert!(!err.is_rejection());
    }

    #[tokio::test]
    async fn test_fetch_sessions_keeps_server_order() {
        let server = MockServer::start().await;
        // Raw body so key order is exactly what the server wrote
        let body = r#"{"sessions": {
            "zeta": {"business_name": "Zeta Cafe", "call_outcome": "interested", "email_sent": true},
            "alpha": {"business_name": "Alpha Deli", "call_outcome": null, "email_sent": false}
        }}"#;
        Mock::given(method("GET"))
            .and(path("/api/sdr_sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let sessions = client(&server)
            .await
            .fetch_sdr_sessions()
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert!(sessions[0].has_positive_outcome());
    }

    #[tokio::test]
    async fn test_fetch_sessions_skips_undecodable_entry() {
        let server = MockServer::start().await;
        let body = r#"{"sessions": {
            "good": {"business_name": "Acme", "email_sent": true},
            "bad": {"business_name": "Beta", "email_sent": "yes"},
            "also_good": {"business_name": "Gamma", "email_sent": false}
        }}"#;
        Mock::given(method("GET"))
            .and(path("/api/sdr_sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let sessions = client(&server)
            .await
            .fetch_sdr_sessions()
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "also_good"]);
    }

    #[tokio::test]
    async fn test_fetch_sessions_without_key_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sdr_sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "db offline"})))
            .mount(&server)
            .await;

        let sessions = client(&server).await.fetch_sdr_sessions().await.unwrap();
        assert!(sessions.is_none());
    }

    #[tokio::test]
    async fn test_fetch_meetings_missing_key_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/meetings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let meetings = client(&server).await.fetch_meetings().await.unwrap();
        assert!(meetings.is_empty());
    }

    #[tokio::test]
    async fn test_respond_human_input_posts_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/human-input/respond"))
            .and(body_json(json!({"request_id": "r-1", "response": "yes"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .respond_human_input(&HumanInputReply {
                request_id: "r-1".to_string(),
                response: "yes".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_meetings().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
