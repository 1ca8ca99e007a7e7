use crate::api::error::ApiError;
use crate::api::models::{
    AnomalyReport, AuthReply, AvailableRegions, AvailableYears, Comparison, Envelope, GrowthReport,
    InsightItem, InsightsReply, NightlightsData, NightlightsReply, RegionFolder,
};
use crate::api::ExplorerBackend;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the analytics backend. Keeps the session cookie between calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!(path, ?query, "GET");
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(path, &e))?;

        self.read(path, response).await
    }

    async fn post<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(path, &e))?;

        self.read(path, response).await
    }

    async fn read<T: DeserializeOwned>(&self, path: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(path, &e))?;

        decode_reply(status, &body).inspect_err(|e| warn!(path, status, error = %e, "request failed"))
    }

    fn transport_error(&self, path: &str, err: &reqwest::Error) -> ApiError {
        let error = ApiError::from_reqwest(err, self.timeout_secs);
        warn!(path, error = %error, "transport failure");
        error
    }
}

/// Turns a raw status + body into the expected payload or an [`ApiError`].
///
/// Non-2xx statuses become `Server`, carrying the body's `message` when it has
/// one. A 2xx body must parse and report `success: true`.
pub fn decode_reply<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<Envelope>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| format!("Server error: {status}"));
        return Err(ApiError::Server { status, message });
    }

    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Malformed(
            envelope
                .message
                .unwrap_or_else(|| "backend reported failure".to_string()),
        ));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Absolute URL of a static image served by the backend.
pub fn image_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/api/images/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    email: &'a str,
    otp: &'a str,
}

#[async_trait]
impl ExplorerBackend for ApiClient {
    async fn check_session(&self) -> Result<AuthReply, ApiError> {
        self.get("/api/auth/check-session", &[]).await
    }

    async fn send_otp(&self, email: &str) -> Result<AuthReply, ApiError> {
        self.post("/api/auth/send-otp", Some(&EmailBody { email }))
            .await
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthReply, ApiError> {
        self.post("/api/auth/verify-otp", Some(&VerifyBody { email, otp }))
            .await
    }

    async fn logout(&self) -> Result<AuthReply, ApiError> {
        self.post::<(), _>("/api/auth/logout", None).await
    }

    async fn nightlights(&self, year: i32, sample_rate: u32) -> Result<NightlightsData, ApiError> {
        let reply: NightlightsReply = self
            .get(
                &format!("/api/data/nightlights/{year}"),
                &[("sample_rate", sample_rate.to_string())],
            )
            .await?;
        Ok(reply.data)
    }

    async fn insights(
        &self,
        region: &str,
        year: i32,
        max_results: u32,
    ) -> Result<Vec<InsightItem>, ApiError> {
        let reply: InsightsReply = self
            .get(
                "/api/insights",
                &[
                    ("region", region.to_string()),
                    ("year", year.to_string()),
                    ("max_results", max_results.to_string()),
                ],
            )
            .await?;
        Ok(reply.insights)
    }

    async fn growth(
        &self,
        region: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<GrowthReport, ApiError> {
        self.get(
            "/api/analysis/growth",
            &[
                ("region", region.to_string()),
                ("start_year", start_year.to_string()),
                ("end_year", end_year.to_string()),
            ],
        )
        .await
    }

    async fn anomalies(&self, region: &str) -> Result<AnomalyReport, ApiError> {
        self.get("/api/analysis/anomalies", &[("region", region.to_string())])
            .await
    }

    async fn compare(&self, region: &str, year1: i32, year2: i32) -> Result<Comparison, ApiError> {
        self.get(
            "/api/compare",
            &[
                ("region", region.to_string()),
                ("year1", year1.to_string()),
                ("year2", year2.to_string()),
            ],
        )
        .await
    }

    async fn available_years(&self) -> Result<Vec<i32>, ApiError> {
        let reply: AvailableYears = self.get("/api/data/available-years", &[]).await?;
        Ok(reply.years)
    }

    async fn available_regions(&self) -> Result<Vec<RegionFolder>, ApiError> {
        let reply: AvailableRegions = self.get("/api/analysis/available-regions", &[]).await?;
        Ok(reply.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::InsightItem;

    #[test]
    fn non_success_status_carries_server_message() {
        let body = br#"{"success": false, "message": "No data found for year 1999"}"#;
        let err = decode_reply::<NightlightsReply>(404, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                message: "No data found for year 1999".to_string()
            }
        );
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status_text() {
        let err = decode_reply::<NightlightsReply>(502, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 502,
                message: "Server error: 502".to_string()
            }
        );
    }

    #[test]
    fn success_false_on_ok_status_is_malformed() {
        let body = br#"{"success": false, "message": "Region is required"}"#;
        let err = decode_reply::<InsightsReply>(200, body).unwrap_err();
        assert_eq!(err, ApiError::Malformed("Region is required".to_string()));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let body = br#"{"success": true}"#;
        let err = decode_reply::<NightlightsReply>(200, body).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn nightlights_payload_decodes() {
        let body = br#"{
            "success": true,
            "data": {
                "data_points": [{"lat": 11.0, "lon": 78.5, "value": 42.5}],
                "center": {"lat": 11.1, "lon": 78.6},
                "metadata": {"filename": "VNL_2020.tif", "statistics": {"min": 0, "max": 63.2}}
            }
        }"#;
        let reply = decode_reply::<NightlightsReply>(200, body).unwrap();
        assert_eq!(reply.data.data_points.len(), 1);
        assert_eq!(reply.data.center.map(|c| c.lat), Some(11.1));
        assert!((reply.data.max_value() - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn insights_accept_strings_and_objects() {
        let body = br#"{
            "success": true,
            "insights": [
                "Plain insight",
                {"text": "Detailed", "source": "Wikipedia", "url": "https://en.wikipedia.org"}
            ]
        }"#;
        let reply = decode_reply::<InsightsReply>(200, body).unwrap();
        assert_eq!(reply.insights[0], InsightItem::Text("Plain insight".to_string()));
        assert!(matches!(
            &reply.insights[1],
            InsightItem::Detailed { source: Some(source), .. } if source == "Wikipedia"
        ));
    }

    #[test]
    fn image_url_joins_without_double_slashes() {
        assert_eq!(
            image_url("http://localhost:5000/", "/cleaned/TN/2020_view.png"),
            "http://localhost:5000/api/images/cleaned/TN/2020_view.png"
        );
    }
}
