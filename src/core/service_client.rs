// src/core/service_client.rs
//! HTTP client for the résumé analysis service

use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

use crate::app_log;
use crate::error::AnalyzerError;
use crate::projector::ingest;
use crate::types::{
    response::{HealthResponse, TrendsRequest, TrendsResponse},
    AnalysisResult,
};
use crate::utils::{content_type_for, display_file_name};

const ANALYZE_RESUME_ENDPOINT: &str = "/analyze-resume";
const INDUSTRY_TRENDS_ENDPOINT: &str = "/industry-trends";
const HEALTH_ENDPOINT: &str = "/health";

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

/// Analysis outcome plus the body it was parsed from, kept for `--save`.
#[derive(Debug)]
pub struct UploadResponse {
    pub result: AnalysisResult,
    pub body: serde_json::Value,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, AnalyzerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AnalyzerError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Read the file and post it as the `resume` multipart field.
    pub async fn analyze_resume(&self, file_path: &Path) -> Result<UploadResponse, AnalyzerError> {
        let file_content = tokio::fs::read(file_path).await.map_err(|e| {
            AnalyzerError::Validation(format!(
                "Failed to read file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let file_name = display_file_name(file_path);
        self.analyze_bytes(file_content, &file_name).await
    }

    pub async fn analyze_bytes(
        &self,
        file_content: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadResponse, AnalyzerError> {
        let url = self.url(ANALYZE_RESUME_ENDPOINT);
        let part = Part::bytes(file_content)
            .file_name(file_name.to_string())
            .mime_str(content_type_for(file_name))?;
        let form = Form::new().part(RESUME_FIELD, part);

        app_log!(info, "Calling resume analysis service: {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(error, "Analysis service error response: {}", error_text);
            return Err(AnalyzerError::Transport(format!(
                "service returned status {}",
                status
            )));
        }

        let response_text = response.text().await?;
        app_log!(debug, "Raw analysis response: {}", response_text);

        let body: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
            app_log!(warn, "Analysis response is not JSON: {}", e);
            AnalyzerError::Transport(format!("invalid JSON body: {}", e))
        })?;
        let result = ingest(body.clone())?;
        Ok(UploadResponse { result, body })
    }

    /// Fetch markdown industry trends for a skill set.
    pub async fn industry_trends(&self, skills: &[String]) -> Result<String, AnalyzerError> {
        let url = self.url(INDUSTRY_TRENDS_ENDPOINT);
        let payload = TrendsRequest {
            skills: skills.to_vec(),
        };

        app_log!(trace, "Calling industry trends service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AnalyzerError::TrendsFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(error, "Industry trends error {}: {}", status, error_text);
            return Err(AnalyzerError::TrendsFetch(format!(
                "service returned status {}",
                status
            )));
        }

        let trends: TrendsResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::TrendsFetch(format!("invalid trends body: {}", e)))?;

        trends
            .trends
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AnalyzerError::TrendsFetch("response had no trends".to_string()))
    }

    /// Service liveness probe.
    pub async fn health(&self) -> Result<HealthResponse, AnalyzerError> {
        let url = self.url(HEALTH_ENDPOINT);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::Transport(format!(
                "service returned status {}",
                status
            )));
        }

        Ok(response.json::<HealthResponse>().await?)
    }
}
