use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::{
    DraftReply, DraftRequest, ExtractedResume, ResumeUpload, ScoreReport, ServiceError,
    ServiceFailure, ServiceSettings,
};

/// Extraction collaborator: resume document in, plain text out.
#[async_trait::async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, upload: ResumeUpload) -> Result<ExtractedResume, ServiceError>;
}

/// Scoring collaborator: both texts in, skill-match report out.
#[async_trait::async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoreReport, ServiceError>;
}

/// Generation collaborator: texts plus style parameters in, draft out.
#[async_trait::async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn generate(&self, request: &DraftRequest) -> Result<DraftReply, ServiceError>;
}

/// All three collaborators over one shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpCollaborators {
    client: reqwest::Client,
    settings: ServiceSettings,
}

impl HttpCollaborators {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(ServiceFailure::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url.trim_end_matches('/'))
    }
}

#[derive(Deserialize)]
struct ExtractWire {
    #[serde(default)]
    filename: String,
    extracted_text: String,
}

#[derive(Serialize)]
struct ScoreRequestWire<'a> {
    resume_data: &'a str,
    jd_data: &'a str,
}

// Field names are the scoring service's, verbatim. Anything it leaves out
// decodes as empty rather than failing, so the caller always gets a
// renderable report.
#[derive(Deserialize, Default)]
struct ScoreWire {
    #[serde(rename = "Resume ATS Score", default)]
    score: f64,
    #[serde(rename = "Matched Keywords", default)]
    matched: Vec<String>,
    #[serde(rename = "Missing Keywords", default)]
    missing: Vec<String>,
}

#[derive(Deserialize, Default)]
struct DraftWire {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait::async_trait]
impl ResumeExtractor for HttpCollaborators {
    async fn extract(&self, upload: ResumeUpload) -> Result<ExtractedResume, ServiceError> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.media_type)
            .map_err(|err| {
                ServiceError::new(
                    ServiceFailure::InvalidRequest,
                    format!("bad media type: {err}"),
                )
            })?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload_resume/"))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = require_success(response).await?;

        let wire: ExtractWire = response
            .json()
            .await
            .map_err(|err| ServiceError::new(ServiceFailure::InvalidResponse, err.to_string()))?;
        Ok(ExtractedResume {
            file_name: wire.filename,
            text: wire.extracted_text,
        })
    }
}

#[async_trait::async_trait]
impl MatchScorer for HttpCollaborators {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoreReport, ServiceError> {
        let body = ScoreRequestWire {
            resume_data: resume_text,
            jd_data: job_description,
        };
        let response = self
            .client
            .post(self.endpoint("score_resume/"))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = require_success(response).await?;

        let wire: ScoreWire = response
            .json()
            .await
            .map_err(|err| ServiceError::new(ServiceFailure::InvalidResponse, err.to_string()))?;
        Ok(ScoreReport {
            raw_score: wire.score,
            matched_skills: wire.matched,
            missing_skills: wire.missing,
        })
    }
}

#[async_trait::async_trait]
impl DraftGenerator for HttpCollaborators {
    async fn generate(&self, request: &DraftRequest) -> Result<DraftReply, ServiceError> {
        let form = Form::new()
            .text("resume_data", request.resume_text.clone())
            .text("jd_data", request.job_description.clone())
            .text("tone", request.tone.clone())
            .text("max_chars", request.max_chars.to_string())
            .text("message_type", request.message_type.clone());

        let response = self
            .client
            .post(self.endpoint("generate_email/"))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = require_success(response).await?;

        let wire: DraftWire = response
            .json()
            .await
            .map_err(|err| ServiceError::new(ServiceFailure::InvalidResponse, err.to_string()))?;
        match (wire.error, wire.email) {
            // An error payload is a definitive answer, not a failure.
            (Some(error), _) => Ok(DraftReply::ServiceNote(error)),
            (None, Some(email)) => Ok(DraftReply::Message(email)),
            (None, None) => Err(ServiceError::new(
                ServiceFailure::InvalidResponse,
                "response carried neither email nor error",
            )),
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(ServiceFailure::Timeout, err.to_string());
    }
    ServiceError::new(ServiceFailure::Network, err.to_string())
}

async fn require_success(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    };
    Err(ServiceError::new(
        ServiceFailure::Status(status.as_u16()),
        message,
    ))
}
