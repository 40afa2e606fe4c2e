use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::{
    AdminAccount, Credentials, Enrollment, EnrollmentId, LoginGrant, RegistrationDetail,
    RegistrationId, RegistrationSummary, SignupReceipt, TeacherAccount, VerificationVerdict,
};
use crate::reports::ReportPayload;
use crate::session::Session;

use super::endpoints::Endpoint;
use super::error::{extract_message, ApiError};
use super::gateway::{AdminGateway, ReportDownload};

/// reqwest-backed gateway. The session is fixed at construction; signing in or
/// out means building a new gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig, session: Option<Session>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::InvalidRequest(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn url_for(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidRequest(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    fn request(&self, endpoint: &Endpoint) -> Result<RequestBuilder, ApiError> {
        let url = self.url_for(endpoint)?;
        let builder = self.client.request(endpoint.method(), url);

        if endpoint.requires_auth() {
            let session = self.session.as_ref().ok_or(ApiError::Unauthenticated)?;
            return Ok(builder.bearer_auth(session.token().expose()));
        }
        Ok(builder)
    }

    async fn send(&self, endpoint: &Endpoint, builder: RequestBuilder) -> Result<Response, ApiError> {
        debug!(%endpoint, "sending request");
        let response = builder.send().await.map_err(|err| {
            warn!(%endpoint, error = %err, "request failed before a response arrived");
            ApiError::Transport(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let content_type = header_value(&response);
        let body = response.bytes().await.unwrap_or_default();
        let message = extract_message(content_type.as_deref(), &body);
        warn!(
            %endpoint,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "request rejected by server"
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
            content_type,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let builder = self.request(&endpoint)?;
        let response = self.send(&endpoint, builder).await?;
        decode(&endpoint, response).await
    }

    async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(&endpoint)?.json(body);
        let response = self.send(&endpoint, builder).await?;
        decode(&endpoint, response).await
    }

    /// Signup answers are shown verbatim; any 2xx counts as success whatever
    /// the body holds.
    async fn post_receipt<B>(&self, endpoint: Endpoint, body: &B) -> Result<SignupReceipt, ApiError>
    where
        B: serde::Serialize + ?Sized,
    {
        let builder = self.request(&endpoint)?.json(body);
        let response = self.send(&endpoint, builder).await?;
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(receipt_from(&body))
    }

    async fn post_empty(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let builder = self.request(&endpoint)?;
        self.send(&endpoint, builder).await?;
        Ok(())
    }
}

fn header_value(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn decode<T: DeserializeOwned>(endpoint: &Endpoint, response: Response) -> Result<T, ApiError> {
    let body = response
        .bytes()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    serde_json::from_slice(&body).map_err(|err| {
        warn!(%endpoint, error = %err, "response body did not match the expected shape");
        ApiError::Decode(err.to_string())
    })
}

fn receipt_from(body: &[u8]) -> SignupReceipt {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

impl AdminGateway for HttpGateway {
    async fn admin_signup(&self, account: &AdminAccount) -> Result<SignupReceipt, ApiError> {
        self.post_receipt(Endpoint::AdminSignup, account).await
    }

    async fn teacher_signup(&self, account: &TeacherAccount) -> Result<SignupReceipt, ApiError> {
        self.post_receipt(Endpoint::TeacherSignup, account).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        self.post_json(Endpoint::Login, credentials).await
    }

    async fn pending_registrations(&self) -> Result<Vec<RegistrationSummary>, ApiError> {
        self.get_json(Endpoint::PendingRegistrations).await
    }

    async fn registration_detail(
        &self,
        id: &RegistrationId,
    ) -> Result<RegistrationDetail, ApiError> {
        self.get_json(Endpoint::RegistrationDetail(id.clone())).await
    }

    async fn verify_registration(
        &self,
        id: &RegistrationId,
        verdict: &VerificationVerdict,
    ) -> Result<(), ApiError> {
        let endpoint = Endpoint::VerifyRegistration(id.clone());
        let builder = self.request(&endpoint)?.json(verdict);
        self.send(&endpoint, builder).await?;
        Ok(())
    }

    async fn pending_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.get_json(Endpoint::PendingEnrollments).await
    }

    async fn approve_enrollment(&self, id: &EnrollmentId) -> Result<(), ApiError> {
        self.post_empty(Endpoint::ApproveEnrollment(id.clone())).await
    }

    async fn reject_enrollment(&self, id: &EnrollmentId) -> Result<(), ApiError> {
        self.post_empty(Endpoint::RejectEnrollment(id.clone())).await
    }

    async fn generate_report(&self, payload: &ReportPayload) -> Result<ReportDownload, ApiError> {
        let endpoint = Endpoint::GenerateReport;
        let builder = self.request(&endpoint)?.json(payload);
        let response = self.send(&endpoint, builder).await?;

        let content_type = header_value(&response).unwrap_or_default();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(ReportDownload {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        let config = ApiConfig::new(Url::parse(base).expect("valid url"));
        HttpGateway::new(&config, None).expect("client builds")
    }

    #[test]
    fn joins_segments_onto_base_url() {
        let gateway = gateway("https://driving-backend-stmb.onrender.com");
        let url = gateway
            .url_for(&Endpoint::ApproveEnrollment(EnrollmentId("abc123".to_string())))
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://driving-backend-stmb.onrender.com/api/admin/enrollments/abc123/approve"
        );
    }

    #[test]
    fn keeps_base_path_prefix_and_encodes_ids() {
        let gateway = gateway("http://localhost:8080/backend/");
        let url = gateway
            .url_for(&Endpoint::RegistrationDetail(RegistrationId(
                "a/b c".to_string(),
            )))
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/backend/api/admin/registration/a%2Fb%20c"
        );
    }

    #[test]
    fn signup_receipts_accept_any_body() {
        assert_eq!(receipt_from(b""), Value::Null);
        assert_eq!(receipt_from(b"  \n"), Value::Null);
        assert_eq!(receipt_from(b"Created"), Value::String("Created".to_string()));
        assert_eq!(
            receipt_from(br#"{"id":"admin-9"}"#),
            serde_json::json!({ "id": "admin-9" })
        );
    }

    #[test]
    fn authorized_endpoints_require_a_session() {
        let gateway = gateway("http://localhost:8080");
        assert_eq!(
            gateway.request(&Endpoint::PendingRegistrations).err(),
            Some(ApiError::Unauthenticated)
        );
        assert!(gateway.request(&Endpoint::PendingEnrollments).is_ok());
    }
}
