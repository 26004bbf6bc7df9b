//! The backend API client.
//!
//! [`ApiClient`] holds the base URL, a pooled HTTP client, and the bearer
//! token slot that the session layer arms after login/restore. All methods
//! decode the backend's `{"data": ...}` envelope and normalize failures into
//! [`ApiError`].

use std::sync::RwLock;
use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use campus_core::{AttendanceRecord, ClassRef, StudentRef};

use crate::error::ApiError;
use crate::types::{
    AttendancePayload, AttendanceSubmission, AuthSession, ClassesPayload, Envelope, ErrorBody,
    RegisterRequest, StudentsPayload, SubmitRecord,
};

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when fetching a class roster.
const ROSTER_PAGE_LIMIT: u32 = 100;

/// Client for the school backend REST API.
///
/// Cheap to share behind an `Arc`; the token slot is interior-mutable so the
/// session layer can arm and disarm it without exclusive access.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client targeting `base_url` (e.g. `http://host:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: RwLock::new(None),
        }
    }

    /// Arm the bearer token attached to every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Drop the bearer token (signed-out state).
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Whether a bearer token is currently armed.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().expect("token lock poisoned").as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode the enveloped payload.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send_raw(request).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    /// Send a request, keeping only success/failure (submit-style endpoints).
    async fn send_expect_ok(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.send_raw(request).await.map(|_| ())
    }

    async fn send_raw(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::debug!(status = status.as_u16(), ?message, "API call failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }

    // -- auth ---------------------------------------------------------------

    /// `POST /auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.send(self.http.post(self.url("/auth/login")).json(&body))
            .await
    }

    /// `POST /auth/register`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        self.send(self.http.post(self.url("/auth/register")).json(request))
            .await
    }

    // -- academic -----------------------------------------------------------

    /// `GET /academic/classes`.
    pub async fn fetch_classes(&self) -> Result<Vec<ClassRef>, ApiError> {
        let payload: ClassesPayload = self
            .send(self.http.get(self.url("/academic/classes")))
            .await?;
        Ok(payload.classes)
    }

    /// `GET /students?classId=&limit=`: the roster for one class.
    pub async fn fetch_roster(&self, class_id: &str) -> Result<Vec<StudentRef>, ApiError> {
        let limit = ROSTER_PAGE_LIMIT.to_string();
        let payload: StudentsPayload = self
            .send(
                self.http
                    .get(self.url("/students"))
                    .query(&[("classId", class_id), ("limit", limit.as_str())]),
            )
            .await?;
        Ok(payload.students)
    }

    // -- attendance ---------------------------------------------------------

    /// `GET /attendance?classId=&startDate=&endDate=` for a single day.
    ///
    /// The backend rows carry a populated student object; this flattens each
    /// row back to an [`AttendanceRecord`] keyed by the query's class and
    /// date.
    pub async fn fetch_records(
        &self,
        class_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let day = date.to_string();
        let payload: AttendancePayload = self
            .send(self.http.get(self.url("/attendance")).query(&[
                ("classId", class_id),
                ("startDate", day.as_str()),
                ("endDate", day.as_str()),
            ]))
            .await?;

        Ok(payload
            .attendance
            .into_iter()
            .map(|row| AttendanceRecord {
                student_id: row.student.id,
                class_id: class_id.to_string(),
                date,
                status: row.status,
            })
            .collect())
    }

    /// `POST /attendance`: batch upsert of one day's records.
    ///
    /// The response body carries no per-record results; only success or
    /// failure is reported.
    pub async fn submit_records(&self, records: Vec<AttendanceRecord>) -> Result<(), ApiError> {
        let submission = AttendanceSubmission {
            attendance_records: records.into_iter().map(SubmitRecord::from).collect(),
        };
        self.send_expect_ok(self.http.post(self.url("/attendance")).json(&submission))
            .await
    }
}
