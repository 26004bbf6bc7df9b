//! The engine's seam to the backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use campus_api::{ApiClient, ApiError};
use campus_core::{AttendanceRecord, ClassRef, StudentRef};

/// Backend operations the reconciliation engine depends on.
///
/// [`ApiClient`] is the production implementation; tests drive the engine
/// through a scripted mock instead of a live backend.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn fetch_classes(&self) -> Result<Vec<ClassRef>, ApiError>;

    async fn fetch_roster(&self, class_id: &str) -> Result<Vec<StudentRef>, ApiError>;

    async fn fetch_records(
        &self,
        class_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApiError>;

    async fn submit_records(&self, records: Vec<AttendanceRecord>) -> Result<(), ApiError>;
}

#[async_trait]
impl AttendanceApi for ApiClient {
    async fn fetch_classes(&self) -> Result<Vec<ClassRef>, ApiError> {
        ApiClient::fetch_classes(self).await
    }

    async fn fetch_roster(&self, class_id: &str) -> Result<Vec<StudentRef>, ApiError> {
        ApiClient::fetch_roster(self, class_id).await
    }

    async fn fetch_records(
        &self,
        class_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        ApiClient::fetch_records(self, class_id, date).await
    }

    async fn submit_records(&self, records: Vec<AttendanceRecord>) -> Result<(), ApiError> {
        ApiClient::submit_records(self, records).await
    }
}

/// Shared clients work wherever an owned implementation does.
#[async_trait]
impl<T: AttendanceApi + ?Sized> AttendanceApi for Arc<T> {
    async fn fetch_classes(&self) -> Result<Vec<ClassRef>, ApiError> {
        (**self).fetch_classes().await
    }

    async fn fetch_roster(&self, class_id: &str) -> Result<Vec<StudentRef>, ApiError> {
        (**self).fetch_roster(class_id).await
    }

    async fn fetch_records(
        &self,
        class_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        (**self).fetch_records(class_id, date).await
    }

    async fn submit_records(&self, records: Vec<AttendanceRecord>) -> Result<(), ApiError> {
        (**self).submit_records(records).await
    }
}
