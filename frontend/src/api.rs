use std::future::Future;

use futures_util::future::{Either, select};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ChatReply, ChatRequest, ImportOutcome, ImportResponse};
use crate::resource::{Resource, decode_list};

/// Base URL of the gateway. Empty: the app is served from the same origin.
const API_BASE: &str = "";

/// Seconds the browser waits for the chat service before giving up.
pub const CHAT_TIMEOUT_SECS: u32 = 30;

pub const CHAT_PATH: &str = "/api/chat";
pub const KPI_PATH: &str = "/api/dashboard/kpi";
pub const PROJECTS_PATH: &str = "/api/projects";
pub const TRANSACTIONS_PATH: &str = "/api/transactions";
pub const REPORTS_PATH: &str = "/api/reports/recent?days=30";
pub const FORECAST_INSIGHTS_PATH: &str = "/api/forecast/insights";
pub const FORECAST_REVENUE_PATH: &str = "/api/forecast/revenue";
pub const FORECAST_TARGETS_PATH: &str = "/api/forecast/targets";
pub const FORECAST_RECOMMENDATIONS_PATH: &str = "/api/forecast/recommendations";
pub const UPLOAD_CSV_PATH: &str = "/api/data/upload-csv";
pub const CLEAR_DATA_PATH: &str = "/api/data/clear";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Serialize error: {0}")]
    Encode(String),

    #[error("Request timed out after {0}s")]
    Timeout(u32),
}

fn url(path: &str) -> String {
    format!("{API_BASE}{path}")
}

async fn checked(
    request: impl Future<Output = Result<Response, gloo_net::Error>>,
) -> Result<Response, ApiError> {
    let resp = request
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    Ok(resp)
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let resp = checked(Request::get(&url(path)).send()).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`get_json`] but leaves the body untyped, for responses whose shape
/// is checked element by element.
pub async fn get_value(path: &str) -> Result<Value, ApiError> {
    get_json::<Value>(path).await
}

pub async fn fetch_list<T: Resource>() -> Result<Vec<T>, ApiError> {
    let value = get_value(&T::list_path()).await?;
    Ok(decode_list(value, T::LIST_KEY))
}

pub async fn fetch_stats<T: Resource>() -> Result<T::Stats, ApiError> {
    get_json::<T::Stats>(&T::stats_path()).await
}

pub async fn put_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = Request::put(&url(path))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let resp = checked(request.send()).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = Request::post(&url(path))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let resp = checked(request.send()).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Sends a chat message, giving up after [`CHAT_TIMEOUT_SECS`].
pub async fn send_chat(request: &ChatRequest) -> Result<ChatReply, ApiError> {
    let call = Box::pin(post_json::<_, ChatReply>(CHAT_PATH, request));
    let timer = Box::pin(TimeoutFuture::new(CHAT_TIMEOUT_SECS * 1000));

    match select(call, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout(CHAT_TIMEOUT_SECS)),
    }
}

/// Uploads a CSV file as multipart field `file`.
pub async fn upload_csv(file: &web_sys::File) -> ImportOutcome {
    let form = match web_sys::FormData::new() {
        Ok(form) => form,
        Err(e) => return import_outcome(Err(ApiError::Encode(format!("{e:?}")))),
    };
    if let Err(e) = form.append_with_blob_and_filename("file", file, &file.name()) {
        return import_outcome(Err(ApiError::Encode(format!("{e:?}"))));
    }

    let request = match Request::post(&url(UPLOAD_CSV_PATH)).body(form) {
        Ok(request) => request,
        Err(e) => return import_outcome(Err(ApiError::Encode(e.to_string()))),
    };
    import_outcome(read_import(request.send()).await)
}

/// Deletes all imported data.
pub async fn clear_data() -> ImportOutcome {
    import_outcome(read_import(Request::delete(&url(CLEAR_DATA_PATH)).send()).await)
}

/// The import endpoints put a JSON `{error}` body on failures, so the body is
/// read whatever the status.
async fn read_import(
    request: impl Future<Output = Result<Response, gloo_net::Error>>,
) -> Result<(bool, ImportResponse), ApiError> {
    let resp = request
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let ok = resp.ok();
    let status = resp.status();
    match resp.json::<ImportResponse>().await {
        Ok(body) => Ok((ok, body)),
        Err(_) if !ok => Err(ApiError::Status(status)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

/// Maps an import/clear response to the banner shown on the data page.
pub fn import_outcome(result: Result<(bool, ImportResponse), ApiError>) -> ImportOutcome {
    match result {
        Ok((true, body)) if body.error.is_none() => ImportOutcome {
            success: true,
            message: body.message.unwrap_or_else(|| "Done".to_string()),
            records_imported: body.records_imported,
        },
        Ok((_, body)) => ImportOutcome {
            success: false,
            message: body
                .error
                .or(body.message)
                .unwrap_or_else(|| "Import failed".to_string()),
            records_imported: None,
        },
        Err(e) => {
            log::error!("Import request failed: {e}");
            ImportOutcome {
                success: false,
                message: e.to_string(),
                records_imported: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(ApiError::Status(502).to_string(), "Server error: 502");
        assert_eq!(ApiError::Timeout(30).to_string(), "Request timed out after 30s");
    }

    #[test]
    fn successful_import_reports_record_count() {
        let body = ImportResponse {
            message: Some("Imported".into()),
            records_imported: Some(120),
            error: None,
        };
        let outcome = import_outcome(Ok((true, body)));
        assert!(outcome.success);
        assert_eq!(outcome.message, "Imported");
        assert_eq!(outcome.records_imported, Some(120));
    }

    #[test]
    fn error_body_wins_over_status() {
        let body = ImportResponse {
            message: None,
            records_imported: None,
            error: Some("Only CSV files are supported".into()),
        };
        let outcome = import_outcome(Ok((false, body)));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Only CSV files are supported");
    }

    #[test]
    fn transport_failure_is_a_failed_import() {
        let outcome = import_outcome(Err(ApiError::Status(500)));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Server error: 500");
        assert!(outcome.records_imported.is_none());
    }
}
