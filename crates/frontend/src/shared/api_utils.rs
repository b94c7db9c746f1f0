//! API utilities for frontend-backend communication
//!
//! Every request goes through [`send`], which reads the body as text and
//! hands it to [`decode_response`]. That keeps the status/envelope mapping a
//! pure function that can be tested without a browser.

use contracts::domain::common::{AggregateRoot, WriteTarget};
use contracts::shared::api::{ApiEnvelope, ApiError};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::shared::config::config;

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/mandor");
/// ```
pub fn api_url(path: &str) -> String {
    config().url(path)
}

/// Error bodies the backend sends with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Maps a finished response onto `T` or an [`ApiError`].
///
/// Non-2xx bodies that carry `message` (or `error`) become
/// [`ApiError::Application`] so the operator sees the server's wording.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(msg), ..
        })
        | Ok(ErrorBody {
            error: Some(msg), ..
        }) if !msg.trim().is_empty() => Err(ApiError::Application(msg)),
        _ => Err(ApiError::Http {
            status,
            body: body.trim().to_string(),
        }),
    }
}

/// Acknowledgement of a write that returns no payload.
///
/// An empty 2xx body (`DELETE /api/master/:id`) is a plain success; an
/// envelope is checked for `success:false`; any other 2xx text is passed on.
pub fn decode_ack(status: u16, body: &str) -> Result<String, ApiError> {
    if !(200..300).contains(&status) {
        return decode_response::<serde_json::Value>(status, body).map(|_| String::new());
    }
    if body.trim().is_empty() {
        return Ok(String::new());
    }
    match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
        Ok(env) => env.into_ack(),
        Err(_) => Ok(body.trim().to_string()),
    }
}

async fn fetch_text(request: Request) -> Result<(u16, String), ApiError> {
    let url = request.url();
    let method = request.method();
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    log::debug!("{:?} {} -> {}", method, url, status);
    Ok((status, body))
}

async fn send<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    let (status, body) = fetch_text(request).await?;
    decode_response(status, &body)
}

fn build(builder: RequestBuilder) -> Result<Request, ApiError> {
    builder
        .header("Accept", "application/json")
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
    builder
        .header("Accept", "application/json")
        .json(body)
        .map_err(|e| ApiError::Transport(format!("Failed to serialize request: {}", e)))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(build(Request::get(&api_url(path)))?).await
}

/// GET with a `serde_qs` query string built from `query`
pub async fn get_with_query<Q: Serialize, T: DeserializeOwned>(
    path: &str,
    query: &Q,
) -> Result<T, ApiError> {
    let qs = serde_qs::to_string(query)
        .map_err(|e| ApiError::Transport(format!("Failed to build query: {}", e)))?;
    send(build(Request::get(&format!("{}?{}", api_url(path), qs)))?).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    send(with_json(Request::post(&api_url(path)), body)?).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    send(with_json(Request::put(&api_url(path)), body)?).await
}

/// DELETE answered by an envelope or an empty body; yields the server message
pub async fn delete(path: &str) -> Result<String, ApiError> {
    let (status, body) = fetch_text(build(Request::delete(&api_url(path)))?).await?;
    decode_ack(status, &body)
}

/// Creates or updates one record of `A`: POST to the collection or PUT to the
/// item. Yields the server message.
pub async fn save_record<A, B>(target: WriteTarget<A::Id>, body: &B) -> Result<String, ApiError>
where
    A: AggregateRoot,
    B: Serialize,
{
    let path = target.path::<A>();
    let request = match target {
        WriteTarget::Create => with_json(Request::post(&api_url(&path)), body)?,
        WriteTarget::Update(_) => with_json(Request::put(&api_url(&path)), body)?,
    };
    let (status, text) = fetch_text(request).await?;
    decode_ack(status, &text)
}

/// Multipart POST; the browser sets the boundary header itself
pub async fn post_form<T: DeserializeOwned>(
    path: &str,
    form: web_sys::FormData,
) -> Result<T, ApiError> {
    let request = Request::post(&api_url(path))
        .header("Accept", "application/json")
        .body(form)
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    send(request).await
}

/// `/api/penyadap/search?nama=...` style path segment values
pub fn encode_param(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_is_decoded() {
        let env: ApiEnvelope<Vec<u32>> =
            decode_response(200, r#"{"success":true,"data":[1,2]}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_error_status_with_message_becomes_application_error() {
        let err = decode_response::<serde_json::Value>(
            400,
            r#"{"success":false,"message":"Afdeling tidak valid"}"#,
        )
        .unwrap_err();
        assert_eq!(err, ApiError::Application("Afdeling tidak valid".to_string()));
        assert_eq!(err.alert_text(), "Gagal: Afdeling tidak valid");
    }

    #[test]
    fn test_error_status_without_message_keeps_status() {
        let err = decode_response::<serde_json::Value>(502, "Bad Gateway\n").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                body: "Bad Gateway".to_string()
            }
        );
        let err = decode_response::<serde_json::Value>(500, r#"{"message":""}"#).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn test_error_field_is_used_as_message() {
        let err =
            decode_response::<serde_json::Value>(401, r#"{"error":"Unauthorized"}"#).unwrap_err();
        assert_eq!(err, ApiError::Application("Unauthorized".to_string()));
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = decode_response::<Vec<u32>>(200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_ack_accepts_empty_body_and_envelopes() {
        assert_eq!(decode_ack(200, ""), Ok(String::new()));
        assert_eq!(
            decode_ack(200, r#"{"success":true,"message":"Data mandor berhasil dihapus"}"#),
            Ok("Data mandor berhasil dihapus".to_string())
        );
        assert_eq!(
            decode_ack(200, r#"{"success":false,"message":"Masih dipakai"}"#),
            Err(ApiError::Application("Masih dipakai".to_string()))
        );
        assert!(matches!(
            decode_ack(404, "Master dengan ID 9 tidak ditemukan"),
            Err(ApiError::Http { status: 404, .. })
        ));
    }

    #[test]
    fn test_encode_param() {
        assert_eq!(encode_param("Budi Santoso"), "Budi%20Santoso");
        assert_eq!(encode_param("A/1"), "A%2F1");
    }
}
