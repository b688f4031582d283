use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use color_eyre::{Result, eyre::eyre};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

mod error;
pub use error::OpenAiApiError;

use crate::image_model::{ImagePayload, ResponseFormat, Size};

const GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

// Bounds a hung generation; there is no user-facing cancellation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestBody {
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub response_format: String,
}

impl RequestBody {
    pub fn new(prompt: &str, size: Size, format: ResponseFormat) -> Self {
        Self {
            prompt: prompt.into(),
            n: 1,
            size: size.api_str().into(),
            response_format: format.api_str().into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub data: Vec<GenerationResult>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResult {
    pub url: Option<String>,
    pub b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}

/// Requests a single image and returns the payload field matching `format`.
pub async fn generate(
    prompt: &str,
    size: Size,
    format: ResponseFormat,
    api_key: &str,
    client: &Client,
) -> Result<ImagePayload> {
    let body = RequestBody::new(prompt, size, format);
    debug!("generation request: {}", serde_json::to_string(&body)?);

    let resp = client
        .post(GENERATIONS_URL)
        .timeout(REQUEST_TIMEOUT)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(parse_error(status, &text).into());
    }

    extract_payload(serde_json::from_str(&text)?, format)
}

/// Materializes the image bytes: decodes a base64 payload, or downloads a URL
/// payload with the same client.
pub async fn fetch_bytes(payload: &ImagePayload, client: &Client) -> Result<Vec<u8>> {
    match payload {
        ImagePayload::Base64(b64) => Ok(BASE64.decode(b64)?),
        ImagePayload::Url(url) => {
            let resp = client.get(url).send().await?.error_for_status()?;
            Ok(resp.bytes().await?.to_vec())
        }
    }
}

fn extract_payload(resp: GenerationResponse, format: ResponseFormat) -> Result<ImagePayload> {
    let first = resp
        .data
        .into_iter()
        .next()
        .ok_or(eyre!("Response contained no images"))?;

    match format {
        ResponseFormat::Url => first
            .url
            .map(ImagePayload::Url)
            .ok_or(eyre!("Response missing the url field")),
        ResponseFormat::B64Json => first
            .b64_json
            .map(ImagePayload::Base64)
            .ok_or(eyre!("Response missing the b64_json field")),
    }
}

fn parse_error(status: StatusCode, body: &str) -> OpenAiApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => OpenAiApiError::from_type(
            envelope.error.error_type.as_deref().unwrap_or(""),
            envelope.error.message,
        ),
        Err(_) => OpenAiApiError::Unexpected {
            error_type: status.to_string(),
            message: body.to_string(),
        },
    }
}

#[cfg(test)]
mod test {
    use expect_test::expect;

    use super::*;

    #[test]
    fn request_serialization() {
        let body = RequestBody::new(
            "two puppies, cute, playing in the park",
            Size::Medium,
            ResponseFormat::B64Json,
        );

        let expect = expect![[
            r#"{"prompt":"two puppies, cute, playing in the park","n":1,"size":"512x512","response_format":"b64_json"}"#
        ]];
        expect.assert_eq(&serde_json::to_string(&body).unwrap());
    }

    #[test]
    fn extracts_base64_payload() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{ "data": [{ "b64_json": "AAAA" }] }"#).unwrap();
        let payload = extract_payload(resp, ResponseFormat::B64Json).unwrap();
        assert_eq!(payload, ImagePayload::Base64("AAAA".into()));
    }

    #[test]
    fn extracts_url_payload() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{ "data": [{ "url": "https://img/x.png" }] }"#).unwrap();
        let payload = extract_payload(resp, ResponseFormat::Url).unwrap();
        assert_eq!(payload, ImagePayload::Url("https://img/x.png".into()));
    }

    #[test]
    fn empty_data_is_an_error() {
        let resp: GenerationResponse = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert!(extract_payload(resp, ResponseFormat::Url).is_err());
    }

    #[test]
    fn missing_requested_field_is_an_error() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{ "data": [{ "b64_json": "AAAA" }] }"#).unwrap();
        assert!(extract_payload(resp, ResponseFormat::Url).is_err());
    }

    #[test]
    fn error_envelope_maps_to_taxonomy() {
        let body = r#"{ "error": { "type": "authentication_error", "message": "bad key" } }"#;
        let err = parse_error(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, OpenAiApiError::Authentication { .. }));

        let body = r#"{ "error": { "type": "made_up", "message": "?" } }"#;
        let err = parse_error(StatusCode::IM_A_TEAPOT, body);
        assert!(matches!(err, OpenAiApiError::Unexpected { .. }));
    }

    #[test]
    fn unparsable_error_body_falls_back_to_status() {
        let err = parse_error(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        match err {
            OpenAiApiError::Unexpected {
                error_type,
                message,
            } => {
                assert_eq!(error_type, "502 Bad Gateway");
                assert_eq!(message, "<html>nope</html>");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_bytes_decodes_base64() {
        let payload = ImagePayload::Base64("AAAA".into());
        let bytes = fetch_bytes(&payload, &Client::new()).await.unwrap();
        assert_eq!(bytes, vec![0, 0, 0]);
    }
}
