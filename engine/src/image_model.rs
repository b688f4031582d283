use std::pin::Pin;

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub mod openai;
pub use openai::OpenAiImages;

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Size {
    #[strum(to_string = "256 x 256")]
    Small,
    #[default]
    #[strum(to_string = "512 x 512")]
    Medium,
    #[strum(to_string = "1024 x 1024")]
    Large,
}

impl Size {
    /// The size string the generations endpoint expects.
    pub fn api_str(&self) -> &'static str {
        match self {
            Size::Small => "256x256",
            Size::Medium => "512x512",
            Size::Large => "1024x1024",
        }
    }

    /// Edge length in pixels, used for display sizing only.
    pub fn pixel_dimension(&self) -> u32 {
        match self {
            Size::Small => 256,
            Size::Medium => 512,
            Size::Large => 1024,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum ResponseFormat {
    #[default]
    #[strum(to_string = "Base64")]
    B64Json,
    #[strum(to_string = "URL")]
    Url,
}

impl ResponseFormat {
    pub fn api_str(&self) -> &'static str {
        match self {
            ResponseFormat::B64Json => "b64_json",
            ResponseFormat::Url => "url",
        }
    }
}

/// What the endpoint handed back for the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    Url(String),
    Base64(String),
}

impl ImagePayload {
    /// The payload verbatim, as received.
    pub fn source(&self) -> &str {
        match self {
            ImagePayload::Url(url) => url,
            ImagePayload::Base64(b64) => b64,
        }
    }

    /// A self-contained image source: the URL verbatim, or a PNG data URI
    /// wrapping the base64 payload.
    pub fn data_uri(&self) -> String {
        match self {
            ImagePayload::Url(url) => url.clone(),
            ImagePayload::Base64(b64) => format!("data:image/png;base64,{b64}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub payload: ImagePayload,
    pub data: Vec<u8>,
}

pub trait ImageModel {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        size: Size,
        format: ResponseFormat,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage>> + Send + 'a>>;

    fn clone(&self) -> Box<dyn ImageModel + Send + 'static>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_table() {
        assert_eq!(Size::Small.pixel_dimension(), 256);
        assert_eq!(Size::Medium.pixel_dimension(), 512);
        assert_eq!(Size::Large.pixel_dimension(), 1024);
        assert_eq!(Size::Small.api_str(), "256x256");
        assert_eq!(Size::Medium.api_str(), "512x512");
        assert_eq!(Size::Large.api_str(), "1024x1024");
    }

    #[test]
    fn format_api_strings() {
        assert_eq!(ResponseFormat::B64Json.api_str(), "b64_json");
        assert_eq!(ResponseFormat::Url.api_str(), "url");
    }

    #[test]
    fn data_uri_wraps_base64_payloads_only() {
        let b64 = ImagePayload::Base64("AAAA".into());
        assert_eq!(b64.data_uri(), "data:image/png;base64,AAAA");
        assert_eq!(b64.source(), "AAAA");

        let url = ImagePayload::Url("https://img/x.png".into());
        assert_eq!(url.data_uri(), "https://img/x.png");
        assert_eq!(url.source(), "https://img/x.png");
    }
}
