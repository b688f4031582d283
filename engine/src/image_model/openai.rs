use std::pin::Pin;

use color_eyre::Result;
use log::debug;

use crate::image_model::{GeneratedImage, ImageModel, ResponseFormat, Size};

pub mod openai_api;

#[derive(Clone)]
pub struct OpenAiImages {
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiImages {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

impl ImageModel for OpenAiImages {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        size: Size,
        format: ResponseFormat,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage>> + Send + 'a>> {
        Box::pin(async move {
            let payload =
                openai_api::generate(prompt, size, format, &self.api_key, &self.client).await?;
            debug!("received {format} payload, {} chars", payload.source().len());
            let data = openai_api::fetch_bytes(&payload, &self.client).await?;
            Ok(GeneratedImage { payload, data })
        })
    }

    fn clone(&self) -> Box<dyn ImageModel + Send + 'static> {
        Box::new(Clone::clone(self))
    }
}
