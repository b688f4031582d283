use engine::{ImgModBox, ResponseFormat, Size, image_model::OpenAiImages};
use serde::{Deserialize, Serialize};

pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub openai_token: String,
    pub size: Size,
    pub format: ResponseFormat,
}

impl Config {
    pub fn image_model(&self) -> ImgModBox {
        Box::new(OpenAiImages::new(self.openai_token.clone()))
    }
}
