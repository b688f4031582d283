use crate::image_model::ImageModel;

pub mod image_model;

pub use image_model::{GeneratedImage, ImagePayload, ResponseFormat, Size};

pub type ImgModBox = Box<dyn ImageModel + Send>;
