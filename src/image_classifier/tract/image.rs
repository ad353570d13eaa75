use crate::image_classifier::error::ClassifyError;
use image::{imageops::FilterType, DynamicImage, RgbImage};
use std::io::Cursor;
use tract_onnx::prelude::*;

/// Decodes an uploaded file, guessing the format from its contents.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ClassifyError> {
    let image = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .decode()?;

    Ok(image)
}

/// Stretches the image to `size`×`size` and converts it to RGB.
pub fn resize_image(image: &DynamicImage, size: u32, filter: FilterType) -> RgbImage {
    image.resize_exact(size, size, filter).to_rgb8()
}

/// MobileNetV2 input scaling: `[0, 255]` onto `[-1, 1]`.
pub fn normalize_pixel(value: u8) -> f32 {
    value as f32 / 127.5 - 1.0
}

/// NHWC tensor of shape `[1, height, width, 3]`.
pub fn image_to_tensor(rgb: &RgbImage) -> Tensor {
    let (width, height) = rgb.dimensions();

    tract_ndarray::Array4::from_shape_fn(
        (1, height as usize, width as usize, 3),
        |(_, y, x, c)| normalize_pixel(rgb.get_pixel(x as u32, y as u32)[c]),
    )
    .into_tensor()
}

pub fn resize_image_to_tensor(image: &DynamicImage, size: u32, filter: FilterType) -> Tensor {
    image_to_tensor(&resize_image(image, size, filter))
}
