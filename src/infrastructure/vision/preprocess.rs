//! Turn uploaded image bytes into a model input tensor

use image::{imageops::FilterType, DynamicImage, RgbImage};
use tracing::debug;

use crate::config::{ClassifierConfig, PixelScaling};
use crate::domain::{DomainError, InputTensor, TensorLayout};

const CHANNELS: usize = 3;

/// Decodes, fits and scales images to the model's fixed square input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePreprocessor {
    size: u32,
    layout: TensorLayout,
    scaling: PixelScaling,
}

impl ImagePreprocessor {
    pub fn new(size: u32, layout: TensorLayout, scaling: PixelScaling) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::configuration("Input size must be greater than 0"));
        }

        Ok(Self {
            size,
            layout,
            scaling,
        })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self, DomainError> {
        Self::new(config.input_size, config.layout, config.scaling)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tensor shape this preprocessor produces
    pub fn shape(&self) -> [usize; 4] {
        let side = self.size as usize;

        match self.layout {
            TensorLayout::Nhwc => [1, side, side, CHANNELS],
            TensorLayout::Nchw => [1, CHANNELS, side, side],
        }
    }

    /// Decode raw bytes and prepare them for inference
    pub fn prepare(&self, bytes: &[u8]) -> Result<InputTensor, DomainError> {
        let image = decode(bytes)?;
        self.prepare_image(&image)
    }

    /// Fit-and-crop an already decoded image into a single-image batch
    pub fn prepare_image(&self, image: &DynamicImage) -> Result<InputTensor, DomainError> {
        debug!(
            width = image.width(),
            height = image.height(),
            target = self.size,
            "Preparing image"
        );

        // Scale to cover the square, then centre-crop; never stretch
        let fitted = image
            .resize_to_fill(self.size, self.size, FilterType::Lanczos3)
            .to_rgb8();

        InputTensor::new(self.shape(), self.layout, self.pixels(&fitted))
    }

    fn pixels(&self, rgb: &RgbImage) -> Vec<f32> {
        let mut data = Vec::with_capacity(rgb.len());

        match self.layout {
            TensorLayout::Nhwc => {
                for pixel in rgb.pixels() {
                    data.extend(pixel.0.iter().map(|&v| self.scaling.apply(v)));
                }
            }
            TensorLayout::Nchw => {
                for channel in 0..CHANNELS {
                    for pixel in rgb.pixels() {
                        data.push(self.scaling.apply(pixel.0[channel]));
                    }
                }
            }
        }

        data
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self {
            size: 224,
            layout: TensorLayout::Nhwc,
            scaling: PixelScaling::Raw,
        }
    }
}

/// Decode bytes as a raster image (JPEG or PNG)
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, DomainError> {
    if bytes.is_empty() {
        return Err(DomainError::invalid_image("Image is empty"));
    }

    image::load_from_memory(bytes)
        .map_err(|e| DomainError::invalid_image(format!("Could not decode image: {}", e)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, Rgba, RgbaImage};

    use super::*;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_prepare_wide_image() {
        let tensor = ImagePreprocessor::default()
            .prepare(&png_bytes(solid(640, 320, [10, 20, 30])))
            .unwrap();

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.data().len(), 224 * 224 * 3);
    }

    #[test]
    fn test_prepare_tall_image() {
        let preprocessor = ImagePreprocessor::new(32, TensorLayout::Nhwc, PixelScaling::Raw).unwrap();
        let tensor = preprocessor
            .prepare(&png_bytes(solid(50, 400, [0, 0, 0])))
            .unwrap();

        assert_eq!(tensor.shape(), [1, 32, 32, 3]);
    }

    #[test]
    fn test_crop_keeps_centre() {
        // Left and right thirds red, centre blue: a square crop sees only blue
        let mut image = RgbImage::from_pixel(300, 100, Rgb([255, 0, 0]));
        for x in 100..200 {
            for y in 0..100 {
                image.put_pixel(x, y, Rgb([0, 0, 255]));
            }
        }

        let preprocessor = ImagePreprocessor::new(10, TensorLayout::Nhwc, PixelScaling::Raw).unwrap();
        let tensor = preprocessor
            .prepare_image(&DynamicImage::ImageRgb8(image))
            .unwrap();

        let centre = (5 * 10 + 5) * 3;
        let data = tensor.data();
        assert!(data[centre] < 16.0);
        assert!(data[centre + 2] > 240.0);
    }

    #[test]
    fn test_alpha_channel_dropped() {
        let rgba = RgbaImage::from_pixel(8, 8, Rgba([200, 100, 50, 255]));
        let preprocessor = ImagePreprocessor::new(4, TensorLayout::Nhwc, PixelScaling::Raw).unwrap();

        let tensor = preprocessor
            .prepare(&png_bytes(DynamicImage::ImageRgba8(rgba)))
            .unwrap();

        assert_eq!(tensor.data().len(), 4 * 4 * 3);
        assert_eq!(&tensor.data()[..3], &[200.0, 100.0, 50.0]);
    }

    #[test]
    fn test_nchw_layout_groups_channels() {
        let preprocessor = ImagePreprocessor::new(2, TensorLayout::Nchw, PixelScaling::Unit).unwrap();
        let tensor = preprocessor
            .prepare_image(&solid(2, 2, [255, 0, 255]))
            .unwrap();

        assert_eq!(tensor.shape(), [1, 3, 2, 2]);
        assert_eq!(tensor.data(), &[1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_undecodable_bytes() {
        let err = ImagePreprocessor::default()
            .prepare(b"definitely not an image")
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidImage { .. }));
    }

    #[test]
    fn test_empty_bytes() {
        let err = ImagePreprocessor::default().prepare(&[]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidImage { .. }));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(ImagePreprocessor::new(0, TensorLayout::Nhwc, PixelScaling::Raw).is_err());
    }
}
