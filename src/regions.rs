//! Splits a gray image into foreground and background.

use crate::binary_image::{gray_image, BinaryImage, BinaryMask};
use image::GrayImage;


/// The complementary foreground and background masks of an image.
/// Every pixel is in exactly one of them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RegionMasks {
    /// Pixels at least as bright as the threshold.
    pub foreground: BinaryMask,

    /// All other pixels.
    pub background: BinaryMask,
}

impl RegionMasks {
    /// Threshold a gray image: pixels with `intensity >= threshold` are foreground.
    pub fn from_gray(image: &GrayImage, threshold: u8) -> Self {
        Self::from_binary(&gray_image::of_gray_u8_image_with_threshold(image, threshold))
    }

    /// Use the inside pixels of a binary image as foreground.
    pub fn from_binary(image: &impl BinaryImage) -> Self {
        let foreground = BinaryMask::from_binary(image);
        let background = foreground.complement();
        RegionMasks { foreground, background }
    }

    pub fn width(&self) -> u32 {
        self.foreground.width()
    }

    pub fn height(&self) -> u32 {
        self.foreground.height()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn masks_partition_every_pixel() {
        let image = GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]));

        for &threshold in &[0_u8, 1, 127, 128, 200, 255] {
            let masks = RegionMasks::from_gray(&image, threshold);

            for y in 0..16 {
                for x in 0..16 {
                    let sum = masks.foreground.get(x, y) as u8 + masks.background.get(x, y) as u8;
                    assert_eq!(sum, 1);
                }
            }
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        let image = GrayImage::from_raw(3, 1, vec![127, 128, 129]).unwrap();
        let masks = RegionMasks::from_gray(&image, 128);

        assert!(!masks.foreground.get(0, 0));
        assert!(masks.foreground.get(1, 0));
        assert!(masks.foreground.get(2, 0));
        assert!(masks.background.get(0, 0));
    }

    #[test]
    fn white_image_has_empty_background() {
        let image = GrayImage::from_pixel(5, 4, Luma([255]));
        let masks = RegionMasks::from_gray(&image, 128);

        assert!(masks.foreground.is_full());
        assert!(masks.background.is_empty());
        assert_eq!((masks.width(), masks.height()), (5, 4));
    }
}
