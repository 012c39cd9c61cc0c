
use image::{GrayImage, Luma};


/// Row-major heights, nominally in `[0, 1]`.
#[derive(Clone, PartialEq, Debug)]
pub struct Heightmap {
    pub width: u32,
    pub height: u32,
    pub heights: Vec<f32>,
}

impl Heightmap {
    pub fn new(width: u32, height: u32, heights: Vec<f32>) -> Self {
        debug_assert_eq!(heights.len(), width as usize * height as usize, "Buffer dimension mismatch");
        Heightmap { width, height, heights }
    }

    #[inline]
    pub fn get_height(&self, x: u32, y: u32) -> f32 {
        self.heights[self.width as usize * y as usize + x as usize]
    }

    /// Scale by 255, clamp to `[0, 255]` and truncate to 8 bit.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([to_byte(self.get_height(x, y))])
        })
    }
}

#[inline]
fn to_byte(height: f32) -> u8 {
    let scaled = height * 255.0;

    // `as` saturates, and maps NaN to zero
    scaled.max(0.0).min(255.0) as u8
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_scaled_and_clamped() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(0.5), 127);
        assert_eq!(to_byte(-0.3), 0);
        assert_eq!(to_byte(1.7), 255);
    }

    #[test]
    fn gray_image_keeps_layout() {
        let heightmap = Heightmap::new(3, 2, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        let image = heightmap.to_gray_image();

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 0).0[0], to_byte(0.4));
        assert_eq!(image.get_pixel(0, 1).0[0], to_byte(0.6));
        assert_eq!(image.get_pixel(2, 1).0[0], 255);
    }
}
