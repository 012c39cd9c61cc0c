
/// Represents an image with each pixel being either true or false,
/// corresponding to inside-the-region and outside-of-the-region respectively.
/// BinaryImages can be created from gray images or owned boolean masks.
pub trait BinaryImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn is_inside(&self, x: u32, y: u32) -> bool;
}

/// An owned, row-major mask with one `bool` per pixel.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BinaryMask {
    /// Create a mask with every pixel outside.
    pub fn new(width: u32, height: u32) -> Self {
        BinaryMask { width, height, pixels: vec![false; width as usize * height as usize] }
    }

    /// Create a mask by evaluating `inside` for every pixel.
    pub fn from_fn(width: u32, height: u32, inside: impl Fn(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, inside(x, y));
            }
        }

        mask
    }

    /// Copy any binary image into an owned mask.
    pub fn from_binary(image: &impl BinaryImage) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| image.is_inside(x, y))
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.pixels[self.flatten_index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, inside: bool) {
        let index = self.flatten_index(x, y);
        self.pixels[index] = inside;
    }

    /// The mask with inside and outside swapped.
    pub fn complement(&self) -> Self {
        BinaryMask {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|inside| !inside).collect(),
        }
    }

    /// Number of inside pixels.
    pub fn count(&self) -> usize {
        self.pixels.iter().filter(|inside| **inside).count()
    }

    /// True if no pixel is inside.
    pub fn is_empty(&self) -> bool {
        !self.pixels.iter().any(|inside| *inside)
    }

    /// True if every pixel is inside.
    pub fn is_full(&self) -> bool {
        self.pixels.iter().all(|inside| *inside)
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}

impl BinaryImage for BinaryMask {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_inside(&self, x: u32, y: u32) -> bool {
        self.get(x, y)
    }
}

/// Swaps inside and outside of another binary image without copying it.
/// Used to turn a skeleton into the set of distance sources.
pub struct InvertedMask<'i, B: BinaryImage>(pub &'i B);

impl<B: BinaryImage> BinaryImage for InvertedMask<'_, B> {
    #[inline]
    fn width(&self) -> u32 {
        self.0.width()
    }

    #[inline]
    fn height(&self) -> u32 {
        self.0.height()
    }

    #[inline]
    fn is_inside(&self, x: u32, y: u32) -> bool {
        !self.0.is_inside(x, y)
    }
}

/// Create binary images from `image` crate gray images.
pub mod gray_image {
    use image::{GrayImage, ImageBuffer, Luma, Primitive};
    use super::BinaryImage;

    /// Create a binary image from a grey-scale image
    /// with all pixels at least as bright as 128 being inside-the-region.
    pub fn of_gray_u8_image(image: &GrayImage) -> WithThreshold<'_, u8, Vec<u8>> {
        of_gray_u8_image_with_threshold(image, 128)
    }

    /// Create a binary image from a grey-scale image
    /// with all pixels at least as bright as the threshold being inside-the-region.
    pub fn of_gray_u8_image_with_threshold(image: &GrayImage, threshold: u8)
        -> WithThreshold<'_, u8, Vec<u8>>
    {
        WithThreshold::of(image, threshold)
    }


    /// A binary image constructed from a grey-scale image
    pub struct WithThreshold<'i, P: 'static + Primitive, Container> {
        image: &'i ImageBuffer<Luma<P>, Container>,
        threshold: P,
    }

    impl<'i, P, C> WithThreshold<'i, P, C> where P: 'static + Primitive {
        pub fn of(image: &'i ImageBuffer<Luma<P>, C>, threshold: P) -> Self {
            WithThreshold { image, threshold }
        }
    }

    impl<'i, P, C> BinaryImage for WithThreshold<'i, P, C>
        where P: 'static + Primitive, C: std::ops::Deref<Target = [P]>
    {
        fn width(&self) -> u32 {
            self.image.width()
        }

        fn height(&self) -> u32 {
            self.image.height()
        }

        fn is_inside(&self, x: u32, y: u32) -> bool {
            self.image.get_pixel(x, y).0[0] >= self.threshold
        }
    }
}
