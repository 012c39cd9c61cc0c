
use crate::binary_image::BinaryImage;
use image::{GrayImage, Luma};
use imageproc::distance_transform::euclidean_squared_distance_transform;
use serde::{Deserialize, Serialize};


/// Unsigned Euclidean distance of every inside pixel
/// to the nearest outside pixel (a "source").
/// Sources hold zero. Pixels with no source anywhere in the image hold `+inf`.
#[derive(Clone, PartialEq, Debug)]
pub struct DistanceField<D: DistanceStorage> {
    pub width: u32,
    pub height: u32,
    pub distances: D,
}

/// Needs less storage with sufficient precision, but takes about
/// twice as long because of conversions between f16 and f32.
/// Distances above 65504 become infinite.
pub type F16DistanceStorage = Vec<half::f16>;

/// Needs more storage with high precision, but takes about
/// half as long because no conversions between f16 and f32 must be made.
pub type F32DistanceStorage = Vec<f32>;

pub trait DistanceStorage {
    fn new(length: usize) -> Self;

    fn get(&self, index: usize) -> f32;

    fn set(&mut self, index: usize, distance: f32);
}

/// How distances are computed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMethod {
    /// Two sweeps over a 3x3 neighbourhood, propagating the nearest source.
    /// Approximate, but very close to the true Euclidean distance.
    DeadReckoning,

    /// Exact Euclidean distance, using the separable transform of `imageproc`.
    Exact,
}

impl Default for DistanceMethod {
    fn default() -> Self {
        DistanceMethod::DeadReckoning
    }
}

/// Which `DistanceStorage` holds the distances.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// `F32DistanceStorage`
    Single,

    /// `F16DistanceStorage`, half the memory per field.
    Half,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Single
    }
}


impl<D> DistanceField<D> where D: DistanceStorage {

    /// Compute the distance field of the specified image with the specified method.
    pub fn compute(binary_image: &impl BinaryImage, method: DistanceMethod) -> Self {
        match method {
            DistanceMethod::DeadReckoning => Self::compute_approximate(binary_image),
            DistanceMethod::Exact => Self::compute_exact(binary_image),
        }
    }

    /// Approximates the distance field of the specified image.
    /// The algorithm used is based on the paper `The "dead reckoning" signed distance transform`
    /// by George J. Grevara, 2004.
    pub fn compute_approximate(binary_image: &impl BinaryImage) -> Self {
        let width = binary_image.width();
        let height = binary_image.height();

        let mut reckoning = DeadReckoning {
            width, height,
            distances: D::new(width as usize * height as usize),
            targets: vec![(0, 0); width as usize * height as usize],
        };

        // every source is its own nearest source
        for y in 0..height {
            for x in 0..width {
                if !binary_image.is_inside(x, y) {
                    reckoning.set_target_and_distance(x, y, x, y, 0.0);
                }
            }
        }

        // perform forwards iteration
        for y in 0..height {
            for x in 0..width {
                let mut distance = reckoning.get_distance(x, y);
                let mut target = reckoning.get_target(x, y);

                let top_left = reckoning.update_distance(x, y, -1, -1, &mut distance, &mut target);
                let top = reckoning.update_distance(x, y,  0, -1, &mut distance, &mut target);
                let top_right = reckoning.update_distance(x, y,  1, -1, &mut distance, &mut target);
                let left = reckoning.update_distance(x, y, -1,  0, &mut distance, &mut target);

                if top_left || top || top_right || left {
                    reckoning.set_target_and_distance(x, y, target.0, target.1, distance);
                }
            }
        }

        // perform backwards iteration
        for y in (0..height).rev() {
            for x in (0..width).rev() {
                let mut distance = reckoning.get_distance(x, y);
                let mut target = reckoning.get_target(x, y);

                let right = reckoning.update_distance(x, y,  1,  0, &mut distance, &mut target);
                let bottom_left = reckoning.update_distance(x, y, -1,  1, &mut distance, &mut target);
                let bottom = reckoning.update_distance(x, y,  0,  1, &mut distance, &mut target);
                let bottom_right = reckoning.update_distance(x, y,  1,  1, &mut distance, &mut target);

                if right || bottom_left || bottom || bottom_right {
                    reckoning.set_target_and_distance(x, y, target.0, target.1, distance);
                }
            }
        }

        DistanceField { width, height, distances: reckoning.distances }
    }

    /// Computes the exact Euclidean distance field in time linear in the number of pixels,
    /// using the lower envelope transform of `imageproc`.
    pub fn compute_exact(binary_image: &impl BinaryImage) -> Self {
        let width = binary_image.width();
        let height = binary_image.height();

        // non-zero pixels are the ones distances are measured to
        let sources = GrayImage::from_fn(width, height, |x, y| {
            if binary_image.is_inside(x, y) { Luma([0]) } else { Luma([255]) }
        });

        let squared = euclidean_squared_distance_transform(&sources);

        let mut distances = D::new(width as usize * height as usize);
        for (index, squared_distance) in squared.pixels().enumerate() {
            // no sources at all leaves every value infinite
            distances.set(index, squared_distance.0[0].sqrt() as f32);
        }

        DistanceField { width, height, distances }
    }

    #[inline]
    pub fn get_distance(&self, x: u32, y: u32) -> f32 {
        self.distances.get(self.flatten_index(x, y))
    }

    /// False if the image had no outside pixel, in which case every distance is infinite.
    pub fn has_sources(&self) -> bool {
        (0 .. self.width as usize * self.height as usize)
            .any(|index| self.distances.get(index).is_finite())
    }

    /// All distances as `f32`, row-major.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        (0 .. self.width as usize * self.height as usize)
            .map(|index| self.distances.get(index))
            .collect()
    }

    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}


/// Working state of the dead reckoning sweeps.
struct DeadReckoning<D: DistanceStorage> {
    width: u32,
    height: u32,
    distances: D,
    targets: Vec<(u32, u32)>,
}

impl<D: DistanceStorage> DeadReckoning<D> {
    #[inline(always)]
    fn update_distance(
        &self, x: u32, y: u32, neighbour_x: i64, neighbour_y: i64,
        own_distance: &mut f32, own_target: &mut (u32, u32)
    ) -> bool {
        // this should be const per function call, as `neighbour` is const per function call
        let distance_to_neighbour = length(neighbour_x, neighbour_y);

        let neighbour_x = x as i64 + neighbour_x;
        let neighbour_y = y as i64 + neighbour_y;

        // if neighbour exists, update ourselves according to the neighbour
        if check_coordinates(neighbour_x, neighbour_y, self.width, self.height) {
            let neighbour_x = neighbour_x as u32;
            let neighbour_y = neighbour_y as u32;
            let neighbour_distance = self.get_distance(neighbour_x, neighbour_y);

            // if neighbour is closer to a source than ourselves,
            // adopt its source and measure the true distance to it
            if neighbour_distance + distance_to_neighbour < *own_distance {
                let neighbour_target = self.get_target(neighbour_x, neighbour_y);

                *own_distance = distance(x, y, neighbour_target.0, neighbour_target.1);
                *own_target = neighbour_target;
                return true
            }
        }

        false
    }

    #[inline(always)]
    fn get_distance(&self, x: u32, y: u32) -> f32 {
        self.distances.get(self.flatten_index(x, y))
    }

    #[inline(always)]
    fn get_target(&self, x: u32, y: u32) -> (u32, u32) {
        self.targets[self.flatten_index(x, y)]
    }

    #[inline(always)]
    fn set_target_and_distance(&mut self, x: u32, y: u32, target_x: u32, target_y: u32, distance: f32) {
        let index = self.flatten_index(x, y);
        self.distances.set(index, distance);
        self.targets[index] = (target_x, target_y);
    }

    #[inline]
    fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}

#[inline]
fn length(x: i64, y: i64) -> f32 {
    let sqr_distance = x * x + y * y;
    (sqr_distance as f32).sqrt()
}

#[inline]
fn distance(x: u32, y: u32, target_x: u32, target_y: u32) -> f32 {
    length(x as i64 - target_x as i64, y as i64 - target_y as i64)
}

#[inline]
fn check_coordinates(x: i64, y: i64, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && x < width as i64 && y < height as i64
}


impl DistanceStorage for F16DistanceStorage {
    fn new(length: usize) -> Self {
        vec![half::f16::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index].to_f32()
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = half::f16::from_f32(distance)
    }
}

impl DistanceStorage for F32DistanceStorage {
    fn new(length: usize) -> Self {
        vec![std::f32::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = distance
    }
}
