//! This crate turns a binary image into a synthetic heightmap.
//! Foreground and background are thinned to their skeletons,
//! and every pixel is placed between its region's skeleton and boundary
//! using two distance fields. That relative position is mapped
//! to a height per region, so that each region forms a ridge along its skeleton.
//! Distances use the "dead reckoning" transform,
//! as described in `The "dead reckoning" signed distance transform`
//! by George J. Grevara (2004), or an exact Euclidean transform.

pub mod binary_image;
pub mod distance_field;
pub mod error;
pub mod height;
pub mod heightmap;
pub mod io;
pub mod params;
pub mod regions;
pub mod skeleton;

pub mod prelude {
    pub use crate::{
        compute_heightmap,
        compute_heightmap_from_masks,
        convert_file,
    };

    pub use crate::binary_image::{
        BinaryImage, BinaryMask, InvertedMask
    };

    pub use crate::distance_field::{
        DistanceField, DistanceMethod, DistanceStorage,
        F16DistanceStorage, F32DistanceStorage, Precision
    };

    pub use crate::error::{HeightmapError, HeightmapResult};
    pub use crate::height::{Profile, RegionDistances, RegionHeights};
    pub use crate::heightmap::Heightmap;
    pub use crate::params::HeightmapParams;
    pub use crate::regions::RegionMasks;
    pub use crate::skeleton::skeletonize;

    pub use crate::binary_image::gray_image as binary_gray_image;
}

pub use prelude::*;

use image::GrayImage;
use std::path::Path;


/// Compute the heightmap of a gray image, thresholded as the parameters specify.
pub fn compute_heightmap(image: &GrayImage, params: &HeightmapParams) -> HeightmapResult<Heightmap> {
    let masks = RegionMasks::from_gray(image, params.threshold);
    compute_heightmap_from_masks(&masks, params)
}

/// Compute the heightmap of already separated foreground and background masks.
pub fn compute_heightmap_from_masks(masks: &RegionMasks, params: &HeightmapParams) -> HeightmapResult<Heightmap> {
    params.validate()?;

    let (width, height) = (masks.width(), masks.height());
    if width == 0 || height == 0 {
        return Err(HeightmapError::EmptyImage);
    }

    log::debug!(
        "{}x{} image, {} foreground and {} background pixels",
        width, height, masks.foreground.count(), masks.background.count()
    );

    let mapping = params.mapping();

    let foreground = crate::height::map_region(
        &masks.foreground, params.foreground(), &mapping, params.distance, params.precision
    );

    let background = crate::height::map_region(
        &masks.background, params.background(), &mapping, params.distance, params.precision
    );

    let heights = crate::height::composite(&masks.foreground, &foreground, &background);

    Ok(Heightmap::new(width, height, heights))
}

/// Load the input image, compute its heightmap and write it as PNG.
/// Nothing is written if any step before writing fails.
pub fn convert_file(
    input: impl AsRef<Path>, output: impl AsRef<Path>,
    params: &HeightmapParams
) -> HeightmapResult<()> {
    let image = crate::io::load_gray_image(input)?;
    let heightmap = compute_heightmap(&image, params)?;
    crate::io::save_heightmap(&heightmap, output)
}


#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use approx::assert_relative_eq;
    use image::{GrayImage, Luma};

    fn gray_from_function(width: u32, height: u32, inside: impl Fn(u32, u32) -> bool) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if inside(x, y) { Luma([255]) } else { Luma([0]) }
        })
    }

    fn white_square(x: u32, y: u32) -> bool {
        x >= 2 && x < 8 && y >= 2 && y < 8
    }

    fn blobs(x: u32, y: u32) -> bool {
        let (fx, fy) = (x as f32, y as f32);
        let circle = (fx - 20.0).powi(2) + (fy - 18.0).powi(2) < 120.0;
        let bar = x > 34 && x < 58 && y > 8 && y < 20;
        circle || bar
    }

    fn assert_finite(heightmap: &Heightmap) {
        for height in &heightmap.heights {
            assert!(height.is_finite(), "non-finite height {}", height);
        }
    }

    #[test]
    fn square_scenario() {
        let image = gray_from_function(10, 10, white_square);
        let params = HeightmapParams::default();
        let masks = RegionMasks::from_gray(&image, params.threshold);

        let heightmap = compute_heightmap(&image, &params).unwrap();
        assert_finite(&heightmap);
        let output = heightmap.to_gray_image();

        // full foreground height on the foreground skeleton
        let skeleton = skeletonize(&masks.foreground);
        assert!(!skeleton.is_empty());
        for y in 0..10 {
            for x in 0..10 {
                if skeleton.get(x, y) {
                    assert_eq!(output.get_pixel(x, y).0[0], 255);
                }
            }
        }

        // decaying toward the contact height at the edge of the square
        let contact = (0.6_f32 * 255.0) as u8;
        for i in 2..8 {
            for &(x, y) in &[(i, 2), (i, 7), (2, i), (7, i)] {
                let value = output.get_pixel(x, y).0[0];
                assert!(value >= contact && value < 240, "edge pixel {} {} is {}", x, y, value);
            }
        }

        // the background stays below its skeleton height
        let background_max = (0.4_f32 * 255.0).ceil() as u8;
        for y in 0..10 {
            for x in 0..10 {
                if !white_square(x, y) {
                    assert!(output.get_pixel(x, y).0[0] <= background_max);
                }
            }
        }
    }

    #[test]
    fn all_foreground_has_no_nan() {
        let image = GrayImage::from_pixel(12, 7, Luma([255]));
        let params = HeightmapParams::default();

        let heightmap = compute_heightmap(&image, &params).unwrap();
        assert_finite(&heightmap);

        for height in &heightmap.heights {
            assert_relative_eq!(*height, params.hfc);
        }
    }

    #[test]
    fn all_background_has_no_nan() {
        let image = GrayImage::from_pixel(9, 11, Luma([3]));
        let params = HeightmapParams::default();

        let heightmap = compute_heightmap(&image, &params).unwrap();
        assert_finite(&heightmap);

        for height in &heightmap.heights {
            assert_relative_eq!(*height, params.hbc);
        }
    }

    #[test]
    fn heights_stay_within_region_ranges() {
        let image = gray_from_function(64, 40, blobs);

        for &profile in &[Profile::Ridge, Profile::Rim] {
            for &distance in &[DistanceMethod::DeadReckoning, DistanceMethod::Exact] {
                let params = HeightmapParams { profile, distance, ..Default::default() };
                let heightmap = compute_heightmap(&image, &params).unwrap();
                assert_finite(&heightmap);

                for y in 0..40 {
                    for x in 0..64 {
                        let height = heightmap.get_height(x, y);
                        let (low, high) = if blobs(x, y) { (0.6, 1.0) } else { (0.0, 0.4) };
                        assert!(height >= low - 1e-5 && height <= high + 1e-5, "{} at {} {}", height, x, y);
                    }
                }
            }
        }
    }

    #[test]
    fn computation_is_deterministic() {
        let image = gray_from_function(64, 40, blobs);
        let params = HeightmapParams::default();

        let first = compute_heightmap(&image, &params).unwrap().to_gray_image();
        let second = compute_heightmap(&image, &params).unwrap().to_gray_image();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn higher_gamma_raises_foreground_interior() {
        let image = gray_from_function(64, 40, blobs);
        let linear = compute_heightmap(&image, &HeightmapParams::default()).unwrap();
        let squared = compute_heightmap(&image, &HeightmapParams { gamma: 2.0, ..Default::default() }).unwrap();

        // rel^2 <= rel everywhere, so no foreground pixel gets lower
        for (index, (a, b)) in linear.heights.iter().zip(&squared.heights).enumerate() {
            let (x, y) = (index as u32 % 64, index as u32 / 64);
            if blobs(x, y) {
                assert!(*b >= *a - 1e-6);
            }
        }

        let sum = |heightmap: &Heightmap| heightmap.heights.iter().sum::<f32>();
        assert!(sum(&squared) > sum(&linear));
    }

    #[test]
    fn half_precision_is_close_to_single() {
        let image = gray_from_function(64, 40, blobs);

        for &distance in &[DistanceMethod::DeadReckoning, DistanceMethod::Exact] {
            let single = HeightmapParams { distance, ..Default::default() };
            let half = HeightmapParams { precision: Precision::Half, ..single.clone() };

            let single = compute_heightmap(&image, &single).unwrap();
            let half = compute_heightmap(&image, &half).unwrap();
            assert_finite(&half);

            for (a, b) in single.heights.iter().zip(&half.heights) {
                assert_relative_eq!(*a, *b, epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn invalid_params_fail_before_computing() {
        let image = gray_from_function(10, 10, white_square);
        let params = HeightmapParams { gamma: -1.0, ..Default::default() };

        assert!(matches!(compute_heightmap(&image, &params), Err(HeightmapError::InvalidParams(_))));
    }

    #[test]
    fn empty_image_is_an_error() {
        let image = GrayImage::new(0, 0);
        let result = compute_heightmap(&image, &HeightmapParams::default());
        assert!(matches!(result, Err(HeightmapError::EmptyImage)));
    }

    #[test]
    fn convert_file_twice_gives_identical_bytes() {
        let directory = std::env::temp_dir();
        let input = directory.join("heightmap_skeleton_convert_input.png");
        let first = directory.join("heightmap_skeleton_convert_first.png");
        let second = directory.join("heightmap_skeleton_convert_second.png");

        gray_from_function(64, 40, blobs).save(&input).unwrap();

        let params = HeightmapParams::default();
        convert_file(&input, &first, &params).unwrap();
        convert_file(&input, &second, &params).unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());

        for path in &[input, first, second] {
            std::fs::remove_file(path).ok();
        }
    }

    #[test]
    fn convert_missing_file_writes_nothing() {
        let output = std::env::temp_dir().join("heightmap_skeleton_never_written.png");
        std::fs::remove_file(&output).ok();

        let result = convert_file("/definitely/not/here/depth.jpg", &output, &HeightmapParams::default());
        assert!(matches!(result, Err(HeightmapError::ImageLoad { .. })));
        assert!(!output.exists());
    }
}
