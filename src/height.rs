//! Maps the position of a pixel between the skeleton
//! and the boundary of its region to a height.

use crate::binary_image::{BinaryImage, BinaryMask, InvertedMask};
use crate::distance_field::{
    DistanceField, DistanceMethod, DistanceStorage,
    F16DistanceStorage, F32DistanceStorage, Precision
};
use crate::skeleton::skeletonize;
use serde::{Deserialize, Serialize};


/// Where the relative position is zero, and so where the region reaches its skeleton height.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// `rel = to_skeleton / (to_boundary + to_skeleton + eps)`.
    /// The skeleton height is reached on the skeleton,
    /// the contact height at the region boundary.
    Ridge,

    /// `rel = to_boundary / (to_boundary + to_skeleton + eps)`.
    /// The contact height is reached on the skeleton,
    /// the skeleton height right next to the boundary.
    Rim,
}

impl Default for Profile {
    fn default() -> Self {
        Profile::Ridge
    }
}

/// The two heights of one region.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RegionHeights {
    /// Height where the relative position is zero.
    pub skeleton: f32,

    /// Height where the relative position is one.
    pub contact: f32,
}

/// Parameters shared by both regions.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct HeightMapping {
    pub gamma: f32,

    /// Added to the denominator of the relative position.
    pub eps: f32,

    pub profile: Profile,
}

impl RegionHeights {
    /// `skeleton - rel^gamma * (skeleton - contact)`
    #[inline]
    pub fn height_at(&self, relative_position: f32, gamma: f32) -> f32 {
        self.skeleton - relative_position.powf(gamma) * (self.skeleton - self.contact)
    }
}

/// Relative position of a pixel between skeleton and boundary, in `[0, 1]`.
/// Infinite distances, and the meaningless ratio of two zero distances,
/// yield one, the contact end.
#[inline]
pub fn relative_position(to_boundary: f32, to_skeleton: f32, eps: f32, profile: Profile) -> f32 {
    if !to_boundary.is_finite() || !to_skeleton.is_finite() {
        return 1.0;
    }

    let numerator = match profile {
        Profile::Ridge => to_skeleton,
        Profile::Rim => to_boundary,
    };

    let relative = numerator / (to_boundary + to_skeleton + eps);
    if relative.is_finite() { relative.max(0.0).min(1.0) } else { 1.0 }
}


/// The skeleton of a region and the two distance fields derived from it.
#[derive(Clone, Debug)]
pub struct RegionDistances<D: DistanceStorage = F32DistanceStorage> {
    pub skeleton: BinaryMask,

    /// Distance of every region pixel to the nearest pixel outside the region.
    pub to_boundary: DistanceField<D>,

    /// Distance of every pixel to the nearest skeleton pixel.
    pub to_skeleton: DistanceField<D>,
}

impl<D> RegionDistances<D> where D: DistanceStorage {
    pub fn compute(region: &BinaryMask, method: DistanceMethod) -> Self {
        let skeleton = skeletonize(region);
        let to_boundary = DistanceField::compute(region, method);
        let to_skeleton = DistanceField::compute(&InvertedMask(&skeleton), method);

        log::debug!(
            "region of {} pixels has {} skeleton pixels",
            region.count(), skeleton.count()
        );

        RegionDistances { skeleton, to_boundary, to_skeleton }
    }

    /// True if the region has no boundary or no skeleton,
    /// so that relative positions carry no information.
    pub fn is_degenerate(&self) -> bool {
        !self.to_boundary.has_sources() || self.skeleton.is_empty()
    }

    /// Relative position of every pixel, row-major.
    pub fn relative_positions(&self, eps: f32, profile: Profile) -> Vec<f32> {
        self.to_boundary.to_f32_vec().into_iter()
            .zip(self.to_skeleton.to_f32_vec())
            .map(|(to_boundary, to_skeleton)| relative_position(to_boundary, to_skeleton, eps, profile))
            .collect()
    }
}

/// Height of every pixel, as seen from the specified region.
/// Only the values inside the region are meaningful.
///
/// An empty region and a region without boundary (it covers the whole image)
/// receive the uniform contact height.
pub fn map_region(
    region: &BinaryMask, heights: RegionHeights, mapping: &HeightMapping,
    method: DistanceMethod, precision: Precision
) -> Vec<f32> {
    match precision {
        Precision::Single => map_region_with::<F32DistanceStorage>(region, heights, mapping, method),
        Precision::Half => map_region_with::<F16DistanceStorage>(region, heights, mapping, method),
    }
}

fn map_region_with<D: DistanceStorage>(
    region: &BinaryMask, heights: RegionHeights,
    mapping: &HeightMapping, method: DistanceMethod
) -> Vec<f32> {
    let pixel_count = region.width() as usize * region.height() as usize;

    if region.is_empty() {
        log::debug!("region is empty, nothing to map");
        return vec![heights.contact; pixel_count];
    }

    let distances = RegionDistances::<D>::compute(region, method);

    if distances.is_degenerate() {
        log::warn!(
            "region of {} pixels has no {}, using uniform contact height {}",
            region.count(),
            if distances.to_boundary.has_sources() { "skeleton" } else { "boundary" },
            heights.contact
        );

        return vec![heights.contact; pixel_count];
    }

    distances.relative_positions(mapping.eps, mapping.profile).into_iter()
        .map(|relative| heights.height_at(relative, mapping.gamma))
        .collect()
}

/// Select the foreground height where the foreground mask is set,
/// and the background height everywhere else.
pub fn composite(foreground: &BinaryMask, foreground_heights: &[f32], background_heights: &[f32]) -> Vec<f32> {
    debug_assert_eq!(foreground.pixels().len(), foreground_heights.len());
    debug_assert_eq!(foreground.pixels().len(), background_heights.len());

    foreground.pixels().iter()
        .zip(foreground_heights.iter().zip(background_heights))
        .map(|(&inside, (&fg, &bg))| if inside { fg } else { bg })
        .collect()
}
