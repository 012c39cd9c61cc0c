//! Thins a region down to its one pixel wide centerline.
//!
//! Uses the parallel thinning of Guo and Hall,
//! `Parallel thinning with two-subiteration algorithms` (1989).
//! Each iteration runs two sub-iterations that peel off opposite
//! boundary pixels until nothing changes.
//! Connected components and holes of the region survive thinning,
//! a component too small to thin keeps at least one pixel.
//! Pixels beyond the image border count as outside.

use crate::binary_image::{BinaryImage, BinaryMask};


/// Offsets of the neighbours P2 to P9, clockwise starting north.
const NEIGHBOURS: [(i64, i64); 8] = [
    ( 0, -1), ( 1, -1), ( 1,  0), ( 1,  1),
    ( 0,  1), (-1,  1), (-1,  0), (-1, -1),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SubIteration {
    First,
    Second,
}

/// Compute the skeleton of the inside pixels of the image.
/// The result is a subset of the inside pixels.
pub fn skeletonize(image: &impl BinaryImage) -> BinaryMask {
    let mut skeleton = BinaryMask::from_binary(image);
    let mut deletions = Vec::new();
    let mut iterations = 0;

    loop {
        let mut changed = false;

        for &step in &[SubIteration::First, SubIteration::Second] {
            deletions.clear();

            for y in 0..skeleton.height() {
                for x in 0..skeleton.width() {
                    if skeleton.get(x, y) && is_deletable(&skeleton, x, y, step) {
                        deletions.push((x, y));
                    }
                }
            }

            // all pixels of one sub-iteration are decided before any is removed
            for &(x, y) in &deletions {
                skeleton.set(x, y, false);
            }

            changed |= !deletions.is_empty();
        }

        iterations += 1;
        if !changed {
            break;
        }
    }

    log::trace!("thinning converged after {} iterations", iterations);
    skeleton
}

fn is_deletable(mask: &BinaryMask, x: u32, y: u32, step: SubIteration) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = neighbourhood(mask, x, y);
    let count = |conditions: [bool; 4]| conditions.iter().filter(|set| **set).count();

    // the pixel must connect exactly one group of neighbours,
    // otherwise removing it would split the region
    let connectivity = count([
        !p2 && (p3 || p4), !p4 && (p5 || p6),
        !p6 && (p7 || p8), !p8 && (p9 || p2),
    ]);

    if connectivity != 1 {
        return false;
    }

    let pairs_clockwise = count([p9 || p2, p3 || p4, p5 || p6, p7 || p8]);
    let pairs_counter_clockwise = count([p2 || p3, p4 || p5, p6 || p7, p8 || p9]);
    let neighbours = pairs_clockwise.min(pairs_counter_clockwise);

    // end points and interior pixels stay
    if neighbours < 2 || neighbours > 3 {
        return false;
    }

    match step {
        SubIteration::First => !((p6 || p7 || !p9) && p8),
        SubIteration::Second => !((p2 || p3 || !p5) && p4),
    }
}

fn neighbourhood(mask: &BinaryMask, x: u32, y: u32) -> [bool; 8] {
    let mut neighbours = [false; 8];

    for (neighbour, &(dx, dy)) in neighbours.iter_mut().zip(NEIGHBOURS.iter()) {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;

        *neighbour = nx >= 0 && ny >= 0
            && nx < mask.width() as i64 && ny < mask.height() as i64
            && mask.get(nx as u32, ny as u32);
    }

    neighbours
}
