// Physical layout of the installation: where each light sits on the image plane.
// Lights form concentric hexagonal rings (6, 12, 18 lights) around an empty center.
// The order in which rings are walked is the wiring order of the strip, so index i
// here is light i on the hardware.

use std::ops::Range;

use crate::types::NormalizedPoint;

/// Number of rings on the panel (the center cell has no light).
pub const RING_COUNT: usize = 3;

/// Lights on the reference panel: 6 + 12 + 18.
pub const LIGHT_COUNT: usize = lights_in_rings(RING_COUNT);

/// Index range of each ring within the light array, innermost first.
pub const RING_SEGMENTS: [Range<usize>; RING_COUNT] =
    [ring_segment(1), ring_segment(2), ring_segment(3)];

// Unit cell: distance between neighbouring light centers is 2 * CELL_X.
const CELL_SCALE: f32 = 1.0 / 5.0;
const CELL_X: f32 = 0.866 * CELL_SCALE;
const CELL_Y: f32 = 1.5 * CELL_SCALE;

// Lattice steps as (a, b) coefficients, where a = (2*CELL_X, 0) and
// b = (CELL_X, CELL_Y). Listed in walk order, clockwise starting eastwards.
const WALK: [(i32, i32); 6] = [
    (1, 0),  // a
    (1, -1), // a - b
    (0, -1), // -b
    (-1, 0), // -a
    (-1, 1), // b - a
    (0, 1),  // b
];

/// Total lights in rings 1..=rings.
pub const fn lights_in_rings(rings: usize) -> usize {
    3 * rings * (rings + 1)
}

/// Index range of ring `k` (1-based) in the light array.
pub const fn ring_segment(k: usize) -> Range<usize> {
    let start = lights_in_rings(k - 1);
    start..start + 6 * k
}

fn lattice_point(a: i32, b: i32) -> NormalizedPoint {
    NormalizedPoint::new(
        a as f32 * 2.0 * CELL_X + b as f32 * CELL_X,
        b as f32 * CELL_Y,
    )
}

/// The 6k points of ring `k`, starting one step east of the ring's north-west
/// corner and walking clockwise.
pub fn hex_ring(k: usize) -> Vec<NormalizedPoint> {
    let k = k as i32;
    // North-west corner, k * (b - a)
    let (mut a, mut b) = (-k, k);
    let mut points = Vec::with_capacity(6 * k as usize);
    for (da, db) in WALK {
        for _ in 0..k {
            a += da;
            b += db;
            points.push(lattice_point(a, b));
        }
    }
    points
}

/// Rings 1..=rings concatenated, innermost first.
pub fn hex_layout(rings: usize) -> Vec<NormalizedPoint> {
    (1..=rings).flat_map(hex_ring).collect()
}

/// The panel as wired: 36 points across three rings.
pub fn reference_layout() -> Vec<NormalizedPoint> {
    hex_layout(RING_COUNT)
}
