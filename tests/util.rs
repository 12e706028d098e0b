#![allow(dead_code)]
use std::collections::BTreeSet;

/// Exact lattice key for coordinates that are multiples of `2^-10`.
pub fn key(c: &[f64]) -> Vec<i64> {
    c.iter().map(|x| (x * 1024.0).round() as i64).collect()
}

/// Deduplicated keys of a coordinate list.
pub fn key_set<'a>(coords: impl IntoIterator<Item = &'a Vec<f64>>) -> BTreeSet<Vec<i64>> {
    coords.into_iter().map(|c| key(c)).collect()
}

/// Unsigned volume of the simplex spanned by `corners` (2-D or 3-D).
pub fn simplex_volume(corners: &[&Vec<f64>]) -> f64 {
    let a = corners[0];
    let e: Vec<Vec<f64>> = corners[1..]
        .iter()
        .map(|c| c.iter().zip(a).map(|(x, y)| x - y).collect())
        .collect();
    match a.len() {
        1 => e[0][0].abs(),
        2 => 0.5 * (e[0][0] * e[1][1] - e[0][1] * e[1][0]).abs(),
        3 => {
            let det = e[0][0] * (e[1][1] * e[2][2] - e[1][2] * e[2][1])
                - e[0][1] * (e[1][0] * e[2][2] - e[1][2] * e[2][0])
                + e[0][2] * (e[1][0] * e[2][1] - e[1][1] * e[2][0]);
            det.abs() / 6.0
        }
        d => panic!("simplex_volume: unsupported dimension {d}"),
    }
}

/// Seeded points in `[0, 1)^d`.
pub fn random_points(d: usize, count: usize, seed: u64) -> Vec<Vec<f64>> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..d).map(|_| rng.r#gen::<f64>()).collect())
        .collect()
}
