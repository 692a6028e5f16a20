pub mod simulate;

use crate::cli::DimsArgs;
use crate::config::DIMS_CEILING;
use crate::error::StokeError;
use crate::tui;

/// Probability that two random sign vectors of width `dims` differ in fewer
/// than `min_dist` positions. The pairwise Hamming distance is
/// Binomial(dims, 1/2); this sums its lower tail with iteratively built
/// terms so nothing overflows.
pub fn pair_too_close_probability(dims: u32, min_dist: u32) -> f64 {
    if min_dist == 0 {
        return 0.0;
    }
    if min_dist > dims {
        return 1.0;
    }

    // term_k = C(dims, k) * 0.5^dims
    let mut term = 0.5f64.powi(dims as i32);
    let mut total = 0.0;
    for k in 0..min_dist {
        total += term;
        term *= f64::from(dims - k) / f64::from(k + 1);
    }
    total.min(1.0)
}

/// Union-bound probability that all `vectors` random sign vectors keep
/// pairwise Hamming distance >= `min_dist`.
pub fn all_clear_probability(vectors: u64, dims: u32, min_dist: u32) -> f64 {
    if vectors <= 1 {
        return 1.0;
    }
    let n = vectors as f64;
    let pairs = n * (n - 1.0) / 2.0;
    (1.0 - pairs * pair_too_close_probability(dims, min_dist)).clamp(0.0, 1.0)
}

/// Smallest width that reaches `target` probability, by binary search up to
/// DIMS_CEILING. Returns DIMS_CEILING + 1 when no width in range suffices.
pub fn required_dims(vectors: u64, min_dist: u32, target: f64) -> u32 {
    let mut low = min_dist.max(1);
    let mut high = DIMS_CEILING;
    while low <= high {
        let mid = low + (high - low) / 2;
        if all_clear_probability(vectors, mid, min_dist) >= target {
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }
    low
}

/// Print required-width tables over a (min distance x target) grid per N.
pub fn dims_report(args: &DimsArgs) -> Result<(), StokeError> {
    for &t in &args.targets {
        if !(0.0 < t && t < 1.0) {
            return Err(StokeError::InvalidParam(format!(
                "target {t} must be inside (0, 1)"
            )));
        }
    }
    for &d in &args.min_dist {
        if d == 0 {
            return Err(StokeError::InvalidParam(
                "min distance must be at least 1".into(),
            ));
        }
    }

    tui::header("DIMS · required embedding width");

    for &n in &args.vectors {
        println!();
        println!("  \x1b[1;37mN = {n}\x1b[0m");

        let mut head = String::from("  \x1b[90mmin dist\x1b[0m |");
        for &t in &args.targets {
            head.push_str(&format!(" {:^9} |", format!("p={t}")));
        }
        println!("{head}");

        for &d in &args.min_dist {
            let mut row = format!("  {d:^8} |");
            for &t in &args.targets {
                let dims = required_dims(n, d, t);
                let cell = if dims > DIMS_CEILING {
                    format!(">{DIMS_CEILING}")
                } else {
                    dims.to_string()
                };
                row.push_str(&format!(" {cell:^9} |"));
            }
            println!("{row}");
        }
    }
    println!();

    Ok(())
}
