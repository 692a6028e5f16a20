use std::collections::HashSet;

use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::cli::SimArgs;
use crate::error::StokeError;
use crate::tui;

/// Draw a random sign vector packed one bit per coordinate.
/// Bits past `dims` in the last word stay zero so vectors hash and compare
/// directly.
fn random_vector(rng: &mut StdRng, dims: u32) -> Vec<u64> {
    let words = ((dims + 63) / 64) as usize;
    let mut v: Vec<u64> = (0..words).map(|_| rng.gen()).collect();
    let tail_bits = dims % 64;
    if tail_bits != 0 {
        if let Some(last) = v.last_mut() {
            *last &= (1u64 << tail_bits) - 1;
        }
    }
    v
}

/// Hamming distance over packed words: XOR + popcount.
pub fn hamming(a: &[u64], b: &[u64]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

/// One trial: draw the vectors and check every pair keeps its distance.
fn trial_clear(rng: &mut StdRng, vectors: usize, dims: u32, min_dist: u32) -> bool {
    if min_dist == 0 || vectors <= 1 {
        return true;
    }
    if min_dist > dims {
        return false;
    }

    let vs: Vec<Vec<u64>> = (0..vectors).map(|_| random_vector(rng, dims)).collect();

    if min_dist == 1 {
        // plain distinctness
        let set: HashSet<&[u64]> = vs.iter().map(|v| v.as_slice()).collect();
        return set.len() == vs.len();
    }

    for i in 0..vs.len() {
        for j in (i + 1)..vs.len() {
            if hamming(&vs[i], &vs[j]) < min_dist {
                return false;
            }
        }
    }
    true
}

/// Fraction of trials in which all vectors keep pairwise distance >=
/// `min_dist`. Trials run in parallel, each seeded from `seed` plus its own
/// index so a given seed reproduces.
pub fn clear_probability(
    vectors: usize,
    dims: u32,
    min_dist: u32,
    trials: usize,
    seed: u64,
    bar: &ProgressBar,
) -> f64 {
    let clear = (0..trials as u64)
        .into_par_iter()
        .filter(|&t| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t));
            let ok = trial_clear(&mut rng, vectors, dims, min_dist);
            bar.inc(1);
            ok
        })
        .count();
    clear as f64 / trials as f64
}

/// Sweep the widths and print a width -> probability table.
pub fn report(args: &SimArgs) -> Result<(), StokeError> {
    if args.vectors == 0 {
        return Err(StokeError::InvalidParam("vectors must be at least 1".into()));
    }
    if args.trials == 0 {
        return Err(StokeError::InvalidParam("trials must be at least 1".into()));
    }
    if args.dims.is_empty() {
        return Err(StokeError::InvalidParam("no widths to sweep".into()));
    }

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    tui::header("SIM · Monte Carlo distinctness");
    println!(
        "  \x1b[90mN={} vectors, min distance {}, {} trials per width, seed {seed}\x1b[0m",
        args.vectors, args.min_dist, args.trials
    );
    println!();
    println!(
        "  \x1b[90mwidth | P(every pair >= {} apart)\x1b[0m",
        args.min_dist
    );

    for &dims in &args.dims {
        let bar = tui::bar(args.trials as u64, &format!("width {dims}"));
        let prob = clear_probability(args.vectors, dims, args.min_dist, args.trials, seed, &bar);
        bar.finish_and_clear();
        println!("  {dims:>5} | {prob:.4}");
    }
    println!();

    Ok(())
}
