//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Canonicalize a chromosome name by stripping the `chr` prefix and mapping
/// mitochondrial aliases to `MT`.
pub fn canonical_chrom(chrom: &str) -> String {
    let stripped = chrom.strip_prefix("chr").unwrap_or(chrom);
    match stripped {
        "M" | "m" | "mt" => "MT".to_string(),
        "x" => "X".to_string(),
        "y" => "Y".to_string(),
        _ => stripped.to_string(),
    }
}

/// GRCh37 pseudoautosomal region 1 on chromosome X (0-based, half-open).
pub const PAR1_X: (i64, i64) = (60_000, 2_699_520);
/// GRCh37 pseudoautosomal region 2 on chromosome X (0-based, half-open).
pub const PAR2_X: (i64, i64) = (154_931_043, 155_260_560);

/// Whether the interval `[start, end)` lies on chromosome X outside of the
/// pseudoautosomal regions (where males are hemizygous).
pub fn is_x_minus_par(chrom: &str, start: i64, end: i64) -> bool {
    if canonical_chrom(chrom) != "X" {
        return false;
    }
    let overlaps = |(par_start, par_end): (i64, i64)| start < par_end && end > par_start;
    !overlaps(PAR1_X) && !overlaps(PAR2_X)
}
