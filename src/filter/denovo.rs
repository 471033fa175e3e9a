//! Denovo probability engine.
//!
//! Computes the Bayesian posterior probability that a trio genotype
//! configuration is a true de novo event rather than a genotyping error,
//! from the phred-scaled genotype likelihoods of father, mother, and
//! proband.

/// Assumed per-site mutation rate.
const MUTATION_RATE: f64 = 1e-8;
/// Assumed population alternate allele frequency for the genotype prior.
const PRIOR_ALT_FREQ: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("genotype code {0} out of range, must be 0, 1, or 2")]
    InvalidGenotypeCode(u8),
    #[error("heterozygous father is impossible on X outside the pseudoautosomal regions")]
    HeterozygousFatherOnX,
    #[error("heterozygous male proband is impossible on X outside the pseudoautosomal regions")]
    HeterozygousMaleOnX,
}

/// Probability of a parent with diploid genotype `gt` (0 ref, 1 het,
/// 2 hom-alt) transmitting the allele `allele` (0 ref, 1 alt).
fn single_transmit(gt: usize, allele: usize) -> f64 {
    let homozygous_match = (gt == 0 && allele == 0) || (gt == 2 && allele == 1);
    if homozygous_match {
        1.0 - MUTATION_RATE
    } else if gt == 1 {
        0.5
    } else {
        MUTATION_RATE
    }
}

/// Probability of a haploid father (genotype = carried allele) transmitting
/// `allele`; only relevant for daughters on X outside the PAR.
fn haploid_transmit(father_allele: usize, allele: usize) -> f64 {
    if father_allele == allele {
        1.0 - MUTATION_RATE
    } else {
        MUTATION_RATE
    }
}

/// Genotype likelihoods `10^(-PL/10)` of one individual.
fn likelihoods(pl: &[i32]) -> Vec<f64> {
    pl.iter().map(|&pl| 10f64.powf(-f64::from(pl) / 10.0)).collect()
}

/// Hardy-Weinberg diploid genotype prior for the assumed allele frequency.
fn diploid_prior() -> [f64; 3] {
    let q = PRIOR_ALT_FREQ;
    let p = 1.0 - q;
    [p * p, 2.0 * p * q, q * q]
}

/// Allelic prior of a haploid (hemizygous) individual.
fn haploid_prior() -> [f64; 2] {
    [1.0 - PRIOR_ALT_FREQ, PRIOR_ALT_FREQ]
}

/// Map a diploid genotype code onto the two-state index of a hemizygous
/// individual on X outside the PAR.
fn collapse_code(code: u8, err: Error) -> Result<usize, Error> {
    match code {
        0 => Ok(0),
        2 => Ok(1),
        1 => Err(err),
        other => Err(Error::InvalidGenotypeCode(other)),
    }
}

fn check_code(code: u8) -> Result<usize, Error> {
    if code > 2 {
        return Err(Error::InvalidGenotypeCode(code));
    }
    Ok(code as usize)
}

/// Trio transmission probability for father state `f`, mother genotype `m`,
/// and child state `c`.
///
/// State indexing follows the PL vectors passed to the summation: diploid
/// individuals use genotype indices 0/1/2, hemizygous individuals (father on
/// X, male proband on X) use allele indices 0/1.
fn transmission(f: usize, m: usize, c: usize, x_minus_par: bool, proband_male: bool) -> f64 {
    if x_minus_par {
        if proband_male {
            // the father contributes nothing to a son's X
            return single_transmit(m, c);
        }
        // daughter: haploid father, diploid mother
        return match c {
            1 => {
                haploid_transmit(f, 0) * single_transmit(m, 1)
                    + haploid_transmit(f, 1) * single_transmit(m, 0)
            }
            _ => {
                let allele = if c == 0 { 0 } else { 1 };
                haploid_transmit(f, allele) * single_transmit(m, allele)
            }
        };
    }
    match c {
        1 => {
            single_transmit(f, 0) * single_transmit(m, 1)
                + single_transmit(f, 1) * single_transmit(m, 0)
        }
        _ => {
            let allele = if c == 0 { 0 } else { 1 };
            single_transmit(f, allele) * single_transmit(m, allele)
        }
    }
}

/// Posterior probability of the trio genotype configuration `denovo_mode`
/// (father, mother, proband; each 0 ref, 1 het, 2 hom-alt) given the three
/// PL triples.
///
/// On X outside the PAR the father's PL triple is collapsed to the two
/// homozygous states, and so is the proband's if male.
pub fn denovo_probability(
    pl_father: [i32; 3],
    pl_mother: [i32; 3],
    pl_child: [i32; 3],
    is_x_minus_par: bool,
    proband_male: bool,
    denovo_mode: [u8; 3],
) -> Result<f64, Error> {
    let (lik_father, prior_father, mode_father) = if is_x_minus_par {
        (
            likelihoods(&[pl_father[0], pl_father[2]]),
            haploid_prior().to_vec(),
            collapse_code(denovo_mode[0], Error::HeterozygousFatherOnX)?,
        )
    } else {
        (
            likelihoods(&pl_father),
            diploid_prior().to_vec(),
            check_code(denovo_mode[0])?,
        )
    };
    let lik_mother = likelihoods(&pl_mother);
    let prior_mother = diploid_prior();
    let mode_mother = check_code(denovo_mode[1])?;
    let (lik_child, mode_child) = if is_x_minus_par && proband_male {
        (
            likelihoods(&[pl_child[0], pl_child[2]]),
            collapse_code(denovo_mode[2], Error::HeterozygousMaleOnX)?,
        )
    } else {
        (likelihoods(&pl_child), check_code(denovo_mode[2])?)
    };

    let mut numerator = 0.0;
    let mut total = 0.0;
    for (f, lik_f) in lik_father.iter().enumerate() {
        for (m, lik_m) in lik_mother.iter().enumerate() {
            for (c, lik_c) in lik_child.iter().enumerate() {
                let term = prior_father[f]
                    * prior_mother[m]
                    * transmission(f, m, c, is_x_minus_par, proband_male)
                    * lik_f
                    * lik_m
                    * lik_c;
                total += term;
                if (f, m, c) == (mode_father, mode_mother, mode_child) {
                    numerator = term;
                }
            }
        }
    }
    Ok(numerator / total)
}
