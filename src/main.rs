//! invmass: invariant mass analysis of a list of particle 4-momenta
//!
//!
//! # Introduction (for the physicist)
//!
//! This small program reads a list of measured 4-momenta (px, py, pz, E),
//! computes the invariant mass m = √(E² - |p|²) of every entry together with
//! the usual collider observables (transverse momentum, rapidity,
//! pseudorapidity, azimuth), then adds all 4-momenta up and computes the
//! invariant mass of the composite system, as one would to reconstruct a
//! resonance from its decay products.
//!
//!
//! # Introduction (for the numerical guy)
//!
//! Nothing constrains the input onto a physical mass shell, so a measured
//! momentum may well come out spacelike once resolution effects are folded
//! in. Taking the square root of a negative radicand is treated as a hard,
//! descriptive error rather than left to produce a NaN that would silently
//! contaminate every result derived from it.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The program is a straight pipeline:
//!
//! * read in the momentum list,
//! * wrap each entry in a numbered detector track,
//! * compute each track's derived kinematic quantities,
//! * merge all tracks into one composite system,
//! * then display / store the results.
//!
//! Merging is the interesting part: it must return the concrete type of its
//! left operand (merging tracks yields a track, with its identifier carried
//! over), which is what the `Kinematic` reconstruction trait is for.

#![warn(missing_docs)]

mod config;
mod momentum;
mod numeric;
mod output;
mod particle;
mod results;

use eyre::WrapErr;

use crate::{config::Configuration, results::FinalResults};

use std::{env, time::Instant};

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // ### INPUT READOUT ###

    // The input file may be named on the command line, with a default that
    // keeps the usual workflow down to one word
    let file_name = env::args().nth(1).unwrap_or_else(|| "momenta".to_owned());

    // The work of loading, parsing, and checking the momentum list has been
    // offloaded to a dedicated struct
    let cfg = Configuration::load(&file_name).wrap_err("Failed to load the input momenta")?;

    // ### ANALYSIS EXECUTION ###

    // NOTE: The clock starts after input I/O, to avoid IO-induced timing
    //       fluctuations
    let saved_time = Instant::now();

    // Compute the per-track masses and assemble the composite system
    let results = FinalResults::compute(&cfg).wrap_err("Failed to run the analysis")?;

    // ### RESULTS DISPLAY AND STORAGE ###

    // Measure how much time has elapsed
    let elapsed_time = saved_time.elapsed();

    // Send the results to the standard output and to disk and we're done
    output::dump_results(&results, elapsed_time).wrap_err("Failed to output the results")?;
    Ok(())
}
