//! Computation and storage of the final analysis results

use crate::{
    config::Configuration,
    numeric::Float,
    particle::{Kinematic, Track},
    Result,
};

use eyre::WrapErr;

/// Final results of the analysis
#[derive(Debug)]
pub struct FinalResults<'cfg> {
    /// Invariant mass of each input track, in input order
    pub track_masses: Vec<Float>,

    /// Composite system assembled by merging all input tracks
    pub system: Track,

    /// Invariant mass of the composite system
    pub system_mass: Float,

    /// Input of the analysis (for further derivation)
    pub cfg: &'cfg Configuration,
}
//
impl<'cfg> FinalResults<'cfg> {
    /// Run the analysis over a loaded input
    pub fn compute(cfg: &'cfg Configuration) -> Result<Self> {
        // Compute the invariant mass of every input track
        let track_masses = cfg
            .tracks
            .iter()
            .map(|track| {
                track.mass().wrap_err_with(|| {
                    format!("Failed to compute the mass of track #{}", track.id())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Merge all tracks into one composite system. Merging goes left to
        // right, so the system inherits the identity of the first track.
        let mut tracks = cfg.tracks.iter();
        let system = match tracks.next() {
            Some(&first) => tracks.fold(first, |system, track| system.merged(track)),
            None => unreachable!("checked when loading the input"),
        };
        let system_mass = system
            .mass()
            .wrap_err("Failed to compute the mass of the composite system")?;

        Ok(Self {
            track_masses,
            system,
            system_mass,
            cfg,
        })
    }

    /// Display a summary of the analysis on the standard output
    pub fn print(&self) {
        println!();
        println!("Track masses");
        for (track, mass) in self.cfg.tracks.iter().zip(self.track_masses.iter()) {
            println!("#{:<4}   : {:.6}", track.id(), mass);
        }
        println!();
        println!("System         : {}", self.system);
        println!("Invariant mass : {:.6}", self.system_mass);
    }
}
