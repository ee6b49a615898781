//! This module is in charge of outputting the final analysis results to the
//! standard output and to a report file

use crate::{
    momentum::{E, X, Y, Z},
    numeric::Float,
    particle::Kinematic,
    results::FinalResults,
    Result,
};

use eyre::WrapErr;
use prefix_num_ops::real::*;

use std::{
    fs::File,
    io::{self, Write},
    time::Duration,
};

use time::{format_description, OffsetDateTime};

/// Name of the report file
const REPORT_FILE: &str = "res.mass";

// Number of significant digits in file output
//
// Printing one less than the actual machine type precision keeps the report
// from depending on how the last ulp happens to round.
//
const SIG_DIGITS: usize = (Float::DIGITS - 1) as usize;

/// Output the analysis results to the console and to disk
pub fn dump_results(results: &FinalResults, elapsed_time: Duration) -> Result<()> {
    // Print out a summary of the results on stdout
    results.print();

    // Compute a timestamp of when the analysis ended
    let timestamp_format = format_description::parse(
        "[day]-[month repr:short]-[year repr:last_two]   [hour]:[minute]:[second]",
    )?;
    let timestamp = OffsetDateTime::now_utc().format(&timestamp_format)?;

    // Write the report file
    let mut report = File::create(REPORT_FILE)
        .wrap_err_with(|| format!("Could not create report file \"{}\"", REPORT_FILE))?;
    write_report(&mut report, results, &timestamp, elapsed_time)
        .wrap_err("Failed to write the report")?;
    Ok(())
}

/// Write down the full analysis report
fn write_report(
    report: &mut impl Write,
    results: &FinalResults,
    timestamp: &str,
    elapsed_time: Duration,
) -> Result<()> {
    let cfg = results.cfg;

    // Write a timestamp of when the analysis ended
    writeln_report(report, timestamp)?;
    writeln_report(report, "---------------------------------------------")?;
    writeln_report(report, ("Number of tracks", cfg.tracks.len()))?;

    // Write one line per track: 4-momentum, derived observables, mass
    let decimals = (SIG_DIGITS - 1).min(7);
    let width = decimals + 8;
    writeln!(report)?;
    writeln!(
        report,
        "{:>4}{:>width$}{:>width$}{:>width$}{:>width$}{:>width$}{:>width$}{:>width$}{:>width$}{:>width$}",
        "id", "px", "py", "pz", "E", "pT", "y", "eta", "phi", "mass",
        width = width,
    )?;
    for (track, mass) in cfg.tracks.iter().zip(results.track_masses.iter()) {
        let p = track.momentum();
        writeln!(
            report,
            "{:>4}{:>width$.decs$e}{:>width$.decs$e}{:>width$.decs$e}{:>width$.decs$e}\
             {:>width$.decs$e}{:>width$.decs$e}{:>width$.decs$e}{:>width$.decs$e}{:>width$.decs$e}",
            track.id(),
            p[X],
            p[Y],
            p[Z],
            p[E],
            track.transverse_momentum(),
            track.rapidity(),
            track.pseudorapidity(),
            track.azimuth(),
            mass,
            width = width,
            decs = decimals,
        )?;
    }
    writeln!(report)?;

    // Write the composite system and its invariant mass
    writeln_report(report, "---------------------------------------------")?;
    let system_desc = results.system.to_string();
    writeln_report(report, ("Composite system", &system_desc[..]))?;
    writeln_report(report, ("Invariant mass of the system", results.system_mass))?;

    // Write the performance stats
    let elapsed_secs =
        (elapsed_time.as_secs() as Float) + 1e-9 * (elapsed_time.subsec_nanos() as Float);
    writeln_report(report, "---------------------------------------------")?;
    writeln_report(report, ("Elapsed time (s)", elapsed_secs))?;
    let secs_per_track = elapsed_secs / (cfg.tracks.len() as Float);
    writeln_report(report, ("Elapsed time per track (s)", secs_per_track))?;
    Ok(())
}

/// Text output facility which keeps the report file columns aligned
fn writeln_report(report: &mut impl Write, data: impl WriteReport) -> Result<()> {
    write!(report, " ")?;
    data.write(report)?;
    writeln!(report)?;
    Ok(())
}

/// Trait implemented by things which can be printed in the report file
trait WriteReport: Sized {
    /// Write down `self` to the report file
    fn write(self, report: &mut impl Write) -> io::Result<()>;
}

impl WriteReport for &str {
    // Strings work in the usual way
    fn write(self, report: &mut impl Write) -> io::Result<()> {
        write!(report, "{}", self)
    }
}

impl WriteReport for usize {
    // Integers work in the usual way too
    fn write(self, report: &mut impl Write) -> io::Result<()> {
        write!(report, "{}", self)
    }
}

impl WriteReport for Float {
    // Floats use engineering notation at the configured precision
    fn write(self, report: &mut impl Write) -> io::Result<()> {
        write_engineering(report, self, SIG_DIGITS)
    }
}

impl<T: WriteReport> WriteReport for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, report: &mut impl Write) -> io::Result<()> {
        write!(report, "{:<31}: ", self.0)?;
        self.1.write(report)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this switches
/// between naive and scientific notation depending on the magnitude of the
/// number: scientific whenever naive notation would either have to print
/// more significant digits than requested or drown the value in leading
/// zeroes.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> io::Result<()> {
    if x == 0. {
        // Zero is special because you can't take its log
        return write!(writer, "0");
    }
    let magnitude = log10(abs(x));
    if magnitude < -3. || magnitude >= (sig_digits as Float) {
        return write!(writer, "{:.1$e}", x, sig_digits - 1);
    }

    // Naive notation at a constant number of significant digits. Rust's
    // precision controls the number of digits after the decimal point, so it
    // must be adjusted depending on the magnitude, with one extra digit
    // below 1 where the leading zero is not significant.
    let mut precision = (sig_digits as isize - 1 - magnitude.trunc() as isize) as usize;
    if magnitude < 0. {
        precision += 1;
    }

    // Trailing zeros and decimal points are not expected in naive notation
    let formatted = format!("{:.1$}", x, precision);
    if formatted.contains('.') {
        write!(
            writer,
            "{}",
            formatted.trim_end_matches('0').trim_end_matches('.')
        )
    } else {
        write!(writer, "{}", formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    fn engineering(x: Float) -> String {
        let mut buffer = Vec::new();
        write_engineering(&mut buffer, x, 6).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn engineering_notation_zero() {
        assert_eq!(engineering(0.), "0");
    }

    #[test]
    fn engineering_notation_naive_range() {
        assert_eq!(engineering(92.7362), "92.7362");
        assert_eq!(engineering(-1.5), "-1.5");
        assert_eq!(engineering(0.25), "0.25");
        assert_eq!(engineering(0.001), "0.001");
        assert_eq!(engineering(123456.), "123456");
    }

    #[test]
    fn engineering_notation_scientific_range() {
        assert_eq!(engineering(0.0001), "1.00000e-4");
        assert_eq!(engineering(1000000.), "1.00000e6");
        assert_eq!(engineering(12345678.), "1.23457e7");
    }

    #[test]
    fn report_contains_the_system_mass_line() {
        let cfg = Configuration::parse("10 0 0 10\n-10 0 0 10\n").unwrap();
        let results = FinalResults::compute(&cfg).unwrap();
        let mut buffer = Vec::new();
        write_report(
            &mut buffer,
            &results,
            "01-Jan-70   00:00:00",
            Duration::from_secs(1),
        )
        .unwrap();
        let report = String::from_utf8(buffer).unwrap();
        assert!(report.contains("Number of tracks"));
        assert!(report.contains("Invariant mass of the system   : 20"));
    }
}
