//! Mechanism for loading and sharing the analysis input

use crate::{numeric::Float, particle::{Particle, Track}, Result};

use eyre::{ensure, eyre, WrapErr};

use std::{fs::File, io::Read, str::FromStr};

/// Analysis input: the list of tracks whose masses are to be computed
#[derive(Debug)]
pub struct Configuration {
    /// Tracks to be analyzed, numbered from 1 in input order
    pub tracks: Vec<Track>,
}
//
impl Configuration {
    /// Load the input from a file, check it, and print it out
    pub fn load(file_name: &str) -> Result<Self> {
        // Read out the momentum list file or die trying
        let config_str = {
            let mut config_file = File::open(file_name)
                .wrap_err_with(|| format!("Could not open input file \"{}\"", file_name))?;
            let mut buffer = String::new();
            config_file.read_to_string(&mut buffer)?;
            buffer
        };

        // Decode the file contents
        let config = Self::parse(&config_str)?;

        // Display the input as it was understood (this eases debugging of
        // malformed momentum lists)
        config.print();
        Ok(config)
    }

    /// Decode the textual form of the input
    ///
    /// Every line carries one track as four whitespace-separated real
    /// numbers (px, py, pz, E). Blank lines are skipped, and a `#` starts a
    /// comment which runs to the end of the line.
    ///
    pub fn parse(text: &str) -> Result<Self> {
        let mut tracks = Vec::new();
        for (line_idx, line) in text.lines().enumerate() {
            // Strip comments and skip lines without data
            let line_num = line_idx + 1;
            let data = line.split('#').next().unwrap_or("").trim();
            if data.is_empty() {
                continue;
            }

            // This closure fetches the next momentum component of the line,
            // tagging it with the name of the component which it is supposed
            // to fill to ease error reporting.
            let mut items = data.split_whitespace();
            let mut next_item = |name: &'static str| -> Result<InputItem> {
                items
                    .next()
                    .map(|data| InputItem::new(name, line_num, data))
                    .ok_or_else(|| eyre!("Missing {} on line {}", name, line_num))
            };

            // Decode the components into a numbered track
            let particle = Particle::new(
                next_item("px")?.parse::<Float>()?,
                next_item("py")?.parse::<Float>()?,
                next_item("pz")?.parse::<Float>()?,
                next_item("E")?.parse::<Float>()?,
            );
            ensure!(
                items.next().is_none(),
                "Trailing data after the energy on line {}",
                line_num
            );
            tracks.push(Track::new(tracks.len() + 1, particle));
        }

        // A sensible analysis needs at least one track
        ensure!(!tracks.is_empty(), "Please provide at least one track");
        Ok(Configuration { tracks })
    }

    /// Display the input, one line per track
    pub fn print(&self) {
        println!("Tracks         : {}", self.tracks.len());
        for track in &self.tracks {
            println!("{}", track);
        }
    }
}

/// A value from the input file, tagged with the momentum component which it
/// is supposed to map and with its line for error reporting purposes.
struct InputItem<'data> {
    name: &'static str,
    line: usize,
    data: &'data str,
}
//
impl<'data> InputItem<'data> {
    /// Build an input item from a component tag and raw line data
    fn new(name: &'static str, line: usize, data: &'data str) -> Self {
        Self { name, line, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data.parse::<T>().map_err(|err| {
            eyre!("Could not parse {} on line {}: {}", self.name, self.line, err)
        })
    }
}
