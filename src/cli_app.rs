use crate::error::ConfigurationError;
use crate::params::Params;
use crate::pins::PinArrangement;
use crate::serde::Serialize;
use clap::ArgMatches;

mod app;

/// The arguments passed in by the user. Numbers are checked by `params`.
#[derive(Debug, Clone, Serialize)]
pub struct Args {
    pub input_filepath: String,
    pub output_filepath: Option<String>,
    pub pins_filepath: Option<String>,
    pub data_filepath: Option<String>,
    pub pin_count: i64,
    pub candidates: i64,
    pub selections: i64,
    pub max_chords: i64,
    pub pin_arrangement: PinArrangement,
    pub seed: Option<u64>,
    pub verbosity: u64,
}

fn string_arg(matches: &ArgMatches, name: &str) -> String {
    matches
        .get_one::<String>(name)
        .expect("Required or default value")
        .to_string()
}

fn opt_string_arg(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn number_arg(matches: &ArgMatches, name: &str) -> i64 {
    *matches.get_one::<i64>(name).expect("There is a default")
}

fn from_matches(matches: &ArgMatches) -> Args {
    Args {
        input_filepath: string_arg(matches, "input_filepath"),
        output_filepath: opt_string_arg(matches, "output_filepath"),
        pins_filepath: opt_string_arg(matches, "pins_filepath"),
        data_filepath: opt_string_arg(matches, "data_filepath"),
        pin_count: number_arg(matches, "pin_count"),
        candidates: number_arg(matches, "candidates"),
        selections: number_arg(matches, "selections"),
        max_chords: number_arg(matches, "max_chords"),
        pin_arrangement: *matches
            .get_one::<PinArrangement>("pin_arrangement")
            .expect("There is a default"),
        seed: matches.get_one::<u64>("seed").copied(),
        verbosity: matches.get_count("verbose") as u64,
    }
}

pub fn parse_args() -> Args {
    let args = from_matches(&app::create().get_matches());

    if args.verbosity > 1 {
        println!("Running with arguments: {:?}", args);
    }

    args
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    app::create()
        .try_get_matches_from(itr)
        .map(|matches| from_matches(&matches))
}

impl Args {
    pub fn params(&self) -> Result<Params, ConfigurationError> {
        Params::new(
            self.pin_count,
            self.candidates,
            self.selections,
            self.max_chords,
        )
    }
}
