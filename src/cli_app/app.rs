use clap::{command, value_parser, Command};

use crate::clap::Arg;
use crate::params::CHORD_CAP;
use crate::pins::PinArrangement;

fn integer_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .value_name("INTEGER")
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
}

pub fn create() -> Command {
    command!()
    .arg(Arg::new("input_filepath")
        .value_name("FILEPATH")
        .short('i')
        .long("input-filepath")
        .required(true)
        .help("Path to the grayscale image that will be rendered with strings (PGM, PNG, or any other format the image crate reads).")
    )
    .arg(Arg::new("output_filepath")
        .value_name("FILEPATH")
        .short('o')
        .long("output-filepath")
        .help("Location to save the generated string image. Paths ending in `.pgm` are written as ASCII PGM.")
    )
    .arg(Arg::new("pins_filepath")
        .value_name("FILEPATH")
        .long("pins-filepath")
        .help("Location to save an image of the pin locations.")
    )
    .arg(Arg::new("data_filepath")
        .value_name("FILEPATH")
        .short('d')
        .long("data-filepath")
        .help("The script will write run information as a JSON file if this filepath is given. The run information includes argument values, starting and ending errors, the stop reason, pin locations, and the ordered list of strings between pins.")
    )
    .arg(integer_arg("pin_count")
        .short('n')
        .long("pin-count")
        .default_value("200")
        .help("How many pins to place around the image.")
    )
    .arg(integer_arg("candidates")
        .short('p')
        .long("candidates")
        .default_value("1000")
        .help("How many random strings to score in each round.")
    )
    .arg(integer_arg("selections")
        .short('s')
        .long("selections")
        .default_value("10")
        .help("How many of each round's best strings to draw. Must not exceed --candidates.")
    )
    .arg(integer_arg("max_chords")
        .short('m')
        .long("max-chords")
        .default_value(CHORD_CAP.to_string())
        .help(format!("The maximum number of strings in the finished work (at most {}).", CHORD_CAP))
    )
    .arg(Arg::new("pin_arrangement")
        .value_name("ARRANGEMENT")
        .short('r')
        .long("pin-arrangement")
        .value_parser(|s: &str| s.parse::<PinArrangement>())
        .default_value("perimeter")
        .help("Should the pins be spread evenly along the image's perimeter, or around the largest centered circle? [values: perimeter, circle]")
    )
    .arg(Arg::new("seed")
        .value_name("INTEGER")
        .long("seed")
        .value_parser(value_parser!(u64))
        .help("Seed for the random string sampler. Runs with the same seed and arguments produce the same strings.")
    )
    .arg(Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(clap::ArgAction::Count)
        .help("Output debugging messages. Pass multiple times for more verbose logging.")
    )
}
