extern crate clap;
extern crate image;
extern crate rand;
extern crate serde;

mod cli_app;
mod error;
mod geometry;
mod imagery;
mod inout;
mod optimum;
mod params;
mod pins;
mod string_art;
mod synthesis;

fn main() {
    if let Err(error) = string_art::create_string() {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
