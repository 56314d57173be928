use crate::cli_app;
use crate::cli_app::Args;
use crate::error::Result;
use crate::geometry::Point;
use crate::imagery;
use crate::imagery::Raster;
use crate::inout;
use crate::inout::Data;
use crate::params::Params;
use crate::pins;
use crate::synthesis;
use crate::rand::SeedableRng;
use rand_pcg::Pcg32;
use std::time::Instant;

// Create an image of the string art and report the pin sequence
pub fn create_string() -> Result<()> {
    let args = cli_app::parse_args();
    let params = args.params()?;

    let target = inout::read_target(&args.input_filepath)?;
    let width = target.width();
    let height = target.height();

    if args.verbosity > 0 {
        println!("Loaded image: {} x {} pixels", width, height);
    }

    let pins = pins::generate(&args.pin_arrangement, params.pin_count, width, height)?;

    if let Some(ref pins_filepath) = args.pins_filepath {
        inout::write_raster(&imagery::pin_crosshairs(width, height, &pins)?, pins_filepath)?;
    }

    let data = run(args, &params, &target, pins)?;

    if let Some(ref filepath) = data.args.output_filepath {
        let render = synthesis::replay(
            &data.pin_locations,
            &data.chords,
            data.image_width,
            data.image_height,
        )?;
        inout::write_raster(&render, filepath)?;
    }

    print_statistics(&data, &params);

    if let Some(ref data_filepath) = data.args.data_filepath {
        inout::write_data(&data, data_filepath)?;
    }

    Ok(())
}

fn run(args: Args, params: &Params, target: &Raster, pins: Vec<Point>) -> Result<Data> {
    let mut rng = match args.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy(),
    };

    let start_at = Instant::now();
    let synthesis = synthesis::synthesize(params, target, &pins, &mut rng, args.verbosity)?;
    let elapsed_seconds = start_at.elapsed().as_secs_f64();

    Ok(Data::new(args, pins, &synthesis, elapsed_seconds))
}

fn print_statistics(data: &Data, params: &Params) {
    println!();
    println!("=== Run statistics ===");
    println!("Parameters:");
    println!("  Pins (n):                   {}", params.pin_count);
    println!("  Candidates per round (p):   {}", params.candidates);
    println!("  Selections per round (s):   {}", params.selections);
    println!("Results:");
    println!("  Stopped because:            {}", data.stop_reason);
    println!("  Strings drawn:              {}", data.chord_count);
    println!("  Initial error:              {}", data.initial_error);
    println!("  Final error:                {}", data.final_error);
    println!("  Elapsed seconds:            {:.2}", data.elapsed_seconds);
}
