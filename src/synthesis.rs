use crate::error;
use crate::error::Result;
use crate::geometry::{Cell, Line, Point};
use crate::imagery::{pixel_error, Raster};
use crate::optimum;
use crate::optimum::{CandidateScore, Chord};
use crate::params::Params;
use crate::rand::Rng;
use crate::serde::Serialize;

/// How much one string darkens every pixel it crosses.
pub const DARKEN_STEP: u8 = 5;
/// Non-improving checkpoints tolerated before giving up.
pub const PATIENCE: usize = 20;
const CHECKPOINT_INTERVAL: usize = 30;
const WARMUP_ROUNDS: usize = 5;
const PROGRESS_INTERVAL: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The error stopped improving for `PATIENCE` checkpoints.
    Converged,
    /// Every sampled chord had a score of zero.
    NoUsefulChords,
    /// Sampling produced no distinct pin pairs.
    Exhausted,
    ChordCapReached,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            StopReason::Converged => write!(f, "no improvement in {} checkpoints", PATIENCE),
            StopReason::NoUsefulChords => write!(f, "no useful chords found"),
            StopReason::Exhausted => write!(f, "no distinct pin pairs to sample"),
            StopReason::ChordCapReached => write!(f, "chord limit reached"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub round: usize,
    pub error: u64,
    pub best_error: u64,
}

#[derive(Debug, Clone)]
pub struct Synthesis {
    pub chords: Vec<Chord>,
    pub render: Raster,
    pub initial_error: u64,
    pub final_error: u64,
    pub rounds: usize,
    pub stop_reason: StopReason,
    pub checkpoints: Vec<Checkpoint>,
}

/// Darkens every in-bounds cell under `chord`, reporting each change.
fn draw<F>(render: &mut Raster, pins: &[Point], chord: Chord, mut on_change: F)
where
    F: FnMut(Cell, u8, u8),
{
    let line = Line::from(chord.endpoints(pins));
    for cell in line.iter(render.width(), render.height()) {
        if let Some((old, new)) = render.darken(cell, DARKEN_STEP) {
            on_change(cell, old, new);
        }
    }
}

/// Draws `chord` and returns the resulting change in squared error.
fn commit(render: &mut Raster, target: &Raster, pins: &[Point], chord: Chord) -> i64 {
    let mut delta = 0;
    draw(render, pins, chord, |cell, old, new| {
        if let Some(t) = target.get(cell) {
            delta += pixel_error(t, new) as i64 - pixel_error(t, old) as i64;
        }
    });
    delta
}

/// Rebuilds the render a sequence of chords produces on a blank canvas.
pub fn replay(pins: &[Point], chords: &[Chord], width: u32, height: u32) -> Result<Raster> {
    let mut render = Raster::blank(width, height)?;
    for chord in chords {
        draw(&mut render, pins, *chord, |_, _, _| {});
    }
    Ok(render)
}

fn log_added_chord(verbosity: u64, chord_count: usize, candidate: &CandidateScore, pins: &[Point]) {
    if verbosity > 0 {
        let (a, b) = candidate.chord.endpoints(pins);
        println!(
            "[{:>6}]:   score: {:>10}     added  {}: {} to {}",
            chord_count, candidate.score, candidate.chord, a, b
        );
    }
}

fn log_progress(verbosity: u64, chord_count: usize, error: u64) {
    if verbosity > 1 && chord_count % PROGRESS_INTERVAL == 0 {
        println!("Chords drawn: {}, current error: {}", chord_count, error);
    }
}

fn is_checkpoint(round: usize) -> bool {
    round <= WARMUP_ROUNDS || round % CHECKPOINT_INTERVAL == 0
}

/// Greedily picks chords until the error stalls, sampling runs dry, or the
/// chord limit is hit.
///
/// Each round samples `params.candidates` pin pairs, scores them against the
/// current render, and draws the best `params.selections` that still have a
/// positive score. The squared error is kept up to date as pixels change and
/// compared against the best seen so far on checkpoint rounds.
pub fn synthesize<R: Rng>(
    params: &Params,
    target: &Raster,
    pins: &[Point],
    rng: &mut R,
    verbosity: u64,
) -> Result<Synthesis> {
    let mut render = Raster::blank(target.width(), target.height())?;
    let mut chords: Vec<Chord> = error::reserve(params.max_chords, "chord sequence")?;
    let mut checkpoints = Vec::new();

    let initial_error = target.squared_error(&render);
    let mut error = initial_error;
    let mut best_error = initial_error;
    let mut stalls = 0;
    let mut rounds = 0;

    if verbosity > 1 {
        println!("Initial error: {} (lower is better)", initial_error);
    }

    let stop_reason = loop {
        if chords.len() >= params.max_chords {
            break StopReason::ChordCapReached;
        }

        let sampled = optimum::sample_chords(rng, params.pin_count, params.candidates)?;
        if sampled.is_empty() {
            break StopReason::Exhausted;
        }

        let room = params.max_chords - chords.len();
        let scored = optimum::score_chords(sampled, pins, target, &render)?;
        // Zero-score chords only add error, so a round may draw fewer than `selections`.
        let best = optimum::find_best_chords(scored, usize::min(params.selections, room))
            .into_iter()
            .filter(|candidate| candidate.score > 0.0)
            .collect::<Vec<_>>();
        if best.is_empty() {
            break StopReason::NoUsefulChords;
        }

        rounds += 1;
        for candidate in best.iter() {
            let delta = commit(&mut render, target, pins, candidate.chord);
            error = (error as i64 + delta) as u64;
            chords.push(candidate.chord);
            log_added_chord(verbosity, chords.len(), candidate, pins);
            log_progress(verbosity, chords.len(), error);
        }

        if is_checkpoint(rounds) {
            if error < best_error {
                best_error = error;
                stalls = 0;
            } else {
                stalls += 1;
            }
            checkpoints.push(Checkpoint {
                round: rounds,
                error,
                best_error,
            });
            if stalls >= PATIENCE {
                break StopReason::Converged;
            }
        }
    };

    let final_error = target.squared_error(&render);
    debug_assert_eq!(error, final_error);

    if verbosity > 1 {
        println!("Stopped: {}", stop_reason);
        println!("(Recap) Initial error: {} (lower is better)", initial_error);
        println!("Final error          : {}", final_error);
    }

    Ok(Synthesis {
        chords,
        render,
        initial_error,
        final_error,
        rounds,
        stop_reason,
        checkpoints,
    })
}
