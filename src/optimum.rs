use crate::error;
use crate::error::Result;
use crate::geometry::Point;
use crate::imagery::Raster;
use crate::rand::Rng;
use crate::serde::Serialize;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

/// A string between two distinct pins, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chord {
    pub a: usize,
    pub b: usize,
}

impl Chord {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub fn endpoints(&self, pins: &[Point]) -> (Point, Point) {
        (pins[self.a], pins[self.b])
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:>5} to {:>5}", self.a, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub chord: Chord,
    pub score: f64,
}

/// Darkness the target still wants along the line from `a` to `b`.
///
/// Per cell this is `(255 - target) - (255 - render)`, counted only when
/// positive. Cells outside the image are skipped.
pub fn residual(target: &Raster, render: &Raster, a: Point, b: Point) -> f64 {
    target
        .line_cells(a, b)
        .filter_map(|cell| Some((target.get(cell)?, render.get(cell)?)))
        .map(|(t, r)| i64::max(0, r as i64 - t as i64))
        .sum::<i64>() as f64
}

/// Draws up to `count` random pin pairs, skipping self-pairs.
///
/// Gives up after `10 * count` draws, so a single pin yields nothing.
pub fn sample_chords<R: Rng>(rng: &mut R, pin_count: usize, count: usize) -> Result<Vec<Chord>> {
    let max_attempts = count.saturating_mul(10);
    let mut chords = error::reserve(count, "candidate chords")?;
    let mut attempts = 0;
    while chords.len() < count && attempts < max_attempts {
        attempts += 1;
        let a = rng.gen_range(0..pin_count);
        let b = rng.gen_range(0..pin_count);
        if a != b {
            chords.push(Chord::new(a, b));
        }
    }
    Ok(chords)
}

/// Scores every chord in parallel. The output keeps the input order.
pub fn score_chords(
    chords: Vec<Chord>,
    pins: &[Point],
    target: &Raster,
    render: &Raster,
) -> Result<Vec<CandidateScore>> {
    let mut scores = error::reserve(chords.len(), "candidate scores")?;
    chords
        .into_par_iter()
        .map(|chord| {
            let (a, b) = chord.endpoints(pins);
            CandidateScore {
                chord,
                score: residual(target, render, a, b),
            }
        })
        .collect_into_vec(&mut scores);
    Ok(scores)
}

/// The `max` highest scores, best first. Equal scores keep sampling order.
pub fn find_best_chords(mut candidates: Vec<CandidateScore>, max: usize) -> Vec<CandidateScore> {
    candidates.sort_by(|x, y| y.score.total_cmp(&x.score));
    candidates.truncate(max);
    candidates
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn target() -> Raster {
        #[rustfmt::skip]
        let pixels = vec![
            0,   255, 255, 255,
            255, 100, 255, 255,
            255, 255, 200, 255,
            255, 255, 255, 255,
        ];
        Raster::from_pixels(4, 4, pixels).unwrap()
    }

    fn candidate(a: usize, b: usize, score: f64) -> CandidateScore {
        CandidateScore {
            chord: Chord::new(a, b),
            score,
        }
    }

    #[test]
    fn test_residual_on_blank_render() {
        let render = Raster::blank(4, 4).unwrap();
        let score = residual(&target(), &render, p(0.0, 0.0), p(3.0, 3.0));
        assert_eq!(255.0 + 155.0 + 55.0, score);
    }

    #[test]
    fn test_residual_rounds_endpoints() {
        let render = Raster::blank(4, 4).unwrap();
        let exact = residual(&target(), &render, p(0.0, 0.0), p(3.0, 3.0));
        let rounded = residual(&target(), &render, p(0.3, -0.2), p(2.6, 3.4));
        assert_eq!(exact, rounded);
    }

    #[test]
    fn test_residual_ignores_over_darkened_cells() {
        let render = Raster::from_pixels(4, 4, vec![0; 16]).unwrap();
        assert_eq!(0.0, residual(&target(), &render, p(0.0, 0.0), p(3.0, 3.0)));
    }

    #[test]
    fn test_residual_is_zero_when_render_matches_target() {
        let target = target();
        let render = target.clone();
        let lines = [
            (p(0.0, 0.0), p(3.0, 3.0)),
            (p(0.0, 3.0), p(3.0, 0.0)),
            (p(1.0, 0.0), p(1.0, 3.0)),
        ];
        for (a, b) in lines.iter() {
            assert_eq!(0.0, residual(&target, &render, *a, *b));
        }
    }

    #[test]
    fn test_residual_skips_out_of_bounds_cells() {
        let render = Raster::blank(4, 4).unwrap();
        let score = residual(&target(), &render, p(-3.0, 0.0), p(0.0, 0.0));
        assert_eq!(255.0, score);
    }

    #[test]
    fn test_chord_display_lists_pin_indices() {
        assert_eq!("    3 to    12", Chord::new(3, 12).to_string());
    }

    #[test]
    fn test_sample_chords_never_pairs_a_pin_with_itself() {
        let mut rng = Pcg32::seed_from_u64(7);
        let chords = sample_chords(&mut rng, 3, 500).unwrap();
        assert_eq!(500, chords.len());
        assert!(chords.iter().all(|c| c.a != c.b && c.a < 3 && c.b < 3));
    }

    #[test]
    fn test_sample_chords_with_one_pin_gives_up() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(sample_chords(&mut rng, 1, 20).unwrap().is_empty());
    }

    #[test]
    fn test_sample_chords_is_reproducible() {
        let first = sample_chords(&mut Pcg32::seed_from_u64(42), 100, 50).unwrap();
        let second = sample_chords(&mut Pcg32::seed_from_u64(42), 100, 50).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_chords_keeps_order() {
        let pins = vec![p(0.0, 0.0), p(3.0, 3.0), p(3.0, 0.0)];
        let render = Raster::blank(4, 4).unwrap();
        let chords = vec![Chord::new(1, 2), Chord::new(0, 1), Chord::new(2, 0)];
        let scores = score_chords(chords.clone(), &pins, &target(), &render).unwrap();
        assert_eq!(chords, scores.iter().map(|c| c.chord).collect::<Vec<_>>());
        assert_eq!(
            vec![0.0, 465.0, 255.0],
            scores.iter().map(|c| c.score).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_find_best_chords_is_stable() {
        let candidates = vec![
            candidate(0, 1, 5.0),
            candidate(1, 2, 9.0),
            candidate(2, 3, 5.0),
            candidate(3, 4, 0.0),
            candidate(4, 5, 9.0),
        ];
        let best = find_best_chords(candidates, 4);
        assert_eq!(
            vec![
                candidate(1, 2, 9.0),
                candidate(4, 5, 9.0),
                candidate(0, 1, 5.0),
                candidate(2, 3, 5.0)
            ],
            best
        );
    }

    #[test]
    fn test_find_best_chords_with_fewer_candidates_than_max() {
        let best = find_best_chords(vec![candidate(0, 1, 1.0)], 10);
        assert_eq!(1, best.len());
    }
}
