use crate::error;
use crate::error::Result;
use crate::geometry::Point;
use crate::serde::Serialize;

const P: fn(f64, f64) -> Point = Point::new;

/// Lay out `count` pins for a `width` x `height` image.
///
/// Callers guarantee `count >= 1` and both sides `>= 2`.
pub fn generate(
    pin_arrangement: &PinArrangement,
    count: usize,
    width: u32,
    height: u32,
) -> Result<Vec<Point>> {
    let place = placement(pin_arrangement);
    let mut pins = error::reserve(count, "pin locations")?;
    pins.extend((0..count).map(|i| place(i, count, width, height)));
    Ok(pins)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinArrangement {
    Perimeter,
    Circle,
}

impl core::str::FromStr for PinArrangement {
    type Err = String;
    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        match string {
            "perimeter" => Ok(PinArrangement::Perimeter),
            "circle" => Ok(PinArrangement::Circle),
            _ => Err(format!("Invalid pin arrangement: \"{}\"", string)),
        }
    }
}

impl std::fmt::Display for PinArrangement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            PinArrangement::Perimeter => write!(f, "perimeter"),
            PinArrangement::Circle => write!(f, "circle"),
        }
    }
}

/// Location of pin `index` out of `count`.
type Placement = fn(usize, usize, u32, u32) -> Point;

fn placement(pin_arrangement: &PinArrangement) -> Placement {
    match pin_arrangement {
        PinArrangement::Perimeter => perimeter,
        PinArrangement::Circle => circle,
    }
}

// Clockwise walk from the top-left corner with equal arc length between pins.
fn perimeter(index: usize, count: usize, width: u32, height: u32) -> Point {
    let w = (width - 1) as f64;
    let h = (height - 1) as f64;
    let pos = index as f64 * (2.0 * w + 2.0 * h) / count as f64;

    if pos < w {
        P(pos, 0.0)
    } else if pos < w + h {
        P(w, pos - w)
    } else if pos < 2.0 * w + h {
        P(w - (pos - w - h), h)
    } else {
        P(0.0, h - (pos - 2.0 * w - h))
    }
}

// Largest centred circle, equal angle between pins.
fn circle(index: usize, count: usize, width: u32, height: u32) -> Point {
    let center_x = (width - 1) as f64 / 2.0;
    let center_y = (height - 1) as f64 / 2.0;
    let radius = f64::min(center_x, center_y);
    let angle = index as f64 * std::f64::consts::PI * 2.0 / count as f64;
    P(
        (center_x + radius * angle.cos()).clamp(0.0, 2.0 * center_x),
        (center_y + radius * angle.sin()).clamp(0.0, 2.0 * center_y),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    const SIZES: [(u32, u32); 5] = [(2, 2), (25, 25), (123, 457), (2880, 1800), (10, 10000)];
    const COUNTS: [usize; 7] = [2, 3, 8, 60, 200, 400, 1000];

    fn in_bounds(point: &Point, width: u32, height: u32) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= (width - 1) as f64
            && point.y <= (height - 1) as f64
    }

    fn all_distinct(points: &[Point]) -> bool {
        points
            .iter()
            .enumerate()
            .all(|(i, a)| points.iter().skip(i + 1).all(|b| a != b))
    }

    #[test]
    fn test_generate_pins_count_bounds_and_distinctness() {
        for arrangement in [PinArrangement::Perimeter, PinArrangement::Circle].iter() {
            for count in COUNTS.iter() {
                for (width, height) in SIZES.iter() {
                    let pins = generate(arrangement, *count, *width, *height).unwrap();
                    let context = format!(
                        "failed on {}, count: {}, width: {}, height: {}",
                        arrangement, count, width, height
                    );
                    assert_eq!(*count, pins.len(), "{}", context);
                    assert!(pins.iter().all(|p| in_bounds(p, *width, *height)), "{}", context);
                    assert!(all_distinct(&pins), "{}", context);
                }
            }
        }
    }

    #[test]
    fn test_single_pin() {
        assert_eq!(vec![P(0.0, 0.0)], generate(&PinArrangement::Perimeter, 1, 25, 25).unwrap());
        assert_eq!(vec![P(24.0, 12.0)], generate(&PinArrangement::Circle, 1, 25, 25).unwrap());
    }

    #[test]
    fn test_perimeter_generate_pins_locations() {
        assert_eq!(
            vec![
                P(0.0, 0.0),
                P(12.0, 0.0),
                P(24.0, 0.0),
                P(24.0, 12.0),
                P(24.0, 24.0),
                P(12.0, 24.0),
                P(0.0, 24.0),
                P(0.0, 12.0)
            ],
            generate(&PinArrangement::Perimeter, 8, 25, 25).unwrap()
        )
    }

    #[test]
    fn test_perimeter_non_square() {
        // Perimeter of 2 * 4 + 2 * 2 = 12, so pins sit every 3 units.
        assert_eq!(
            vec![P(0.0, 0.0), P(3.0, 0.0), P(4.0, 2.0), P(1.0, 2.0)],
            generate(&PinArrangement::Perimeter, 4, 5, 3).unwrap()
        )
    }

    #[test]
    fn test_circle_generate_pins_locations() {
        let pins = generate(&PinArrangement::Circle, 4, 21, 11).unwrap();
        let expected = [P(15.0, 5.0), P(10.0, 10.0), P(5.0, 5.0), P(10.0, 0.0)];
        for (pin, expected) in pins.iter().zip(expected.iter()) {
            assert!((pin.x - expected.x).abs() < 1e-9, "{} vs {}", pin, expected);
            assert!((pin.y - expected.y).abs() < 1e-9, "{} vs {}", pin, expected);
        }
    }

    #[test]
    fn test_impossible_pin_count_is_a_resource_error() {
        let result = generate(&PinArrangement::Perimeter, usize::MAX, 25, 25);
        assert!(matches!(result, Err(error::Error::Resource { .. })));
    }

    #[test]
    fn test_pin_arrangement_from_str() {
        assert_eq!(Ok(PinArrangement::Circle), "circle".parse());
        assert_eq!(Ok(PinArrangement::Perimeter), "perimeter".parse());
        assert!("grid".parse::<PinArrangement>().is_err());
    }
}
