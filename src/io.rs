//! Plain-text point input and Voronoi vertex output.
//!
//! The input format is an integer count `N` followed by `N` coordinate
//! pairs, all separated by arbitrary whitespace:
//!
//! ```text
//! 3
//! 1 1
//! 2 1
//! 2 2
//! ```
//!
//! Output is one `"x y"` line per point, in the order given.

use std::io::{Read, Write};

use thiserror::Error;

use crate::core::algorithms::voronoi::{VoronoiError, voronoi_vertices};
use crate::core::delaunay_triangulation::{
    DelaunayTriangulation, TriangulationError, TriangulationOptions,
};
use crate::geometry::point::Point;

/// Malformed point input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input holds no tokens at all.
    #[error("Malformed input: missing point count")]
    MissingCount,
    /// The leading token is not an integer.
    #[error("Malformed input: point count {token:?} is not an integer")]
    InvalidCount {
        /// The offending token.
        token: String,
    },
    /// The leading integer is negative.
    #[error("Malformed input: point count {count} is negative")]
    NegativeCount {
        /// The parsed count.
        count: i64,
    },
    /// A coordinate token is not a number.
    #[error("Malformed input: coordinate {index} ({token:?}) is not a number")]
    InvalidCoordinate {
        /// Zero-based position among the coordinate tokens.
        index: usize,
        /// The offending token.
        token: String,
    },
    /// A coordinate parses to NaN or infinity.
    #[error("Malformed input: coordinate {index} ({token:?}) is not finite")]
    NonFiniteCoordinate {
        /// Zero-based position among the coordinate tokens.
        index: usize,
        /// The offending token.
        token: String,
    },
    /// The number of complete coordinate pairs differs from the count.
    #[error("Malformed input: expected {expected} points, found {found}")]
    CountMismatch {
        /// The declared count.
        expected: usize,
        /// Complete pairs actually supplied.
        found: usize,
    },
    /// An odd number of coordinates leaves an unpaired value.
    #[error("Malformed input: coordinate {token:?} has no partner")]
    DanglingCoordinate {
        /// The unpaired token.
        token: String,
    },
    /// Reading the input failed.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the end-to-end [`run`] pipeline.
#[derive(Debug, Error)]
pub enum RunError {
    /// The input could not be parsed.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Triangulation failed fatally.
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
    /// The dual could not be built.
    #[error(transparent)]
    Voronoi(#[from] VoronoiError),
    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Parses a count-prefixed list of coordinate pairs.
///
/// # Errors
///
/// Returns an [`InputError`] describing the first problem found. Every
/// coordinate token is validated before pairs are counted, so a bad token
/// is reported in preference to a count mismatch.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::geometry::point::Point;
/// use delaunay_dual::io::parse_points;
///
/// let points = parse_points("2\n0 0\n1.5 -2\n").unwrap();
/// assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(1.5, -2.0)]);
///
/// assert!(parse_points("3\n0 0\n1 1\n").is_err());
/// ```
pub fn parse_points(input: &str) -> Result<Vec<Point<f64>>, InputError> {
    let mut tokens = input.split_whitespace();
    let count_token = tokens.next().ok_or(InputError::MissingCount)?;
    let count: i64 = count_token
        .parse()
        .map_err(|_| InputError::InvalidCount {
            token: count_token.to_string(),
        })?;
    let expected = usize::try_from(count).map_err(|_| InputError::NegativeCount { count })?;

    let coords = tokens
        .enumerate()
        .map(|(index, token)| parse_coordinate(index, token))
        .collect::<Result<Vec<_>, _>>()?;

    if coords.len() % 2 == 1
        && let Some((token, _)) = coords.last()
    {
        return Err(InputError::DanglingCoordinate {
            token: (*token).to_string(),
        });
    }

    let found = coords.len() / 2;
    if found != expected {
        return Err(InputError::CountMismatch { expected, found });
    }

    let points: Vec<_> = coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0].1, pair[1].1))
        .collect();
    tracing::debug!("Parsed {} input points", points.len());
    Ok(points)
}

fn parse_coordinate(index: usize, token: &str) -> Result<(&str, f64), InputError> {
    let value: f64 = token.parse().map_err(|_| InputError::InvalidCoordinate {
        index,
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::NonFiniteCoordinate {
            index,
            token: token.to_string(),
        });
    }
    Ok((token, value))
}

/// Reads all of `reader` and parses it with [`parse_points`].
///
/// # Errors
///
/// Returns [`InputError::Io`] if reading fails, or any parse error.
pub fn read_points<R: Read>(mut reader: R) -> Result<Vec<Point<f64>>, InputError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_points(&input)
}

/// Writes one `"x y"` line per point.
///
/// # Errors
///
/// Propagates any error from `writer`.
pub fn write_vertices<W: Write>(mut writer: W, vertices: &[Point<f64>]) -> std::io::Result<()> {
    for vertex in vertices {
        writeln!(writer, "{vertex}")?;
    }
    writer.flush()
}

/// Reads points from `input`, triangulates them with default options, and
/// writes the sorted Voronoi vertices to `output`.
///
/// Returns the number of vertices written.
///
/// # Errors
///
/// Returns [`RunError`] on malformed input, a fatal triangulation error, or
/// a write failure.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::io::run;
///
/// let mut out = Vec::new();
/// let written = run("4\n0 0\n4 0\n4.5 4\n0.5 3.5\n".as_bytes(), &mut out).unwrap();
/// assert_eq!(written, 2);
/// assert_eq!(String::from_utf8(out).unwrap().lines().next(), Some("2 1.5"));
/// ```
pub fn run<R: Read, W: Write>(input: R, output: W) -> Result<usize, RunError> {
    let points = read_points(input)?;
    let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default())?;
    let vertices = voronoi_vertices(&dt)?;
    write_vertices(output, &vertices).map_err(RunError::Output)?;
    Ok(vertices.len())
}
