//! Algebraic notation helpers.
//!
//! Converts between "E2"-style square names and `(rank, file)` index pairs,
//! where rank 0 is the row labelled "8".

use thiserror::Error;

use crate::Square;

/// Errors that can occur when parsing a square name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square '{0}': expected a file letter and a rank digit")]
    InvalidLength(String),

    #[error("invalid file '{0}': expected A-H")]
    InvalidFile(char),

    #[error("invalid rank '{0}': expected 1-8")]
    InvalidRank(char),

    #[error("square index {0} is off the board")]
    IndexOutOfRange(u8),
}

/// Converts an algebraic square name to `(rank, file)` indices.
///
/// The file letter maps to 0-7 and the rank digit to `8 - digit`, so
/// `"E2"` becomes `(6, 4)`.
pub fn position_to_array(position: &str) -> Result<(u8, u8), NotationError> {
    let sq = Square::from_algebraic(position)?;
    Ok((sq.rank(), sq.file()))
}

/// Converts `(rank, file)` indices to an algebraic square name.
///
/// Exact inverse of [`position_to_array`].
///
/// # Panics
///
/// Panics if either index is outside 0-7; validating coordinates is the
/// caller's job.
pub fn array_to_position(rank: u8, file: u8) -> String {
    match Square::new(rank, file) {
        Some(sq) => sq.to_algebraic(),
        None => panic!("square ({rank}, {file}) is off the board"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn e2_maps_to_rank_six_file_four() {
        assert_eq!(position_to_array("E2"), Ok((6, 4)));
        assert_eq!(array_to_position(6, 4), "E2");
    }

    #[test]
    fn corners() {
        assert_eq!(position_to_array("A8"), Ok((0, 0)));
        assert_eq!(position_to_array("H8"), Ok((0, 7)));
        assert_eq!(position_to_array("A1"), Ok((7, 0)));
        assert_eq!(position_to_array("H1"), Ok((7, 7)));
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(position_to_array("Z3").is_err());
        assert!(position_to_array("E").is_err());
        assert!(position_to_array("E10").is_err());
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn array_to_position_panics_off_board() {
        array_to_position(8, 0);
    }

    #[test]
    fn error_display() {
        let err = NotationError::InvalidFile('Z');
        assert!(err.to_string().contains('Z'));
        let err = NotationError::InvalidLength("E22".to_string());
        assert!(err.to_string().contains("E22"));
    }

    proptest! {
        #[test]
        fn indices_roundtrip_through_names(rank in 0u8..8, file in 0u8..8) {
            let name = array_to_position(rank, file);
            prop_assert_eq!(position_to_array(&name), Ok((rank, file)));
        }

        #[test]
        fn names_roundtrip_through_indices(file in "[A-H]", rank in 1u8..=8) {
            let name = format!("{}{}", file, rank);
            let (r, f) = position_to_array(&name).unwrap();
            prop_assert_eq!(array_to_position(r, f), name);
        }
    }
}
