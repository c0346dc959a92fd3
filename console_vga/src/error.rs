//! Console errors

use hal::HalError;
use thiserror::Error;

/// Errors reported by the text console
///
/// Every error is detected before any cell or cursor register is written,
/// so a failed call leaves the screen untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Coordinate outside the grid
    #[error("Position out of bounds: col {col}, row {row}")]
    OutOfBounds { col: usize, row: usize },

    /// Video memory or ports cannot be used
    #[error("Hardware unavailable: {0}")]
    HardwareUnavailable(#[from] HalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsoleError::OutOfBounds { col: 80, row: 3 };
        assert_eq!(err.to_string(), "Position out of bounds: col 80, row 3");

        let err: ConsoleError = HalError::RegionTooSmall {
            required: 4000,
            actual: 10,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Hardware unavailable: Region too small: need 4000 bytes, have 10"
        );
    }
}
