//! Error types for Huffman and arithmetic coding.

use thiserror::Error;

/// Error variants for coding operations.
///
/// Symbols are carried in their `Debug` rendering so the error type stays
/// independent of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A frequency table or model was empty or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bit sequence could not be resolved back to symbols.
    #[error("malformed stream at bit {position}: {reason}")]
    MalformedStream {
        /// Zero-based bit offset where decoding failed.
        position: usize,
        /// What went wrong at that offset.
        reason: String,
    },

    /// The coder range `2^precision` is smaller than `4 * total`.
    #[error("precision {precision} too low for total frequency {total} (need 2^k >= 4T)")]
    PrecisionTooLow {
        /// Requested precision in bits.
        precision: u32,
        /// Sum of all frequencies in the model.
        total: u64,
    },

    /// The precision cannot be represented by the coder state.
    #[error("precision {precision} outside supported range {min}..={max}")]
    PrecisionOutOfRange {
        /// Requested precision in bits.
        precision: u32,
        /// Smallest supported precision.
        min: u32,
        /// Largest supported precision.
        max: u32,
    },

    /// A symbol to encode has no entry in the code table or model.
    #[error("unknown symbol {0}")]
    UnknownSymbol(String),

    /// A supplied frequency table disagrees with the message it describes.
    #[error("frequency mismatch for {symbol}: table says {expected}, message has {actual}")]
    FrequencyMismatch {
        /// The offending symbol.
        symbol: String,
        /// Count recorded in the table.
        expected: u64,
        /// Count observed in the message.
        actual: u64,
    },
}

impl Error {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Error::MalformedStream {
            position,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for coding operations.
pub type Result<T> = std::result::Result<T, Error>;
