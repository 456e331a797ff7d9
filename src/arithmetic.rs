//! Integer (scaled) arithmetic coding.
//!
//! The coder keeps a working interval `[low, high]` inside `[0, R)` with
//! `R = 2^k`. Each symbol narrows the interval to its share of the
//! cumulative-frequency range, then the interval is rescaled until it
//! straddles the midpoint widely enough:
//!
//! ```text
//! E1  low >= R/2                  emit 1, then pending 0s, double the top half
//! E2  high < R/2                  emit 0, then pending 1s, double the bottom half
//! E3  R/4 <= low, high < 3R/4     defer one bit (pending += 1), double the middle
//! ```
//!
//! After a rescale the interval is wider than `R/4`, so `R >= 4T` guarantees
//! every symbol keeps a non-empty sub-interval.
//!
//! The stream carries no terminator: the decoder must be told how many symbols
//! to produce.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::interval::IntervalModel;

/// Smallest supported precision in bits.
pub const MIN_PRECISION: u32 = 2;

/// Largest supported precision in bits. Interval bounds live in `u64`;
/// narrowing products are taken in `u128`.
pub const MAX_PRECISION: u32 = 62;

/// Precision used when the caller has no preference.
pub const DEFAULT_PRECISION: u32 = 48;

/// Coder precision `k`, the number of bits in the working range `R = 2^k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u32);

impl Precision {
    /// Validate a precision in bits.
    ///
    /// # Errors
    /// Returns `Error::PrecisionOutOfRange` outside
    /// `MIN_PRECISION..=MAX_PRECISION`.
    pub fn new(bits: u32) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&bits) {
            return Err(Error::PrecisionOutOfRange {
                precision: bits,
                min: MIN_PRECISION,
                max: MAX_PRECISION,
            });
        }
        Ok(Self(bits))
    }

    /// Smallest precision whose range holds `4 * total`.
    ///
    /// # Errors
    /// Returns `Error::PrecisionTooLow` if even `MAX_PRECISION` is not enough.
    pub fn minimum_for(total: u64) -> Result<Self> {
        let need = 4 * u128::from(total.max(1));
        let bits = need.next_power_of_two().trailing_zeros().max(MIN_PRECISION);
        if bits > MAX_PRECISION {
            return Err(Error::PrecisionTooLow {
                precision: MAX_PRECISION,
                total,
            });
        }
        Ok(Self(bits))
    }

    /// Number of bits `k`.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// The working range `R = 2^k`.
    pub fn range(self) -> u64 {
        1u64 << self.0
    }

    /// Check that `R >= 4 * total`.
    ///
    /// # Errors
    /// Returns `Error::PrecisionTooLow` otherwise.
    pub fn check(self, total: u64) -> Result<()> {
        if u128::from(self.range()) < 4 * u128::from(total) {
            return Err(Error::PrecisionTooLow {
                precision: self.0,
                total,
            });
        }
        Ok(())
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION)
    }
}

/// Working interval shared by encoder and decoder.
#[derive(Debug, Clone, Copy)]
struct Interval {
    low: u64,
    high: u64,
    half: u64,
    quarter: u64,
}

/// Which rescaling rule applies to the current interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rescale {
    Upper,
    Lower,
    Middle,
}

impl Interval {
    fn new(precision: Precision) -> Self {
        let range = precision.range();
        Self {
            low: 0,
            high: range - 1,
            half: range / 2,
            quarter: range / 4,
        }
    }

    /// Narrow to the sub-interval for cumulative range `[lo, hi)` out of `total`.
    fn narrow(&mut self, lo: u64, hi: u64, total: u64) {
        let width = u128::from(self.high - self.low + 1);
        let total = u128::from(total);
        // Both bounds come from the pre-update width.
        self.high = self.low + (width * u128::from(hi) / total) as u64 - 1;
        self.low += (width * u128::from(lo) / total) as u64;
    }

    fn next_rescale(&self) -> Option<Rescale> {
        if self.low >= self.half {
            Some(Rescale::Upper)
        } else if self.high < self.half {
            Some(Rescale::Lower)
        } else if self.low >= self.quarter && self.high < self.half + self.quarter {
            Some(Rescale::Middle)
        } else {
            None
        }
    }

    /// Offset subtracted before doubling under `rule`.
    fn offset(&self, rule: Rescale) -> u64 {
        match rule {
            Rescale::Upper => self.half,
            Rescale::Lower => 0,
            Rescale::Middle => self.quarter,
        }
    }

    fn apply(&mut self, rule: Rescale) {
        let offset = self.offset(rule);
        self.low = 2 * (self.low - offset);
        self.high = 2 * (self.high - offset) + 1;
    }
}

/// Integer arithmetic encoder.
///
/// State is built per message and consumed by [`finish`](Self::finish).
pub struct ArithmeticEncoder<'m, S> {
    model: &'m IntervalModel<S>,
    interval: Interval,
    pending: u64,
    symbols: usize,
    output: Vec<u8>,
}

impl<'m, S: Clone + Eq + Hash + Debug> ArithmeticEncoder<'m, S> {
    /// Create an encoder for `model` at `precision`.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for an empty model and
    /// `Error::PrecisionTooLow` if `2^k < 4T`.
    pub fn new(model: &'m IntervalModel<S>, precision: Precision) -> Result<Self> {
        if model.is_empty() {
            return Err(Error::InvalidInput("empty interval model".into()));
        }
        precision.check(model.total())?;
        Ok(Self {
            model,
            interval: Interval::new(precision),
            pending: 0,
            symbols: 0,
            output: Vec::new(),
        })
    }

    /// Encode one symbol.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if the symbol is not in the model.
    pub fn encode(&mut self, symbol: &S) -> Result<()> {
        let (lo, hi) = self.model.range(symbol)?;
        self.interval.narrow(lo, hi, self.model.total());

        while let Some(rule) = self.interval.next_rescale() {
            match rule {
                Rescale::Upper => self.emit(1),
                Rescale::Lower => self.emit(0),
                Rescale::Middle => {
                    self.pending += 1;
                    log::trace!("middle rescale, {} bits pending", self.pending);
                }
            }
            self.interval.apply(rule);
        }
        self.symbols += 1;
        Ok(())
    }

    /// Emit `bit` followed by the deferred opposite bits.
    fn emit(&mut self, bit: u8) {
        self.output.push(bit);
        let pending = std::mem::take(&mut self.pending);
        self.output.extend(std::iter::repeat(1 - bit).take(pending as usize));
    }

    /// Flush the termination bits and return the encoded bit sequence.
    ///
    /// The tail selects `R/2` (when `low >= R/4`) or `R/4` inside the final
    /// interval, both of which the final interval always contains.
    pub fn finish(mut self) -> Vec<u8> {
        if self.interval.low >= self.interval.quarter {
            self.emit(1);
            self.output.push(0);
        } else {
            self.emit(0);
            self.output.push(1);
        }
        log::debug!(
            "arithmetic encoded {} symbols into {} bits",
            self.symbols,
            self.output.len()
        );
        self.output
    }
}

/// Integer arithmetic decoder.
///
/// Reads the first `k` bits as the code value, then shifts one new bit in per
/// rescale. Bits past the end of the stream read as 0.
pub struct ArithmeticDecoder<'m, 'b, S> {
    model: &'m IntervalModel<S>,
    interval: Interval,
    bits: &'b [u8],
    pos: usize,
    code: u64,
}

impl<'m, 'b, S: Clone + Eq + Hash + Debug> ArithmeticDecoder<'m, 'b, S> {
    /// Create a decoder over `bits` for `model` at `precision`.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for an empty model,
    /// `Error::PrecisionTooLow` if `2^k < 4T`, and `Error::MalformedStream` if
    /// one of the first `k` elements is not a bit.
    pub fn new(bits: &'b [u8], model: &'m IntervalModel<S>, precision: Precision) -> Result<Self> {
        if model.is_empty() {
            return Err(Error::InvalidInput("empty interval model".into()));
        }
        precision.check(model.total())?;

        let mut decoder = Self {
            model,
            interval: Interval::new(precision),
            bits,
            pos: 0,
            code: 0,
        };
        for _ in 0..precision.bits() {
            decoder.code = (decoder.code << 1) | decoder.next_bit()?;
        }
        Ok(decoder)
    }

    fn next_bit(&mut self) -> Result<u64> {
        let bit = match self.bits.get(self.pos) {
            None => 0,
            Some(&b) if b <= 1 => u64::from(b),
            Some(&other) => {
                return Err(Error::malformed(self.pos, format!("not a bit: {other}")))
            }
        };
        self.pos += 1;
        Ok(bit)
    }

    /// Decode the next symbol.
    ///
    /// # Errors
    /// Returns `Error::MalformedStream` if the code value falls outside the
    /// working interval or no symbol range contains the scaled value.
    pub fn decode(&mut self) -> Result<S> {
        let Interval { low, high, .. } = self.interval;
        let position = self.pos.min(self.bits.len());
        if self.code < low || self.code > high {
            return Err(Error::malformed(
                position,
                format!("code value {} outside [{low}, {high}]", self.code),
            ));
        }

        let total = self.model.total();
        let width = u128::from(high - low + 1);
        let value = ((u128::from(self.code - low) + 1) * u128::from(total) - 1) / width;
        let (symbol, lo, hi) = u64::try_from(value)
            .ok()
            .and_then(|v| self.model.symbol_at(v))
            .ok_or_else(|| {
                Error::malformed(position, format!("no symbol range contains {value}"))
            })?;
        let symbol = symbol.clone();

        self.interval.narrow(lo, hi, total);
        while let Some(rule) = self.interval.next_rescale() {
            let offset = self.interval.offset(rule);
            self.interval.apply(rule);
            self.code = 2 * (self.code - offset) + self.next_bit()?;
        }
        Ok(symbol)
    }
}

/// Encode a whole message.
///
/// # Errors
/// See [`ArithmeticEncoder::new`] and [`ArithmeticEncoder::encode`].
pub fn encode<S: Clone + Eq + Hash + Debug>(
    symbols: &[S],
    model: &IntervalModel<S>,
    precision: Precision,
) -> Result<Vec<u8>> {
    let mut encoder = ArithmeticEncoder::new(model, precision)?;
    for s in symbols {
        encoder.encode(s)?;
    }
    Ok(encoder.finish())
}

/// Decode exactly `len` symbols.
///
/// # Errors
/// See [`ArithmeticDecoder::new`] and [`ArithmeticDecoder::decode`].
pub fn decode<S: Clone + Eq + Hash + Debug>(
    bits: &[u8],
    precision: Precision,
    len: usize,
    model: &IntervalModel<S>,
) -> Result<Vec<S>> {
    let mut decoder = ArithmeticDecoder::new(bits, model, precision)?;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(decoder.decode()?);
    }
    log::debug!("arithmetic decoded {} bits into {} symbols", bits.len(), len);
    Ok(out)
}
