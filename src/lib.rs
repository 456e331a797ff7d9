//! # Huffman and Integer Arithmetic Coding
//!
//! *Two classic entropy coders over a finite alphabet, sharing one frequency table.*
//!
//! ## Intuition First
//!
//! Both coders spend fewer bits on common symbols. Huffman coding gives every
//! symbol its own whole-bit codeword, read off a binary tree. Arithmetic coding
//! instead narrows a single interval, one symbol at a time, in proportion to
//! each symbol's probability; the message becomes one number inside the final
//! interval, so a symbol can cost a fraction of a bit.
//!
//! ## The Problem
//!
//! - **Huffman coding**: simple and fast, but each probability is rounded to a
//!   power of two. A symbol with probability 0.99 still costs a full bit.
//! - **Arithmetic coding**: approaches the entropy, but a naive implementation
//!   needs unbounded precision. The integer variant keeps a fixed-width interval
//!   and rescales it (E1/E2/E3), emitting bits as soon as they are settled.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1952  Huffman     Minimum-redundancy prefix codes
//! 1976  Rissanen    Arithmetic coding
//! 1979  Rubin       Fixed-precision arithmetic coding with renormalization
//! 1987  Witten      Witten, Neal & Cleary: the practical integer coder
//! ```
//!
//! ## Determinism
//!
//! Encoder and decoder must agree exactly on
//! - the [`FrequencyTable`] and its iteration order (it fixes Huffman
//!   tie-breaks and every cumulative range of the [`IntervalModel`]),
//! - the precision `k` (with `2^k >= 4T`), and
//! - the message length, which the arithmetic stream does not carry.
//!
//! A mismatch does not fail loudly: the decoder silently produces other symbols.
//!
//! ## Example
//!
//! ```
//! use huffarith::{arithmetic, FrequencyTable, HuffmanTree, IntervalModel, Precision};
//!
//! let msg: Vec<char> = "aabc".chars().collect();
//! let table = FrequencyTable::from_symbols(&msg).unwrap();
//!
//! let tree = HuffmanTree::from_frequencies(&table).unwrap();
//! let bits = tree.code_table().encode(&msg).unwrap();
//! assert_eq!(bits, vec![0, 0, 1, 0, 1, 1]);
//! assert_eq!(tree.decode(&bits).unwrap(), msg);
//!
//! let model = IntervalModel::from_frequencies(&table);
//! let k = Precision::minimum_for(model.total()).unwrap();
//! let bits = arithmetic::encode(&msg, &model, k).unwrap();
//! assert_eq!(arithmetic::decode(&bits, k, msg.len(), &model).unwrap(), msg);
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Witten, I. H., Neal, R. M., Cleary, J. G. (1987). "Arithmetic Coding for Data Compression."
//! - Sayood, K. *Introduction to Data Compression*, ch. 4 (integer implementation).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arithmetic;
pub mod bits;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod interval;

pub use arithmetic::{ArithmeticDecoder, ArithmeticEncoder, Precision};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanTree, Node};
pub use interval::IntervalModel;
