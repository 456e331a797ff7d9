//! Huffman prefix coding.
//!
//! Builds a minimum-redundancy binary tree from a [`FrequencyTable`], derives
//! the code table from it, and decodes by walking the tree bit by bit.
//!
//! # Historical Context
//!
//! David Huffman (1952) developed this algorithm as a term paper at MIT.
//! It was the first practical algorithm for constructing optimal prefix codes.
//!
//! # Tie-breaking
//!
//! Equal frequencies are resolved by a sequence number: leaves are numbered in
//! table order and every merged node takes the next unused number, so the
//! smaller number is extracted first and becomes the left child. The resulting
//! tree depends only on the table (including its order).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Huffman tree node.
///
/// Internal nodes own their children; there are no parent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    /// A symbol and its frequency.
    Leaf {
        /// The symbol.
        symbol: S,
        /// Its frequency.
        freq: u64,
    },
    /// A merge of two subtrees. `left` is reached by bit 0, `right` by bit 1.
    Internal {
        /// Subtree for bit 0.
        left: Box<Node<S>>,
        /// Subtree for bit 1.
        right: Box<Node<S>>,
        /// Sum of the children's frequencies.
        freq: u64,
    },
}

impl<S> Node<S> {
    /// Frequency of the subtree rooted here.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }
}

/// Priority-queue entry: min-ordered by frequency, then by sequence number.
struct HeapEntry<S> {
    freq: u64,
    seq: usize,
    node: Node<S>,
}

impl<S> PartialEq for HeapEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl<S> Eq for HeapEntry<S> {}

impl<S> Ord for HeapEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for HeapEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree, shared read-only by encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Clone + Eq + Hash + Debug> HuffmanTree<S> {
    /// Build the tree for a frequency table.
    ///
    /// A table with a single symbol produces a lone leaf.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the table has no symbols.
    pub fn from_frequencies(table: &FrequencyTable<S>) -> Result<Self> {
        let mut pq = BinaryHeap::with_capacity(table.len());
        for (seq, (symbol, freq)) in table.iter().enumerate() {
            pq.push(HeapEntry {
                freq,
                seq,
                node: Node::Leaf {
                    symbol: symbol.clone(),
                    freq,
                },
            });
        }

        let mut next_seq = table.len();
        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            let freq = left.freq + right.freq;
            pq.push(HeapEntry {
                freq,
                seq: next_seq,
                node: Node::Internal {
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                    freq,
                },
            });
            next_seq += 1;
        }

        let root = pq
            .pop()
            .map(|entry| entry.node)
            .ok_or_else(|| Error::InvalidInput("empty frequency table".into()))?;

        log::debug!(
            "built huffman tree: {} symbols, weight {}",
            table.len(),
            root.freq()
        );
        Ok(Self { root })
    }

    /// Derive the code table by a depth-first walk (0 = left, 1 = right).
    ///
    /// A lone-leaf tree gets the one-bit code `[0]`.
    pub fn code_table(&self) -> CodeTable<S> {
        let mut codes = HashMap::new();

        if let Node::Leaf { symbol, .. } = &self.root {
            codes.insert(symbol.clone(), vec![0]);
            return CodeTable { codes };
        }

        let mut stack = vec![(&self.root, Vec::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol.clone(), prefix);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(1);
                    stack.push((right.as_ref(), right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push(0);
                    stack.push((left.as_ref(), left_prefix));
                }
            }
        }

        CodeTable { codes }
    }

    /// Decode a bit sequence into symbols.
    ///
    /// # Errors
    /// Returns `Error::MalformedStream` if an element is not 0/1, if a bit has
    /// no matching child, or if the stream ends in the middle of a code.
    pub fn decode(&self, bits: &[u8]) -> Result<Vec<S>> {
        let mut out = Vec::new();

        if let Node::Leaf { symbol, .. } = &self.root {
            for (pos, &bit) in bits.iter().enumerate() {
                match bit {
                    0 => out.push(symbol.clone()),
                    1 => {
                        return Err(Error::malformed(pos, "no child for bit 1 in one-symbol tree"))
                    }
                    other => return Err(Error::malformed(pos, format!("not a bit: {other}"))),
                }
            }
            log::debug!("huffman decoded {} bits into {} symbols", bits.len(), out.len());
            return Ok(out);
        }

        let mut curr = &self.root;
        let mut code_start = 0;
        for (pos, &bit) in bits.iter().enumerate() {
            curr = match (curr, bit) {
                (Node::Internal { left, .. }, 0) => left.as_ref(),
                (Node::Internal { right, .. }, 1) => right.as_ref(),
                (Node::Internal { .. }, other) => {
                    return Err(Error::malformed(pos, format!("not a bit: {other}")))
                }
                (Node::Leaf { .. }, _) => {
                    return Err(Error::malformed(pos, "tree walk has no child to follow"))
                }
            };

            if let Node::Leaf { symbol, .. } = curr {
                out.push(symbol.clone());
                curr = &self.root;
                code_start = pos + 1;
            }
        }

        if code_start != bits.len() {
            return Err(Error::malformed(
                bits.len(),
                format!("stream ends inside the code starting at bit {code_start}"),
            ));
        }

        log::debug!("huffman decoded {} bits into {} symbols", bits.len(), out.len());
        Ok(out)
    }
}

impl<S> HuffmanTree<S> {
    /// The root node.
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total frequency held by the tree.
    pub fn weight(&self) -> u64 {
        self.root.freq()
    }
}

/// Mapping from symbol to its non-empty, prefix-free code.
#[derive(Debug, Clone)]
pub struct CodeTable<S> {
    codes: HashMap<S, Vec<u8>>, // symbol -> bit sequence
}

impl<S: Eq + Hash + Debug> CodeTable<S> {
    /// Code for `symbol`, if present.
    pub fn get(&self, symbol: &S) -> Option<&[u8]> {
        self.codes.get(symbol).map(Vec::as_slice)
    }

    /// Encode a symbol sequence by concatenating codes.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for a symbol without a code.
    pub fn encode(&self, symbols: &[S]) -> Result<Vec<u8>> {
        let mut bits = Vec::new();
        for s in symbols {
            let code = self
                .codes
                .get(s)
                .ok_or_else(|| Error::UnknownSymbol(format!("{s:?}")))?;
            bits.extend_from_slice(code);
        }
        log::debug!("huffman encoded {} symbols into {} bits", symbols.len(), bits.len());
        Ok(bits)
    }

    /// Encoded length in bits of any message with these frequencies:
    /// `sum(freq * code_len)`.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if the table holds a symbol without a code,
    /// and `Error::InvalidInput` if the length overflows `u64`.
    pub fn encoded_len(&self, table: &FrequencyTable<S>) -> Result<u64> {
        table.iter().try_fold(0u64, |acc, (s, freq)| {
            let code = self
                .codes
                .get(s)
                .ok_or_else(|| Error::UnknownSymbol(format!("{s:?}")))?;
            freq.checked_mul(code.len() as u64)
                .and_then(|bits| acc.checked_add(bits))
                .ok_or_else(|| Error::InvalidInput("encoded length overflows u64".into()))
        })
    }
}

impl<S> CodeTable<S> {
    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate `(symbol, code)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[u8])> + '_ {
        self.codes.iter().map(|(s, c)| (s, c.as_slice()))
    }
}
