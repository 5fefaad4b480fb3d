// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::MAX_BITS, node::Node};
use arrayvec::ArrayVec;
use std::{borrow::Cow, fmt};

/// An implicant of a Boolean function of at most 16 variables.
///
/// Bit `i` of `mask` is set if variable `i` is fixed by this cube, in which case bit `i` of
/// `value` gives its polarity. Variables whose mask bit is clear are "don't care".
///
/// The value is always stored masked, so two cubes compare equal (and hash equally) exactly
/// when their masks are equal and their values agree on every masked bit.
///
/// ```
/// use circuit_min::cube::Cube;
///
/// assert_eq!(Cube::new(0b1010, 0b0011), Cube::new(0b0110, 0b0011));
/// assert_ne!(Cube::new(0b0000, 0b0011), Cube::new(0b0001, 0b0011));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cube {
    mask: u16,
    value: u16,
}

impl Cube {
    /// The universal cube: every variable is a don't care.
    pub const UNIVERSE: Cube = Cube { mask: 0, value: 0 };

    #[inline]
    pub const fn new(value: u16, mask: u16) -> Self {
        Self {
            mask,
            value: value & mask,
        }
    }

    /// Returns the cube fixing all of the low `n_bits` variables to the bits of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `n_bits` is greater than 16.
    #[inline]
    pub fn minterm(row: u16, n_bits: usize) -> Self {
        Self::new(row, full_mask(n_bits))
    }

    #[inline]
    pub fn value(&self) -> u16 {
        self.value
    }

    #[inline]
    pub fn mask(&self) -> u16 {
        self.mask
    }

    /// Returns true if variable `bit` is fixed by this cube.
    ///
    /// # Panics
    ///
    /// Panics if `bit` is 16 or more.
    #[inline]
    pub fn is_relevant(&self, bit: usize) -> bool {
        assert!(bit < MAX_BITS, "bit index {} must be in range [0..{})", bit, MAX_BITS);
        self.mask & (1 << bit) != 0
    }

    /// Returns true if variable `bit` is fixed to 1 by this cube.
    ///
    /// # Panics
    ///
    /// Panics if `bit` is 16 or more.
    #[inline]
    pub fn is_set(&self, bit: usize) -> bool {
        assert!(bit < MAX_BITS, "bit index {} must be in range [0..{})", bit, MAX_BITS);
        self.value & (1 << bit) != 0
    }

    /// The polarity of variable `bit`, or `None` if it is a don't care.
    #[inline]
    pub fn literal(&self, bit: usize) -> Option<bool> {
        self.is_relevant(bit).then(|| self.is_set(bit))
    }

    /// The number of fixed variables.
    #[inline]
    pub fn literal_count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Returns true if the truth-table row `row` lies inside this cube.
    #[inline]
    pub fn covers(&self, row: u16) -> bool {
        row & self.mask == self.value
    }

    /// Returns true if every row covered by `other` is also covered by `self`.
    pub fn contains(&self, other: &Cube) -> bool {
        self.mask & other.mask == self.mask && other.value & self.mask == self.value
    }

    /// Merges two adjacent cubes into one, dropping the single variable they disagree on.
    ///
    /// Returns `None` unless the masks are equal and the values differ in exactly one bit.
    ///
    /// ```
    /// use circuit_min::cube::Cube;
    ///
    /// let merged = Cube::new(0b010, 0b111).merge(&Cube::new(0b011, 0b111));
    /// assert_eq!(merged, Some(Cube::new(0b010, 0b110)));
    /// assert_eq!(Cube::new(0b000, 0b111).merge(&Cube::new(0b011, 0b111)), None);
    /// ```
    pub fn merge(&self, other: &Cube) -> Option<Cube> {
        if self.mask != other.mask {
            return None;
        }
        let diff = self.value ^ other.value;
        (diff.count_ones() == 1).then(|| Cube::new(self.value, self.mask & !diff))
    }

    /// Builds the And of the literals fixed by this cube.
    ///
    /// `variables[i]` is used for bit `i`. The universal cube becomes `One`.
    ///
    /// # Panics
    ///
    /// Panics if the cube fixes a variable that has no entry in `variables`.
    pub fn to_node(&self, variables: &[Node]) -> Node {
        assert!(
            variables.len() >= MAX_BITS || self.mask >> variables.len() == 0,
            "cube {} fixes variables beyond the {} provided",
            self,
            variables.len()
        );

        let literals: ArrayVec<Node, MAX_BITS> = variables
            .iter()
            .take(MAX_BITS)
            .enumerate()
            .filter_map(|(bit, variable)| match self.literal(bit) {
                Some(true) => Some(variable.clone()),
                Some(false) => Some(!variable),
                None => None,
            })
            .collect();
        Node::and_of(literals)
    }

    #[inline]
    pub fn matrix_display(&self, n_bits: usize) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self, n_bits)
    }

    #[inline]
    pub fn algebraic_display(&self, n_bits: usize) -> CubeAlgebraicDisplay<'_> {
        CubeAlgebraicDisplay::new(self, n_bits)
    }
}

/// Renders all 16 bits, most significant first.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.matrix_display(MAX_BITS))
    }
}

/// Returns a mask with the low `n_bits` bits set.
///
/// # Panics
///
/// Panics if `n_bits` is greater than 16.
#[inline]
pub fn full_mask(n_bits: usize) -> u16 {
    assert!(n_bits <= MAX_BITS, "n_bits {} must be at most {}", n_bits, MAX_BITS);
    u16::MAX.checked_shr((MAX_BITS - n_bits) as u32).unwrap_or(0)
}

/// Displays a cube as one character per variable, most significant variable first.
pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    n_bits: usize,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube, n_bits: usize) -> Self {
        Self {
            cube,
            n_bits: n_bits.min(MAX_BITS),
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
        }
    }

    pub fn with_format(mut self, format: MatrixDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in (0..self.n_bits).rev() {
            write!(f, "{}", self.format.char_for(self.cube.literal(bit)))?;
            if bit > 0 {
                write!(f, "{}", self.internal_separator)?;
            }
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub enum MatrixDisplayFormat {
    /// Display a cube using the format `10-1`, with dashes representing don't cares.
    #[default]
    Dashes,

    /// Display a cube using the format `1021`, with `2` representing don't cares.
    Numeric,
}

impl MatrixDisplayFormat {
    /// Returns the character that would be displayed for a variable.
    pub fn char_for(self, literal: Option<bool>) -> char {
        match literal {
            Some(true) => '1',
            Some(false) => '0',
            None => match self {
                Self::Dashes => '-',
                Self::Numeric => '2',
            },
        }
    }
}

/// Displays a cube as a product of literals such as `AB'D`.
pub struct CubeAlgebraicDisplay<'a> {
    cube: &'a Cube,
    n_bits: usize,
}

impl<'a> CubeAlgebraicDisplay<'a> {
    pub fn new(cube: &'a Cube, n_bits: usize) -> Self {
        Self {
            cube,
            n_bits: n_bits.min(MAX_BITS),
        }
    }
}

impl<'a> fmt::Display for CubeAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cube.mask() == 0 {
            return write!(f, "1");
        }
        for bit in 0..self.n_bits {
            match self.cube.literal(bit) {
                Some(true) => write!(f, "{}", variable_symbol(bit))?,
                Some(false) => write!(f, "{}'", variable_symbol(bit))?,
                None => {}
            }
        }

        Ok(())
    }
}

const VARIABLE_SYMBOLS: [char; MAX_BITS] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
];

/// The default name of variable `bit`: `A` for bit 0, `B` for bit 1, and so on.
///
/// # Panics
///
/// Panics if `bit` is 16 or more.
#[inline]
pub fn variable_symbol(bit: usize) -> char {
    VARIABLE_SYMBOLS[bit]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_masked_equality() {
        assert_eq!(Cube::new(0xffff, 0x000f), Cube::new(0x000f, 0x000f));
        assert_eq!(Cube::new(0xabcd, 0), Cube::UNIVERSE);
        assert_ne!(Cube::new(0x0001, 0x0001), Cube::new(0x0001, 0x0003));
    }

    #[test]
    fn test_full_mask() {
        assert_eq!(full_mask(0), 0);
        assert_eq!(full_mask(1), 0b1);
        assert_eq!(full_mask(4), 0b1111);
        assert_eq!(full_mask(16), u16::MAX);
    }

    #[test]
    fn test_literals() {
        // A fixed to 1, B don't care, C fixed to 0
        let cube = Cube::new(0b001, 0b101);
        assert!(cube.is_relevant(0));
        assert!(cube.is_set(0));
        assert!(!cube.is_relevant(1));
        assert!(cube.is_relevant(2));
        assert!(!cube.is_set(2));
        assert_eq!(cube.literal(1), None);
        assert_eq!(cube.literal_count(), 2);
    }

    #[test]
    #[should_panic(expected = "bit index 16")]
    fn test_bit_out_of_range() {
        Cube::UNIVERSE.is_relevant(16);
    }

    #[test]
    fn test_covers_and_contains() {
        let a_not_c = Cube::new(0b001, 0b101);
        assert!(a_not_c.covers(0b001));
        assert!(a_not_c.covers(0b011));
        assert!(!a_not_c.covers(0b101));

        let minterm = Cube::minterm(0b011, 3);
        assert!(a_not_c.contains(&minterm));
        assert!(!minterm.contains(&a_not_c));
        assert!(Cube::UNIVERSE.contains(&a_not_c));
    }

    #[test]
    fn test_merge() {
        let a = Cube::minterm(0b0110, 4);
        let b = Cube::minterm(0b0111, 4);
        assert_eq!(a.merge(&b), Some(Cube::new(0b0110, 0b1110)));
        assert_eq!(b.merge(&a), a.merge(&b));

        // different masks never merge
        assert_eq!(a.merge(&Cube::new(0b0111, 0b0111)), None);
        // identical cubes do not merge
        assert_eq!(a.merge(&a), None);
    }

    #[test]
    fn test_matrix_display() {
        // D and C fixed to 0, B free, A fixed to 1.
        let cube = Cube::new(0b0001, 0b1101);
        assert_eq!(cube.matrix_display(4).to_string(), "00-1");
        assert_eq!(
            cube.matrix_display(4)
                .with_format(MatrixDisplayFormat::Numeric)
                .with_internal_separator(" ")
                .to_string(),
            "0 0 2 1"
        );
        assert_eq!(cube.to_string(), "------------00-1");
    }

    #[test]
    fn test_algebraic_display() {
        let cube = Cube::new(0b0001, 0b1101);
        assert_eq!(cube.algebraic_display(4).to_string(), "AC'D'");
        assert_eq!(Cube::UNIVERSE.algebraic_display(4).to_string(), "1");
    }

    #[test]
    fn test_to_node() {
        let variables: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|name| Node::variable(*name).unwrap())
            .collect();
        let (a, c) = (variables[0].clone(), variables[2].clone());

        assert_eq!(Cube::new(0b001, 0b101).to_node(&variables), Node::and_of([a.clone(), !&c]));
        assert_eq!(Cube::new(0b001, 0b001).to_node(&variables), a);
        assert_eq!(Cube::UNIVERSE.to_node(&variables), Node::one());
    }

    proptest! {
        #[test]
        fn proptest_merge(cube in any_with::<Cube>(Some(6)), bit in 0..6usize) {
            let mask = cube.mask() | (1 << bit);
            let low = Cube::new(cube.value() & !(1 << bit), mask);
            let high = Cube::new(cube.value() | (1 << bit), mask);

            let merged = low.merge(&high).unwrap();
            prop_assert_eq!(merged, high.merge(&low).unwrap());
            prop_assert!(merged.contains(&low) && merged.contains(&high));
            prop_assert!(!merged.is_relevant(bit));
            prop_assert_eq!(merged.literal_count() + 1, low.literal_count());
            for row in 0..64u16 {
                prop_assert_eq!(merged.covers(row), low.covers(row) || high.covers(row));
            }
        }
    }
}
