// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::Cover,
    cube::{Cube, MatrixDisplayFormat},
};
use itertools::{Itertools, Position};
use std::{borrow::Cow, cmp::Ordering, fmt};

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&self.n_bits())
            .field(&format_args!("{}", self.algebraic_display()))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct CoverMatrixDisplay<'a> {
    cover: &'a Cover,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
    cube_separator: (Cow<'a, str>, bool),
}

impl<'a> CoverMatrixDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
            cube_separator: (Cow::Borrowed("\n"), true),
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

    pub fn with_cube_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.cube_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for CoverMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cube_count = self.cover.cube_count();
        for (cube_ix, cube) in self.cover.cubes().iter().enumerate() {
            let cube_display = cube
                .matrix_display(self.cover.n_bits())
                .with_format(self.format)
                .with_internal_separator(&*self.internal_separator);
            write!(f, "{}", cube_display)?;

            let (cube_separator, print_last) = &self.cube_separator;
            if *print_last || cube_ix < cube_count - 1 {
                write!(f, "{}", cube_separator)?;
            }
        }

        Ok(())
    }
}

/// Displays a cover as a sum of products such as `AB + A'C`.
pub struct CoverAlgebraicDisplay<'a> {
    n_bits: usize,
    cubes: Vec<&'a Cube>,
}

impl<'a> CoverAlgebraicDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        let n_bits = cover.n_bits();
        let mut cubes: Vec<_> = cover.cubes().iter().collect();
        // Sort the cubes lexicographically in the order [Some(true), Some(false), None]. This
        // results in products containing `A` showing up first, then `A'`, then products not
        // containing A.
        cubes.sort_by(|a, b| {
            for bit in 0..n_bits {
                match (a.literal(bit), b.literal(bit)) {
                    (Some(true), Some(true)) | (Some(false), Some(false)) | (None, None) => {
                        continue
                    }
                    (Some(true), Some(false) | None) => return Ordering::Less,
                    (Some(false) | None, Some(true)) => return Ordering::Greater,
                    (Some(false), None) => return Ordering::Less,
                    (None, Some(false)) => return Ordering::Greater,
                }
            }
            Ordering::Equal
        });

        Self { n_bits, cubes }
    }
}

impl<'a> fmt::Display for CoverAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cubes.is_empty() {
            return write!(f, "0");
        }
        for cube in self.cubes.iter().with_position() {
            match cube {
                Position::First(cube) | Position::Middle(cube) => {
                    write!(f, "{} + ", cube.algebraic_display(self.n_bits))?;
                }
                Position::Last(cube) | Position::Only(cube) => {
                    write!(f, "{}", cube.algebraic_display(self.n_bits))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_display() {
        let cover = Cover::new(3, [Cube::new(0b001, 0b011), Cube::new(0b100, 0b100)]).unwrap();
        assert_eq!(cover.matrix_display().to_string(), "-01\n1--\n");
        assert_eq!(
            cover
                .matrix_display()
                .with_format(MatrixDisplayFormat::Numeric)
                .with_internal_separator(" ")
                .with_cube_separator(", ", false)
                .to_string(),
            "2 0 1, 1 2 2"
        );
    }

    #[test]
    fn test_algebraic_display() {
        let cover = Cover::new(
            3,
            [
                Cube::new(0b100, 0b100),
                Cube::new(0b000, 0b011),
                Cube::new(0b011, 0b011),
            ],
        )
        .unwrap();
        assert_eq!(cover.algebraic_display().to_string(), "AB + A'B' + C");
        assert_eq!(format!("{:?}", cover), "Cover(3, AB + A'B' + C)");
        assert_eq!(Cover::empty(2).unwrap().algebraic_display().to_string(), "0");
    }
}
