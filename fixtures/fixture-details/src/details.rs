// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Result,
};
use std::fmt::Write;

/// A batch of single-output functions over the same number of variables, each given by its
/// on-set.
///
/// The text form is a `bits N` header followed by one line per function with its on-set rows
/// separated by spaces. An empty line is the constant-0 function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnSetFixture {
    pub n_bits: usize,
    pub on_sets: Vec<Vec<u32>>,
}

impl OnSetFixture {
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let header = lines.next().ok_or_else(|| eyre!("empty fixture"))?;
        let n_bits: usize = header
            .strip_prefix("bits ")
            .ok_or_else(|| eyre!("expected `bits N` header, found {:?}", header))?
            .trim()
            .parse()
            .wrap_err("parsing bit count")?;

        let on_sets = lines
            .enumerate()
            .map(|(ix, line)| {
                line.split_whitespace()
                    .map(|row| {
                        let row: u32 = row
                            .parse()
                            .wrap_err_with(|| format!("line {}: parsing row {:?}", ix + 2, row))?;
                        if row >> n_bits != 0 {
                            bail!("line {}: row {} out of range for {} bits", ix + 2, row, n_bits);
                        }
                        Ok(row)
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { n_bits, on_sets })
    }

    pub fn to_text(&self) -> String {
        let mut text = format!("bits {}\n", self.n_bits);
        for on_set in &self.on_sets {
            for (ix, row) in on_set.iter().enumerate() {
                if ix > 0 {
                    text.push(' ');
                }
                // Writing to a String can't fail.
                let _ = write!(text, "{}", row);
            }
            text.push('\n');
        }
        text
    }
}

/// Totals collected while verifying a fixture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifySummary {
    pub function_count: usize,
    pub cube_count: usize,
    pub cover_literal_count: usize,
    pub cover_node_size: usize,
    pub optimized_node_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_form() {
        let fixture = OnSetFixture {
            n_bits: 3,
            on_sets: vec![vec![0, 5, 7], vec![], vec![2]],
        };
        let text = fixture.to_text();
        assert_eq!(text, "bits 3\n0 5 7\n\n2\n");
        assert_eq!(OnSetFixture::parse(&text).unwrap(), fixture);
    }

    #[test]
    fn test_parse_errors() {
        assert!(OnSetFixture::parse("").is_err());
        assert!(OnSetFixture::parse("3\n1 2").is_err());
        assert!(OnSetFixture::parse("bits 2\n1 4").is_err());
        assert!(OnSetFixture::parse("bits 2\n1 x").is_err());
    }
}
