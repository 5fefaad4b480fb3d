// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boolean function minimization.
//!
//! Two engines share the [`Node`](node::Node) expression tree:
//!
//! * a two-level minimizer ([`LogicFunction`](logic_function::LogicFunction)) that turns a
//!   truth table into a sum-of-products [`Cover`](cover::Cover) by Quine-McCluskey prime
//!   generation followed by prime-implicant chart reduction;
//! * a term-rewriting [`Optimizer`](optimize::Optimizer) that shrinks arbitrary expression
//!   trees with algebraic identities.
//!
//! ```
//! use circuit_min::{logic_function::LogicFunction, optimize::Optimizer};
//!
//! // A(B + CD), tabulated over A = bit 0 .. D = bit 3.
//! let on_set = (0..16u32).filter(|row| row & 1 != 0 && (row & 2 != 0 || row & 12 == 12));
//! let function = LogicFunction::new(4, on_set, []).unwrap();
//! let cover = function.minimize();
//! assert_eq!(cover.to_node().to_string(), "(A&B)+(A&C&D)");
//!
//! let factored = Optimizer::default().optimize(&cover.to_node());
//! assert_eq!(factored.to_string(), "A&(B+(C&D))");
//! ```

pub mod cover;
pub mod cube;
pub mod errors;
pub mod logic_function;
pub mod node;
pub mod optimize;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
