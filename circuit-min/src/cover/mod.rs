// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod chart;
mod cover_impl;
mod display;

pub use chart::*;
pub use cover_impl::*;
pub use display::*;
