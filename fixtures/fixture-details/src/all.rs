// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{value_generator::ValueGenerator, OnSetFixture, VerifySummary};
use camino::{Utf8Path, Utf8PathBuf};
use circuit_min::{
    cube::variable_symbol,
    errors::MAX_BITS,
    logic_function::LogicFunction,
    optimize::Optimizer,
    proptest_helpers::on_set_rows_strategy,
};
use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Result,
};
use log::{debug, info};
use once_cell::sync::Lazy;

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
        // fixtures/fixture-details -> fixtures/data
        let dir = match manifest_dir.parent() {
            Some(parent) => parent.join("data"),
            None => manifest_dir.join("data"),
        };
        Self { dir }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn on_sets_path(&self, n_bits: usize) -> Utf8PathBuf {
        self.dir.join(format!("on-sets-{}.txt", n_bits))
    }

    /// Generates `count` random on-sets over exactly `n_bits` variables.
    pub fn generate(n_bits: usize, count: usize) -> Result<OnSetFixture> {
        if !(1..=MAX_BITS).contains(&n_bits) {
            bail!("bit count {} must be in range [1..={}]", n_bits, MAX_BITS);
        }
        let mut value_gen = ValueGenerator::from_seed(format!("circuit-min_{}", n_bits));
        let on_sets = (0..count)
            .map(|_| {
                let mut gen = value_gen.partial_clone();
                let mut on_set = gen.generate(on_set_rows_strategy(n_bits));
                on_set.sort_unstable();
                on_set.dedup();
                on_set
            })
            .collect();
        Ok(OnSetFixture { n_bits, on_sets })
    }

    /// Generates on-sets and writes them to [`Self::on_sets_path`].
    pub fn generate_inputs(&self, n_bits: usize, count: usize) -> Result<Utf8PathBuf> {
        let fixture = Self::generate(n_bits, count)?;
        std::fs::create_dir_all(&self.dir).wrap_err_with(|| format!("creating {}", self.dir))?;
        let path = self.on_sets_path(n_bits);
        std::fs::write(&path, fixture.to_text()).wrap_err_with(|| format!("writing {}", path))?;
        info!("wrote {} on-sets to {}", count, path);
        Ok(path)
    }

    pub fn load(&self, n_bits: usize) -> Result<OnSetFixture> {
        let path = self.on_sets_path(n_bits);
        let text =
            std::fs::read_to_string(&path).wrap_err_with(|| format!("reading {}", path))?;
        let fixture = OnSetFixture::parse(&text).wrap_err_with(|| format!("parsing {}", path))?;
        if fixture.n_bits != n_bits {
            bail!("{} holds {}-bit functions, expected {}", path, fixture.n_bits, n_bits);
        }
        Ok(fixture)
    }

    /// Loads the stored on-sets for `n_bits` and runs them through [`verify_fixture`].
    pub fn verify(&self, n_bits: usize, max_depth: usize) -> Result<VerifySummary> {
        let fixture = self.load(n_bits)?;
        verify_fixture(&fixture, max_depth)
    }
}

/// Minimizes and then optimizes every function in `fixture`, checking that each step preserves
/// the function and that optimizing never grows the tree.
pub fn verify_fixture(fixture: &OnSetFixture, max_depth: usize) -> Result<VerifySummary> {
    let optimizer = Optimizer::new(max_depth)?;
    let names: Vec<String> = (0..fixture.n_bits)
        .map(|bit| variable_symbol(bit).to_string())
        .collect();

    let mut summary = VerifySummary::default();
    for (ix, on_set) in fixture.on_sets.iter().enumerate() {
        let function = LogicFunction::new(fixture.n_bits, on_set.iter().copied(), [])?;
        let cover = function.minimize();
        cover
            .check_logically_equivalent(on_set.iter().copied())
            .map_err(|row| eyre!("function {}: cover {:?} disagrees on row {}", ix, cover, row))?;

        let node = cover.to_node();
        let optimized = optimizer.optimize(&node);
        if optimized.size() > node.size() {
            bail!("function {}: optimizing grew {} into {}", ix, node, optimized);
        }
        let tabulated = LogicFunction::from_node(&optimized, &names)?;
        if tabulated.on_set().ne(function.on_set()) {
            bail!("function {}: {} is not equivalent to {}", ix, optimized, node);
        }
        debug!("function {}: {} => {}", ix, node, optimized);

        summary.function_count += 1;
        summary.cube_count += cover.cube_count();
        summary.cover_literal_count += cover.literal_count() as usize;
        summary.cover_node_size += node.size();
        summary.optimized_node_size += optimized.size();
    }

    info!(
        "verified {} functions: {} cubes, node size {} -> {}",
        summary.function_count,
        summary.cube_count,
        summary.cover_node_size,
        summary.optimized_node_size
    );
    Ok(summary)
}
