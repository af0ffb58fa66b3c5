//! Benchmarks for LCA queries against a synthetic taxonomy
//!
//! Builds a balanced tree of a few thousand taxa and measures pairwise
//! LCA, n-ary LCA, and weighted-majority classification throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use taxotree_common::RankConfig;
use taxotree_core::{TaxId, Taxonomy, VoteMode, WeightedHit};

/// A complete tree with the given branching factor and depth; ranks cycle
/// through the canonical ladder so rank projections have work to do.
fn synthetic_taxonomy(branching: usize, depth: usize) -> (Taxonomy, Vec<TaxId>) {
    let ranks = ["superkingdom", "phylum", "class", "order", "family", "genus", "species"];

    let mut nodes = String::from("1\t|\t1\t|\tno rank\t|\n");
    let mut names = String::from("1\t|\troot\t|\t\t|\tscientific name\t|\n");
    let mut level: Vec<TaxId> = vec![1];
    let mut next_id: TaxId = 2;
    let mut leaves = Vec::new();

    for d in 0..depth {
        let rank = ranks[d % ranks.len()];
        let mut next_level = Vec::new();
        for &parent in &level {
            for _ in 0..branching {
                nodes.push_str(&format!("{next_id}\t|\t{parent}\t|\t{rank}\t|\n"));
                names.push_str(&format!(
                    "{next_id}\t|\ttaxon {next_id}\t|\t\t|\tscientific name\t|\n"
                ));
                next_level.push(next_id);
                next_id += 1;
            }
        }
        if d == depth - 1 {
            leaves = next_level.clone();
        }
        level = next_level;
    }

    let taxonomy = Taxonomy::from_dump(&nodes, &names, "", RankConfig::default())
        .unwrap_or_else(|e| panic!("failed to build synthetic taxonomy: {e}"));
    (taxonomy, leaves)
}

fn bench_lca(c: &mut Criterion) {
    let (taxonomy, leaves) = synthetic_taxonomy(4, 6);

    c.bench_function("pairwise_lca", |b| {
        let mut i = 0;
        b.iter(|| {
            let a = leaves[i % leaves.len()];
            let z = leaves[(i * 7 + 13) % leaves.len()];
            i += 1;
            black_box(taxonomy.lca(a, z))
        })
    });

    c.bench_function("nary_lca_16", |b| {
        let ids: Vec<TaxId> = leaves.iter().step_by(97).take(16).copied().collect();
        b.iter(|| black_box(taxonomy.lca_of(ids.iter().copied())))
    });

    c.bench_function("weighted_majority_lca_64", |b| {
        let hits: Vec<WeightedHit> = leaves
            .iter()
            .step_by(31)
            .take(64)
            .map(|&id| WeightedHit::new(id, 1e-20, VoteMode::MinusLogEvalue))
            .collect();
        b.iter(|| black_box(taxonomy.weighted_majority_lca(&hits, 0.5)))
    });
}

criterion_group!(benches, bench_lca);
criterion_main!(benches);
