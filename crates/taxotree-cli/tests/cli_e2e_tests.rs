//! End-to-end tests for the taxotree binary
//!
//! These tests validate the full command workflow against a small dump
//! fixture written to a temporary directory:
//! - LCA queries over known, unknown, and merged ids
//! - Lineage and rank projection output
//! - Clade counting and weighted-majority classification
//! - Error handling for missing databases and bad input

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

const NODES: &str = "1\t|\t1\t|\tno rank\t|\n\
                     2\t|\t1\t|\tgenus\t|\n\
                     3\t|\t1\t|\tgenus\t|\n\
                     4\t|\t2\t|\tspecies\t|\n\
                     5\t|\t2\t|\tspecies\t|\n\
                     6\t|\t3\t|\tspecies\t|\n";

const NAMES: &str = "1\t|\troot\t|\t\t|\tscientific name\t|\n\
                     2\t|\tAlpha\t|\t\t|\tscientific name\t|\n\
                     3\t|\tBeta\t|\t\t|\tscientific name\t|\n\
                     4\t|\tAlpha one\t|\t\t|\tscientific name\t|\n\
                     5\t|\tAlpha two\t|\t\t|\tscientific name\t|\n\
                     6\t|\tBeta one\t|\t\t|\tscientific name\t|\n";

const MERGED: &str = "10\t|\t4\t|\n";

/// Write the dump fixture and return the directory plus database prefix.
fn fixture_db() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("testdb").to_string_lossy().to_string();

    for (suffix, content) in [("nodes", NODES), ("names", NAMES), ("merged", MERGED)] {
        let mut file = std::fs::File::create(format!("{prefix}_{suffix}.dmp")).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }
    (dir, prefix)
}

fn taxotree() -> Command {
    Command::cargo_bin("taxotree").unwrap()
}

#[test]
fn test_lca_of_siblings() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lca", "4", "5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2\tgenus\tAlpha"));
}

#[test]
fn test_lca_across_branches_is_root() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lca", "4", "6"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1\tno rank\troot"));
}

#[test]
fn test_lca_skips_unknown_ids() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lca", "4", "5", "99"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2\t"));
}

#[test]
fn test_lca_of_merged_id_uses_target() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lca", "10", "5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2\t"));
}

#[test]
fn test_lca_all_unknown_fails() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lca", "98", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("none of the given taxon ids"));
}

#[test]
fn test_lineage_ids() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lineage", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1;2;4"));
}

#[test]
fn test_lineage_names() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lineage", "4", "--names"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-_root;g_Alpha;s_Alpha one"));
}

#[test]
fn test_lineage_unknown_id_fails() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "lineage", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_ranks_projection() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "ranks", "4", "--ranks", "genus,species,subspecies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("genus\tAlpha"))
        .stdout(predicate::str::contains("species\tAlpha one"))
        .stdout(predicate::str::contains("subspecies\tuc_Alpha one"));
}

#[test]
fn test_ranks_rejects_unknown_rank() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "ranks", "4", "--ranks", "flavor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flavor"));
}

#[test]
fn test_clade_counts_from_stdin() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "clade-counts"])
        .write_stdin("4\t3\n5\t2\n6\t1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2\t0\t5\tAlpha"))
        .stdout(predicate::str::contains("1\t0\t6\troot"));
}

#[test]
fn test_clade_counts_json() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "clade-counts", "--format", "json"])
        .write_stdin("4\t3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"clade_count\": 3"));
}

#[test]
fn test_classify_uniform() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "classify", "--majority", "0.34"])
        .write_stdin("4\t1\n5\t1\n6\t1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected:  2 (Alpha)"));
}

#[test]
fn test_classify_json_output() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args([
            "--db",
            &prefix,
            "classify",
            "--majority",
            "0.75",
            "--format",
            "json",
        ])
        .write_stdin("4\t1\n5\t1\n6\t1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"taxon_id\": 1"))
        .stdout(predicate::str::contains("\"agreeing\": 3"));
}

#[test]
fn test_classify_rejects_bad_cutoff() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "classify", "--majority", "1.5"])
        .write_stdin("4\t1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_classify_unknown_hit_fails() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "classify"])
        .write_stdin("99\t1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_info_summary() {
    let (_dir, prefix) = fixture_db();

    taxotree()
        .args(["--db", &prefix, "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:          6"))
        .stdout(predicate::str::contains("Merged aliases: 1"));
}

#[test]
fn test_missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("nothing").to_string_lossy().to_string();

    taxotree()
        .args(["--db", &prefix, "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_no_subcommand_shows_help() {
    taxotree()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
