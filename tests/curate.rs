use std::fs;
use std::path::{Path, PathBuf};

use bitext_curator::config::Config;
use bitext_curator::error::Error;
use bitext_curator::pipelines::{Curate, CurateOptions, Pipeline, RunReport};

/// Writes a `source.txt`/`target.txt` source of `nb` distinct pairs, returns its location.
fn numbered_source(root: &Path, name: &str, nb: usize) -> String {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let src: String = (0..nb).map(|i| format!("{} sentence {}.\n", name, i)).collect();
    let tgt: String = (0..nb).map(|i| format!("{} phrase {}.\n", name, i)).collect();
    fs::write(dir.join("source.txt"), src).unwrap();
    fs::write(dir.join("target.txt"), tgt).unwrap();
    format!("file://{}", dir.display())
}

fn config(sources: &[String], max_eval: usize) -> Config {
    let sources: Vec<String> = sources.iter().map(|s| format!("{:?}", s)).collect();
    format!(
        r#"{{
        "from": {{"name": "English", "code": "en"}},
        "to": {{"name": "French", "code": "fr"}},
        "version": "1.0",
        "sources": [{}],
        "max_eval_sentences": {}
    }}"#,
        sources.join(", "),
        max_eval
    )
    .parse()
    .unwrap()
}

fn options(run_dir: PathBuf) -> CurateOptions {
    let mut o = CurateOptions::new(run_dir);
    o.seed = Some(1234);
    o.threads = Some(2);
    o
}

fn nb_lines(path: &Path) -> usize {
    fs::read_to_string(path).unwrap().lines().count()
}

#[test_log::test]
fn hundred_pairs() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 100);
    let run_dir = root.path().join("run");

    let report = Curate::new(config(&[a], 30), options(run_dir.clone()))
        .run()
        .unwrap();

    assert!(!report.cached);
    assert_eq!(report.merged, 100);
    assert_eq!(report.split.validation, 20);
    assert_eq!(report.split.train, 80);
    assert_eq!(report.duplicates_removed, 0);

    assert_eq!(nb_lines(&run_dir.join("src-val.txt")), 20);
    assert_eq!(nb_lines(&run_dir.join("tgt-val.txt")), 20);
    assert_eq!(nb_lines(&run_dir.join("src-train.txt")), 80);
    assert_eq!(nb_lines(&run_dir.join("tgt-train.txt")), 80);
    assert!(run_dir.join("fingerprint.json").exists());
    assert!(run_dir.join("report.json").exists());
    assert!(!run_dir.join("merge-src.txt").exists());
}

#[test]
fn version_is_the_crate_version() {
    assert_eq!(<Curate as Pipeline<RunReport>>::version(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn ten_pairs() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 10);
    let report = Curate::new(config(&[a], 5000), options(root.path().join("run")))
        .run()
        .unwrap();
    assert_eq!(report.split.validation, 2);
    assert_eq!(report.split.train, 8);
}

#[test]
fn max_eval_override() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 100);
    let mut o = options(root.path().join("run"));
    o.max_eval_sentences = Some(5);
    let report = Curate::new(config(&[a], 5000), o).run().unwrap();
    assert_eq!(report.split.validation, 5);
    assert_eq!(report.split.train, 95);
}

#[test]
fn several_sources_keep_alignment() {
    let root = tempfile::tempdir().unwrap();
    let sources: Vec<String> = ["a", "b", "c"]
        .iter()
        .map(|n| numbered_source(root.path(), n, 1000))
        .collect();
    let run_dir = root.path().join("run");
    let report = Curate::new(config(&sources, 5000), options(run_dir.clone()))
        .run()
        .unwrap();

    assert_eq!(report.sources.len(), 3);
    assert_eq!(report.merged, 3000);
    assert_eq!(report.split.validation, 600);

    for (s, t) in [("src-train.txt", "tgt-train.txt"), ("src-val.txt", "tgt-val.txt")] {
        let src = fs::read_to_string(run_dir.join(s)).unwrap();
        let tgt = fs::read_to_string(run_dir.join(t)).unwrap();
        for (s, t) in src.lines().zip(tgt.lines()) {
            assert_eq!(s.replace("sentence", "phrase"), t);
        }
    }
}

#[test]
fn duplicates_are_removed_from_training_only() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("dup");
    fs::create_dir_all(&dir).unwrap();
    let src: String = (0..50).map(|i| format!("Hello {}.\n", i % 10)).collect();
    let tgt: String = (0..50).map(|i| format!("Bonjour {}.\n", i % 10)).collect();
    fs::write(dir.join("source.txt"), src).unwrap();
    fs::write(dir.join("target.txt"), tgt).unwrap();

    let run_dir = root.path().join("run");
    let report = Curate::new(
        config(&[format!("file://{}", dir.display())], 5000),
        options(run_dir.clone()),
    )
    .run()
    .unwrap();

    assert_eq!(report.split.validation, 10);
    assert_eq!(report.split.train + report.duplicates_removed, 40);
    // at most the 10 distinct pairs remain in training
    assert!(report.split.train <= 10);
    assert_eq!(nb_lines(&run_dir.join("src-train.txt")), report.split.train);
    assert_eq!(nb_lines(&run_dir.join("src-val.txt")), 10);
}

#[test]
fn unchanged_sources_are_not_merged_again() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 100);
    let b = numbered_source(root.path(), "b", 50);
    let run_dir = root.path().join("run");

    let first = Curate::new(config(&[a.clone()], 5000), options(run_dir.clone()))
        .run()
        .unwrap();
    assert!(!first.cached);

    let second = Curate::new(config(&[a.clone()], 5000), options(run_dir.clone()))
        .run()
        .unwrap();
    assert!(second.cached);
    assert_eq!(second.fingerprint, first.fingerprint);
    assert_eq!(second.split, first.split);

    // a new source forces a new merge
    let third = Curate::new(config(&[a.clone(), b.clone()], 5000), options(run_dir.clone()))
        .run()
        .unwrap();
    assert!(!third.cached);
    assert_eq!(third.merged, 150);

    // so does a missing split file
    fs::remove_file(run_dir.join("src-val.txt")).unwrap();
    let fourth = Curate::new(config(&[a, b], 5000), options(run_dir.clone()))
        .run()
        .unwrap();
    assert!(!fourth.cached);
    assert_eq!(fourth.merged, 150);
}

#[test]
fn rerun_ignores_the_cache() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 20);
    let run_dir = root.path().join("run");

    Curate::new(config(&[a.clone()], 5000), options(run_dir.clone()))
        .run()
        .unwrap();
    let mut o = options(run_dir);
    o.rerun = true;
    let report = Curate::new(config(&[a], 5000), o).run().unwrap();
    assert!(!report.cached);
}

#[test]
fn misaligned_source_fails_the_run() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 100);
    let b = numbered_source(root.path(), "b", 10);
    fs::write(root.path().join("b").join("target.txt"), "b phrase 0.\n").unwrap();
    let run_dir = root.path().join("run");

    let res = Curate::new(config(&[a, b], 5000), options(run_dir.clone())).run();
    assert!(matches!(res, Err(Error::Alignment { line: 2, .. })));
    assert!(!run_dir.join("fingerprint.json").exists());
    assert!(!run_dir.join("src-train.txt").exists());
}

#[test]
fn reverse_swaps_sides() {
    let root = tempfile::tempdir().unwrap();
    let a = numbered_source(root.path(), "a", 10);
    let run_dir = root.path().join("run");
    let mut o = options(run_dir.clone());
    o.reverse = true;

    let curate = Curate::new(config(&[a], 5000), o);
    assert_eq!(curate.config().from.code, "fr");
    curate.run().unwrap();

    let train = fs::read_to_string(run_dir.join("src-train.txt")).unwrap();
    assert!(train.lines().all(|l| l.contains("phrase")));
}
