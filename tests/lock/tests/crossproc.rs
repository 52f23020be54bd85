//! Cross-process determinism: the `search_fixture` binary prints the same
//! lines regardless of working directory and locale.

use std::path::Path;
use std::process::Command;

fn run_variant(work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_search_fixture");
    let mut command = Command::new(bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={}, overrides={env_overrides:?}): {e}", work_dir.display())
    });
    assert!(
        output.status.success(),
        "search_fixture failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn fixture_output_is_identical_across_variants() {
    let elsewhere = tempfile::tempdir().unwrap();
    let baseline = run_variant(Path::new(env!("CARGO_MANIFEST_DIR")), &[]);
    let variants = [
        run_variant(elsewhere.path(), &[]),
        run_variant(elsewhere.path(), &[("LC_ALL", "C")]),
        run_variant(elsewhere.path(), &[("RUST_LOG", "lodestar_search=trace")]),
    ];
    for variant in &variants {
        assert_eq!(&baseline, variant);
    }

    assert!(baseline.contains("outcome=exhausted\n"));
    assert!(baseline.contains("result_count=4\n"));
    assert!(baseline.contains("West->Vault@2:west_road,vault_stairs"));
}
