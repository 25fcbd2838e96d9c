use clientforge::{ClientforgeConfig, run_with_config};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

#[test]
fn test_run_with_config_reports_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let dmmf = Path::new(env!("CARGO_MANIFEST_DIR")).join("../clientforge_core/tests/fixtures/blog.dmmf.json");
    let config_path = dir.path().join("clientforge.toml");
    fs::write(
        &config_path,
        format!(
            "[generator]\noutput = \"out\"\ndmmf_path = \"{}\"\n",
            dmmf.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let config = ClientforgeConfig::from_path(&config_path).unwrap();
    let report = run_with_config(&config).unwrap();

    assert_eq!(report.files.len(), 10);
    assert_eq!(report.models, 2);
    assert!(dir.path().join("out/client.ts").is_file());
}
