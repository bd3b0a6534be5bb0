use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use tempfile::tempdir;

#[test]
fn reflow_rewraps_paragraphs() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.adoc");
    fs::write(&input_path, "one two three four five six seven\n\n").unwrap();

    let mut cmd = cargo_bin_cmd!("downmark");
    cmd.arg("reflow")
        .arg(input_path.as_os_str())
        .arg("--max-line-length")
        .arg("15");

    cmd.assert()
        .success()
        .stdout("one two three\nfour five six\nseven\n\n");
}

#[test]
fn reflow_respects_config_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.adoc");
    fs::write(&input_path, "one two three four five six seven\n\n").unwrap();

    let config_path = dir.path().join("downmark.toml");
    fs::write(
        &config_path,
        r#"[format]
max_line_length = 15
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("downmark");
    cmd.arg("reflow")
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("one two three\nfour five six\nseven\n\n");
}

#[test]
fn reflow_preserves_fenced_blocks() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.adoc");
    fs::write(
        &input_path,
        "----\n  keep   this   spacing\n----\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("downmark");
    cmd.arg("reflow").arg(input_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("----\n  keep   this   spacing\n----\n");
}
