use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn lists_builtin_dialects() {
    let mut cmd = cargo_bin_cmd!("downmark");
    cmd.arg("list-dialects");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("asciidoc"))
        .stdout(predicate::str::contains("textile"));
}
