use predicates::prelude::*;

#[test]
fn test_help_includes_required_options() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("libcensus");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--hostname"))
        .stdout(predicate::str::contains("--upload-url"))
        .stdout(predicate::str::contains("--id"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_help_describes_hostname_override() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("libcensus");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Override the discovered hostname"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("libcensus");
    cmd.arg("--bogus-flag");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("libcensus");
    cmd.arg("--quiet").arg("--verbose").arg("--dry-run");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used"));
}
