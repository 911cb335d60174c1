use predicates::prelude::*;

fn devshowcase() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("devshowcase")
}

#[test]
fn export_writes_static_site() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("site");

    devshowcase()
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success();

    let index = std::fs::read_to_string(out.join("index.html"))?;
    assert!(index.contains("<a href=\"/project/storeit/\">View Details</a>"));

    let detail = std::fs::read_to_string(out.join("project/storeit/index.html"))?;
    assert!(detail.contains("<video controls>"));
    assert!(detail.contains("target=\"_blank\" rel=\"noreferrer\""));

    let not_found = std::fs::read_to_string(out.join("not-found.html"))?;
    assert!(not_found.contains("Project not found"));

    devshowcase()
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("export output already exists"));
    Ok(())
}

#[test]
fn export_uses_configured_redirect_delay() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("site");

    devshowcase()
        .args(["export", "--redirect-delay-ms", "2500", "--out"])
        .arg(&out)
        .assert()
        .success();

    let not_found = std::fs::read_to_string(out.join("not-found.html"))?;
    assert!(not_found.contains("content=\"2.5;url=/\""));
    Ok(())
}

#[test]
fn serve_requires_exported_site() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    devshowcase()
        .args(["serve", "--addr", "127.0.0.1:0", "--site"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no exported site"));
    Ok(())
}

#[test]
fn browse_reads_commands_from_stdin() {
    devshowcase()
        .args(["browse"])
        .write_stdin("search store\nopen storeit\nnext\nbogus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search: [store]"))
        .stdout(predicate::str::contains(
            "‹ /assets/storeit/img2.png (2/6) ›",
        ))
        .stdout(predicate::str::contains("unknown command: bogus"));
}

#[test]
fn browse_unknown_project_shows_not_found() {
    devshowcase()
        .args(["browse"])
        .write_stdin("go /project/nope\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project not found: nope"))
        .stdout(predicate::str::contains("Redirecting home..."));
}
