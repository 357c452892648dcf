use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn sketchpad_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sketchpad").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .arg("--data-dir")
        .arg(home.path().join("data"));
    cmd
}

fn write_png(path: &Path, width: i32, height: i32) {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.0, 0.0, 1.0);
        ctx.rectangle(4.0, 4.0, 8.0, 8.0);
        ctx.fill().unwrap();
    }
    let mut file = std::fs::File::create(path).unwrap();
    surface.write_to_png(&mut file).unwrap();
}

fn imported_id(home: &TempDir, name: &str) -> String {
    let png = home.path().join("input.png");
    write_png(&png, 32, 24);
    let output = sketchpad_cmd(home)
        .arg("import")
        .arg(&png)
        .args(["--name", name])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.split_whitespace().next().unwrap().to_string()
}

#[test]
fn help_prints_usage() {
    let home = TempDir::new().unwrap();
    sketchpad_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage saved sketches"));
}

#[test]
fn list_reports_empty_library() {
    let home = TempDir::new().unwrap();
    sketchpad_cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved sketches yet."));
}

#[test]
fn import_then_list_shows_sketch() {
    let home = TempDir::new().unwrap();
    let id = imported_id(&home, "  Harbour  ");

    sketchpad_cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id}  Harbour  ")));
    assert!(home.path().join("data").join("sketches.json").exists());
}

#[test]
fn import_rejects_non_png() {
    let home = TempDir::new().unwrap();
    let bogus = home.path().join("notes.txt");
    std::fs::write(&bogus, "not an image").unwrap();

    sketchpad_cmd(&home)
        .arg("import")
        .arg(&bogus)
        .args(["--name", "Notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a readable PNG"));
}

#[test]
fn import_rejects_blank_name() {
    let home = TempDir::new().unwrap();
    let png = home.path().join("input.png");
    write_png(&png, 16, 16);

    sketchpad_cmd(&home)
        .arg("import")
        .arg(&png)
        .args(["--name", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn export_writes_png_and_pdf_with_shared_stem() {
    let home = TempDir::new().unwrap();
    let id = imported_id(&home, "Export me");
    let out = home.path().join("out");

    sketchpad_cmd(&home)
        .args(["export", &id, "--format", "both", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(".png").and(predicate::str::contains(".pdf")));

    let mut stems: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    stems.sort();
    assert_eq!(stems.len(), 2);
    assert_eq!(stems[0].file_stem(), stems[1].file_stem());

    let pdf = std::fs::read(stems.iter().find(|p| p.extension().unwrap() == "pdf").unwrap())
        .unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn export_png_only_skips_pdf() {
    let home = TempDir::new().unwrap();
    let id = imported_id(&home, "Only png");
    let out = home.path().join("out");

    sketchpad_cmd(&home)
        .args(["export", &id, "-f", "png", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(".pdf").not());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
}

#[test]
fn export_unknown_id_fails() {
    let home = TempDir::new().unwrap();
    sketchpad_cmd(&home)
        .args(["export", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved sketch with id '12345'"));
}

#[test]
fn delete_removes_only_that_sketch() {
    let home = TempDir::new().unwrap();
    let first = imported_id(&home, "First");
    let second = imported_id(&home, "Second");

    sketchpad_cmd(&home)
        .args(["delete", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    sketchpad_cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(second).and(predicate::str::contains("First").not()));

    sketchpad_cmd(&home)
        .args(["delete", &first])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved sketch"));
}

#[test]
fn show_config_reads_xdg_config_home() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("sketchpad");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[drawing]\ndefault_size = 500.0\n",
    )
    .unwrap();

    sketchpad_cmd(&home)
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[drawing]"))
        .stdout(predicate::str::contains("default_size = 20.0"));
}

#[test]
fn explicit_config_flag_overrides_default_location() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    std::fs::write(&config, "[export]\nformat = \"pdf\"\n").unwrap();

    sketchpad_cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("format = \"pdf\""));
}

#[test]
fn schema_binary_prints_json() {
    Command::cargo_bin("sketchpad-config-schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"drawing\""));
}
