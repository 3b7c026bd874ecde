use assert_cmd::Command;
use image::{Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

fn write_sample(dir: &Path) -> std::path::PathBuf {
    // three flat color blocks, 90 x 60
    let img = RgbImage::from_fn(90, 60, |x, y| {
        if x < 45 {
            Rgb([210, 40, 40])
        } else if y < 30 {
            Rgb([40, 60, 200])
        } else {
            Rgb([240, 230, 90])
        }
    });
    let path = dir.join("sample.png");
    img.save(&path).unwrap();
    path
}

#[test]
fn writes_outline_and_key() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path());
    let outline = dir.path().join("outline.png");
    let key = dir.path().join("key.png");

    let mut cmd = Command::cargo_bin("paint-by-numbers").unwrap();
    cmd.arg(&input)
        .arg("-o")
        .arg(&outline)
        .arg("-k")
        .arg(&key)
        .args(["-n", "3", "-a", "50"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Outline saved:"))
        .stdout(predicates::str::contains("Color key saved:"));

    let outline_img = image::open(&outline).unwrap().to_rgb8();
    assert_eq!(outline_img.dimensions(), (90, 60));
    let key_img = image::open(&key).unwrap().to_rgb8();
    assert_eq!(key_img.dimensions(), (400, 50));
}

#[test]
fn resizes_to_max_side() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path());
    let outline = dir.path().join("small.png");
    let key = dir.path().join("small_key.png");

    let mut cmd = Command::cargo_bin("paint-by-numbers").unwrap();
    cmd.arg(&input)
        .arg("--output")
        .arg(&outline)
        .arg("--key")
        .arg(&key)
        .args(["--ncolors", "7", "--size", "45", "--dilation", "0"]);
    cmd.assert().success();

    let outline_img = image::open(&outline).unwrap().to_rgb8();
    assert_eq!(outline_img.dimensions(), (45, 30));
    let key_img = image::open(&key).unwrap().to_rgb8();
    assert_eq!(key_img.dimensions(), (400, 100));
}

#[test]
fn negative_dilation_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path());
    let outline = dir.path().join("never.png");

    let mut cmd = Command::cargo_bin("paint-by-numbers").unwrap();
    cmd.arg(&input).arg("-o").arg(&outline).args(["-d", "-1"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid configuration"));
    assert!(!outline.exists());
}

#[test]
fn zero_colors_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path());

    let mut cmd = Command::cargo_bin("paint-by-numbers").unwrap();
    cmd.current_dir(dir.path()).arg(&input).args(["-n", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("number of colors"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("paint-by-numbers").unwrap();
    cmd.current_dir(dir.path()).arg("does-not-exist.png");
    cmd.assert().failure().stderr(predicates::str::contains("Error:"));
}
