mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::*;
use predicates::prelude::*;

fn webp_squeeze() -> Command {
    Command::cargo_bin("webp-squeeze").unwrap()
}

#[test]
fn test_cli_help() {
    webp_squeeze().arg("--help").assert().success();
}

#[test]
fn test_subcommand_help() {
    for subcommand in ["validate", "compress", "batch", "info"] {
        webp_squeeze().args([subcommand, "--help"]).assert().success();
    }
}

#[test]
fn test_compress_missing_args() {
    webp_squeeze().args(["compress"]).assert().failure();
}

#[test]
fn test_compress_nonexistent_file() {
    let temp_dir = create_temp_directory();
    webp_squeeze()
        .args(["compress", "nonexistent.jpg"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileNotFound"));
}

#[test]
fn test_validate_accepts_and_rejects() {
    let temp = assert_fs::TempDir::new().unwrap();
    let photo = temp.child("photo.bmp");
    write_gradient_bmp(photo.path(), 16, 16);
    let notes = temp.child("notes.txt");
    notes.write_str("not an image").unwrap();

    webp_squeeze()
        .args(["validate"])
        .arg(photo.path())
        .assert()
        .success();

    webp_squeeze()
        .args(["validate"])
        .arg(photo.path())
        .arg(notes.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type: application/octet-stream"))
        .stderr(predicate::str::contains("1 of 2 files rejected"));
}

#[test]
fn test_validate_rejects_oversized_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let big = temp.child("big.png");
    big.write_binary(&vec![0u8; 11 * 1024 * 1024]).unwrap();

    webp_squeeze()
        .args(["validate"])
        .arg(big.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File size (11.00MB) exceeds the maximum allowed size of 10MB",
        ));
}

#[test]
fn test_compress_writes_webp() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("savanna.bmp");
    write_gradient_bmp(&input, 64, 48);
    let output_dir = temp_dir.path().join("uploads");

    webp_squeeze()
        .arg("compress")
        .arg(&input)
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Compression ratio"));

    let output = std::fs::read(output_dir.join("savanna.webp")).unwrap();
    assert_eq!(&output[0..4], b"RIFF");
    assert_eq!(&output[8..12], b"WEBP");
}

#[test]
fn test_compress_resizes_to_max_dimension() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("wide.bmp");
    write_gradient_bmp(&input, 80, 40);
    let output_dir = create_test_output_directory(temp_dir.path());

    webp_squeeze()
        .args(["compress", "--max-dimension", "20"])
        .arg(&input)
        .arg(&output_dir)
        .assert()
        .success();

    let dimensions = image::image_dimensions(output_dir.join("wide.webp")).unwrap();
    assert_eq!(dimensions, (20, 10));
}

#[test]
fn test_compress_svg_is_copied_unchanged() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("logo.svg");
    write_bytes(&input, SVG_LOGO);
    let output_dir = create_test_output_directory(temp_dir.path());

    webp_squeeze()
        .arg("compress")
        .arg(&input)
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vector image kept as-is"));

    assert_eq!(std::fs::read(output_dir.join("logo.svg")).unwrap(), SVG_LOGO);
}

#[test]
fn test_compress_animated_gif_is_copied_unchanged() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("loop.gif");
    write_bytes(&input, &animated_gif_bytes());
    let output_dir = create_test_output_directory(temp_dir.path());

    webp_squeeze()
        .arg("compress")
        .arg(&input)
        .arg(&output_dir)
        .assert()
        .success();

    assert_eq!(
        std::fs::read(output_dir.join("loop.gif")).unwrap(),
        animated_gif_bytes()
    );
}

#[test]
fn test_compress_passthrough_into_own_directory_keeps_input() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("logo.svg");
    write_bytes(&input, SVG_LOGO);

    webp_squeeze()
        .arg("compress")
        .arg(&input)
        .arg(temp_dir.path())
        .assert()
        .success();

    assert_eq!(std::fs::read(&input).unwrap(), SVG_LOGO);
}

#[test]
fn test_compress_keeps_existing_output() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("savanna.bmp");
    write_gradient_bmp(&input, 64, 48);
    let output_dir = create_test_output_directory(temp_dir.path());
    write_bytes(&output_dir.join("savanna.webp"), b"earlier upload");

    webp_squeeze()
        .arg("compress")
        .arg(&input)
        .arg(&output_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read(output_dir.join("savanna.webp")).unwrap(),
        b"earlier upload"
    );
    let output = std::fs::read(output_dir.join("savanna-1.webp")).unwrap();
    assert_eq!(&output[8..12], b"WEBP");
}

#[test]
fn test_compress_corrupt_image_fails() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("broken.jpg");
    write_bytes(&input, b"fake image data");
    let output_dir = temp_dir.path().join("output");

    webp_squeeze()
        .arg("compress")
        .arg(&input)
        .arg(&output_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decode"));

    assert!(!output_dir.join("broken.webp").exists());
}

#[test]
fn test_compress_rejects_output_ceiling_above_intake_ceiling() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("savanna.bmp");
    write_gradient_bmp(&input, 16, 16);

    webp_squeeze()
        .args(["compress", "--max-output-mib", "20"])
        .arg(&input)
        .arg(temp_dir.path().join("output"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidOptions"));
}

#[test]
fn test_quiet_mode_prints_nothing() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("savanna.bmp");
    write_gradient_bmp(&input, 32, 32);

    webp_squeeze()
        .args(["compress", "-q"])
        .arg(&input)
        .arg(temp_dir.path().join("output"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_batch_nonexistent_input() {
    let temp_dir = create_temp_directory();
    webp_squeeze()
        .args(["batch", "nonexistent"])
        .arg(temp_dir.path().join("output"))
        .assert()
        .success(); // Nothing matched; reported, not an error
}

#[test]
fn test_batch_isolates_failures() {
    let temp_dir = create_temp_directory();
    let input_dir = create_mixed_input_directory(temp_dir.path());
    let output_dir = temp_dir.path().join("output");

    webp_squeeze()
        .arg("batch")
        .arg(&input_dir)
        .arg(&output_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.jpg"));

    assert!(output_dir.join("savanna.webp").exists());
    assert_eq!(std::fs::read(output_dir.join("logo.svg")).unwrap(), SVG_LOGO);
    assert!(!output_dir.join("broken.webp").exists());
    assert!(!output_dir.join("notes.webp").exists());
}

#[test]
fn test_batch_in_place_keeps_inputs() {
    let temp_dir = create_temp_directory();
    let input_dir = temp_dir.path().join("gallery");
    std::fs::create_dir(&input_dir).unwrap();
    let bmp = input_dir.join("a.bmp");
    write_gradient_bmp(&bmp, 64, 64);
    let webp = input_dir.join("a.webp");
    write_solid_webp(&webp, 16, 16);
    let bmp_bytes = std::fs::read(&bmp).unwrap();
    let webp_bytes = std::fs::read(&webp).unwrap();

    webp_squeeze()
        .arg("batch")
        .arg(&input_dir)
        .arg(&input_dir)
        .args(["-j", "2"])
        .assert()
        .success();

    assert_eq!(std::fs::read(&bmp).unwrap(), bmp_bytes);
    assert_eq!(std::fs::read(&webp).unwrap(), webp_bytes);
    assert!(input_dir.join("a-1.webp").is_file());
    assert!(input_dir.join("a-2.webp").is_file());
}

#[test]
fn test_batch_recursive() {
    let temp_dir = create_temp_directory();
    let input_dir = temp_dir.path().join("input");
    std::fs::create_dir(&input_dir).unwrap();
    create_nested_directory_structure(&input_dir);

    let flat_output = temp_dir.path().join("flat");
    webp_squeeze()
        .arg("batch")
        .arg(&input_dir)
        .arg(&flat_output)
        .assert()
        .success();
    assert!(!flat_output.join("nested.webp").exists());

    let recursive_output = temp_dir.path().join("recursive");
    webp_squeeze()
        .arg("batch")
        .arg(&input_dir)
        .arg(&recursive_output)
        .args(["--recursive", "-j", "2"])
        .assert()
        .success();
    assert!(recursive_output.join("nested.webp").exists());
}

#[test]
fn test_info_reports_plan() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("savanna.bmp");
    write_gradient_bmp(&input, 64, 48);

    webp_squeeze()
        .args(["info", "--max-dimension", "32"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dimensions: 64x48 pixels"))
        .stdout(predicate::str::contains("WebP at 32x24"));
}

#[test]
fn test_info_with_fake_image() {
    let temp_dir = create_temp_directory();
    let input = temp_dir.path().join("test.jpg");
    write_bytes(&input, b"fake image data");

    webp_squeeze()
        .arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("could not be decoded"));
}

#[test]
fn test_info_nonexistent_file() {
    webp_squeeze()
        .args(["info", "nonexistent.jpg"])
        .assert()
        .failure();
}
