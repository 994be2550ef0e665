use std::io::Write;
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use soilscan::{classify_image, LoadError, Severity};

fn write_uniform_png(dir: &TempDir, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(64, 64, Rgb(color))
        .save(&path)
        .expect("write fixture");
    path
}

#[test]
fn green_field_classifies_as_no_erosion() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_uniform_png(&dir, "field.png", [40, 180, 40]);

    let result = classify_image(&path).unwrap();
    assert_eq!(result.prediction, Severity::None);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.metrics.vegetation, 1.0);
    // All-vegetation scenes carry no soil evidence and fall back to the
    // loam default.
    assert_eq!(result.soil_type, "Alluvial / Loamy");
    assert_eq!(result.soil_color, "Brown");
}

#[test]
fn dark_scene_classifies_as_severe_gully() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_uniform_png(&dir, "gully.png", [20, 20, 20]);

    let result = classify_image(&path).unwrap();
    assert_eq!(result.prediction, Severity::Severe);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.metrics.darkness, 1.0);
    assert_eq!(result.soil_type, "Black Cotton Soil (Clay)");
}

#[test]
fn flat_gray_classifies_as_slight_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_uniform_png(&dir, "sheet.png", [128, 128, 128]);

    let result = classify_image(&path).unwrap();
    assert_eq!(result.prediction, Severity::Slight);
    assert_eq!(result.confidence, 0.6);
    assert_eq!(result.metrics.vegetation, 0.0);
    assert_eq!(result.metrics.edge_density, 0.0);
    assert_eq!(result.metrics.line_count, 0);
    assert_eq!(result.metrics.darkness, 0.0);
    assert_eq!(result.soil_color, "Brown");
}

#[test]
fn red_soil_is_reported_as_laterite() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_uniform_png(&dir, "laterite.png", [180, 60, 40]);

    let result = classify_image(&path).unwrap();
    assert_eq!(result.prediction, Severity::Slight);
    assert_eq!(result.soil_type, "Laterite / Red Soil");
    assert_eq!(result.soil_color, "Red");
}

#[test]
fn missing_file_is_a_not_found_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = classify_image(&dir.path().join("nope.png")).unwrap_err();
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn non_image_bytes_are_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.png");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"this is not a png").unwrap();
    drop(file);

    let err = classify_image(&path).unwrap_err();
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::Decode(_)) => {}
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[test]
fn classification_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_uniform_png(&dir, "repeat.png", [150, 110, 70]);

    let first = classify_image(&path).unwrap();
    let second = classify_image(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn confidence_is_always_in_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = [
        [40u8, 180, 40],
        [20, 20, 20],
        [128, 128, 128],
        [180, 60, 40],
        [255, 255, 255],
        [0, 0, 0],
        [59, 59, 59],
        [230, 210, 120],
    ];
    for (i, color) in fixtures.into_iter().enumerate() {
        let path = write_uniform_png(&dir, &format!("bounds_{}.png", i), color);
        let result = classify_image(&path).unwrap();
        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "confidence {} out of bounds for {:?}",
            result.confidence,
            color
        );
    }
}
