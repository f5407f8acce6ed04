use super::*;
use image::Rgba;
use std::fs;
use tempfile::TempDir;

fn folder_with(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for (i, name) in names.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let shade = (i as u8).wrapping_mul(40);
        RgbaImage::from_pixel(3, 4, Rgba([255, shade, 0, 255]))
            .save_with_format(dir.path().join(name), image::ImageFormat::Png)
            .expect("write png");
    }
    dir
}

fn small_session() -> Session {
    Session::new(SessionSettings {
        preview_size: [6, 8],
        ..SessionSettings::default()
    })
}

#[test]
fn starts_empty_and_ignores_input() {
    let mut session = small_session();
    assert_eq!(session.state(), SessionState::Empty);
    session.next_image().expect("next");
    session.previous_image().expect("previous");
    session.set_params(AdjustmentParameters {
        brightness: 0.0,
        ..AdjustmentParameters::IDENTITY
    });
    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.preview().is_none());
    assert_eq!(session.preview_revision(), 0);
    assert_eq!(session.params().brightness, 0.0);
}

#[test]
fn selecting_a_folder_loads_the_first_image() {
    let dir = folder_with(&["b.png", "a.png"]);
    let mut session = small_session();
    let outcome = session.select_folder(dir.path()).expect("select");
    assert_eq!(outcome, FolderSelection::Loaded { count: 2 });
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.image_set().map(ImageSet::index), Some(0));
    assert_eq!(
        session.current_meta().map(ImageMeta::display_name).as_deref(),
        Some("a.png")
    );
    let preview = session.preview().expect("preview");
    assert_eq!(preview.dimensions(), (6, 8));
    let summary = session.current_meta().map(ImageMeta::summary).unwrap_or_default();
    assert!(summary.contains("3×4 px"), "{summary}");
}

#[test]
fn folder_without_images_stays_empty_but_is_remembered() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("notes.txt"), b"hi").expect("write");
    let mut session = small_session();
    let outcome = session.select_folder(dir.path()).expect("select");
    assert_eq!(outcome, FolderSelection::NoImages);
    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.folder(), Some(dir.path()));
    assert_eq!(session.export_request().unwrap_err(), NOTHING_TO_EXPORT);
}

#[test]
fn empty_folder_drops_a_stale_preview() {
    let with_images = folder_with(&["a.png"]);
    let without = tempfile::tempdir().expect("temp dir");
    let mut session = small_session();
    session.select_folder(with_images.path()).expect("select");
    assert!(session.preview().is_some());
    session.select_folder(without.path()).expect("select");
    assert!(session.preview().is_none());
    assert!(session.current_meta().is_none());
}

#[test]
fn unreadable_folder_leaves_state_unchanged() {
    let dir = folder_with(&["a.png"]);
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    let missing = dir.path().join("missing");
    assert!(session.select_folder(&missing).is_err());
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.folder(), Some(dir.path()));
}

#[test]
fn previous_from_first_of_three_wraps_to_last() {
    let dir = folder_with(&["a.png", "b.png", "c.png"]);
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    session.previous_image().expect("previous");
    assert_eq!(session.image_set().map(ImageSet::index), Some(2));
    assert_eq!(
        session.current_meta().map(ImageMeta::display_name).as_deref(),
        Some("c.png")
    );
    session.next_image().expect("next");
    assert_eq!(session.image_set().map(ImageSet::index), Some(0));
}

#[test]
fn slider_change_rerenders_preview() {
    let dir = folder_with(&["a.png"]);
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    let before = session.preview_revision();
    session.set_params(AdjustmentParameters {
        brightness: 0.0,
        ..AdjustmentParameters::IDENTITY
    });
    assert!(session.preview_revision() > before);
    let preview = session.preview().expect("preview");
    assert!(preview.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn navigation_reapplies_current_parameters() {
    let dir = folder_with(&["a.png", "b.png"]);
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    session.set_params(AdjustmentParameters {
        saturation: 0.0,
        ..AdjustmentParameters::IDENTITY
    });
    session.next_image().expect("next");
    let preview = session.preview().expect("preview");
    assert!(preview.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
}

#[test]
fn broken_image_keeps_navigation_alive() {
    let dir = folder_with(&["a.png", "c.png"]);
    fs::write(dir.path().join("b.png"), b"broken").expect("write");
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    assert!(session.next_image().is_err());
    assert_eq!(session.state(), SessionState::Loaded);
    assert!(session.preview().is_none());
    session.next_image().expect("next");
    assert!(session.preview().is_some());
}

#[test]
fn export_request_snapshots_files_and_params() {
    let dir = folder_with(&["a.png", "b.png"]);
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    let params = AdjustmentParameters {
        hue_shift: 0.5,
        ..AdjustmentParameters::IDENTITY
    };
    session.set_params(params);
    let req = session.export_request().expect("request");
    assert_eq!(req.folder, dir.path());
    assert_eq!(req.files, ["a.png", "b.png"]);
    assert_eq!(req.params, params);
}

#[test]
fn empty_folder_never_creates_an_output_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = small_session();
    session.select_folder(dir.path()).expect("select");
    assert!(session.export_request().is_err());
    assert!(!dir.path().join("output").exists());
}
