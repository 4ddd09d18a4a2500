use super::*;
use crate::library::Track;

fn t(title: &str) -> Track {
    Track {
        path: std::path::PathBuf::new(),
        title: title.into(),
        artist: None,
        album: None,
        duration: None,
        display: title.into(),
    }
}

#[test]
fn navigation_wraps_both_ways() {
    let mut app = App::new(vec![t("Alpha"), t("Beta"), t("Gamma")]);
    assert_eq!(app.selected, 0);

    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected, 1);
}

#[test]
fn navigation_on_empty_catalog_is_a_no_op() {
    let mut app = App::new(Vec::new());
    app.next();
    app.prev();
    app.set_selected(5);
    assert_eq!(app.selected, 0);
    assert!(!app.has_tracks());
}

#[test]
fn set_selected_clamps_to_catalog() {
    let mut app = App::new(vec![t("Alpha"), t("Beta")]);
    app.set_selected(99);
    assert_eq!(app.selected, 1);
    app.set_selected(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn later_notices_replace_earlier_ones() {
    let mut app = App::new(vec![t("Alpha")]);
    assert!(app.notice.is_none());
    app.set_notice("first");
    app.set_notice("second");
    assert_eq!(app.notice.as_deref(), Some("second"));
}

#[test]
fn phase_starts_stopped_and_metadata_window_toggles() {
    let mut app = App::new(vec![t("Alpha")]);
    assert_eq!(app.phase, SessionPhase::Stopped);
    assert!(!app.metadata_window);
    app.toggle_metadata_window();
    assert!(app.metadata_window);
    app.toggle_metadata_window();
    assert!(!app.metadata_window);
}
