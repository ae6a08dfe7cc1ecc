//! End-to-end tests for the classify → identify → build → render pipeline

use nfogen_core::{
    DescriptorBuilder, DescriptorOptions, DescriptorSerializer, DescriptorSink, HashAlgorithm,
    IdSource, IdentifierDeriver, NameClassifier,
};
use nfogen_test_utils::{FailingSink, MemorySink};
use std::path::Path;

fn render_episode(
    directory: &Path,
    base_name: &str,
    extension: &str,
    options: DescriptorOptions,
) -> String {
    let classifier = NameClassifier::new();
    let directory_name = directory
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let season = classifier.season_for_directory(directory_name).unwrap();
    let record = classifier
        .resolve_episode(base_name, season, Some(base_name))
        .unwrap();
    let identifier = IdentifierDeriver::default().derive(directory, base_name, extension);
    let tree = DescriptorBuilder::new(options).build(&record, &identifier);
    DescriptorSerializer::new().render(&tree).unwrap()
}

#[test]
fn test_file_season_overrides_directory_season() {
    let directory = Path::new("Show").join("01 - Pilot Season");
    let rendered = render_episode(
        &directory,
        "3x15 - Finale",
        ".mkv",
        DescriptorOptions {
            emit_empty_elements: false,
            ..Default::default()
        },
    );

    let expected_id = HashAlgorithm::MD5.hash_bytes(
        directory
            .join("3x15 - Finale.mkv")
            .to_string_lossy()
            .as_bytes(),
    );
    let expected = format!(
        "{}\n<episodedetails>\n  <title>Finale</title>\n  <season>3</season>\n  <episode>15</episode>\n  <uniqueid type=\"hashpath\">{expected_id}</uniqueid>\n</episodedetails>",
        nfogen_core::DECLARATION
    );
    assert_eq!(rendered, expected);
}

#[test]
fn test_directory_season_fills_in_for_episode_only_names() {
    let rendered = render_episode(
        Path::new("Season 02"),
        "05. Middle",
        ".mp4",
        DescriptorOptions::default(),
    );

    assert!(rendered.contains("  <title>Middle</title>\n"));
    assert!(rendered.contains("  <season>2</season>\n"));
    assert!(rendered.contains("  <episode>5</episode>\n"));
    assert!(rendered.contains("  <userrating></userrating>\n</episodedetails>"));
}

#[test]
fn test_unmatched_name_still_produces_descriptor() {
    let rendered = render_episode(
        Path::new("Extras"),
        "Behind the Scenes",
        ".mkv",
        DescriptorOptions::default(),
    );

    assert!(rendered.contains("<title>Behind the Scenes</title>"));
    assert!(rendered.contains("<season></season>"));
    assert!(rendered.contains("<episode></episode>"));
    assert!(rendered.contains("<uniqueid type=\"hashpath\">"));
}

#[test]
fn test_empty_policy_controls_season_element() {
    let with_empty = render_episode(
        Path::new("Extras"),
        "01. Title",
        ".mkv",
        DescriptorOptions::default(),
    );
    let without_empty = render_episode(
        Path::new("Extras"),
        "01. Title",
        ".mkv",
        DescriptorOptions {
            emit_empty_elements: false,
            ..Default::default()
        },
    );

    assert!(with_empty.contains("<season></season>"));
    assert!(!without_empty.contains("<season"));
    assert!(!without_empty.contains("<plot"));
}

#[test]
fn test_specials_directory_gives_season_zero() {
    let rendered = render_episode(
        Path::new("Specials"),
        "01. Holiday",
        ".mkv",
        DescriptorOptions::default(),
    );
    assert!(rendered.contains("<season>0</season>"));
}

#[test]
fn test_rendered_documents_reach_sink() {
    let rendered = render_episode(
        Path::new("Season 01"),
        "1x01. Pilot",
        ".mkv",
        DescriptorOptions::default(),
    );

    let mut sink = MemorySink::new();
    sink.persist(Path::new("Season 01/1x01. Pilot.nfo"), &rendered)
        .unwrap();
    assert_eq!(
        sink.get(Path::new("Season 01/1x01. Pilot.nfo")),
        Some(rendered.as_str())
    );

    let mut failing = FailingSink::always();
    assert!(
        failing
            .persist(Path::new("Season 01/1x01. Pilot.nfo"), &rendered)
            .is_err()
    );
}

#[test]
fn test_identifier_policy_changes_uniqueid() {
    let directory = Path::new("Season 01");
    let by_path = IdentifierDeriver::new(IdSource::Path, HashAlgorithm::MD5);
    let by_name = IdentifierDeriver::new(IdSource::Filename, HashAlgorithm::MD5);

    assert_ne!(
        by_path.derive(directory, "1x01. Pilot", ".mkv"),
        by_name.derive(directory, "1x01. Pilot", ".mkv")
    );
    assert_eq!(
        by_name.derive(directory, "1x01. Pilot", ".mkv"),
        HashAlgorithm::MD5.hash_bytes(b"1x01. Pilot.mkv")
    );
}
