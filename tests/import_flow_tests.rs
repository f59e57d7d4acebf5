use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use arcview::archive::{self, ArchiveDecoder, ArchiveError, ArchiveKind, ZipDecoder};
use arcview::core::action::{Action, DecodeRequest, Effect, update};
use arcview::core::content::Content;
use arcview::core::state::App;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// ============================================================================
// Helper Functions
// ============================================================================

/// Writes a zip with the given text entries into a fresh temp file.
/// `None` content adds a directory entry.
fn write_archive(file_name: &str, entries: &[(&str, Option<&str>)]) -> PathBuf {
    let dir = test_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        match content {
            Some(text) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(text.as_bytes()).unwrap();
            }
            None => writer.add_directory(*name, options).unwrap(),
        }
    }
    writer.finish().unwrap();
    path
}

fn test_dir() -> PathBuf {
    std::env::temp_dir().join(format!("arcview-test-{}", std::process::id()))
}

fn new_app() -> App {
    App::new(Arc::new(ZipDecoder::default()))
}

/// Runs an import the way the TUI does and feeds the outcome back.
async fn import_into(app: &mut App, path: PathBuf) {
    let effect = update(app, Action::ImportRequested(path.clone()));
    assert_eq!(effect, Effect::LoadArchive(path.clone()));
    let action = match archive::import(app.decoder.as_ref(), &path).await {
        Ok(loaded) => Action::ArchiveLoaded(loaded),
        Err(error) => Action::ImportFailed {
            file_name: archive::file_name(&path),
            error,
        },
    };
    assert_eq!(update(app, action), Effect::None);
}

/// Runs a decode request and returns the resulting action without applying it.
async fn decode(app: &App, request: DecodeRequest) -> Action {
    let blob = app.archive.as_ref().unwrap().blob.clone();
    let result = app.decoder.read_text(blob, &request.path).await;
    Action::ContentLoaded {
        generation: request.generation,
        path: request.path,
        result,
    }
}

fn expect_decode(effect: Effect) -> DecodeRequest {
    match effect {
        Effect::Decode(request) => request,
        other => panic!("expected a decode effect, got {other:?}"),
    }
}

// ============================================================================
// Import → select → decode
// ============================================================================

#[tokio::test]
async fn test_import_select_and_read() {
    let path = write_archive(
        "flow.zip",
        &[
            ("docs/", None),
            ("docs/guide.md", Some("# Guide\nhello")),
            ("readme.txt", Some("top level")),
        ],
    );
    let mut app = new_app();
    import_into(&mut app, path).await;

    assert_eq!(app.archive_name(), Some("flow.zip"));
    assert_eq!(app.generation, 1);
    assert_eq!(app.status_message, "2 files in flow.zip");
    let names: Vec<&str> = app.tree.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "readme.txt"]);

    let request = expect_decode(update(&mut app, Action::SelectFile("docs/guide.md".into())));
    assert_eq!(app.selected_content(), Some(&Content::Loading));

    let loaded = decode(&app, request).await;
    update(&mut app, loaded);
    assert_eq!(
        app.selected_content(),
        Some(&Content::Text("# Guide\nhello".into()))
    );

    // Reopening is served from the cache
    update(&mut app, Action::SelectFile("readme.txt".into()));
    assert_eq!(
        update(&mut app, Action::SelectFile("docs/guide.md".into())),
        Effect::None
    );
}

#[tokio::test]
async fn test_stale_decode_is_discarded_after_reimport() {
    let first = write_archive("first.zip", &[("a.txt", Some("from first"))]);
    let second = write_archive("second.zip", &[("a.txt", Some("from second"))]);
    let mut app = new_app();
    import_into(&mut app, first).await;

    let stale_request = expect_decode(update(&mut app, Action::SelectFile("a.txt".into())));
    let stale = decode(&app, stale_request).await;

    import_into(&mut app, second).await;
    assert_eq!(app.generation, 2);
    assert!(app.tabs.is_empty());

    update(&mut app, stale);
    assert!(app.contents.is_empty());

    let request = expect_decode(update(&mut app, Action::SelectFile("a.txt".into())));
    assert_eq!(request.generation, 2);
    let fresh = decode(&app, request).await;
    update(&mut app, fresh);
    assert_eq!(
        app.selected_content(),
        Some(&Content::Text("from second".into()))
    );
}

#[tokio::test]
async fn test_docx_lists_its_parts() {
    let path = write_archive(
        "letter.docx",
        &[
            ("[Content_Types].xml", Some("<Types/>")),
            ("word/document.xml", Some("<w:document/>")),
        ],
    );
    let decoder = ZipDecoder::default();
    let loaded = archive::import(&decoder, &path).await.unwrap();
    assert_eq!(loaded.kind, ArchiveKind::Docx);
    assert_eq!(loaded.entries.len(), 2);

    let text = decoder
        .read_text(loaded.blob.clone(), "word/document.xml")
        .await
        .unwrap();
    assert_eq!(text, "<w:document/>");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unsupported_extension_is_rejected_before_io() {
    let decoder = ZipDecoder::default();
    let result = tokio_test::block_on(archive::import(
        &decoder,
        std::path::Path::new("/does/not/exist/notes.pdf"),
    ));
    assert_eq!(result.unwrap_err(), ArchiveError::Unsupported(".pdf".into()));
}

#[tokio::test]
async fn test_missing_file_sets_notice() {
    let mut app = new_app();
    let missing = std::env::temp_dir().join("arcview-definitely-missing.zip");
    import_into(&mut app, missing).await;

    assert!(!app.is_importing);
    assert!(app.archive.is_none());
    let notice = app.notice.clone().unwrap();
    assert!(notice.contains("arcview-definitely-missing.zip"));
}

#[tokio::test]
async fn test_corrupt_archive_keeps_previous_state() {
    let good = write_archive("good.zip", &[("a.txt", Some("a"))]);
    let mut app = new_app();
    import_into(&mut app, good).await;

    let corrupt = test_dir().join("corrupt.zip");
    std::fs::write(&corrupt, b"this is not a zip file").unwrap();
    import_into(&mut app, corrupt).await;

    assert_eq!(app.archive_name(), Some("good.zip"));
    assert_eq!(app.generation, 1);
    assert!(app.notice.as_deref().is_some_and(|n| n.contains("corrupt.zip")));
}
