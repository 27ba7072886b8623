// End-to-end tests for the editing session with in-memory host collaborators
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use comment_editor::error::AppError;
use comment_editor::image_intake::{EncodedAsset, RawAsset};
use comment_editor::paste::{ClipboardContents, ClipboardSource, PasteError};
use comment_editor::session::{
    CommentSink, EditStatus, EditingSession, EditorHost, EditorMount, ImageOutcome, Notice,
    NoticeKind, Notifier, SessionParts, WORD_PASTE_ACTION,
};
use comment_editor::settings::EditorConfig;

const WORD_SPAN: &str = "<p class=MsoNormal><span style='mso-ansi-language:NO-BOK'>Hei</span></p>";

#[derive(Default)]
struct MemoryHost {
    text: Mutex<String>,
    inserted: Mutex<Vec<String>>,
    appended: Mutex<Vec<String>>,
    detached: AtomicUsize,
}

impl MemoryHost {
    fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }
}

impl EditorHost for MemoryHost {
    fn get_current_text(&self) -> String {
        self.text()
    }

    fn set_current_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    fn insert_text(&self, text: &str) {
        self.inserted.lock().unwrap().push(text.to_string());
        self.text.lock().unwrap().push_str(text);
    }

    fn append_markup(&self, markup: &str) {
        self.appended.lock().unwrap().push(markup.to_string());
        self.text.lock().unwrap().push_str(markup);
    }

    fn detach(&self) {
        self.detached.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    fn kinds(&self) -> Vec<NoticeKind> {
        self.notices.lock().unwrap().iter().map(|n| n.kind).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

enum FakeClipboard {
    Contents(ClipboardContents),
    Denied,
}

#[async_trait]
impl ClipboardSource for FakeClipboard {
    async fn read(&self) -> Result<ClipboardContents, PasteError> {
        match self {
            Self::Contents(contents) => Ok(contents.clone()),
            Self::Denied => Err(PasteError::ClipboardAccess("denied".to_string())),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    saved: Mutex<Vec<String>>,
    cancelled: AtomicUsize,
}

impl CommentSink for RecordingSink {
    fn save_comment(&self, plain_text: &str) {
        self.saved.lock().unwrap().push(plain_text.to_string());
    }

    fn cancel_edit_comment(&self) {
        self.cancelled.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    host: Arc<MemoryHost>,
    notifier: Arc<RecordingNotifier>,
    sink: Arc<RecordingSink>,
    parts: SessionParts,
}

impl Harness {
    fn new(clipboard: FakeClipboard) -> Self {
        let host = Arc::new(MemoryHost::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let sink = Arc::new(RecordingSink::default());
        let parts = SessionParts {
            host: host.clone(),
            notifier: notifier.clone(),
            clipboard: Arc::new(clipboard),
            sink: sink.clone(),
        };
        Self {
            host,
            notifier,
            sink,
            parts,
        }
    }

    fn with_html(html: Option<&str>, text: Option<&str>) -> Self {
        Self::new(FakeClipboard::Contents(ClipboardContents {
            plain_text: text.map(str::to_string),
            html: html.map(str::to_string),
        }))
    }

    fn open(&self, config: &EditorConfig) -> EditingSession {
        EditingSession::create(config, self.parts.clone()).expect("session should open")
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| image::Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

type Resolved = Arc<Mutex<Option<Option<EncodedAsset>>>>;

fn resolver() -> (Resolved, impl FnOnce(Option<EncodedAsset>) + Send + 'static) {
    let slot: Resolved = Arc::new(Mutex::new(None));
    let writer = slot.clone();
    (slot, move |asset| *writer.lock().unwrap() = Some(asset))
}

#[tokio::test]
async fn plain_text_paste_is_inserted_without_notice() {
    let harness = Harness::with_html(None, Some("hello"));
    let session = harness.open(&EditorConfig::default());

    let result = session
        .on_custom_action(WORD_PASTE_ACTION)
        .await
        .unwrap()
        .expect("paste action should run");

    assert_eq!(result.text, "hello");
    assert!(!result.was_modified);
    assert_eq!(*harness.host.inserted.lock().unwrap(), vec!["hello".to_string()]);
    assert!(harness.host.appended.lock().unwrap().is_empty());
    assert!(harness.notifier.kinds().is_empty());
}

#[tokio::test]
async fn word_paste_is_cleaned_appended_and_notified_once() {
    let harness = Harness::with_html(Some(WORD_SPAN), Some("Hei"));
    let session = harness.open(&EditorConfig::default());
    harness.host.set_current_text("Før ");

    let result = session.on_custom_action(WORD_PASTE_ACTION).await.unwrap().unwrap();

    assert_eq!(result.text, "<p>Hei</p>");
    assert!(result.was_modified);
    assert_eq!(harness.host.text(), "Før <p>Hei</p>");
    assert_eq!(harness.notifier.kinds(), vec![NoticeKind::WordContentAdjusted]);
    assert_eq!(
        harness.notifier.notices.lock().unwrap()[0].message,
        "Du limte inn fra Word. Vi skal ha fikset på det."
    );
}

#[tokio::test]
async fn ordinary_html_paste_is_appended_unchanged() {
    let harness = Harness::with_html(Some("<p>vanlig <b>tekst</b></p>"), None);
    let session = harness.open(&EditorConfig::default());

    let result = session.paste_from_word().await.unwrap();

    assert!(!result.was_modified);
    assert_eq!(harness.host.text(), "<p>vanlig <b>tekst</b></p>");
    assert!(harness.notifier.kinds().is_empty());
}

#[tokio::test]
async fn unknown_custom_action_is_ignored() {
    let harness = Harness::with_html(None, Some("hello"));
    let session = harness.open(&EditorConfig::default());

    assert!(session.on_custom_action("boldButton").await.unwrap().is_none());
    assert!(harness.host.inserted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_clipboard_leaves_document_untouched() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());

    let result = session.paste_from_word().await.unwrap();

    assert!(!result.was_modified);
    assert_eq!(harness.host.text(), "");
    assert!(harness.notifier.kinds().is_empty());
}

#[tokio::test]
async fn denied_clipboard_is_reported_to_the_user() {
    let harness = Harness::new(FakeClipboard::Denied);
    let session = harness.open(&EditorConfig::default());

    let err = session.paste_from_word().await.unwrap_err();

    assert_eq!(err.code(), "CLIPBOARD_ACCESS");
    assert_eq!(harness.notifier.kinds(), vec![NoticeKind::ClipboardUnavailable]);
}

#[test]
fn content_change_notifies_without_rewriting_by_default() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());
    harness.host.set_current_text(WORD_SPAN);

    let result = session.on_content_changed().unwrap();

    assert!(result.was_modified);
    assert_eq!(harness.host.text(), WORD_SPAN);
    assert_eq!(harness.notifier.kinds(), vec![NoticeKind::WordContentAdjusted]);
}

#[test]
fn content_change_rewrites_when_auto_correct_is_enabled() {
    let harness = Harness::with_html(None, None);
    let mut config = EditorConfig::default();
    config.session.auto_correct_on_change = true;
    let session = harness.open(&config);
    harness.host.set_current_text(WORD_SPAN);

    session.on_content_changed().unwrap();
    assert_eq!(harness.host.text(), "<p>Hei</p>");

    // 回写后的内容不再触发提示
    let second = session.on_content_changed().unwrap();
    assert!(!second.was_modified);
    assert_eq!(harness.notifier.kinds().len(), 1);
}

#[test]
fn content_change_can_strip_markup_on_rewrite() {
    let harness = Harness::with_html(None, None);
    let mut config = EditorConfig::default();
    config.session.auto_correct_on_change = true;
    config.session.strip_markup_on_change = true;
    let session = harness.open(&config);
    harness.host.set_current_text(WORD_SPAN);

    session.on_content_changed().unwrap();
    assert_eq!(harness.host.text(), "Hei");
}

#[test]
fn clean_document_change_is_silent() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());
    harness.host.set_current_text("**fet** tekst");

    let result = session.on_content_changed().unwrap();
    assert!(!result.was_modified);
    assert!(harness.notifier.kinds().is_empty());
}

#[test]
fn initial_value_is_written_on_create() {
    let harness = Harness::with_html(None, None);
    let mut config = EditorConfig::default();
    config.session.initial_value = Some("Eksisterende kommentar".to_string());

    let _session = harness.open(&config);
    assert_eq!(harness.host.text(), "Eksisterende kommentar");
}

#[test]
fn save_strips_markup_before_handing_over() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());
    harness.host.set_current_text("<p>Hei <b>der</b> &amp; takk</p><script>x()</script>");

    let saved = session.save().unwrap();

    assert_eq!(saved, "Hei der &amp; takk");
    assert_eq!(*harness.sink.saved.lock().unwrap(), vec![saved]);
}

#[test]
fn cancel_is_blocked_while_saving() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());

    assert!(!session.cancel(EditStatus { active: true }));
    assert_eq!(harness.sink.cancelled.load(Ordering::SeqCst), 0);

    assert!(session.cancel(EditStatus::default()));
    assert_eq!(harness.sink.cancelled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn accepted_image_is_resolved_as_jpeg_data_uri() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());
    let (slot, resolve) = resolver();

    let outcome = session
        .on_image_insertion_requested(RawAsset::new(png_bytes(1200, 800), "image/png"), resolve)
        .await
        .unwrap();

    assert_eq!(outcome, ImageOutcome::Inserted);
    let resolved = slot.lock().unwrap().take().expect("resolve should be called");
    let asset = resolved.expect("image should be accepted");
    assert!(asset.data_uri().starts_with("data:image/jpeg;base64,"));
    assert!(harness.notifier.kinds().is_empty());
}

#[tokio::test]
async fn oversized_image_is_rejected_with_notice() {
    let harness = Harness::with_html(None, None);
    let mut config = EditorConfig::default();
    config.intake.max_encoded_bytes = 10;
    let session = harness.open(&config);
    let (slot, resolve) = resolver();

    let outcome = session
        .on_image_insertion_requested(RawAsset::new(png_bytes(64, 64), "image/png"), resolve)
        .await
        .unwrap();

    assert_eq!(outcome, ImageOutcome::Rejected);
    assert_eq!(*slot.lock().unwrap(), Some(None));
    assert_eq!(harness.notifier.kinds(), vec![NoticeKind::ImageTooLarge]);
    assert_eq!(
        harness.notifier.notices.lock().unwrap()[0].message,
        "Bildet er for stort, bruk et mindre bilde"
    );
}

#[tokio::test]
async fn unreadable_image_resolves_empty_and_reports_error() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());
    let (slot, resolve) = resolver();

    let err = session
        .on_image_insertion_requested(RawAsset::new(b"not an image".to_vec(), "image/png"), resolve)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Image(_)));
    assert_eq!(*slot.lock().unwrap(), Some(None));
    assert_eq!(harness.notifier.kinds(), vec![NoticeKind::ImageUnreadable]);
}

#[tokio::test]
async fn image_finishing_after_teardown_is_discarded() {
    let harness = Harness::with_html(None, None);
    let session = harness.open(&EditorConfig::default());
    let (slot, resolve) = resolver();

    let worker = session.clone();
    let task = tokio::spawn(async move {
        worker
            .on_image_insertion_requested(RawAsset::new(png_bytes(2000, 1500), "image/png"), resolve)
            .await
    });
    tokio::task::yield_now().await;
    session.destroy();

    match task.await.unwrap() {
        Ok(outcome) => assert_eq!(outcome, ImageOutcome::Discarded),
        Err(err) => assert!(matches!(err, AppError::SessionClosed)),
    }
    assert!(slot.lock().unwrap().is_none());
    assert!(harness.notifier.kinds().is_empty());
    assert_eq!(harness.host.detached.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn closed_session_refuses_further_work() {
    let harness = Harness::with_html(None, Some("hello"));
    let session = harness.open(&EditorConfig::default());
    let other_handle = session.clone();

    session.destroy();
    other_handle.clone().destroy();

    assert!(!other_handle.is_open());
    assert_eq!(harness.host.detached.load(Ordering::SeqCst), 1);
    assert!(matches!(other_handle.paste_from_word().await, Err(AppError::SessionClosed)));
    assert!(matches!(other_handle.save(), Err(AppError::SessionClosed)));
    assert!(harness.host.inserted.lock().unwrap().is_empty());
}

#[test]
fn mount_creates_one_session_until_unmounted() {
    let harness = Harness::with_html(None, None);
    let mut mount = EditorMount::new(EditorConfig::default());
    let mut built = 0;

    let first = mount
        .mount_with(|| {
            built += 1;
            harness.parts.clone()
        })
        .unwrap();
    let second = mount
        .mount_with(|| {
            built += 1;
            harness.parts.clone()
        })
        .unwrap();

    assert_eq!(built, 1);
    assert_eq!(first.id(), second.id());
    assert!(mount.is_mounted());

    assert!(mount.unmount());
    assert!(!mount.is_mounted());
    assert!(!mount.unmount());
    assert!(!first.is_open());
    assert_eq!(harness.host.detached.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_the_mount_tears_the_session_down() {
    let harness = Harness::with_html(None, None);
    let session = {
        let mut mount = EditorMount::new(EditorConfig::default());
        mount.mount_with(|| harness.parts.clone()).unwrap()
    };

    assert!(!session.is_open());
    assert_eq!(harness.host.detached.load(Ordering::SeqCst), 1);
}
