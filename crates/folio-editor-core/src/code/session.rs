//! Code editing sessions and language auto-detection scheduling.
//!
//! A [`CodeSession`] binds one code payload entry to one live surface, and
//! owns the debounced auto-detection state for that surface. Detection is
//! an explicit cancellable task: every edit restarts the idle window, at
//! most one classification request is outstanding per session, and a
//! result is only applied if its generation still matches. Dropping the
//! session abandons both the pending window and any in-flight request
//! (stale completions fail the generation check and go nowhere).

use std::time::Duration;

use smol_str::SmolStr;
use web_time::Instant;

use folio_common::Config;

use crate::code::surface::CodeSurface;
use crate::model::CodeEntry;
use crate::types::{CursorPos, IndentWidth, LangType};

/// Debounce state for language auto-detection.
#[derive(Debug, Clone, Default)]
pub(crate) struct DetectDebounce {
    deadline: Option<Instant>,
    generation: u64,
    in_flight: Option<u64>,
}

impl DetectDebounce {
    /// An edit happened: restart the idle window and invalidate whatever
    /// was pending or in flight.
    fn schedule(&mut self, now: Instant, window: Duration) {
        self.generation += 1;
        self.deadline = Some(now + window);
        self.in_flight = None;
    }

    /// Idle window elapsed? Returns the generation to tag the request
    /// with, at most once per scheduled window.
    fn fire(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.in_flight = Some(self.generation);
                Some(self.generation)
            }
            _ => None,
        }
    }

    /// Whether a completed request with this generation is still current.
    fn resolve(&mut self, generation: u64) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
        self.in_flight = None;
    }
}

/// A classification request ready to hand to the language classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectRequest {
    /// Matches the request back to [`CodeSession::apply_detection`].
    pub generation: u64,
    /// Full document text to classify.
    pub text: String,
}

/// One code payload bound to one editing surface.
pub struct CodeSession<S: CodeSurface> {
    entry: CodeEntry,
    surface: S,
    editable: bool,
    indent: IndentWidth,
    auto_detect: bool,
    debounce: DetectDebounce,
    debounce_window: Duration,
}

impl<S: CodeSurface> CodeSession<S> {
    /// Create a session and configure its surface: language, indent,
    /// read-only state, gutter, and the document text (read-only mode pads
    /// the trimmed code with blank lines for presentation).
    ///
    /// Auto-detection starts enabled only for plain-text entries; an entry
    /// that already carries a language keeps it until the user re-enables
    /// detection or picks another.
    pub fn new(entry: CodeEntry, mut surface: S, editable: bool, config: &Config) -> Self {
        let indent = IndentWidth::from_spaces(config.default_indent_spaces);
        let auto_detect = entry.lang == LangType::Txt;

        surface.set_read_only(!editable);
        surface.set_language(entry.lang);
        surface.set_indent_width(indent);
        surface.set_gutter(editable);
        load_doc(&mut surface, &entry.code, editable);

        Self {
            entry,
            surface,
            editable,
            indent,
            auto_detect,
            debounce: DetectDebounce::default(),
            debounce_window: Duration::from_millis(config.detect_debounce_ms),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.entry.name
    }

    pub fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.entry.name = name.into();
    }

    pub fn entry(&self) -> &CodeEntry {
        &self.entry
    }

    pub fn language(&self) -> LangType {
        self.entry.lang
    }

    pub fn indent(&self) -> IndentWidth {
        self.indent
    }

    pub fn auto_detect(&self) -> bool {
        self.auto_detect
    }

    pub fn cursor(&self) -> CursorPos {
        self.surface.cursor()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The surface content changed. Restarts the detection idle window
    /// when auto-detection is active.
    pub fn notify_change(&mut self, now: Instant) {
        if self.editable && self.auto_detect {
            self.debounce.schedule(now, self.debounce_window);
        }
    }

    /// Poll the debounce: when the idle window has elapsed this returns
    /// the request to dispatch to the classifier, once.
    pub fn poll_detect(&mut self, now: Instant) -> Option<DetectRequest> {
        let generation = self.debounce.fire(now)?;
        Some(DetectRequest {
            generation,
            text: self.surface.content(),
        })
    }

    /// A classification result arrived. Applied only if the request is
    /// still current and auto-detection was not switched off meanwhile;
    /// unknown ids degrade to plain text.
    pub fn apply_detection(&mut self, generation: u64, lang_id: &str) {
        if !self.debounce.resolve(generation) {
            tracing::debug!(generation, "stale language detection result dropped");
            return;
        }
        if !self.auto_detect {
            return;
        }
        self.update_lang(LangType::from_id(lang_id), false);
    }

    /// The classifier failed for this request: clear the in-flight slot
    /// and leave the language unchanged. The next edit reschedules.
    pub fn fail_detection(&mut self, generation: u64) {
        let _ = self.debounce.resolve(generation);
    }

    /// Manual language pick from the selector. Disables auto-detection
    /// for this session from here on.
    pub fn select_language(&mut self, lang: LangType) {
        self.auto_detect = false;
        self.debounce.cancel();
        self.update_lang(lang, true);
    }

    /// Status-bar toggle for auto-detection.
    pub fn toggle_auto_detect(&mut self) -> bool {
        self.auto_detect = !self.auto_detect;
        if !self.auto_detect {
            self.debounce.cancel();
        }
        self.auto_detect
    }

    /// Status-bar toggle between 2 and 4 spaces. Only the indent unit is
    /// reconfigured.
    pub fn toggle_indent(&mut self) -> IndentWidth {
        self.indent = self.indent.toggled();
        self.surface.set_indent_width(self.indent);
        self.indent
    }

    /// Surface blur: sync the document text into the entry and emit it.
    pub fn blur(&mut self) -> CodeEntry {
        self.entry.code = self.surface.content();
        self.entry.clone()
    }

    /// External payload update for this session (document reload hit a
    /// tab with the same name): adopt the entry and reconfigure.
    pub fn reload(&mut self, entry: CodeEntry) {
        self.update_lang(entry.lang, true);
        load_doc(&mut self.surface, &entry.code, self.editable);
        self.entry = entry;
        self.debounce.cancel();
    }

    fn update_lang(&mut self, lang: LangType, force: bool) {
        if self.entry.lang == lang && !force {
            return;
        }
        self.entry.lang = lang;
        self.surface.set_language(lang);
    }
}

/// Load code into a surface: verbatim when editable, trimmed and padded
/// with blank lines for read-only presentation.
fn load_doc(surface: &mut impl CodeSurface, code: &str, editable: bool) {
    if editable {
        surface.set_content(code);
    } else {
        surface.set_content(&format!("\n{}\n", code.trim()));
    }
}

/// Drive one session's auto-detection against a classifier: dispatch the
/// due request, if any, and route the outcome back. Classifier failures
/// leave the language unchanged; the next edit reschedules.
pub async fn run_detection<S: CodeSurface>(
    session: &mut CodeSession<S>,
    classifier: &impl crate::platform::LanguageClassifier,
    now: Instant,
) {
    let Some(request) = session.poll_detect(now) else {
        return;
    };
    match classifier.classify(&request.text).await {
        Ok(lang_id) => session.apply_detection(request.generation, &lang_id),
        Err(err) => {
            tracing::debug!(%err, "language classification failed");
            session.fail_detection(request.generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::surface::PlainSurface;

    fn session(entry: CodeEntry) -> CodeSession<PlainSurface> {
        CodeSession::new(entry, PlainSurface::new(), true, &Config::default())
    }

    fn start() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_auto_detect_enabled_only_for_plain_text() {
        let plain = session(CodeEntry::default());
        assert!(plain.auto_detect());

        let typed = session(CodeEntry::new("main.rs", "", LangType::Rs));
        assert!(!typed.auto_detect());
    }

    #[test]
    fn test_debounce_waits_for_idle_window() {
        let mut session = session(CodeEntry::default());
        let t0 = start();

        session.surface_mut().type_text("select 1;");
        session.notify_change(t0);

        assert!(session.poll_detect(t0).is_none());
        assert!(
            session
                .poll_detect(t0 + Duration::from_millis(999))
                .is_none()
        );
        let request = session
            .poll_detect(t0 + Duration::from_millis(1000))
            .expect("window elapsed");
        assert_eq!(request.text, "select 1;");

        // Fires once per window.
        assert!(
            session
                .poll_detect(t0 + Duration::from_millis(1001))
                .is_none()
        );
    }

    #[test]
    fn test_new_edit_reschedules_and_stales_old_request() {
        let mut session = session(CodeEntry::default());
        let t0 = start();

        session.notify_change(t0);
        let request = session.poll_detect(t0 + Duration::from_millis(1000)).unwrap();

        // Another edit lands before the result returns.
        session.notify_change(t0 + Duration::from_millis(1100));
        session.apply_detection(request.generation, "rs");
        assert_eq!(session.language(), LangType::Txt);

        // The rescheduled request applies normally.
        let request = session.poll_detect(t0 + Duration::from_millis(2100)).unwrap();
        session.apply_detection(request.generation, "rs");
        assert_eq!(session.language(), LangType::Rs);
    }

    #[test]
    fn test_manual_pick_disables_auto_detect() {
        let mut session = session(CodeEntry::default());
        let t0 = start();

        session.notify_change(t0);
        session.select_language(LangType::Py);
        assert!(!session.auto_detect());
        assert_eq!(session.language(), LangType::Py);

        // The pending window was cancelled outright.
        assert!(
            session
                .poll_detect(t0 + Duration::from_millis(2000))
                .is_none()
        );

        // Edits no longer schedule anything.
        session.notify_change(t0 + Duration::from_millis(3000));
        assert!(
            session
                .poll_detect(t0 + Duration::from_millis(5000))
                .is_none()
        );
    }

    #[test]
    fn test_unknown_result_degrades_to_plain_text() {
        let mut session = session(CodeEntry::default());
        session.select_language(LangType::Rs);
        session.toggle_auto_detect();
        let t0 = start();

        session.notify_change(t0);
        let request = session.poll_detect(t0 + Duration::from_millis(1000)).unwrap();
        session.apply_detection(request.generation, "");
        assert_eq!(session.language(), LangType::Txt);
    }

    #[test]
    fn test_failed_detection_leaves_language_unchanged() {
        let mut session = session(CodeEntry::new("q.sql", "select 1;", LangType::Sql));
        session.toggle_auto_detect();
        let t0 = start();

        session.notify_change(t0);
        let request = session.poll_detect(t0 + Duration::from_millis(1000)).unwrap();
        session.fail_detection(request.generation);
        assert_eq!(session.language(), LangType::Sql);

        // A late duplicate completion for the failed request is stale.
        session.apply_detection(request.generation, "py");
        assert_eq!(session.language(), LangType::Sql);
    }

    #[test]
    fn test_blur_syncs_surface_into_entry() {
        let mut session = session(CodeEntry::default());
        session.surface_mut().type_text("fn main() {}");
        let entry = session.blur();
        assert_eq!(entry.code, "fn main() {}");
        assert_eq!(session.entry().code, "fn main() {}");
    }

    #[test]
    fn test_read_only_pads_document() {
        let entry = CodeEntry::new("a.rs", "  fn main() {}  ", LangType::Rs);
        let session = CodeSession::new(entry, PlainSurface::new(), false, &Config::default());
        assert_eq!(session.surface().content(), "\nfn main() {}\n");
        assert!(session.surface().is_read_only());
    }

    #[test]
    fn test_indent_toggle_reconfigures_surface() {
        let mut session = session(CodeEntry::default());
        assert_eq!(session.indent(), IndentWidth::Four);
        assert_eq!(session.toggle_indent(), IndentWidth::Two);
        assert_eq!(session.surface().indent_width(), IndentWidth::Two);
    }

    #[tokio::test]
    async fn test_run_detection_against_classifier() {
        use crate::platform::{ClassifyError, LanguageClassifier};
        use smol_str::ToSmolStr;

        struct StubClassifier {
            result: Result<&'static str, &'static str>,
        }

        impl LanguageClassifier for StubClassifier {
            async fn classify(&self, _text: &str) -> Result<SmolStr, ClassifyError> {
                self.result
                    .map(|id| id.to_smolstr())
                    .map_err(|err| ClassifyError(err.to_string()))
            }
        }

        let mut session = session(CodeEntry::default());
        let t0 = start();
        session.surface_mut().type_text("fn main() {}");
        session.notify_change(t0);

        let classifier = StubClassifier { result: Ok("rs") };
        run_detection(&mut session, &classifier, t0 + Duration::from_millis(1000)).await;
        assert_eq!(session.language(), LangType::Rs);

        // A failing classifier leaves the language where it was.
        session.notify_change(t0 + Duration::from_millis(2000));
        let classifier = StubClassifier {
            result: Err("worker crashed"),
        };
        run_detection(&mut session, &classifier, t0 + Duration::from_millis(3000)).await;
        assert_eq!(session.language(), LangType::Rs);
    }

    #[test]
    fn test_reload_reconfigures_and_cancels_detection() {
        let mut session = session(CodeEntry::default());
        let t0 = start();
        session.notify_change(t0);

        session.reload(CodeEntry::new("b.py", "print(1)", LangType::Py));
        assert_eq!(session.language(), LangType::Py);
        assert_eq!(session.surface().content(), "print(1)");
        assert!(
            session
                .poll_detect(t0 + Duration::from_millis(2000))
                .is_none()
        );
    }
}
