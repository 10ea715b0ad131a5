//! Voice capture: bridges a platform speech recognizer into a draft message.
//!
//! The adapter is a small state machine (`Idle ↔ Listening`). Recognizers
//! push [`RecognitionEvent`]s into a channel handed to them on `start`; the
//! adapter applies those events when the caller pumps or awaits them.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::error::VoiceError;
use crate::i18n::{TextKey, Translator};

/// One recognized alternative for a slice of audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSegment {
    pub text: String,
    pub is_final: bool,
}

impl RecognitionSegment {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Events a recognizer emits while a capture is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Results from `result_index` onwards are new in this event.
    Result {
        result_index: usize,
        segments: Vec<RecognitionSegment>,
    },
    Error(String),
    End,
}

/// Platform speech-recognition capability.
pub trait SpeechRecognizer: Send {
    fn is_supported(&self) -> bool;

    /// Starts a single-utterance capture in `locale`, delivering events to `events`.
    fn start(
        &mut self,
        locale: &str,
        events: UnboundedSender<RecognitionEvent>,
    ) -> Result<(), String>;

    fn stop(&mut self);
}

/// Recognizer for hosts with no speech facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(
        &mut self,
        _locale: &str,
        _events: UnboundedSender<RecognitionEvent>,
    ) -> Result<(), String> {
        Err("speech recognition is not available".to_string())
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
}

pub struct VoiceCaptureAdapter {
    recognizer: Box<dyn SpeechRecognizer>,
    locale: String,
    state: VoiceState,
    transcript: String,
    error: Option<VoiceError>,
    events: Option<UnboundedReceiver<RecognitionEvent>>,
}

impl VoiceCaptureAdapter {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>, locale: impl Into<String>) -> Self {
        let error = (!recognizer.is_supported()).then_some(VoiceError::Unsupported);
        Self {
            recognizer,
            locale: locale.into(),
            state: VoiceState::Idle,
            transcript: String::new(),
            error,
            events: None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == VoiceState::Listening
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn error(&self) -> Option<&VoiceError> {
        self.error.as_ref()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Switches the capture locale. An active capture is stopped first.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        if self.is_listening() {
            self.stop_listening();
        }
        self.locale = locale.into();
    }

    /// Idle → Listening. No-op when unsupported or already listening.
    pub fn start_listening(&mut self) {
        if !self.is_supported() || self.is_listening() {
            return;
        }

        self.transcript.clear();
        self.error = None;

        let (tx, rx) = mpsc::unbounded_channel();
        match self.recognizer.start(&self.locale, tx) {
            Ok(()) => {
                debug!(locale = %self.locale, "Voice capture started");
                self.events = Some(rx);
                self.state = VoiceState::Listening;
            }
            Err(message) => {
                warn!(%message, "Voice capture failed to start");
                self.error = Some(VoiceError::StartFailed(message));
                self.state = VoiceState::Idle;
            }
        }
    }

    /// Listening → Idle without producing a transcript. Events still in
    /// flight from the cancelled capture are discarded.
    pub fn stop_listening(&mut self) {
        if !self.is_supported() || !self.is_listening() {
            return;
        }
        self.recognizer.stop();
        self.events = None;
        self.state = VoiceState::Idle;
        debug!("Voice capture stopped");
    }

    pub fn reset_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Returns the transcript and clears it.
    pub fn take_transcript(&mut self) -> Option<String> {
        if self.transcript.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.transcript))
        }
    }

    /// Applies every queued event without waiting. Returns the current state.
    pub fn pump(&mut self) -> VoiceState {
        while self.is_listening() {
            let Some(rx) = self.events.as_mut() else {
                break;
            };
            match rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.finish();
                }
            }
        }
        self.state
    }

    /// Waits for the next event of the active capture and applies it.
    /// Returns immediately when not listening.
    pub async fn next_event(&mut self) -> VoiceState {
        if !self.is_listening() {
            return self.state;
        }
        let event = match self.events.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        };
        match event {
            Some(event) => self.handle_event(event),
            None => self.finish(),
        }
        self.state
    }

    fn handle_event(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result {
                result_index,
                segments,
            } => {
                let finals: String = segments
                    .iter()
                    .skip(result_index)
                    .filter(|segment| segment.is_final)
                    .map(|segment| segment.text.as_str())
                    .collect();
                if segments.iter().skip(result_index).any(|s| s.is_final) {
                    debug!(chars = finals.chars().count(), "Voice capture produced a transcript");
                    self.transcript = finals;
                    self.finish();
                }
            }
            RecognitionEvent::Error(message) => {
                warn!(%message, "Speech recognizer reported an error");
                self.error = Some(VoiceError::Platform(message));
                self.finish();
            }
            RecognitionEvent::End => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.events = None;
        self.state = VoiceState::Idle;
    }
}

/// Localized inline notice for a voice failure.
pub fn voice_notice(error: &VoiceError, t: &Translator) -> String {
    match error {
        VoiceError::Unsupported => t.t(TextKey::VoiceUnsupported),
        VoiceError::StartFailed(message) => t.t_args(TextKey::VoiceStartFailed, &[message]),
        VoiceError::Platform(message) => t.t_args(TextKey::VoiceRecognitionError, &[message]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Recognizer that hands its event sender back to the test.
    #[derive(Clone, Default)]
    struct FakeRecognizer {
        sender: Arc<Mutex<Option<UnboundedSender<RecognitionEvent>>>>,
        locales: Arc<Mutex<Vec<String>>>,
        stops: Arc<Mutex<usize>>,
        fail_start: bool,
    }

    impl FakeRecognizer {
        fn emit(&self, event: RecognitionEvent) {
            if let Some(tx) = self.sender.lock().unwrap().as_ref() {
                let _ = tx.send(event);
            }
        }
    }

    impl SpeechRecognizer for FakeRecognizer {
        fn is_supported(&self) -> bool {
            true
        }

        fn start(
            &mut self,
            locale: &str,
            events: UnboundedSender<RecognitionEvent>,
        ) -> Result<(), String> {
            if self.fail_start {
                return Err("microphone busy".into());
            }
            self.locales.lock().unwrap().push(locale.to_string());
            *self.sender.lock().unwrap() = Some(events);
            Ok(())
        }

        fn stop(&mut self) {
            *self.stops.lock().unwrap() += 1;
        }
    }

    fn final_result(text: &str) -> RecognitionEvent {
        RecognitionEvent::Result {
            result_index: 0,
            segments: vec![RecognitionSegment::final_text(text)],
        }
    }

    #[test]
    fn test_final_result_sets_transcript_and_returns_to_idle() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "te-IN");

        adapter.start_listening();
        assert_eq!(adapter.state(), VoiceState::Listening);
        assert_eq!(fake.locales.lock().unwrap().as_slice(), ["te-IN"]);

        fake.emit(final_result("పత్తి ధర ఎంత?"));
        assert_eq!(adapter.pump(), VoiceState::Idle);
        assert_eq!(adapter.transcript(), "పత్తి ధర ఎంత?");
    }

    #[test]
    fn test_restart_clears_previous_transcript() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "en-US");

        adapter.start_listening();
        fake.emit(final_result("first"));
        adapter.pump();
        assert_eq!(adapter.transcript(), "first");

        adapter.start_listening();
        assert_eq!(adapter.transcript(), "");
        assert!(adapter.is_listening());
    }

    #[test]
    fn test_interim_results_are_ignored() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "en-US");

        adapter.start_listening();
        fake.emit(RecognitionEvent::Result {
            result_index: 0,
            segments: vec![RecognitionSegment::interim("pad")],
        });
        assert_eq!(adapter.pump(), VoiceState::Listening);
        assert_eq!(adapter.transcript(), "");

        fake.emit(RecognitionEvent::Result {
            result_index: 1,
            segments: vec![
                RecognitionSegment::final_text("stale "),
                RecognitionSegment::final_text("paddy "),
                RecognitionSegment::final_text("price"),
            ],
        });
        adapter.pump();
        assert_eq!(adapter.transcript(), "paddy price");
    }

    #[test]
    fn test_platform_error_recorded() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "hi-IN");

        adapter.start_listening();
        fake.emit(RecognitionEvent::Error("no-speech".into()));
        assert_eq!(adapter.pump(), VoiceState::Idle);
        assert_eq!(
            adapter.error(),
            Some(&VoiceError::Platform("no-speech".into()))
        );
        assert_eq!(adapter.transcript(), "");
    }

    #[test]
    fn test_stop_discards_late_events() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "en-US");

        adapter.start_listening();
        adapter.stop_listening();
        assert_eq!(*fake.stops.lock().unwrap(), 1);

        fake.emit(final_result("too late"));
        assert_eq!(adapter.pump(), VoiceState::Idle);
        assert_eq!(adapter.transcript(), "");
    }

    #[test]
    fn test_start_failure_stays_idle() {
        let fake = FakeRecognizer {
            fail_start: true,
            ..Default::default()
        };
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake), "en-US");

        adapter.start_listening();
        assert_eq!(adapter.state(), VoiceState::Idle);
        assert_eq!(
            adapter.error(),
            Some(&VoiceError::StartFailed("microphone busy".into()))
        );
    }

    #[test]
    fn test_unsupported_start_is_noop() {
        let mut adapter = VoiceCaptureAdapter::new(Box::new(UnsupportedRecognizer), "en-US");
        assert!(!adapter.is_supported());
        assert_eq!(adapter.error(), Some(&VoiceError::Unsupported));

        adapter.start_listening();
        assert_eq!(adapter.state(), VoiceState::Idle);
        assert_eq!(adapter.error(), Some(&VoiceError::Unsupported));
    }

    #[test]
    fn test_locale_change_stops_capture() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "te-IN");

        adapter.start_listening();
        adapter.set_locale("hi-IN");
        assert_eq!(adapter.state(), VoiceState::Idle);
        assert_eq!(adapter.locale(), "hi-IN");

        adapter.start_listening();
        assert_eq!(fake.locales.lock().unwrap().last().unwrap(), "hi-IN");
    }

    #[tokio::test]
    async fn test_next_event_waits_for_result() {
        let fake = FakeRecognizer::default();
        let mut adapter = VoiceCaptureAdapter::new(Box::new(fake.clone()), "en-US");

        adapter.start_listening();
        let emitter = fake.clone();
        tokio::spawn(async move {
            emitter.emit(final_result("maize"));
        });

        assert_eq!(adapter.next_event().await, VoiceState::Idle);
        assert_eq!(adapter.take_transcript().as_deref(), Some("maize"));
        assert!(adapter.take_transcript().is_none());
    }

    #[test]
    fn test_voice_notice_is_localized() {
        let en = Translator::builtin(crate::language::Language::English);
        assert_eq!(
            voice_notice(&VoiceError::Unsupported, &en),
            "Speech recognition is not supported on this device."
        );
        assert_eq!(
            voice_notice(&VoiceError::StartFailed("microphone busy".into()), &en),
            "Could not start recognition: microphone busy"
        );

        let hi = en.with_language(crate::language::Language::Hindi);
        assert_eq!(
            voice_notice(&VoiceError::Platform("no-speech".into()), &hi),
            "वाक् पहचान त्रुटि: no-speech"
        );
    }
}
