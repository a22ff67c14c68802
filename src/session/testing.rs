//! In-memory stand-ins for the notes service and a speech recognizer.

use std::sync::{Arc, Mutex};

use reqwest::StatusCode;

use crate::api::{self, ApiAction, NotesApi, SyncError};
use crate::dictation::{DictationEvent, DictationSink, SpeechRecognizer};
use crate::models::{Note, NoteDraft};

pub fn note(id: &str, title: &str, content: &str, created_at: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: created_at.to_string(),
        updated_at: None,
    }
}

struct FakeServer {
    notes: Vec<Note>,
    next_id: u32,
    clock: u32,
    failing: Vec<ApiAction>,
    calls: Vec<ApiAction>,
    enhanced: Option<String>,
}

impl FakeServer {
    fn tick(&mut self) -> String {
        let stamp = format!("t{}", self.clock);
        self.clock += 1;
        stamp
    }

    fn enter(&mut self, action: ApiAction) -> api::Result<()> {
        self.calls.push(action);
        if self.failing.contains(&action) {
            return Err(SyncError::status(action, StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }

    fn not_found(action: ApiAction) -> SyncError {
        SyncError::Status {
            action,
            status: StatusCode::NOT_FOUND,
            detail: Some("Note not found".to_string()),
        }
    }
}

/// Notes service kept in memory. Clones share the same server.
#[derive(Clone)]
pub struct FakeNotesApi {
    server: Arc<Mutex<FakeServer>>,
}

impl FakeNotesApi {
    pub fn new() -> Self {
        Self::with_notes(Vec::new())
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            server: Arc::new(Mutex::new(FakeServer {
                notes,
                next_id: 100,
                clock: 1,
                failing: Vec::new(),
                calls: Vec::new(),
                enhanced: None,
            })),
        }
    }

    /// Make every later call of `action` answer 500
    pub fn fail(&self, action: ApiAction) {
        self.server.lock().unwrap().failing.push(action);
    }

    pub fn recover(&self, action: ApiAction) {
        self.server.lock().unwrap().failing.retain(|a| *a != action);
    }

    pub fn set_enhanced(&self, text: &str) {
        self.server.lock().unwrap().enhanced = Some(text.to_string());
    }

    pub fn calls(&self) -> Vec<ApiAction> {
        self.server.lock().unwrap().calls.clone()
    }

    pub fn stored(&self) -> Vec<Note> {
        self.server.lock().unwrap().notes.clone()
    }

    /// Change the stored collection behind the client's back
    pub fn replace_stored(&self, notes: Vec<Note>) {
        self.server.lock().unwrap().notes = notes;
    }
}

impl NotesApi for FakeNotesApi {
    fn list_notes(&self) -> api::Result<Vec<Note>> {
        let mut server = self.server.lock().unwrap();
        server.enter(ApiAction::List)?;
        Ok(server.notes.clone())
    }

    fn create_note(&self, draft: &NoteDraft) -> api::Result<Note> {
        let mut server = self.server.lock().unwrap();
        server.enter(ApiAction::Create)?;
        let id = server.next_id.to_string();
        server.next_id += 1;
        let created_at = server.tick();
        let note = note(&id, &draft.title, &draft.content, &created_at);
        server.notes.push(note.clone());
        Ok(note)
    }

    fn update_note(&self, id: &str, draft: &NoteDraft) -> api::Result<Note> {
        let mut server = self.server.lock().unwrap();
        server.enter(ApiAction::Update)?;
        let stamp = server.tick();
        let stored = server
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| FakeServer::not_found(ApiAction::Update))?;
        stored.title = draft.title.clone();
        stored.content = draft.content.clone();
        stored.updated_at = Some(stamp);
        Ok(stored.clone())
    }

    fn delete_note(&self, id: &str) -> api::Result<()> {
        let mut server = self.server.lock().unwrap();
        server.enter(ApiAction::Delete)?;
        let before = server.notes.len();
        server.notes.retain(|n| n.id != id);
        if server.notes.len() == before {
            return Err(FakeServer::not_found(ApiAction::Delete));
        }
        Ok(())
    }

    fn enhance_note(&self, id: &str) -> api::Result<String> {
        let mut server = self.server.lock().unwrap();
        server.enter(ApiAction::Enhance)?;
        let stored = server
            .notes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| FakeServer::not_found(ApiAction::Enhance))?;
        Ok(server
            .enhanced
            .clone()
            .unwrap_or_else(|| format!("Enhanced: {}", stored.content)))
    }
}

#[derive(Default)]
struct RecognizerLog {
    starts: usize,
    stops: usize,
    sink: Option<Box<dyn DictationSink>>,
}

/// Recognizer that replays a fixed script on start and keeps the sink so
/// a test can deliver more events later.
pub struct ScriptedRecognizer {
    available: bool,
    ends_on_stop: bool,
    script: Vec<DictationEvent>,
    log: Arc<Mutex<RecognizerLog>>,
}

/// Test-side view of a [`ScriptedRecognizer`] after it was boxed
#[derive(Clone)]
pub struct RecognizerHandle {
    log: Arc<Mutex<RecognizerLog>>,
}

impl ScriptedRecognizer {
    pub fn new(script: Vec<DictationEvent>) -> (Self, RecognizerHandle) {
        let log = Arc::new(Mutex::new(RecognizerLog::default()));
        let recognizer = Self {
            available: true,
            ends_on_stop: true,
            script,
            log: Arc::clone(&log),
        };
        (recognizer, RecognizerHandle { log })
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ends_on_stop: true,
            script: Vec::new(),
            log: Arc::new(Mutex::new(RecognizerLog::default())),
        }
    }

    /// Keep the sink open on stop, like a backend that reports its end
    /// from another thread some time later
    pub fn without_end_on_stop(mut self) -> Self {
        self.ends_on_stop = false;
        self
    }
}

fn deliver(sink: &dyn DictationSink, event: DictationEvent) {
    match event {
        DictationEvent::Started => sink.on_start(),
        DictationEvent::Transcript(text) => sink.on_result(&text),
        DictationEvent::Error(message) => sink.on_error(&message),
        DictationEvent::Ended => sink.on_end(),
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&mut self, sink: Box<dyn DictationSink>) -> Result<(), SyncError> {
        for event in self.script.clone() {
            deliver(sink.as_ref(), event);
        }
        let mut log = self.log.lock().unwrap();
        log.starts += 1;
        log.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.stops += 1;
        if !self.ends_on_stop {
            return;
        }
        if let Some(sink) = log.sink.take() {
            sink.on_end();
        }
    }
}

impl RecognizerHandle {
    pub fn emit(&self, event: DictationEvent) {
        let log = self.log.lock().unwrap();
        if let Some(sink) = log.sink.as_deref() {
            deliver(sink, event);
        }
    }

    /// Drop the sink without an end event, as a crashed backend would
    pub fn disconnect(&self) {
        self.log.lock().unwrap().sink = None;
    }

    pub fn starts(&self) -> usize {
        self.log.lock().unwrap().starts
    }

    pub fn stops(&self) -> usize {
        self.log.lock().unwrap().stops
    }
}
