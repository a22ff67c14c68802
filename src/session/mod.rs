//! Note session: the local mirror of the remote collection
//!
//! Every change to the collection goes through the service first; local
//! state only moves once a response confirms it. Handlers never return
//! errors to the caller. Failures are written to the single
//! [`SessionState::error`] slot and the handler reports `false`.
//!
//! Editing: Viewing -> Editing on `begin_edit`; back to Viewing on a
//! successful save or `cancel_edit`; a failed save or an enhancement
//! stays in Editing. Only one note is edited at a time.
//!
//! Compose: Closed -> Open on `open_compose`; Closed again after a
//! successful create or `cancel_compose`.
//!
//! Delete confirmation: Idle -> Confirming on `request_delete`; Idle after
//! the confirmed request finishes (either way) or `cancel_delete`.

mod state;
#[cfg(test)]
mod testing;

pub use state::{ComposeState, EditState, SessionState};

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use crate::api::{NotesApi, SyncError};
use crate::config::EmptyDraftPolicy;
use crate::dictation::{ChannelSink, DictationEvent, SpeechRecognizer};
use crate::models::{Note, NoteDraft};

/// Client session bound to one notes service
pub struct NoteSession {
    api: Box<dyn NotesApi>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    dictation: Option<Receiver<DictationEvent>>,
    empty_drafts: EmptyDraftPolicy,
    last_created: Option<String>,
    state: SessionState,
}

impl NoteSession {
    pub fn new(api: Box<dyn NotesApi>) -> Self {
        Self {
            api,
            recognizer: None,
            dictation: None,
            empty_drafts: EmptyDraftPolicy::default(),
            last_created: None,
            state: SessionState::default(),
        }
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_empty_draft_policy(mut self, policy: EmptyDraftPolicy) -> Self {
        self.empty_drafts = policy;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// The note stored by the most recent successful create, if still listed
    pub fn last_created(&self) -> Option<&Note> {
        self.last_created.as_deref().and_then(|id| self.state.find(id))
    }

    /// Dismiss the current error message
    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn fail(&mut self, err: SyncError) {
        log::warn!("{}", err);
        self.state.error = Some(err.to_string());
    }

    fn check_draft(&mut self, draft: &NoteDraft) -> bool {
        if self.empty_drafts == EmptyDraftPolicy::Reject && draft.is_blank() {
            self.fail(SyncError::EmptyDraft);
            return false;
        }
        true
    }

    // ------------------------------------------------------------------
    // List
    // ------------------------------------------------------------------

    /// Replace the local collection with the server's
    pub fn list(&mut self) -> bool {
        self.state.loading = true;
        let result = self.api.list_notes();
        self.state.loading = false;

        match result {
            Ok(notes) => {
                log::debug!("loaded {} notes", notes.len());
                self.state.notes = notes;
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    pub fn open_compose(&mut self) {
        self.state.compose.open = true;
    }

    /// Close the compose surface. The draft is kept for next time.
    pub fn cancel_compose(&mut self) {
        self.state.compose.open = false;
    }

    pub fn compose_draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.state.compose.draft
    }

    /// Create a note from the compose draft
    pub fn submit_compose(&mut self) -> bool {
        let draft = self.state.compose.draft.clone();
        self.create(draft)
    }

    /// Store a new note and append the server's copy.
    ///
    /// On success the compose draft is cleared and the surface closed; on
    /// failure both stay as they were so the user can retry.
    pub fn create(&mut self, draft: NoteDraft) -> bool {
        if !self.check_draft(&draft) {
            return false;
        }

        match self.api.create_note(&draft) {
            Ok(note) => {
                log::debug!("created note {}", note.id);
                self.last_created = Some(note.id.clone());
                match self.state.position(&note.id) {
                    Some(idx) => {
                        log::warn!("server returned existing id {} for a new note", note.id);
                        self.state.notes[idx] = note;
                    }
                    None => self.state.notes.push(note),
                }
                self.state.compose.draft.clear();
                self.state.compose.open = false;
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Update / enhance
    // ------------------------------------------------------------------

    /// Enter edit mode for a note, seeding the draft from its current values.
    /// Any other note being edited is left without saving.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(note) = self.state.find(id) else {
            self.fail(SyncError::UnknownNote(id.to_string()));
            return false;
        };

        self.state.editing = Some(EditState {
            id: note.id.clone(),
            draft: NoteDraft::from_note(note),
        });
        true
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut NoteDraft> {
        self.state.editing.as_mut().map(|e| &mut e.draft)
    }

    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
    }

    /// Save the note being edited
    pub fn save_edit(&mut self) -> bool {
        let Some(editing) = self.state.editing.clone() else {
            return false;
        };
        self.update(&editing.id, editing.draft)
    }

    /// Send new title/content for a note and put the server's copy in place.
    ///
    /// Success leaves edit mode for that note. Failure leaves the
    /// collection and edit mode untouched.
    pub fn update(&mut self, id: &str, draft: NoteDraft) -> bool {
        if !self.check_draft(&draft) {
            return false;
        }

        match self.api.update_note(id, &draft) {
            Ok(note) => {
                log::debug!("updated note {}", id);
                match self.state.position(id) {
                    Some(idx) => self.state.notes[idx] = note,
                    None => log::debug!("note {} is no longer listed locally", id),
                }
                if self.state.is_editing(id) {
                    self.state.editing = None;
                }
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    /// Replace the edit draft's content with the service's rewrite.
    /// The stored note only changes on a later save.
    pub fn enhance_draft_content(&mut self, id: &str) -> bool {
        if !self.state.is_editing(id) {
            self.fail(SyncError::NotEditing(id.to_string()));
            return false;
        }

        match self.api.enhance_note(id) {
            Ok(enhanced) => {
                // The check above holds: nothing else runs in between
                if let Some(editing) = self.state.editing.as_mut() {
                    editing.draft.content = enhanced;
                }
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Ask for confirmation before deleting a note
    pub fn request_delete(&mut self, id: &str) -> bool {
        match self.state.find(id) {
            Some(note) => {
                self.state.pending_delete = Some(note.clone());
                true
            }
            None => {
                self.fail(SyncError::UnknownNote(id.to_string()));
                false
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
    }

    /// Delete the note awaiting confirmation
    pub fn confirm_delete(&mut self) -> bool {
        let Some(note) = self.state.pending_delete.clone() else {
            return false;
        };
        self.delete(&note.id)
    }

    /// Delete a note and drop it locally once the server confirms.
    /// The confirmation closes whatever the outcome.
    pub fn delete(&mut self, id: &str) -> bool {
        let result = self.api.delete_note(id);
        self.state.pending_delete = None;

        match result {
            Ok(()) => {
                log::debug!("deleted note {}", id);
                self.state.notes.retain(|n| n.id != id);
                if self.state.is_editing(id) {
                    self.state.editing = None;
                }
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Dictation
    // ------------------------------------------------------------------

    /// Start appending recognized speech to the compose draft.
    /// Does nothing while a capture is already running.
    pub fn start_dictation(&mut self) -> bool {
        if self.state.recording {
            log::debug!("dictation already running");
            return false;
        }

        let Some(recognizer) = self.recognizer.as_mut().filter(|r| r.is_available()) else {
            self.fail(SyncError::CapabilityUnavailable);
            return false;
        };

        let (tx, rx) = mpsc::channel();
        if let Err(e) = recognizer.start(Box::new(ChannelSink::new(tx))) {
            self.fail(e);
            return false;
        }

        self.dictation = Some(rx);
        self.state.recording = true;
        true
    }

    /// Stop capturing. Transcripts already delivered are still applied by
    /// the next poll; the capture counts as ended from here on.
    pub fn stop_dictation(&mut self) {
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        self.state.recording = false;
    }

    /// Apply every recognizer event received so far, returning how many
    pub fn poll_dictation(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let Some(rx) = self.dictation.as_ref() else {
                return applied;
            };
            match rx.try_recv() {
                Ok(event) => {
                    self.apply_dictation(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => return applied,
                Err(TryRecvError::Disconnected) => {
                    self.dictation = None;
                    self.state.recording = false;
                    return applied;
                }
            }
        }
    }

    /// Apply events until the recognizer ends or `timeout` passes.
    /// Returns true if the capture ended.
    pub fn finish_dictation(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let Some(rx) = self.dictation.as_ref() else {
                return true;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(event) => self.apply_dictation(event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    self.dictation = None;
                    self.state.recording = false;
                    return true;
                }
            }
        }
    }

    fn apply_dictation(&mut self, event: DictationEvent) {
        match event {
            // `recording` is raised by `start_dictation`; a late start
            // notice must not undo an explicit stop.
            DictationEvent::Started => log::debug!("recognizer started"),
            DictationEvent::Transcript(text) => {
                self.state.compose.draft.append_transcript(&text);
            }
            DictationEvent::Error(message) => {
                self.fail(SyncError::Recognition(message));
                self.state.recording = false;
            }
            DictationEvent::Ended => {
                self.state.recording = false;
                self.dictation = None;
            }
        }
    }
}
