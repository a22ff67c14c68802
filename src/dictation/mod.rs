//! Speech-to-text dictation
//!
//! A [`SpeechRecognizer`] runs in the background and reports through a
//! [`DictationSink`]. The session hands recognizers a [`ChannelSink`] and
//! applies the resulting [`DictationEvent`]s when it drains the channel,
//! so recognizer threads never touch session state directly.

mod command;

pub use command::CommandRecognizer;

use std::sync::mpsc::Sender;

use crate::api::SyncError;

/// Something reported by a running recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationEvent {
    Started,
    /// A finished piece of recognized speech
    Transcript(String),
    Error(String),
    Ended,
}

/// Receiver of recognizer callbacks
pub trait DictationSink: Send {
    fn on_start(&self);
    fn on_result(&self, transcript: &str);
    fn on_error(&self, message: &str);
    fn on_end(&self);
}

/// Trait for continuous speech recognition backends
pub trait SpeechRecognizer: Send {
    /// Whether the backend can run on this system
    fn is_available(&self) -> bool;

    /// Begin capturing; events are delivered to `sink` until it ends
    fn start(&mut self, sink: Box<dyn DictationSink>) -> Result<(), SyncError>;

    /// Stop capturing. An `on_end` callback still follows.
    fn stop(&mut self);
}

/// Forwards callbacks as [`DictationEvent`]s over a channel
pub struct ChannelSink {
    tx: Sender<DictationEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<DictationEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: DictationEvent) {
        // The session may already have dropped the receiver
        let _ = self.tx.send(event);
    }
}

impl DictationSink for ChannelSink {
    fn on_start(&self) {
        self.send(DictationEvent::Started);
    }

    fn on_result(&self, transcript: &str) {
        self.send(DictationEvent::Transcript(transcript.to_string()));
    }

    fn on_error(&self, message: &str) {
        self.send(DictationEvent::Error(message.to_string()));
    }

    fn on_end(&self) {
        self.send(DictationEvent::Ended);
    }
}
