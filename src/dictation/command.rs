//! Dictation through an external speech-to-text program.
//!
//! The program is expected to print one recognized phrase per line on
//! stdout and to exit when input ends.

use std::env;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{DictationSink, SpeechRecognizer};
use crate::api::SyncError;
use crate::config::ClientConfig;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// State of one running capture, shared with its reader thread
#[derive(Clone)]
struct Capture {
    child: Arc<Mutex<Option<Child>>>,
    stopped: Arc<AtomicBool>,
}

impl Capture {
    fn new(child: Child) -> Self {
        Self {
            child: Arc::new(Mutex::new(Some(child))),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wait for the child without blocking stop(). `None` when the exit
    /// status is unknown or was already collected by stop().
    fn wait_for_exit(&self) -> Option<ExitStatus> {
        loop {
            let polled = match self.child.lock() {
                Ok(mut slot) => match slot.as_mut().map(Child::try_wait) {
                    Some(Ok(Some(status))) => {
                        slot.take();
                        Some(Some(status))
                    }
                    Some(Ok(None)) => None,
                    Some(Err(_)) | None => Some(None),
                },
                Err(_) => Some(None),
            };
            match polled {
                Some(status) => return status,
                None => thread::sleep(EXIT_POLL_INTERVAL),
            }
        }
    }

    /// Kill and reap the child
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Ok(mut slot) = self.child.lock() {
            if let Some(mut child) = slot.take() {
                log::debug!("stopping speech recognizer (pid {})", child.id());
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

/// Recognizer backed by a child process
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    current: Option<Capture>,
}

impl CommandRecognizer {
    /// Parse a whitespace separated command line. Returns `None` if empty.
    pub fn new(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;

        Some(Self {
            program,
            args: parts.collect(),
            current: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Option<Self> {
        config.dictation_command.as_deref().and_then(Self::new)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Locate the program the way a shell would
    fn resolve_program(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file().then(|| program.to_path_buf());
        }

        let paths = env::var_os("PATH")?;
        env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn is_available(&self) -> bool {
        self.resolve_program().is_some()
    }

    fn start(&mut self, sink: Box<dyn DictationSink>) -> Result<(), SyncError> {
        // Never leave a previous capture running
        self.stop();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                SyncError::Recognition(format!("Failed to start speech recognizer: {}", e))
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(SyncError::Recognition(
                "Speech recognizer has no output".to_string(),
            ));
        };

        log::debug!("started speech recognizer {} (pid {})", self.program, child.id());
        let capture = Capture::new(child);
        self.current = Some(capture.clone());

        thread::spawn(move || {
            sink.on_start();

            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(line) => {
                        let transcript = line.trim();
                        if !transcript.is_empty() {
                            sink.on_result(transcript);
                        }
                    }
                    Err(e) => {
                        sink.on_error(&format!("Speech recognizer output unreadable: {}", e));
                        break;
                    }
                }
            }

            if let Some(status) = capture.wait_for_exit() {
                if !status.success() && !capture.stopped.load(Ordering::SeqCst) {
                    sink.on_error(&format!("Speech recognizer exited with {}", status));
                }
            }
            sink.on_end();
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(capture) = self.current.take() {
            capture.stop();
        }
    }
}

impl Drop for CommandRecognizer {
    fn drop(&mut self) {
        self.stop();
    }
}
