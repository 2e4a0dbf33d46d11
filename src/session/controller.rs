//! Session controller
//!
//! Single point where capture and quest-service events are folded into the
//! session. The UI thread calls `poll()` every frame; workers only ever
//! talk to the controller through channels, so the session itself needs no
//! locking.

use crate::quest::worker::{QuestCommand, QuestEvent};
use crate::session::state::Session;
use crate::speech::{CaptureEvent, SpeechCapture};
use crate::{MiniquestError, Result};
use crossbeam_channel::{Receiver, Sender};
use tracing::{info, warn};

pub struct SessionController {
    session: Session,
    /// Player identifier sent with every service request
    player: String,
    /// None when the platform offers no speech capture; every speak
    /// attempt then reports CapabilityUnavailable
    capture: Option<Box<dyn SpeechCapture>>,
    capture_rx: Receiver<CaptureEvent>,
    quest_tx: Sender<QuestCommand>,
    quest_rx: Receiver<QuestEvent>,
    /// Most recent surfaced error, shown by the UI until replaced
    last_error: Option<MiniquestError>,
}

impl SessionController {
    pub fn new(
        player: impl Into<String>,
        capture: Option<Box<dyn SpeechCapture>>,
        capture_rx: Receiver<CaptureEvent>,
        quest_tx: Sender<QuestCommand>,
        quest_rx: Receiver<QuestEvent>,
    ) -> Self {
        Self {
            session: Session::new(),
            player: player.into(),
            capture,
            capture_rx,
            quest_tx,
            quest_rx,
            last_error: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn last_error(&self) -> Option<&MiniquestError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Whether voice input works at all this session
    pub fn capture_available(&self) -> bool {
        self.capture.is_some()
    }

    /// "Start Quest": ask the service for a new quest. Always permitted;
    /// a failure leaves the session unchanged and the button usable.
    pub fn start_quest(&mut self) -> Result<()> {
        info!("Requesting new quest for '{}'", self.player);
        if let Err(e) = self.quest_tx.send(QuestCommand::Start {
            user: self.player.clone(),
        }) {
            let err = MiniquestError::ChannelError(format!("quest worker gone: {}", e));
            warn!("{}", err);
            self.last_error = Some(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// "Speak": begin one capture. A press while already listening is a
    /// no-op; without a capture capability it surfaces
    /// CapabilityUnavailable and does nothing else.
    pub fn speak(&mut self) -> Result<()> {
        if self.session.listening.is_listening() {
            return Ok(());
        }

        let capture = match self.capture.as_mut() {
            Some(c) => c,
            None => {
                let err = MiniquestError::CapabilityUnavailable;
                warn!("{}", err);
                self.last_error = Some(err.clone());
                return Err(err);
            }
        };

        self.session.begin_listening();
        if let Err(e) = capture.start() {
            // A start that never got going counts as a terminal outcome
            self.session.finish_listening();
            warn!("Capture failed to start: {}", e);
            self.last_error = Some(e.clone());
            return Err(e);
        }

        Ok(())
    }

    /// Drain worker events and fold them into the session. Called once
    /// per UI frame.
    pub fn poll(&mut self) {
        while let Ok(event) = self.capture_rx.try_recv() {
            self.handle_capture_event(event);
        }
        while let Ok(event) = self.quest_rx.try_recv() {
            self.handle_quest_event(event);
        }
    }

    fn handle_capture_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Transcript(text) => {
                info!("Child said: \"{}\"", text);
                self.session.record_child_turn(text.clone());
                self.session.finish_listening();
                self.submit_turn(text);
            }
            CaptureEvent::Error(reason) => {
                warn!("Capture error: {}", reason);
                self.session.finish_listening();
                self.last_error = Some(MiniquestError::CaptureError(reason));
            }
        }
    }

    /// Submit the child's input to the service. Only ever triggered by a
    /// capture transcript, never directly by the user. previous_step is
    /// the most recent transcript entry at call time, which is the
    /// just-appended child turn.
    fn submit_turn(&mut self, child_input: String) {
        let previous_step = self.session.transcript.last_text();

        if let Err(e) = self.quest_tx.send(QuestCommand::Turn {
            user: self.player.clone(),
            previous_step,
            child_input,
        }) {
            warn!("Failed to submit turn: {}", e);
            self.last_error = Some(MiniquestError::ChannelError(format!(
                "quest worker gone: {}",
                e
            )));
        }
    }

    fn handle_quest_event(&mut self, event: QuestEvent) {
        match event {
            QuestEvent::Started {
                quest_id,
                ai_response,
            } => {
                info!("Quest '{}' started", quest_id);
                self.session
                    .begin_quest(quest_id, crate::session::Turn::ai(ai_response));
                self.last_error = None;
            }
            QuestEvent::TurnComplete {
                quest_id,
                ai_response,
            } => {
                info!("Turn answered for quest '{}'", quest_id);
                self.session.record_ai_turn(quest_id, ai_response);
                self.last_error = None;
            }
            QuestEvent::Failed(reason) => {
                // Transcript and quest id stay as they are; a dangling
                // unanswered child turn is tolerated by the UI
                warn!("Quest request failed: {}", reason);
                self.last_error = Some(MiniquestError::NetworkError(reason));
            }
            QuestEvent::Shutdown => {
                info!("Quest worker shut down");
            }
        }
    }
}
