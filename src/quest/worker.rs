//! Quest service worker thread
//!
//! The UI thread never blocks on the network. Commands travel to a worker
//! that owns the HTTP client and a current-thread tokio runtime; outcomes
//! come back as events folded into the session by the controller. At most
//! one request is processed at a time.

use crate::config::ServiceConfig;
use crate::quest::client::QuestClient;
use crate::quest::protocol::TurnRequest;
use crate::{MiniquestError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

/// Requests the controller can make of the quest service
#[derive(Debug, Clone)]
pub enum QuestCommand {
    /// Begin a new quest for the player
    Start { user: String },
    /// Submit one conversation turn
    Turn {
        user: String,
        previous_step: String,
        child_input: String,
    },
    /// Shut the worker down
    Shutdown,
}

/// Outcomes reported back to the controller
#[derive(Debug, Clone)]
pub enum QuestEvent {
    /// A quest started; transcript should reset to the opening narration
    Started {
        quest_id: String,
        ai_response: String,
    },
    /// A turn was accepted and answered
    TurnComplete {
        quest_id: String,
        ai_response: String,
    },
    /// The request failed; session state must be left unchanged
    Failed(String),
    /// Worker has shut down
    Shutdown,
}

/// Handle for talking to the worker from the UI thread
pub struct QuestWorkerHandle {
    command_tx: Sender<QuestCommand>,
    event_rx: Receiver<QuestEvent>,
}

impl QuestWorkerHandle {
    pub fn send(&self, cmd: QuestCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| MiniquestError::ChannelError(format!("quest worker gone: {}", e)))
    }

    pub fn command_sender(&self) -> Sender<QuestCommand> {
        self.command_tx.clone()
    }

    pub fn event_receiver(&self) -> Receiver<QuestEvent> {
        self.event_rx.clone()
    }
}

/// Worker that owns the HTTP client
pub struct QuestWorker {
    config: ServiceConfig,
    command_rx: Receiver<QuestCommand>,
    event_tx: Sender<QuestEvent>,
}

impl QuestWorker {
    pub fn new(config: ServiceConfig) -> (Self, QuestWorkerHandle) {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = bounded(16);

        let worker = Self {
            config,
            command_rx,
            event_tx,
        };
        let handle = QuestWorkerHandle {
            command_tx,
            event_rx,
        };

        (worker, handle)
    }

    /// Start the worker thread. HTTP calls are async under the hood, so the
    /// thread hosts its own single-threaded runtime.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("quest-worker".to_string())
            .spawn(move || self.run())
            .map_err(|e| MiniquestError::ChannelError(format!("failed to spawn worker: {}", e)))
    }

    fn run(self) {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to build quest worker runtime: {}", e);
                let _ = self
                    .event_tx
                    .send(QuestEvent::Failed(format!("runtime init failed: {}", e)));
                return;
            }
        };

        let client = QuestClient::new(&self.config);
        info!("Quest worker started for {}", self.config.base_url);

        while let Ok(command) = self.command_rx.recv() {
            let event = match command {
                QuestCommand::Start { user } => {
                    match runtime.block_on(client.start_quest(&user)) {
                        Ok(response) => QuestEvent::Started {
                            quest_id: response.quest_id,
                            ai_response: response.ai_response,
                        },
                        Err(e) => {
                            warn!("Quest start failed: {}", e);
                            QuestEvent::Failed(e.to_string())
                        }
                    }
                }
                QuestCommand::Turn {
                    user,
                    previous_step,
                    child_input,
                } => {
                    let request = TurnRequest {
                        user,
                        previous_step,
                        child_input,
                    };
                    match runtime.block_on(client.send_turn(&request)) {
                        Ok(response) => QuestEvent::TurnComplete {
                            quest_id: response.quest_id,
                            ai_response: response.ai_response,
                        },
                        Err(e) => {
                            warn!("Turn submission failed: {}", e);
                            QuestEvent::Failed(e.to_string())
                        }
                    }
                }
                QuestCommand::Shutdown => {
                    info!("Quest worker shutting down");
                    let _ = self.event_tx.send(QuestEvent::Shutdown);
                    break;
                }
            };

            if self.event_tx.send(event).is_err() {
                // UI side dropped the receiver; nothing left to report to
                break;
            }
        }
    }
}
