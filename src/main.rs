//! MiniQuest - voice-driven quest storytelling client
//!
//! Main entry point: wires the quest worker and the speech capture
//! capability into the session controller and launches the UI.

use crossbeam_channel::bounded;
use eframe::egui;
use miniquest::config::AppConfig;
use miniquest::quest::QuestWorker;
use miniquest::session::SessionController;
use miniquest::speech::SpeechCapture;
use miniquest::ui::MiniquestApp;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "miniquest=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MiniQuest voice client");

    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let (worker, quest_handle) = QuestWorker::new(config.service.clone());
    let _worker_thread = match worker.spawn() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start quest worker: {}", e);
            std::process::exit(1);
        }
    };

    // Capability check happens once here; when it fails the session runs
    // without voice input and the UI says so
    let (capture_tx, capture_rx) = bounded(4);
    let capture = build_capture(&config, capture_tx);

    let controller = SessionController::new(
        config.service.player.clone(),
        capture,
        capture_rx,
        quest_handle.command_sender(),
        quest_handle.event_receiver(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("MiniQuest"),
        ..Default::default()
    };

    eframe::run_native(
        "MiniQuest",
        options,
        Box::new(move |cc| Ok(Box::new(MiniquestApp::new(cc, controller)))),
    )
}

#[cfg(feature = "audio-io")]
fn build_capture(
    config: &AppConfig,
    capture_tx: crossbeam_channel::Sender<miniquest::speech::CaptureEvent>,
) -> Option<Box<dyn SpeechCapture>> {
    match miniquest::speech::MicCapture::new(config.capture.clone(), capture_tx) {
        Ok(capture) => Some(Box::new(capture)),
        Err(e) => {
            warn!("Speech capture unavailable: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "audio-io"))]
fn build_capture(
    _config: &AppConfig,
    _capture_tx: crossbeam_channel::Sender<miniquest::speech::CaptureEvent>,
) -> Option<Box<dyn SpeechCapture>> {
    warn!("Built without audio-io; voice input disabled");
    None
}
