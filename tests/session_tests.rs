//! End-to-end session controller tests
//!
//! Drive the controller with a scripted capture capability and act as the
//! quest service on the other end of the worker channels, so every state
//! transition is deterministic.

use crossbeam_channel::{bounded, Receiver, Sender};
use miniquest::quest::{QuestCommand, QuestEvent};
use miniquest::session::{SessionController, Speaker};
use miniquest::speech::{CaptureEvent, SpeechCapture};
use miniquest::MiniquestError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Capture capability that only counts starts; terminal events are
/// injected by the test through the capture channel.
struct ScriptedCapture {
    starts: Arc<AtomicUsize>,
}

impl SpeechCapture for ScriptedCapture {
    fn start(&mut self) -> miniquest::Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Fixture {
    controller: SessionController,
    capture_tx: Sender<CaptureEvent>,
    quest_cmd_rx: Receiver<QuestCommand>,
    quest_event_tx: Sender<QuestEvent>,
    starts: Arc<AtomicUsize>,
}

fn fixture_with_capture(capture_present: bool) -> Fixture {
    let (capture_tx, capture_rx) = bounded(8);
    let (quest_cmd_tx, quest_cmd_rx) = bounded(8);
    let (quest_event_tx, quest_event_rx) = bounded(8);

    let starts = Arc::new(AtomicUsize::new(0));
    let capture: Option<Box<dyn SpeechCapture>> = if capture_present {
        Some(Box::new(ScriptedCapture {
            starts: Arc::clone(&starts),
        }))
    } else {
        None
    };

    let controller =
        SessionController::new("player1", capture, capture_rx, quest_cmd_tx, quest_event_rx);

    Fixture {
        controller,
        capture_tx,
        quest_cmd_rx,
        quest_event_tx,
        starts,
    }
}

fn fixture() -> Fixture {
    fixture_with_capture(true)
}

/// Run one successful start: Start command out, Started event back in.
fn start_quest(fx: &mut Fixture, quest_id: &str, ai_response: &str) {
    fx.controller.start_quest().unwrap();

    match fx.quest_cmd_rx.try_recv().unwrap() {
        QuestCommand::Start { user } => assert_eq!(user, "player1"),
        other => panic!("expected Start command, got {:?}", other),
    }

    fx.quest_event_tx
        .send(QuestEvent::Started {
            quest_id: quest_id.to_string(),
            ai_response: ai_response.to_string(),
        })
        .unwrap();
    fx.controller.poll();
}

/// Run one capture cycle up to the outgoing turn command.
fn speak_and_hear(fx: &mut Fixture, transcript: &str) -> QuestCommand {
    fx.controller.speak().unwrap();
    assert!(fx.controller.session().listening.is_listening());

    fx.capture_tx
        .send(CaptureEvent::Transcript(transcript.to_string()))
        .unwrap();
    fx.controller.poll();

    fx.quest_cmd_rx.try_recv().unwrap()
}

#[test]
fn successful_start_resets_session() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    let session = fx.controller.session();
    assert_eq!(session.quest_id.as_deref(), Some("q1"));
    assert_eq!(session.transcript.len(), 1);
    assert_eq!(session.transcript.turns()[0].speaker, Speaker::Ai);
    assert_eq!(session.transcript.turns()[0].text, "Welcome");
}

#[test]
fn failed_start_leaves_session_unstarted() {
    let mut fx = fixture();
    fx.controller.start_quest().unwrap();
    let _ = fx.quest_cmd_rx.try_recv().unwrap();

    fx.quest_event_tx
        .send(QuestEvent::Failed("connection refused".to_string()))
        .unwrap();
    fx.controller.poll();

    let session = fx.controller.session();
    assert!(session.quest_id.is_none());
    assert!(session.transcript.is_empty());
    assert!(matches!(
        fx.controller.last_error(),
        Some(MiniquestError::NetworkError(_))
    ));
}

#[test]
fn restart_replaces_previous_quest() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");
    start_quest(&mut fx, "q9", "A brand new tale");

    let session = fx.controller.session();
    assert_eq!(session.quest_id.as_deref(), Some("q9"));
    assert_eq!(session.transcript.len(), 1);
    assert_eq!(session.transcript.turns()[0].text, "A brand new tale");
}

#[test]
fn capture_result_appends_child_and_submits_turn() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    let command = speak_and_hear(&mut fx, "go north");

    // Child turn appended, listening back to idle
    let session = fx.controller.session();
    assert!(session.listening.is_idle());
    assert_eq!(session.transcript.len(), 2);
    assert_eq!(session.transcript.turns()[1].speaker, Speaker::Child);
    assert_eq!(session.transcript.turns()[1].text, "go north");

    // previous_step is the just-appended child turn, by design
    match command {
        QuestCommand::Turn {
            user,
            previous_step,
            child_input,
        } => {
            assert_eq!(user, "player1");
            assert_eq!(previous_step, "go north");
            assert_eq!(child_input, "go north");
        }
        other => panic!("expected Turn command, got {:?}", other),
    }
}

#[test]
fn successful_turn_appends_ai_and_overwrites_quest_id() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");
    let _ = speak_and_hear(&mut fx, "go north");

    fx.quest_event_tx
        .send(QuestEvent::TurnComplete {
            quest_id: "q2".to_string(),
            ai_response: "You walk into a dark cave.".to_string(),
        })
        .unwrap();
    fx.controller.poll();

    let session = fx.controller.session();
    assert_eq!(session.quest_id.as_deref(), Some("q2"));
    assert_eq!(session.transcript.len(), 3);
    assert_eq!(session.transcript.turns()[2].speaker, Speaker::Ai);
    assert_eq!(session.transcript.turns()[2].text, "You walk into a dark cave.");
}

#[test]
fn failed_turn_leaves_dangling_child_turn() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");
    let _ = speak_and_hear(&mut fx, "go north");

    fx.quest_event_tx
        .send(QuestEvent::Failed("service unavailable".to_string()))
        .unwrap();
    fx.controller.poll();

    // The child's turn stays, no AI reply appended, quest id unchanged
    let session = fx.controller.session();
    assert_eq!(session.quest_id.as_deref(), Some("q1"));
    assert_eq!(session.transcript.len(), 2);
    assert_eq!(session.transcript.turns()[0].text, "Welcome");
    assert_eq!(session.transcript.turns()[1].text, "go north");
    assert!(matches!(
        fx.controller.last_error(),
        Some(MiniquestError::NetworkError(_))
    ));
}

#[test]
fn speak_while_listening_is_a_no_op() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    fx.controller.speak().unwrap();
    assert_eq!(fx.starts.load(Ordering::SeqCst), 1);
    assert!(fx.controller.session().listening.is_listening());

    // Second press: no second capture, no state change
    fx.controller.speak().unwrap();
    assert_eq!(fx.starts.load(Ordering::SeqCst), 1);
    assert!(fx.controller.session().listening.is_listening());
}

#[test]
fn capture_error_clears_listening_and_submits_nothing() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    fx.controller.speak().unwrap();
    fx.capture_tx
        .send(CaptureEvent::Error("no speech detected".to_string()))
        .unwrap();
    fx.controller.poll();

    let session = fx.controller.session();
    assert!(session.listening.is_idle());
    assert_eq!(session.transcript.len(), 1);
    assert!(fx.quest_cmd_rx.try_recv().is_err());
    assert!(matches!(
        fx.controller.last_error(),
        Some(MiniquestError::CaptureError(_))
    ));
}

#[test]
fn missing_capability_reports_and_does_nothing() {
    let mut fx = fixture_with_capture(false);
    start_quest(&mut fx, "q1", "Welcome");

    let result = fx.controller.speak();
    assert!(matches!(result, Err(MiniquestError::CapabilityUnavailable)));

    let session = fx.controller.session();
    assert!(session.listening.is_idle());
    assert_eq!(session.transcript.len(), 1);
    assert!(fx.quest_cmd_rx.try_recv().is_err());
}

#[test]
fn listening_true_only_between_start_and_terminal_outcome() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    assert!(fx.controller.session().listening.is_idle());

    fx.controller.speak().unwrap();
    assert!(fx.controller.session().listening.is_listening());

    fx.capture_tx
        .send(CaptureEvent::Transcript("hello".to_string()))
        .unwrap();
    fx.controller.poll();
    assert!(fx.controller.session().listening.is_idle());
}

#[test]
fn turns_alternate_starting_with_ai() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    for (i, (said, reply)) in [("go left", "A river blocks the path."), ("swim", "You made it!")]
        .into_iter()
        .enumerate()
    {
        let _ = speak_and_hear(&mut fx, said);
        fx.quest_event_tx
            .send(QuestEvent::TurnComplete {
                quest_id: format!("q{}", i + 2),
                ai_response: reply.to_string(),
            })
            .unwrap();
        fx.controller.poll();
    }

    let speakers: Vec<Speaker> = fx
        .controller
        .session()
        .transcript
        .turns()
        .iter()
        .map(|t| t.speaker)
        .collect();
    assert_eq!(
        speakers,
        vec![
            Speaker::Ai,
            Speaker::Child,
            Speaker::Ai,
            Speaker::Child,
            Speaker::Ai
        ]
    );
    assert_eq!(fx.controller.session().quest_id.as_deref(), Some("q3"));
}

#[test]
fn successful_turn_clears_stale_error() {
    let mut fx = fixture();
    start_quest(&mut fx, "q1", "Welcome");

    // Fail one turn so an error is showing
    let _ = speak_and_hear(&mut fx, "go north");
    fx.quest_event_tx
        .send(QuestEvent::Failed("service unavailable".to_string()))
        .unwrap();
    fx.controller.poll();
    assert!(fx.controller.last_error().is_some());

    // The next answered turn replaces the stale banner
    let _ = speak_and_hear(&mut fx, "try the door");
    fx.quest_event_tx
        .send(QuestEvent::TurnComplete {
            quest_id: "q2".to_string(),
            ai_response: "It creaks open".to_string(),
        })
        .unwrap();
    fx.controller.poll();

    assert!(fx.controller.last_error().is_none());
    assert_eq!(fx.controller.session().quest_id.as_deref(), Some("q2"));
}

#[test]
fn start_quest_surfaces_lost_worker() {
    let fx = fixture();
    let Fixture {
        mut controller,
        quest_cmd_rx,
        ..
    } = fx;

    // Worker gone: the send fails and the error must reach the UI banner
    drop(quest_cmd_rx);
    let result = controller.start_quest();
    assert!(matches!(result, Err(MiniquestError::ChannelError(_))));
    assert!(matches!(
        controller.last_error(),
        Some(MiniquestError::ChannelError(_))
    ));
}
