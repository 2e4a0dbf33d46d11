pub mod client;
pub mod protocol;
pub mod worker;

pub use client::QuestClient;
pub use protocol::{QuestResponse, TurnRequest};
pub use worker::{QuestCommand, QuestEvent, QuestWorker, QuestWorkerHandle};
