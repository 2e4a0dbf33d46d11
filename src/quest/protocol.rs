//! Wire format for the quest service
//!
//! Two calls share one response shape. The service address is deployment
//! configuration, not part of the contract.

use serde::{Deserialize, Serialize};

/// Body of `POST /turn`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub user: String,
    pub previous_step: String,
    pub child_input: String,
}

/// Response to both `POST /start` and `POST /turn`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestResponse {
    pub quest_id: String,
    pub ai_response: String,
}
