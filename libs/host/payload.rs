//! JSON request and response payloads
//!
//! Requests carry the newest-first list of clicked commands; responses carry
//! the ranked command ids with their probabilities and the time spent.

use codec::predictor::DecodedOutput;
use codec::{CommandId, Event};
use serde::{Deserialize, Serialize};

/// One clicked command in a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandInfo {
    #[serde(default)]
    pub id: CommandId,

    #[serde(default)]
    pub time_elapsed_since_click: f64,
}

/// Request body: recently clicked commands, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryContext {
    #[serde(default)]
    pub command_clicked_events: Option<Vec<CommandInfo>>,
}

impl QueryContext {
    /// Parse a request; blank input and `null` both mean "no events"
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let context: Option<Self> = serde_json::from_str(data)?;
        Ok(context.unwrap_or_default())
    }

    /// Events in request order (newest first)
    pub fn events(&self) -> Vec<Event> {
        self.command_clicked_events
            .iter()
            .flatten()
            .map(|c| Event::new(c.id, c.time_elapsed_since_click))
            .collect()
    }
}

/// Response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredictionResponse {
    pub command_list: Vec<CommandId>,
    pub probability_list: Vec<f32>,
    pub seconds_elapsed: f64,
}

impl From<&DecodedOutput> for PredictionResponse {
    fn from(output: &DecodedOutput) -> Self {
        Self {
            command_list: output.commands(),
            probability_list: output.probabilities(),
            seconds_elapsed: output.elapsed.as_secs_f64(),
        }
    }
}
