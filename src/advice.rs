//! Per-level advisory text
//!
//! A best-effort side channel: the session asks for a tip when a new level
//! starts, the host fetches it however it can, and the result only ever
//! replaces a display string. Stale or failed deliveries are dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown before any tip arrives
pub const DEFAULT_ADVICE: &str = "Collect every flag to reach the next level!";

/// Canned tips used natively and when no endpoint is configured
const OFFLINE_TIPS: [&str; 6] = [
    "Flags first, fuel second: an empty tank ends the run just like a crash.",
    "Drop smoke right in a pursuer's path; a stunned car sits still for three seconds.",
    "Low ground is fast ground. Climbing costs you speed, so plan around the hills.",
    "Pursuers drive straight through walls. Use the roads to stay out of reach.",
    "Grab fuel cans even when you're not empty: each one is worth points too.",
    "Every level adds flags and faster pursuers. Keep collecting and keep moving!",
];

/// Failure modes for a remote tip request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdviceError {
    /// Transport failed before a response arrived
    Network(String),
    /// Service answered with a non-success status
    Status(u16),
    /// Body was not the expected JSON shape
    Malformed(String),
    /// Body parsed but held no usable text
    Empty,
}

impl fmt::Display for AdviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(reason) => write!(f, "advice request failed: {reason}"),
            Self::Status(code) => write!(f, "advice service returned status {code}"),
            Self::Malformed(reason) => write!(f, "malformed advice response: {reason}"),
            Self::Empty => write!(f, "advice response was empty"),
        }
    }
}

impl std::error::Error for AdviceError {}

/// Handle for one outstanding request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdviceTicket {
    generation: u64,
    level: u32,
}

impl AdviceTicket {
    pub fn level(&self) -> u32 {
        self.level
    }
}

/// Displayed advisory text plus request bookkeeping
#[derive(Debug, Clone)]
pub struct AdviceBoard {
    text: String,
    generation: u64,
}

impl Default for AdviceBoard {
    fn default() -> Self {
        Self {
            text: DEFAULT_ADVICE.to_string(),
            generation: 0,
        }
    }
}

impl AdviceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start a request for `level`; supersedes every earlier ticket
    pub fn request(&mut self, level: u32) -> AdviceTicket {
        self.generation += 1;
        AdviceTicket {
            generation: self.generation,
            level,
        }
    }

    /// Forget all outstanding tickets without touching the text
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Apply a result. Returns true if the displayed text changed.
    pub fn deliver(&mut self, ticket: AdviceTicket, result: Result<String, AdviceError>) -> bool {
        if ticket.generation != self.generation {
            log::debug!("Dropping stale advice for level {}", ticket.level);
            return false;
        }
        match result {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    log::warn!("Advice for level {}: {}", ticket.level, AdviceError::Empty);
                    return false;
                }
                self.text = text.to_string();
                true
            }
            Err(e) => {
                log::warn!("Advice for level {}: {}", ticket.level, e);
                false
            }
        }
    }
}

/// Natural-language prompt sent to the advisory service
pub fn prompt_for(level: u32) -> String {
    format!(
        "You are a veteran of classic flag-collecting car-chase arcade games. \
         In one short sentence, encourage a player who is now on level {level} \
         and give them a tip. Mention why collecting flags matters."
    )
}

#[derive(Serialize)]
struct AdviceRequestBody<'a> {
    level: u32,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AdviceResponseBody {
    text: String,
}

/// JSON body for the advisory endpoint
pub fn request_body(level: u32) -> String {
    let prompt = prompt_for(level);
    let body = AdviceRequestBody {
        level,
        prompt: &prompt,
    };
    // A struct of a u32 and a str always serializes
    serde_json::to_string(&body).unwrap_or_default()
}

/// Extract the tip from a response body
pub fn parse_response(body: &str) -> Result<String, AdviceError> {
    let parsed: AdviceResponseBody =
        serde_json::from_str(body).map_err(|e| AdviceError::Malformed(e.to_string()))?;
    let text = parsed.text.trim();
    if text.is_empty() {
        return Err(AdviceError::Empty);
    }
    Ok(text.to_string())
}

/// Deterministic built-in tip for a level
pub fn offline_tip(level: u32) -> String {
    let index = (level.saturating_sub(1) as usize) % OFFLINE_TIPS.len();
    OFFLINE_TIPS[index].to_string()
}
