//! # JSON-Lines Protocol
//!
//! One request per input line, one response per output line.
//!
//! ```text
//! → {"caller":"0x01…01","action":{"action":"mark_processed","waste_id":7}}
//! ← {"ok":{"kind":"waste","data":{…}}}
//! ← {"error":{"kind":"already_processed","message":"Waste item 7 …"}}
//! ```
//!
//! Malformed lines get an `invalid_input` error and never reach the
//! orchestrator.

use ew_05_lifecycle_orchestrator::{Action, LifecycleApi, Outcome};
use serde::{Deserialize, Serialize};
use shared_types::{ActorId, ErrorKind, ErrorPayload};
use tracing::debug;

/// A caller-attributed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Identity from the session collaborator, trusted as given.
    pub caller: ActorId,
    pub action: Action,
}

/// Reply to one request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(Outcome),
    Error(ErrorPayload),
}

impl Response {
    /// Build an error response.
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            kind,
            message: message.into(),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Serialize to a single line, without the trailing newline.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            // Still one parseable line.
            format!(
                r#"{{"error":{{"kind":"storage","message":"Response encoding failed: {}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}

/// Parse one line and execute it.
pub fn handle_line(api: &dyn LifecycleApi, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Malformed request line");
            return Response::error(ErrorKind::InvalidInput, format!("Malformed request: {e}"));
        }
    };

    match api.execute(request.caller, request.action) {
        Ok(outcome) => Response::Ok(outcome),
        Err(err) => Response::Error(err.to_payload()),
    }
}
