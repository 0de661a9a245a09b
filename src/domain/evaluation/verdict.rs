//! Verdicts produced by evals.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{SessionId, ThreadId, Timestamp};

/// Outcome of a single check against one request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalVerdict {
    pub passed: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl EvalVerdict {
    /// A passing verdict with no metadata.
    pub fn pass() -> Self {
        Self {
            passed: true,
            metadata: Map::new(),
        }
    }

    /// A failing verdict with no metadata.
    pub fn fail() -> Self {
        Self {
            passed: false,
            metadata: Map::new(),
        }
    }

    /// A verdict decided by `passed`.
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Self::pass()
        } else {
            Self::fail()
        }
    }

    /// Adds a metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Convenience accessor for the `reason` metadata field.
    pub fn reason(&self) -> Option<&str> {
        self.metadata.get("reason").and_then(Value::as_str)
    }
}

/// A verdict tagged with the eval and request it belongs to, as delivered to
/// a reporting sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalRecord {
    pub eval_name: String,
    pub thread_id: ThreadId,
    pub session_id: SessionId,
    pub verdict: EvalVerdict,
    pub evaluated_at: Timestamp,
}

impl EvalRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        eval_name: impl Into<String>,
        thread_id: ThreadId,
        session_id: SessionId,
        verdict: EvalVerdict,
    ) -> Self {
        Self {
            eval_name: eval_name.into(),
            thread_id,
            session_id,
            verdict,
            evaluated_at: Timestamp::now(),
        }
    }
}
