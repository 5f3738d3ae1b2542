use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ===== Industry Trends =====

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendsRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub trends: Option<String>,
}

// ===== Health =====

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: Option<String>,
    pub timestamp: Option<String>,
}

// ===== Saved Snapshot =====

/// Raw service response written by `analyze --save`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedSnapshot {
    pub saved_at: DateTime<Utc>,
    pub result: serde_json::Value,
}

impl SavedSnapshot {
    pub fn new(result: serde_json::Value) -> Self {
        Self {
            saved_at: Utc::now(),
            result,
        }
    }

    /// Accepts either a snapshot or a bare service response.
    pub fn unwrap_body(value: serde_json::Value) -> serde_json::Value {
        match serde_json::from_value::<SavedSnapshot>(value.clone()) {
            Ok(snapshot) => snapshot.result,
            Err(_) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_body_handles_both_shapes() {
        let bare = json!({ "name": "Ada" });
        assert_eq!(SavedSnapshot::unwrap_body(bare.clone()), bare);

        let snapshot = serde_json::to_value(SavedSnapshot::new(bare.clone())).unwrap();
        assert_eq!(SavedSnapshot::unwrap_body(snapshot), bare);
    }
}
