use crate::structs::error_proto::ErrorProto;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    Pending,
    Running,
    Done,
    Unknown,
}

// The api sends "RUNNING", older payloads "running"; match either way and
// keep unrecognised states instead of failing the whole job.
impl<'de> Deserialize<'de> for State {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let state = String::deserialize(deserializer)?;
        Ok([State::Pending, State::Running, State::Done]
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(&state))
            .unwrap_or(State::Unknown))
    }
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Pending => "PENDING",
            State::Running => "RUNNING",
            State::Done => "DONE",
            State::Unknown => "UNKNOWN",
        }
    }
}

// https://cloud.google.com/bigquery/docs/reference/rest/v2/Job#JobStatus
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_result: Option<ErrorProto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorProto>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(json: &str) -> Option<State> {
        serde_json::from_str::<JobStatus>(json).unwrap().state
    }

    #[test]
    fn states_match_ignoring_case() {
        assert_eq!(state(r#"{"state": "DONE"}"#), Some(State::Done));
        assert_eq!(state(r#"{"state": "Done"}"#), Some(State::Done));
        assert_eq!(state(r#"{"state": "running"}"#), Some(State::Running));
        assert_eq!(state(r#"{"state": "Pending"}"#), Some(State::Pending));
        assert_eq!(state(r#"{}"#), None);
    }

    #[test]
    fn unrecognised_state_is_unknown() {
        assert_eq!(state(r#"{"state": "CANCELLED"}"#), Some(State::Unknown));
    }
}
