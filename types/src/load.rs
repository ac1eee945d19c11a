//! Load bookkeeping: decoding the fetched document and discarding stale responses.

use crate::record::EventRecord;

/// Errors that can occur while loading the data document
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid data document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode the JSON array of records.
pub fn parse_records(body: &str) -> Result<Vec<EventRecord>, LoadError> {
    Ok(serde_json::from_str(body)?)
}

/// Identifies one load. Only the most recently issued ticket may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Hands out load tickets in order.
///
/// Fetches are never cancelled; a response whose ticket is no longer
/// current is dropped instead, so a slow earlier request cannot overwrite
/// the table after a newer one has rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSequencer {
    latest: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every earlier ticket.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record_array() {
        let body = r#"[
            {"timestamp": "2024-01-15", "banner": "Acme", "eventName": "Login", "platform": "Web", "anomalyDetected": "No"},
            {"timestamp": "2024-01-16", "banner": "Acme", "eventName": "Checkout", "platform": "iOS", "anomalyDetected": "Yes"}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].event_name, "Checkout");
    }

    #[test]
    fn sparse_record_does_not_fail_the_document() {
        let body = r#"[
            {"timestamp": "2024-01-10", "banner": "Acme", "eventName": "Login", "platform": "Web", "anomalyDetected": "No"},
            {"timestamp": "2024-01-11", "banner": null, "eventName": null, "platform": "Web", "anomalyDetected": null, "healthScore": true}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].banner, "Acme");
        assert_eq!(records[1].banner, "");
        assert_eq!(records[1].event_name, "");
        assert_eq!(records[1].health_score.to_string(), "true");
    }

    #[test]
    fn superseded_ticket_stays_stale_without_a_new_fetch() {
        let mut seq = LoadSequencer::new();
        let in_flight = seq.begin();
        // A later trigger that aborts before fetching still supersedes it
        let _aborted = seq.begin();
        assert!(!seq.is_current(in_flight));
    }

    #[test]
    fn non_array_document_is_a_decode_error() {
        assert!(matches!(parse_records(r#"{"rows": []}"#), Err(LoadError::Decode(_))));
        assert!(matches!(parse_records("<html>404</html>"), Err(LoadError::Decode(_))));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(LoadError::Status(404).to_string(), "server responded with status 404");
        assert_eq!(LoadError::Network("offline".into()).to_string(), "network error: offline");
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let mut seq = LoadSequencer::new();
        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_ne!(first, second);
    }
}
