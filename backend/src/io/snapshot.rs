//! Reading state snapshots exported by the UI.

use anyhow::{Context, Result};
use log::info;
use shared::Snapshot;
use std::fs;
use std::path::Path;

/// Parse a snapshot from its JSON text
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    serde_json::from_str(json).context("Failed to parse snapshot JSON")
}

/// Read and parse the snapshot file at `path`
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    let snapshot = parse_snapshot(&content)
        .with_context(|| format!("Invalid snapshot file {}", path.display()))?;

    info!(
        "Loaded snapshot from {}: {} cards, {} debts, {} transactions",
        path.display(),
        snapshot.cards.len(),
        snapshot.debts.len(),
        snapshot.transactions.len()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{Cadence, FlowKind};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SNAPSHOT_JSON: &str = r#"{
        "cards": [{
            "id": "card::1",
            "name": "Viaje",
            "target_amount": 2800000,
            "saved_amount": 920000,
            "cadence": "Semanal",
            "contribution_weekday": 5,
            "next_contribution": 100000
        }],
        "transactions": [
            {"id": "transaction::savings::1", "delta": 100000, "kind": "savings", "date": "2024-06-07"},
            {"id": "legacy-1", "delta": -50000, "date": "2024-06-08"}
        ],
        "history": [{
            "id": "history::card::0::1",
            "card_id": "card::0",
            "name": "Audifonos",
            "description": "",
            "target_amount": 350000,
            "points": 35000,
            "completed_on": "2024-05-20"
        }],
        "bonus_available": 15000,
        "onboarded_at": "2024-05-01"
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(SNAPSHOT_JSON).unwrap();

        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.cards[0].cadence, Cadence::Weekly);
        assert!(snapshot.debts.is_empty());
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].points, 35000);
        assert_eq!(snapshot.bonus_available, 15000.0);
        assert_eq!(snapshot.transactions[0].kind, Some(FlowKind::Savings));
        assert_eq!(snapshot.transactions[1].kind, None);
        assert_eq!(snapshot.transactions[1].effective_kind(), FlowKind::Debt);
        assert_eq!(snapshot.onboarded_at, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_parse_empty_object() {
        let snapshot = parse_snapshot("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_snapshot("not json").is_err());
        assert!(parse_snapshot(r#"{"transactions": [{"delta": 1}]}"#).is_err());
    }

    #[test]
    fn test_load_snapshot_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT_JSON.as_bytes()).unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.cards[0].name, "Viaje");
    }

    #[test]
    fn test_load_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let error = load_snapshot(dir.path().join("missing.json")).unwrap_err();
        assert!(error.to_string().contains("missing.json"));
    }
}
