//! Last observed effectiveness per (pubkey, validator_index)

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Label pair identifying one gauge series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GaugeKey {
    pub pubkey: String,
    pub validator_index: String,
}

impl GaugeKey {
    pub fn new(pubkey: impl Into<String>, validator_index: impl Into<String>) -> Self {
        Self {
            pubkey: pubkey.into(),
            validator_index: validator_index.into(),
        }
    }
}

/// Concurrent gauge values shared between the publisher and readers
///
/// Entries are never removed: a validator missing from later responses keeps
/// its last value.
#[derive(Debug, Clone, Default)]
pub struct GaugeState {
    values: Arc<DashMap<GaugeKey, f64>>,
}

impl GaugeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&self, key: GaugeKey, value: f64) {
        self.values.insert(key, value);
    }

    pub fn get(&self, pubkey: &str, validator_index: &str) -> Option<f64> {
        self.values
            .get(&GaugeKey::new(pubkey, validator_index))
            .map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any series carries `id` as its pubkey or validator index
    pub fn has_validator(&self, id: &str) -> bool {
        self.values
            .iter()
            .any(|entry| entry.key().pubkey == id || entry.key().validator_index == id)
    }

    /// Point-in-time copy, ordered by labels
    pub fn snapshot(&self) -> BTreeMap<GaugeKey, f64> {
        self.values
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let state = GaugeState::new();
        state.set(GaugeKey::new("0xAA", "5"), 0.5);
        state.set(GaugeKey::new("0xAA", "5"), 0.9);

        assert_eq!(state.get("0xAA", "5"), Some(0.9));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_clones_share_storage() {
        let writer = GaugeState::new();
        let reader = writer.clone();
        writer.set(GaugeKey::new("0xAA", "5"), 0.7);

        assert_eq!(reader.get("0xAA", "5"), Some(0.7));
        assert_eq!(reader.get("0xAA", "6"), None);
    }

    #[test]
    fn test_has_validator_matches_either_label() {
        let state = GaugeState::new();
        state.set(GaugeKey::new("0xAA", "5"), 0.7);

        assert!(state.has_validator("0xAA"));
        assert!(state.has_validator("5"));
        assert!(!state.has_validator("0xBB"));
    }

    #[test]
    fn test_concurrent_writers() {
        let state = GaugeState::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = state.clone();
                std::thread::spawn(move || {
                    for j in 0..100 {
                        state.set(GaugeKey::new(format!("0x{i}"), j.to_string()), j as f64);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(state.len(), 800);
        assert_eq!(state.snapshot().get(&GaugeKey::new("0x3", "42")), Some(&42.0));
    }
}
