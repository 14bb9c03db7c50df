use super::error::LotteryError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Participant(name)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Participant::new(name)
    }
}

/// One row of a weight table as it appears in a settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    pub weight: f64,
}

///
/// Ordered participants and their lottery weights.
///
/// Order matters: it is the order leftover participants take after the lottery picks, and the
/// order their tickets are laid out in the pool.
///
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    participants: Vec<Participant>,
    weights: Vec<f64>,
}

impl WeightTable {
    /// Builds a table from parallel lists, where `weights[i]` belongs to `participants[i]`.
    pub fn new<P: Into<Participant>>(
        participants: Vec<P>,
        weights: Vec<f64>,
    ) -> Result<WeightTable, LotteryError> {
        if participants.len() != weights.len() {
            return Err(LotteryError::LengthMismatch {
                participants: participants.len(),
                weights: weights.len(),
            });
        }
        if participants.is_empty() {
            return Err(LotteryError::EmptyTable);
        }

        let participants: Vec<Participant> = participants.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for (participant, weight) in participants.iter().zip(weights.iter()) {
            if !seen.insert(participant) {
                return Err(LotteryError::DuplicateParticipant(participant.to_string()));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(LotteryError::InvalidWeight {
                    participant: participant.to_string(),
                    weight: *weight,
                });
            }
        }

        Ok(WeightTable {
            participants,
            weights,
        })
    }

    pub fn from_entries(entries: Vec<TableEntry>) -> Result<WeightTable, LotteryError> {
        let (participants, weights): (Vec<String>, Vec<f64>) = entries
            .into_iter()
            .map(|entry| (entry.name, entry.weight))
            .unzip();
        WeightTable::new(participants, weights)
    }

    /// The fourteen non-playoff teams and their odds (in percent) of landing the first pick.
    pub fn nba_default() -> WeightTable {
        WeightTable {
            participants: [
                "DETROIT",
                "HOUSTON",
                "SAN ANTONIO",
                "CHARLOTTE",
                "PORTLAND",
                "ORLANDO",
                "INDIANA",
                "WASHINGTON",
                "UTAH",
                "DALLAS",
                "CHICAGO",
                "OKLAHOMA CITY",
                "TORONTO",
                "NEW ORLEANS",
            ]
            .into_iter()
            .map(Participant::from)
            .collect(),
            weights: vec![
                14.0, 14.0, 14.0, 12.5, 10.5, 9.0, 6.8, 6.7, 4.5, 3.0, 1.8, 1.7, 1.0, 0.5,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn participant(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name() == name)
    }

    pub fn weight_total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Participant, f64)> {
        self.participants.iter().zip(self.weights.iter().copied())
    }
}
