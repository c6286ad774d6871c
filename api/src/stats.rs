//! Aggregate statistics over a (filtered) roster.

use crate::{NOT_AVAILABLE, PlayerRecord};

/// Position label → count, in the order labels were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionCounts {
    entries: Vec<(String, usize)>,
}

impl PositionCounts {
    fn bump(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, n)| *n)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, n)| (l.as_str(), *n))
    }

    /// Highest count wins; on a tie the label seen first wins.
    fn leader(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (label, n) in self.iter() {
            if best.is_none_or(|(_, top)| n > top) {
                best = Some((label, n));
            }
        }
        best.map(|(label, _)| label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterAggregate {
    pub player_count: usize,
    /// Mean age rounded to one decimal; `None` for an empty roster.
    pub average_age: Option<f64>,
    pub total_goals: u32,
    pub position_counts: PositionCounts,
    pub key_position: Option<String>,
}

impl RosterAggregate {
    pub fn average_age_label(&self) -> String {
        self.average_age
            .map_or_else(|| NOT_AVAILABLE.to_string(), |age| format!("{age:.1}"))
    }

    pub fn key_position_label(&self) -> &str {
        self.key_position.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Single pass over `players`. Absent ages count as 0, absent goals as 0 and
/// absent positions as "Unknown".
pub fn aggregate<'a, I>(players: I) -> RosterAggregate
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut count = 0usize;
    let mut age_sum = 0u64;
    let mut total_goals = 0u32;
    let mut position_counts = PositionCounts::default();

    for p in players {
        count += 1;
        age_sum += u64::from(p.age.unwrap_or(0));
        total_goals = total_goals.saturating_add(p.goals());
        position_counts.bump(p.position_label());
    }

    if count == 0 {
        return RosterAggregate::default();
    }

    let mean = age_sum as f64 / count as f64;
    let key_position = position_counts.leader().map(str::to_owned);
    RosterAggregate {
        player_count: count,
        average_age: Some((mean * 10.0).round() / 10.0),
        total_goals,
        position_counts,
        key_position,
    }
}
