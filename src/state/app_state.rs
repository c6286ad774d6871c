use crate::app::MenuItem;
use crate::state::badges::BadgeTable;
use crate::state::roster::RosterStore;
use pl_api::PlayerRecord;

// ---------------------------------------------------------------------------
// Navigation payload
// ---------------------------------------------------------------------------

/// What the roster view hands to the player view: the exact record that was
/// picked plus its route-safe name.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSelection {
    pub player: PlayerRecord,
    pub slug: String,
}

impl PlayerSelection {
    pub fn new(player: PlayerRecord) -> Self {
        let slug = player.route_slug();
        Self { player, slug }
    }

    pub fn route(&self) -> String {
        format!("/players/{}", self.slug)
    }
}

// ---------------------------------------------------------------------------
// Team picker state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamPickerState {
    /// Highlighted row in the team list.
    pub cursor: usize,
}

impl TeamPickerState {
    pub fn move_down(&mut self, team_count: usize) {
        if self.cursor + 1 < team_count {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    /// Keystrokes go to the search box instead of key bindings.
    pub searching: bool,
    pub roster: RosterStore,
    pub team_picker: TeamPickerState,
    /// `None` renders the "player not found" state.
    pub detail: Option<PlayerSelection>,
    pub badges: BadgeTable,
}

impl AppState {
    pub fn new(badges: BadgeTable) -> Self {
        Self {
            show_intro: true,
            badges,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_builds_route_from_name() {
        let selection = PlayerSelection::new(PlayerRecord {
            name: "Son Heung-min".into(),
            team: "Tottenham".into(),
            ..Default::default()
        });
        assert_eq!(selection.slug, "Son%20Heung-min");
        assert_eq!(selection.route(), "/players/Son%20Heung-min");
        assert_eq!(selection.player.team, "Tottenham");
    }

    #[test]
    fn team_picker_stays_in_bounds() {
        let mut picker = TeamPickerState::default();
        picker.move_up();
        assert_eq!(picker.cursor, 0);
        picker.move_down(2);
        picker.move_down(2);
        assert_eq!(picker.cursor, 1);
        picker.move_down(0);
        assert_eq!(picker.cursor, 1);
    }
}
