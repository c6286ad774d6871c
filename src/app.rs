use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::badges::BadgeTable;
use crate::state::roster::{FetchFailed, RosterTicket};
use log::{error, info};
use pl_api::PlayerRecord;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Teams,
    Roster,
    Player,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let badges = match settings.badges_json.as_deref() {
            Some(path) => BadgeTable::with_overlay_file(path).unwrap_or_else(|e| {
                error!("{}: {e}", path.display());
                BadgeTable::default()
            }),
            None => BadgeTable::default(),
        };

        let app = Self {
            state: AppState::new(badges),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_teams_loaded(&mut self, result: Result<Vec<PlayerRecord>, FetchFailed>) {
        self.state.roster.on_teams_loaded(result);
        self.state.team_picker.cursor = 0;
    }

    /// Returns false when the result belonged to a superseded selection.
    pub fn on_roster_loaded(&mut self, seq: u64, result: Result<Vec<PlayerRecord>, FetchFailed>) -> bool {
        self.state.roster.apply_roster(seq, result)
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.searching = false;
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    // -----------------------------------------------------------------------
    // Team picker
    // -----------------------------------------------------------------------

    pub fn team_down(&mut self) {
        let count = self.state.roster.team_set().len();
        self.state.team_picker.move_down(count);
    }

    pub fn team_up(&mut self) {
        self.state.team_picker.move_up();
    }

    /// Start a selection cycle for the highlighted team and switch to the
    /// roster tab. The caller sends the returned ticket to the network worker.
    pub fn select_highlighted_team(&mut self) -> Option<RosterTicket> {
        let team = self
            .state
            .roster
            .team_set()
            .get(self.state.team_picker.cursor)?
            .clone();
        info!("selected team {team}");
        let ticket = self.state.roster.select_team(&team);
        self.update_tab(MenuItem::Roster);
        Some(ticket)
    }

    // -----------------------------------------------------------------------
    // Roster + search
    // -----------------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.state.searching = true;
    }

    pub fn stop_search(&mut self) {
        self.state.searching = false;
    }

    pub fn search_input(&mut self, c: char) {
        self.state.roster.push_query_char(c);
    }

    pub fn search_backspace(&mut self) {
        self.state.roster.pop_query_char();
    }

    pub fn clear_search(&mut self) {
        self.state.roster.clear_query();
    }

    pub fn roster_down(&mut self) {
        self.state.roster.cursor_down();
    }

    pub fn roster_up(&mut self) {
        self.state.roster.cursor_up();
    }

    /// Hand the highlighted player to the player view.
    pub fn open_selected_player(&mut self) -> bool {
        let Some(selection) = self.state.roster.select_player() else {
            return false;
        };
        info!("opening {}", selection.route());
        self.state.detail = Some(selection);
        self.update_tab(MenuItem::Player);
        true
    }

    pub fn back_to_roster(&mut self) {
        self.update_tab(MenuItem::Roster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::roster::RosterPhase;

    fn app() -> App {
        App::with_settings(AppSettings::default())
    }

    fn record(name: &str, team: &str) -> PlayerRecord {
        PlayerRecord { name: name.into(), team: team.into(), ..Default::default() }
    }

    fn listing() -> Vec<PlayerRecord> {
        vec![record("Cole Palmer", "Chelsea"), record("Bukayo Saka", "Arsenal")]
    }

    #[test]
    fn selecting_a_team_switches_to_roster_and_issues_ticket() {
        let mut app = app();
        app.dismiss_intro();
        app.on_teams_loaded(Ok(listing()));
        app.team_down();

        let ticket = app.select_highlighted_team().unwrap();
        assert_eq!(ticket.team, "Chelsea");
        assert_eq!(app.state.active_tab, MenuItem::Roster);
        assert!(matches!(app.state.roster.phase(), RosterPhase::Loading { .. }));
    }

    #[test]
    fn no_team_selected_before_team_list_arrives() {
        let mut app = app();
        assert!(app.select_highlighted_team().is_none());
        assert_eq!(app.state.active_tab, MenuItem::Teams);
    }

    #[test]
    fn opening_a_player_passes_the_record_to_the_player_view() {
        let mut app = app();
        app.on_teams_loaded(Ok(listing()));
        let ticket = app.select_highlighted_team().unwrap();
        assert!(app.on_roster_loaded(ticket.seq, Ok(vec![record("Bukayo Saka", "Arsenal")])));

        assert!(app.open_selected_player());
        assert_eq!(app.state.active_tab, MenuItem::Player);
        let detail = app.state.detail.as_ref().unwrap();
        assert_eq!(detail.player.name, "Bukayo Saka");
        assert_eq!(detail.slug, "Bukayo%20Saka");

        app.back_to_roster();
        assert_eq!(app.state.active_tab, MenuItem::Roster);
    }

    #[test]
    fn opening_a_player_on_empty_search_result_is_a_no_op() {
        let mut app = app();
        app.on_teams_loaded(Ok(listing()));
        let ticket = app.select_highlighted_team().unwrap();
        app.on_roster_loaded(ticket.seq, Ok(vec![record("Bukayo Saka", "Arsenal")]));
        app.state.roster.set_query("zzz");

        assert!(!app.open_selected_player());
        assert!(app.state.detail.is_none());
        assert_eq!(app.state.active_tab, MenuItem::Roster);
    }

    #[test]
    fn switching_tabs_ends_search_mode() {
        let mut app = app();
        app.update_tab(MenuItem::Roster);
        app.start_search();
        app.search_input('s');
        assert!(app.state.searching);
        app.update_tab(MenuItem::Help);
        assert!(!app.state.searching);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Roster);
        assert_eq!(app.state.roster.query(), "s");
    }
}
