use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if guard.state.show_intro {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) => guard.dismiss_intro(),
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            _ => {}
        }
        return;
    }

    // Search box owns the keyboard while it is focused.
    if guard.state.searching {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (Char('u'), KeyModifiers::CONTROL) => guard.clear_search(),
            (KeyCode::Esc | KeyCode::Enter, _) => guard.stop_search(),
            (KeyCode::Backspace, _) => guard.search_backspace(),
            (KeyCode::Down, _) => guard.roster_down(),
            (KeyCode::Up, _) => guard.roster_up(),
            (Char(c), _) => guard.search_input(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Roster),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Player),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Team picker
        (MenuItem::Teams, Char('j') | KeyCode::Down, _) => guard.team_down(),
        (MenuItem::Teams, Char('k') | KeyCode::Up, _) => guard.team_up(),
        (MenuItem::Teams, KeyCode::Enter, _) => {
            if let Some(ticket) = guard.select_highlighted_team() {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadRoster { team: ticket.team, seq: ticket.seq })
                    .await;
                return;
            }
        }

        // Roster
        (MenuItem::Roster, Char('j') | KeyCode::Down, _) => guard.roster_down(),
        (MenuItem::Roster, Char('k') | KeyCode::Up, _) => guard.roster_up(),
        (MenuItem::Roster, Char('/'), _) => guard.start_search(),
        (MenuItem::Roster, Char('c'), _) => guard.clear_search(),
        (MenuItem::Roster, KeyCode::Enter, _) => {
            guard.open_selected_player();
        }
        (MenuItem::Roster, KeyCode::Esc, _) => guard.update_tab(MenuItem::Teams),

        // Player detail
        (MenuItem::Player, KeyCode::Esc | KeyCode::Backspace, _) => guard.back_to_roster(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
