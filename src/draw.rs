use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::highlight::highlighted;
use crate::components::stat_cards::{CARD_HEIGHT, StatCards};
use crate::state::badges::TeamBadges;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::roster::{RosterPhase, TeamsPhase};
use crate::ui::layout::LayoutAreas;
use pl_api::PlayerRecord;

static TABS: &[&str; 3] = &["Teams", "Roster", "Player"];

const HELP_TEXT: &str = "Help: q=quit  1=Teams  2=Roster  3=Player  j/k=move  Enter=select  /=search  c=clear search  Esc=back  \"=logs  f=full screen";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            if app.state.show_intro {
                draw_intro(f, f.area());
                return;
            }

            layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Teams => draw_teams(f, layout.main, app),
                MenuItem::Roster => draw_roster(f, layout.main, app),
                MenuItem::Player => draw_player(f, layout.main, app),
                MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
            }

            if let Some(logs) = layout.logs {
                draw_logs(f, logs);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" PL Stats Hub ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, title_area, tagline_area, _gap, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new("⚽ The Ultimate Premier League Experience")
            .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        title_area,
    );
    f.render_widget(
        Paragraph::new("Squad rosters, goals, ages and positions for every club.\nSearch any squad by name, position or nation.")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        tagline_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to browse teams")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Teams => 0,
        MenuItem::Roster => 1,
        MenuItem::Player => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let teams = app.state.roster.team_set();
    let block = default_border(Color::White).title(format!(" Premier League Teams ({}) ", teams.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.state.roster.teams() {
        TeamsPhase::Loading => {
            draw_centered_note(f, inner, "Loading team list...".to_string());
            return;
        }
        TeamsPhase::Failed(err) => {
            f.render_widget(
                Paragraph::new(format!("{err}\nCheck the API connection and restart."))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }
        TeamsPhase::Ready(_) => {}
    }

    let [key_legend, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  Enter=load squad  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let selected_team = app.state.roster.phase().team();
    let cursor = app.state.team_picker.cursor;
    let visible = list_area.height.max(1) as usize;
    let start = cursor.saturating_sub(visible - 1);

    let lines: Vec<Line> = teams
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(idx, team)| {
            let marker = if idx == cursor { ">" } else { " " };
            let style = if selected_team == Some(team.as_str()) {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else if idx == cursor {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::raw(format!("{} ", app.state.badges.badge(team))),
                Span::styled(team.as_str(), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

fn draw_roster(f: &mut Frame, area: Rect, app: &App) {
    let roster = &app.state.roster;

    let Some(team) = roster.phase().team() else {
        let block = default_border(Color::White).title(" Roster ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_centered_note(
            f,
            inner,
            "Select any Premier League team to load its full squad roster and performance statistics.".to_string(),
        );
        return;
    };

    let title = format!(" {} {team} - Squad Analytics ", app.state.badges.badge(team));
    let block = default_border(Color::Magenta).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match roster.phase() {
        RosterPhase::Loading { team } => {
            draw_centered_note(f, inner, format!("Loading {team} roster..."));
            return;
        }
        RosterPhase::Failed { error, .. } => {
            f.render_widget(
                Paragraph::new(error.to_string())
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }
        RosterPhase::Idle | RosterPhase::Ready { .. } => {}
    }

    let [search_area, summary_area, cards_area, table_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(CARD_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(inner);

    draw_search_bar(f, search_area, app);

    let summary = if roster.query().is_empty() {
        let loaded_at = match roster.phase() {
            RosterPhase::Ready { loaded_at, .. } => format!(" (loaded {loaded_at})"),
            _ => String::new(),
        };
        format!("{} players{loaded_at}", roster.roster_len())
    } else {
        let mut text = format!("Showing {} of {} players", roster.filtered_len(), roster.roster_len());
        if roster.filtered_len() == 0 {
            text.push_str(" - No matches found");
        }
        text
    };
    f.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::DarkGray)),
        summary_area,
    );

    f.render_widget(StatCards { aggregate: roster.aggregate() }, cards_area);

    draw_roster_table(f, table_area, app);
}

fn draw_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let query = app.state.roster.query();
    let (text, style, border) = if app.state.searching {
        (format!("{query}_"), Style::default().fg(Color::Yellow), Color::Yellow)
    } else if query.is_empty() {
        (
            "Press / to search by name, position or nation".to_string(),
            Style::default().fg(Color::DarkGray),
            Color::DarkGray,
        )
    } else {
        (format!("{query}   (c to clear)"), Style::default().fg(Color::White), Color::DarkGray)
    };
    let block = default_border(border).title(" Search ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(text).style(style), inner);
}

fn draw_roster_table(f: &mut Frame, area: Rect, app: &App) {
    let roster = &app.state.roster;
    let block = default_border(Color::DarkGray).title(" Roster Details ");

    if roster.filtered_len() == 0 {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let msg = if roster.query().is_empty() {
            "No detailed player data found for this team."
        } else {
            "No players found matching your search criteria."
        };
        draw_centered_note(f, inner, msg.to_string());
        return;
    }

    let query = roster.query();
    let name_style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
    let rows: Vec<Row> = roster
        .filtered()
        .map(|p| {
            Row::new(vec![
                Cell::from(highlighted(p.display_name(), query, name_style)),
                Cell::from(p.position_label()),
                Cell::from(p.nationality()),
                Cell::from(p.age_label()),
                Cell::from(p.goals().to_string()).style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();

    let header = Row::new(["Player", "Pos", "Nation", "Age", "Goals"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED));
    let widths = [
        Constraint::Fill(3),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(roster.cursor()));
    f.render_stateful_widget(table, area, &mut state);
}

// ---------------------------------------------------------------------------
// Player detail
// ---------------------------------------------------------------------------

fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let Some(selection) = app.state.detail.as_ref() else {
        let block = default_border(Color::Red).title(" Player Not Found ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_centered_note(
            f,
            inner,
            "No player data was passed to this view.\nOpen a player from a team roster (2, then Enter).".to_string(),
        );
        return;
    };

    let p = &selection.player;
    let block = default_border(Color::Magenta).title(format!(" {} ", p.display_name()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let field = |name: &'static str, text: String| {
        Line::from(vec![Span::styled(format!("{name:<30}"), label), Span::styled(text, value)])
    };

    let mut lines = vec![
        Line::from(Span::styled(selection.route(), label)),
        Line::from("Esc=back to team roster"),
        Line::from(""),
        field("Team", p.team.clone()),
        field("Position", p.position_label().to_string()),
        field("Nation", p.nationality().to_string()),
        field("Age", age_years(p)),
        field("Matches Played", count_label(p.mp)),
        field("Minutes Played", count_label(p.min)),
        Line::from(""),
        field("Goals (Gls)", p.goals().to_string()),
        field("Assists (Ast)", count_label(p.ast)),
        field("Expected Goals (xG)", ratio_label(p.xg)),
        field("Expected Assisted Goals (xAG)", ratio_label(p.xag)),
        field("Yellow Cards", count_label(p.crdy)),
        field("Red Cards", count_label(p.crdr)),
        Line::from(""),
    ];
    lines.push(Line::from(Span::styled(
        format!(
            "Statistics are based on accumulated data over {} matches played this season.",
            count_label(p.mp)
        ),
        label,
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

fn age_years(p: &PlayerRecord) -> String {
    match p.age {
        Some(age) => format!("{age} yrs"),
        None => p.age_label(),
    }
}

fn count_label(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn ratio_label(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

// ---------------------------------------------------------------------------
// Shared bits
// ---------------------------------------------------------------------------

fn draw_centered_note(f: &mut Frame, area: Rect, msg: String) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use tui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn ready_app() -> App {
        let mut app = App::with_settings(AppSettings::default());
        app.dismiss_intro();
        app.on_teams_loaded(Ok(vec![PlayerRecord {
            name: "Declan Rice".into(),
            team: "Arsenal".into(),
            ..Default::default()
        }]));
        let ticket = app.select_highlighted_team().unwrap();
        app.on_roster_loaded(
            ticket.seq,
            Ok(vec![
                PlayerRecord {
                    name: "Declan Rice".into(),
                    team: "Arsenal".into(),
                    pos: Some("MF".into()),
                    nation: Some("eng ENG".into()),
                    age: Some(26),
                    gls: Some(4),
                    ..Default::default()
                },
                PlayerRecord {
                    name: "David Raya".into(),
                    team: "Arsenal".into(),
                    pos: Some("GK".into()),
                    ..Default::default()
                },
            ]),
        );
        app
    }

    #[test]
    fn roster_view_shows_players_and_cards() {
        let mut app = ready_app();
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());

        let text = screen_text(&terminal);
        assert!(text.contains("Arsenal - Squad Analytics"));
        assert!(text.contains("Declan Rice"));
        assert!(text.contains("David Raya"));
        assert!(text.contains("Total Goals"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn search_summary_reports_no_matches() {
        let mut app = ready_app();
        app.state.roster.set_query("zzz");
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());

        let text = screen_text(&terminal);
        assert!(text.contains("Showing 0 of 2 players - No matches found"));
        assert!(text.contains("No players found matching your search criteria."));
    }

    #[test]
    fn player_view_without_payload_renders_not_found() {
        let mut app = ready_app();
        app.update_tab(MenuItem::Player);
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());

        assert!(screen_text(&terminal).contains("Player Not Found"));
    }

    #[test]
    fn player_view_renders_passed_record() {
        let mut app = ready_app();
        assert!(app.open_selected_player());
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());

        let text = screen_text(&terminal);
        assert!(text.contains("/players/Declan%20Rice"));
        assert!(text.contains("ENG"));
        assert!(text.contains("26 yrs"));
    }
}
