use crate::app::{App, MenuItem};
use crate::state::app_state::InputMode;
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

    if guard.state.input_mode == InputMode::Search {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Enter | KeyCode::Esc, _) => guard.end_search(),
            (KeyCode::Backspace, _) => guard.search_pop(),
            (Char(c), _) => guard.search_push(c),
            _ => {}
        }
        return;
    }

    let request = match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => {
            guard.update_tab(MenuItem::Games);
            None
        }
        (_, Char('2'), _) => {
            guard.update_tab(MenuItem::Standings);
            None
        }
        (_, Char('3'), _) => {
            guard.update_tab(MenuItem::Players);
            None
        }
        (_, Char('4'), _) => {
            guard.update_tab(MenuItem::Profile);
            None
        }
        (_, Char('5'), _) => {
            guard.update_tab(MenuItem::TeamProfile);
            None
        }
        (_, Char('?'), _) => {
            guard.update_tab(MenuItem::Help);
            None
        }
        (MenuItem::Help, KeyCode::Esc, _) => {
            guard.exit_help();
            None
        }
        (_, KeyCode::Esc, _) => {
            guard.go_back();
            None
        }
        (_, Char('R'), _) => guard.refresh_active_tab(),

        // Scoreboard
        (MenuItem::Games, Char('j') | KeyCode::Down, _) => {
            guard.state.games.select_next();
            None
        }
        (MenuItem::Games, Char('k') | KeyCode::Up, _) => {
            guard.state.games.select_prev();
            None
        }
        (MenuItem::Games, KeyCode::Enter, _) => guard.select_game(),

        // Standings
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => {
            guard.state.standings.select_next();
            None
        }
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => {
            guard.state.standings.select_prev();
            None
        }
        (MenuItem::Standings, Char('/'), _) => {
            guard.start_search();
            None
        }
        (MenuItem::Standings, KeyCode::Enter, _) => guard.open_selected_team(),

        // Player directory
        (MenuItem::Players, Char('j') | KeyCode::Down, _) => {
            guard.state.players.select_next();
            None
        }
        (MenuItem::Players, Char('k') | KeyCode::Up, _) => {
            guard.state.players.select_prev();
            None
        }
        (MenuItem::Players, Char('/'), _) => {
            guard.start_search();
            None
        }
        (MenuItem::Players, Char('t'), _) => {
            guard.state.players.cycle_team();
            None
        }
        (MenuItem::Players, Char('p'), _) => {
            guard.state.players.cycle_position();
            None
        }
        (MenuItem::Players, Char('a'), _) => {
            guard.state.players.cycle_archetype();
            None
        }
        (MenuItem::Players, Char('s'), _) => {
            guard.state.players.next_sort();
            None
        }
        (MenuItem::Players, Char('d'), _) => {
            guard.state.players.reverse_sort();
            None
        }
        (MenuItem::Players, Char('x'), _) => {
            guard.state.players.clear_filters();
            None
        }
        (MenuItem::Players, KeyCode::Enter, _) => guard.open_selected_player(),

        // Player profile: chart criteria
        (MenuItem::Profile, Char('s'), _) => {
            guard.state.profile.next_stat();
            None
        }
        (MenuItem::Profile, Char('S'), _) => {
            guard.state.profile.prev_stat();
            None
        }
        (MenuItem::Profile, Char('+') | Char('='), _) => {
            guard.state.profile.raise_threshold();
            None
        }
        (MenuItem::Profile, Char('-'), _) => {
            guard.state.profile.lower_threshold();
            None
        }
        (MenuItem::Profile, Char('g'), _) => {
            guard.state.profile.next_window();
            None
        }
        (MenuItem::Profile, Char('o'), _) => {
            guard.state.profile.cycle_opponent();
            None
        }
        (MenuItem::Profile, Char('m'), _) => {
            guard.state.profile.cycle_min_minutes();
            None
        }
        (MenuItem::Profile, Char('w'), _) => {
            guard.state.profile.cycle_outcome();
            None
        }
        (MenuItem::Profile, Char('t'), _) => guard.cycle_teammate(),
        (MenuItem::Profile, Char('i'), _) => {
            guard.state.profile.toggle_presence();
            None
        }
        (MenuItem::Profile, Char('x'), _) => {
            guard.reset_chart_filters();
            None
        }
        (MenuItem::Profile, Char('T'), _) => guard.open_profile_team(),

        // Player profile: game log paging
        (MenuItem::Profile, Char('l') | KeyCode::Right, _) => {
            guard.state.profile.next_page();
            None
        }
        (MenuItem::Profile, Char('h') | KeyCode::Left, _) => {
            guard.state.profile.pager.prev();
            None
        }
        (MenuItem::Profile, Char('r'), _) => {
            guard.state.profile.pager.cycle_rows_per_page();
            None
        }

        // Global
        (_, Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
