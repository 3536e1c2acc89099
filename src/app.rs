use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputMode};
use crate::state::messages::NetworkRequest;
use crate::state::requests::{Slot, Ticket};
use log::debug;
use nba_api::{Game, GameLogEntry, MatchupRoster, Player, PlayerProfile, Team, TeamProfile};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Games,
    Standings,
    Players,
    Profile,
    TeamProfile,
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
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Outgoing requests. Each one takes a fresh ticket for its slot, which
    // retires whatever was in flight for that slot before.
    // -----------------------------------------------------------------------

    pub fn startup_requests(&mut self) -> Vec<NetworkRequest> {
        vec![
            self.request_games(),
            self.request_standings(),
            self.request_players(),
        ]
    }

    pub fn request_games(&mut self) -> NetworkRequest {
        NetworkRequest::LoadGames { ticket: self.state.requests.issue(Slot::Games) }
    }

    pub fn request_standings(&mut self) -> NetworkRequest {
        NetworkRequest::LoadStandings { ticket: self.state.requests.issue(Slot::Standings) }
    }

    pub fn request_players(&mut self) -> NetworkRequest {
        NetworkRequest::LoadPlayers { ticket: self.state.requests.issue(Slot::Players) }
    }

    /// Reload whatever the active tab shows.
    pub fn refresh_active_tab(&mut self) -> Option<NetworkRequest> {
        match self.state.active_tab {
            MenuItem::Games => Some(self.request_games()),
            MenuItem::Standings => Some(self.request_standings()),
            MenuItem::Players => Some(self.request_players()),
            MenuItem::Profile => {
                let player_id = self.state.profile.profile.as_ref()?.player_id.clone();
                Some(self.request_profile(player_id))
            }
            MenuItem::TeamProfile => {
                let team_id = self.state.team_profile.as_ref()?.team_id.clone();
                Some(self.request_team_profile(team_id))
            }
            MenuItem::Help => None,
        }
    }

    /// Matchup rosters for the highlighted scoreboard game.
    pub fn select_game(&mut self) -> Option<NetworkRequest> {
        let game_id = self.state.games.selected_game()?.id.clone();
        let showing_other = self
            .state
            .games
            .matchup
            .as_ref()
            .is_some_and(|m| m.game_id != game_id);
        if showing_other {
            self.state.games.matchup = None;
        }
        let ticket = self.state.requests.issue(Slot::Matchup);
        Some(NetworkRequest::LoadMatchup { ticket, game_id })
    }

    pub fn open_selected_player(&mut self) -> Option<NetworkRequest> {
        let player_id = self.state.players.selected_player()?.id.clone();
        self.update_tab(MenuItem::Profile);
        Some(self.request_profile(player_id))
    }

    pub fn open_selected_team(&mut self) -> Option<NetworkRequest> {
        let team_id = self.state.standings.selected_team()?.id;
        self.update_tab(MenuItem::TeamProfile);
        Some(self.request_team_profile(team_id))
    }

    /// Team page of the player currently on the profile tab.
    pub fn open_profile_team(&mut self) -> Option<NetworkRequest> {
        let team_id = self.state.profile.profile.as_ref()?.team_id()?.to_string();
        self.update_tab(MenuItem::TeamProfile);
        Some(self.request_team_profile(team_id))
    }

    pub fn cycle_teammate(&mut self) -> Option<NetworkRequest> {
        match self.state.profile.cycle_teammate() {
            Some(player_id) => {
                let ticket = self.state.requests.issue(Slot::Teammate);
                Some(NetworkRequest::LoadTeammate { ticket, player_id })
            }
            None => {
                self.state.requests.invalidate(Slot::Teammate);
                None
            }
        }
    }

    pub fn reset_chart_filters(&mut self) {
        self.state.profile.reset_filters();
        self.state.requests.invalidate(Slot::Teammate);
    }

    fn request_profile(&mut self, player_id: String) -> NetworkRequest {
        let same_player =
            self.state.profile.profile.as_ref().is_some_and(|p| p.player_id == player_id);
        // The teammate list belongs to the old profile.
        if !same_player {
            self.state.requests.invalidate(Slot::Teammate);
        }
        let ticket = self.state.requests.issue(Slot::Profile);
        NetworkRequest::LoadProfile { ticket, player_id }
    }

    fn request_team_profile(&mut self, team_id: String) -> NetworkRequest {
        let ticket = self.state.requests.issue(Slot::TeamProfile);
        NetworkRequest::LoadTeamProfile { ticket, team_id }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop. Responses whose
    // ticket has been superseded are dropped; each accepted response replaces
    // its slot wholesale.
    // -----------------------------------------------------------------------

    fn accept(&mut self, ticket: Ticket) -> bool {
        let current = self.state.requests.is_current(ticket);
        if !current {
            debug!("dropping stale response {ticket:?}");
        }
        current
    }

    pub fn on_games_loaded(&mut self, ticket: Ticket, games: Vec<Game>) {
        if self.accept(ticket) {
            self.state.last_error = None;
            self.state.games.load(games);
        }
    }

    pub fn on_standings_loaded(&mut self, ticket: Ticket, teams: Vec<Team>) {
        if self.accept(ticket) {
            self.state.last_error = None;
            self.state.standings.load(teams);
        }
    }

    pub fn on_players_loaded(&mut self, ticket: Ticket, players: Vec<Player>) {
        if self.accept(ticket) {
            self.state.last_error = None;
            self.state.players.load(players);
        }
    }

    pub fn on_matchup_loaded(&mut self, ticket: Ticket, matchup: MatchupRoster) {
        if self.accept(ticket) {
            self.state.last_error = None;
            self.state.games.matchup = Some(matchup);
        }
    }

    pub fn on_profile_loaded(&mut self, ticket: Ticket, profile: PlayerProfile, teammates: Vec<Player>) {
        if self.accept(ticket) {
            self.state.last_error = None;
            self.state.profile.load(profile, teammates);
        }
    }

    pub fn on_teammate_loaded(&mut self, ticket: Ticket, player_id: String, game_logs: Vec<GameLogEntry>) {
        if self.accept(ticket) {
            self.state.profile.on_teammate_loaded(&player_id, &game_logs);
        }
    }

    pub fn on_team_profile_loaded(&mut self, ticket: Ticket, team: TeamProfile) {
        if self.accept(ticket) {
            self.state.last_error = None;
            self.state.team_profile = Some(team);
        }
    }

    /// Failed loads leave the previous data in place. A teammate filter that
    /// cannot be built is dropped instead of waiting forever.
    pub fn on_error(&mut self, ticket: Ticket, message: String) {
        if self.accept(ticket) {
            if ticket.slot == Slot::Teammate {
                self.state.profile.clear_teammate();
            }
            self.state.last_error = Some(message);
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.input_mode = InputMode::Normal;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn go_back(&mut self) {
        let target = match self.state.active_tab {
            MenuItem::Profile => MenuItem::Players,
            MenuItem::TeamProfile => MenuItem::Standings,
            MenuItem::Help => self.state.previous_tab,
            other => other,
        };
        self.update_tab(target);
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn start_search(&mut self) {
        if matches!(self.state.active_tab, MenuItem::Players | MenuItem::Standings) {
            self.state.input_mode = InputMode::Search;
        }
    }

    pub fn end_search(&mut self) {
        self.state.input_mode = InputMode::Normal;
    }

    pub fn search_push(&mut self, c: char) {
        match self.state.active_tab {
            MenuItem::Players => self.state.players.push_search(c),
            MenuItem::Standings => self.state.standings.push_search(c),
            _ => {}
        }
    }

    pub fn search_pop(&mut self) {
        match self.state.active_tab {
            MenuItem::Players => self.state.players.pop_search(),
            MenuItem::Standings => self.state.standings.pop_search(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App {
            settings: AppSettings::default(),
            state: AppState::new(),
        }
    }

    fn ticket_of(request: &NetworkRequest) -> Ticket {
        request.ticket()
    }

    fn player(id: &str) -> Player {
        Player { id: id.into(), name: format!("Player {id}"), ..Default::default() }
    }

    fn profile(id: &str) -> PlayerProfile {
        PlayerProfile { player_id: id.into(), ..Default::default() }
    }

    #[test]
    fn late_response_for_older_request_is_dropped() {
        let mut app = app();
        app.state.players.load(vec![player("1"), player("2")]);

        let first = app.open_selected_player().map(|r| ticket_of(&r));
        app.state.players.select_next();
        let second = app.open_selected_player().map(|r| ticket_of(&r));
        let (Some(first), Some(second)) = (first, second) else {
            panic!("expected profile requests");
        };

        app.on_profile_loaded(second, profile("2"), Vec::new());
        app.on_profile_loaded(first, profile("1"), Vec::new());

        let shown = app.state.profile.profile.as_ref().map(|p| p.player_id.as_str());
        assert_eq!(shown, Some("2"));
        assert_eq!(app.state.active_tab, MenuItem::Profile);
    }

    #[test]
    fn stale_error_does_not_clobber_newer_data() {
        let mut app = app();
        let old = ticket_of(&app.request_games());
        let new = ticket_of(&app.request_games());
        app.on_games_loaded(new, vec![Game { id: "g1".into(), ..Default::default() }]);
        app.on_error(old, "timeout".into());
        assert_eq!(app.state.last_error, None);
        assert_eq!(app.state.games.games.len(), 1);
    }

    #[test]
    fn error_keeps_previous_data() {
        let mut app = app();
        let t = ticket_of(&app.request_players());
        app.on_players_loaded(t, vec![player("1")]);
        let t = ticket_of(&app.request_players());
        app.on_error(t, "API error".into());
        assert_eq!(app.state.players.all.len(), 1);
        assert_eq!(app.state.last_error.as_deref(), Some("API error"));
    }

    #[test]
    fn new_profile_request_retires_teammate_load() {
        let mut app = app();
        app.state.profile.load(profile("1"), vec![player("7")]);
        let teammate = app.cycle_teammate().map(|r| ticket_of(&r));
        let Some(teammate) = teammate else {
            panic!("expected teammate request");
        };
        app.state.players.load(vec![player("3")]);
        app.open_selected_player();
        assert!(!app.state.requests.is_current(teammate));
    }

    #[test]
    fn failed_teammate_load_drops_the_filter() {
        let mut app = app();
        app.state.profile.load(profile("1"), vec![player("7")]);
        let Some(request) = app.cycle_teammate() else {
            panic!("expected teammate request");
        };
        assert!(app.state.profile.presence.is_some());
        app.on_error(ticket_of(&request), "API error".into());
        assert_eq!(app.state.profile.teammate, None);
        assert_eq!(app.state.profile.presence, None);
        assert!(app.state.profile.criteria.teammate.is_none());
        assert_eq!(app.state.last_error.as_deref(), Some("API error"));
    }

    #[test]
    fn refreshing_profile_keeps_pending_teammate_load() {
        let mut app = app();
        app.update_tab(MenuItem::Profile);
        app.state.profile.load(profile("1"), vec![player("7")]);
        let Some(teammate) = app.cycle_teammate().map(|r| ticket_of(&r)) else {
            panic!("expected teammate request");
        };
        let Some(reload) = app.refresh_active_tab().map(|r| ticket_of(&r)) else {
            panic!("expected profile request");
        };
        assert!(app.state.requests.is_current(teammate));

        app.on_profile_loaded(reload, profile("1"), vec![player("7")]);
        app.on_teammate_loaded(teammate, "7".into(), Vec::new());
        assert!(app.state.profile.criteria.teammate.is_some());
    }

    #[test]
    fn back_and_help_navigation() {
        let mut app = app();
        app.update_tab(MenuItem::Standings);
        app.update_tab(MenuItem::TeamProfile);
        app.go_back();
        assert_eq!(app.state.active_tab, MenuItem::Standings);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Standings);
    }

    #[test]
    fn search_only_on_searchable_tabs() {
        let mut app = app();
        app.start_search();
        assert_eq!(app.state.input_mode, InputMode::Normal);
        app.update_tab(MenuItem::Players);
        app.start_search();
        app.search_push('x');
        assert_eq!(app.state.players.query.search, "x");
        app.update_tab(MenuItem::Games);
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }
}
