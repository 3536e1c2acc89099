use crate::app::MenuItem;
use crate::state::requests::RequestTracker;
use chrono::{DateTime, Local};
use nba_api::chart::{
    self, ChartBar, ChartCriteria, GameWindow, MINUTES_PRESETS, Presence, TeammateFilter,
};
use nba_api::listing::{self, FilterOptions, PlayerQuery, PlayerSort, Standings};
use nba_api::pagination::{self, PageRequest};
use nba_api::{
    Game, GameLogEntry, MatchupRoster, Outcome, Player, PlayerProfile, Team, TeamProfile,
};

/// Next value in `options` after `current`; wraps to `None` ("all") past the end.
pub fn cycle_option<T: Clone + PartialEq>(current: &Option<T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(c) => options
            .iter()
            .position(|o| o == c)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GamesState {
    pub games: Vec<Game>,
    pub selected: usize,
    pub matchup: Option<MatchupRoster>,
    pub updated_at: Option<DateTime<Local>>,
}

impl GamesState {
    /// Replace the scoreboard, keeping the cursor on the same game when it is still listed.
    pub fn load(&mut self, games: Vec<Game>) {
        let selected_id = self.selected_game().map(|g| g.id.clone());
        self.games = games;
        self.selected = selected_id
            .and_then(|id| self.games.iter().position(|g| g.id == id))
            .unwrap_or_else(|| clamp_index(self.selected, self.games.len()));
        self.updated_at = Some(Local::now());
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.games.get(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = clamp_index(self.selected + 1, self.games.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StandingsState {
    pub teams: Vec<Team>,
    pub search: String,
    /// Index into the east table followed by the west table.
    pub selected: usize,
}

impl StandingsState {
    pub fn load(&mut self, teams: Vec<Team>) {
        self.teams = teams;
        self.clamp();
    }

    pub fn view(&self) -> Standings {
        listing::standings(&self.teams, &self.search)
    }

    pub fn selected_team(&self) -> Option<Team> {
        let view = self.view();
        view.east.into_iter().chain(view.west).nth(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected += 1;
        self.clamp();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.clamp();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.clamp();
    }

    fn clamp(&mut self) {
        let view = self.view();
        self.selected = clamp_index(self.selected, view.east.len() + view.west.len());
    }
}

// ---------------------------------------------------------------------------
// Player directory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlayersState {
    pub all: Vec<Player>,
    pub query: PlayerQuery,
    pub options: FilterOptions,
    /// `all` filtered and sorted by `query`; rebuilt whenever either changes.
    pub visible: Vec<Player>,
    pub selected: usize,
}

impl PlayersState {
    pub fn load(&mut self, players: Vec<Player>) {
        self.options = listing::filter_options(&players);
        self.all = players;
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.visible = listing::filter_players(&self.all, &self.query);
        self.selected = clamp_index(self.selected, self.visible.len());
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.visible.get(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = clamp_index(self.selected + 1, self.visible.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_team(&mut self) {
        self.query.team = cycle_option(&self.query.team, &self.options.teams);
        self.refresh();
    }

    pub fn cycle_position(&mut self) {
        self.query.position = cycle_option(&self.query.position, &self.options.positions);
        self.refresh();
    }

    pub fn cycle_archetype(&mut self) {
        self.query.archetype = cycle_option(&self.query.archetype, &self.options.archetypes);
        self.refresh();
    }

    pub fn next_sort(&mut self) {
        self.sort_by(self.query.sort.next());
    }

    pub fn sort_by(&mut self, sort: PlayerSort) {
        self.query.toggle_sort(sort);
        self.refresh();
    }

    pub fn reverse_sort(&mut self) {
        self.query.direction = self.query.direction.reverse();
        self.refresh();
    }

    pub fn push_search(&mut self, c: char) {
        self.query.search.push(c);
        self.refresh();
    }

    pub fn pop_search(&mut self) {
        self.query.search.pop();
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.query = PlayerQuery::default();
        self.refresh();
    }
}

// ---------------------------------------------------------------------------
// Game-log paging
// ---------------------------------------------------------------------------

pub const ROWS_PER_PAGE_PRESETS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Page cursor that stays within `1..=page_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1, rows_per_page: DEFAULT_ROWS_PER_PAGE }
    }
}

impl Pager {
    pub fn page_count(&self, len: usize) -> usize {
        pagination::page_count(len, self.rows_per_page).max(1)
    }

    pub fn next(&mut self, len: usize) {
        if self.page < self.page_count(len) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn set_rows_per_page(&mut self, rows: usize) {
        self.rows_per_page = rows.max(1);
        self.page = 1;
    }

    pub fn cycle_rows_per_page(&mut self) {
        let idx = ROWS_PER_PAGE_PRESETS
            .iter()
            .position(|r| *r == self.rows_per_page)
            .map(|i| (i + 1) % ROWS_PER_PAGE_PRESETS.len())
            .unwrap_or(0);
        self.set_rows_per_page(ROWS_PER_PAGE_PRESETS[idx]);
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.rows_per_page)
    }
}

// ---------------------------------------------------------------------------
// Player profile
// ---------------------------------------------------------------------------

pub const THRESHOLD_STEP: f64 = 0.5;

#[derive(Debug, Default)]
pub struct ProfileState {
    pub profile: Option<PlayerProfile>,
    pub teammates: Vec<Player>,
    pub criteria: ChartCriteria,
    pub opponents: Vec<String>,
    /// Teammate picked for the with/without filter, by index into `teammates`.
    pub teammate: Option<usize>,
    pub presence: Option<Presence>,
    pub pager: Pager,
}

impl ProfileState {
    /// Install a freshly loaded player. Stat, threshold and window carry over;
    /// filters tied to the previous player do not. Reloading the same player
    /// keeps every filter and the current page.
    pub fn load(&mut self, profile: PlayerProfile, teammates: Vec<Player>) {
        let reload = self.profile.as_ref().is_some_and(|p| p.player_id == profile.player_id);
        self.opponents = chart::opponents(&profile.game_logs);
        if reload {
            let picked = self.selected_teammate().map(|p| p.id.clone());
            self.teammate = picked.and_then(|id| teammates.iter().position(|p| p.id == id));
            if self.teammate.is_none() {
                self.clear_teammate();
            }
            self.teammates = teammates;
            self.profile = Some(profile);
            let len = self.game_logs().len();
            self.pager.page = self.pager.page.min(self.pager.page_count(len));
            return;
        }
        self.criteria = ChartCriteria {
            stat: self.criteria.stat,
            threshold: self.criteria.threshold,
            window: self.criteria.window,
            ..ChartCriteria::default()
        };
        self.teammate = None;
        self.presence = None;
        self.pager = Pager { page: 1, ..self.pager };
        self.teammates = teammates;
        self.profile = Some(profile);
    }

    pub fn game_logs(&self) -> &[GameLogEntry] {
        self.profile.as_ref().map(|p| p.game_logs.as_slice()).unwrap_or(&[])
    }

    pub fn chart_window(&self) -> Vec<&GameLogEntry> {
        chart::filtered_logs(self.game_logs(), &self.criteria)
    }

    pub fn bars(&self) -> Vec<ChartBar> {
        chart::chart_bars(&self.chart_window(), self.criteria.stat, self.criteria.threshold)
    }

    pub fn log_page(&self) -> Vec<&GameLogEntry> {
        pagination::page(self.game_logs(), self.pager.request())
    }

    pub fn next_page(&mut self) {
        let len = self.game_logs().len();
        self.pager.next(len);
    }

    pub fn cycle_opponent(&mut self) {
        self.criteria.opponent = cycle_option(&self.criteria.opponent, &self.opponents);
    }

    pub fn cycle_min_minutes(&mut self) {
        self.criteria.min_minutes = cycle_option(&self.criteria.min_minutes, &MINUTES_PRESETS);
    }

    pub fn cycle_outcome(&mut self) {
        self.criteria.outcome = cycle_option(&self.criteria.outcome, &[Outcome::Win, Outcome::Loss]);
    }

    pub fn next_window(&mut self) {
        self.criteria.window = self.criteria.window.next();
    }

    pub fn next_stat(&mut self) {
        self.criteria.stat = self.criteria.stat.next();
    }

    pub fn prev_stat(&mut self) {
        self.criteria.stat = self.criteria.stat.prev();
    }

    pub fn raise_threshold(&mut self) {
        self.criteria.threshold += THRESHOLD_STEP;
    }

    pub fn lower_threshold(&mut self) {
        self.criteria.threshold = (self.criteria.threshold - THRESHOLD_STEP).max(0.0);
    }

    pub fn selected_teammate(&self) -> Option<&Player> {
        self.teammate.and_then(|i| self.teammates.get(i))
    }

    /// Move to the next teammate (or back to none). Returns the id whose game
    /// log must be fetched before the filter can apply.
    pub fn cycle_teammate(&mut self) -> Option<String> {
        self.teammate = match self.teammate {
            None if !self.teammates.is_empty() => Some(0),
            Some(i) if i + 1 < self.teammates.len() => Some(i + 1),
            _ => None,
        };
        self.criteria.teammate = None;
        let id = self.selected_teammate().map(|p| p.id.clone());
        self.presence = match id {
            Some(_) => Some(self.presence.unwrap_or(Presence::With)),
            None => None,
        };
        id
    }

    /// Drop the with/without filter, e.g. when the teammate's log failed to load.
    pub fn clear_teammate(&mut self) {
        self.teammate = None;
        self.presence = None;
        self.criteria.teammate = None;
    }

    pub fn toggle_presence(&mut self) {
        let Some(presence) = self.presence else {
            return;
        };
        let flipped = match presence {
            Presence::With => Presence::Without,
            Presence::Without => Presence::With,
        };
        self.presence = Some(flipped);
        if let Some(filter) = self.criteria.teammate.as_mut() {
            filter.presence = flipped;
        }
    }

    pub fn on_teammate_loaded(&mut self, player_id: &str, game_logs: &[GameLogEntry]) {
        let still_selected = self.selected_teammate().is_some_and(|p| p.id == player_id);
        if let (true, Some(presence)) = (still_selected, self.presence) {
            self.criteria.teammate = Some(TeammateFilter::from_logs(presence, game_logs));
        }
    }

    pub fn reset_filters(&mut self) {
        self.criteria.opponent = None;
        self.criteria.min_minutes = None;
        self.criteria.outcome = None;
        self.criteria.teammate = None;
        self.criteria.window = GameWindow::default();
        self.teammate = None;
        self.presence = None;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes edit the search box of the active tab.
    Search,
}

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub input_mode: InputMode,
    pub last_error: Option<String>,
    pub requests: RequestTracker,
    pub games: GamesState,
    pub standings: StandingsState,
    pub players: PlayersState,
    pub profile: ProfileState,
    pub team_profile: Option<TeamProfile>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::chart::StatKey;
    use nba_api::{Conference, GameSide};

    fn log(id: &str, opp: &str, pts: f64) -> GameLogEntry {
        GameLogEntry {
            game_id: id.into(),
            opponent: opp.into(),
            pts,
            minutes: 30.0,
            ..Default::default()
        }
    }

    fn profile_with(logs: Vec<GameLogEntry>) -> PlayerProfile {
        PlayerProfile {
            player_id: "1".into(),
            game_logs: logs,
            ..Default::default()
        }
    }

    fn teammate(id: &str) -> Player {
        Player { id: id.into(), name: format!("Player {id}"), ..Default::default() }
    }

    #[test]
    fn cycle_option_wraps_through_all() {
        let opts = vec!["a".to_string(), "b".to_string()];
        let mut cur = None;
        cur = cycle_option(&cur, &opts);
        assert_eq!(cur.as_deref(), Some("a"));
        cur = cycle_option(&cur, &opts);
        assert_eq!(cur.as_deref(), Some("b"));
        cur = cycle_option(&cur, &opts);
        assert_eq!(cur, None);
        assert_eq!(cycle_option::<String>(&None, &[]), None);
    }

    #[test]
    fn pager_stays_in_bounds() {
        let mut pager = Pager::default();
        pager.prev();
        assert_eq!(pager.page, 1);
        pager.next(25);
        pager.next(25);
        pager.next(25);
        assert_eq!(pager.page, 3);
        pager.next(0);
        assert_eq!(pager.page, 3);
        let mut empty = Pager::default();
        empty.next(0);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.page_count(0), 1);
    }

    #[test]
    fn changing_rows_per_page_resets_to_first_page() {
        let mut pager = Pager { page: 4, rows_per_page: 5 };
        pager.cycle_rows_per_page();
        assert_eq!(pager, Pager { page: 1, rows_per_page: 10 });
        pager.set_rows_per_page(50);
        pager.cycle_rows_per_page();
        assert_eq!(pager.rows_per_page, 5);
    }

    #[test]
    fn profile_page_is_newest_first() {
        let mut state = ProfileState::default();
        let logs = (1..=12).map(|i| log(&i.to_string(), "BOS", i as f64)).collect();
        state.load(profile_with(logs), Vec::new());
        let first: Vec<&str> = state.log_page().iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0], "12");
        state.next_page();
        state.next_page();
        assert_eq!(state.pager.page, 2);
        let second: Vec<&str> = state.log_page().iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(second, ["2", "1"]);
    }

    #[test]
    fn loading_a_new_player_keeps_stat_and_threshold() {
        let mut state = ProfileState::default();
        state.load(profile_with(vec![log("1", "BOS", 10.0)]), Vec::new());
        state.next_stat();
        state.raise_threshold();
        state.cycle_opponent();
        assert_eq!(state.criteria.opponent.as_deref(), Some("BOS"));

        let next = PlayerProfile { player_id: "2".into(), ..profile_with(vec![log("9", "MIA", 4.0)]) };
        state.load(next, Vec::new());
        assert_eq!(state.criteria.stat, StatKey::Rebounds);
        assert_eq!(state.criteria.threshold, 18.0);
        assert_eq!(state.criteria.opponent, None);
        assert_eq!(state.opponents, ["MIA"]);
    }

    #[test]
    fn reloading_same_player_keeps_filters_and_page() {
        let mut state = ProfileState::default();
        let logs: Vec<_> = (1..=25).map(|i| log(&i.to_string(), "BOS", i as f64)).collect();
        state.load(profile_with(logs.clone()), vec![teammate("7"), teammate("8")]);
        state.cycle_opponent();
        state.cycle_min_minutes();
        state.cycle_outcome();
        state.cycle_teammate();
        state.cycle_teammate();
        state.on_teammate_loaded("8", &[log("3", "BOS", 0.0)]);
        state.next_page();
        state.next_page();
        assert_eq!(state.pager.page, 3);

        state.load(profile_with(logs), vec![teammate("8"), teammate("9")]);
        assert_eq!(state.criteria.opponent.as_deref(), Some("BOS"));
        assert_eq!(state.criteria.min_minutes, Some(MINUTES_PRESETS[0]));
        assert_eq!(state.criteria.outcome, Some(Outcome::Win));
        assert_eq!(state.selected_teammate().map(|p| p.id.as_str()), Some("8"));
        assert_eq!(state.presence, Some(Presence::With));
        assert!(state.criteria.teammate.is_some());
        assert_eq!(state.pager.page, 3);

        // fewer games now: page clamps, teammate gone from the roster
        state.load(profile_with(vec![log("1", "BOS", 1.0)]), vec![teammate("9")]);
        assert_eq!(state.pager.page, 1);
        assert_eq!(state.teammate, None);
        assert_eq!(state.presence, None);
        assert!(state.criteria.teammate.is_none());
    }

    #[test]
    fn teammate_filter_applies_once_logs_arrive() {
        let mut state = ProfileState::default();
        let logs = vec![log("1", "BOS", 10.0), log("2", "NYK", 20.0), log("3", "MIA", 30.0)];
        state.load(profile_with(logs), vec![teammate("7"), teammate("8")]);

        assert_eq!(state.cycle_teammate().as_deref(), Some("7"));
        assert_eq!(state.chart_window().len(), 3);

        state.on_teammate_loaded("7", &[log("2", "NYK", 1.0)]);
        assert_eq!(state.chart_window().len(), 1);

        state.toggle_presence();
        let ids: Vec<&str> = state.chart_window().iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn stale_teammate_logs_are_ignored() {
        let mut state = ProfileState::default();
        state.load(profile_with(vec![log("1", "BOS", 10.0)]), vec![teammate("7"), teammate("8")]);
        state.cycle_teammate();
        state.cycle_teammate();
        state.on_teammate_loaded("7", &[]);
        assert!(state.criteria.teammate.is_none());
        assert_eq!(state.cycle_teammate(), None);
        assert_eq!(state.presence, None);
    }

    #[test]
    fn threshold_never_goes_negative() {
        let mut state = ProfileState::default();
        state.criteria.threshold = 0.25;
        state.lower_threshold();
        assert_eq!(state.criteria.threshold, 0.0);
    }

    #[test]
    fn scoreboard_reload_keeps_cursor_on_same_game() {
        let game = |id: &str| Game { id: id.into(), away: GameSide::default(), ..Default::default() };
        let mut state = GamesState::default();
        state.load(vec![game("a"), game("b"), game("c")]);
        state.select_next();
        state.select_next();
        state.load(vec![game("c"), game("a")]);
        assert_eq!(state.selected_game().map(|g| g.id.as_str()), Some("c"));
        state.load(Vec::new());
        assert_eq!(state.selected, 0);
        assert!(state.selected_game().is_none());
    }

    #[test]
    fn players_selection_follows_filters() {
        let mut state = PlayersState::default();
        state.load(vec![
            Player { id: "1".into(), name: "Al Jones".into(), team_name: "A".into(), ..Default::default() },
            Player { id: "2".into(), name: "Bob Smith".into(), team_name: "B".into(), ..Default::default() },
        ]);
        state.select_next();
        assert_eq!(state.selected_player().map(|p| p.id.as_str()), Some("2"));
        state.cycle_team();
        assert_eq!(state.query.team.as_deref(), Some("A"));
        assert_eq!(state.selected_player().map(|p| p.id.as_str()), Some("1"));
        state.clear_filters();
        assert_eq!(state.visible.len(), 2);
    }

    #[test]
    fn standings_selection_spans_both_conferences() {
        let team = |id: &str, conf, rank| Team {
            id: id.into(),
            name: format!("Team {id}"),
            conference: Some(conf),
            playoff_rank: Some(rank),
            ..Default::default()
        };
        let mut state = StandingsState::default();
        state.load(vec![team("w1", Conference::West, 1), team("e1", Conference::East, 1)]);
        assert_eq!(state.selected_team().map(|t| t.id), Some("e1".to_string()));
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_team().map(|t| t.id), Some("w1".to_string()));
        state.push_search('e');
        state.push_search('1');
        assert_eq!(state.selected_team().map(|t| t.id), Some("e1".to_string()));
    }
}
