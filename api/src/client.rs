use crate::wire::{
    GamesResponse, MatchupResponse, PlayerProfileResponse, PlayersResponse, TeamProfileResponse,
    TeamsResponse, WireGame, WireGameLog, WireGrades, WireId, WirePlayer, WirePlayerInfo,
    WireRosterPlayer, WireTeam,
};
use crate::{
    Game, GameLogEntry, GameSide, GameStatus, Grades, MatchupRoster, Outcome, Player, PlayerInfo,
    PlayerProfile, RosterPlayer, SeasonAverages, Team, TeamProfile, fantasy_score,
};
use chrono::{DateTime, Utc};
use futures_util::future::try_join;
use log::debug;
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Team bucket the backend uses for unsigned players.
const FREE_AGENT_TEAM_ID: &str = "0";

/// Client for the NBA stats backend.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Player profile fetched together with the player's current teammates.
#[derive(Debug, Clone, Default)]
pub struct ProfileBundle {
    pub profile: PlayerProfile,
    pub teammates: Vec<Player>,
}

impl NbaApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("nbaviz/0.1 (terminal stats viewer)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Today's scoreboard.
    pub async fn fetch_games(&self) -> ApiResult<Vec<Game>> {
        let url = format!("{}/games", self.base_url);
        let raw: GamesResponse = self.get(&url).await?;
        Ok(raw.iter().map(map_game).collect())
    }

    /// Away and home rosters for one scoreboard game.
    pub async fn fetch_matchup(&self, game_id: &str) -> ApiResult<MatchupRoster> {
        let url = format!("{}/games/{game_id}", self.base_url);
        let raw: MatchupResponse = self.get(&url).await?;
        Ok(map_matchup(game_id, raw))
    }

    /// Matchup rosters enriched with grades from the player directory.
    /// Both requests run concurrently; the result is only produced once both succeed.
    pub async fn fetch_matchup_with_grades(&self, game_id: &str) -> ApiResult<MatchupRoster> {
        let (mut matchup, players) =
            try_join(self.fetch_matchup(game_id), self.fetch_players()).await?;
        enrich_roster(&mut matchup, &players);
        Ok(matchup)
    }

    /// Every rostered player, flattened out of the per-team grouping.
    pub async fn fetch_players(&self) -> ApiResult<Vec<Player>> {
        let url = format!("{}/players", self.base_url);
        let raw: PlayersResponse = self.get(&url).await?;
        Ok(map_players(raw))
    }

    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let url = format!("{}/teams", self.base_url);
        let raw: TeamsResponse = self.get(&url).await?;
        Ok(map_teams(raw))
    }

    pub async fn fetch_player_profile(&self, player_id: &str) -> ApiResult<PlayerProfile> {
        let url = format!("{}/nba/player/{player_id}", self.base_url);
        let raw: PlayerProfileResponse = self.get(&url).await?;
        Ok(map_profile(player_id, raw))
    }

    /// Profile plus teammates, fetched concurrently.
    pub async fn fetch_profile_bundle(&self, player_id: &str) -> ApiResult<ProfileBundle> {
        let (profile, players) =
            try_join(self.fetch_player_profile(player_id), self.fetch_players()).await?;
        let teammates = teammates_of(&profile, players);
        Ok(ProfileBundle { profile, teammates })
    }

    pub async fn fetch_team_profile(&self, team_id: &str) -> ApiResult<TeamProfile> {
        let url = format!("{}/team/{team_id}", self.base_url);
        let raw: TeamProfileResponse = self.get(&url).await?;
        let info = raw
            .team_info
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("no team info for {team_id}")))?;
        Ok(TeamProfile {
            team_id: info
                .team_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| team_id.to_owned()),
            name: info.team_full_name.unwrap_or_default(),
            wins: info.wins.map(|w| w as u32),
            losses: info.losses.map(|l| l as u32),
            win_pct: info.win_pct,
        })
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("ngrok-skip-browser-warning", "true")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_game(g: &WireGame) -> Game {
    let WireGame(
        id,
        status,
        status_text,
        away_name,
        away_id,
        away_score,
        home_name,
        home_id,
        home_score,
        start,
    ) = g;
    Game {
        id: id.to_string(),
        status: GameStatus::from_code(*status),
        status_text: status_text.trim().to_owned(),
        away: GameSide {
            team_id: away_id.to_string(),
            team_name: away_name.clone(),
            score: away_score.unwrap_or_default(),
        },
        home: GameSide {
            team_id: home_id.to_string(),
            team_name: home_name.clone(),
            score: home_score.unwrap_or_default(),
        },
        start_time: start.as_deref().and_then(parse_start_time),
    }
}

fn parse_start_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn map_matchup(game_id: &str, raw: MatchupResponse) -> MatchupRoster {
    MatchupRoster {
        game_id: game_id.to_owned(),
        away: raw.away.iter().map(map_roster_player).collect(),
        home: raw.home.iter().map(map_roster_player).collect(),
    }
}

fn map_roster_player(p: &WireRosterPlayer) -> RosterPlayer {
    RosterPlayer {
        id: p.id.to_string(),
        name: p.name.trim().to_owned(),
        position: p.position.clone().unwrap_or_default(),
        team_name: p.team_name.clone().unwrap_or_default(),
        jersey_number: jersey(p.jersey_number.as_ref()),
        grades: None,
    }
}

fn enrich_roster(matchup: &mut MatchupRoster, players: &[Player]) {
    let by_id: HashMap<&str, &Player> = players.iter().map(|p| (p.id.as_str(), p)).collect();
    for slot in matchup.away.iter_mut().chain(matchup.home.iter_mut()) {
        slot.grades = by_id
            .get(slot.id.as_str())
            .map(|p| p.grades)
            .filter(|g| !g.is_empty());
    }
}

fn jersey(id: Option<&WireId>) -> String {
    id.map(|j| j.to_string()).unwrap_or_default()
}

fn map_players(raw: PlayersResponse) -> Vec<Player> {
    let mut teams: Vec<(String, crate::wire::WireTeamPlayers)> = raw
        .into_iter()
        .filter(|(team_id, _)| team_id != FREE_AGENT_TEAM_ID)
        .collect();
    // Stable team order regardless of map iteration order.
    teams.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    teams
        .into_iter()
        .flat_map(|(team_id, team)| {
            let team_name = team.team_name;
            team.players
                .into_iter()
                .map(move |p| map_player(&team_id, &team_name, p))
        })
        .collect()
}

fn map_player(team_id: &str, team_name: &str, p: WirePlayer) -> Player {
    Player {
        id: p.player_id.to_string(),
        name: p.player_name.trim().to_owned(),
        position: p.position.unwrap_or_default(),
        jersey_number: jersey(p.jersey_number.as_ref()),
        team_id: team_id.to_owned(),
        team_name: team_name.to_owned(),
        archetype: p.archetype.filter(|a| !a.trim().is_empty()),
        grades: Grades {
            scoring: p.scoring_grade,
            playmaking: p.playmaking_grade,
            rebounding: p.rebounding_grade,
            defense: p.defense_grade,
            athleticism: p.athleticism_grade,
        },
        season: SeasonAverages {
            points: p.points,
            rebounds: p.rebounds,
            assists: p.assists,
            steals: p.steals,
            blocks: p.blocks,
            turnovers: p.turnovers,
        },
    }
}

fn map_teams(raw: TeamsResponse) -> Vec<Team> {
    let mut teams: Vec<Team> = raw
        .into_iter()
        .map(|(id, t)| map_team(id, t))
        .collect();
    teams.sort_by(|a, b| a.id.len().cmp(&b.id.len()).then_with(|| a.id.cmp(&b.id)));
    teams
}

fn map_team(id: String, t: WireTeam) -> Team {
    Team {
        id,
        name: t.team_name.trim().to_owned(),
        city: t.city,
        arena: t.arena,
        owner: t.owner,
        general_manager: t.general_manager,
        head_coach: t.head_coach,
        conference: t.conference.as_deref().and_then(|c| c.parse().ok()),
        record: t.record.as_deref().and_then(|r| r.parse().ok()),
        playoff_rank: t.playoff_rank.filter(|r| *r > 0.0).map(|r| r as u32),
    }
}

fn map_profile(player_id: &str, raw: PlayerProfileResponse) -> PlayerProfile {
    PlayerProfile {
        player_id: player_id.to_owned(),
        info: raw.player_info.into_iter().next().map(map_player_info),
        game_logs: raw.gamelogs.iter().map(map_game_log).collect(),
        grades: raw
            .player_grades
            .into_iter()
            .next()
            .map(map_grades)
            .filter(|g| !g.is_empty()),
    }
}

fn map_player_info(i: WirePlayerInfo) -> PlayerInfo {
    let positive = |v: Option<WireId>| {
        v.and_then(|n| n.to_string().parse::<u32>().ok())
            .filter(|n| *n > 0)
    };
    let text = |v: Option<WireId>| v.map(|s| s.to_string()).filter(|s| !s.is_empty());
    PlayerInfo {
        id: i.player_id.map(|id| id.to_string()).unwrap_or_default(),
        name: i.player_full_name.unwrap_or_default(),
        team_id: i.team_id.map(|id| id.to_string()).unwrap_or_default(),
        team_full_name: i.team_full_name.unwrap_or_default(),
        position: i.position.unwrap_or_default(),
        height: text(i.height),
        weight: text(i.weight),
        college: i.college.filter(|s| !s.is_empty()),
        draft_year: positive(i.draft_year),
        draft_round: positive(i.draft_round),
        draft_number: positive(i.draft_number),
    }
}

fn map_grades(g: WireGrades) -> Grades {
    Grades {
        scoring: g.scoring,
        playmaking: g.playmaking,
        rebounding: g.rebounding,
        defense: g.defense,
        athleticism: g.athleticism,
    }
}

fn map_game_log(g: &WireGameLog) -> GameLogEntry {
    let n = |v: Option<f64>| v.unwrap_or_default();

    let pts = n(g.pts);
    let oreb = n(g.oreb);
    let dreb = n(g.dreb);
    let reb = g.reb.unwrap_or(oreb + dreb);
    let ast = n(g.ast);
    let stl = n(g.stl);
    let blk = n(g.blk);
    let tov = n(g.tov);

    GameLogEntry {
        game_id: g.game_id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        game_date: g.game_date.clone().unwrap_or_default(),
        matchup: g.matchup.clone().unwrap_or_default(),
        opponent: g
            .opp
            .clone()
            .or_else(|| g.matchup.as_deref().and_then(opponent_from_matchup))
            .unwrap_or_default(),
        outcome: g.outcome.as_deref().and_then(Outcome::parse),
        minutes: n(g.mins_played),
        fg_made: n(g.fg_made),
        fg_att: n(g.fg_att),
        fg_pct: n(g.fg_pct),
        fg3_made: n(g.fg3_made),
        fg3_att: n(g.fg3_att),
        fg3_pct: n(g.fg3_pct),
        ft_made: n(g.ft_made),
        ft_att: n(g.ft_att),
        ft_pct: n(g.ft_pct),
        oreb,
        dreb,
        reb,
        ast,
        stl,
        blk,
        tov,
        fouls: n(g.foul),
        pts,
        plus_minus: n(g.plus_minus),
        pra: g.pra.unwrap_or(pts + reb + ast),
        pr: g.pr.unwrap_or(pts + reb),
        pa: g.pa.unwrap_or(pts + ast),
        ra: g.ra.unwrap_or(reb + ast),
        stocks: g.stocks.unwrap_or(blk + stl),
        fantasy: g
            .fantasy
            .unwrap_or_else(|| fantasy_score(pts, reb, ast, stl, blk, tov)),
    }
}

/// "LAL vs. BOS" and "LAL @ BOS" both name BOS as the opponent.
fn opponent_from_matchup(matchup: &str) -> Option<String> {
    matchup
        .split_once("vs.")
        .or_else(|| matchup.split_once('@'))
        .map(|(_, opp)| opp.trim().to_owned())
        .filter(|opp| !opp.is_empty())
}

fn teammates_of(profile: &PlayerProfile, players: Vec<Player>) -> Vec<Player> {
    let Some(team_id) = profile.team_id() else {
        return Vec::new();
    };
    players
        .into_iter()
        .filter(|p| p.team_id == team_id && p.id != profile.player_id)
        .collect()
}
