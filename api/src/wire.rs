/// Backend raw wire types: serde shapes for deserializing the stats API.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Identifiers arrive as numbers from some endpoints and strings from others.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Default for WireId {
    fn default() -> Self {
        WireId::Text(String::new())
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Int(n) => write!(f, "{n}"),
            // pandas widens integer columns with gaps to floats ("23.0")
            WireId::Float(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            WireId::Float(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s.trim()),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoreboard  (/games)
// ---------------------------------------------------------------------------

/// Positional scoreboard row:
/// `[gameId, status, statusText, awayTeam, awayId, awayScore, homeTeam, homeId, homeScore, gameTimeUTC]`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WireGame(
    pub WireId,
    pub u8,
    pub String,
    pub String,
    pub WireId,
    pub Option<u16>,
    pub String,
    pub WireId,
    pub Option<u16>,
    pub Option<String>,
);

pub type GamesResponse = Vec<WireGame>;

// ---------------------------------------------------------------------------
// Matchup rosters  (/games/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchupResponse {
    #[serde(default)]
    pub away: Vec<WireRosterPlayer>,
    #[serde(default)]
    pub home: Vec<WireRosterPlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireRosterPlayer {
    pub id: WireId,
    #[serde(default)]
    pub name: String,
    pub position: Option<String>,
    pub team_name: Option<String>,
    pub jersey_number: Option<WireId>,
}

// ---------------------------------------------------------------------------
// Player directory  (/players), keyed by team id
// ---------------------------------------------------------------------------

pub type PlayersResponse = HashMap<String, WireTeamPlayers>;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeamPlayers {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub players: Vec<WirePlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    pub player_id: WireId,
    #[serde(default)]
    pub player_name: String,
    pub position: Option<String>,
    pub team: Option<String>,
    pub jersey_number: Option<WireId>,
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
    pub turnovers: Option<f64>,
    pub scoring_grade: Option<f64>,
    pub playmaking_grade: Option<f64>,
    pub rebounding_grade: Option<f64>,
    pub defense_grade: Option<f64>,
    pub athleticism_grade: Option<f64>,
    pub archetype: Option<String>,
}

// ---------------------------------------------------------------------------
// Standings  (/teams), keyed by team id
// ---------------------------------------------------------------------------

pub type TeamsResponse = HashMap<String, WireTeam>;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    #[serde(default)]
    pub team_name: String,
    pub city: Option<String>,
    pub arena: Option<String>,
    pub owner: Option<String>,
    pub general_manager: Option<String>,
    pub head_coach: Option<String>,
    pub conference: Option<String>,
    pub record: Option<String>,
    pub playoff_rank: Option<f64>,
}

// ---------------------------------------------------------------------------
// Player profile  (/nba/player/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerProfileResponse {
    #[serde(default)]
    pub player_info: Vec<WirePlayerInfo>,
    #[serde(default)]
    pub gamelogs: Vec<WireGameLog>,
    #[serde(default)]
    pub player_grades: Vec<WireGrades>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WirePlayerInfo {
    pub player_id: Option<WireId>,
    pub player_full_name: Option<String>,
    pub team_id: Option<WireId>,
    pub team_full_name: Option<String>,
    pub position: Option<String>,
    pub height: Option<WireId>,
    pub weight: Option<WireId>,
    pub college: Option<String>,
    // "Undrafted" rows carry text here
    pub draft_year: Option<WireId>,
    pub draft_round: Option<WireId>,
    pub draft_number: Option<WireId>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGameLog {
    pub game_id: Option<WireId>,
    pub game_date: Option<String>,
    pub matchup: Option<String>,
    pub opp: Option<String>,
    pub outcome: Option<String>,
    pub mins_played: Option<f64>,
    pub fg_made: Option<f64>,
    pub fg_att: Option<f64>,
    pub fg_pct: Option<f64>,
    pub fg3_made: Option<f64>,
    pub fg3_att: Option<f64>,
    pub fg3_pct: Option<f64>,
    pub ft_made: Option<f64>,
    pub ft_att: Option<f64>,
    pub ft_pct: Option<f64>,
    pub oreb: Option<f64>,
    pub dreb: Option<f64>,
    pub reb: Option<f64>,
    pub ast: Option<f64>,
    pub stl: Option<f64>,
    pub blk: Option<f64>,
    pub tov: Option<f64>,
    pub foul: Option<f64>,
    pub pts: Option<f64>,
    pub plus_minus: Option<f64>,
    pub pra: Option<f64>,
    pub pr: Option<f64>,
    pub pa: Option<f64>,
    pub ra: Option<f64>,
    pub stocks: Option<f64>,
    pub fantasy: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGrades {
    #[serde(rename = "Scoring")]
    pub scoring: Option<f64>,
    #[serde(rename = "Playmaking")]
    pub playmaking: Option<f64>,
    #[serde(rename = "Rebounding")]
    pub rebounding: Option<f64>,
    #[serde(rename = "Defense")]
    pub defense: Option<f64>,
    #[serde(rename = "Athleticism")]
    pub athleticism: Option<f64>,
}

// ---------------------------------------------------------------------------
// Team profile  (/team/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamProfileResponse {
    #[serde(default)]
    pub team_info: Vec<WireTeamInfo>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WireTeamInfo {
    pub team_id: Option<WireId>,
    pub team_full_name: Option<String>,
    pub wins: Option<f64>,
    pub losses: Option<f64>,
    pub win_pct: Option<f64>,
}
