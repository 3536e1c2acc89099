pub mod chart;
pub mod client;
pub mod listing;
pub mod pagination;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: String,
    pub jersey_number: String, // served as a string, may be "" or "00"
    pub team_id: String,
    pub team_name: String,
    pub archetype: Option<String>,
    pub grades: Grades,
    pub season: SeasonAverages,
}

impl Player {
    /// Last whitespace-separated token of the display name.
    pub fn last_name(&self) -> &str {
        last_token(&self.name)
    }

    /// Jersey number as a number; blank or unparseable jerseys count as zero.
    pub fn jersey(&self) -> f64 {
        self.jersey_number.trim().parse::<f64>().unwrap_or_default()
    }
}

pub(crate) fn last_token(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or("")
}

/// Precomputed 0–100 composite scores supplied by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Grades {
    pub scoring: Option<f64>,
    pub playmaking: Option<f64>,
    pub rebounding: Option<f64>,
    pub defense: Option<f64>,
    pub athleticism: Option<f64>,
}

impl Grades {
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, v)| v.is_none())
    }

    /// (label, value) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        [
            ("Scoring", self.scoring),
            ("Playmaking", self.playmaking),
            ("Rebounding", self.rebounding),
            ("Defense", self.defense),
            ("Athleticism", self.athleticism),
        ]
        .into_iter()
    }
}

/// Color band of a grade, used by the grade panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTier {
    Poor,
    Average,
    Good,
    Elite,
}

impl GradeTier {
    pub fn from_grade(value: f64) -> Self {
        if value <= 45.0 {
            GradeTier::Poor
        } else if value < 65.0 {
            GradeTier::Average
        } else if value < 80.0 {
            GradeTier::Good
        } else {
            GradeTier::Elite
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeasonAverages {
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
    pub turnovers: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    pub fn label(&self) -> &'static str {
        match self {
            Conference::East => "Eastern Conference",
            Conference::West => "Western Conference",
        }
    }
}

impl FromStr for Conference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "east" | "eastern" => Ok(Conference::East),
            "west" | "western" => Ok(Conference::West),
            other => Err(format!("unknown conference: {other}")),
        }
    }
}

/// Won-loss record. Orders by wins, then losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

impl FromStr for Record {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, l) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("record without separator: {s}"))?;
        let wins = w.trim().parse().map_err(|e| format!("bad wins in {s}: {e}"))?;
        let losses = l.trim().parse().map_err(|e| format!("bad losses in {s}: {e}"))?;
        Ok(Record { wins, losses })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub arena: Option<String>,
    pub owner: Option<String>,
    pub general_manager: Option<String>,
    pub head_coach: Option<String>,
    pub conference: Option<Conference>,
    pub record: Option<Record>,
    pub playoff_rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "W" | "w" => Some(Outcome::Win),
            "L" | "l" => Some(Outcome::Loss),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
        }
    }
}

/// One row of per-game box score statistics for a single player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLogEntry {
    pub game_id: String,
    pub game_date: String,
    pub matchup: String,
    pub opponent: String,
    pub outcome: Option<Outcome>,
    pub minutes: f64,
    pub fg_made: f64,
    pub fg_att: f64,
    pub fg_pct: f64,
    pub fg3_made: f64,
    pub fg3_att: f64,
    pub fg3_pct: f64,
    pub ft_made: f64,
    pub ft_att: f64,
    pub ft_pct: f64,
    pub oreb: f64,
    pub dreb: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub fouls: f64,
    pub pts: f64,
    pub plus_minus: f64,
    pub pra: f64,
    pub pr: f64,
    pub pa: f64,
    pub ra: f64,
    pub stocks: f64,
    pub fantasy: f64,
}

/// Fantasy score weighting used when the API omits the precomputed value.
pub fn fantasy_score(pts: f64, reb: f64, ast: f64, stl: f64, blk: f64, tov: f64) -> f64 {
    pts + reb * 1.2 + ast * 1.5 + stl * 3.0 + blk * 3.0 - tov
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Final,
}

impl GameStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => GameStatus::Live,
            3 => GameStatus::Final,
            _ => GameStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSide {
    pub team_id: String,
    pub team_name: String,
    pub score: u16,
}

/// A row of today's scoreboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub status: GameStatus,
    pub status_text: String,
    pub away: GameSide,
    pub home: GameSide,
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterPlayer {
    pub id: String,
    pub name: String,
    pub position: String,
    pub team_name: String,
    pub jersey_number: String,
    /// Filled in from the player directory when available.
    pub grades: Option<Grades>,
}

/// Both rosters of a scheduled game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupRoster {
    pub game_id: String,
    pub away: Vec<RosterPlayer>,
    pub home: Vec<RosterPlayer>,
}

impl MatchupRoster {
    pub fn is_empty(&self) -> bool {
        self.away.is_empty() && self.home.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    pub team_id: String,
    pub team_full_name: String,
    pub position: String,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub college: Option<String>,
    pub draft_year: Option<u32>,
    pub draft_round: Option<u32>,
    pub draft_number: Option<u32>,
}

/// Everything shown on a player's profile page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProfile {
    pub player_id: String,
    pub info: Option<PlayerInfo>,
    pub game_logs: Vec<GameLogEntry>,
    pub grades: Option<Grades>,
}

impl PlayerProfile {
    pub fn name(&self) -> &str {
        self.info.as_ref().map(|i| i.name.as_str()).unwrap_or("")
    }

    pub fn team_id(&self) -> Option<&str> {
        self.info
            .as_ref()
            .map(|i| i.team_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamProfile {
    pub team_id: String,
    pub name: String,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub win_pct: Option<f64>,
}
