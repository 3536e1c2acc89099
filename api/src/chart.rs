//! Game-log filtering and threshold bucketing for the profile bar chart.

use crate::{GameLogEntry, Outcome};
use std::collections::{BTreeSet, HashSet};

pub const DEFAULT_THRESHOLD: f64 = 17.5;
pub const DEFAULT_WINDOW: usize = 30;

/// Minute floors offered by the minutes picker.
pub const MINUTES_PRESETS: [f64; 8] = [10.0, 20.0, 24.0, 28.0, 30.0, 32.0, 34.0, 40.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameWindow {
    Last(usize),
    Season,
}

impl Default for GameWindow {
    fn default() -> Self {
        GameWindow::Last(DEFAULT_WINDOW)
    }
}

impl GameWindow {
    pub const PRESETS: [GameWindow; 6] = [
        GameWindow::Season,
        GameWindow::Last(30),
        GameWindow::Last(20),
        GameWindow::Last(15),
        GameWindow::Last(10),
        GameWindow::Last(5),
    ];

    pub fn label(&self) -> String {
        match self {
            GameWindow::Last(n) => format!("Last {n}"),
            GameWindow::Season => "Season".to_string(),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::PRESETS.iter().position(|w| *w == self);
        match idx {
            Some(i) => Self::PRESETS[(i + 1) % Self::PRESETS.len()],
            None => GameWindow::Season,
        }
    }

    fn apply<'a>(&self, logs: Vec<&'a GameLogEntry>) -> Vec<&'a GameLogEntry> {
        match self {
            GameWindow::Season => logs,
            GameWindow::Last(n) => {
                let skip = logs.len().saturating_sub(*n);
                logs.into_iter().skip(skip).collect()
            }
        }
    }
}

/// Per-game statistics that can be charted against a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatKey {
    #[default]
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    FieldGoalsMade,
    FieldGoalsAttempted,
    ThreesMade,
    ThreesAttempted,
    FreeThrowsMade,
    FreeThrowsAttempted,
    OffensiveRebounds,
    DefensiveRebounds,
    PointsReboundsAssists,
    PointsRebounds,
    PointsAssists,
    ReboundsAssists,
    Fantasy,
}

impl StatKey {
    pub const ALL: [StatKey; 19] = [
        StatKey::Points,
        StatKey::Rebounds,
        StatKey::Assists,
        StatKey::Steals,
        StatKey::Blocks,
        StatKey::Turnovers,
        StatKey::FieldGoalsMade,
        StatKey::FieldGoalsAttempted,
        StatKey::ThreesMade,
        StatKey::ThreesAttempted,
        StatKey::FreeThrowsMade,
        StatKey::FreeThrowsAttempted,
        StatKey::OffensiveRebounds,
        StatKey::DefensiveRebounds,
        StatKey::PointsReboundsAssists,
        StatKey::PointsRebounds,
        StatKey::PointsAssists,
        StatKey::ReboundsAssists,
        StatKey::Fantasy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Points => "Points",
            StatKey::Rebounds => "Rebounds",
            StatKey::Assists => "Assists",
            StatKey::Steals => "Steals",
            StatKey::Blocks => "Blocks",
            StatKey::Turnovers => "Turnovers",
            StatKey::FieldGoalsMade => "FG Made",
            StatKey::FieldGoalsAttempted => "FG Attempted",
            StatKey::ThreesMade => "3PT Made",
            StatKey::ThreesAttempted => "3PT Attempted",
            StatKey::FreeThrowsMade => "FT Made",
            StatKey::FreeThrowsAttempted => "FT Attempted",
            StatKey::OffensiveRebounds => "Off. Rebounds",
            StatKey::DefensiveRebounds => "Def. Rebounds",
            StatKey::PointsReboundsAssists => "Pts+Reb+Ast",
            StatKey::PointsRebounds => "Pts+Reb",
            StatKey::PointsAssists => "Pts+Ast",
            StatKey::ReboundsAssists => "Reb+Ast",
            StatKey::Fantasy => "Fantasy",
        }
    }

    pub fn value(&self, g: &GameLogEntry) -> f64 {
        match self {
            StatKey::Points => g.pts,
            StatKey::Rebounds => g.reb,
            StatKey::Assists => g.ast,
            StatKey::Steals => g.stl,
            StatKey::Blocks => g.blk,
            StatKey::Turnovers => g.tov,
            StatKey::FieldGoalsMade => g.fg_made,
            StatKey::FieldGoalsAttempted => g.fg_att,
            StatKey::ThreesMade => g.fg3_made,
            StatKey::ThreesAttempted => g.fg3_att,
            StatKey::FreeThrowsMade => g.ft_made,
            StatKey::FreeThrowsAttempted => g.ft_att,
            StatKey::OffensiveRebounds => g.oreb,
            StatKey::DefensiveRebounds => g.dreb,
            StatKey::PointsReboundsAssists => g.pra,
            StatKey::PointsRebounds => g.pr,
            StatKey::PointsAssists => g.pa,
            StatKey::ReboundsAssists => g.ra,
            StatKey::Fantasy => g.fantasy,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    With,
    Without,
}

/// Restricts the log to games a teammate did or did not appear in.
#[derive(Debug, Clone, PartialEq)]
pub struct TeammateFilter {
    pub presence: Presence,
    pub game_ids: HashSet<String>,
}

impl TeammateFilter {
    pub fn from_logs(presence: Presence, teammate_logs: &[GameLogEntry]) -> Self {
        TeammateFilter {
            presence,
            game_ids: teammate_logs.iter().map(|g| g.game_id.clone()).collect(),
        }
    }

    fn accepts(&self, g: &GameLogEntry) -> bool {
        let played = self.game_ids.contains(&g.game_id);
        match self.presence {
            Presence::With => played,
            Presence::Without => !played,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartCriteria {
    pub opponent: Option<String>,
    pub min_minutes: Option<f64>,
    pub outcome: Option<Outcome>,
    pub teammate: Option<TeammateFilter>,
    pub window: GameWindow,
    pub stat: StatKey,
    pub threshold: f64,
}

impl Default for ChartCriteria {
    fn default() -> Self {
        ChartCriteria {
            opponent: None,
            min_minutes: None,
            outcome: None,
            teammate: None,
            window: GameWindow::default(),
            stat: StatKey::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ChartCriteria {
    fn accepts(&self, g: &GameLogEntry) -> bool {
        let opponent_ok = self.opponent.as_deref().is_none_or(|o| g.opponent == o);
        // A floor of zero behaves like no floor.
        let minutes_ok = match self.min_minutes {
            Some(m) if m > 0.0 => g.minutes >= m,
            _ => true,
        };
        let outcome_ok = self.outcome.is_none_or(|o| g.outcome == Some(o));
        let teammate_ok = self.teammate.as_ref().is_none_or(|t| t.accepts(g));
        opponent_ok && minutes_ok && outcome_ok && teammate_ok
    }
}

/// Entries passing every set predicate, trimmed to the trailing window.
/// Chronological order is preserved.
pub fn filtered_logs<'a>(logs: &'a [GameLogEntry], criteria: &ChartCriteria) -> Vec<&'a GameLogEntry> {
    let passing: Vec<&GameLogEntry> = logs.iter().filter(|g| criteria.accepts(g)).collect();
    criteria.window.apply(passing)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Below,
    Equal,
    Above,
}

pub fn classify(value: f64, threshold: f64) -> Bucket {
    if value > threshold {
        Bucket::Above
    } else if value < threshold {
        Bucket::Below
    } else {
        Bucket::Equal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub game_date: String,
    pub opponent: String,
    pub value: f64,
    pub bucket: Bucket,
}

pub fn chart_bars(logs: &[&GameLogEntry], stat: StatKey, threshold: f64) -> Vec<ChartBar> {
    logs.iter()
        .map(|g| {
            let value = stat.value(g);
            ChartBar {
                game_date: g.game_date.clone(),
                opponent: g.opponent.clone(),
                value,
                bucket: classify(value, threshold),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdSummary {
    pub above: usize,
    pub equal: usize,
    pub below: usize,
    pub percent_over: f64,
}

impl ThresholdSummary {
    pub fn total(&self) -> usize {
        self.above + self.equal + self.below
    }
}

pub fn summarize(bars: &[ChartBar]) -> ThresholdSummary {
    let mut summary = ThresholdSummary::default();
    for bar in bars {
        match bar.bucket {
            Bucket::Above => summary.above += 1,
            Bucket::Equal => summary.equal += 1,
            Bucket::Below => summary.below += 1,
        }
    }
    if !bars.is_empty() {
        summary.percent_over = summary.above as f64 * 100.0 / bars.len() as f64;
    }
    summary
}

/// Distinct opponent codes in the log, sorted.
pub fn opponents(logs: &[GameLogEntry]) -> Vec<String> {
    logs.iter()
        .map(|g| g.opponent.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, opp: &str, pts: f64) -> GameLogEntry {
        GameLogEntry {
            game_id: id.into(),
            game_date: format!("2025-01-{id:0>2}"),
            opponent: opp.into(),
            pts,
            minutes: 30.0,
            outcome: Some(Outcome::Win),
            ..Default::default()
        }
    }

    fn season() -> Vec<GameLogEntry> {
        let mut logs = vec![
            game("1", "BOS", 12.0),
            game("2", "NYK", 25.0),
            game("3", "BOS", 17.5),
            game("4", "MIA", 31.0),
            game("5", "NYK", 8.0),
        ];
        logs[1].outcome = Some(Outcome::Loss);
        logs[4].outcome = Some(Outcome::Loss);
        logs[2].minutes = 22.0;
        logs[4].minutes = 0.0;
        logs
    }

    fn ids(logs: &[&GameLogEntry]) -> Vec<String> {
        logs.iter().map(|g| g.game_id.clone()).collect()
    }

    #[test]
    fn threshold_example_counts_and_percent() {
        let logs: Vec<GameLogEntry> = [10.0, 15.0, 20.0, 25.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, pts)| game(&(i + 1).to_string(), "BOS", *pts))
            .collect();
        let criteria = ChartCriteria {
            threshold: 20.0,
            ..Default::default()
        };
        let window = filtered_logs(&logs, &criteria);
        let bars = chart_bars(&window, criteria.stat, criteria.threshold);
        let buckets: Vec<Bucket> = bars.iter().map(|b| b.bucket).collect();
        assert_eq!(
            buckets,
            [Bucket::Below, Bucket::Below, Bucket::Equal, Bucket::Above, Bucket::Above]
        );
        let summary = summarize(&bars);
        assert_eq!((summary.above, summary.equal, summary.below), (2, 1, 2));
        assert_eq!(summary.percent_over, 40.0);
    }

    #[test]
    fn buckets_partition_the_window() {
        for threshold in [0.0, 12.0, 17.5, 20.0, 100.0] {
            let logs = season();
            let window = filtered_logs(&logs, &ChartCriteria::default());
            let summary = summarize(&chart_bars(&window, StatKey::Points, threshold));
            assert_eq!(summary.total(), window.len());
        }
    }

    #[test]
    fn empty_window_reports_zero_percent() {
        let summary = summarize(&chart_bars(&[], StatKey::Points, 10.0));
        assert_eq!(summary, ThresholdSummary::default());
        assert_eq!(summary.percent_over, 0.0);
    }

    #[test]
    fn unset_criteria_pass_everything() {
        let logs = season();
        let out = filtered_logs(
            &logs,
            &ChartCriteria {
                window: GameWindow::Season,
                ..Default::default()
            },
        );
        assert_eq!(ids(&out), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn predicates_combine() {
        let logs = season();
        let by_opp = filtered_logs(
            &logs,
            &ChartCriteria {
                opponent: Some("NYK".into()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&by_opp), ["2", "5"]);

        let losses_with_minutes = filtered_logs(
            &logs,
            &ChartCriteria {
                outcome: Some(Outcome::Loss),
                min_minutes: Some(24.0),
                ..Default::default()
            },
        );
        assert_eq!(ids(&losses_with_minutes), ["2"]);
    }

    #[test]
    fn zero_minute_floor_is_ignored() {
        let logs = season();
        let out = filtered_logs(
            &logs,
            &ChartCriteria {
                min_minutes: Some(0.0),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), logs.len());
    }

    #[test]
    fn window_keeps_trailing_entries_after_filtering() {
        let logs = season();
        let out = filtered_logs(
            &logs,
            &ChartCriteria {
                window: GameWindow::Last(2),
                opponent: Some("BOS".into()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&out), ["1", "3"]);

        let out = filtered_logs(
            &logs,
            &ChartCriteria {
                window: GameWindow::Last(2),
                ..Default::default()
            },
        );
        assert_eq!(ids(&out), ["4", "5"]);
    }

    #[test]
    fn with_and_without_teammate_partition_the_season() {
        let logs = season();
        let teammate = vec![game("2", "NYK", 4.0), game("4", "MIA", 9.0), game("99", "LAL", 1.0)];
        let pick = |presence| {
            filtered_logs(
                &logs,
                &ChartCriteria {
                    window: GameWindow::Season,
                    teammate: Some(TeammateFilter::from_logs(presence, &teammate)),
                    ..Default::default()
                },
            )
        };
        let with = ids(&pick(Presence::With));
        let without = ids(&pick(Presence::Without));
        assert_eq!(with, ["2", "4"]);
        assert_eq!(without, ["1", "3", "5"]);
        assert_eq!(with.len() + without.len(), logs.len());
    }

    #[test]
    fn composite_stats_read_their_fields() {
        let g = GameLogEntry {
            pra: 40.0,
            fantasy: 51.5,
            fg3_att: 9.0,
            ..Default::default()
        };
        assert_eq!(StatKey::PointsReboundsAssists.value(&g), 40.0);
        assert_eq!(StatKey::Fantasy.value(&g), 51.5);
        assert_eq!(StatKey::ThreesAttempted.value(&g), 9.0);
        assert_eq!(StatKey::Points.prev(), StatKey::Fantasy);
        assert_eq!(StatKey::Fantasy.next(), StatKey::Points);
    }

    #[test]
    fn opponents_are_distinct_and_sorted() {
        assert_eq!(opponents(&season()), ["BOS", "MIA", "NYK"]);
        assert!(opponents(&[]).is_empty());
    }

    #[test]
    fn window_presets_cycle() {
        assert_eq!(GameWindow::default(), GameWindow::Last(30));
        assert_eq!(GameWindow::Last(5).next(), GameWindow::Season);
        assert_eq!(GameWindow::Season.next(), GameWindow::Last(30));
        assert_eq!(GameWindow::Last(7).next(), GameWindow::Season);
    }
}
