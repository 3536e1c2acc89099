//! Filter and sort pipeline for the player directory and the standings.
//!
//! Every function here is a pure function of (collection, query): the input
//! slice is never mutated and the same query applied twice yields the same
//! output. Absent numeric fields sort as zero.

use crate::{Conference, Player, Team, last_token};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Columns the player directory can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerSort {
    #[default]
    LastName,
    Position,
    JerseyNumber,
    Scoring,
    Playmaking,
    Rebounding,
    Defense,
    Athleticism,
    Points,
    Rebounds,
    Assists,
}

impl PlayerSort {
    pub const ALL: [PlayerSort; 11] = [
        PlayerSort::LastName,
        PlayerSort::Position,
        PlayerSort::JerseyNumber,
        PlayerSort::Scoring,
        PlayerSort::Playmaking,
        PlayerSort::Rebounding,
        PlayerSort::Defense,
        PlayerSort::Athleticism,
        PlayerSort::Points,
        PlayerSort::Rebounds,
        PlayerSort::Assists,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlayerSort::LastName => "Player",
            PlayerSort::Position => "Pos",
            PlayerSort::JerseyNumber => "#",
            PlayerSort::Scoring => "Scoring",
            PlayerSort::Playmaking => "Playmaking",
            PlayerSort::Rebounding => "Rebounding",
            PlayerSort::Defense => "Defense",
            PlayerSort::Athleticism => "Athleticism",
            PlayerSort::Points => "PTS",
            PlayerSort::Rebounds => "REB",
            PlayerSort::Assists => "AST",
        }
    }

    /// Direction applied when the column is first selected: best-first for
    /// grades and stats, alphabetical/numeric otherwise.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            PlayerSort::LastName | PlayerSort::Position | PlayerSort::JerseyNumber => {
                SortDirection::Ascending
            }
            _ => SortDirection::Descending,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn numeric(&self, p: &Player) -> Option<f64> {
        match self {
            PlayerSort::JerseyNumber => Some(p.jersey()),
            PlayerSort::Scoring => p.grades.scoring,
            PlayerSort::Playmaking => p.grades.playmaking,
            PlayerSort::Rebounding => p.grades.rebounding,
            PlayerSort::Defense => p.grades.defense,
            PlayerSort::Athleticism => p.grades.athleticism,
            PlayerSort::Points => p.season.points,
            PlayerSort::Rebounds => p.season.rebounds,
            PlayerSort::Assists => p.season.assists,
            PlayerSort::LastName | PlayerSort::Position => None,
        }
    }

    fn compare(&self, a: &Player, b: &Player) -> Ordering {
        match self {
            PlayerSort::LastName => compare_text(a.last_name(), b.last_name()),
            PlayerSort::Position => compare_text(&a.position, &b.position),
            _ => compare_numbers(self.numeric(a), self.numeric(b)),
        }
    }
}

/// Search and category selections for the player directory. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerQuery {
    pub search: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub archetype: Option<String>,
    pub sort: PlayerSort,
    pub direction: SortDirection,
}

impl PlayerQuery {
    /// Select a sort column the way a header click does: the same column
    /// flips direction, a new column starts at its default direction.
    pub fn toggle_sort(&mut self, sort: PlayerSort) {
        if self.sort == sort {
            self.direction = self.direction.reverse();
        } else {
            self.sort = sort;
            self.direction = sort.default_direction();
        }
    }

    fn matches(&self, p: &Player) -> bool {
        contains_ignore_case(&p.name, &self.search)
            && category_matches(self.team.as_deref(), Some(p.team_name.as_str()))
            && category_matches(self.position.as_deref(), Some(p.position.as_str()))
            && category_matches(self.archetype.as_deref(), p.archetype.as_deref())
    }
}

pub fn filter_players(players: &[Player], query: &PlayerQuery) -> Vec<Player> {
    let mut out: Vec<Player> = players.iter().filter(|p| query.matches(p)).cloned().collect();
    // sort_by is stable: ties keep input order in both directions.
    out.sort_by(|a, b| query.direction.apply(query.sort.compare(a, b)));
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamSort {
    Name,
    #[default]
    PlayoffRank,
    Record,
}

impl TeamSort {
    pub fn label(&self) -> &'static str {
        match self {
            TeamSort::Name => "Team",
            TeamSort::PlayoffRank => "Rank",
            TeamSort::Record => "Record",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TeamSort::PlayoffRank => TeamSort::Record,
            TeamSort::Record => TeamSort::Name,
            TeamSort::Name => TeamSort::PlayoffRank,
        }
    }

    fn compare(&self, a: &Team, b: &Team) -> Ordering {
        match self {
            TeamSort::Name => compare_text(last_token(&a.name), last_token(&b.name)),
            TeamSort::PlayoffRank => compare_numbers(
                a.playoff_rank.map(f64::from),
                b.playoff_rank.map(f64::from),
            ),
            TeamSort::Record => a.record.unwrap_or_default().cmp(&b.record.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamQuery {
    pub search: String,
    pub conference: Option<Conference>,
    pub sort: TeamSort,
    pub direction: SortDirection,
}

impl TeamQuery {
    fn matches(&self, t: &Team) -> bool {
        contains_ignore_case(&t.name, &self.search)
            && self.conference.is_none_or(|c| t.conference == Some(c))
    }
}

pub fn filter_teams(teams: &[Team], query: &TeamQuery) -> Vec<Team> {
    let mut out: Vec<Team> = teams.iter().filter(|t| query.matches(t)).cloned().collect();
    out.sort_by(|a, b| query.direction.apply(query.sort.compare(a, b)));
    out
}

/// Conference tables, each ordered by playoff rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    pub east: Vec<Team>,
    pub west: Vec<Team>,
}

impl Standings {
    pub fn is_empty(&self) -> bool {
        self.east.is_empty() && self.west.is_empty()
    }
}

pub fn standings(teams: &[Team], search: &str) -> Standings {
    let table = |conference| {
        filter_teams(
            teams,
            &TeamQuery {
                search: search.to_owned(),
                conference: Some(conference),
                sort: TeamSort::PlayoffRank,
                direction: SortDirection::Ascending,
            },
        )
    };
    Standings {
        east: table(Conference::East),
        west: table(Conference::West),
    }
}

/// Values offered by the directory's category pickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub teams: Vec<String>,
    pub positions: Vec<String>,
    pub archetypes: Vec<String>,
}

pub fn filter_options(players: &[Player]) -> FilterOptions {
    let distinct = |values: Vec<&str>| -> Vec<String> {
        values
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };
    FilterOptions {
        teams: distinct(players.iter().map(|p| p.team_name.as_str()).collect()),
        positions: distinct(players.iter().map(|p| p.position.as_str()).collect()),
        archetypes: distinct(players.iter().filter_map(|p| p.archetype.as_deref()).collect()),
    }
}

/// Season-average categories shown as league leaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderStat {
    Points,
    Rebounds,
    Assists,
}

impl LeaderStat {
    pub fn label(&self) -> &'static str {
        match self {
            LeaderStat::Points => "Points",
            LeaderStat::Rebounds => "Rebounds",
            LeaderStat::Assists => "Assists",
        }
    }

    pub fn value(&self, p: &Player) -> Option<f64> {
        match self {
            LeaderStat::Points => p.season.points,
            LeaderStat::Rebounds => p.season.rebounds,
            LeaderStat::Assists => p.season.assists,
        }
    }
}

/// Top `n` players by a season average. Players without the stat are left out
/// rather than counted as zero.
pub fn league_leaders(players: &[Player], stat: LeaderStat, n: usize) -> Vec<Player> {
    let mut ranked: Vec<&Player> = players.iter().filter(|p| stat.value(p).is_some()).collect();
    ranked.sort_by(|a, b| compare_numbers(stat.value(b), stat.value(a)));
    ranked.into_iter().take(n).cloned().collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn category_matches(selected: Option<&str>, value: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(s) => value == Some(s),
    }
}

/// Case-insensitive first, then byte order so the result is a total order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or_default().total_cmp(&b.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grades, Record, SeasonAverages};

    fn player(name: &str, pts: Option<f64>) -> Player {
        Player {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.into(),
            season: SeasonAverages {
                points: pts,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn roster() -> Vec<Player> {
        vec![
            Player {
                id: "1".into(),
                name: "Jayson Tatum".into(),
                position: "F".into(),
                jersey_number: "0".into(),
                team_name: "Boston Celtics".into(),
                archetype: Some("Shot Creator".into()),
                grades: Grades {
                    scoring: Some(90.0),
                    defense: Some(70.0),
                    ..Default::default()
                },
                ..Default::default()
            },
            Player {
                id: "2".into(),
                name: "Jrue Holiday".into(),
                position: "G".into(),
                jersey_number: "4".into(),
                team_name: "Boston Celtics".into(),
                archetype: Some("Two-Way Guard".into()),
                grades: Grades {
                    scoring: Some(60.0),
                    defense: Some(88.0),
                    ..Default::default()
                },
                ..Default::default()
            },
            Player {
                id: "3".into(),
                name: "Anthony Davis".into(),
                position: "F-C".into(),
                jersey_number: "3".into(),
                team_name: "Dallas Mavericks".into(),
                archetype: None,
                grades: Grades::default(),
                ..Default::default()
            },
            Player {
                id: "4".into(),
                name: "Kyrie Irving".into(),
                position: "G".into(),
                jersey_number: "11".into(),
                team_name: "Dallas Mavericks".into(),
                archetype: Some("Shot Creator".into()),
                grades: Grades {
                    scoring: Some(85.0),
                    ..Default::default()
                },
                ..Default::default()
            },
        ]
    }

    fn names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn last_name_and_points_examples() {
        let players = vec![player("Bob Smith", Some(10.0)), player("Al Jones", Some(20.0))];

        let by_name = filter_players(&players, &PlayerQuery::default());
        assert_eq!(names(&by_name), ["Al Jones", "Bob Smith"]);

        let by_points = filter_players(
            &players,
            &PlayerQuery {
                sort: PlayerSort::Points,
                direction: SortDirection::Descending,
                ..Default::default()
            },
        );
        assert_eq!(names(&by_points), ["Al Jones", "Bob Smith"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = PlayerQuery {
            search: "  IRV ".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter_players(&roster(), &query)), ["Kyrie Irving"]);
    }

    #[test]
    fn category_filters_are_anded() {
        let query = PlayerQuery {
            team: Some("Boston Celtics".into()),
            position: Some("G".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_players(&roster(), &query)), ["Jrue Holiday"]);

        let query = PlayerQuery {
            archetype: Some("Shot Creator".into()),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_players(&roster(), &query)),
            ["Kyrie Irving", "Jayson Tatum"]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let query = PlayerQuery {
            search: "a".into(),
            sort: PlayerSort::Defense,
            direction: SortDirection::Descending,
            ..Default::default()
        };
        let once = filter_players(&roster(), &query);
        let twice = filter_players(&once, &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn flipping_direction_reverses_distinct_keys() {
        for sort in [PlayerSort::LastName, PlayerSort::JerseyNumber, PlayerSort::Scoring] {
            let asc = filter_players(
                &roster(),
                &PlayerQuery {
                    sort,
                    direction: SortDirection::Ascending,
                    ..Default::default()
                },
            );
            let mut desc = filter_players(
                &roster(),
                &PlayerQuery {
                    sort,
                    direction: SortDirection::Descending,
                    ..Default::default()
                },
            );
            desc.reverse();
            assert_eq!(asc, desc, "sort {sort:?}");
        }
    }

    #[test]
    fn ties_keep_input_order_both_ways() {
        let players = vec![
            player("A One", None),
            player("B Two", Some(0.0)),
            player("C Three", None),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let out = filter_players(
                &players,
                &PlayerQuery {
                    sort: PlayerSort::Points,
                    direction,
                    ..Default::default()
                },
            );
            assert_eq!(names(&out), ["A One", "B Two", "C Three"]);
        }
    }

    #[test]
    fn missing_grades_sort_as_zero() {
        let out = filter_players(
            &roster(),
            &PlayerQuery {
                sort: PlayerSort::Scoring,
                direction: SortDirection::Ascending,
                ..Default::default()
            },
        );
        assert_eq!(out[0].name, "Anthony Davis");
        assert_eq!(out.last().map(|p| p.name.as_str()), Some("Jayson Tatum"));
    }

    #[test]
    fn jersey_sort_is_numeric() {
        let out = filter_players(
            &roster(),
            &PlayerQuery {
                sort: PlayerSort::JerseyNumber,
                ..Default::default()
            },
        );
        let jerseys: Vec<&str> = out.iter().map(|p| p.jersey_number.as_str()).collect();
        assert_eq!(jerseys, ["0", "3", "4", "11"]);
    }

    #[test]
    fn toggle_sort_flips_then_resets() {
        let mut query = PlayerQuery::default();
        query.toggle_sort(PlayerSort::LastName);
        assert_eq!(query.direction, SortDirection::Descending);
        query.toggle_sort(PlayerSort::Scoring);
        assert_eq!(query.sort, PlayerSort::Scoring);
        assert_eq!(query.direction, SortDirection::Descending);
        query.toggle_sort(PlayerSort::Scoring);
        assert_eq!(query.direction, SortDirection::Ascending);
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(filter_players(&[], &PlayerQuery::default()).is_empty());
        assert!(filter_teams(&[], &TeamQuery::default()).is_empty());
        assert!(standings(&[], "").is_empty());
        assert_eq!(filter_options(&[]), FilterOptions::default());
    }

    fn teams() -> Vec<Team> {
        let team = |id: &str, name: &str, conf, rank: Option<u32>, rec: Option<(u32, u32)>| Team {
            id: id.into(),
            name: name.into(),
            conference: Some(conf),
            playoff_rank: rank,
            record: rec.map(|(wins, losses)| Record { wins, losses }),
            ..Default::default()
        };
        vec![
            team("1", "New York Knicks", Conference::East, Some(3), Some((51, 31))),
            team("2", "Boston Celtics", Conference::East, Some(2), Some((61, 21))),
            team("3", "Cleveland Cavaliers", Conference::East, Some(1), Some((64, 18))),
            team("4", "Denver Nuggets", Conference::West, Some(4), Some((50, 32))),
            team("5", "Oklahoma City Thunder", Conference::West, Some(1), Some((68, 14))),
            team("6", "Houston Rockets", Conference::West, None, None),
        ]
    }

    #[test]
    fn standings_split_by_conference_in_rank_order() {
        let table = standings(&teams(), "");
        assert_eq!(
            names_of(&table.east),
            ["Cleveland Cavaliers", "Boston Celtics", "New York Knicks"]
        );
        // Unranked team sorts as rank zero.
        assert_eq!(
            names_of(&table.west),
            ["Houston Rockets", "Oklahoma City Thunder", "Denver Nuggets"]
        );

        let searched = standings(&teams(), "ck");
        assert_eq!(names_of(&searched.east), ["New York Knicks"]);
        assert_eq!(names_of(&searched.west), ["Houston Rockets"]);
    }

    #[test]
    fn record_sort_uses_wins_then_losses() {
        let mut list = teams();
        list.push(Team {
            id: "7".into(),
            name: "Twin Record Club".into(),
            record: Some(Record { wins: 50, losses: 30 }),
            ..Default::default()
        });
        let out = filter_teams(
            &list,
            &TeamQuery {
                sort: TeamSort::Record,
                direction: SortDirection::Descending,
                ..Default::default()
            },
        );
        assert_eq!(
            names_of(&out),
            [
                "Oklahoma City Thunder",
                "Cleveland Cavaliers",
                "Boston Celtics",
                "New York Knicks",
                "Denver Nuggets",
                "Twin Record Club",
                "Houston Rockets",
            ]
        );
    }

    #[test]
    fn team_name_sort_uses_nickname() {
        let out = filter_teams(
            &teams(),
            &TeamQuery {
                sort: TeamSort::Name,
                ..Default::default()
            },
        );
        assert_eq!(out[0].name, "Cleveland Cavaliers");
        assert_eq!(out[1].name, "Boston Celtics");
    }

    fn names_of(teams: &[Team]) -> Vec<&str> {
        teams.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn options_are_sorted_and_deduped() {
        let opts = filter_options(&roster());
        assert_eq!(opts.teams, ["Boston Celtics", "Dallas Mavericks"]);
        assert_eq!(opts.positions, ["F", "F-C", "G"]);
        assert_eq!(opts.archetypes, ["Shot Creator", "Two-Way Guard"]);
    }

    #[test]
    fn leaders_skip_missing_stats() {
        let players = vec![
            player("A Low", Some(10.0)),
            player("B None", None),
            player("C High", Some(30.0)),
            player("D Mid", Some(20.0)),
        ];
        let top = league_leaders(&players, LeaderStat::Points, 3);
        assert_eq!(names(&top), ["C High", "D Mid", "A Low"]);
        assert_eq!(league_leaders(&players, LeaderStat::Assists, 3).len(), 0);
    }
}
