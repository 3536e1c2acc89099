use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{
    Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Row, Table, TableState, Tabs,
};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::state::app_state::{InputMode, ProfileState};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nba_api::chart::{Bucket, Presence};
use nba_api::listing::{LeaderStat, PlayerSort, league_leaders};
use nba_api::{Game, GameStatus, GradeTier, Grades, Player, RosterPlayer, Team};

static TABS: &[&str; 5] = &["Games", "Standings", "Players", "Profile", "Team"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Games => draw_games(f, layout.main, app),
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Players => draw_players(f, layout.main, app),
            MenuItem::Profile => draw_profile(f, layout.main, app),
            MenuItem::TeamProfile => draw_team_profile(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Games => 0,
        MenuItem::Standings => 1,
        MenuItem::Players => 2,
        MenuItem::Profile => 3,
        MenuItem::TeamProfile => 4,
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

/// Centered gray message, or the last error if there is one and no data to show.
fn draw_empty(f: &mut Frame, area: Rect, app: &App, waiting: &str) {
    let msg = match app.state.last_error.as_deref() {
        Some(err) => format!("Load failed:\n{err}"),
        None => waiting.to_string(),
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn fmt_stat(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(fmt_stat).unwrap_or_else(|| "-".to_string())
}

fn tier_color(tier: GradeTier) -> Color {
    match tier {
        GradeTier::Poor => Color::Red,
        GradeTier::Average => Color::Yellow,
        GradeTier::Good => Color::Green,
        GradeTier::Elite => Color::Blue,
    }
}

fn grade_cell(v: Option<f64>) -> Span<'static> {
    match v {
        Some(g) => Span::styled(fmt_stat(g), Style::default().fg(tier_color(GradeTier::from_grade(g)))),
        None => Span::styled("-", Style::default().fg(Color::DarkGray)),
    }
}

fn header_row<'a>(cells: Vec<String>) -> Row<'a> {
    Row::new(cells).style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
}

fn highlight_style() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

fn key_legend(f: &mut Frame, area: Rect, text: &str) {
    f.render_widget(Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray)), area);
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

fn draw_games(f: &mut Frame, area: Rect, app: &App) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);
    let [games_area, leaders_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(7)]).areas(left);

    draw_scoreboard(f, games_area, app);
    draw_leaders(f, leaders_area, app);
    draw_matchup(f, right, app);
}

fn game_status(game: &Game) -> Span<'static> {
    match game.status {
        GameStatus::Live => Span::styled(game.status_text.clone(), Style::default().fg(Color::Green)),
        GameStatus::Final => Span::styled("Final", Style::default().fg(Color::Gray)),
        GameStatus::Scheduled => {
            let label = game
                .start_time
                .map(|t| t.with_timezone(&chrono::Local).format("%-I:%M %p").to_string())
                .unwrap_or_else(|| game.status_text.clone());
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    }
}

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App) {
    let games = &app.state.games;
    let title = match games.updated_at {
        Some(t) => format!(" Today's Games ({}) ", t.format("%H:%M:%S")),
        None => " Today's Games ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if games.games.is_empty() {
        let waiting = if games.updated_at.is_some() { "No games today" } else { "Loading games..." };
        draw_empty(f, inner, app, waiting);
        return;
    }

    let [legend, list] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    key_legend(f, legend, "j/k=move  Enter=rosters  R=refresh");

    let lines: Vec<Line> = games
        .games
        .iter()
        .enumerate()
        .map(|(idx, g)| {
            let selected = idx == games.selected;
            let marker = if selected { '>' } else { ' ' };
            let score = if g.status == GameStatus::Scheduled {
                format!("{} @ {}", g.away.team_name, g.home.team_name)
            } else {
                format!(
                    "{} {} @ {} {}",
                    g.away.team_name, g.away.score, g.home.team_name, g.home.score
                )
            };
            let style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!("{marker} {score}  "), style),
                game_status(g),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list);
}

fn draw_leaders(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" League Leaders ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let players = &app.state.players.all;
    if players.is_empty() {
        draw_empty(f, inner, app, "Loading players...");
        return;
    }

    let columns: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(inner);
    for (stat, col) in [LeaderStat::Points, LeaderStat::Rebounds, LeaderStat::Assists]
        .into_iter()
        .zip(columns)
    {
        let mut lines = vec![Line::from(Span::styled(
            stat.label(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        ))];
        for p in league_leaders(players, stat, 3) {
            lines.push(Line::from(format!("{} {}", fmt_opt(stat.value(&p)), p.last_name())));
        }
        f.render_widget(Paragraph::new(lines), col);
    }
}

fn draw_matchup(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Matchup ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(matchup) = app.state.games.matchup.as_ref() else {
        draw_empty(f, inner, app, "Press Enter on a game to load rosters");
        return;
    };
    if matchup.is_empty() {
        draw_empty(f, inner, app, "Rosters not available for this game");
        return;
    }

    let [away, home] = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);
    draw_roster(f, away, "Away", &matchup.away);
    draw_roster(f, home, "Home", &matchup.home);
}

fn draw_roster(f: &mut Frame, area: Rect, side: &str, roster: &[RosterPlayer]) {
    let team = roster.first().map(|p| p.team_name.as_str()).unwrap_or(side);
    let rows: Vec<Row> = roster
        .iter()
        .map(|p| {
            let grades = p.grades.unwrap_or_default();
            let mut cells = vec![
                Span::raw(p.jersey_number.clone()),
                Span::raw(p.name.clone()),
                Span::raw(p.position.clone()),
            ];
            cells.extend(grades.iter().map(|(_, v)| grade_cell(v)));
            Row::new(cells)
        })
        .collect();
    let widths = [
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
    ];
    let header = ["#", "Player", "Pos", "SCO", "PLY", "REB", "DEF", "ATH"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let table = Table::new(rows, widths)
        .header(header_row(header))
        .block(default_border(Color::DarkGray).title(format!(" {team} ")));
    f.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

fn search_line(label: &str, text: &str, editing: bool) -> Line<'static> {
    let cursor = if editing { "_" } else { "" };
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(format!("{text}{cursor}"), style),
    ])
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let standings = &app.state.standings;
    if standings.teams.is_empty() {
        draw_empty(f, inner, app, "Loading standings...");
        return;
    }

    let [search, legend, tables] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let editing = app.state.input_mode == InputMode::Search;
    f.render_widget(Paragraph::new(search_line("Search", &standings.search, editing)), search);
    key_legend(f, legend, "/=search  j/k=move  Enter=team page  R=refresh");

    let view = standings.view();
    let [east, west] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(tables);
    let east_len = view.east.len();
    let (east_sel, west_sel) = if standings.selected < east_len {
        (Some(standings.selected), None)
    } else {
        (None, Some(standings.selected - east_len))
    };
    draw_conference(f, east, "Eastern Conference", &view.east, east_sel);
    draw_conference(f, west, "Western Conference", &view.west, west_sel);
}

fn draw_conference(f: &mut Frame, area: Rect, title: &str, teams: &[Team], selected: Option<usize>) {
    let rows: Vec<Row> = teams
        .iter()
        .map(|t| {
            Row::new(vec![
                t.playoff_rank.map(|r| r.to_string()).unwrap_or_else(|| "-".into()),
                t.name.clone(),
                t.record.map(|r| r.to_string()).unwrap_or_else(|| "-".into()),
                t.head_coach.clone().unwrap_or_default(),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Length(7),
        Constraint::Fill(1),
    ];
    let header = ["Rk", "Team", "W-L", "Coach"].iter().map(|s| s.to_string()).collect();
    let table = Table::new(rows, widths)
        .header(header_row(header))
        .row_highlight_style(highlight_style())
        .block(default_border(Color::DarkGray).title(format!(" {title} ")));
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

// ---------------------------------------------------------------------------
// Player directory
// ---------------------------------------------------------------------------

const PLAYER_COLUMNS: [(PlayerSort, &str, Constraint); 11] = [
    (PlayerSort::LastName, "Player", Constraint::Fill(2)),
    (PlayerSort::Position, "Pos", Constraint::Length(5)),
    (PlayerSort::JerseyNumber, "#", Constraint::Length(4)),
    (PlayerSort::Points, "PTS", Constraint::Length(6)),
    (PlayerSort::Rebounds, "REB", Constraint::Length(6)),
    (PlayerSort::Assists, "AST", Constraint::Length(6)),
    (PlayerSort::Scoring, "SCO", Constraint::Length(5)),
    (PlayerSort::Playmaking, "PLY", Constraint::Length(5)),
    (PlayerSort::Rebounding, "RBD", Constraint::Length(5)),
    (PlayerSort::Defense, "DEF", Constraint::Length(5)),
    (PlayerSort::Athleticism, "ATH", Constraint::Length(5)),
];

fn player_row(p: &Player) -> Row<'static> {
    let g: Grades = p.grades;
    Row::new(vec![
        Span::raw(format!("{} ({})", p.name, p.team_name)),
        Span::raw(p.position.clone()),
        Span::raw(p.jersey_number.clone()),
        Span::raw(fmt_opt(p.season.points)),
        Span::raw(fmt_opt(p.season.rebounds)),
        Span::raw(fmt_opt(p.season.assists)),
        grade_cell(g.scoring),
        grade_cell(g.playmaking),
        grade_cell(g.rebounding),
        grade_cell(g.defense),
        grade_cell(g.athleticism),
    ])
}

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Players ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let players = &app.state.players;
    if players.all.is_empty() {
        draw_empty(f, inner, app, "Loading players...");
        return;
    }

    let [search, filters, legend, table_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let query = &players.query;
    let editing = app.state.input_mode == InputMode::Search;
    f.render_widget(Paragraph::new(search_line("Search", &query.search, editing)), search);

    let all = |v: &Option<String>| v.clone().unwrap_or_else(|| "All".to_string());
    f.render_widget(
        Paragraph::new(format!(
            "Team: {}  Pos: {}  Type: {}  Sort: {} {}  ({} of {})",
            all(&query.team),
            all(&query.position),
            all(&query.archetype),
            query.sort.label(),
            query.direction.arrow(),
            players.visible.len(),
            players.all.len(),
        )),
        filters,
    );
    key_legend(
        f,
        legend,
        "/=search  t=team  p=pos  a=type  s=sort  d=direction  x=clear  Enter=profile",
    );

    let header = PLAYER_COLUMNS
        .iter()
        .map(|(sort, label, _)| {
            if *sort == query.sort {
                format!("{label}{}", query.direction.arrow())
            } else {
                label.to_string()
            }
        })
        .collect();
    let widths = PLAYER_COLUMNS.map(|(_, _, w)| w);
    let rows: Vec<Row> = players.visible.iter().map(player_row).collect();
    let table = Table::new(rows, widths)
        .header(header_row(header))
        .row_highlight_style(highlight_style());
    let mut state = TableState::default().with_selected(Some(players.selected));
    f.render_stateful_widget(table, table_area, &mut state);
}

// ---------------------------------------------------------------------------
// Player profile
// ---------------------------------------------------------------------------

fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
    let profile_state = &app.state.profile;
    let Some(profile) = profile_state.profile.as_ref() else {
        let block = default_border(Color::White).title(" Profile ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_empty(f, inner, app, "Pick a player on the Players tab (Enter)");
        return;
    };

    let name = if profile.name().is_empty() { profile.player_id.as_str() } else { profile.name() };
    let block = default_border(Color::White).title(format!(" {name} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [bio, criteria, body, log] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .areas(inner);

    draw_bio(f, bio, profile_state);
    draw_criteria(f, criteria, profile_state);

    let [chart, grades] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(30)]).areas(body);
    draw_chart(f, chart, profile_state);
    draw_grades(f, grades, profile.grades);
    draw_game_log(f, log, profile_state);
}

fn draw_bio(f: &mut Frame, area: Rect, state: &ProfileState) {
    let Some(info) = state.profile.as_ref().and_then(|p| p.info.as_ref()) else {
        return;
    };
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let draft = match (info.draft_year, info.draft_round, info.draft_number) {
        (Some(y), Some(r), Some(n)) => format!("{y} R{r} #{n}"),
        (Some(y), _, _) => y.to_string(),
        _ => "Undrafted".to_string(),
    };
    let lines = vec![
        Line::from(format!("{}  |  {}", info.team_full_name, info.position)),
        Line::from(Span::styled(
            format!(
                "Ht {}  Wt {}  College {}  Draft {}  (T=team page)",
                opt(&info.height),
                opt(&info.weight),
                opt(&info.college),
                draft
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_criteria(f: &mut Frame, area: Rect, state: &ProfileState) {
    let c = &state.criteria;
    let teammate = match (state.selected_teammate(), state.presence) {
        (Some(p), Some(presence)) => {
            let word = match presence {
                Presence::With => "with",
                Presence::Without => "without",
            };
            let pending = if c.teammate.is_none() { " (loading)" } else { "" };
            format!("{word} {}{pending}", p.name)
        }
        _ => "any".to_string(),
    };
    let lines = vec![
        Line::from(format!(
            "Stat: {}  Line: {}  Games: {}  Opp: {}  Min: {}  W/L: {}  Teammate: {}",
            c.stat.label(),
            fmt_stat(c.threshold),
            c.window.label(),
            c.opponent.as_deref().unwrap_or("All"),
            c.min_minutes.map(fmt_stat).unwrap_or_else(|| "Any".to_string()),
            c.outcome.map(|o| o.code()).unwrap_or("All"),
            teammate,
        )),
        Line::from(Span::styled(
            "s/S=stat  +/-=line  g=games  o=opp  m=min  w=W/L  t=teammate  i=with/without  x=reset",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn bucket_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::Below => Color::Red,
        Bucket::Equal => Color::Gray,
        Bucket::Above => Color::Green,
    }
}

fn draw_chart(f: &mut Frame, area: Rect, state: &ProfileState) {
    let bars = state.bars();
    let summary = nba_api::chart::summarize(&bars);
    let title = format!(
        " {} vs {}  |  Over {}  Push {}  Under {}  |  {:.1}% ",
        state.criteria.stat.label(),
        fmt_stat(state.criteria.threshold),
        summary.above,
        summary.equal,
        summary.below,
        summary.percent_over,
    );
    let block = default_border(Color::DarkGray).title(title);

    if bars.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("No games match these filters")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / bars.len()).saturating_sub(1).clamp(1, 5) as u16;
    let data: Vec<Bar> = bars
        .iter()
        .map(|b| {
            Bar::default()
                .value((b.value.max(0.0) * 10.0).round() as u64)
                .text_value(fmt_stat(b.value))
                .label(Line::from(b.opponent.clone()))
                .style(Style::default().fg(bucket_color(b.bucket)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&data))
        .bar_width(bar_width)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn draw_grades(f: &mut Frame, area: Rect, grades: Option<Grades>) {
    let block = default_border(Color::DarkGray).title(" Grades ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grades = grades.filter(|g| !g.is_empty());
    let Some(grades) = grades else {
        f.render_widget(
            Paragraph::new("No grades").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let bar_room = inner.width.saturating_sub(16) as f64;
    let mut lines = Vec::new();
    for (label, value) in grades.iter() {
        let Some(v) = value else {
            lines.push(Line::from(format!("{label:<12} -")));
            continue;
        };
        let color = tier_color(GradeTier::from_grade(v));
        let filled = ((v.clamp(0.0, 100.0) / 100.0) * bar_room).round() as usize;
        lines.push(Line::from(vec![
            Span::raw(format!("{label:<12}")),
            Span::styled(format!("{:>3} ", fmt_stat(v)), Style::default().fg(color)),
            Span::styled("█".repeat(filled), Style::default().fg(color)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_game_log(f: &mut Frame, area: Rect, state: &ProfileState) {
    let total = state.game_logs().len();
    let pager = state.pager;
    let title = format!(
        " Game Log  |  Page {}/{}  |  {} per page  (h/l=page r=rows) ",
        pager.page,
        pager.page_count(total),
        pager.rows_per_page
    );
    let header = [
        "Date", "Matchup", "W/L", "MIN", "PTS", "REB", "AST", "STL", "BLK", "TOV", "FG", "3PT",
        "FT", "+/-",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let rows: Vec<Row> = state
        .log_page()
        .into_iter()
        .map(|g| {
            Row::new(vec![
                g.game_date.clone(),
                g.matchup.clone(),
                g.outcome.map(|o| o.code().to_string()).unwrap_or_default(),
                fmt_stat(g.minutes),
                fmt_stat(g.pts),
                fmt_stat(g.reb),
                fmt_stat(g.ast),
                fmt_stat(g.stl),
                fmt_stat(g.blk),
                fmt_stat(g.tov),
                format!("{}-{}", fmt_stat(g.fg_made), fmt_stat(g.fg_att)),
                format!("{}-{}", fmt_stat(g.fg3_made), fmt_stat(g.fg3_att)),
                format!("{}-{}", fmt_stat(g.ft_made), fmt_stat(g.ft_att)),
                fmt_stat(g.plus_minus),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(12),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(4),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(header))
        .block(default_border(Color::DarkGray).title(title));
    f.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Team profile
// ---------------------------------------------------------------------------

fn draw_team_profile(f: &mut Frame, area: Rect, app: &App) {
    let Some(team) = app.state.team_profile.as_ref() else {
        let block = default_border(Color::White).title(" Team ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_empty(f, inner, app, "Pick a team on the Standings tab (Enter)");
        return;
    };

    let block = default_border(Color::White).title(format!(" {} ", team.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let record = match (team.wins, team.losses) {
        (Some(w), Some(l)) => format!("{w}-{l}"),
        _ => "-".to_string(),
    };
    let pct = team
        .win_pct
        .map(|p| format!("{p:.3}"))
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        Line::from(format!("Record: {record}   Win %: {pct}")),
        Line::from(""),
    ];

    let details = app.state.standings.teams.iter().find(|t| t.id == team.team_id);
    if let Some(t) = details {
        let row = |label: &str, value: Option<String>| {
            Line::from(vec![
                Span::styled(format!("{label:<17}"), Style::default().fg(Color::Gray)),
                Span::raw(value.unwrap_or_else(|| "-".to_string())),
            ])
        };
        lines.push(row("Conference", t.conference.map(|c| c.label().to_string())));
        lines.push(row("Playoff rank", t.playoff_rank.map(|r| r.to_string())));
        lines.push(row("City", t.city.clone()));
        lines.push(row("Arena", t.arena.clone()));
        lines.push(row("Owner", t.owner.clone()));
        lines.push(row("General manager", t.general_manager.clone()));
        lines.push(row("Head coach", t.head_coach.clone()));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = [
        "1-5      switch tab        ?   help         Esc  back",
        "R        reload tab        f   full screen  \"    log pane",
        "q        quit",
        "",
        "Games    j/k move  Enter load rosters",
        "Standing /  search  j/k move  Enter team page",
        "Players  /  search  t team  p position  a archetype",
        "         s  sort column  d direction  x clear  Enter profile",
        "Profile  s/S stat  +/- line  g games  o opponent  m minutes  w W/L",
        "         t  teammate  i with/without  x reset  T team page",
        "         h/l page  r rows per page",
    ]
    .iter()
    .map(|s| Line::from(*s))
    .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::White))
        .style_debug(Style::default().fg(Color::Gray))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
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
    use crate::state::app_state::AppState;
    use nba_api::{GameLogEntry, PlayerProfile};
    use tui::backend::TestBackend;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, app, LoadingState::default());
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App { settings: AppSettings::default(), state: AppState::new() }
    }

    #[test]
    fn stat_formatting() {
        assert_eq!(fmt_stat(20.0), "20");
        assert_eq!(fmt_stat(17.5), "17.5");
        assert_eq!(fmt_opt(None), "-");
    }

    #[test]
    fn bucket_colors() {
        assert_eq!(bucket_color(Bucket::Below), Color::Red);
        assert_eq!(bucket_color(Bucket::Above), Color::Green);
        assert_eq!(bucket_color(Bucket::Equal), Color::Gray);
    }

    #[test]
    fn empty_games_tab_shows_loading() {
        let screen = render(&mut app());
        assert!(screen.contains("Loading games..."));
        assert!(screen.contains("League Leaders"));
    }

    #[test]
    fn profile_tab_shows_threshold_summary() {
        let mut app = app();
        let logs = [10.0, 15.0, 20.0, 25.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, pts)| GameLogEntry {
                game_id: i.to_string(),
                opponent: "BOS".into(),
                pts: *pts,
                ..Default::default()
            })
            .collect();
        app.state.profile.load(
            PlayerProfile { player_id: "1".into(), game_logs: logs, ..Default::default() },
            Vec::new(),
        );
        app.state.profile.criteria.threshold = 20.0;
        app.state.active_tab = MenuItem::Profile;
        let screen = render(&mut app);
        assert!(screen.contains("Over 2  Push 1  Under 2"), "{screen}");
        assert!(screen.contains("40.0%"));
        assert!(screen.contains("Page 1/1"));
    }
}
