use crate::state::network::LoadingState;
use crate::state::requests::Ticket;
use crossterm::event::KeyEvent;
use nba_api::{Game, GameLogEntry, MatchupRoster, Player, PlayerProfile, Team, TeamProfile};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadGames { ticket: Ticket },
    LoadStandings { ticket: Ticket },
    LoadPlayers { ticket: Ticket },
    LoadMatchup { ticket: Ticket, game_id: String },
    LoadProfile { ticket: Ticket, player_id: String },
    LoadTeammate { ticket: Ticket, player_id: String },
    LoadTeamProfile { ticket: Ticket, team_id: String },
}

impl NetworkRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            NetworkRequest::LoadGames { ticket }
            | NetworkRequest::LoadStandings { ticket }
            | NetworkRequest::LoadPlayers { ticket }
            | NetworkRequest::LoadMatchup { ticket, .. }
            | NetworkRequest::LoadProfile { ticket, .. }
            | NetworkRequest::LoadTeammate { ticket, .. }
            | NetworkRequest::LoadTeamProfile { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    GamesLoaded { ticket: Ticket, games: Vec<Game> },
    StandingsLoaded { ticket: Ticket, teams: Vec<Team> },
    PlayersLoaded { ticket: Ticket, players: Vec<Player> },
    MatchupLoaded { ticket: Ticket, matchup: MatchupRoster },
    /// Profile and teammates arrive together or not at all.
    ProfileLoaded { ticket: Ticket, profile: PlayerProfile, teammates: Vec<Player> },
    TeammateLoaded { ticket: Ticket, player_id: String, game_logs: Vec<GameLogEntry> },
    TeamProfileLoaded { ticket: Ticket, team: TeamProfile },
    Error { ticket: Ticket, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshGames,
}
