use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::requests::Ticket;
use log::{debug, error};
use nba_api::client::{ApiError, NbaApi, ProfileBundle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: NbaApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: NbaApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let ticket = request.ticket();
            let result = self.handle(request).await;

            debug!("network request {ticket:?} complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                ticket,
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: NetworkRequest) -> Result<NetworkResponse, ApiError> {
        match request {
            NetworkRequest::LoadGames { ticket } => {
                debug!("loading scoreboard");
                let games = self.client.fetch_games().await?;
                Ok(NetworkResponse::GamesLoaded { ticket, games })
            }
            NetworkRequest::LoadStandings { ticket } => {
                debug!("loading standings");
                let teams = self.client.fetch_teams().await?;
                Ok(NetworkResponse::StandingsLoaded { ticket, teams })
            }
            NetworkRequest::LoadPlayers { ticket } => {
                debug!("loading player directory");
                let players = self.client.fetch_players().await?;
                Ok(NetworkResponse::PlayersLoaded { ticket, players })
            }
            NetworkRequest::LoadMatchup { ticket, game_id } => {
                debug!("loading matchup rosters for game {game_id}");
                let matchup = self.client.fetch_matchup_with_grades(&game_id).await?;
                Ok(NetworkResponse::MatchupLoaded { ticket, matchup })
            }
            NetworkRequest::LoadProfile { ticket, player_id } => {
                debug!("loading profile for player {player_id}");
                let ProfileBundle { profile, teammates } =
                    self.client.fetch_profile_bundle(&player_id).await?;
                Ok(NetworkResponse::ProfileLoaded { ticket, profile, teammates })
            }
            NetworkRequest::LoadTeammate { ticket, player_id } => {
                debug!("loading teammate game log for player {player_id}");
                let profile = self.client.fetch_player_profile(&player_id).await?;
                Ok(NetworkResponse::TeammateLoaded {
                    ticket,
                    player_id,
                    game_logs: profile.game_logs,
                })
            }
            NetworkRequest::LoadTeamProfile { ticket, team_id } => {
                debug!("loading team profile for team {team_id}");
                let team = self.client.fetch_team_profile(&team_id).await?;
                Ok(NetworkResponse::TeamProfileLoaded { ticket, team })
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
