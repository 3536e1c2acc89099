use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const GAMES_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Periodic scoreboard refresh. Goes through the UI loop so the request
/// gets a ticket like any user-initiated load.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { ui_events }
    }

    pub async fn run(self) {
        let mut games_interval = interval(GAMES_REFRESH_INTERVAL);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        games_interval.tick().await;

        loop {
            games_interval.tick().await;
            if self.ui_events.send(UiEvent::RefreshGames).await.is_err() {
                break;
            }
        }
    }
}
