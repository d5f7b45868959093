use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::notify::NotificationFeed;
use crate::services::RosterViewModel;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub roster: Arc<Mutex<RosterViewModel>>,
    pub notifications: Arc<NotificationFeed>,
}
