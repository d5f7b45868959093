pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{SqliteStudentStore, StudentStore};
use crate::error::AppError;
use crate::notify::NotificationFeed;
use crate::services::RosterViewModel;
use crate::state::AppState;

/// Opens the database, makes sure the table exists and loads the first roster snapshot.
pub async fn build_state(database_url: &str) -> Result<AppState, AppError> {
    let pool = db::open_pool(database_url).await?;
    let store = Arc::new(SqliteStudentStore::new(pool.clone()));
    store.ensure_schema().await?;

    let notifications = Arc::new(NotificationFeed::new());
    let mut roster = RosterViewModel::new(store, notifications.clone());
    roster.load_roster().await?;

    Ok(AppState {
        db: pool,
        roster: Arc::new(Mutex::new(roster)),
        notifications,
    })
}
