use crate::alerts::{AlertEngine, EmailSender};
use crate::db::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub engine: Arc<AlertEngine>,
}

impl AppState {
    pub fn init(db: Database, sender: EmailSender) -> Self {
        Self {
            db: Arc::new(db),
            engine: Arc::new(AlertEngine::new(sender)),
        }
    }
}
