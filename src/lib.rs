pub mod backlog;
pub mod models;
pub mod picker;
pub mod settings;
pub mod utils;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;

pub use backlog::{
    BacklogController, BacklogEvent, BacklogSnapshot, EntryError, EntryStore, PickTicket,
};
pub use models::{Category, CategoryMap, CoverImage, Entry, EntryId, PendingInput};
pub use picker::{ChannelImageSource, ImageSource, PickError, PickOutcome, PickRequest};
pub use settings::{BacklogSettings, SettingsStore};

/// Everything a host UI needs to drive the backlog.
pub struct AppState {
    pub backlog: BacklogController,
    pub settings: SettingsStore,
}

impl AppState {
    /// Re-read the settings file and push the result into the backlog.
    pub async fn reload_settings(&self) -> Result<BacklogSettings> {
        let settings = self.settings.reload()?;
        self.backlog.apply_settings(&settings).await;
        Ok(settings)
    }
}

/// Bring up logging, load settings from `settings_path` (defaults when the
/// file is absent) and build the controller around the host's image source.
pub fn setup(source: Arc<dyn ImageSource>, settings_path: PathBuf) -> Result<AppState> {
    utils::init_logging();

    let settings = SettingsStore::new(settings_path)?;
    log::info!(
        "Backlog starting up (settings: {})",
        settings.path().display()
    );

    let backlog = BacklogController::new(source, settings.current());

    Ok(AppState { backlog, settings })
}
