use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::models::{Category, CategoryMap};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLabels {
    pub backlog_title: String,
    pub input_prompt: String,
}

impl CategoryLabels {
    fn defaults_for(category: Category) -> Self {
        let (backlog_title, input_prompt) = match category {
            Category::Game => ("Game Backlog", "Enter game title"),
            Category::Book => ("Book Backlog", "Enter book title"),
            Category::Movie => ("Movies & TV Backlog", "Enter movie or TV show title"),
        };
        Self {
            backlog_title: backlog_title.into(),
            input_prompt: input_prompt.into(),
        }
    }
}

/// Label fields as written in the file; anything missing falls back to the
/// category's default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LabelOverrides {
    backlog_title: Option<String>,
    input_prompt: Option<String>,
}

impl LabelOverrides {
    fn resolve(self, category: Category) -> CategoryLabels {
        let defaults = CategoryLabels::defaults_for(category);
        CategoryLabels {
            backlog_title: self.backlog_title.unwrap_or(defaults.backlog_title),
            input_prompt: self.input_prompt.unwrap_or(defaults.input_prompt),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LabelFile {
    game: LabelOverrides,
    book: LabelOverrides,
    movie: LabelOverrides,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSettings {
    pub game: CategoryLabels,
    pub book: CategoryLabels,
    pub movie: CategoryLabels,
}

impl<'de> Deserialize<'de> for LabelSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let file = LabelFile::deserialize(deserializer)?;
        Ok(Self {
            game: file.game.resolve(Category::Game),
            book: file.book.resolve(Category::Book),
            movie: file.movie.resolve(Category::Movie),
        })
    }
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            game: CategoryLabels::defaults_for(Category::Game),
            book: CategoryLabels::defaults_for(Category::Book),
            movie: CategoryLabels::defaults_for(Category::Movie),
        }
    }
}

impl LabelSettings {
    pub fn for_category(&self, category: Category) -> &CategoryLabels {
        match category {
            Category::Game => &self.game,
            Category::Book => &self.book,
            Category::Movie => &self.movie,
        }
    }

    pub fn to_map(&self) -> CategoryMap<CategoryLabels> {
        CategoryMap::from_fn(|category| self.for_category(category).clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BacklogSettings {
    pub labels: LabelSettings,
    /// Symbol shown in place of a missing cover image.
    pub placeholder_glyph: String,
    pub initial_category: Category,
}

impl Default for BacklogSettings {
    fn default() -> Self {
        Self {
            labels: LabelSettings::default(),
            placeholder_glyph: "photo".into(),
            initial_category: Category::Game,
        }
    }
}

/// Read-only settings loaded from an optional JSON file.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<BacklogSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            read_settings(&path)?
        } else {
            BacklogSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current(&self) -> BacklogSettings {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file; a file removed since startup resets to defaults.
    pub fn reload(&self) -> Result<BacklogSettings> {
        let data = if self.path.exists() {
            read_settings(&self.path)?
        } else {
            BacklogSettings::default()
        };
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = data.clone();
        Ok(data)
    }
}

fn read_settings(path: &Path) -> Result<BacklogSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    Ok(serde_json::from_str(&contents).unwrap_or_else(|err| {
        log_warn!(
            "Ignoring malformed settings in {}: {err}; using defaults",
            path.display()
        );
        BacklogSettings::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        let settings = store.current();

        assert_eq!(settings, BacklogSettings::default());
        assert_eq!(settings.labels.game.backlog_title, "Game Backlog");
        assert_eq!(settings.labels.book.input_prompt, "Enter book title");
        assert_eq!(settings.labels.movie.backlog_title, "Movies & TV Backlog");
        assert_eq!(
            settings.labels.movie.input_prompt,
            "Enter movie or TV show title"
        );
        assert_eq!(settings.placeholder_glyph, "photo");
        assert_eq!(settings.initial_category, Category::Game);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "initialCategory": "book", "labels": { "game": { "backlogTitle": "Games", "inputPrompt": "Game?" } } }"#,
        )
        .unwrap();

        let settings = SettingsStore::new(path).unwrap().current();
        assert_eq!(settings.initial_category, Category::Book);
        assert_eq!(settings.labels.game.backlog_title, "Games");
        assert_eq!(settings.labels.book, CategoryLabels::defaults_for(Category::Book));
        assert_eq!(settings.placeholder_glyph, "photo");
    }

    #[test]
    fn partial_label_object_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "initialCategory": "book", "labels": { "game": { "backlogTitle": "Games" } } }"#,
        )
        .unwrap();

        let settings = SettingsStore::new(path).unwrap().current();
        assert_eq!(settings.initial_category, Category::Book);
        assert_eq!(settings.labels.game.backlog_title, "Games");
        assert_eq!(settings.labels.game.input_prompt, "Enter game title");
        assert_eq!(settings.labels.movie, CategoryLabels::defaults_for(Category::Movie));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.current(), BacklogSettings::default());
    }

    #[test]
    fn reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        fs::write(&path, r#"{ "placeholderGlyph": "book.closed" }"#).unwrap();
        let reloaded = store.reload().unwrap();

        assert_eq!(reloaded.placeholder_glyph, "book.closed");
        assert_eq!(store.current().placeholder_glyph, "book.closed");
    }
}
