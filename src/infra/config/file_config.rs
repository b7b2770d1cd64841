use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, NavigationPrefs};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub navigation: Option<FileNavigationPrefs>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(navigation) = self.navigation {
            navigation.merge_into(&mut config.navigation);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileNavigationPrefs {
    pub saved_view_as_chats: Option<bool>,
}

impl FileNavigationPrefs {
    fn merge_into(self, config: &mut NavigationPrefs) {
        if let Some(saved_view_as_chats) = self.saved_view_as_chats {
            config.saved_view_as_chats = saved_view_as_chats;
        }
    }
}
