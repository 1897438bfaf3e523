mod loader;
mod model;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, FileConfigLoader};
pub use model::{
    Config, MarkdownConfig, MarkdownDoc, ScannerConfig, SecretsConfig, ShellConfig,
};
