//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    PatchSettings,
};

/// 設定ファイルの名前
const CONFIG_FILE_NAME: &str = ".i18n-patch.json";

/// ワークスペースの設定を解決する
///
/// 設定ファイルが無い場合はデフォルト設定を返す。読み込んだ設定は
/// バリデーション済み。
///
/// # Errors
/// - ファイル読み込みまたはパースエラー
/// - バリデーションエラー
pub fn load_settings(workspace_root: &Path) -> Result<PatchSettings, ConfigError> {
    let settings = load_from_workspace(workspace_root)?.unwrap_or_default();
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}

/// ワークスペースから設定を読み込む
///
/// `.i18n-patch.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<PatchSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: PatchSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
