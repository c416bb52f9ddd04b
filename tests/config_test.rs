// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证导入配置读取与回退默认值
// ==========================================

mod test_helpers;

use async_trait::async_trait;
use schedule_sync::config::{config_keys, ConfigManager, DefaultImportConfig, ImportConfigReader};
use schedule_sync::importer::{FilePayloadSource, ImportError, ImportResult, PayloadSource};
use tempfile::TempDir;
use test_helpers::{create_test_db, csv_with_rows, insert_test_config, write_csv};

/// Mock 配置（不依赖数据库）
#[derive(Debug, Clone)]
struct MockConfig {
    allowed_extensions: Vec<String>,
    max_payload_bytes: u64,
}

#[async_trait]
impl ImportConfigReader for MockConfig {
    async fn get_allowed_extensions(&self) -> ImportResult<Vec<String>> {
        Ok(self.allowed_extensions.clone())
    }

    async fn get_max_payload_bytes(&self) -> ImportResult<u64> {
        Ok(self.max_payload_bytes)
    }

    async fn get_demo_source_name(&self) -> ImportResult<String> {
        Ok("mock_demo.csv".to_string())
    }

    async fn get_ui_locale(&self) -> ImportResult<String> {
        Ok("en".to_string())
    }
}

#[tokio::test]
async fn test_defaults_when_keys_absent() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(config.get_allowed_extensions().await.unwrap(), vec!["csv".to_string()]);
    assert_eq!(config.get_max_payload_bytes().await.unwrap(), 5 * 1024 * 1024);
    assert_eq!(config.get_demo_source_name().await.unwrap(), "horarios_demo.csv");
    assert_eq!(config.get_ui_locale().await.unwrap(), "es");

    let defaults = DefaultImportConfig;
    assert_eq!(
        defaults.get_max_payload_bytes().await.unwrap(),
        config.get_max_payload_bytes().await.unwrap()
    );
}

#[tokio::test]
async fn test_new_on_fresh_path_creates_schema() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nuevo.db").to_string_lossy().to_string();

    let config = ConfigManager::new(&db_path).unwrap();
    assert_eq!(config.get_ui_locale().await.unwrap(), "es");

    config.set_global_config_value(config_keys::UI_LOCALE, "en").unwrap();
    assert_eq!(config.get_ui_locale().await.unwrap(), "en");
}

#[tokio::test]
async fn test_stored_values_override_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    insert_test_config(&conn, config_keys::ALLOWED_EXTENSIONS, ".CSV,txt").unwrap();
    insert_test_config(&conn, config_keys::MAX_PAYLOAD_BYTES, " 1024 ").unwrap();
    insert_test_config(&conn, config_keys::UI_LOCALE, "en").unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    assert_eq!(
        config.get_allowed_extensions().await.unwrap(),
        vec!["csv".to_string(), "txt".to_string()]
    );
    assert_eq!(config.get_max_payload_bytes().await.unwrap(), 1024);
    assert_eq!(config.get_ui_locale().await.unwrap(), "en");
}

#[tokio::test]
async fn test_unparseable_value_is_config_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    insert_test_config(&conn, config_keys::MAX_PAYLOAD_BYTES, "cinco megas").unwrap();
    insert_test_config(&conn, config_keys::ALLOWED_EXTENSIONS, " , ").unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    assert!(matches!(
        config.get_max_payload_bytes().await,
        Err(ImportError::ConfigValueError { .. })
    ));
    assert!(matches!(
        config.get_allowed_extensions().await,
        Err(ImportError::ConfigValueError { .. })
    ));
}

#[tokio::test]
async fn test_set_and_list_global_configs() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config = ConfigManager::new(&db_path).unwrap();

    config
        .set_global_config_value(config_keys::DEMO_SOURCE_NAME, "demo.csv")
        .unwrap();
    config
        .set_global_config_value(config_keys::DEMO_SOURCE_NAME, "demo_v2.csv")
        .unwrap();

    let all = config.list_global_configs().unwrap();
    assert_eq!(all.get(config_keys::DEMO_SOURCE_NAME).map(String::as_str), Some("demo_v2.csv"));
    assert_eq!(config.get_demo_source_name().await.unwrap(), "demo_v2.csv");
}

#[tokio::test]
async fn test_payload_source_from_mock_config() {
    let config = MockConfig {
        allowed_extensions: vec!["txt".to_string()],
        max_payload_bytes: 1024,
    };
    let source = FilePayloadSource::from_config(&config).await.unwrap();

    let dir = TempDir::new().unwrap();
    let txt = write_csv(&dir, "horarios.txt", &csv_with_rows(&[]));
    let csv = write_csv(&dir, "horarios.csv", &csv_with_rows(&[]));

    let payload = source.acquire(&txt).await.unwrap();
    assert_eq!(payload.source_name, "horarios.txt");
    assert!(matches!(
        source.acquire(&csv).await,
        Err(ImportError::UnsupportedFormat(_, _))
    ));
}
