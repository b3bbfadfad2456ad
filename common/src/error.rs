//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogItem, SceneItem, Skill};

    #[test]
    fn test_empty_catalog_message() {
        let error = Catalog::<CatalogItem>::from_json("[]").unwrap_err();
        assert!(matches!(error, Error::Catalog(_)));
        assert_eq!(error.to_string(), "Catalog error: カタログが空です");
    }

    #[test]
    fn test_duplicate_scene_id_message() {
        let json = r#"[
            { "id": 4, "title": "A", "media": "a.jpg", "model": "a.glb", "cameraOffset": [0, 0, 5] },
            { "id": 4, "title": "B", "media": "b.jpg", "model": "b.glb", "cameraOffset": [0, 0, 5] }
        ]"#;
        let error = Catalog::<SceneItem>::from_json(json).unwrap_err();
        assert_eq!(error.to_string(), "Catalog error: IDが重複しています: 4");
    }

    #[test]
    fn test_skill_level_message_names_skill() {
        let json = r#"[{ "name": "Unreal", "level": 80 }, { "name": "Maya", "level": 101 }]"#;
        let error = Skill::list_from_json(json).unwrap_err();
        assert_eq!(error.to_string(), "Catalog error: スキルレベルは100以下: Maya = 101");
    }

    #[test]
    fn test_missing_field_is_json_error() {
        // media が無い項目は Catalog ではなく Json で落ちる
        let error = Catalog::<CatalogItem>::from_json(r#"[{ "id": 1, "title": "X" }]"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().contains("media"));
    }
}
