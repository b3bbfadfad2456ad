//! ギャラリーのカタログ型
//!
//! - CatalogItem: 2Dデザイン・Webデザイン・写真の共通形
//! - SceneItem: 3Dシーン（CatalogItem + モデル情報）
//! - Catalog: 空でなく、IDが一意であることを保証したリスト
//!
//! About/Projects 用の Skill・Project もここで定義する。

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// カタログ項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    /// 画像のURLまたはパス
    pub media: String,
    #[serde(default)]
    pub category: String,
}

/// 3Dシーン項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// GLBモデルのパス
    pub model: String,
    /// カメラの初期位置（モデル中心からの相対）
    pub camera_offset: [f32; 3],
    #[serde(default = "default_model_scale")]
    pub model_scale: f32,
}

fn default_model_scale() -> f32 {
    1.0
}

/// カタログに載せられる型
pub trait CatalogEntry {
    fn item(&self) -> &CatalogItem;

    fn id(&self) -> u32 {
        self.item().id
    }
}

impl CatalogEntry for CatalogItem {
    fn item(&self) -> &CatalogItem {
        self
    }
}

impl CatalogEntry for SceneItem {
    fn item(&self) -> &CatalogItem {
        &self.item
    }
}

/// 固定カタログ
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    items: Vec<T>,
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::Catalog("カタログが空です".into()));
        }

        let mut seen = HashSet::new();
        for entry in &items {
            if !seen.insert(entry.id()) {
                return Err(Error::Catalog(format!("IDが重複しています: {}", entry.id())));
            }
        }

        Ok(Self { items })
    }

    /// 先頭項目（初期選択）
    pub fn first(&self) -> &T {
        &self.items[0]
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 構築時に空を弾いているので常に false
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: CatalogEntry + DeserializeOwned> Catalog<T> {
    /// JSON配列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<T> = serde_json::from_str(json)?;
        Self::new(items)
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// スキルバー1本分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 0〜100 (%)
    pub level: u8,
}

impl Skill {
    pub fn list_from_json(json: &str) -> Result<Vec<Skill>> {
        let skills: Vec<Skill> = serde_json::from_str(json)?;
        if let Some(skill) = skills.iter().find(|s| s.level > 100) {
            return Err(Error::Catalog(format!(
                "スキルレベルは100以下: {} = {}",
                skill.name, skill.level
            )));
        }
        Ok(skills)
    }
}

/// プロジェクト一覧のカード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub date: String,
}

impl Project {
    pub fn list_from_json(json: &str) -> Result<Vec<Project>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            media: format!("/images/{}.png", id),
            category: "test".into(),
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::<CatalogItem>::new(vec![]);
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(vec![item(1, "A"), item(2, "B"), item(1, "C")]);
        let err = result.unwrap_err();
        assert!(format!("{}", err).contains("1"));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(vec![item(1, "A"), item(2, "B")]).unwrap();
        assert_eq!(catalog.first().title, "A");
        assert_eq!(catalog.get(2).map(|i| i.title.as_str()), Some("B"));
        assert!(catalog.get(3).is_none());
        assert!(catalog.contains(1));
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_from_json_item() {
        let json = r#"[
            { "id": 7, "title": "Pan", "media": "/images/photos/pan.png", "category": "Fotografía" }
        ]"#;
        let catalog = Catalog::<CatalogItem>::from_json(json).unwrap();
        let first = catalog.first();
        assert_eq!(first.id, 7);
        assert_eq!(first.subtitle, "");
        assert_eq!(first.category, "Fotografía");
    }

    #[test]
    fn test_from_json_scene_flattened() {
        let json = r#"[{
            "id": 1,
            "title": "Cafetería",
            "media": "/images/scenes/cafeteria.jpg",
            "model": "/models/cafeteria.glb",
            "cameraOffset": [3, 2, 3],
            "modelScale": 0.5
        }]"#;
        let catalog = Catalog::<SceneItem>::from_json(json).unwrap();
        let scene = catalog.first();
        assert_eq!(scene.id(), 1);
        assert_eq!(scene.item.title, "Cafetería");
        assert_eq!(scene.camera_offset, [3.0, 2.0, 3.0]);
        assert_eq!(scene.model_scale, 0.5);
    }

    #[test]
    fn test_scene_scale_default() {
        let json = r#"[{ "id": 1, "title": "X", "media": "x.jpg", "model": "x.glb", "cameraOffset": [0, 0, 5] }]"#;
        let catalog = Catalog::<SceneItem>::from_json(json).unwrap();
        assert_eq!(catalog.first().model_scale, 1.0);
    }

    #[test]
    fn test_skill_level_limit() {
        let ok = Skill::list_from_json(r#"[{ "name": "Blender", "level": 95 }]"#).unwrap();
        assert_eq!(ok[0].level, 95);

        let err = Skill::list_from_json(r#"[{ "name": "Blender", "level": 120 }]"#);
        assert!(matches!(err, Err(Error::Catalog(_))));
    }
}
