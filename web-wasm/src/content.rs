//! 埋め込みコンテンツ
//!
//! カタログと設定はビルド時に `content/*.json` から取り込む。

use portfolio_common::{Catalog, CatalogItem, Project, Result, SceneItem, SiteConfig, Skill};

const SITE: &str = include_str!("../content/site.json");
const DESIGNS: &str = include_str!("../content/designs.json");
const WEB_DESIGNS: &str = include_str!("../content/web_designs.json");
const PHOTOS: &str = include_str!("../content/photos.json");
const SCENES: &str = include_str!("../content/scenes.json");
const PROJECTS: &str = include_str!("../content/projects.json");
const SKILLS: &str = include_str!("../content/skills.json");

/// サイト設定。読めなければデフォルト値で動かす
pub fn site_config() -> SiteConfig {
    match SiteConfig::from_json(SITE) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("site.json を読み込めないためデフォルト設定を使用: {}", e);
            SiteConfig::default()
        }
    }
}

/// 2Dデザイン作品
pub fn designs() -> Result<Catalog<CatalogItem>> {
    Catalog::from_json(DESIGNS)
}

/// Webデザインの制作工程
pub fn web_designs() -> Result<Catalog<CatalogItem>> {
    Catalog::from_json(WEB_DESIGNS)
}

pub fn photos() -> Result<Catalog<CatalogItem>> {
    Catalog::from_json(PHOTOS)
}

pub fn scenes() -> Result<Catalog<SceneItem>> {
    Catalog::from_json(SCENES)
}

pub fn projects() -> Result<Vec<Project>> {
    Project::list_from_json(PROJECTS)
}

pub fn skills() -> Result<Vec<Skill>> {
    Skill::list_from_json(SKILLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_parses() {
        let config = SiteConfig::from_json(SITE).unwrap();
        assert_eq!(config.gallery.settle_delay_ms, 600);
        assert_eq!(config.scene_gallery.panel_offset_px, 100);
        // 書いていない項目はデフォルト
        assert_eq!(config.scene_gallery.settle_delay_ms, 600);
        assert_eq!(config.particles.count, 800);
    }

    #[test]
    fn test_catalogs_parse() {
        assert_eq!(designs().unwrap().len(), 3);
        assert_eq!(web_designs().unwrap().len(), 2);
        assert_eq!(photos().unwrap().len(), 16);

        let scenes = scenes().unwrap();
        let first = scenes.first();
        assert_eq!(first.model, "/models/cafeteria.glb");
        assert_eq!(first.camera_offset, [3.0, 2.0, 3.0]);
        assert_eq!(first.model_scale, 0.5);
    }

    #[test]
    fn test_projects_and_skills_parse() {
        assert_eq!(projects().unwrap().len(), 6);
        let skills = skills().unwrap();
        assert_eq!(skills.len(), 6);
        assert!(skills.iter().all(|s| s.level <= 100));
    }

    #[test]
    fn test_media_paths_are_absolute_or_remote() {
        let photos = photos().unwrap();
        for photo in &photos {
            assert!(
                photo.media.starts_with('/') || photo.media.starts_with("https://"),
                "{}",
                photo.media
            );
        }
    }
}
