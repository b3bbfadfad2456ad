//! Portfolio Common Library
//!
//! Web(WASM)フロントエンドの状態機械とデータ型。DOMに依存しないので
//! ネイティブの `cargo test` で検証できる。

pub mod camera;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gate;
pub mod loading;
pub mod navigation;
pub mod particles;
pub mod scheduler;
pub mod scroll;
pub mod selection;
pub mod timeline;

pub use camera::{scale_attribute, CameraOrbit, FlyCamera, ModelLoad, MoveKey};
pub use catalog::{Catalog, CatalogEntry, CatalogItem, Project, SceneItem, Skill};
pub use config::{
    GalleryOptions, LoaderConfig, NavigationConfig, ParticleConfig, RevealConfig, ScrollConfig,
    SiteConfig,
};
pub use error::{Error, Result};
pub use gate::{EntranceGate, GateAction, GateEvent, GateState};
pub use loading::{LoadEstimator, LoadEvent, LoadPhase, LoaderCommand, ResourceSnapshot};
pub use navigation::{MenuPhase, NavLink, NavState, NAV_CTA, NAV_LINKS};
pub use particles::{ParticleField, Projection};
pub use scheduler::{FrameLoop, ManualScheduler, Scheduler};
pub use scroll::{parse_anchor, resolve_anchor, AnchorIntent, ScrollCommand, SmoothScroller};
pub use selection::{Selection, SelectionEffect};
pub use timeline::{Easing, Pose, Position, Slot, Timeline};
