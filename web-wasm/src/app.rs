//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use portfolio_common::{Catalog, CatalogEntry, GalleryOptions, Result, SceneItem};

use crate::browser::{provide_scroll_service, ScrollService};
use crate::components::{
    about::About,
    contact::Contact,
    gallery::{image_media, Gallery},
    hero::Hero,
    loader::Loader,
    navigation::Navigation,
    projects_grid::ProjectsGrid,
    scene_viewer::SceneViewer,
};
use crate::content;

/// 読み込めなかったセクションは描画しない
fn loaded<T>(section: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{} を読み込めません: {}", section, e);
            None
        }
    }
}

fn image_gallery<T>(
    catalog: Option<Catalog<T>>,
    anchor_id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    options: GalleryOptions,
) -> Option<AnyView>
where
    T: CatalogEntry + Clone + Send + Sync + 'static,
{
    catalog.map(|catalog| {
        view! {
            <Gallery
                anchor_id=anchor_id
                title=title
                subtitle=subtitle
                catalog=catalog
                options=options
                render_media={image_media::<T>}
            />
        }
        .into_any()
    })
}

fn scene_media(scene: &SceneItem) -> AnyView {
    view! { <SceneViewer scene=scene.clone() /> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    let config = content::site_config();

    let scroll = ScrollService::start(config.scroll);
    provide_scroll_service(scroll);
    on_cleanup(move || scroll.dispose());

    let designs = loaded("designs.json", content::designs());
    let web_designs = loaded("web_designs.json", content::web_designs());
    let photos = loaded("photos.json", content::photos());
    let scenes = loaded("scenes.json", content::scenes());
    let projects = loaded("projects.json", content::projects());
    let skills = loaded("skills.json", content::skills());

    let scene_gallery = scenes.map(|catalog| {
        view! {
            <Gallery
                anchor_id="escenarios"
                title="Galería de Escenarios 3D"
                subtitle="Haz clic en cada escenario para explorarlo en 3D"
                catalog=catalog
                options=config.scene_gallery
                render_media=scene_media
            />
        }
    });

    view! {
        <Loader config=config.loader />
        <Navigation config=config.navigation />
        <main>
            <Hero particles=config.particles />
            {skills.map(|skills| view! { <About skills=skills reveal=config.reveal /> })}
            {projects.map(|projects| view! { <ProjectsGrid projects=projects reveal=config.reveal /> })}
            {image_gallery(
                designs,
                "diseno",
                "Diseño Gráfico",
                "Haz clic en cada diseño para ver más detalles",
                config.gallery,
            )}
            {image_gallery(
                web_designs,
                "diseno-web",
                "Proceso de Diseño",
                "Haz clic en cada etapa para ver más detalles",
                config.gallery,
            )}
            {image_gallery(
                photos,
                "fotografia",
                "Galería de Trabajos",
                "Haz clic en cada imagen para ver más detalles",
                config.gallery,
            )}
            {scene_gallery}
            <Contact />
        </main>
    }
}
