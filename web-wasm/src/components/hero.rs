//! Hero セクション

use leptos::prelude::*;
use portfolio_common::timeline::hero_intro;
use portfolio_common::ParticleConfig;

use super::particle_background::ParticleBackground;
use super::reveal::play_on_mount;

#[component]
pub fn Hero(particles: ParticleConfig) -> impl IntoView {
    let section_ref = NodeRef::<leptos::html::Section>::new();
    play_on_mount(section_ref, hero_intro());

    view! {
        <section node_ref=section_ref id="inicio" class="hero">
            <ParticleBackground config=particles />
            <div class="hero-content">
                <h1 class="hero-title" data-reveal="title">
                    "Diseño " <span class="gradient-text">"3D"</span>
                </h1>
                <p class="hero-subtitle" data-reveal="body">
                    "Creando experiencias visuales únicas que transforman ideas en arte digital tridimensional"
                </p>
                <div class="hero-actions" data-reveal="cta">
                    <a href="#proyectos" class="btn btn-primary">"Ver Proyectos"</a>
                    <a href="#contacto" class="btn btn-secondary">"Contactar"</a>
                </div>
            </div>
            <div class="scroll-indicator" data-reveal="indicator" aria-hidden="true">
                <span class="scroll-indicator-dot"></span>
            </div>
        </section>
    }
}
