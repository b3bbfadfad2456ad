//! プロジェクト一覧

use leptos::prelude::*;
use portfolio_common::timeline::projects_reveal;
use portfolio_common::{Project, RevealConfig};

use super::reveal::reveal_on_enter;

#[component]
pub fn ProjectsGrid(projects: Vec<Project>, reveal: RevealConfig) -> impl IntoView {
    let section_ref = NodeRef::<leptos::html::Section>::new();
    reveal_on_enter(section_ref, reveal.threshold, projects_reveal(projects.len()));

    view! {
        <section node_ref=section_ref id="proyectos" class="projects">
            <div class="container">
                <div class="section-header" data-reveal="title">
                    <h2 class="section-title">"Proyectos"</h2>
                    <p class="section-subtitle">"Una selección de mis trabajos recientes"</p>
                </div>
                <div class="projects-grid">
                    {projects
                        .into_iter()
                        .map(|project| view! { <ProjectCard project=project /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    view! {
        <article class="project-card" data-reveal="item">
            <img src=project.image.clone() alt=project.title.clone() loading="lazy" />
            <div class="project-overlay">
                <span class="project-category">{project.category.clone()}</span>
                <h3 class="project-title">{project.title.clone()}</h3>
                <p class="project-description">{project.description.clone()}</p>
                <time class="project-date">{project.date.clone()}</time>
            </div>
        </article>
    }
}
