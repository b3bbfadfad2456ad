//! About セクション（自己紹介とスキルバー）

use leptos::prelude::*;
use portfolio_common::timeline::about_reveal;
use portfolio_common::{RevealConfig, Skill};

use super::reveal::reveal_on_enter;

const STATS: [(&str, &str); 3] = [
    ("100+", "Proyectos Completados"),
    ("50+", "Clientes Satisfechos"),
    ("5+", "Años de Experiencia"),
];

#[component]
pub fn About(skills: Vec<Skill>, reveal: RevealConfig) -> impl IntoView {
    let section_ref = NodeRef::<leptos::html::Section>::new();
    reveal_on_enter(section_ref, reveal.threshold, about_reveal(skills.len()));

    view! {
        <section node_ref=section_ref id="sobre-mi" class="about">
            <div class="container about-grid">
                <div class="about-text" data-reveal="title">
                    <h2 class="section-title">"Sobre Mí"</h2>
                    <p>
                        "Soy un diseñador gráfico 3D apasionado por crear experiencias visuales que cuentan historias. "
                        "Con más de 5 años de experiencia, me especializo en transformar conceptos abstractos en realidades digitales impactantes."
                    </p>
                    <p>
                        "Mi enfoque combina técnica, creatividad y atención al detalle para entregar proyectos que no solo cumplen expectativas, sino que las superan."
                    </p>
                    <div class="about-stats">
                        {STATS
                            .iter()
                            .map(|(value, label)| {
                                view! {
                                    <div class="stat">
                                        <span class="stat-value">{*value}</span>
                                        <span class="stat-label">{*label}</span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="about-skills" data-reveal="body">
                    <h3>"Habilidades"</h3>
                    {skills
                        .into_iter()
                        .map(|skill| {
                            let width = format!("{}%", skill.level);
                            view! {
                                <div class="skill" data-reveal="item">
                                    <div class="skill-header">
                                        <span>{skill.name}</span>
                                        <span class="skill-level">{width.clone()}</span>
                                    </div>
                                    <div class="skill-track">
                                        <div
                                            class="skill-bar"
                                            data-reveal="bar"
                                            data-width=width.clone()
                                            style=format!("width: {}", width)
                                        ></div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
