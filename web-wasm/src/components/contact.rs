//! 連絡先セクション

use leptos::prelude::*;

#[component]
pub fn Contact() -> impl IntoView {
    view! {
        <section id="contacto" class="contact">
            <div class="container">
                <div class="section-header">
                    <h2 class="section-title">"Contacto"</h2>
                    <p class="section-subtitle">"¿Tienes un proyecto en mente? Hablemos."</p>
                </div>
                <div class="contact-actions">
                    <a href="mailto:hola@portafolio3d.com" class="btn btn-primary">"Escríbeme"</a>
                    <a href="#" class="btn btn-secondary">"Volver arriba"</a>
                </div>
            </div>
            <footer class="footer">
                <p>"© Portafolio3D"</p>
            </footer>
        </section>
    }
}
