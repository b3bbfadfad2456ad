//! ナビゲーションバー
//!
//! 一定量スクロールすると `scrolled` スタイルに切り替わる。モバイルでは
//! トグルでメニューを開閉し、閉じるときは退場アニメーションの後に外す。

use gloo::events::EventListener;
use leptos::prelude::*;
use portfolio_common::timeline::{menu_enter, menu_exit, nav_intro};
use portfolio_common::{MenuPhase, NavState, NavigationConfig, NAV_CTA, NAV_LINKS};
use web_sys::Element;

use super::reveal::play_on_mount;
use crate::browser::{scroll_y, window, TimelinePlayer};

#[component]
pub fn Navigation(config: NavigationConfig) -> impl IntoView {
    let nav_ref = NodeRef::<leptos::html::Nav>::new();
    play_on_mount(nav_ref, nav_intro());

    let state = RwSignal::new(NavState::new());
    let threshold = config.scrolled_threshold_px;
    let scroll_listener = StoredValue::new_local(None::<EventListener>);

    Effect::new(move |_| {
        if scroll_listener.with_value(Option::is_some) {
            return;
        }
        let Some(window) = window() else {
            return;
        };
        state.maybe_update(|s| s.on_scroll(scroll_y(), threshold));
        let listener = EventListener::new(&window, "scroll", move |_| {
            state.maybe_update(|s| s.on_scroll(scroll_y(), threshold));
        });
        scroll_listener.set_value(Some(listener));
    });

    let menu_phase = Memo::new(move |_| state.with(|s| s.menu()));
    let toggle = move |_| {
        state.update(|s| {
            s.toggle_menu();
        });
    };

    view! {
        <nav
            node_ref=nav_ref
            class="navbar"
            class:scrolled=move || state.with(|s| s.is_scrolled())
            data-reveal="nav"
        >
            <div class="container navbar-inner">
                <a href="#" class="logo">"Portafolio"<span class="gradient-text">"3D"</span></a>

                <div class="nav-links">
                    {NAV_LINKS
                        .iter()
                        .map(|link| view! { <a href=link.href class="nav-link">{link.label}</a> })
                        .collect_view()}
                    <a href=NAV_CTA.href class="btn btn-primary nav-cta">{NAV_CTA.label}</a>
                </div>

                <button
                    class="menu-toggle"
                    aria-label="Toggle menu"
                    aria-expanded=move || menu_phase.get().is_open().to_string()
                    on:click=toggle
                >
                    {move || if menu_phase.get().is_open() { "✕" } else { "☰" }}
                </button>
            </div>

            <Show when=move || menu_phase.get().is_mounted()>
                <MobileMenu state=state phase=menu_phase />
            </Show>
        </nav>
    }
}

#[component]
fn MobileMenu(state: RwSignal<NavState>, phase: Memo<MenuPhase>) -> impl IntoView {
    let menu_ref = NodeRef::<leptos::html::Div>::new();
    let player = StoredValue::new_local(None::<TimelinePlayer>);

    Effect::new(move |_| {
        let phase = phase.get();
        let Some(root) = menu_ref.get() else {
            return;
        };
        let root: Element = root.into();

        let (timeline, closing) = match phase {
            MenuPhase::Open => (menu_enter(), false),
            MenuPhase::Closing => (menu_exit(), true),
            MenuPhase::Closed => return,
        };
        TimelinePlayer::prepare(&root, &timeline);
        let started = TimelinePlayer::play(root, timeline, move || {
            if closing {
                state.update(|s| {
                    s.exit_finished();
                });
            }
        });
        player.set_value(Some(started));
    });

    let close = move |_| {
        state.update(|s| {
            s.close_menu();
        });
    };

    view! {
        <div node_ref=menu_ref class="mobile-menu" data-reveal="menu">
            {NAV_LINKS
                .iter()
                .chain(std::iter::once(&NAV_CTA))
                .map(|link| view! { <a href=link.href class="mobile-link" on:click=close>{link.label}</a> })
                .collect_view()}
        </div>
    }
}
