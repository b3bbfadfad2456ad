//! ギャラリーコンポーネント
//!
//! 上に説明パネル、下にタイル一覧。タイルを選ぶとパネルが切り替わり、
//! 少し待ってからパネル位置までスクロールする。デザイン・Web・写真・
//! 3Dシーンの各ギャラリーはこれを使い、メディア部分の描画だけを差し替える。

use leptos::prelude::*;
use portfolio_common::{Catalog, CatalogEntry, GalleryOptions, Scheduler, Selection, SelectionEffect};

use crate::browser::{use_scroll_service, BrowserHandle, BrowserScheduler};

/// 選択に伴う遅延処理のハンドル。差し替えると前の予約は取り消される
#[derive(Default)]
struct GalleryTimers {
    settle: Option<BrowserHandle>,
    scroll: Option<BrowserHandle>,
}

#[component]
pub fn Gallery<T, R>(
    anchor_id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    catalog: Catalog<T>,
    options: GalleryOptions,
    render_media: R,
) -> impl IntoView
where
    T: CatalogEntry + Clone + Send + Sync + 'static,
    R: Fn(&T) -> AnyView + 'static + Clone + Send + Sync,
{
    let selection = RwSignal::new(Selection::new(&catalog));
    let catalog = StoredValue::new(catalog);
    let timers = StoredValue::new_local(GalleryTimers::default());
    let panel_ref = NodeRef::<leptos::html::Div>::new();
    let scroll = use_scroll_service();
    let scheduler = BrowserScheduler;

    let on_select = move |id: u32| {
        let effects = selection
            .try_update(|s| catalog.with_value(|c| s.select(c, id, &options)))
            .flatten();
        let Some(effects) = effects else {
            return;
        };

        for effect in effects {
            match effect {
                SelectionEffect::Settle { after_ms, generation } => {
                    let handle = scheduler.set_timeout(
                        after_ms,
                        Box::new(move || {
                            selection.try_update(|s| s.settle(generation));
                        }),
                    );
                    timers.update_value(|t| t.settle = Some(handle));
                }
                SelectionEffect::ScrollToPanel { after_ms, offset_px, duration_ms } => {
                    let handle = scheduler.set_timeout(
                        after_ms,
                        Box::new(move || {
                            let Some(panel) = panel_ref.get_untracked() else {
                                log::debug!("gallery: パネル要素がありません");
                                return;
                            };
                            match scroll {
                                Some(service) => {
                                    service.scroll_to_element(&panel, -(offset_px as f64), duration_ms as f64)
                                }
                                None => panel.scroll_into_view(),
                            }
                        }),
                    );
                    timers.update_value(|t| t.scroll = Some(handle));
                }
            }
        }
    };

    // settle では変わらないので、パネルとタイルは選択IDだけを追う
    let selected = Memo::new(move |_| selection.with(|s| s.selected_id()));
    let current = move || {
        let id = selected.get();
        catalog.with_value(|c| c.get(id).unwrap_or_else(|| c.first()).clone())
    };

    let tiles = catalog.with_value(|c| {
        c.iter()
            .map(|entry| {
                let item = entry.item().clone();
                let id = item.id;
                let is_selected = move || selected.get() == id;
                view! {
                    <button
                        class="gallery-tile"
                        class:selected=is_selected
                        aria-pressed=move || is_selected().to_string()
                        on:click=move |_| on_select(id)
                    >
                        <img src=item.media.clone() alt=item.title.clone() loading="lazy" />
                        <div class="tile-caption">
                            <span class="tile-title">{item.title.clone()}</span>
                            <span class="tile-category">{item.category.clone()}</span>
                        </div>
                        <Show when=is_selected>
                            <span class="tile-check">"✓"</span>
                        </Show>
                    </button>
                }
            })
            .collect_view()
    });

    view! {
        <section id=anchor_id class="gallery-section">
            <div class="container">
                <div class="section-header">
                    <h2 class="section-title">{title}</h2>
                    <p class="section-subtitle">{subtitle}</p>
                </div>

                <div
                    node_ref=panel_ref
                    class="gallery-panel"
                    class:updating=move || selection.with(|s| s.is_transitioning())
                >
                    {move || {
                        let entry = current();
                        let item = entry.item().clone();
                        view! {
                            <div class="panel-text">
                                <span class="category-badge">{item.category}</span>
                                <h3 class="panel-title">{item.title}</h3>
                                <p class="panel-subtitle">{item.subtitle}</p>
                                <p class="panel-description">{item.description}</p>
                            </div>
                            <div class="panel-media">{render_media(&entry)}</div>
                        }
                    }}
                </div>

                <div class="gallery-grid">{tiles}</div>
            </div>
        </section>
    }
}

/// 画像だけのメディア表示
pub fn image_media<T: CatalogEntry>(entry: &T) -> AnyView {
    let item = entry.item();
    view! { <img class="panel-image" src=item.media.clone() alt=item.title.clone() /> }.into_any()
}
