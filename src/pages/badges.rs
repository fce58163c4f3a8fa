use leptos::*;

use crate::api;
use crate::state::PanelData;
use crate::types::Badge;

/// The static badge catalog. No per-user state here; earned badges are
/// shown in the profile panel.
#[component]
pub fn BadgesPanel(reload: ReadSignal<u32>) -> impl IntoView {
    let (badges, set_badges) = create_signal(PanelData::<Vec<Badge>>::Loading);

    create_effect(move |_| {
        let _ = reload.get();
        spawn_local(async move {
            match api::fetch_badges().await {
                Ok(catalog) => set_badges.set(PanelData::Ready(catalog)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("badges load failed: {e}").into());
                    set_badges.set(PanelData::Failed);
                }
            }
        });
    });

    view! {
        <div class="badges">
            <h2>"Available Badges"</h2>
            {move || match badges.get() {
                PanelData::Failed => view! {
                    <div class="panel-error">"Failed to load badges. Please try again later."</div>
                }
                .into_view(),
                PanelData::Loading => {
                    view! { <div class="loading">"Loading badges..."</div> }.into_view()
                }
                PanelData::Ready(catalog) if catalog.is_empty() => {
                    view! { <div class="empty-note">"No badges available."</div> }.into_view()
                }
                PanelData::Ready(catalog) => view! {
                    <div class="badge-grid">
                        {catalog
                            .into_iter()
                            .map(|badge| view! {
                                <div class="badge-card">
                                    <div class="badge-name">{badge.name.clone()}</div>
                                    <div class="badge-description">
                                        {badge.description.clone()}
                                    </div>
                                    <div class="badge-requirements">
                                        {format!("Requires: {}", badge.requirements)}
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}
