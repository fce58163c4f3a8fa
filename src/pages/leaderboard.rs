use leptos::*;

use crate::api;
use crate::state::{rank_tier_class, PanelData};
use crate::types::{LeaderboardEntry, Session};

pub const LEADERBOARD_LIMIT: u32 = 50;

/// Top-N points leaderboard. Reloads on every tab entry; the Refresh
/// button shows a loading placeholder synchronously and then performs the
/// same fetch.
#[component]
pub fn LeaderboardPanel(session: RwSignal<Session>, reload: ReadSignal<u32>) -> impl IntoView {
    let (entries, set_entries) = create_signal(PanelData::<Vec<LeaderboardEntry>>::Loading);

    let do_load = move || {
        spawn_local(async move {
            match api::fetch_leaderboard(LEADERBOARD_LIMIT).await {
                Ok(rows) => set_entries.set(PanelData::Ready(rows)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("leaderboard load failed: {e}").into());
                    set_entries.set(PanelData::Failed);
                }
            }
        });
    };

    create_effect(move |_| {
        let _ = reload.get();
        do_load();
    });

    let refresh = move |_| {
        set_entries.update(|panel| panel.begin_reload());
        do_load();
    };

    view! {
        <div class="leaderboard">
            <div class="panel-heading">
                <h2>"Points Leaderboard"</h2>
                <button class="refresh-button" on:click=refresh>
                    "Refresh"
                </button>
            </div>
            {move || match entries.get() {
                PanelData::Failed => view! {
                    <div class="panel-error">
                        "Failed to load leaderboard. Please try again later."
                    </div>
                }
                .into_view(),
                PanelData::Loading => {
                    view! { <div class="loading">"Loading leaderboard..."</div> }.into_view()
                }
                PanelData::Ready(rows) if rows.is_empty() => view! {
                    <div class="empty-note">"No leaderboard data available."</div>
                }
                .into_view(),
                PanelData::Ready(rows) => {
                    let current_email = session.get().email;
                    rows.into_iter()
                        .map(|entry| {
                            let current = !current_email.is_empty()
                                && entry.user_email == current_email;
                            let row_class = format!(
                                "leaderboard-row {}{}",
                                rank_tier_class(entry.rank),
                                if current { " current" } else { "" },
                            );
                            view! {
                                <div class=row_class>
                                    <span class="rank-cell">{format!("#{}", entry.rank)}</span>
                                    <span class="name-cell">{entry.user_name.clone()}</span>
                                    <span class="points-cell">
                                        {format!("{} pts", entry.total_points)}
                                    </span>
                                    <span class="badges-cell">
                                        {format!("{} badges", entry.badges_count)}
                                    </span>
                                    <span class="activity-cell">
                                        {entry.recent_activity.clone()}
                                    </span>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_view()
                }
            }}
        </div>
    }
}
