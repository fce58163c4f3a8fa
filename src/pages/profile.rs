use leptos::*;

use crate::api;
use crate::state::PointsSummary;
use crate::types::{Session, UserRanking};

/// The per-user profile: summary stat cards, the server-ordered point
/// history and the earned-badge grid, all from one ranking fetch. Without
/// a session this renders a prompt and fetches nothing.
#[component]
pub fn ProfilePanel(session: RwSignal<Session>, reload: ReadSignal<u32>) -> impl IntoView {
    // Outer None: nothing fetched yet. Inner None: no ranking record on
    // the server, rendered as the zero state.
    let (profile, set_profile) = create_signal(Option::<Option<UserRanking>>::None);

    create_effect(move |_| {
        if reload.get() == 0 {
            return;
        }
        let email = session.with_untracked(|s| s.email.clone());
        if email.is_empty() {
            return;
        }
        set_profile.set(None);
        spawn_local(async move {
            match api::fetch_user_ranking(&email).await {
                Ok(found) => set_profile.set(Some(found)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("profile load failed: {e}").into());
                    set_profile.set(Some(None));
                }
            }
        });
    });

    view! {
        <div class="profile">
            <h2>"My Profile"</h2>
            {move || {
                if !session.get().is_set() {
                    return view! {
                        <div class="empty-note">
                            "Set your user info first to view your profile."
                        </div>
                    }
                    .into_view();
                }
                match profile.get() {
                    None => view! { <div class="loading">"Loading profile..."</div> }.into_view(),
                    Some(found) => {
                        let (summary, history, badges) = match found {
                            Some(ranking) => (
                                PointsSummary::from_ranking(&ranking.ranking),
                                ranking.point_history,
                                ranking.badges,
                            ),
                            None => (PointsSummary::zero(), Vec::new(), Vec::new()),
                        };

                        let history_view = if history.is_empty() {
                            view! {
                                <div class="empty-note">
                                    "No points earned yet. Register for an event to get started!"
                                </div>
                            }
                            .into_view()
                        } else {
                            // Server order is reverse-chronological already.
                            history
                                .into_iter()
                                .map(|record| view! {
                                    <div class="history-row">
                                        <span class="history-points">
                                            {format!("+{}", record.points_earned)}
                                        </span>
                                        <span class="history-reason">{record.reason.clone()}</span>
                                        <span class="history-date">
                                            {record.date_awarded.clone()}
                                        </span>
                                    </div>
                                })
                                .collect_view()
                                .into_view()
                        };

                        let badges_view = if badges.is_empty() {
                            view! { <div class="empty-note">"No badges earned yet."</div> }
                                .into_view()
                        } else {
                            badges
                                .into_iter()
                                .map(|earned| view! {
                                    <div class="badge-card earned">
                                        <div class="badge-name">{earned.badge.name.clone()}</div>
                                        <div class="badge-description">
                                            {earned.badge.description.clone()}
                                        </div>
                                        <div class="badge-earned-date">
                                            {format!("Earned {}", earned.earned_date)}
                                        </div>
                                    </div>
                                })
                                .collect_view()
                                .into_view()
                        };

                        view! {
                            <div class="profile-summary">
                                <div class="stat-card">
                                    <span class="stat-value">{summary.points}</span>
                                    <span class="stat-label">"Total points"</span>
                                </div>
                                <div class="stat-card">
                                    <span class="stat-value">{summary.rank.clone()}</span>
                                    <span class="stat-label">"Rank"</span>
                                </div>
                                <div class="stat-card">
                                    <span class="stat-value">{summary.badges_count}</span>
                                    <span class="stat-label">"Badges"</span>
                                </div>
                            </div>
                            <h3>"Point history"</h3>
                            <div class="history-list">{history_view}</div>
                            <h3>"Earned badges"</h3>
                            <div class="badge-grid">{badges_view}</div>
                        }
                        .into_view()
                    }
                }
            }}
        </div>
    }
}
