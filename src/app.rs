use gloo_timers::callback::Timeout;
use leptos::*;

use crate::api;
use crate::pages::{BadgesPanel, EventsPanel, LeaderboardPanel, ProfilePanel};
use crate::state::{validate_identity, PointsSummary};
use crate::types::{PanelTab, Session};

/// Toasts auto-dismiss after this long. Each toast schedules its own
/// one-shot timer; a newer toast replaces the content, but every timer
/// still fires and clears whatever is showing when it lands.
pub const TOAST_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

pub fn show_toast(set_toast: WriteSignal<Option<Toast>>, message: String, kind: ToastKind) {
    set_toast.set(Some(Toast { message, kind }));
    Timeout::new(TOAST_DISMISS_MS, move || set_toast.set(None)).forget();
}

/// Refetches the current user's ranking and rewrites the session's points
/// strip. Absence of a ranking record (or any fetch failure) displays the
/// zero state; this never surfaces an error.
pub fn refresh_points(session: RwSignal<Session>) {
    let email = session.with_untracked(|s| s.email.clone());
    if email.is_empty() {
        return;
    }
    spawn_local(async move {
        let summary = match api::fetch_user_ranking(&email).await {
            Ok(Some(ranking)) => PointsSummary::from_ranking(&ranking.ranking),
            Ok(None) => PointsSummary::zero(),
            Err(e) => {
                web_sys::console::warn_1(&format!("points refresh failed: {e}").into());
                PointsSummary::zero()
            }
        };
        session.update(|s| s.apply(&summary));
    });
}

/// Whether entering a tab forces that panel's cache to reload.
/// Leaderboard and Badges refetch on every visit; Profile only once an
/// identity is set; Events keeps its cache and reloads after mutating
/// actions instead.
fn reload_on_enter(tab: PanelTab, session_set: bool) -> bool {
    match tab {
        PanelTab::Leaderboard | PanelTab::Badges => true,
        PanelTab::Profile => session_set,
        PanelTab::Events => false,
    }
}

/// Saving an identity refetches the profile only when the profile panel
/// is the one on screen; otherwise the next tab entry loads it.
fn reload_profile_on_identity(active: PanelTab) -> bool {
    active == PanelTab::Profile
}

fn panel_class(active: PanelTab, panel: PanelTab) -> &'static str {
    if active == panel {
        "panel active"
    } else {
        "panel"
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session = create_rw_signal(Session::default());
    let (toast, set_toast) = create_signal(Option::<Toast>::None);
    let (tab, set_tab) = create_signal(PanelTab::Events);

    // Per-panel reload counters. All four panels stay mounted; bumping a
    // counter forces that panel's next fetch/render cycle. The initial
    // mount fetches events, leaderboard and badges in parallel.
    let (events_reload, set_events_reload) = create_signal(0u32);
    let (leaderboard_reload, set_leaderboard_reload) = create_signal(0u32);
    let (badges_reload, set_badges_reload) = create_signal(0u32);
    let (profile_reload, set_profile_reload) = create_signal(0u32);

    let bump_reload = move |panel: PanelTab| match panel {
        PanelTab::Leaderboard => set_leaderboard_reload.update(|v| *v += 1),
        PanelTab::Badges => set_badges_reload.update(|v| *v += 1),
        PanelTab::Profile => set_profile_reload.update(|v| *v += 1),
        PanelTab::Events => set_events_reload.update(|v| *v += 1),
    };

    let switch_tab = move |next: PanelTab| {
        if reload_on_enter(next, session.with_untracked(|s| s.is_set())) {
            bump_reload(next);
        }
        set_tab.set(next);
    };

    let (email_input, set_email_input) = create_signal(String::new());
    let (name_input, set_name_input) = create_signal(String::new());

    let save_identity = move |_| {
        let email = email_input.get();
        let name = name_input.get();
        match validate_identity(&email, &name) {
            Ok(()) => {
                let name = name.trim().to_string();
                session.update(|s| {
                    s.email = email.trim().to_string();
                    s.name = name.clone();
                });
                show_toast(set_toast, format!("Welcome, {name}!"), ToastKind::Success);
                refresh_points(session);
                if reload_profile_on_identity(tab.get_untracked()) {
                    bump_reload(PanelTab::Profile);
                }
            }
            Err(e) => show_toast(set_toast, e.to_string(), ToastKind::Error),
        }
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1 class="app-title">"Mergington High School Events"</h1>

                <div class="identity-bar">
                    <input
                        type="email"
                        class="identity-input"
                        placeholder="you@mergington.edu"
                        on:input=move |ev| set_email_input.set(event_target_value(&ev))
                        prop:value=email_input
                    />
                    <input
                        type="text"
                        class="identity-input"
                        placeholder="Your name"
                        on:input=move |ev| set_name_input.set(event_target_value(&ev))
                        prop:value=name_input
                    />
                    <button class="identity-save" on:click=save_identity>
                        "Save"
                    </button>
                </div>

                {move || {
                    let s = session.get();
                    s.is_set().then(|| view! {
                        <div class="points-strip">
                            <span class="points-user">{s.name.clone()}</span>
                            <span class="points-item">{format!("{} points", s.points)}</span>
                            <span class="points-item">{format!("Rank {}", s.rank)}</span>
                            <span class="points-item">{format!("{} badges", s.badges_count)}</span>
                        </div>
                    })
                }}

                <nav class="tab-bar">
                    {PanelTab::ALL
                        .into_iter()
                        .map(|t| {
                            let tab_class = move || {
                                if tab.get() == t { "tab-button active" } else { "tab-button" }
                            };
                            view! {
                                <button class=tab_class on:click=move |_| switch_tab(t)>
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
            </header>

            {move || toast.get().map(|t| view! {
                <div class=t.kind.class()>{t.message}</div>
            })}

            <main class="panels">
                <section class=move || panel_class(tab.get(), PanelTab::Events)>
                    <EventsPanel
                        session=session
                        reload=events_reload
                        set_reload=set_events_reload
                        set_toast=set_toast
                    />
                </section>
                <section class=move || panel_class(tab.get(), PanelTab::Leaderboard)>
                    <LeaderboardPanel session=session reload=leaderboard_reload />
                </section>
                <section class=move || panel_class(tab.get(), PanelTab::Badges)>
                    <BadgesPanel reload=badges_reload />
                </section>
                <section class=move || panel_class(tab.get(), PanelTab::Profile)>
                    <ProfilePanel session=session reload=profile_reload />
                </section>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_panel_gets_active_class() {
        assert_eq!(panel_class(PanelTab::Events, PanelTab::Events), "panel active");
        assert_eq!(panel_class(PanelTab::Events, PanelTab::Profile), "panel");
        assert_eq!(panel_class(PanelTab::Badges, PanelTab::Badges), "panel active");
    }

    #[test]
    fn tab_entry_reload_policy() {
        assert!(reload_on_enter(PanelTab::Leaderboard, false));
        assert!(reload_on_enter(PanelTab::Leaderboard, true));
        assert!(reload_on_enter(PanelTab::Badges, false));
        // Profile fetches nothing without an identity.
        assert!(!reload_on_enter(PanelTab::Profile, false));
        assert!(reload_on_enter(PanelTab::Profile, true));
        // Events keeps its cache across tab switches.
        assert!(!reload_on_enter(PanelTab::Events, true));
    }

    #[test]
    fn saving_identity_refetches_profile_only_when_open() {
        assert!(reload_profile_on_identity(PanelTab::Profile));
        assert!(!reload_profile_on_identity(PanelTab::Events));
        assert!(!reload_profile_on_identity(PanelTab::Leaderboard));
        assert!(!reload_profile_on_identity(PanelTab::Badges));
    }

    #[test]
    fn toast_kinds_map_to_css_classes() {
        assert_eq!(ToastKind::Success.class(), "toast toast-success");
        assert_eq!(ToastKind::Error.class(), "toast toast-error");
    }
}
