use leptos::*;

use crate::api::{self, EventOp};
use crate::app::{refresh_points, show_toast, Toast, ToastKind};
use crate::state::{
    accepted_toast_text, event_action, spots_left_label, ActionReply, EventAction, PanelData,
};
use crate::types::{Event, EventType, Session};

/// The events panel: loads the full collection on mount and whenever the
/// reload counter bumps, replacing the cache wholesale. No optimistic
/// updates; the cards always reflect the last server response.
#[component]
pub fn EventsPanel(
    session: RwSignal<Session>,
    reload: ReadSignal<u32>,
    set_reload: WriteSignal<u32>,
    set_toast: WriteSignal<Option<Toast>>,
) -> impl IntoView {
    let (events, set_events) = create_signal(PanelData::<Vec<Event>>::Loading);

    create_effect(move |_| {
        let _ = reload.get();
        spawn_local(async move {
            match api::fetch_events().await {
                Ok(list) => set_events.set(PanelData::Ready(list)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("events load failed: {e}").into());
                    set_events.set(PanelData::Failed);
                }
            }
        });
    });

    let run_action = move |op: EventOp, event_id: String| {
        let sess = session.get_untracked();
        if op == EventOp::Register && !sess.is_set() {
            show_toast(
                set_toast,
                "Please set your user info first".to_string(),
                ToastKind::Error,
            );
            return;
        }
        spawn_local(async move {
            match api::submit_event_action(op, &event_id, &sess).await {
                Ok(ActionReply::Accepted {
                    message,
                    points_earned,
                }) => {
                    show_toast(
                        set_toast,
                        accepted_toast_text(&message, points_earned),
                        ToastKind::Success,
                    );
                    set_reload.update(|v| *v += 1);
                    refresh_points(session);
                }
                Ok(ActionReply::Rejected { detail }) => {
                    show_toast(set_toast, detail, ToastKind::Error)
                }
                Ok(ActionReply::Malformed) | Err(_) => show_toast(
                    set_toast,
                    "Something went wrong. Please try again.".to_string(),
                    ToastKind::Error,
                ),
            }
        });
    };

    view! {
        <div class="events">
            <h2>"Upcoming Events"</h2>
            {move || {
                match events.get() {
                    PanelData::Failed => view! {
                        <div class="panel-error">"Failed to load events. Please try again later."</div>
                    }
                    .into_view(),
                    PanelData::Loading => {
                        view! { <div class="loading">"Loading events..."</div> }.into_view()
                    }
                    PanelData::Ready(list) if list.is_empty() => {
                        view! { <div class="empty-note">"No events available."</div> }.into_view()
                    }
                    PanelData::Ready(list) => {
                        let sess = session.get();
                        list.into_iter()
                            .map(|event| {
                                let action = event_action(&event, &sess);
                                let id = event.id.clone();

                                let type_chip = match event.event_type {
                                    EventType::Free => view! {
                                        <span class="event-chip chip-free">"Free"</span>
                                    },
                                    EventType::Paid => view! {
                                        <span class="event-chip chip-paid">
                                            {format!("Paid · ${:.2}", event.fee)}
                                        </span>
                                    },
                                };

                                let whatsapp = (action == EventAction::Registered)
                                    .then(|| event.whatsapp_group.clone())
                                    .flatten()
                                    .map(|link| view! {
                                        <a class="whatsapp-link" href=link target="_blank">
                                            "Join WhatsApp group"
                                        </a>
                                    });

                                let actions = match action {
                                    EventAction::NeedsIdentity => view! {
                                        <button class="action-button" disabled=true>
                                            "Set your user info to register"
                                        </button>
                                    }
                                    .into_view(),
                                    EventAction::Registered => {
                                        let id_unregister = id.clone();
                                        let id_attend = id.clone();
                                        let id_complete = id.clone();
                                        view! {
                                            <button
                                                class="action-button danger"
                                                on:click=move |_| run_action(
                                                    EventOp::Unregister,
                                                    id_unregister.clone(),
                                                )
                                            >
                                                "Unregister"
                                            </button>
                                            <button
                                                class="action-button"
                                                on:click=move |_| run_action(
                                                    EventOp::MarkAttendance,
                                                    id_attend.clone(),
                                                )
                                            >
                                                "Mark attendance"
                                            </button>
                                            <button
                                                class="action-button"
                                                on:click=move |_| run_action(
                                                    EventOp::Complete,
                                                    id_complete.clone(),
                                                )
                                            >
                                                "Complete"
                                            </button>
                                        }
                                        .into_view()
                                    }
                                    EventAction::Full => view! {
                                        <button class="action-button" disabled=true>
                                            "Event full"
                                        </button>
                                    }
                                    .into_view(),
                                    EventAction::Register => {
                                        let id_register = id.clone();
                                        view! {
                                            <button
                                                class="action-button primary"
                                                on:click=move |_| run_action(
                                                    EventOp::Register,
                                                    id_register.clone(),
                                                )
                                            >
                                                "Register"
                                            </button>
                                        }
                                        .into_view()
                                    }
                                };

                                view! {
                                    <div class="event-card">
                                        <div class="event-header">
                                            <span class="event-name">{event.name.clone()}</span>
                                            {type_chip}
                                        </div>
                                        <p class="event-description">{event.description.clone()}</p>
                                        <div class="event-meta">
                                            <span>{format!("Organizer: {}", event.organizer)}</span>
                                            <span>{event.schedule.clone()}</span>
                                            <span>{event.event_date.clone()}</span>
                                            <span>{spots_left_label(&event)}</span>
                                        </div>
                                        {whatsapp}
                                        <div class="event-actions">{actions}</div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_view()
                    }
                }
            }}
        </div>
    }
}
