//! Pure view-sync logic shared by the panels: identity validation, the
//! per-event action decision, points summaries and mutating-reply
//! classification. Everything here is plain data in, plain data out so it
//! can be tested off the wasm target.

use thiserror::Error;

use crate::types::{Event, LeaderboardEntry, Session};

/// Only institutional addresses may set an identity.
pub const REQUIRED_EMAIL_DOMAIN: &str = "@mergington.edu";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter both your email and name")]
    MissingField,
    #[error("Please use your {domain} email address", domain = REQUIRED_EMAIL_DOMAIN)]
    DomainMismatch,
}

/// Checks the identity form inputs before any network call. Inputs are
/// trimmed; the caller stores the trimmed values on success.
pub fn validate_identity(email: &str, name: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let name = name.trim();
    if email.is_empty() || name.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if !email.contains(REQUIRED_EMAIL_DOMAIN) {
        return Err(ValidationError::DomainMismatch);
    }
    Ok(())
}

pub fn is_registered(event: &Event, email: &str) -> bool {
    !email.is_empty() && event.participants.iter().any(|p| p.email == email)
}

pub fn is_full(event: &Event) -> bool {
    event.participants.len() >= event.max_participants as usize
}

/// The action affordance an event card renders for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventAction {
    /// No session yet: disabled prompt.
    NeedsIdentity,
    /// Registered: unregister / mark-attendance / complete buttons.
    Registered,
    /// Not registered and at capacity: disabled.
    Full,
    Register,
}

/// Priority is load-bearing: registered status dominates fullness, so a
/// registered user on a full event still gets the registered actions.
pub fn event_action(event: &Event, session: &Session) -> EventAction {
    if !session.is_set() {
        EventAction::NeedsIdentity
    } else if is_registered(event, &session.email) {
        EventAction::Registered
    } else if is_full(event) {
        EventAction::Full
    } else {
        EventAction::Register
    }
}

pub fn spots_left(event: &Event) -> u32 {
    (event.max_participants as usize).saturating_sub(event.participants.len()) as u32
}

pub fn spots_left_label(event: &Event) -> String {
    match spots_left(event) {
        1 => "1 spot left".to_string(),
        n => format!("{n} spots left"),
    }
}

/// One panel's cached fetch result, replaced wholesale on every load.
/// `begin_reload` puts the panel back on the loading placeholder,
/// displacing a stale failure message as well as stale rows.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelData<T> {
    Loading,
    Failed,
    Ready(T),
}

impl<T> PanelData<T> {
    pub fn begin_reload(&mut self) {
        *self = PanelData::Loading;
    }
}

/// What the points strip displays for the current user.
#[derive(Clone, Debug, PartialEq)]
pub struct PointsSummary {
    pub points: i64,
    pub rank: String,
    pub badges_count: u32,
}

impl PointsSummary {
    /// The display state for a user with no ranking record yet. A missing
    /// record is not an error condition.
    pub fn zero() -> Self {
        Self {
            points: 0,
            rank: "--".to_string(),
            badges_count: 0,
        }
    }

    pub fn from_ranking(ranking: &LeaderboardEntry) -> Self {
        Self {
            points: ranking.total_points,
            rank: format!("#{}", ranking.rank),
            badges_count: ranking.badges_count,
        }
    }
}

impl Session {
    pub fn apply(&mut self, summary: &PointsSummary) {
        self.points = summary.points;
        self.rank = summary.rank.clone();
        self.badges_count = summary.badges_count;
    }
}

/// Outcome of a mutating event call, classified by body shape rather than
/// HTTP status: the backend ships `detail` alongside 4xx statuses, and
/// `message` with 2xx.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionReply {
    Accepted {
        message: String,
        points_earned: Option<i64>,
    },
    Rejected {
        detail: String,
    },
    Malformed,
}

pub fn classify_reply(body: &serde_json::Value) -> ActionReply {
    if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
        return ActionReply::Accepted {
            message: message.to_string(),
            points_earned: body.get("points_earned").and_then(|p| p.as_i64()),
        };
    }
    if let Some(detail) = body.get("detail").and_then(|d| d.as_str()) {
        return ActionReply::Rejected {
            detail: detail.to_string(),
        };
    }
    ActionReply::Malformed
}

/// Toast text for an accepted action, with the points delta when present.
pub fn accepted_toast_text(message: &str, points_earned: Option<i64>) -> String {
    match points_earned {
        Some(points) if points > 0 => format!("{message} (+{points} points)"),
        _ => message.to_string(),
    }
}

/// Cosmetic tier class for leaderboard rows; ranks 1-3 get medal colors.
pub fn rank_tier_class(rank: u32) -> &'static str {
    match rank {
        1 => "rank-gold",
        2 => "rank-silver",
        3 => "rank-bronze",
        _ => "rank-default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventType, Participant};

    fn event(participants: &[&str], max: u32) -> Event {
        Event {
            id: "e1".to_string(),
            name: "Chess Club".to_string(),
            description: String::new(),
            organizer: "Dr. Smith".to_string(),
            schedule: "Fridays".to_string(),
            event_date: "2024-12-15".to_string(),
            event_type: EventType::Free,
            fee: 0.0,
            max_participants: max,
            participants: participants
                .iter()
                .map(|email| Participant {
                    email: email.to_string(),
                    name: "Someone".to_string(),
                })
                .collect(),
            whatsapp_group: None,
        }
    }

    fn session(email: &str) -> Session {
        Session {
            email: email.to_string(),
            name: "Ann".to_string(),
            ..Session::default()
        }
    }

    #[test]
    fn identity_requires_both_fields() {
        assert_eq!(validate_identity("", "Ann"), Err(ValidationError::MissingField));
        assert_eq!(
            validate_identity("a@mergington.edu", "   "),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn identity_requires_institutional_domain() {
        assert_eq!(
            validate_identity("a@other.org", "Ann"),
            Err(ValidationError::DomainMismatch)
        );
        assert_eq!(validate_identity("a@mergington.edu", "Ann"), Ok(()));
        assert_eq!(validate_identity("  a@mergington.edu  ", " Ann "), Ok(()));
    }

    #[test]
    fn registration_is_participant_membership() {
        let e = event(&["a@mergington.edu", "b@mergington.edu"], 10);
        assert!(is_registered(&e, "a@mergington.edu"));
        assert!(!is_registered(&e, "c@mergington.edu"));
        assert!(!is_registered(&e, ""));
    }

    #[test]
    fn no_session_always_prompts_even_when_full() {
        let e = event(&["a@mergington.edu"], 1);
        assert_eq!(event_action(&e, &Session::default()), EventAction::NeedsIdentity);
    }

    #[test]
    fn registered_dominates_full() {
        let e = event(&["a@mergington.edu"], 1);
        assert!(is_full(&e));
        assert_eq!(
            event_action(&e, &session("a@mergington.edu")),
            EventAction::Registered
        );
    }

    #[test]
    fn full_blocks_unregistered_users() {
        let e = event(&["a@mergington.edu"], 1);
        assert_eq!(event_action(&e, &session("b@mergington.edu")), EventAction::Full);
    }

    #[test]
    fn open_event_offers_register() {
        let e = event(&["a@mergington.edu"], 5);
        assert_eq!(
            event_action(&e, &session("b@mergington.edu")),
            EventAction::Register
        );
        assert_eq!(spots_left(&e), 4);
    }

    #[test]
    fn spots_label_counts_down_to_full() {
        assert_eq!(spots_left_label(&event(&[], 12)), "12 spots left");
        assert_eq!(spots_left_label(&event(&["a@mergington.edu"], 2)), "1 spot left");
        assert_eq!(spots_left_label(&event(&["a@mergington.edu"], 1)), "0 spots left");
    }

    #[test]
    fn manual_reload_displaces_a_stale_failure() {
        let mut panel: PanelData<Vec<i32>> = PanelData::Failed;
        panel.begin_reload();
        assert_eq!(panel, PanelData::Loading);

        let mut panel = PanelData::Ready(vec![1, 2]);
        panel.begin_reload();
        assert_eq!(panel, PanelData::Loading);
    }

    #[test]
    fn message_body_is_accepted_with_optional_points() {
        let body = serde_json::json!({
            "message": "Successfully registered for Chess Club",
            "points_earned": 10,
            "total_points": 95
        });
        assert_eq!(
            classify_reply(&body),
            ActionReply::Accepted {
                message: "Successfully registered for Chess Club".to_string(),
                points_earned: Some(10),
            }
        );

        let body = serde_json::json!({"message": "Unregistered from Chess Club"});
        assert_eq!(
            classify_reply(&body),
            ActionReply::Accepted {
                message: "Unregistered from Chess Club".to_string(),
                points_earned: None,
            }
        );
    }

    #[test]
    fn detail_body_is_rejected() {
        let body = serde_json::json!({"detail": "Event is full"});
        assert_eq!(
            classify_reply(&body),
            ActionReply::Rejected {
                detail: "Event is full".to_string()
            }
        );
    }

    #[test]
    fn unrecognized_body_is_malformed() {
        assert_eq!(classify_reply(&serde_json::json!({})), ActionReply::Malformed);
        assert_eq!(classify_reply(&serde_json::json!(null)), ActionReply::Malformed);
        assert_eq!(classify_reply(&serde_json::json!([1, 2])), ActionReply::Malformed);
    }

    #[test]
    fn zero_summary_matches_missing_ranking_state() {
        let zero = PointsSummary::zero();
        assert_eq!(zero.points, 0);
        assert_eq!(zero.rank, "--");
        assert_eq!(zero.badges_count, 0);

        let mut s = session("a@mergington.edu");
        s.points = 50;
        s.apply(&zero);
        assert_eq!(s.points, 0);
        assert_eq!(s.rank, "--");
    }

    #[test]
    fn summary_from_ranking_formats_rank() {
        let entry = LeaderboardEntry {
            rank: 3,
            user_email: "a@mergington.edu".to_string(),
            user_name: "Ann".to_string(),
            total_points: 85,
            badges_count: 2,
            recent_activity: String::new(),
        };
        let summary = PointsSummary::from_ranking(&entry);
        assert_eq!(summary.points, 85);
        assert_eq!(summary.rank, "#3");
        assert_eq!(summary.badges_count, 2);
    }

    #[test]
    fn accepted_toast_appends_points_delta() {
        assert_eq!(
            accepted_toast_text("Attendance marked", Some(10)),
            "Attendance marked (+10 points)"
        );
        assert_eq!(accepted_toast_text("Unregistered", None), "Unregistered");
        assert_eq!(accepted_toast_text("Done", Some(0)), "Done");
    }

    #[test]
    fn top_three_ranks_get_medal_classes() {
        assert_eq!(rank_tier_class(1), "rank-gold");
        assert_eq!(rank_tier_class(2), "rank-silver");
        assert_eq!(rank_tier_class(3), "rank-bronze");
        assert_eq!(rank_tier_class(4), "rank-default");
        assert_eq!(rank_tier_class(50), "rank-default");
    }
}
