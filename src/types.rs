use serde::{Deserialize, Serialize};

/// Client-local identity and points state for the current browser tab.
/// Never persisted; starts empty and is only mutated by the identity form
/// and by ranking refreshes.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub points: i64,
    pub rank: String,
    pub badges_count: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            points: 0,
            rank: "--".to_string(),
            badges_count: 0,
        }
    }
}

impl Session {
    pub fn is_set(&self) -> bool {
        !self.email.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Free,
    Paid,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub email: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub organizer: String,
    pub schedule: String,
    pub event_date: String,
    pub event_type: EventType,
    #[serde(default)]
    pub fee: f64,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub whatsapp_group: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_email: String,
    pub user_name: String,
    pub total_points: i64,
    #[serde(default)]
    pub badges_count: u32,
    #[serde(default)]
    pub recent_activity: String,
}

/// Catalog entry. The backend ships a few extra fields (`id`, `badge_type`,
/// `icon_url`); only name/description/requirements are rendered.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub badge_type: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointRecord {
    pub points_earned: i64,
    pub reason: String,
    pub date_awarded: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EarnedBadge {
    pub badge: Badge,
    pub earned_date: String,
}

/// Per-user profile aggregate from `GET /leaderboard/user/{email}`.
/// `point_history` arrives reverse-chronological from the server and is
/// rendered in that order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserRanking {
    pub ranking: LeaderboardEntry,
    #[serde(default)]
    pub point_history: Vec<PointRecord>,
    #[serde(default)]
    pub badges: Vec<EarnedBadge>,
}

#[derive(Debug, Deserialize)]
pub struct EventsEnvelope {
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardEnvelope {
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Deserialize)]
pub struct BadgesEnvelope {
    pub badges: Vec<Badge>,
}

/// The four visual panels. Exactly one is active at a time; the app starts
/// on Events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTab {
    Events,
    Leaderboard,
    Badges,
    Profile,
}

impl PanelTab {
    pub const ALL: [PanelTab; 4] = [
        PanelTab::Events,
        PanelTab::Leaderboard,
        PanelTab::Badges,
        PanelTab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelTab::Events => "Events",
            PanelTab::Leaderboard => "Leaderboard",
            PanelTab::Badges => "Badges",
            PanelTab::Profile => "My Profile",
        }
    }
}
