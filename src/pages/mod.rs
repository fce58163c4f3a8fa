mod badges;
mod events;
mod leaderboard;
mod profile;

pub use badges::BadgesPanel;
pub use events::EventsPanel;
pub use leaderboard::LeaderboardPanel;
pub use profile::ProfilePanel;
