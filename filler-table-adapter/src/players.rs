use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt;

use rand::Rng;

/// Minimum time between two data churns in [`PlayerList::update`].
pub const UPDATE_INTERVAL_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl TagColor {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0xff,
        }
    }
}

impl Default for TagColor {
    fn default() -> Self {
        Self::rgb(0xff, 0xff, 0xff)
    }
}

/// Formats as a CSS color, e.g. `rgba(12, 34, 56, 255)`.
impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEntry {
    pub is_local: bool,
    pub entity_id: u32,
    pub score: u32,
    pub latency: u16,
    pub is_muted: bool,
    pub is_friend: bool,
    pub name: String,
    pub tag_name: String,
    pub tag_color: TagColor,
}

impl PlayerEntry {
    /// Generates a random player. The local player is always named `local player`.
    pub fn fake<R: Rng + ?Sized>(rng: &mut R, is_local: bool) -> Self {
        let entity_id = rng.random_range(0..100_000u32);
        let name = if is_local {
            String::from("local player")
        } else {
            format!("player {entity_id}")
        };
        Self {
            is_local,
            entity_id,
            score: rng.random_range(0..100),
            latency: rng.random_range(0..500),
            is_muted: rng.random_bool(0.5),
            is_friend: rng.random_bool(0.5),
            name,
            tag_name: format!("tag {}", rng.random_range(0..1_000_000u32)),
            tag_color: TagColor::rgb(
                rng.random_range(0..0xff),
                rng.random_range(0..0xff),
                rng.random_range(0..0xff),
            ),
        }
    }

    fn matches(&self, query_lowercase: &str) -> bool {
        self.is_local
            || self.name.to_lowercase().contains(query_lowercase)
            || self.tag_name.to_lowercase().contains(query_lowercase)
    }
}

/// The player-list sample's data model.
///
/// `players` is the full data set; `entries` is what the table shows after filtering by the
/// search query and sorting (local players first, then by descending score).
#[derive(Clone, Debug, Default)]
pub struct PlayerList {
    players: Vec<PlayerEntry>,
    entries: Vec<PlayerEntry>,
    search_query: String,
    last_update_ms: u64,
}

impl PlayerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list of `count` fake players. The first one is the local player.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let mut list = Self::new();
        for i in 0..count {
            list.add_player(PlayerEntry::fake(rng, i == 0));
        }
        list.refresh();
        list
    }

    pub fn add_player(&mut self, player: PlayerEntry) {
        self.players.push(player);
    }

    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    pub fn entries(&self) -> &[PlayerEntry] {
        &self.entries
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh();
    }

    /// Rebuilds `entries` from the current players and search query.
    pub fn refresh(&mut self) {
        self.filter();
        self.sort();
    }

    fn filter(&mut self) {
        if self.search_query.is_empty() {
            self.entries.clone_from(&self.players);
            return;
        }
        let query = self.search_query.to_lowercase();
        self.entries = self
            .players
            .iter()
            .filter(|p| p.matches(&query))
            .cloned()
            .collect();
    }

    fn sort(&mut self) {
        self.entries.sort_by_key(|p| (!p.is_local, Reverse(p.score)));
    }

    /// One round of simulated server updates: the player at index 1 leaves, two new players
    /// join, and every score and latency is re-rolled.
    pub fn churn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.players.len() > 1 {
            self.players.remove(1);
        }
        self.players.push(PlayerEntry::fake(rng, false));
        self.players.push(PlayerEntry::fake(rng, false));
        for player in &mut self.players {
            player.score = rng.random_range(0..100);
            player.latency = rng.random_range(0..500);
        }
        self.refresh();
    }

    /// Churns the data at most once per [`UPDATE_INTERVAL_MS`].
    ///
    /// Returns `true` when `entries` changed.
    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        if now_ms < self.last_update_ms.saturating_add(UPDATE_INTERVAL_MS) {
            return false;
        }
        self.churn(rng);
        self.last_update_ms = now_ms;
        vdebug!(
            players = self.players.len(),
            entries = self.entries.len(),
            "PlayerList::update"
        );
        true
    }
}
