//! Synthetic telemetry generator.
//!
//! [`TelemetryGenerator`] produces the three related datasets in order:
//! players, then matches, then events referencing both by id. The map and
//! item tables ([`Catalog`]) and the event-kind weights ([`EventWeights`])
//! are immutable values supplied at construction.
//!
//! Randomness comes from a [`ChaCha8Rng`] owned by the generator. It is
//! seeded from OS entropy unless a seed is given, in which case every
//! random field of a run, ids included, is reproducible. Timestamps are still anchored
//! on the wall clock.

mod payloads;
pub mod weights;

use chrono::{Duration, Utc};
use rand::distributions::{Distribution, Standard};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::game_match::MATCH_TYPE_OFFICIAL;
use crate::domain::{
    AccountId, Catalog, GameMode, Match, MatchId, Platform, Player, Region, TelemetryEvent,
};

pub use weights::{EventWeights, WeightProfile};

/// Matches start between this many hours ago...
const MIN_AGE_HOURS: i64 = 1;
/// ...and one week ago.
const MAX_AGE_HOURS: i64 = 24 * 7;
/// Shortest match, in seconds.
const MIN_DURATION_SECS: u32 = 1200;
/// Longest match, in seconds.
const MAX_DURATION_SECS: u32 = 2400;

impl Distribution<Platform> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Platform {
        Platform::ALL.choose(rng).copied().unwrap_or(Platform::Steam)
    }
}

impl Distribution<Region> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Region {
        Region::ALL.choose(rng).copied().unwrap_or(Region::NorthAmerica)
    }
}

impl Distribution<GameMode> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameMode {
        GameMode::ALL.choose(rng).copied().unwrap_or(GameMode::Squad)
    }
}

/// The three datasets of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedData {
    /// Generated players.
    pub players: Vec<Player>,
    /// Generated matches.
    pub matches: Vec<Match>,
    /// Generated events, grouped by match.
    pub events: Vec<TelemetryEvent>,
}

/// Random player, match and telemetry factory.
#[derive(Debug, Clone)]
pub struct TelemetryGenerator {
    catalog: Catalog,
    weights: EventWeights,
    rng: ChaCha8Rng,
}

impl TelemetryGenerator {
    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn new(catalog: Catalog, weights: EventWeights) -> Self {
        Self {
            catalog,
            weights,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed.
    #[must_use]
    pub fn seeded(catalog: Catalog, weights: EventWeights, seed: u64) -> Self {
        Self {
            catalog,
            weights,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator from an optional seed.
    #[must_use]
    pub fn with_seed(catalog: Catalog, weights: EventWeights, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(catalog, weights, seed),
            None => Self::new(catalog, weights),
        }
    }

    /// Version-4 UUID drawn from the generator's RNG, so seeded runs
    /// reproduce their ids.
    fn random_uuid(&mut self) -> uuid::Uuid {
        uuid::Builder::from_random_bytes(self.rng.r#gen()).into_uuid()
    }

    /// Generates `count` players named `Player_0000` onwards.
    pub fn generate_players(&mut self, count: usize) -> Vec<Player> {
        let players: Vec<Player> = (0..count)
            .map(|i| Player {
                account_id: AccountId::from(self.random_uuid()),
                player_name: Player::name_for(i),
                platform: self.rng.r#gen(),
                region: self.rng.r#gen(),
                ingested_at: Utc::now(),
            })
            .collect();
        tracing::debug!(count = players.len(), "generated players");
        players
    }

    /// Generates `count` official matches that started within the last
    /// week and last 20 to 40 minutes.
    pub fn generate_matches(&mut self, count: usize) -> Vec<Match> {
        let matches: Vec<Match> = (0..count)
            .map(|_| {
                let match_id = MatchId::from(self.random_uuid());
                let age = Duration::hours(self.rng.gen_range(MIN_AGE_HOURS..=MAX_AGE_HOURS));
                Match {
                    match_id,
                    map_name: self.catalog.sample_map(&mut self.rng),
                    game_mode: self.rng.r#gen(),
                    match_type: MATCH_TYPE_OFFICIAL.to_string(),
                    created_at: Utc::now() - age,
                    duration: self.rng.gen_range(MIN_DURATION_SECS..=MAX_DURATION_SECS),
                    telemetry_url: Match::telemetry_url_for(match_id),
                    ingested_at: Utc::now(),
                }
            })
            .collect();
        tracing::debug!(count = matches.len(), "generated matches");
        matches
    }

    /// Generates telemetry for every match, in match order.
    ///
    /// Each match contributes one `LogMatchStart` at its start time
    /// followed by `events_per_match` events in draw order, so the result
    /// holds `matches.len() * (events_per_match + 1)` events. Nothing is
    /// generated when `players` is empty, since every payload needs at
    /// least one character.
    pub fn generate_events(
        &mut self,
        players: &[Player],
        matches: &[Match],
        events_per_match: usize,
    ) -> Vec<TelemetryEvent> {
        let Some(roster) = Roster::new(players) else {
            tracing::warn!(
                matches = matches.len(),
                "no players to draw from; skipping telemetry"
            );
            return Vec::new();
        };

        let mut events = Vec::with_capacity(matches.len().saturating_mul(events_per_match.saturating_add(1)));
        for game in matches {
            events.push(self.match_start_event(&roster, game));
            for _ in 0..events_per_match {
                let kind = self.weights.sample(&mut self.rng);
                let offset_ms = self
                    .rng
                    .gen_range(0..=i64::from(game.duration).saturating_mul(1000));
                let at = game.created_at + Duration::milliseconds(offset_ms);
                events.push(self.random_event(kind, &roster, game, at));
            }
            tracing::debug!(match_id = %game.match_id, map = game.map_name.as_str(), "generated match telemetry");
        }
        events
    }

    /// Runs the full pipeline: players, matches, then events.
    pub fn generate_all(
        &mut self,
        num_players: usize,
        num_matches: usize,
        events_per_match: usize,
    ) -> GeneratedData {
        let players = self.generate_players(num_players);
        let matches = self.generate_matches(num_matches);
        let events = self.generate_events(&players, &matches, events_per_match);
        tracing::info!(
            players = players.len(),
            matches = matches.len(),
            events = events.len(),
            "generated datasets"
        );
        GeneratedData {
            players,
            matches,
            events,
        }
    }
}

/// Non-empty view over the players events are drawn from. Sampling is
/// uniform and with replacement.
#[derive(Debug, Clone, Copy)]
struct Roster<'a> {
    players: &'a [Player],
    first: &'a Player,
}

impl<'a> Roster<'a> {
    fn new(players: &'a [Player]) -> Option<Self> {
        let first = players.first()?;
        Some(Self { players, first })
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a Player {
        self.players.choose(rng).unwrap_or(self.first)
    }
}
