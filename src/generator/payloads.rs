//! Per-kind event builders.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{Roster, TelemetryGenerator};
use crate::domain::telemetry_event::{
    CharacterData, Common, DamageData, ItemData, ItemPickupData, KillData, MatchStartData,
    PositionData, RosterEntry, StackedItem,
};
use crate::domain::{Character, EventData, EventKind, Item, Location, MapBounds, Match, Player, TelemetryEvent};

const DAMAGE_REASON: &str = "ArmShot";
const DAMAGE_TYPE_CATEGORY: &str = "Damage_Gun";
const KILL_WEAPON: &str = "Item_Weapon_AK47_C";
const WEATHER: &str = "Clear";
const CAMERA_VIEW: &str = "FPP";
const MATCH_START_IS_GAME: f64 = 0.5;
const MAX_ELEVATION: f64 = 1000.0;

impl TelemetryGenerator {
    /// Random point inside the map bounds.
    pub(super) fn location(&mut self, bounds: MapBounds) -> Location {
        Location {
            x: self.rng.gen_range(0.0..=bounds.max_x),
            y: self.rng.gen_range(0.0..=bounds.max_y),
            z: self.rng.gen_range(0.0..=MAX_ELEVATION),
        }
    }

    /// Snapshot of `player` at a fresh random location.
    pub(super) fn character(&mut self, player: &Player, bounds: MapBounds) -> Character {
        let location = self.location(bounds);
        Character {
            account_id: player.account_id,
            name: player.player_name.clone(),
            team_id: self.rng.gen_range(1..=25),
            health: self.rng.gen_range(0.0..=100.0),
            location,
            ranking: self.rng.gen_range(1..=100),
            is_in_blue_zone: self.rng.r#gen(),
            is_in_red_zone: self.rng.r#gen(),
        }
    }

    /// Snapshot of a randomly picked player.
    fn any_character(&mut self, roster: &Roster<'_>, bounds: MapBounds) -> Character {
        let player = roster.pick(&mut self.rng);
        self.character(player, bounds)
    }

    fn item(&mut self) -> Item {
        self.catalog.sample_item(&mut self.rng).unwrap_or_default()
    }

    fn attack_id(&mut self) -> u32 {
        self.rng.gen_range(1000..=9999)
    }

    fn distance(&mut self) -> f64 {
        self.rng.gen_range(10.0..=500.0)
    }

    /// `LogMatchStart` at the match start with 50 to 100 roster entries,
    /// sampled with replacement.
    pub(super) fn match_start_event(&mut self, roster: &Roster<'_>, game: &Match) -> TelemetryEvent {
        let bounds = self.catalog.bounds(game.map_name);
        let size = self.rng.gen_range(50..=100);
        let characters = (0..size)
            .map(|_| RosterEntry::unarmed(self.any_character(roster, bounds)))
            .collect();

        TelemetryEvent {
            timestamp: game.created_at,
            common: Common {
                is_game: MATCH_START_IS_GAME,
            },
            match_id: game.match_id,
            data: EventData::MatchStart(MatchStartData {
                map_name: game.map_name,
                weather_id: WEATHER.to_string(),
                characters,
                camera_view_behaviour: CAMERA_VIEW.to_string(),
                team_size: game.game_mode.team_size(),
                is_custom_game: false,
                is_event_mode: false,
            }),
            ingested_at: Utc::now(),
        }
    }

    /// One in-match event of `kind` at `at`.
    ///
    /// Participants of two-player events are drawn independently, so the
    /// killer and the victim can be the same account.
    pub(super) fn random_event(
        &mut self,
        kind: EventKind,
        roster: &Roster<'_>,
        game: &Match,
        at: DateTime<Utc>,
    ) -> TelemetryEvent {
        let bounds = self.catalog.bounds(game.map_name);
        let data = match kind {
            EventKind::LogPlayerKillV2 => EventData::Kill(KillData {
                attack_id: self.attack_id(),
                killer: self.any_character(roster, bounds),
                victim: self.any_character(roster, bounds),
                damage_reason: DAMAGE_REASON.to_string(),
                damage_type_category: DAMAGE_TYPE_CATEGORY.to_string(),
                damage_causer_name: KILL_WEAPON.to_string(),
                distance: self.distance(),
                damage: self.rng.gen_range(80.0..=120.0),
            }),
            EventKind::LogPlayerTakeDamage => EventData::TakeDamage(DamageData {
                attack_id: self.attack_id(),
                attacker: self.any_character(roster, bounds),
                victim: self.any_character(roster, bounds),
                damage_type_category: DAMAGE_TYPE_CATEGORY.to_string(),
                damage_reason: DAMAGE_REASON.to_string(),
                damage: self.rng.gen_range(10.0..=80.0),
                distance: self.distance(),
            }),
            EventKind::LogItemPickup => EventData::ItemPickup(ItemPickupData {
                character: self.any_character(roster, bounds),
                item: StackedItem {
                    item: self.item(),
                    stack_count: self.rng.gen_range(1..=10),
                },
            }),
            EventKind::LogPlayerPosition => EventData::Position(PositionData {
                character: self.any_character(roster, bounds),
                elapsed_time: self.rng.gen_range(0..=2400),
                num_alive_players: self.rng.gen_range(10..=100),
            }),
            EventKind::LogItemDrop => EventData::ItemDrop(ItemData {
                character: self.any_character(roster, bounds),
                item: self.item(),
            }),
            EventKind::LogItemEquip => EventData::ItemEquip(ItemData {
                character: self.any_character(roster, bounds),
                item: self.item(),
            }),
            other => EventData::CharacterOnly {
                kind: other,
                data: CharacterData {
                    character: self.any_character(roster, bounds),
                },
            },
        };

        TelemetryEvent {
            timestamp: at,
            common: Common {
                is_game: self.rng.gen_range(1.0..3.0),
            },
            match_id: game.match_id,
            data,
            ingested_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{Catalog, GameMode, MapName, MatchId};
    use crate::generator::EventWeights;

    fn fixture() -> (TelemetryGenerator, Vec<Player>, Match) {
        let Ok(weights) = EventWeights::standard() else {
            panic!("standard weights rejected");
        };
        let mut generator = TelemetryGenerator::seeded(Catalog::standard(), weights, 11);
        let players = generator.generate_players(4);
        let match_id = MatchId::new();
        let game = Match {
            match_id,
            map_name: MapName::Haven,
            game_mode: GameMode::Squad,
            match_type: "Official".to_string(),
            created_at: Utc::now() - Duration::hours(2),
            duration: 1500,
            telemetry_url: Match::telemetry_url_for(match_id),
            ingested_at: Utc::now(),
        };
        (generator, players, game)
    }

    fn in_bounds(location: &Location, bounds: MapBounds) -> bool {
        (0.0..=bounds.max_x).contains(&location.x)
            && (0.0..=bounds.max_y).contains(&location.y)
            && (0.0..=MAX_ELEVATION).contains(&location.z)
    }

    #[test]
    fn match_start_roster_and_team_size() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(&players) else {
            panic!("roster");
        };
        let event = generator.match_start_event(&roster, &game);
        let EventData::MatchStart(start) = &event.data else {
            panic!("expected match start, got {:?}", event.kind());
        };
        assert!((50..=100).contains(&start.characters.len()));
        assert_eq!(start.team_size, 4);
        assert_eq!(start.map_name, MapName::Haven);
        assert_eq!(event.common.is_game, 0.5);
        let bounds = MapName::Haven.default_bounds();
        assert!(start.characters.iter().all(|c| in_bounds(&c.character.location, bounds)));
    }

    #[test]
    fn kill_payload_ranges() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(&players) else {
            panic!("roster");
        };
        for _ in 0..200 {
            let event = generator.random_event(EventKind::LogPlayerKillV2, &roster, &game, game.created_at);
            let EventData::Kill(kill) = &event.data else {
                panic!("expected kill");
            };
            assert!((80.0..=120.0).contains(&kill.damage));
            assert!((10.0..=500.0).contains(&kill.distance));
            assert!((1000..=9999).contains(&kill.attack_id));
            assert_eq!(kill.damage_causer_name, KILL_WEAPON);
            assert!((1..=25).contains(&kill.killer.team_id));
            assert!((1.0..3.0).contains(&event.common.is_game));
        }
    }

    #[test]
    fn damage_payload_ranges() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(&players) else {
            panic!("roster");
        };
        for _ in 0..200 {
            let event =
                generator.random_event(EventKind::LogPlayerTakeDamage, &roster, &game, game.created_at);
            let EventData::TakeDamage(hit) = &event.data else {
                panic!("expected damage");
            };
            assert!((10.0..=80.0).contains(&hit.damage));
            assert_eq!(hit.damage_reason, "ArmShot");
            assert_eq!(hit.damage_type_category, "Damage_Gun");
        }
    }

    #[test]
    fn self_kill_is_possible_with_one_player() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(players.get(..1).unwrap_or_default()) else {
            panic!("roster");
        };
        let event = generator.random_event(EventKind::LogPlayerKillV2, &roster, &game, game.created_at);
        let EventData::Kill(kill) = &event.data else {
            panic!("expected kill");
        };
        assert_eq!(kill.killer.account_id, kill.victim.account_id);
    }

    #[test]
    fn item_kinds_carry_items() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(&players) else {
            panic!("roster");
        };
        let pickup = generator.random_event(EventKind::LogItemPickup, &roster, &game, game.created_at);
        let EventData::ItemPickup(p) = &pickup.data else {
            panic!("expected pickup");
        };
        assert!((1..=10).contains(&p.item.stack_count));
        assert!(!p.item.item.item_id.is_empty());

        for kind in [EventKind::LogItemDrop, EventKind::LogItemEquip] {
            let event = generator.random_event(kind, &roster, &game, game.created_at);
            assert_eq!(event.kind(), kind);
            let (EventData::ItemDrop(d) | EventData::ItemEquip(d)) = &event.data else {
                panic!("expected item payload for {}", kind.as_str());
            };
            assert!(!d.item.item_id.is_empty());
        }
    }

    #[test]
    fn position_payload_ranges() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(&players) else {
            panic!("roster");
        };
        let event = generator.random_event(EventKind::LogPlayerPosition, &roster, &game, game.created_at);
        let EventData::Position(pos) = &event.data else {
            panic!("expected position");
        };
        assert!(pos.elapsed_time <= 2400);
        assert!((10..=100).contains(&pos.num_alive_players));
        assert!(in_bounds(&pos.character.location, MapName::Haven.default_bounds()));
    }

    #[test]
    fn other_kinds_are_character_only() {
        let (mut generator, players, game) = fixture();
        let Some(roster) = Roster::new(&players) else {
            panic!("roster");
        };
        for kind in [EventKind::LogHeal, EventKind::LogVehicleRide, EventKind::LogPlayerAttack] {
            let event = generator.random_event(kind, &roster, &game, game.created_at);
            assert_eq!(event.kind(), kind);
            assert!(matches!(event.data, EventData::CharacterOnly { .. }));
        }
    }
}
