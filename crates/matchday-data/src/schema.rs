//! Entity schema trait and the table dependency map.
//!
//! Each entity declares its backend table and the tables whose cached
//! reads become stale when it changes. The gateway invalidates from these
//! constants, so adding a dependent relationship means touching the entity
//! declaration, never the call sites.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entities::{
    Club, Coach, Competition, Event, Federation, Game, News, Player, Referee,
    RegionalAssociation, Team,
};

/// A record stored in one backend table.
///
/// `Draft` is the insert payload and `Patch` the partial update payload,
/// so each table's shapes are checked at compile time while the gateway
/// keeps a single code path.
pub trait EntityRecord: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Insert payload for this table.
    type Draft: Serialize + Send + Sync;
    /// Partial update payload for this table.
    type Patch: Serialize + Send + Sync;

    /// Backend table holding records of this type.
    const TABLE: &'static str;

    /// Tables whose cached reads derive from this one.
    const DEPENDENTS: &'static [&'static str] = &[];
}

/// Every entity table with its dependents, in one place.
///
/// Derived from the per-entity constants so the static trait path and this
/// dynamic lookup can never disagree.
pub const ENTITY_TABLES: &[(&str, &[&str])] = &[
    (Club::TABLE, Club::DEPENDENTS),
    (Coach::TABLE, Coach::DEPENDENTS),
    (Competition::TABLE, Competition::DEPENDENTS),
    (Event::TABLE, Event::DEPENDENTS),
    (Federation::TABLE, Federation::DEPENDENTS),
    (Game::TABLE, Game::DEPENDENTS),
    (News::TABLE, News::DEPENDENTS),
    (Player::TABLE, Player::DEPENDENTS),
    (Referee::TABLE, Referee::DEPENDENTS),
    (RegionalAssociation::TABLE, RegionalAssociation::DEPENDENTS),
    (Team::TABLE, Team::DEPENDENTS),
];

/// Dependent tables for a table name; unknown tables have none.
pub fn dependents_of(table: &str) -> &'static [&'static str] {
    ENTITY_TABLES
        .iter()
        .find(|(name, _)| *name == table)
        .map(|(_, dependents)| *dependents)
        .unwrap_or(&[])
}

/// The full set of cache tags to drop after mutating `table`: itself plus
/// its dependents.
pub fn invalidation_set(table: &str) -> Vec<&str> {
    let mut tags = vec![table];
    tags.extend_from_slice(dependents_of(table));
    tags
}
