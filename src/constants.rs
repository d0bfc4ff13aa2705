/// Cache keys for the clear-until-cleared resources.
pub const CACHE_KEY_YEARS: &str = "years";
pub const CACHE_KEY_PLAYERS: &str = "players";
pub const CACHE_KEY_RANKING: &str = "ranking";

/// Prefixes for parameterized cache keys.
pub const CACHE_PREFIX_PLAYER: &str = "player:";
pub const CACHE_PREFIX_PLAYERS_YEAR: &str = "players:year:";

pub const USER_AGENT: &str = concat!("rosterd/", env!("CARGO_PKG_VERSION"));
