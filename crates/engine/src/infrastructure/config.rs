//! Engine configuration loaded from the environment.
//!
//! `main` loads `.env` with `dotenvy` first, so values may come from either.

/// Default page size for the party activity feed.
pub const DEFAULT_ACTIVITY_FEED_LIMIT: usize = 50;

const DEFAULT_LOG_FILTER: &str = "chorewars_engine=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the loot RNG. `None` uses the thread RNG.
    pub loot_seed: Option<u64>,
    /// Page size used when a feed query does not specify one.
    pub activity_feed_limit: usize,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            loot_seed: None,
            activity_feed_limit: DEFAULT_ACTIVITY_FEED_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup. Unparseable values
    /// fall back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let loot_seed = lookup("CHOREWARS_LOOT_SEED").and_then(|raw| match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!(value = %raw, "Invalid CHOREWARS_LOOT_SEED, using thread RNG");
                None
            }
        });

        let activity_feed_limit = lookup("CHOREWARS_ACTIVITY_FEED_LIMIT")
            .map(|raw| match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_ACTIVITY_FEED_LIMIT,
                        "Invalid CHOREWARS_ACTIVITY_FEED_LIMIT, using default"
                    );
                    DEFAULT_ACTIVITY_FEED_LIMIT
                }
            })
            .unwrap_or(defaults.activity_feed_limit);

        let log_filter = lookup("CHOREWARS_LOG")
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            loot_seed,
            activity_feed_limit,
            log_filter,
        }
    }
}
