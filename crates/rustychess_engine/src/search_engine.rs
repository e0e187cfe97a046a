//! Async wrapper that exposes a [`MoveSearch`] as a [`DecisionEngine`].

use super::engine::{DecisionEngine, EngineFactory};
use super::error::EngineError;
use super::evaluator::PointsEval;
use super::greedy::Greedy;
use super::search::{AlphaBeta, MoveSearch};
use derive_getters::Getters;
use derive_setters::Setters;
use rustychess_core::Move;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Search strategy behind the engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchKind {
    /// Negamax alpha-beta with capture extension and transposition table.
    #[default]
    AlphaBeta,
    /// Best immediate position, one ply deep.
    Greedy,
}

/// Tunables for the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SearchConfig {
    /// Search strategy.
    search: SearchKind,

    /// Nominal search depth in plies.
    search_depth: u8,

    /// Extra plies searched past the horizon, captures only.
    capture_depth: u8,

    /// Transposition table entries. Must be a power of two.
    cache_entries: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search: SearchKind::AlphaBeta,
            search_depth: 3,
            capture_depth: 1,
            cache_entries: 1 << 20,
        }
    }
}

impl SearchConfig {
    /// Checks that the configuration can build a searcher.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.search_depth == 0 {
            return Err(EngineError::Construction(
                "search_depth must be at least 1".to_string(),
            ));
        }
        if !self.cache_entries.is_power_of_two() {
            return Err(EngineError::Construction(format!(
                "cache_entries must be a power of two, got {}",
                self.cache_entries
            )));
        }
        Ok(())
    }
}

/// Search-backed oracle.
///
/// The searcher is blocking work, so each call runs on tokio's blocking pool.
/// Searcher state, such as the transposition table, survives between calls.
#[derive(Clone)]
pub struct SearchEngine {
    search: Arc<Mutex<Box<dyn MoveSearch>>>,
    name: &'static str,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    /// Wraps an existing searcher.
    pub fn new(search: impl MoveSearch + 'static) -> Self {
        let name = search.name();
        Self {
            search: Arc::new(Mutex::new(Box::new(search))),
            name,
        }
    }

    /// Builds the configured searcher with the material evaluator.
    ///
    /// Alpha-beta allocates its whole transposition table here; prefer
    /// [`SearchEngineFactory`] from async code.
    pub fn from_config(config: &SearchConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let engine = match config.search {
            SearchKind::AlphaBeta => Self::new(AlphaBeta::new(
                config.search_depth,
                config.capture_depth,
                config.cache_entries,
                Box::new(PointsEval),
            )),
            SearchKind::Greedy => Self::new(Greedy::new(Box::new(PointsEval))),
        };
        Ok(engine)
    }
}

#[async_trait::async_trait]
impl DecisionEngine for SearchEngine {
    #[instrument(skip(self))]
    async fn select_move(&mut self, position: &str) -> Result<Move, EngineError> {
        let board = chess::Board::from_str(position)
            .map_err(|e| EngineError::InvalidPosition(format!("{position}: {e}")))?;

        let search = Arc::clone(&self.search);
        let scored = tokio::task::spawn_blocking(move || {
            let mut search = search
                .lock()
                .map_err(|_| EngineError::Worker("search state poisoned".to_string()))?;
            Ok::<_, EngineError>(search.best_move(&board))
        })
        .await??;

        let scored = scored.ok_or(EngineError::NoLegalMoves)?;
        let chosen = Move::from(scored.chess_move);
        info!(mv = %chosen, score = scored.score, "Engine selected move");
        Ok(chosen)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Builds [`SearchEngine`]s off the async executor.
#[derive(Debug, Clone, Default, Getters)]
pub struct SearchEngineFactory {
    config: SearchConfig,
}

impl SearchEngineFactory {
    /// Creates a factory for the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl EngineFactory for SearchEngineFactory {
    #[instrument(
        skip(self),
        fields(search = %self.config.search, depth = self.config.search_depth)
    )]
    async fn construct(&self) -> Result<Box<dyn DecisionEngine>, EngineError> {
        self.config.validate()?;
        let config = self.config.clone();

        debug!(entries = config.cache_entries, "Allocating transposition table");
        let engine = tokio::task::spawn_blocking(move || SearchEngine::from_config(&config)).await??;

        info!("Search engine ready");
        Ok(Box::new(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustychess_core::{ChessRules, MoveValidator};

    fn small_config() -> SearchConfig {
        SearchConfig::default()
            .with_search_depth(2)
            .with_cache_entries(1 << 10)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cache_size_must_be_power_of_two() {
        let config = SearchConfig::default().with_cache_entries(1000);
        assert!(matches!(config.validate(), Err(EngineError::Construction(_))));
    }

    #[tokio::test]
    async fn test_factory_builds_engine_that_moves_legally() {
        let factory = SearchEngineFactory::new(small_config());
        let mut engine = factory.construct().await.expect("engine builds");

        let rules = ChessRules::new();
        let initial = rules.initial();
        let chosen = engine
            .select_move(initial.position())
            .await
            .expect("engine moves");

        assert!(rules.legal_moves(&initial).contains(&chosen));
    }

    #[tokio::test]
    async fn test_greedy_config_builds_greedy_engine() {
        let config = small_config().with_search(SearchKind::Greedy);
        let mut engine = SearchEngineFactory::new(config)
            .construct()
            .await
            .expect("engine builds");
        assert_eq!(engine.name(), "greedy");

        let chosen = engine
            .select_move("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1")
            .await
            .expect("engine moves");
        assert_eq!(chosen, "e4d5".parse::<Move>().expect("valid move"));
    }

    #[test]
    fn test_search_kind_names() {
        assert_eq!(SearchKind::AlphaBeta.to_string(), "alphabeta");
        assert_eq!("greedy".parse::<SearchKind>(), Ok(SearchKind::Greedy));
    }

    #[tokio::test]
    async fn test_rejects_garbage_position() {
        let mut engine = SearchEngine::from_config(&small_config()).expect("engine builds");
        let result = engine.select_move("not a position").await;
        assert!(matches!(result, Err(EngineError::InvalidPosition(_))));
    }

    #[tokio::test]
    async fn test_mated_position_has_no_move() {
        let mut engine = SearchEngine::from_config(&small_config()).expect("engine builds");
        let result = engine
            .select_move("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .await;
        assert_eq!(result, Err(EngineError::NoLegalMoves));
    }
}
