//! Dependency injection container for the oxlearn application.
//!
//! The container owns the infrastructure (value store, precomputed game
//! tables, default seed) and wires it into brains and players.

use std::{cell::RefCell, rc::Rc, sync::Arc};

use tracing::info;

use super::config::{BrainConfig, LearningConfig};
use crate::{
    Result,
    adapters::{InMemoryStore, JsonFileStore},
    agents::{
        AgentKind, AnyAgent, HumanAgent, LearningAgent, RandomAgent, TrainedAgent, side_seed,
    },
    learning::{Brain, SharedBrain},
    ports::ValueStore,
    tictactoe::{GameTables, Player},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use oxlearn::app::{App, BrainConfig};
///
/// let app = App::new();
/// let brain = app.create_brain(&BrainConfig::default())?;
/// # Ok::<(), oxlearn::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use oxlearn::app::{App, BrainConfig, LearningConfig};
/// use oxlearn::agents::AgentKind;
/// use oxlearn::tictactoe::Player;
///
/// let app = App::for_testing().with_default_seed(42).build();
///
/// let brain = app.create_brain(&BrainConfig::default())?;
/// let config = LearningConfig::default();
/// let agent = app.create_agent(AgentKind::Learn, Player::O, &brain, &config);
/// assert_eq!(agent.kind(), AgentKind::Learn);
/// # Ok::<(), oxlearn::Error>(())
/// ```
pub struct App {
    /// Store for value tables
    store: Arc<dyn ValueStore + Send + Sync>,
    tables: Arc<GameTables>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `JsonFileStore` for value tables
    /// - the process-wide game tables
    /// - No default seed (non-deterministic RNG)
    pub fn new() -> Self {
        AppBuilder::new().build()
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Builder preset for tests, starting from an empty [`InMemoryStore`].
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new().with_store(InMemoryStore::new())
    }

    pub fn store(&self) -> Arc<dyn ValueStore + Send + Sync> {
        Arc::clone(&self.store)
    }

    pub fn tables(&self) -> Arc<GameTables> {
        Arc::clone(&self.tables)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Load a brain from `config.input`; it will save to `config.output`.
    ///
    /// # Errors
    ///
    /// Fails if the stored table exists but cannot be read or validated.
    pub fn create_brain(&self, config: &BrainConfig) -> Result<SharedBrain> {
        let brain = Brain::load(
            self.tables(),
            self.store(),
            &config.input,
            config.output.clone(),
        )?;
        info!(
            input = %config.input.display(),
            entries = brain.values().len(),
            "Brain ready"
        );
        Ok(Rc::new(RefCell::new(brain)))
    }

    /// Create a player of the given kind for `side`.
    ///
    /// Brain-backed players share `brain`. Random and learning players are
    /// seeded from the container default, offset per side.
    pub fn create_agent(
        &self,
        kind: AgentKind,
        side: Player,
        brain: &SharedBrain,
        config: &LearningConfig,
    ) -> AnyAgent {
        let seed = side_seed(self.default_seed, side);
        match kind {
            AgentKind::Human => AnyAgent::Human(HumanAgent::stdio(side)),
            AgentKind::Random => RandomAgent::with_tables(self.tables(), seed).into(),
            AgentKind::Trained => TrainedAgent::new(Rc::clone(brain)).into(),
            AgentKind::Learn => LearningAgent::new(Rc::clone(brain), side, *config, seed).into(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// # Examples
///
/// ```
/// use oxlearn::app::AppBuilder;
/// use oxlearn::adapters::InMemoryStore;
///
/// let app = AppBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_default_seed(42)
///     .build();
/// assert_eq!(app.default_seed(), Some(42));
/// ```
pub struct AppBuilder {
    store: Option<Arc<dyn ValueStore + Send + Sync>>,
    tables: Option<Arc<GameTables>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            tables: None,
            default_seed: None,
        }
    }

    /// Set a custom value store.
    pub fn with_store<S: ValueStore + Send + Sync + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Use a specific set of game tables instead of the process-wide one.
    pub fn with_tables(mut self, tables: Arc<GameTables>) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Set a default random seed for all players created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no store was specified, uses `JsonFileStore`.
    pub fn build(self) -> App {
        App {
            store: self.store.unwrap_or_else(|| Arc::new(JsonFileStore::new())),
            tables: self.tables.unwrap_or_else(GameTables::shared),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{learning::ValueTable, ports::Agent, tictactoe::BoardState};

    fn test_app(store: &InMemoryStore) -> App {
        App::for_testing()
            .with_store(store.clone())
            .with_default_seed(42)
            .build()
    }

    #[test]
    fn test_app_loads_brain_from_store() {
        let store = InMemoryStore::new();
        let table: ValueTable = [(100, 0.5)].into_iter().collect();
        store.save(&table, Path::new("in.json")).unwrap();

        let app = test_app(&store);
        let brain = app
            .create_brain(&BrainConfig::new("in.json", "out.json"))
            .unwrap();
        assert_eq!(brain.borrow().values(), &table);
        assert_eq!(brain.borrow().output(), Path::new("out.json"));
    }

    #[test]
    fn test_missing_input_gives_empty_brain() {
        let app = test_app(&InMemoryStore::new());
        let brain = app.create_brain(&BrainConfig::default()).unwrap();
        assert!(brain.borrow().values().is_empty());
    }

    #[test]
    fn test_app_creates_each_kind() {
        let app = test_app(&InMemoryStore::new());
        let brain = app.create_brain(&BrainConfig::default()).unwrap();
        let config = LearningConfig::default();
        for kind in [AgentKind::Random, AgentKind::Trained, AgentKind::Learn] {
            let mut agent = app.create_agent(kind, Player::O, &brain, &config);
            assert_eq!(agent.kind(), kind);
            assert!(agent.select_move(BoardState::new()).unwrap().is_some());
        }
    }

    #[test]
    fn test_default_seed_makes_random_players_repeatable() {
        let app = test_app(&InMemoryStore::new());
        let brain = app.create_brain(&BrainConfig::default()).unwrap();
        let config = LearningConfig::default();
        let mut first = app.create_agent(AgentKind::Random, Player::X, &brain, &config);
        let mut second = app.create_agent(AgentKind::Random, Player::X, &brain, &config);
        let board = BoardState::from_string("O........").unwrap();
        for _ in 0..10 {
            assert_eq!(
                first.select_move(board).unwrap(),
                second.select_move(board).unwrap()
            );
        }
    }

    #[test]
    fn test_injected_tables_reach_brains_and_players() {
        let tables = Arc::new(GameTables::build());
        let app = App::for_testing()
            .with_tables(Arc::clone(&tables))
            .with_default_seed(1)
            .build();
        let brain = app.create_brain(&BrainConfig::default()).unwrap();
        assert!(Arc::ptr_eq(brain.borrow().tables(), &tables));

        let config = LearningConfig::default();
        match app.create_agent(AgentKind::Random, Player::O, &brain, &config) {
            AnyAgent::Random(agent) => assert!(Arc::ptr_eq(agent.tables(), &tables)),
            other => panic!("expected a random player, got {:?}", other.kind()),
        }
        assert!(!Arc::ptr_eq(&tables, &GameTables::shared()));
    }
}
