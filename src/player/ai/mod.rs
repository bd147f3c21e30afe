pub mod config;
pub mod greedy;
pub mod heuristic;
pub mod minimax;
pub mod random;

pub use config::AIConfig;
pub use greedy::GreedyAI;
pub use minimax::{MinimaxAI, SearchError};
pub use random::RandomAI;
