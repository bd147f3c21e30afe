pub mod ai;
pub mod controller;
pub mod network;
pub mod tui;

#[allow(unused_imports)]
pub use ai::{GreedyAI, MinimaxAI, RandomAI};
pub use controller::PlayerController;
pub use tui::TuiController;
