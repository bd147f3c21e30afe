use crate::core::{Move, PlayerId};
use crate::game::GameState;
use serde::{Deserialize, Serialize};

/// Line-delimited JSON messages between client and match server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NetMessage {
    // Client -> Server
    Join {
        name: String,
    },
    MakeMove {
        mv: Move,
    },
    Resign,

    // Server -> Client
    Welcome {
        player_id: PlayerId,
        state: GameState,
    },
    MatchFound {
        opponent_name: String,
    },
    Update {
        state: GameState,
        last_move: Option<Move>,
    },
    GameOver {
        winner: Option<PlayerId>,
        scores: Vec<(PlayerId, i32)>,
        reason: String,
    },
    Error {
        message: String,
    },
}
