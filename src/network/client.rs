use crate::core::{Move, PlayerId};
use crate::game::GameState;
use crate::network::protocol::NetMessage;
use std::sync::mpsc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc as tokio_mpsc;

/// Client side of a networked match. `run` bridges the socket and the local
/// game loop: authoritative snapshots and the opponent's moves flow out on
/// std channels, locally chosen moves come back in on a tokio channel.
pub struct NetworkClient {
    stream: TcpStream,
}

impl NetworkClient {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self { stream })
    }

    pub async fn run(
        &mut self,
        name: &str,
        player_id_tx: mpsc::Sender<PlayerId>,
        state_tx: mpsc::Sender<GameState>,
        remote_move_tx: mpsc::Sender<Move>,
        mut local_move_rx: tokio_mpsc::UnboundedReceiver<Move>,
    ) -> anyhow::Result<()> {
        let (reader, mut writer) = self.stream.split();
        let mut lines = BufReader::new(reader).lines();

        let join = NetMessage::Join {
            name: name.to_string(),
        };
        writer
            .write_all((serde_json::to_string(&join)? + "\n").as_bytes())
            .await?;

        let mut my_id: Option<PlayerId> = None;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let msg: NetMessage = serde_json::from_str(&line)?;
                    match msg {
                        NetMessage::Welcome { player_id, state } => {
                            my_id = Some(player_id);
                            let _ = player_id_tx.send(player_id);
                            let _ = state_tx.send(state);
                        }
                        NetMessage::MatchFound { opponent_name } => {
                            println!("Match found! Opponent: {}\r", opponent_name);
                        }
                        NetMessage::Update { state, last_move } => {
                            // When the turn has come back to us, the update
                            // carries the opponent's move.
                            let remote_moved = my_id == Some(state.current_player);
                            let _ = state_tx.send(state);
                            if remote_moved {
                                if let Some(mv) = last_move {
                                    let _ = remote_move_tx.send(mv);
                                }
                            }
                        }
                        NetMessage::GameOver { winner, reason, .. } => {
                            println!("Game over! Winner: {:?} ({})\r", winner, reason);
                            break;
                        }
                        NetMessage::Error { message } => {
                            eprintln!("Server error: {}\r", message);
                        }
                        _ => {}
                    }
                }
                Some(mv) = local_move_rx.recv() => {
                    let msg = NetMessage::MakeMove { mv };
                    writer
                        .write_all((serde_json::to_string(&msg)? + "\n").as_bytes())
                        .await?;
                }
            }
        }
        Ok(())
    }
}
