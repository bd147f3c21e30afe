use crate::core::{initial_board, Move, PlayerId};
use crate::game::{winner_by_scores, GameState};
use crate::network::protocol::NetMessage;
use log::info;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Match server: pairs incoming clients, validates their moves against the
/// rule engine, and relays authoritative snapshots to both sides.
pub async fn start_server(addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("server listening on {}", addr);
    println!("Server started on {}\r", addr);

    let waiting_room: Arc<Mutex<Option<(TcpStream, String)>>> = Arc::new(Mutex::new(None));

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("connection from {}", peer);
        let waiting_room = Arc::clone(&waiting_room);

        tokio::spawn(async move {
            if let Err(e) = handle_new_connection(socket, waiting_room).await {
                eprintln!("Error handling connection: {}\r", e);
            }
        });
    }
}

async fn handle_new_connection(
    mut socket: TcpStream,
    waiting_room: Arc<Mutex<Option<(TcpStream, String)>>>,
) -> anyhow::Result<()> {
    let mut reader = BufReader::new(&mut socket);
    let mut line = String::new();
    reader.read_line(&mut line).await?;

    let msg: NetMessage = serde_json::from_str(&line)?;
    let NetMessage::Join { name } = msg else {
        anyhow::bail!("expected Join message");
    };

    let mut lock = waiting_room.lock().await;
    if let Some((mut socket1, name1)) = lock.take() {
        drop(lock);
        info!("match: {} vs {}", name1, name);

        let state = GameState::new(initial_board());

        send_msg(
            &mut socket1,
            &NetMessage::Welcome {
                player_id: PlayerId::Player1,
                state: state.clone(),
            },
        )
        .await?;
        send_msg(
            &mut socket1,
            &NetMessage::MatchFound {
                opponent_name: name.clone(),
            },
        )
        .await?;

        send_msg(
            &mut socket,
            &NetMessage::Welcome {
                player_id: PlayerId::Player2,
                state: state.clone(),
            },
        )
        .await?;
        send_msg(&mut socket, &NetMessage::MatchFound { opponent_name: name1 }).await?;

        relay_game(socket1, socket, state).await?;
    } else {
        *lock = Some((socket, name));
    }
    Ok(())
}

type SharedWriter = Arc<Mutex<OwnedWriteHalf>>;

async fn relay_game(s1: TcpStream, s2: TcpStream, state: GameState) -> anyhow::Result<()> {
    let (r1, w1) = s1.into_split();
    let (r2, w2) = s2.into_split();

    let shared = Arc::new(Mutex::new(state));
    let w1: SharedWriter = Arc::new(Mutex::new(w1));
    let w2: SharedWriter = Arc::new(Mutex::new(w2));

    let f1 = side_loop(
        r1,
        PlayerId::Player1,
        Arc::clone(&shared),
        Arc::clone(&w1),
        Arc::clone(&w2),
    );
    let f2 = side_loop(r2, PlayerId::Player2, shared, w2, w1);

    tokio::select! {
        res = f1 => res,
        res = f2 => res,
    }
}

/// One side of the relay: read this player's messages until the match ends
/// or their connection drops.
async fn side_loop(
    reader: OwnedReadHalf,
    side: PlayerId,
    shared: Arc<Mutex<GameState>>,
    own: SharedWriter,
    other: SharedWriter,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        let msg: NetMessage = serde_json::from_str(&line)?;
        match msg {
            NetMessage::MakeMove { mv } => {
                let mut state = shared.lock().await;
                match apply_remote_move(&mut state, mv, side) {
                    Ok(broadcast) => {
                        let finished = broadcast
                            .iter()
                            .any(|m| matches!(m, NetMessage::GameOver { .. }));
                        for msg in &broadcast {
                            write_msg(&own, msg).await?;
                            write_msg(&other, msg).await?;
                        }
                        if finished {
                            break;
                        }
                    }
                    Err(err) => write_msg(&own, &err).await?,
                }
            }
            NetMessage::Resign => {
                let state = shared.lock().await;
                let over = resignation(&state, side);
                write_msg(&own, &over).await?;
                write_msg(&other, &over).await?;
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Apply one remote move to the shared snapshot. Returns the messages to
/// broadcast, or the error to bounce back to the sender.
fn apply_remote_move(
    state: &mut GameState,
    mv: Move,
    side: PlayerId,
) -> Result<Vec<NetMessage>, NetMessage> {
    if state.current_player != side {
        return Err(NetMessage::Error {
            message: "Not your turn".to_string(),
        });
    }
    if !state.possible_actions().contains(&mv) {
        return Err(NetMessage::Error {
            message: "Illegal move".to_string(),
        });
    }

    *state = state.apply(&mv);
    let mut out = vec![NetMessage::Update {
        state: state.clone(),
        last_move: Some(mv),
    }];
    if state.is_done() {
        let scores = state.scores();
        out.push(NetMessage::GameOver {
            winner: winner_by_scores(&scores),
            scores: scores.into_iter().collect(),
            reason: "All pieces placed".to_string(),
        });
    }
    Ok(out)
}

fn resignation(state: &GameState, side: PlayerId) -> NetMessage {
    NetMessage::GameOver {
        winner: Some(side.opponent()),
        scores: state.scores().into_iter().collect(),
        reason: format!("{:?} resigned", side),
    }
}

async fn write_msg(writer: &SharedWriter, msg: &NetMessage) -> anyhow::Result<()> {
    let json = serde_json::to_string(msg)? + "\n";
    writer.lock().await.write_all(json.as_bytes()).await?;
    Ok(())
}

async fn send_msg(socket: &mut TcpStream, msg: &NetMessage) -> anyhow::Result<()> {
    let json = serde_json::to_string(msg)? + "\n";
    socket.write_all(json.as_bytes()).await?;
    Ok(())
}
