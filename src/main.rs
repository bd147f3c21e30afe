use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use divercite_ai::core::{initial_board, PlayerId};
use divercite_ai::game::{Game, GameState};
use divercite_ai::player::{GreedyAI, MinimaxAI, PlayerController, RandomAI, TuiController};
use divercite_ai::selfplay::{run_selfplay, ControllerKind, SelfPlayConfig};
use std::io;
use std::time::Duration;

/// Tournament clock: 15 minutes per player.
const MATCH_CLOCK: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run().await;

    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn read_choice(options: &[char]) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(None),
                    KeyCode::Char(c) if options.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

async fn run() -> anyhow::Result<()> {
    print!("=== Divercité ===\r\n");
    print!("\r\nSelect mode:\r\n");
    print!("1. Local Play\r\n");
    print!("2. Start Server (127.0.0.1:8080)\r\n");
    print!("3. Connect to Server (127.0.0.1:8080)\r\n");
    print!("q. Quit\r\n");

    match read_choice(&['1', '2', '3'])? {
        Some('2') => {
            divercite_ai::network::server::start_server("127.0.0.1:8080").await?;
            Ok(())
        }
        Some('3') => run_client().await,
        Some(_) => run_local().await,
        None => Ok(()),
    }
}

async fn run_local() -> anyhow::Result<()> {
    print!("\r\nSelect players:\r\n");
    print!("1. Human vs Human\r\n");
    print!("2. Human vs Minimax AI\r\n");
    print!("3. Minimax vs Greedy (watch)\r\n");
    print!("4. Minimax vs Random (watch)\r\n");
    print!("5. Self-play batch (sequential)\r\n");
    print!("6. Self-play batch (parallel)\r\n");
    print!("q. Quit\r\n");

    let choice = match read_choice(&['1', '2', '3', '4', '5', '6'])? {
        Some(c) => c,
        None => return Ok(()),
    };

    if choice == '5' || choice == '6' {
        return run_selfplay_batch(choice == '6');
    }

    let (p1, p2): (Box<dyn PlayerController>, Box<dyn PlayerController>) = match choice {
        '1' => (
            Box::new(TuiController::new(PlayerId::Player1, "Player 1")),
            Box::new(TuiController::new(PlayerId::Player2, "Player 2")),
        ),
        '2' => (
            Box::new(TuiController::new(PlayerId::Player1, "Human")),
            Box::new(MinimaxAI::new(PlayerId::Player2, "Minimax AI")),
        ),
        '3' => (
            Box::new(MinimaxAI::new(PlayerId::Player1, "Minimax AI")),
            Box::new(GreedyAI::new(PlayerId::Player2, "Greedy AI")),
        ),
        _ => (
            Box::new(MinimaxAI::new(PlayerId::Player1, "Minimax AI")),
            Box::new(RandomAI::new(PlayerId::Player2, "Random AI")),
        ),
    };

    let mut game = Game::new(GameState::new(initial_board()), MATCH_CLOCK);
    game.play(p1.as_ref(), p2.as_ref(), |_| {});

    Ok(())
}

fn run_selfplay_batch(parallel: bool) -> anyhow::Result<()> {
    // Short clocks keep the batch at depth 2.
    let config = SelfPlayConfig {
        num_games: 10,
        p1: ControllerKind::Minimax,
        p2: ControllerKind::Greedy,
        clock: Duration::from_secs(120),
        save_records: true,
        parallel,
    };
    run_selfplay(&config)?;

    print!("\r\nPress any key to return.\r\n");
    loop {
        if event::poll(Duration::from_millis(100))? {
            if event::read().is_ok() {
                return Ok(());
            }
        }
    }
}

async fn run_client() -> anyhow::Result<()> {
    use divercite_ai::network::client::NetworkClient;
    use divercite_ai::player::network::NetworkController;
    use std::sync::mpsc;
    use tokio::sync::mpsc as tokio_mpsc;

    print!("Connecting to server...\r\n");
    let client = NetworkClient::connect("127.0.0.1:8080").await?;
    print!("Connected!\r\n");

    let (player_id_tx, player_id_rx) = mpsc::channel::<PlayerId>();
    let (state_tx, state_rx) = mpsc::channel::<GameState>();
    let (remote_move_tx, remote_move_rx) = mpsc::channel();
    let (local_move_tx, local_move_rx) = tokio_mpsc::unbounded_channel();

    let mut client_handle = client;
    tokio::spawn(async move {
        if let Err(e) = client_handle
            .run("Player", player_id_tx, state_tx, remote_move_tx, local_move_rx)
            .await
        {
            eprintln!("Client networking error: {}\r", e);
        }
    });

    print!("Waiting for opponent...\r\n");
    let my_id = player_id_rx.recv()?;
    let state = state_rx.recv()?;

    let mut game = Game::new(state, MATCH_CLOCK);
    game.state_sync_rx = Some(state_rx);

    let (p1, p2): (Box<dyn PlayerController>, Box<dyn PlayerController>) =
        if my_id == PlayerId::Player1 {
            (
                Box::new(TuiController::new(PlayerId::Player1, "You")),
                Box::new(NetworkController::new(
                    PlayerId::Player2,
                    "Remote",
                    remote_move_rx,
                )),
            )
        } else {
            (
                Box::new(NetworkController::new(
                    PlayerId::Player1,
                    "Remote",
                    remote_move_rx,
                )),
                Box::new(TuiController::new(PlayerId::Player2, "You")),
            )
        };

    game.play(p1.as_ref(), p2.as_ref(), |mv| {
        let _ = local_move_tx.send(*mv);
    });

    Ok(())
}
