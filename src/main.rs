use anyhow::Result;
use chesscore::notation::{match_uci, to_uci};
use chesscore::search::{SearchConfig, Searcher};
use chesscore::{Color, Game, GameState, Move, Player};
use clap::Parser;
use std::io::{self, Write};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the search engine", long_about = None)]
struct Args {
    /// Operation mode: 's' for self play, 'h' for human
    #[arg(long, default_value = "h")]
    mode: String,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Plies searched beyond each candidate move
    #[arg(long, default_value_t = 1)]
    depth: u32,

    /// Thinking time per move in milliseconds
    #[arg(long, default_value_t = 5000)]
    movetime_ms: u64,

    /// Seed for the engine's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Do not play from the opening book
    #[arg(long)]
    no_book: bool,

    /// Stop self play after this many plies
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn describe(state: GameState, to_move: Color) -> String {
    match state {
        GameState::Loss => format!("Checkmate! {} wins!", !to_move),
        GameState::DrawStalemate => "Game is a stalemate!".to_string(),
        GameState::DrawThreefold => "Draw by repetition!".to_string(),
        GameState::Draw50Moves => "Draw by the fifty-move rule!".to_string(),
        GameState::DrawAgreement => "Game is a draw by agreement!".to_string(),
        GameState::InProgress => "Game in progress".to_string(),
    }
}

enum Input {
    Move(Move),
    Undo,
    OfferDraw,
    Quit,
}

fn get_human_input(game: &Game) -> Result<Input> {
    loop {
        print!("Enter your move (e.g., e2e4), 'undo', 'draw' or 'quit': ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(Input::Quit);
        }
        match input.trim() {
            "quit" => return Ok(Input::Quit),
            "undo" => return Ok(Input::Undo),
            "draw" => return Ok(Input::OfferDraw),
            text => match match_uci(game.board(), game.to_move(), game.history(), text) {
                Ok(mv) => return Ok(Input::Move(mv)),
                Err(e) => println!("{e}"),
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mode = args.mode.chars().next().unwrap_or('h');
    let human_color = parse_color(&args.color)?;

    let config = SearchConfig {
        depth: args.depth,
        movetime: Some(Duration::from_millis(args.movetime_ms)),
        seed: args.seed,
        use_book: !args.no_book,
    };
    let mut searcher = Searcher::new(config);

    let (white, black) = match (mode, human_color) {
        ('h', Color::White) => (Player::human("You"), Player::engine("Engine")),
        ('h', Color::Black) => (Player::engine("Engine"), Player::human("You")),
        _ => (Player::engine("Engine A"), Player::engine("Engine B")),
    };
    let mut game = Game::new(white, black);

    loop {
        if game.state().is_terminal() {
            println!("\n{}", game.board());
            println!("{}", describe(game.state(), game.to_move()));
            break;
        }
        if mode == 's' && game.history().len() >= args.max_plies {
            println!("Stopping after {} plies.", args.max_plies);
            break;
        }

        println!("\n{}'s turn ({})", game.to_move(), game.player(game.to_move()).name);
        println!("{}", game.board());

        let is_human_turn = mode == 'h' && game.to_move() == human_color;
        if is_human_turn {
            match get_human_input(&game)? {
                Input::Move(mv) => {
                    game.apply(mv)?;
                }
                Input::Undo => {
                    // Take back the engine's reply and the human move before it.
                    game.undo()?;
                    game.undo()?;
                }
                Input::OfferDraw => {
                    if searcher.is_draw_acceptable(&game)? {
                        game.agree_draw();
                    } else {
                        println!("Draw offer declined.");
                    }
                }
                Input::Quit => {
                    println!("Thanks for playing!");
                    break;
                }
            }
            continue;
        }

        if args.verbose {
            println!("Thinking...");
        }
        let start_time = Instant::now();
        let mv = searcher.choose_move(&game)?;
        let elapsed = start_time.elapsed();
        if args.verbose {
            println!("nodes: {}, elapsed: {:.2}s", searcher.nodes(), elapsed.as_secs_f32());
        }
        println!("Computer plays: {} ({})", mv, to_uci(&mv));
        game.apply(mv)?;
    }

    Ok(())
}
