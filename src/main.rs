//! # Delve Main Entry Point
//!
//! Starts or loads a game and runs it either as a console game or as a
//! simulated player walking the dungeon on its own.

use clap::Parser;
use delve::utils::{GameRng, SeededRng};
use delve::{
    help_text, CraftOutcome, DelveResult, DoorChoice, DoorSelector, DungeonConfig, GameSession,
    InputHandler, Item, PlayerInput, Reward, RewardSink, Room, Task, TaskPresenter, TurnOutcome,
    EXIT_ID,
};
use log::{error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A text dungeon crawler on a lazily generated graph of rooms")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Save file written after every turn
    #[arg(long)]
    save: Option<PathBuf>,

    /// Save file to continue from
    #[arg(long)]
    load: Option<PathBuf>,

    /// Let a simulated player take this many turns instead of playing
    #[arg(long, value_name = "STEPS")]
    simulate: Option<u32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the final game state as JSON
    #[arg(long)]
    dump_json: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    info!("Starting Delve v{}", delve::VERSION);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> DelveResult<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = DungeonConfig::new(seed);

    let mut session = match &args.load {
        Some(path) => GameSession::load(path, config)?,
        None => GameSession::new(config),
    };

    match args.simulate {
        Some(steps) => run_simulation(&mut session, steps, seed, args.save.as_deref())?,
        None => run_console(&mut session, args.save.as_deref())?,
    }

    println!("{}", session.summary());
    if args.dump_json {
        println!("{}", session.snapshot_json()?);
    }
    Ok(())
}

/// Plays the game over stdin and stdout.
struct ConsoleController {
    lines: io::Lines<io::StdinLock<'static>>,
    pending: Option<DoorChoice>,
}

impl ConsoleController {
    fn new() -> Self {
        Self {
            lines: io::stdin().lines(),
            pending: None,
        }
    }

    /// Prints a prompt and reads one line, `None` at end of input.
    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{text} ");
        io::stdout().flush().ok();
        self.lines.next().and_then(Result::ok)
    }

    fn confirm(&mut self, handler: &InputHandler, text: &str) -> bool {
        loop {
            let Some(line) = self.prompt(text) else {
                return false;
            };
            if let Some(answer) = handler.parse_confirmation(&line) {
                return answer;
            }
        }
    }
}

impl DoorSelector for ConsoleController {
    fn select_door(&mut self, _room: &Room) -> DoorChoice {
        self.pending.take().unwrap_or(DoorChoice::Leave)
    }
}

impl TaskPresenter for ConsoleController {
    fn present_information(&mut self, text: &str) {
        self.prompt(text);
    }

    fn present_question(&mut self, prompt: &str) -> String {
        self.prompt(prompt).unwrap_or_default()
    }
}

impl RewardSink for ConsoleController {
    fn reward_acquired(&mut self, reward: &Reward, lost: u32) {
        println!("{}", reward.acquisition_message(lost));
    }
}

fn run_console(session: &mut GameSession, save_path: Option<&Path>) -> DelveResult<()> {
    let handler = InputHandler::new();
    let mut console = ConsoleController::new();
    println!("Welcome to the dungeon! Type 'help' for commands.");

    while let Some(current) = session.player.current_room() {
        session.dungeon.fill_doors(current)?;
        let door_count = session.dungeon.room(current).door_count;
        let prompt = format!("Room {current}. Select one door between 0 and {}:", door_count - 1);
        let Some(line) = console.prompt(&prompt) else {
            break;
        };
        let Some(input) = handler.parse_line(&line) else {
            println!("Type 'help' for commands.");
            continue;
        };

        match input {
            PlayerInput::Quit => break,
            PlayerInput::Help => println!("{}", help_text()),
            PlayerInput::ShowInventory => println!("{}", session.player.inventory),
            PlayerInput::ShowMenagerie => print_menagerie(session),
            PlayerInput::ShowStatus => {
                println!("{}", session.summary());
                println!("{:?}", session.statistics);
            }
            PlayerInput::Craft => craft_interactively(session, &mut console),
            PlayerInput::Save => match save_path {
                Some(path) => {
                    session.save(path)?;
                    println!("Saved to {}.", path.display());
                }
                None => println!("Start the game with --save <FILE> to save it."),
            },
            PlayerInput::Door(_) | PlayerInput::Leave => {
                let room = session.dungeon.room(current);
                let choice = match handler.input_to_choice(input, room) {
                    Ok(Some(choice)) => choice,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                if handler.needs_confirmation(choice, room)
                    && !console.confirm(&handler, "Really leave the dungeon? (Y/N)")
                {
                    continue;
                }
                console.pending = Some(choice);
                if let TurnOutcome::RolledBack { .. } = session.take_turn(&mut console)? {
                    println!("Wrong answer! You are thrown back to room {current}.");
                }
                if let Some(path) = save_path {
                    session.save(path)?;
                }
            }
        }
    }
    Ok(())
}

fn print_menagerie(session: &GameSession) {
    if session.player.menagerie.is_empty() {
        println!("Menagerie is empty!");
    }
    for creature in &session.player.menagerie {
        println!("{creature}");
    }
}

fn craft_interactively(session: &mut GameSession, console: &mut ConsoleController) {
    println!("{}", session.player.inventory);
    let (Some(first), Some(second)) = (
        pick_item(session, console, "First item:"),
        pick_item(session, console, "Second item:"),
    ) else {
        println!("You don't know any such item.");
        return;
    };
    match session.craft(&first, &second) {
        CraftOutcome::NoRecipe { diss_line } => {
            println!("{}", diss_line.as_deref().unwrap_or("Nothing happens."))
        }
        CraftOutcome::MissingIngredients => println!("You don't have those items."),
        CraftOutcome::Crafted(item) => println!("You crafted: {item}"),
        CraftOutcome::CraftedWithLoss(item) => {
            println!("You crafted {item}, but it did not fit into your inventory.")
        }
    }
}

fn pick_item(session: &GameSession, console: &mut ConsoleController, prompt: &str) -> Option<Item> {
    let name = console.prompt(prompt)?;
    let name = name.trim();
    session
        .dungeon
        .context()
        .items
        .items()
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
        .cloned()
}

/// A simulated player. It picks doors at random and always knows the
/// answer.
#[derive(Debug)]
struct NpcController {
    rng: SeededRng,
    pending: Option<DoorChoice>,
    answer: Option<String>,
}

impl NpcController {
    fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            pending: None,
            answer: None,
        }
    }

    /// Picks the next door and remembers the answer to the task behind it.
    fn plan(&mut self, session: &GameSession, room: &Room) {
        let index = self.rng.next_int(room.door_count as i32) as usize;
        self.answer = None;
        self.pending = match room.door_target(index) {
            Some(EXIT_ID) | None => Some(DoorChoice::Leave),
            Some(target) => {
                if let Some(Task::Question { answer, .. }) = &session.dungeon.room(target).task {
                    self.answer = Some(answer.clone());
                }
                Some(DoorChoice::Door(index))
            }
        };
    }
}

impl DoorSelector for NpcController {
    fn select_door(&mut self, _room: &Room) -> DoorChoice {
        self.pending.take().unwrap_or(DoorChoice::Leave)
    }
}

impl TaskPresenter for NpcController {
    fn present_information(&mut self, _text: &str) {}

    fn present_question(&mut self, _prompt: &str) -> String {
        self.answer.take().unwrap_or_default()
    }
}

impl RewardSink for NpcController {
    fn reward_acquired(&mut self, reward: &Reward, lost: u32) {
        info!("{}", reward.acquisition_message(lost));
    }
}

fn run_simulation(
    session: &mut GameSession,
    steps: u32,
    seed: u64,
    save_path: Option<&Path>,
) -> DelveResult<()> {
    info!("Simulating {} turns", steps);
    let mut npc = NpcController::new(seed.wrapping_add(1));
    for _ in 0..steps {
        let Some(current) = session.player.current_room() else {
            break;
        };
        session.dungeon.fill_doors(current)?;
        let room = session.dungeon.room(current).clone();
        npc.plan(session, &room);
        session.take_turn(&mut npc)?;
    }
    if let Some(path) = save_path {
        session.save(path)?;
    }
    Ok(())
}
