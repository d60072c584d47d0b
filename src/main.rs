mod app;
mod config;
mod food;
mod game;
mod geometry;
mod input;
mod logger;
mod render;
mod scheduler;
mod score;
mod session;
mod snake;
mod store;
mod term;

use config::{Settings, SETTINGS_FILE};
use game::Game;
use score::ScoreBoard;
use store::{FileStore, HighScoreStore};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() {
    // Nothing is on the alternate screen yet, so plain stderr is fine here
    let settings = Settings::load(SETTINGS_FILE).unwrap_or_else(|e| {
        eprintln!("{}; using default settings", e);
        Settings::default()
    });

    if let Some(log_file) = settings.log_file.as_deref() {
        if let Err(e) = logger::init_logger(settings.log_prefix.clone(), log_file) {
            eprintln!("{}", e);
        }
    }
    log!("Starting with {:?}", settings);

    let store = HighScoreStore::new(Box::new(FileStore::new(&settings.high_score_file)));
    let scores = ScoreBoard::new(store, settings.difficulty);
    let mut rng = rand::thread_rng();
    let game = Game::new(scores, settings.swipe_threshold, &mut rng);

    let result = term::TermManager::new()
        .and_then(|term| app::SnakeApp::new(term, game, rng, &settings).run());

    if let Err(e) = result {
        log!("Exiting on terminal error: {:?}", e);
        eprintln!("torus_snake: {:?}", e);
        std::process::exit(1);
    }
    log!("Bye");
}
