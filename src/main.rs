//! Mini Arcade entry point
//!
//! On the web this wires whichever page loaded the module. Natively it prints
//! the leaderboard stored in a JSON file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }
    log::info!("Mini Arcade starting...");
    mini_arcade::web::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mini Arcade (native) starting...");

    if let Err(e) = print_leaderboard() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn print_leaderboard() -> Result<(), mini_arcade::StoreError> {
    use mini_arcade::leaderboard;
    use mini_arcade::storage::FileStore;
    use mini_arcade::users::UserStore;

    let path = std::env::var("MINI_ARCADE_STORE").unwrap_or_else(|_| "mini-arcade.json".into());
    let users = UserStore::new(FileStore::open(&path)?);
    let table = users.load()?;
    log::info!("Loaded {} users from {}", table.len(), path);

    let player = users.player();
    if let Some(greeting) = mini_arcade::ui::greeting(player.name()) {
        println!("{}", greeting);
    }

    println!("{:<20} {:>6} {:>6}  Last login", "Name", "Ball", "Dodge");
    for row in leaderboard::render(&table) {
        println!(
            "{:<20} {:>6} {:>6}  {}",
            row.name, row.ball, row.dodge, row.last_login
        );
    }
    Ok(())
}
