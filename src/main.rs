//! Game Progress entry point
//!
//! The web build is a library: pages use `GameProgressManager` from the
//! generated JS bindings. Natively this runs the save/load protocol against
//! in-memory stores and prints the outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use game_progress::storage::{MemoryLocalStore, MemoryPlayer, MemorySession};
    use game_progress::{ProgressConfig, ProgressStore};

    env_logger::init();
    log::info!("Game Progress (native) starting...");

    // Optional JSON blob to save, e.g. `game-progress '{"level":3}'`
    let blob: serde_json::Value = match std::env::args().nth(1) {
        Some(arg) => match serde_json::from_str(&arg) {
            Ok(blob) => blob,
            Err(e) => {
                eprintln!("Invalid progress JSON: {}", e);
                std::process::exit(2);
            }
        },
        None => serde_json::json!({ "level": 1 }),
    };

    let session = MemorySession::new(MemoryPlayer::new());
    let local = MemoryLocalStore::new();

    pollster::block_on(async {
        let store =
            ProgressStore::initialize(local, Some(&session), ProgressConfig::default()).await;

        let result = store.save(&blob).await;
        println!(
            "save: cloud={} local={} status={}",
            result.cloud,
            result.local,
            result.status().as_str()
        );

        match store.load().await {
            Some(loaded) => println!("load: {}", loaded),
            None => println!("load: no saved progress"),
        }
    });
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is GameProgressManager.init, this is just to satisfy the compiler
}
