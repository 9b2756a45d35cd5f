use std::{cell::RefCell, env, io::stdin, path::PathBuf, rc::Rc};

use tracing_subscriber::EnvFilter;

use cooldown::{
    service::data_manager::DataManager,
    storage::{guard, FileStore, MemoryStore, SharedStore},
    ui::repl,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let store = open_store();

    // Must run to completion before anything else reads persisted state.
    guard::run(&mut *store.borrow_mut(), guard::BUILD_VERSION);

    match DataManager::new(Rc::clone(&store)) {
        Ok(manager) => match repl::run(manager, store) {
            Ok(_) => return,
            Err(error) => println!("Error occurred while running REPL:\n{}\n", error),
        },
        Err(error) => println!("Error occurred while initializing:\n{}\n", error),
    };

    let mut s = String::new();
    println!("Press Enter to exit");
    let _ = stdin().read_line(&mut s);
}

fn open_store() -> SharedStore {
    let path = data_file();
    match FileStore::open(&path) {
        Ok(store) => Rc::new(RefCell::new(store)),
        Err(err) => {
            // Run without persistence rather than refuse to start.
            eprintln!("Could not open data file {}: {}", path.display(), err);
            Rc::new(RefCell::new(MemoryStore::new()))
        }
    }
}

fn data_file() -> PathBuf {
    match env::var("COOLDOWN_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir).join("storage.json"),
        Err(_) => PathBuf::from("data").join("storage.json"),
    }
}
