use std::io::{self, BufRead, Write};

use chrono::Utc;
use crossterm::style::Stylize;
use tracing::warn;

use crate::{
    model::{
        language::Language,
        tab::{SelectedChampion, Tab, TabMode},
    },
    service::{
        data_manager::{DataManager, DataRetrievalError},
        lookup::LookupService,
        search::SearchService,
    },
    storage::{state, SharedStore, StorageError},
};

use super::{view, ReplError};

const SEARCH_RESULT_LIMIT: usize = 15;

struct App {
    tabs: Vec<Tab>,
    selected: Vec<SelectedChampion>,
    selected_tab_id: Option<String>,
    search: SearchService,
}

impl App {
    fn restore(store: &SharedStore) -> Self {
        let store_ref = store.borrow();
        Self {
            tabs: state::load_tabs(&*store_ref),
            selected: state::load_selected_champions(&*store_ref),
            selected_tab_id: state::load_selected_tab_id(&*store_ref),
            search: SearchService::new(Language::EnUs),
        }
    }
}

pub fn run(mut manager: DataManager, store: SharedStore) -> Result<(), ReplError> {
    let mut app = App::restore(&store);

    println!("{}", "cooldown - champion reference".bold());
    println!("Type 'help' for commands.");
    if !app.tabs.is_empty() {
        println!("Restored {} open tab(s).", app.tabs.len());
    }

    let stdin = io::stdin();
    loop {
        print!("{} ", "cooldown>".cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => return Ok(()),
            "help" => print_help(),
            "lang" => change_language(&mut app, rest),
            "search" => search(&manager, &app, rest),
            "open" => open_tab(&manager, &mut app, &store, rest),
            "vs" => open_vs_tab(&manager, &mut app, &store, rest),
            "tabs" => list_tabs(&app),
            "view" => view_tab(&manager, &app, rest),
            "focus" => focus_tab(&manager, &mut app, &store, rest),
            "close" => close_tab(&mut app, &store, rest),
            "select" => select_champion(&manager, &mut app, &store, rest),
            "unselect" => unselect_champion(&mut app, &store, rest),
            "selected" => list_selected(&app),
            "refresh" => {
                manager.refresh();
                println!("Caches cleared, data will be refetched.");
            }
            _ => search(&manager, &app, line),
        }
    }
}

fn print_help() {
    println!("  search <text>     find champions (Hangul or QWERTY, any layout)");
    println!("  open <name>       open a tab for one champion");
    println!("  vs <name> / <name>  open a comparison tab");
    println!("  tabs              list open tabs");
    println!("  view [tab id]     show a tab's champions, stats and cooldowns");
    println!("  focus <tab id>    switch the active tab and show it");
    println!("  close <tab id>    close a tab");
    println!("  select <name>     add a champion to the selection");
    println!("  unselect <name>   remove a champion from the selection");
    println!("  selected          list selected champions");
    println!("  lang <ko|en>      switch display language");
    println!("  refresh           drop cached data");
    println!("  quit              leave");
    println!("Bare text is treated as a search.");
}

fn change_language(app: &mut App, rest: &str) {
    let language = match rest {
        "ko" | "ko_KR" => Some(Language::KoKr),
        "en" | "en_US" => Some(Language::EnUs),
        _ => Language::from_code(rest),
    };
    match language {
        Some(language) => {
            app.search.set_language(language);
            println!("Language set to {}.", language);
        }
        None => println!("{}", "Unknown language, use 'ko' or 'en'.".red()),
    }
}

fn search(manager: &DataManager, app: &App, query: &str) {
    let champions = match manager.get_champions(app.search.language()) {
        Ok(champions) => champions,
        Err(err) => return print_data_error(&err),
    };

    let hits = app.search.filter(&champions, query);
    if hits.is_empty() {
        println!("No champion matches '{}'.", query);
        return;
    }

    for champ in hits.iter().take(SEARCH_RESULT_LIMIT) {
        match &champ.hangul {
            Some(hangul) if *hangul != champ.name => {
                println!(
                    "  {} ({})  {}",
                    champ.name.as_str().bold(),
                    hangul,
                    champ.title.as_str().dark_grey()
                );
            }
            _ => {
                println!(
                    "  {}  {}",
                    champ.name.as_str().bold(),
                    champ.title.as_str().dark_grey()
                );
            }
        }
    }
    if hits.len() > SEARCH_RESULT_LIMIT {
        println!("  ... and {} more", hits.len() - SEARCH_RESULT_LIMIT);
    }
}

fn open_tab(manager: &DataManager, app: &mut App, store: &SharedStore, name: &str) {
    let champions = match manager.get_champions(app.search.language()) {
        Ok(champions) => champions,
        Err(err) => return print_data_error(&err),
    };
    let lookup = LookupService::new(&champions);

    let champ = match lookup.find_champion(name) {
        Some(champ) => champ,
        None => return println!("{} '{}'", "No champion named".red(), name),
    };

    let tab = Tab {
        mode: TabMode::Normal,
        champions: vec![champ.id.clone()],
        id: new_tab_id(),
    };
    println!("Opened {} ({}).", champ.name.as_str().bold(), tab.id);
    app.selected_tab_id = Some(tab.id.clone());
    app.tabs.push(tab);
    persist_tabs(app, store);
    if let Some(tab) = app.tabs.last() {
        render_tab(manager, app, tab);
    }
}

fn open_vs_tab(manager: &DataManager, app: &mut App, store: &SharedStore, rest: &str) {
    let (left, right) = match rest.split_once('/') {
        Some((left, right)) => (left.trim(), right.trim()),
        None => return println!("{}", "Usage: vs <name> / <name>".red()),
    };

    let champions = match manager.get_champions(app.search.language()) {
        Ok(champions) => champions,
        Err(err) => return print_data_error(&err),
    };
    let lookup = LookupService::new(&champions);

    let (left, right) = match (lookup.find_champion(left), lookup.find_champion(right)) {
        (Some(left), Some(right)) => (left, right),
        _ => return println!("{}", "Both champions must exist.".red()),
    };

    let tab = Tab {
        mode: TabMode::Vs,
        champions: vec![left.id.clone(), right.id.clone()],
        id: new_tab_id(),
    };
    println!(
        "Opened {} vs {} ({}).",
        left.name.as_str().bold(),
        right.name.as_str().bold(),
        tab.id
    );
    app.selected_tab_id = Some(tab.id.clone());
    app.tabs.push(tab);
    persist_tabs(app, store);
    if let Some(tab) = app.tabs.last() {
        render_tab(manager, app, tab);
    }
}

fn list_tabs(app: &App) {
    if app.tabs.is_empty() {
        println!("No open tabs.");
        return;
    }
    for tab in &app.tabs {
        let marker = if app.selected_tab_id.as_deref() == Some(tab.id.as_str()) {
            "*"
        } else {
            " "
        };
        let champs = tab
            .champions
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(" vs ");
        println!("{} [{}] {} ({})", marker, tab.id, champs, tab.mode.as_str());
    }
}

fn view_tab(manager: &DataManager, app: &App, rest: &str) {
    let id = match (rest, &app.selected_tab_id) {
        ("", Some(id)) => id.as_str(),
        ("", None) => return println!("No tab is focused."),
        (id, _) => id,
    };
    match app.tabs.iter().find(|tab| tab.id == id) {
        Some(tab) => render_tab(manager, app, tab),
        None => println!("{} '{}'", "No tab".red(), id),
    }
}

/// Resolves the tab's stored champion ids against the current list and
/// prints the tab's card.
fn render_tab(manager: &DataManager, app: &App, tab: &Tab) {
    let language = app.search.language();
    let champions = match manager.get_champions(language) {
        Ok(champions) => champions,
        Err(err) => return print_data_error(&err),
    };
    let lookup = LookupService::new(&champions);

    let mut resolved = Vec::new();
    let mut details = Vec::new();
    for id in &tab.champions {
        let champ = match lookup.get_champion(id) {
            Ok(champ) => champ,
            Err(err) => return println!("{} {}", "Cannot show tab:".red(), err),
        };
        match manager.get_champion_detail(language, &champ.id) {
            Ok(detail) => {
                resolved.push(champ);
                details.push(detail);
            }
            Err(err) => return print_data_error(&err),
        }
    }

    match (tab.mode, resolved.as_slice(), details.as_slice()) {
        (TabMode::Normal, [champ], [detail]) => {
            print!("{}", view::champion_card(champ, detail));
        }
        (TabMode::Vs, [left, right], [left_detail, right_detail]) => {
            print!(
                "{}",
                view::comparison_card(left, left_detail, right, right_detail)
            );
        }
        _ => println!("{} '{}'", "Tab holds the wrong champion count".red(), tab.id),
    }
}

fn focus_tab(manager: &DataManager, app: &mut App, store: &SharedStore, id: &str) {
    if !app.tabs.iter().any(|tab| tab.id == id) {
        return println!("{} '{}'", "No tab".red(), id);
    }
    app.selected_tab_id = Some(id.to_string());
    if let Err(err) = state::save_selected_tab_id(&mut *store.borrow_mut(), id) {
        print_storage_error(&err);
    }
    if let Some(tab) = app.tabs.iter().find(|tab| tab.id == id) {
        render_tab(manager, app, tab);
    }
}

fn close_tab(app: &mut App, store: &SharedStore, id: &str) {
    let before = app.tabs.len();
    app.tabs.retain(|tab| tab.id != id);
    if app.tabs.len() == before {
        return println!("{} '{}'", "No tab".red(), id);
    }

    if app.selected_tab_id.as_deref() == Some(id) {
        app.selected_tab_id = None;
        if let Err(err) = state::clear_selected_tab_id(&mut *store.borrow_mut()) {
            print_storage_error(&err);
        }
    }
    persist_tabs(app, store);
    println!("Closed {}.", id);
}

fn select_champion(manager: &DataManager, app: &mut App, store: &SharedStore, name: &str) {
    let champions = match manager.get_champions(app.search.language()) {
        Ok(champions) => champions,
        Err(err) => return print_data_error(&err),
    };
    let lookup = LookupService::new(&champions);

    let champ = match lookup.find_champion(name) {
        Some(champ) => champ,
        None => return println!("{} '{}'", "No champion named".red(), name),
    };

    if app.selected.iter().any(|s| s.id == champ.id) {
        return println!("{} is already selected.", champ.name);
    }
    app.selected.push(SelectedChampion {
        id: champ.id.clone(),
        key: Some(champ.key.clone()),
    });
    if let Err(err) = state::save_selected_champions(&mut *store.borrow_mut(), &app.selected) {
        print_storage_error(&err);
    }
    println!("Selected {}.", champ.name.as_str().bold());
}

fn unselect_champion(app: &mut App, store: &SharedStore, name: &str) {
    let before = app.selected.len();
    let needle = name.to_lowercase();
    app.selected
        .retain(|s| s.id.as_str().to_lowercase() != needle);
    if app.selected.len() == before {
        return println!("{} '{}'", "Nothing selected named".red(), name);
    }
    if let Err(err) = state::save_selected_champions(&mut *store.borrow_mut(), &app.selected) {
        print_storage_error(&err);
    }
    println!("Unselected {}.", name);
}

fn list_selected(app: &App) {
    if app.selected.is_empty() {
        println!("No champions selected.");
        return;
    }
    for champ in &app.selected {
        match &champ.key {
            Some(key) => println!("  {} (key {})", champ.id, key),
            None => println!("  {}", champ.id),
        }
    }
}

fn persist_tabs(app: &App, store: &SharedStore) {
    let mut store = store.borrow_mut();
    if let Err(err) = state::save_tabs(&mut *store, &app.tabs) {
        print_storage_error(&err);
    }
    if let Some(id) = &app.selected_tab_id {
        if let Err(err) = state::save_selected_tab_id(&mut *store, id) {
            print_storage_error(&err);
        }
    }
}

fn new_tab_id() -> String {
    format!("tab-{}", Utc::now().timestamp_millis())
}

fn print_data_error(err: &DataRetrievalError) {
    println!("{} {}", "Could not load champion data:".red(), err);
}

fn print_storage_error(err: &StorageError) {
    // The session keeps working; only persistence is degraded.
    warn!("could not persist UI state: {}", err);
    println!("{}", "Warning: state could not be saved.".yellow());
}
