mod gui;

use std::{env, sync::Arc, time::Duration};

use gui::engage_gui;
use quimikey::dummy_source::DummySource;
use quimikey::elements::ElementDirectory;
use quimikey::listener::ElementListener;
use quimikey::query::ElementQuery;
use quimikey::selection::CurrentSelection;

fn main() {
    env_logger::init();

    let elements_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "elements.json".to_owned());
    let directory =
        Arc::new(ElementDirectory::load(&elements_path).expect("failed to load element data"));

    // No hardware here: a synthetic source picks a random element every
    // couple of seconds, and the monitor shows whatever it picked.
    let symbols = directory
        .records()
        .iter()
        .map(|e| e.symbol.clone())
        .collect();
    let source = DummySource::new(symbols, Duration::from_millis(2000));

    let selection = CurrentSelection::new();
    let _listener = ElementListener::spawn(source, directory.clone(), selection.clone());
    let query = ElementQuery::new(directory, selection);

    engage_gui(Box::new(move || query.current().cloned())).expect("terminal failure");
}
