use crate::search::SearchEvent;
use crate::ui::app::App;
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Drive the terminal UI until the user quits.
///
/// Terminal input, search completions and the animation tick are all
/// handled on this task, so the app never needs a lock.
pub async fn run(
    mut app: App,
    mut search_events: UnboundedReceiver<SearchEvent>,
    tick_rate: Duration,
) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut input = EventStream::new();
    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => handle_key(&mut app, key),
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::error!(error = %err, "Terminal input failed");
                    break;
                }
                None => break,
            },
            Some(event) = search_events.recv() => app.on_search_event(event),
            _ = ticker.tick() => app.on_tick(),
        }
    }

    drop(guard);
    Ok(())
}
