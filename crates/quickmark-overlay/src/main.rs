//! Quickmark - terminal demo host.
//!
//! Loads a bookmark tree, wires the host to one overlay controller, and
//! drives the overlay from stdin. Lines starting with `:` are commands;
//! anything else replaces the search field's text.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use quickmark_core::{Broadcast, QuickmarkConfig, TOGGLE_COMMAND};
use quickmark_host::{
    Background, BookmarkProvider, BookmarkTree, HostError, Navigator, PageHost, TabId,
};
use quickmark_overlay::{
    ControllerEvent, HostBridge, Key, KeyEvent, Keymap, OverlayController, TerminalSurface,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The single page the demo shows the overlay on.
const PAGE_TAB: TabId = TabId(1);

const HELP: &str = "\
commands:
  :toggle        show or hide the palette
  :up / :down    move the highlight
  :enter         open in this tab
  :new           open in a new tab
  :esc           dismiss
  :hover N       highlight row N
  :click N       open row N
  :outside       click outside the panel
  :quit          exit
anything else is typed into the search field";

// =============================================================================
// Host Collaborators
// =============================================================================

/// The demo's one page. Broadcasts go straight to the controller queue.
struct LocalPage {
    events: UnboundedSender<ControllerEvent>,
}

#[async_trait]
impl PageHost for LocalPage {
    async fn active_tab(&self) -> Option<TabId> {
        Some(PAGE_TAB)
    }

    async fn ensure_injected(&self, tab: TabId) -> Result<(), HostError> {
        tracing::debug!("Overlay present in tab {}", tab);
        Ok(())
    }

    async fn broadcast(&self, tab: TabId, message: Broadcast) -> Result<(), HostError> {
        self.events
            .send(ControllerEvent::Broadcast(message))
            .map_err(|e| HostError::Delivery {
                tab,
                message: e.to_string(),
            })
    }
}

/// Prints navigations instead of performing them.
struct TerminalNavigator {
    next_tab: AtomicU64,
}

impl TerminalNavigator {
    fn new() -> Self {
        Self {
            next_tab: AtomicU64::new(PAGE_TAB.0 + 1),
        }
    }
}

#[async_trait]
impl Navigator for TerminalNavigator {
    async fn update(&self, tab: TabId, url: &str) -> Result<(), HostError> {
        println!("→ tab {}: {}", tab, url);
        Ok(())
    }

    async fn create(&self, url: &str, _active: bool) -> Result<TabId, HostError> {
        let tab = TabId(self.next_tab.fetch_add(1, Ordering::Relaxed));
        println!("→ new tab {}: {}", tab, url);
        Ok(tab)
    }
}

// =============================================================================
// Input
// =============================================================================

/// One parsed stdin line.
#[derive(Debug)]
enum Command {
    /// The global toggle command, routed through the host.
    Toggle,
    /// An event for the controller.
    Event(ControllerEvent),
}

fn parse_line(line: &str) -> Option<Command> {
    let Some(command) = line.strip_prefix(':') else {
        return Some(Command::Event(ControllerEvent::InputChanged(line.to_string())));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let row = parts.next().and_then(|n| n.parse::<usize>().ok());

    let event = match (name, row) {
        ("toggle", _) => return Some(Command::Toggle),
        ("up", _) => ControllerEvent::Key(KeyEvent::new(Key::ArrowUp)),
        ("down", _) => ControllerEvent::Key(KeyEvent::new(Key::ArrowDown)),
        ("enter", _) => ControllerEvent::Key(KeyEvent::new(Key::Enter)),
        ("new", _) => ControllerEvent::Key(KeyEvent::new(Key::Enter).with_ctrl()),
        ("esc", _) => ControllerEvent::Key(KeyEvent::new(Key::Escape)),
        ("hover", Some(row)) => ControllerEvent::PointerEnter(row),
        ("click", Some(row)) => ControllerEvent::Click(row),
        ("outside", _) => ControllerEvent::ClickOutside,
        ("quit", _) => ControllerEvent::Shutdown,
        _ => return None,
    };
    Some(Command::Event(event))
}

/// Read stdin lines on a dedicated thread.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Feed stdin to the host and the controller until `:quit` or EOF.
async fn input_loop(
    mut lines: UnboundedReceiver<String>,
    background: Arc<Background>,
    events: UnboundedSender<ControllerEvent>,
) {
    while let Some(line) = lines.recv().await {
        match parse_line(&line) {
            Some(Command::Toggle) => {
                if let Err(e) = background.on_command(TOGGLE_COMMAND).await {
                    tracing::warn!("Toggle dropped: {}", e);
                }
            }
            Some(Command::Event(ControllerEvent::Shutdown)) => break,
            Some(Command::Event(event)) => {
                if events.send(event).is_err() {
                    return;
                }
            }
            None => println!("{}", HELP),
        }
    }
    let _ = events.send(ControllerEvent::Shutdown);
}

// =============================================================================
// Initialization
// =============================================================================

fn load_bookmarks(config: &QuickmarkConfig) -> BookmarkTree {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.bookmarks.clone());

    let Some(path) = path else {
        tracing::warn!("No bookmarks file given - starting with an empty tree");
        return BookmarkTree::new();
    };

    match BookmarkTree::load(&path) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::error!("Failed to load {}: {} - continuing with no bookmarks", path.display(), e);
            BookmarkTree::new()
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Quickmark starting...");

    let config = QuickmarkConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Config error: {} - using defaults", e);
        QuickmarkConfig::default()
    });
    tracing::info!("Toggle hotkey: {} (type :toggle here)", config.hotkey.toggle);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let tree = load_bookmarks(&config);

    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let provider =
        BookmarkProvider::new(Arc::new(tree)).with_max_results(config.search.max_results);
    let background = Arc::new(Background::new(
        provider,
        Arc::new(TerminalNavigator::new()),
        Arc::new(LocalPage {
            events: events_tx.clone(),
        }),
    ));

    let mut keymap = Keymap::default();
    let applied = keymap.apply_overrides(&config.keymap);
    tracing::info!(
        "Keymap: {} bindings ({} from config)",
        keymap.binding_count(),
        applied
    );

    let bridge = HostBridge::new(background.clone(), Some(PAGE_TAB))
        .with_timeout(config.search.timeout());
    let controller = OverlayController::new(Arc::new(bridge), TerminalSurface::new(), events_tx.clone())
        .with_debounce(config.search.debounce())
        .with_open_failure(config.behavior.open_failure)
        .with_keymap(keymap);

    println!("{}", HELP);

    let lines = spawn_stdin_reader();
    rt.block_on(async move {
        tokio::spawn(input_loop(lines, background, events_tx));
        controller.run(events_rx).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert!(matches!(parse_line(":toggle"), Some(Command::Toggle)));
        assert!(matches!(
            parse_line("rust book"),
            Some(Command::Event(ControllerEvent::InputChanged(text))) if text == "rust book"
        ));
        assert!(matches!(
            parse_line(""),
            Some(Command::Event(ControllerEvent::InputChanged(text))) if text.is_empty()
        ));
        assert!(matches!(
            parse_line(":hover 2"),
            Some(Command::Event(ControllerEvent::PointerEnter(2)))
        ));
        assert!(matches!(
            parse_line(":new"),
            Some(Command::Event(ControllerEvent::Key(KeyEvent { key: Key::Enter, modifiers })))
                if modifiers.ctrl
        ));
        assert!(matches!(
            parse_line(":quit"),
            Some(Command::Event(ControllerEvent::Shutdown))
        ));
        assert!(parse_line(":click").is_none());
        assert!(parse_line(":bogus").is_none());
    }
}
