//! The interactive visualizer.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{Event, EventStream, KeyEvent};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures::StreamExt;
use rand::Rng;
use sortviz_core::{Controller, Handled};
use tokio::time::interval;
use tracing::{debug, info};

use crate::chart::{self, Frame};
use crate::input::{self, Action};
use crate::PlayArgs;

const TITLE: &str = "Sorting Algorithm Visualizer";

// ~30fps, steps arriving faster than this are coalesced
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Raw mode and alternate screen for as long as it lives.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        out.execute(EnterAlternateScreen)?.execute(Hide)?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.out.execute(Show);
        let _ = self.out.execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub(crate) async fn play(args: PlayArgs) -> anyhow::Result<()> {
    let dataset = args.dataset.config()?;
    let controller = Controller::new(dataset, args.dataset.rng())
        .with_algorithm(args.playback.algorithm)
        .with_speed(args.playback.speed());

    info!(
        algorithm = args.playback.algorithm.key(),
        length = dataset.length,
        "starting interactive session"
    );

    let mut terminal = TerminalGuard::enter().context("failed to set up the terminal")?;
    event_loop(&mut terminal.out, controller).await
}

/// What the loop does after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Redraw,
    Unbound,
    Quit,
}

async fn on_key<R: Rng>(controller: &mut Controller<R>, key: KeyEvent) -> KeyOutcome {
    match input::map_key(key) {
        Some(Action::Quit) => KeyOutcome::Quit,
        Some(Action::Command(command)) => {
            if controller.handle(command).await == Handled::Ignored {
                debug!(?command, "command disabled while running");
            }
            KeyOutcome::Redraw
        }
        None => KeyOutcome::Unbound,
    }
}

async fn event_loop<R: Rng>(out: &mut Stdout, mut controller: Controller<R>) -> anyhow::Result<()> {
    let mut keys = EventStream::new();
    let mut frames = interval(FRAME_INTERVAL);
    let mut dirty = true;

    let result = loop {
        tokio::select! {
            Some(event) = controller.recv() => {
                dirty |= controller.on_event(event);
            }
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) => match on_key(&mut controller, key).await {
                    KeyOutcome::Quit => break Ok(()),
                    KeyOutcome::Redraw => dirty = true,
                    KeyOutcome::Unbound => {}
                },
                Some(Ok(Event::Resize(..))) => dirty = true,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    break Err(anyhow::Error::from(err).context("failed to read terminal events"));
                }
                None => break Ok(()),
            },
            _ = frames.tick() => {
                if dirty {
                    if let Err(err) = render(out, &controller) {
                        break Err(anyhow::Error::from(err).context("failed to draw the chart"));
                    }
                    dirty = false;
                }
            }
        }
    };

    controller.shutdown().await;
    result
}

fn render<R: Rng>(out: &mut Stdout, controller: &Controller<R>) -> io::Result<()> {
    let model = controller.model();
    let state = if controller.is_playing() {
        "running"
    } else {
        "idle"
    };

    let frame = Frame {
        title: TITLE,
        status: format!(
            "{}  |  {} bars  |  speed {}  |  {}",
            controller.algorithm(),
            model.sequence().len(),
            controller.speed(),
            state
        ),
        help: input::HELP,
    };

    let max_value = model
        .sequence()
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(controller.dataset().max_value);

    chart::draw_frame(
        out,
        &frame,
        model.sequence(),
        model.roles(),
        max_value,
        terminal::size()?,
    )
}
