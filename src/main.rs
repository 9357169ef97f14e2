use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use playback_overlay::OverlayConfig;
use playback_overlay::models::ClockTick;
use playback_overlay::overlay::{Direction, OverlayInput, OverlayRuntime};
use playback_overlay::player::{ClockCommand, ClockHandle};

/// Time given to the runtime task to drain an input before printing.
const SETTLE: Duration = Duration::from_millis(20);

enum Line {
    Inputs(Vec<OverlayInput>),
    Wait(Duration),
    Quit,
}

fn parse_line(line: &str, dragging: &mut bool) -> Result<Line> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Line::Inputs(Vec::new()));
    };
    let mut number = |name: &str| -> Result<f64> {
        parts
            .next()
            .with_context(|| format!("missing <{}>", name))?
            .parse::<f64>()
            .with_context(|| format!("invalid <{}>", name))
    };

    let inputs = match command {
        "left" => vec![OverlayInput::Press(Direction::Left)],
        "right" => vec![OverlayInput::Press(Direction::Right)],
        "up" => vec![OverlayInput::Press(Direction::Up)],
        "down" => vec![OverlayInput::Press(Direction::Down)],
        "select" => vec![OverlayInput::Select],
        "back" => vec![OverlayInput::Back],
        "tap" => vec![OverlayInput::Tap],
        "drag" => {
            let translation = number("px")?;
            let width = number("width")?;
            let mut inputs = Vec::new();
            if !*dragging {
                *dragging = true;
                inputs.push(OverlayInput::GestureStart);
            }
            inputs.push(OverlayInput::GestureMove { translation, width });
            inputs
        }
        "release" => {
            *dragging = false;
            vec![OverlayInput::GestureEnd]
        }
        "tick" => {
            let time = number("t")?;
            let duration = number("dur")?;
            let playing = parts
                .next()
                .context("missing <playing>")?
                .parse::<bool>()
                .context("invalid <playing>")?;
            vec![OverlayInput::ClockTick(ClockTick::new(time, duration, playing))]
        }
        "wait" => {
            let ms = number("ms")?;
            return Ok(Line::Wait(Duration::from_millis(ms.max(0.0) as u64)));
        }
        "rate" => vec![OverlayInput::SelectRate(number("r")?)],
        "bookmark" => vec![OverlayInput::AddBookmark],
        "quit" => return Ok(Line::Quit),
        other => bail!("unknown command '{}'", other),
    };
    Ok(Line::Inputs(inputs))
}

/// Stand-in playback engine: logs every command it receives.
async fn log_clock_commands(mut commands: mpsc::UnboundedReceiver<ClockCommand>) {
    while let Some(command) = commands.recv().await {
        info!("Clock <- {:?}", command);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("playback_overlay=debug,overlay_sim=info")
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => OverlayConfig::load_from(&PathBuf::from(path))?,
        None => OverlayConfig::load()?,
    };
    info!("Starting overlay simulator in {:?} mode", config.input_mode);

    let (clock, commands) = ClockHandle::new();
    tokio::spawn(log_clock_commands(commands));

    let (handle, runtime, mut events) =
        OverlayRuntime::new(&config, Box::new(clock)).context("Failed to build overlay")?;
    let runtime_task = runtime.spawn();

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!("Overlay event: {:?}", event);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut dragging = false;

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_line(line.trim(), &mut dragging) {
            Ok(Line::Inputs(inputs)) => {
                for input in inputs {
                    handle.send(input);
                }
            }
            Ok(Line::Wait(duration)) => tokio::time::sleep(duration).await,
            Ok(Line::Quit) => break,
            Err(e) => {
                warn!("Skipping line: {:#}", e);
                continue;
            }
        }

        tokio::time::sleep(SETTLE).await;
        let snapshot = serde_json::to_string(&handle.snapshot())
            .context("Failed to serialize snapshot")?;
        println!("{}", snapshot);
    }

    handle.shutdown();
    runtime_task.await.context("Overlay runtime panicked")?;
    Ok(())
}
