//! Text-mode front-end for the wasteland story.

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use story_engine::{Flow, PhaseController};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STORY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.resolve_config().context("failed to read configuration")?;

    // A broken story is the only thing allowed to stop the game at startup
    let graph = config.load_story().map_err(|err| {
        error!(path = %config.story_path.display(), error = %err, "story failed to load");
        err
    });
    let graph = graph.with_context(|| {
        format!("cannot start: story {} is unusable", config.story_path.display())
    })?;

    if cli.check {
        println!(
            "{}: {} nodes, {} endings",
            config.story_path.display(),
            graph.len(),
            graph.endings().count()
        );
        for (node, label, target) in graph.unresolved_actions() {
            println!("  warning: '{}' on node '{}' points to missing node '{}'", label, node, target);
        }
        return Ok(());
    }

    info!(title = %config.title, saves = %config.save_dir.display(), "starting game");
    let saves = Box::new(config.save_store());
    let mut controller = PhaseController::new(Arc::new(graph), saves, config);

    let stdin = io::stdin();
    run(&mut controller, stdin.lock(), io::stdout())
}

/// Draw the active screen, read a line, feed it to the controller. Stops on
/// exit or end of input.
fn run(controller: &mut PhaseController, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    loop {
        if let Some(notice) = controller.take_notice() {
            writeln!(out, "! {}", notice)?;
        }

        let menu = render::render(&controller.view());
        write!(out, "{}> ", menu.text)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let Some(selection) = menu.select(&line) else {
            writeln!(out, "Type the number of an option.")?;
            continue;
        };

        match controller.handle(selection) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => writeln!(out, "! {}", err)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use story_engine::{GameConfig, PhaseKind};
    use story_graph::{MemorySaveStore, SaveStore, SlotId, StoryGraph, ValidationPolicy};

    const STORY: &str = r#"{
        "entry": {"prompt": "The geiger counter clicks.", "actions": [
            {"name": "Leave", "next_state": "out"},
            {"name": "Stay", "next_state": "missing"}
        ]},
        "out": {"endgame": true, "heading": "ESCAPED", "desc": "You got away."}
    }"#;

    fn controller() -> PhaseController {
        let graph = StoryGraph::from_json_str(STORY, ValidationPolicy::Lenient).unwrap();
        PhaseController::new(
            Arc::new(graph),
            Box::new(MemorySaveStore::new()),
            GameConfig::default(),
        )
    }

    fn play(controller: &mut PhaseController, keys: &str) -> String {
        let mut out = Vec::new();
        run(controller, Cursor::new(keys.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_play_to_ending() {
        let mut controller = controller();

        // NEW GAME, Leave
        let output = play(&mut controller, "1\n1\n");

        assert!(output.contains("The geiger counter clicks."));
        assert!(output.contains("*** ESCAPED ***"));
        assert_eq!(controller.kind(), PhaseKind::EndGame);
    }

    #[test]
    fn test_errors_are_reported_and_play_continues() {
        let mut controller = controller();

        // NEW GAME, Stay (missing target), nonsense, Leave
        let output = play(&mut controller, "1\n2\nwat\n1\n");

        assert!(output.contains("! action #1 on node 'entry'"));
        assert!(output.contains("Type the number of an option."));
        assert!(output.contains("*** ESCAPED ***"));
    }

    #[test]
    fn test_exit_from_pause_writes_quicksave() {
        let mut controller = controller();

        // NEW GAME, PAUSE (third option), EXIT GAME (fifth pause button)
        play(&mut controller, "1\n3\n5\n");

        assert_eq!(
            controller.saves().load(SlotId::QUICKSAVE).unwrap().unwrap().as_str(),
            "entry"
        );
    }

    #[test]
    fn test_bundled_story_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/story.json");

        let graph = StoryGraph::load(path, ValidationPolicy::Strict).unwrap();

        assert!(graph.endings().count() >= 2);
        assert_eq!(graph.unresolved_actions().count(), 0);
    }
}
