//! Integration tests for REPL sessions
//!
//! Drives the REPL line by line over a scripted editor, with save files
//! on disk.

use brickfilter_foundation::Result;
use brickfilter_runtime::{
    LineEditor, LocalHost, ReadResult, Repl, ReplError, RuntimeConfig, Step, load_from_file,
    save_to_file,
};
use brickfilter_storage::{Brick, BrickSet};

/// Editor that replays fixed lines, then reports end of input.
struct Script(std::vec::IntoIter<String>);

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self(
            lines
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }
}

impl LineEditor for Script {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.0.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn session(world: BrickSet) -> Repl<Script> {
    let config = RuntimeConfig::batch().with_seed(1);
    Repl::with_editor(Script::new(&[]), &config)
        .with_host(LocalHost::new(&config).with_world(world))
        .without_banner()
}

fn grid() -> BrickSet {
    let mut set = BrickSet::new();
    for x in 0..4 {
        for y in 0..4 {
            set.bricks
                .push(Brick::at([f64::from(x) * 10.0, f64::from(y) * 10.0, 6.0]));
        }
    }
    set
}

fn lines(step: Step) -> Vec<String> {
    match step {
        Step::Continue(lines) => lines,
        Step::Quit => panic!("unexpected quit"),
    }
}

fn temp(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("brickfilter_session_{name}.msgpack"))
}

// =============================================================================
// Meta Commands
// =============================================================================

#[test]
fn select_paint_and_recolor() {
    let mut repl = session(grid());
    assert_eq!(
        lines(repl.eval(":select -5 -5 0 15 15 12").unwrap()),
        vec!["selected 4 bricks".to_string()]
    );
    repl.eval(":paint 10 20 30").unwrap();
    assert_eq!(
        lines(repl.eval("replace paint").unwrap()),
        vec!["4 of 4 bricks matched".to_string()]
    );
    let world = repl.host().world();
    let painted = world
        .bricks
        .iter()
        .filter(|b| world.tables.resolve_color(b.color) == Some([10, 20, 30]))
        .count();
    assert_eq!(painted, 4);
}

#[test]
fn copy_then_paste() {
    let mut repl = session(grid());
    let out = lines(repl.eval("all pos(y, 0) copy translate(up, 1br)").unwrap());
    assert_eq!(out, vec!["4 of 16 bricks matched, 4 moved to clipboard".to_string()]);
    assert_eq!(repl.host().world().len(), 16);
    assert_eq!(lines(repl.eval(":paste").unwrap()), vec!["pasted 4 bricks".to_string()]);
    assert_eq!(repl.host().world().len(), 20);
}

#[test]
fn stats_describe_the_session() {
    let mut repl = session(grid());
    repl.eval(":yaw 90").unwrap();
    let stats = lines(repl.eval(":stats").unwrap()).join("\n");
    assert!(stats.contains("world: 16 bricks"));
    assert!(stats.contains("selection: none"));
    assert!(stats.contains("yaw: 90"));
}

#[test]
fn misuse_is_reported() {
    let mut repl = session(grid());
    assert!(matches!(repl.eval(":select 1 2"), Err(ReplError::Usage(_))));
    assert!(matches!(repl.eval(":paint 1 2 300"), Err(ReplError::Usage(_))));
    assert!(matches!(repl.eval(":teleport"), Err(ReplError::UnknownMeta(_))));
    assert!(matches!(repl.eval(":load"), Err(ReplError::Usage(_))));
    assert_eq!(repl.eval(":quit").unwrap(), Step::Quit);
}

#[test]
fn parse_errors_render_with_caret() {
    let mut repl = session(grid());
    let err = repl.eval("all pos(x").unwrap_err();
    let rendered = err.render();
    assert!(rendered.ends_with("all pos(x\n         ^ expected ',' or ')'"));
}

// =============================================================================
// Save Files
// =============================================================================

#[test]
fn save_and_load_through_meta_commands() {
    let path = temp("meta");
    let mut repl = session(grid());
    repl.eval("all pos(x, >15) delete").unwrap();
    let shown = path.display().to_string();
    assert_eq!(
        lines(repl.eval(&format!(":save {shown}")).unwrap()),
        vec!["saved 8 bricks".to_string()]
    );

    let mut other = session(BrickSet::new());
    assert_eq!(
        lines(other.eval(&format!(":load {shown}")).unwrap()),
        vec!["loaded 8 bricks".to_string()]
    );
    assert_eq!(other.host().world(), repl.host().world());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_world_can_append() {
    let path = temp("append");
    save_to_file(&grid(), &path).unwrap();
    let mut repl = session(grid());
    assert_eq!(repl.load_world(&path, true).unwrap(), 16);
    assert_eq!(repl.host().world().len(), 32);
    assert_eq!(repl.load_world(&path, false).unwrap(), 16);
    assert_eq!(repl.host().world().len(), 16);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn clipboard_can_be_saved() {
    let path = temp("clipboard");
    let mut repl = session(grid());
    repl.eval("all pos(x, 0) extract").unwrap();
    repl.eval(&format!(":clipboard save {}", path.display())).unwrap();
    assert_eq!(load_from_file(&path).unwrap().len(), 4);
    assert_eq!(repl.host().world().len(), 12);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_error() {
    let mut repl = session(grid());
    let err = repl.eval(":load /nonexistent/brickfilter.msgpack").unwrap_err();
    assert!(matches!(err, ReplError::Command(_)));
    assert_eq!(repl.host().world().len(), 16);
}

// =============================================================================
// Run Loop
// =============================================================================

#[test]
fn run_loop_stops_at_quit() {
    let config = RuntimeConfig::batch();
    let mut repl = Repl::with_editor(
        Script::new(&["all hidden count", "all delete", ":quit", "all count"]),
        &config,
    )
    .with_host(LocalHost::new(&config).with_world(grid()))
    .without_banner();
    repl.run().unwrap();
    assert!(repl.host().world().is_empty());
}
