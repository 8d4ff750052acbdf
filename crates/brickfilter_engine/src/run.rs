//! One command from text to committed result.

use brickfilter_foundation::{Error, Result};
use brickfilter_language::{Operation, parse};
use tracing::{info, warn};

use crate::context::RunInputs;
use crate::host::{Acquired, Viewer, WorldHost};
use crate::interpreter::{Evaluation, Interpreter, Summary};
use crate::registry::Registry;

/// Parses, compiles, executes, and commits `command` for `viewer`.
///
/// World-wide destructive commands are confirmed with the host after
/// compiling and before anything runs. `count` never commits.
///
/// # Errors
/// Returns parse and evaluation errors, host acquisition and commit
/// errors, or `Cancelled` when confirmation is declined. On any error the
/// world is left as it was.
pub fn run<H: WorldHost + ?Sized>(
    registry: &Registry,
    host: &mut H,
    viewer: &Viewer,
    command: &str,
) -> Result<Summary> {
    let parsed = parse(command)?;

    let Acquired {
        mut records,
        scope,
        bounds,
    } = host.acquire_records(parsed.apply_to_everything, viewer)?;

    let inputs = RunInputs {
        yaw: host.viewer_orientation(viewer),
        paint: host.viewer_paint_color(viewer),
        bounds,
        seed: host.rng_seed(),
    };
    let program = Interpreter::new(registry).compile(&parsed, &records, &inputs)?;

    if parsed.apply_to_everything && parsed.operation.is_destructive() {
        let prompt = format!("Apply `{parsed}` to every brick in the world?");
        if !host.confirm(viewer, &prompt) {
            warn!(viewer = %viewer.name, command, "world-wide command cancelled");
            return Err(Error::Cancelled);
        }
    }

    let operation = program.operation();
    let Evaluation { summary, extracted } = program.execute(&mut records);

    match operation {
        Operation::Count => {}
        Operation::Copy => host.commit_copy(extracted, viewer)?,
        Operation::Extract => host.commit_extract(extracted, records, scope, viewer)?,
        Operation::Replace | Operation::Delete => host.commit_replace(records, scope)?,
    }

    info!(
        viewer = %viewer.name,
        %operation,
        total = summary.total,
        filtered = summary.filtered,
        deleted = summary.deleted,
        extracted = summary.extracted,
        "command complete"
    );
    host.report(viewer, &summary);
    Ok(summary)
}
