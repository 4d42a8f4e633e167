//! Stage logging
//!
//! [`Logged`] runs a stage inside the caller's span and reports node counts before and
//! after it, plus every problem the stage added. Nothing is logged when the span is
//! disabled, which is the default.

use tracing::{debug, warn, Span};

use crate::folio::pipeline::StageReport;
use crate::folio::transforms::{Runnable, TransformError};

/// Stable stage name used in logs and stage errors.
pub trait Named {
    const NAME: &'static str;
}

pub struct Logged<S> {
    stage: S,
    span: Span,
}

impl<S: Named> Logged<S> {
    pub fn new(stage: S, span: Span) -> Self {
        Logged { stage, span }
    }
}

impl<I, O, S> Runnable<I, O> for Logged<S>
where
    I: StageReport,
    O: StageReport,
    S: Runnable<I, O> + Named,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        let known_problems = input.problems().len();
        debug!(
            parent: &self.span,
            stage = S::NAME,
            nodes = input.node_count(),
            "stage started"
        );

        let output = self.stage.run(input).map_err(|error| {
            warn!(parent: &self.span, stage = S::NAME, error = %error, "stage failed");
            error
        })?;

        for problem in output.problems().iter().skip(known_problems) {
            warn!(parent: &self.span, stage = S::NAME, problem = %problem, "document problem");
        }
        debug!(
            parent: &self.span,
            stage = S::NAME,
            nodes = output.node_count(),
            problems = output.problems().len(),
            "stage finished"
        );
        Ok(output)
    }
}
