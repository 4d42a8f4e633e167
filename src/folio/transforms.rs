//! Transform pipeline infrastructure
//!
//! A composable, type-safe way to chain processing stages. Any stage can follow another as
//! long as the output type of the first is the input type of the second.
//!
//! # The `Runnable` Trait
//!
//! The interface of every stage:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, TransformError>;
//! }
//! ```
//!
//! # The `Transform<I, O>` Type
//!
//! A boxed chain of stages, extended with [`Transform::then`]:
//!
//! ```rust,ignore
//! let mangling = Transform::from_fn(Ok)
//!     .then(RemoveSeparators::new())     // Manuscript -> Manuscript
//!     .then(RehierarchizeLevels::new())  // Manuscript -> Manuscript
//!     .then(ResolveDesignators::new());  // Manuscript -> Compiled
//! ```
//!
//! # Static Lazy Transforms
//!
//! Pipelines that do not depend on configuration are pre-built in [`standard`] as
//! `once_cell::sync::Lazy` statics.
//!
//! # Errors
//!
//! Stages fail only on defects: a pass that built an invalid path, a robust path that no
//! longer matches the tree it was recorded on. Content issues travel as
//! [`Problem`](crate::folio::designator::Problem)s inside the stage values instead.
//!
//! # Module Organization
//!
//! - [`stages`]: one stage per mangling pass, plus resolution and logging
//! - [`standard`]: pre-built transforms

pub mod stages;
pub mod standard;

use std::fmt;

use crate::folio::tree::TreeError;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Generic error with message
    Error(String),
    /// Stage failed with specific error
    StageFailed { stage: String, message: String },
}

impl TransformError {
    /// Wraps a tree error raised while running `stage`.
    pub fn in_stage(stage: &str, error: TreeError) -> Self {
        TransformError::StageFailed {
            stage: stage.to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Error(msg) => write!(f, "{}", msg),
            TransformError::StageFailed { stage, message } => {
                write!(f, "Stage '{}' failed: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

impl From<TreeError> for TransformError {
    fn from(error: TreeError) -> Self {
        TransformError::Error(error.to_string())
    }
}

/// Trait for anything that can transform an input to an output
///
/// Implemented by individual stages; [`Transform`] composes them.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Add a stage to this transform, returning a new transform with extended output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Add a stage only when `enabled`, for configuration switches.
    pub fn then_if<S>(self, enabled: bool, stage: S) -> Transform<I, O>
    where
        S: Runnable<O, O> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
    {
        if enabled {
            self.then(stage)
        } else {
            self
        }
    }

    /// Chain a pre-built static transform
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

// Transforms can be used as stages
impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
