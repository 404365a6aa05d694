use thiserror::Error;

use super::driver::RendererPhase;
use crate::params::ParameterError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot {operation} while {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: RendererPhase,
    },

    #[error("pipeline index {index} out of range ({count} registered)")]
    PipelineIndex { index: usize, count: usize },

    #[error("no pipelines supplied")]
    NoPipelines,

    #[error("pipeline {label:?} failed to compile: {message}")]
    Compilation { label: String, message: String },

    #[error("pipeline {index} has no parameter buffer")]
    NoParameters { index: usize },

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}
