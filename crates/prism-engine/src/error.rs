use thiserror::Error;

use crate::layout::{AttributeFormat, Semantic};

/// Configuration errors raised while assembling a pipeline.
///
/// None of these can occur once a [`Pipeline`](crate::Pipeline) exists: the
/// vertex stage itself has no per-vertex failure mode. A pipeline that fails
/// to build must not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("input layout has a zero stride")]
    ZeroStride,

    #[error("input layout stride {stride} is not a multiple of 4 bytes")]
    MisalignedStride { stride: u32 },

    #[error("no input attribute is bound for {0}")]
    MissingAttribute(Semantic),

    #[error("{0} is bound to more than one input attribute")]
    DuplicateAttribute(Semantic),

    #[error("shader location {location} is bound more than once")]
    DuplicateLocation { location: u32 },

    #[error("{semantic} expects {expected} components, layout binds {found} ({format})")]
    ComponentMismatch {
        semantic: Semantic,
        expected: u32,
        found: u32,
        format: AttributeFormat,
    },

    #[error("{semantic} expects floating-point data, layout binds {found}")]
    ScalarMismatch {
        semantic: Semantic,
        found: AttributeFormat,
    },

    #[error("{semantic} offset {offset} is not 4-byte aligned")]
    MisalignedOffset { semantic: Semantic, offset: u32 },

    #[error("{semantic} ends at byte {end}, past the stride of {stride}")]
    AttributeOutOfBounds {
        semantic: Semantic,
        end: u64,
        stride: u32,
    },

    #[error("no output is declared for {0}")]
    MissingOutput(Semantic),

    #[error("{0} output is declared more than once")]
    DuplicateOutput(Semantic),

    #[error("clip position output must be declared with full precision")]
    PositionPrecision,

    #[error("vertex buffer of {len} bytes is not a multiple of the {stride}-byte stride")]
    BufferSize { len: usize, stride: u32 },
}
