// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Runtime Behaviour Parameters*
//!
//! Global configuration constants controlling kernel path selection and
//! display. These values are compile-time constants tuned for typical
//! workloads; callers override the path per call with `SelectionPath`.

/// Minimum average run length for the bulk span-copy path.
///
/// Under `SelectionPath::Auto` a kernel copies whole spans when
/// `runs * MIN_AVG_RUN_LEN <= len`, and falls back to the per-row path
/// otherwise. Below this length the span bookkeeping costs more than it saves.
pub const MIN_AVG_RUN_LEN: usize = 8;

/// Rows per task for the chunked parallel entry points.
#[cfg(feature = "parallel_proc")]
pub const DEFAULT_PAR_CHUNK_LEN: usize = 64 * 1024;

/// Number of entries printed by the `Display` implementations.
pub(crate) const MAX_PREVIEW: usize = 50;
