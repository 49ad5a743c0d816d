// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Error taxonomy of the GLU tessellator (GLU_TESS_* error codes).
//
// Only `OutOfMemory` ends a session. Everything else is reported through the
// visitor's error callback while the tessellator repairs its state and keeps
// going.

use thiserror::Error;

/// Errors reported by the tessellator.
///
/// The numeric value of each variant, as returned by [`TessError::code`],
/// matches the corresponding GLU enum so that callers porting GLU code can
/// keep their existing error tables.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TessError {
    /// A contour or vertex call arrived before `begin_polygon`.
    #[error("missing begin_polygon; a polygon was started implicitly")]
    MissingBeginPolygon,

    /// A vertex arrived before `begin_contour`.
    #[error("missing begin_contour; a contour was started implicitly")]
    MissingBeginContour,

    /// `begin_polygon` was called while a polygon was still open.
    /// The pending polygon is discarded.
    #[error("missing end_polygon; the pending polygon was discarded")]
    MissingEndPolygon,

    /// `end_polygon` or `begin_contour` was called with a contour still open.
    #[error("missing end_contour; the open contour was closed implicitly")]
    MissingEndContour,

    /// A vertex coordinate exceeded the supported magnitude and was clamped.
    #[error("vertex coordinate too large; clamped to the supported range")]
    CoordTooLarge,

    /// Two edges intersect but the visitor supplied no data for the new vertex.
    /// The data of an existing vertex is reused instead.
    #[error("edges intersect and no combine data was supplied")]
    NeedCombineCallback,

    /// An arena could not grow. The polygon is abandoned.
    #[error("out of memory")]
    OutOfMemory,

    /// Unknown property selector.
    #[error("invalid enum")]
    InvalidEnum,

    /// Property value outside its accepted range.
    #[error("invalid value")]
    InvalidValue,
}

impl TessError {
    /// The GLU enum value for this error.
    pub fn code(self) -> u32 {
        match self {
            TessError::MissingBeginPolygon => 100151,
            TessError::MissingBeginContour => 100152,
            TessError::MissingEndPolygon => 100153,
            TessError::MissingEndContour => 100154,
            TessError::CoordTooLarge => 100155,
            TessError::NeedCombineCallback => 100156,
            TessError::InvalidEnum => 100900,
            TessError::InvalidValue => 100901,
            TessError::OutOfMemory => 100902,
        }
    }

    /// True when the error aborts the current polygon.
    pub fn is_fatal(self) -> bool {
        matches!(self, TessError::OutOfMemory)
    }
}

/// Result alias used throughout the crate.
pub type TessResult<T> = Result<T, TessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_glu() {
        assert_eq!(TessError::MissingBeginPolygon.code(), 100151);
        assert_eq!(TessError::NeedCombineCallback.code(), 100156);
        assert_eq!(TessError::OutOfMemory.code(), 100902);
        assert_eq!(TessError::InvalidEnum.code(), 100900);
    }

    #[test]
    fn only_out_of_memory_is_fatal() {
        let all = [
            TessError::MissingBeginPolygon,
            TessError::MissingBeginContour,
            TessError::MissingEndPolygon,
            TessError::MissingEndContour,
            TessError::CoordTooLarge,
            TessError::NeedCombineCallback,
            TessError::OutOfMemory,
            TessError::InvalidEnum,
            TessError::InvalidValue,
        ];
        let fatal: Vec<_> = all.iter().filter(|e| e.is_fatal()).collect();
        assert_eq!(fatal, vec![&TessError::OutOfMemory]);
    }

    #[test]
    fn display_mentions_cause() {
        let msg = TessError::CoordTooLarge.to_string();
        assert!(msg.contains("clamped"), "unexpected message: {msg}");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TessError>();
    }
}
