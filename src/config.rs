// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Tessellation properties: winding rule, boundary mode, normal, tolerance.

use crate::error::{TessError, TessResult};
use crate::geom::Real;

/// Which regions count as interior, by winding number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WindingRule {
    #[default]
    Odd,
    NonZero,
    Positive,
    Negative,
    AbsGeqTwo,
}

impl WindingRule {
    #[inline]
    pub fn is_inside(self, n: i32) -> bool {
        match self {
            WindingRule::Odd => n & 1 != 0,
            WindingRule::NonZero => n != 0,
            WindingRule::Positive => n > 0,
            WindingRule::Negative => n < 0,
            WindingRule::AbsGeqTwo => n >= 2 || n <= -2,
        }
    }
}

impl From<WindingRule> for u32 {
    fn from(rule: WindingRule) -> u32 {
        match rule {
            WindingRule::Odd => 100130,
            WindingRule::NonZero => 100131,
            WindingRule::Positive => 100132,
            WindingRule::Negative => 100133,
            WindingRule::AbsGeqTwo => 100134,
        }
    }
}

impl TryFrom<u32> for WindingRule {
    type Error = TessError;

    fn try_from(value: u32) -> TessResult<Self> {
        match value {
            100130 => Ok(WindingRule::Odd),
            100131 => Ok(WindingRule::NonZero),
            100132 => Ok(WindingRule::Positive),
            100133 => Ok(WindingRule::Negative),
            100134 => Ok(WindingRule::AbsGeqTwo),
            _ => Err(TessError::InvalidValue),
        }
    }
}

/// Property selectors for [`crate::Tessellator::set_property`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TessProperty {
    WindingRule,
    BoundaryOnly,
    Tolerance,
}

impl From<TessProperty> for u32 {
    fn from(p: TessProperty) -> u32 {
        match p {
            TessProperty::WindingRule => 100140,
            TessProperty::BoundaryOnly => 100141,
            TessProperty::Tolerance => 100142,
        }
    }
}

impl TryFrom<u32> for TessProperty {
    type Error = TessError;

    fn try_from(value: u32) -> TessResult<Self> {
        match value {
            100140 => Ok(TessProperty::WindingRule),
            100141 => Ok(TessProperty::BoundaryOnly),
            100142 => Ok(TessProperty::Tolerance),
            _ => Err(TessError::InvalidEnum),
        }
    }
}

/// Settings read at `end_polygon`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TessConfig {
    pub winding_rule: WindingRule,
    /// Emit region outlines as line loops instead of triangles.
    pub boundary_only: bool,
    /// Projection normal. All zeros means "compute one from the input".
    pub normal: [Real; 3],
    /// Merge tolerance in `[0, 1]`. Accepted but not used by the sweep.
    pub tolerance: Real,
}

impl Default for TessConfig {
    fn default() -> Self {
        TessConfig {
            winding_rule: WindingRule::Odd,
            boundary_only: false,
            normal: [0.0; 3],
            tolerance: 0.0,
        }
    }
}

impl TessConfig {
    pub fn validate(&self) -> TessResult<()> {
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(TessError::InvalidValue);
        }
        Ok(())
    }

    /// Applies a numeric GLU-style property value. On error nothing changes.
    pub fn set(&mut self, which: u32, value: f64) -> TessResult<()> {
        match TessProperty::try_from(which)? {
            TessProperty::WindingRule => {
                if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
                    return Err(TessError::InvalidValue);
                }
                self.winding_rule = WindingRule::try_from(value as u32)?;
            }
            TessProperty::BoundaryOnly => {
                self.boundary_only = value != 0.0;
            }
            TessProperty::Tolerance => {
                if !(0.0..=1.0).contains(&value) {
                    return Err(TessError::InvalidValue);
                }
                self.tolerance = value;
            }
        }
        Ok(())
    }

    pub fn get(&self, which: u32) -> TessResult<f64> {
        Ok(match TessProperty::try_from(which)? {
            TessProperty::WindingRule => u32::from(self.winding_rule) as f64,
            TessProperty::BoundaryOnly => {
                if self.boundary_only {
                    1.0
                } else {
                    0.0
                }
            }
            TessProperty::Tolerance => self.tolerance,
        })
    }
}
