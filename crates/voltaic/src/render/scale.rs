//! Grid-to-pixel scales.
//!
//! The [`ScaleManager`] owns two independent linear scales. Their pixel
//! ranges are fixed by the canvas; their grid domains follow the circuit and
//! change only in [`ScaleManager::update_scales_to_circuit`]. The y scale is
//! inverted so that growing grid y moves up the screen.

use log::debug;

use voltaic_core::geometry::{GridPoint, Point, Size};

use crate::{config::CanvasConfig, layout::Layout};

/// Default x domain before any circuit is drawn, in grid units.
const DEFAULT_X_DOMAIN: Extent = Extent::new(0.0, 8.0);
/// Default y domain before any circuit is drawn, in grid units.
const DEFAULT_Y_DOMAIN: Extent = Extent::new(-4.0, 4.0);

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    min: f32,
    max: f32,
}

impl Extent {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn min(self) -> f32 {
        self.min
    }

    pub fn max(self) -> f32 {
        self.max
    }

    pub fn span(self) -> f32 {
        self.max - self.min
    }

    /// Grows the interval by `amount` on both ends.
    pub fn expand(self, amount: f32) -> Self {
        Self::new(self.min - amount, self.max + amount)
    }

    /// Returns the smallest interval holding all values, or `None` for no values.
    fn of(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values.into_iter().fold(None, |extent, value| match extent {
            None => Some(Self::new(value, value)),
            Some(extent) => Some(Self::new(extent.min.min(value), extent.max.max(value))),
        })
    }
}

/// A linear map from a domain interval onto a range interval.
///
/// # Examples
///
/// ```
/// # use voltaic::render::{Extent, LinearScale};
/// let scale = LinearScale::new(Extent::new(-2.0, 4.0), Extent::new(0.0, 600.0));
/// assert_eq!(scale.apply(-2.0), 0.0);
/// assert_eq!(scale.apply(1.0), 300.0);
/// assert_eq!(scale.invert(600.0), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Extent,
    range: Extent,
}

impl LinearScale {
    pub fn new(domain: Extent, range: Extent) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> Extent {
        self.domain
    }

    pub fn range(&self) -> Extent {
        self.range
    }

    pub fn set_domain(&mut self, domain: Extent) {
        self.domain = domain;
    }

    /// Maps a domain value into the range.
    ///
    /// A zero-width domain maps every value to the middle of the range.
    pub fn apply(&self, value: f32) -> f32 {
        let span = self.domain.span();
        if span == 0.0 {
            return (self.range.min + self.range.max) / 2.0;
        }
        let t = (value - self.domain.min) / span;
        self.range.min + t * self.range.span()
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, value: f32) -> f32 {
        let span = self.range.span();
        if span == 0.0 {
            return (self.domain.min + self.domain.max) / 2.0;
        }
        let t = (value - self.range.min) / span;
        self.domain.min + t * self.domain.span()
    }
}

/// Raw grid extent of a layout: every component position and net hub.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircuitBounds {
    x: Extent,
    y: Extent,
}

impl CircuitBounds {
    pub fn new(x: Extent, y: Extent) -> Self {
        Self { x, y }
    }

    /// Computes the bounds of a layout.
    ///
    /// An empty layout has zero extents at the origin.
    pub fn from_layout(layout: &Layout) -> Self {
        let points: Vec<Point> = layout
            .components()
            .iter()
            .map(|placed| Point::from(placed.position()))
            .chain(layout.nets().iter().map(|placed| placed.position()))
            .collect();

        Self {
            x: Extent::of(points.iter().map(|p| p.x())).unwrap_or_default(),
            y: Extent::of(points.iter().map(|p| p.y())).unwrap_or_default(),
        }
    }

    pub fn x(&self) -> Extent {
        self.x
    }

    pub fn y(&self) -> Extent {
        self.y
    }

    /// Grows both extents by `buffer` grid units on every side.
    pub fn expanded(self, buffer: f32) -> Self {
        Self {
            x: self.x.expand(buffer),
            y: self.y.expand(buffer),
        }
    }
}

/// Owns the x and y scales used by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleManager {
    x: LinearScale,
    y: LinearScale,
    inner: Size,
    buffer: f32,
}

impl ScaleManager {
    /// Creates scales for the drawable area of the canvas, with default domains.
    pub fn new(canvas: &CanvasConfig) -> Self {
        let inner = canvas.inner_size();
        Self {
            x: LinearScale::new(DEFAULT_X_DOMAIN, Extent::new(0.0, inner.width())),
            y: LinearScale::new(DEFAULT_Y_DOMAIN, Extent::new(inner.height(), 0.0)),
            inner,
            buffer: canvas.buffer(),
        }
    }

    /// Returns the drawable size: canvas minus padding.
    pub fn inner_size(&self) -> Size {
        self.inner
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Fits both domains to the layout, with the buffer on every side.
    pub fn update_scales_to_circuit(&mut self, layout: &Layout) {
        let bounds = CircuitBounds::from_layout(layout).expanded(self.buffer);
        self.x.set_domain(bounds.x());
        self.y.set_domain(bounds.y());

        debug!(
            x_min = bounds.x().min(),
            x_max = bounds.x().max(),
            y_min = bounds.y().min(),
            y_max = bounds.y().max();
            "Scales fitted to circuit"
        );
    }

    /// Converts a grid x coordinate to pixels.
    pub fn scale_x(&self, x: f32) -> f32 {
        self.x.apply(x)
    }

    /// Converts a grid y coordinate to pixels.
    pub fn scale_y(&self, y: f32) -> f32 {
        self.y.apply(y)
    }

    /// Converts a component position to its pixel center.
    pub fn scale_point(&self, point: GridPoint) -> Point {
        self.scale_hub(point.into())
    }

    /// Converts a fractional grid position, such as a net hub, to pixels.
    pub fn scale_hub(&self, point: Point) -> Point {
        Point::new(self.scale_x(point.x()), self.scale_y(point.y()))
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn extent_strategy() -> impl Strategy<Value = Extent> {
        (-100.0f32..100.0, 0.5f32..50.0).prop_map(|(min, span)| Extent::new(min, min + span))
    }

    fn range_strategy() -> impl Strategy<Value = Extent> {
        (0.0f32..2000.0, 10.0f32..2000.0, prop::bool::ANY).prop_map(|(start, span, inverted)| {
            if inverted {
                Extent::new(start + span, start)
            } else {
                Extent::new(start, start + span)
            }
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The domain ends always land on the range ends.
    fn check_domain_ends_map_to_range_ends(
        domain: Extent,
        range: Extent,
    ) -> Result<(), TestCaseError> {
        let scale = LinearScale::new(domain, range);

        prop_assert!(approx_eq!(f32, scale.apply(domain.min()), range.min(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, scale.apply(domain.max()), range.max(), epsilon = 0.01));
        Ok(())
    }

    /// Inverting an applied value returns the original value.
    fn check_apply_invert_roundtrip(
        domain: Extent,
        range: Extent,
        t: f32,
    ) -> Result<(), TestCaseError> {
        let scale = LinearScale::new(domain, range);
        let value = domain.min() + t * domain.span();

        prop_assert!(approx_eq!(
            f32,
            scale.invert(scale.apply(value)),
            value,
            epsilon = 0.01
        ));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn domain_ends_map_to_range_ends(domain in extent_strategy(), range in range_strategy()) {
            check_domain_ends_map_to_range_ends(domain, range)?;
        }

        #[test]
        fn apply_invert_roundtrip(domain in extent_strategy(), range in range_strategy(), t in 0.0f32..1.0) {
            check_apply_invert_roundtrip(domain, range, t)?;
        }
    }
}
