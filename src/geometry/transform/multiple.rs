// multiple.rs -- Ordered chain of 2-D transforms.

use super::{Transform, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::Point;

/// Applies its transforms in insertion order (Direct) or in reverse
/// order, each inverted (Inverse).
#[derive(Debug, Default)]
pub struct TransformMultiple {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformMultiple {
    pub fn new() -> Self {
        TransformMultiple::default()
    }

    pub fn push(&mut self, t: Box<dyn Transform>) {
        self.transforms.push(t);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn clear(&mut self) {
        self.transforms.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Transform> {
        self.transforms.iter().map(|t| t.as_ref())
    }
}

impl From<Vec<Box<dyn Transform>>> for TransformMultiple {
    fn from(transforms: Vec<Box<dyn Transform>>) -> Self {
        TransformMultiple { transforms }
    }
}

impl Transform for TransformMultiple {
    fn kind(&self) -> TransformKind {
        TransformKind::Multiple
    }

    fn min_points(&self) -> usize {
        self.transforms.iter().map(|t| t.min_points()).max().unwrap_or(0)
    }

    fn compute(&mut self, _src: &[Point], _dst: &[Point]) -> Result<f64> {
        Err(Error::invalid("a transform chain cannot be computed from points"))
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        match order {
            TransformOrder::Direct => self.transforms.iter().try_fold(*pt, |p, t| t.transform(&p, order)),
            TransformOrder::Inverse => self.transforms.iter().rev().try_fold(*pt, |p, t| t.transform(&p, order)),
        }
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        let inverted = self
            .transforms
            .iter()
            .rev()
            .map(|t| t.inverse())
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(TransformMultiple::from(inverted)))
    }

    fn is_valid(&self) -> bool {
        self.transforms.iter().all(|t| t.is_valid())
    }
}
