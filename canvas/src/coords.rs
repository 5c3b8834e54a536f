use nalgebra as na;
use std::fmt::Debug;

pub type V2<T> = na::Vector2<T>;

pub fn v2<T: 'static + Copy + PartialEq + Debug>(x: T, y: T) -> na::Vector2<T> {
    na::Vector2::new(x, y)
}

/// Smallest axis-aligned box containing a set of positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: V2<f64>,
    pub max: V2<f64>,
}

impl BoundingBox {
    pub fn containing<'a, I>(points: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a V2<f64>>,
    {
        let mut out: Option<BoundingBox> = None;
        for point in points {
            out = Some(match out {
                Some(bounds) => BoundingBox {
                    min: v2(bounds.min.x.min(point.x), bounds.min.y.min(point.y)),
                    max: v2(bounds.max.x.max(point.x), bounds.max.y.max(point.y)),
                },
                None => BoundingBox {
                    min: *point,
                    max: *point,
                },
            });
        }
        out
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn containing_no_points_is_none() {
        let points: [V2<f64>; 0] = [];
        assert_eq!(BoundingBox::containing(&points), None);
    }

    #[test]
    fn containing_single_point_is_degenerate() {
        let bounds = BoundingBox::containing(&[v2(1.0, 2.0)]).unwrap();
        assert!(bounds.is_point());
    }

    #[test]
    fn containing_repeated_point_is_degenerate() {
        let bounds = BoundingBox::containing(&[v2(1.0, 2.0), v2(1.0, 2.0)]).unwrap();
        assert!(bounds.is_point());
    }

    #[test]
    fn containing_spans_all_points() {
        let points = [v2(1.0, 8.0), v2(-3.0, 2.0), v2(5.0, 4.0)];
        let bounds = BoundingBox::containing(&points).unwrap();
        assert_eq!(bounds.min, v2(-3.0, 2.0));
        assert_eq!(bounds.max, v2(5.0, 8.0));
        assert!(!bounds.is_point());
    }
}
