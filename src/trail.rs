use std::collections::VecDeque;

use crate::math::Point;

/// Fixed-length history of recent positions, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Point>,
}

impl Trail {
    /// A trail of `len` copies of `origin`. `len` must be at least 1.
    pub fn new(origin: Point, len: usize) -> Self {
        let len = len.max(1);
        Self {
            points: std::iter::repeat_n(origin, len).collect(),
        }
    }

    /// Drops the oldest point and records `point` as the newest.
    pub fn record(&mut self, point: Point) {
        self.points.pop_back();
        self.points.push_front(point);
    }

    pub fn oldest(&self) -> Point {
        // Never empty: `new` seeds at least one point and `record` keeps the length.
        self.points.back().copied().unwrap_or_default()
    }

    pub fn newest(&self) -> Point {
        self.points.front().copied().unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_with_origin() {
        let trail = Trail::new(Point::new(1.0, 2.0), 3);
        assert_eq!(trail.len(), 3);
        assert!(trail.iter().all(|p| *p == Point::new(1.0, 2.0)));
    }

    #[test]
    fn record_keeps_length_and_drops_oldest() {
        let mut trail = Trail::new(Point::new(0.0, 0.0), 3);
        for i in 1..=4 {
            trail.record(Point::new(i as f32, 0.0));
            assert_eq!(trail.len(), 3);
        }
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![4.0, 3.0, 2.0]);
        assert_eq!(trail.oldest(), Point::new(2.0, 0.0));
        assert_eq!(trail.newest(), Point::new(4.0, 0.0));
    }

    #[test]
    fn zero_length_is_raised_to_one() {
        let mut trail = Trail::new(Point::new(5.0, 5.0), 0);
        assert_eq!(trail.len(), 1);
        trail.record(Point::new(6.0, 6.0));
        assert_eq!(trail.oldest(), Point::new(6.0, 6.0));
    }
}
