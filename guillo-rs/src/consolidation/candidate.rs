use crate::entities::Rectangle;

/// A candidate cut line at the bottom edge of a rectangle, together with the
/// rectangles it would cut through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictCandidate {
    /// y-coordinate of the candidate line
    pub line: u32,
    /// Ids of the rectangles whose interior is crossed by the line
    pub conflicts: Vec<u64>,
    /// Σ (line - other.y) × other.w over all conflicts: the material that has to move
    pub displaced_area: u64,
}

impl ConflictCandidate {
    /// Evaluates the line at the bottom edge of `rect` against all other rectangles of the layout.
    pub fn evaluate(rect: &Rectangle, layout: &[Rectangle]) -> Self {
        let line = rect.bottom();
        let (conflicts, displaced_area) = layout
            .iter()
            .filter(|other| other.id != rect.id && other.straddles(line))
            .fold((vec![], 0), |(mut ids, area), other| {
                ids.push(other.id);
                (ids, area + (line - other.y) as u64 * other.w as u64)
            });
        Self {
            line,
            conflicts,
            displaced_area,
        }
    }

    /// A free line crosses no rectangle and can be committed as is
    pub fn is_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Less displaced area wins, on a tie the line furthest from the baseline.
    pub fn is_better_than(&self, other: &ConflictCandidate) -> bool {
        self.displaced_area < other.displaced_area
            || (self.displaced_area == other.displaced_area && self.line > other.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: u64, x: u32, y: u32, w: u32, h: u32) -> Rectangle {
        Rectangle {
            id,
            x,
            y,
            w,
            h,
            rotated: false,
        }
    }

    #[test]
    fn displaced_area_sums_over_conflicts() {
        let layout = [
            rect(0, 0, 0, 50, 40),
            rect(1, 50, 30, 50, 60),
            rect(2, 100, 10, 20, 50),
            rect(3, 120, 40, 20, 20),
        ];
        let c = ConflictCandidate::evaluate(&layout[0], &layout);
        assert_eq!(c.line, 40);
        assert_eq!(c.conflicts, vec![1, 2]);
        assert_eq!(c.displaced_area, 10 * 50 + 30 * 20);
        assert!(!c.is_free());
    }

    #[test]
    fn touching_rectangles_are_not_conflicts() {
        let layout = [rect(0, 0, 0, 10, 10), rect(1, 10, 10, 10, 10)];
        assert!(ConflictCandidate::evaluate(&layout[0], &layout).is_free());
    }

    #[test]
    fn ties_prefer_the_higher_line() {
        let low = ConflictCandidate {
            line: 10,
            conflicts: vec![1],
            displaced_area: 100,
        };
        let high = ConflictCandidate {
            line: 20,
            conflicts: vec![2],
            displaced_area: 100,
        };
        let cheap = ConflictCandidate {
            line: 5,
            conflicts: vec![3],
            displaced_area: 50,
        };
        assert!(high.is_better_than(&low));
        assert!(!low.is_better_than(&high));
        assert!(cheap.is_better_than(&high));
    }
}
