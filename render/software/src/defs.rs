/// A closed range of screen columns, `first..=last`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRange {
    pub first: i32,
    pub last: i32,
}

impl ClipRange {
    pub const fn new(first: i32, last: i32) -> Self {
        ClipRange { first, last }
    }
}

/// Columns already covered by one-sided walls nearer the camera. Kept sorted
/// and disjoint, with a sentinel at each end so a search never runs off the
/// list.
#[derive(Debug, Clone)]
pub struct SolidSegs {
    ranges: Vec<ClipRange>,
    width: i32,
}

impl SolidSegs {
    pub fn new(width: i32) -> Self {
        let mut segs = SolidSegs {
            ranges: Vec::with_capacity(64),
            width,
        };
        segs.clear();
        segs
    }

    /// Back to a fully open screen
    pub fn clear(&mut self) {
        self.ranges.clear();
        self.ranges.push(ClipRange::new(i32::MIN, -1));
        self.ranges.push(ClipRange::new(self.width, i32::MAX));
    }

    pub fn resize(&mut self, width: i32) {
        self.width = width;
        self.clear();
    }

    /// Raw posts, sentinels included. A range touching a screen edge is
    /// merged in to that edge's sentinel.
    pub fn ranges(&self) -> &[ClipRange] {
        &self.ranges
    }

    /// The covered columns, clamped to the screen
    pub fn solid_spans(&self) -> Vec<ClipRange> {
        self.ranges
            .iter()
            .map(|r| ClipRange::new(r.first.max(0), r.last.min(self.width - 1)))
            .filter(|r| r.first <= r.last)
            .collect()
    }

    /// True once every column of the screen is covered
    pub fn is_full(&self) -> bool {
        self.ranges[0].last >= self.width - 1
    }

    /// Mark `first..=last` solid. `store` is called with each part of the
    /// range that was not already covered, left to right.
    ///
    /// Doom function name `R_ClipSolidWallSegment`
    pub fn clip_solid_seg(&mut self, first: i32, last: i32, mut store: impl FnMut(i32, i32)) {
        let mut emit = |a: i32, b: i32| {
            if a <= b {
                store(a, b);
            }
        };

        // Find the first range that touches the range
        //  (adjacent pixels are touching).
        let mut start = 0;
        while self.ranges[start].last < first - 1 {
            start += 1;
        }

        if first < self.ranges[start].first {
            if last < self.ranges[start].first - 1 {
                // Post is entirely visible (above start),
                //  so insert a new clippost.
                emit(first, last);
                self.ranges.insert(start, ClipRange::new(first, last));
                return;
            }

            // There is a fragment above *start.
            emit(first, self.ranges[start].first - 1);
            // Now adjust the clip size.
            self.ranges[start].first = first;
        }

        // Bottom contained in start?
        if last <= self.ranges[start].last {
            return;
        }

        let mut next = start;
        while last >= self.ranges[next + 1].first - 1 {
            // There is a fragment between two posts.
            emit(self.ranges[next].last + 1, self.ranges[next + 1].first - 1);
            next += 1;

            if last <= self.ranges[next].last {
                // Bottom is contained in next.
                // Adjust the clip size.
                self.ranges[start].last = self.ranges[next].last;
                self.crunch(start, next);
                return;
            }
        }

        // There is a fragment after *next.
        emit(self.ranges[next].last + 1, last);
        // Adjust the clip size.
        self.ranges[start].last = last;
        self.crunch(start, next);
    }

    /// Remove the posts between start and next now that start covers them
    fn crunch(&mut self, start: usize, next: usize) {
        if next > start {
            self.ranges.drain(start + 1..=next);
        }
    }
}

/// Counts from the last rendered frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub nodes: usize,
    pub subsectors: usize,
    pub segs: usize,
    /// Uncovered wall pieces passed to the wall drawer
    pub fragments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(segs: &mut SolidSegs, first: i32, last: i32) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        segs.clip_solid_seg(first, last, |a, b| out.push((a, b)));
        out
    }

    #[test]
    fn overlapping_insert_emits_the_gap() {
        let mut segs = SolidSegs::new(480);
        assert_eq!(insert(&mut segs, 0, 10), vec![(0, 10)]);
        assert_eq!(insert(&mut segs, 20, 30), vec![(20, 30)]);
        assert_eq!(insert(&mut segs, 5, 25), vec![(11, 19)]);
        assert_eq!(segs.solid_spans(), vec![ClipRange::new(0, 30)]);
    }

    #[test]
    fn covered_range_emits_nothing() {
        let mut segs = SolidSegs::new(480);
        insert(&mut segs, 100, 200);
        assert!(insert(&mut segs, 120, 180).is_empty());
        assert!(insert(&mut segs, 100, 200).is_empty());
        assert_eq!(segs.solid_spans(), vec![ClipRange::new(100, 200)]);
    }

    #[test]
    fn disjoint_inserts_stay_sorted() {
        let mut segs = SolidSegs::new(480);
        insert(&mut segs, 300, 310);
        insert(&mut segs, 10, 20);
        insert(&mut segs, 100, 110);
        assert_eq!(
            segs.solid_spans(),
            vec![ClipRange::new(10, 20), ClipRange::new(100, 110), ClipRange::new(300, 310)]
        );
    }

    #[test]
    fn adjacent_ranges_merge() {
        let mut segs = SolidSegs::new(480);
        insert(&mut segs, 0, 10);
        assert_eq!(insert(&mut segs, 11, 20), vec![(11, 20)]);
        assert_eq!(segs.solid_spans(), vec![ClipRange::new(0, 20)]);
    }

    #[test]
    fn extends_backwards_and_spans_several() {
        let mut segs = SolidSegs::new(480);
        insert(&mut segs, 10, 20);
        insert(&mut segs, 30, 40);
        insert(&mut segs, 50, 60);
        let out = insert(&mut segs, 5, 70);
        assert_eq!(out, vec![(5, 9), (21, 29), (41, 49), (61, 70)]);
        assert_eq!(segs.solid_spans(), vec![ClipRange::new(5, 70)]);
    }

    #[test]
    fn full_screen() {
        let mut segs = SolidSegs::new(480);
        assert!(!segs.is_full());
        insert(&mut segs, 0, 240);
        assert!(!segs.is_full());
        assert_eq!(insert(&mut segs, 200, 479), vec![(241, 479)]);
        assert!(segs.is_full());
        assert_eq!(segs.ranges().len(), 1);
        assert!(insert(&mut segs, 0, 479).is_empty());
        segs.clear();
        assert_eq!(segs.ranges().len(), 2);
    }
}
