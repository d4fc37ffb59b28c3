use crate::interface::{IndexRange, Point};

/// Fixed set of per-ring point containers, sized once per ring model.
#[derive(Debug, Clone)]
pub struct RingBuckets {
    buckets: Vec<Vec<Point>>,
}

impl RingBuckets {
    pub fn with_rings(ring_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); ring_count],
        }
    }

    pub fn ring_count(&self) -> usize {
        self.buckets.len()
    }

    /// Appends a point to `ring`. The caller guarantees `ring < ring_count()`.
    pub fn push(&mut self, ring: usize, point: Point) {
        self.buckets[ring].push(point);
    }

    pub fn ring(&self, ring: usize) -> &[Point] {
        &self.buckets[ring]
    }

    pub fn total_points(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Empties every bucket, keeping allocations for the next sweep.
    pub fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Concatenates the buckets in ascending ring order and records the
    /// inclusive index range each ring occupies.
    pub fn assemble(&self) -> (Vec<Point>, Vec<IndexRange>) {
        let mut cloud = Vec::with_capacity(self.total_points());
        let mut scan_indices = Vec::with_capacity(self.buckets.len());

        for bucket in &self.buckets {
            let start = cloud.len() as isize;
            cloud.extend_from_slice(bucket);
            scan_indices.push(IndexRange::new(start, start + bucket.len() as isize - 1));
        }

        (cloud, scan_indices)
    }
}
