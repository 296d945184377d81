//! Per-pixel bucket statistics for the neighborhood scan.

/// How the dominant bucket is chosen when several buckets share the highest
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The bucket reached first while scanning the window top-to-bottom,
    /// left-to-right.
    #[default]
    FirstSeen,
    /// The bucket with the smallest index, i.e. the darkest one.
    LowestBucket,
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    count: u32,
    sum: [u64; 3],
}

/// Fixed-size table indexed by bucket, plus the order in which buckets were
/// first touched. Clearing only resets touched entries, so one accumulator is
/// reused for every pixel of a row.
#[derive(Debug, Clone)]
pub struct BucketAccumulator {
    buckets: Vec<Bucket>,
    touched: Vec<u16>,
}

impl BucketAccumulator {
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Bucket::default(); bucket_count],
            touched: Vec::with_capacity(bucket_count.min(256)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    #[inline]
    pub fn add(&mut self, bucket: u16, color: [u8; 3]) {
        let entry = &mut self.buckets[bucket as usize];
        if entry.count == 0 {
            self.touched.push(bucket);
        }

        entry.count += 1;
        entry.sum[0] += color[0] as u64;
        entry.sum[1] += color[1] as u64;
        entry.sum[2] += color[2] as u64;
    }

    pub fn clear(&mut self) {
        for &bucket in &self.touched {
            self.buckets[bucket as usize] = Bucket::default();
        }
        self.touched.clear();
    }

    /// Averaged color of the most populated bucket, channels truncated toward
    /// zero. `None` when nothing was added.
    pub fn dominant(&self, tie_break: TieBreak) -> Option<[u8; 3]> {
        let mut best: Option<(u16, &Bucket)> = None;

        for &index in &self.touched {
            let candidate = &self.buckets[index as usize];
            let wins = match best {
                None => true,
                Some((best_index, best_bucket)) => match tie_break {
                    TieBreak::FirstSeen => candidate.count > best_bucket.count,
                    TieBreak::LowestBucket => {
                        candidate.count > best_bucket.count
                            || (candidate.count == best_bucket.count && index < best_index)
                    }
                },
            };

            if wins {
                best = Some((index, candidate));
            }
        }

        best.map(|(_, bucket)| {
            let count = bucket.count as u64;
            [
                (bucket.sum[0] / count) as u8,
                (bucket.sum[1] / count) as u8,
                (bucket.sum[2] / count) as u8,
            ]
        })
    }
}
