// Measurements of the three data-transfer strategies, taken with `perf stat` on the
// client/server pair (see the system caption). Each variant was run for every
// combination of message field size and client thread count.

use crate::error::{ReportError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use tracing::debug;

pub const MESSAGE_SIZES: [u32; 4] = [64, 256, 1024, 4096];
pub const THREAD_COUNTS: [u32; 4] = [1, 2, 4, 8];

/// Field size used as the representative point for the latency chart.
pub const LATENCY_FIELD_SIZE: u32 = 1024;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    TwoCopy,
    OneCopy,
    ZeroCopy,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::TwoCopy, Variant::OneCopy, Variant::ZeroCopy];

    pub fn name(self) -> &'static str {
        match self {
            Variant::TwoCopy => "Two-Copy",
            Variant::OneCopy => "One-Copy",
            Variant::ZeroCopy => "Zero-Copy",
        }
    }

    /// Legend label, prefixed with the assignment part the variant was built in.
    pub fn label(self) -> &'static str {
        match self {
            Variant::TwoCopy => "A1 (Two-Copy)",
            Variant::OneCopy => "A2 (One-Copy)",
            Variant::ZeroCopy => "A3 (Zero-Copy)",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub variant: Variant,
    pub field_size: u32,
    pub threads: u32,
    pub cycles: u64,
    pub cache_misses: u64,
}

struct Table {
    variant: Variant,
    cycles: [u64; 16],
    cache_misses: [u64; 16],
}

const FIELD_SIZE: [u32; 16] = [
    64, 64, 64, 64, 256, 256, 256, 256, 1024, 1024, 1024, 1024, 4096, 4096, 4096, 4096,
];
const NUM_THREADS: [u32; 16] = [1, 2, 4, 8, 1, 2, 4, 8, 1, 2, 4, 8, 1, 2, 4, 8];

const TABLES: &[Table] = &[
    Table {
        variant: Variant::TwoCopy,
        cycles: [
            39475195, 72915496, 145423266, 239993734, 57339554, 422731044, 196384431, 559373781,
            481972275, 889358924, 1632860714, 3505906322, 21837116057, 39078594641, 66151152030,
            112375457443,
        ],
        cache_misses: [
            1106106, 1852938, 4599321, 8261668, 1766876, 14328400, 6127387, 18548918, 11534759,
            21468263, 38828402, 82573726, 451861353, 794469453, 1203171466, 1470317153,
        ],
    },
    Table {
        variant: Variant::OneCopy,
        cycles: [
            42492945, 80720228, 154138040, 287522828, 64854783, 450791965, 201773672, 435136643,
            457718323, 1237521711, 2069915834, 4762915157, 21312543835, 38604787844, 74897780705,
            104265049315,
        ],
        cache_misses: [
            1109381, 2130726, 4701976, 7935811, 1636074, 15007026, 6345088, 12662830, 10792756,
            30842059, 51231940, 119332090, 457004495, 803483378, 1390654072, 1381411280,
        ],
    },
    Table {
        variant: Variant::ZeroCopy,
        cycles: [
            47243393, 91816484, 164884933, 292013243, 164299763, 435833879, 781801562, 1724926034,
            311139173, 681113648, 1483712583, 2971613313, 20499727968, 37578446744, 75483270897,
            109139400671,
        ],
        cache_misses: [
            1324059, 2856468, 4826505, 9849433, 5840901, 15492459, 25941890, 63279628, 8606617,
            19603870, 42365662, 82880079, 658121770, 1090285843, 1883149653, 1770599067,
        ],
    },
];

fn embedded_records() -> Vec<Measurement> {
    TABLES
        .iter()
        .flat_map(|table| {
            (0..FIELD_SIZE.len()).map(move |idx| Measurement {
                variant: table.variant,
                field_size: FIELD_SIZE[idx],
                threads: NUM_THREADS[idx],
                cycles: table.cycles[idx],
                cache_misses: table.cache_misses[idx],
            })
        })
        .collect()
}

type Key = (Variant, u32, u32);

/// Immutable measurement table with a unique (variant, field size, threads) index.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Measurement>,
    index: BTreeMap<Key, usize>,
}

impl Dataset {
    /// The measurements compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::new(embedded_records())
    }

    /// Builds the index, rejecting duplicate keys and tables where a
    /// (field size, threads) pair is missing for any variant.
    pub fn new(records: Vec<Measurement>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            let key = (record.variant, record.field_size, record.threads);
            if index.insert(key, idx).is_some() {
                return Err(ReportError::DuplicateRecord {
                    variant: record.variant,
                    field_size: record.field_size,
                    threads: record.threads,
                });
            }
        }

        let combinations: BTreeSet<(u32, u32)> = records
            .iter()
            .map(|record| (record.field_size, record.threads))
            .collect();
        for &(field_size, threads) in &combinations {
            for variant in Variant::ALL {
                if !index.contains_key(&(variant, field_size, threads)) {
                    return Err(ReportError::MissingRecord {
                        variant,
                        field_size,
                        threads,
                    });
                }
            }
        }

        debug!(records = records.len(), "dataset ready");
        Ok(Self { records, index })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, variant: Variant, field_size: u32, threads: u32) -> Option<&Measurement> {
        self.index
            .get(&(variant, field_size, threads))
            .map(|&idx| &self.records[idx])
    }

    /// All records of `variant` at `field_size`, in ascending thread order.
    pub fn group(&self, variant: Variant, field_size: u32) -> impl Iterator<Item = &Measurement> {
        self.index
            .range((variant, field_size, u32::MIN)..=(variant, field_size, u32::MAX))
            .map(|(_, &idx)| &self.records[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(variant: Variant, field_size: u32, threads: u32, cycles: u64) -> Measurement {
        Measurement {
            variant,
            field_size,
            threads,
            cycles,
            cache_misses: 0,
        }
    }

    #[test]
    fn embedded_dataset_is_the_full_cross_product() {
        let dataset = Dataset::embedded().unwrap();
        assert_eq!(dataset.len(), 48);

        for variant in Variant::ALL {
            for size in MESSAGE_SIZES {
                assert_eq!(dataset.group(variant, size).count(), THREAD_COUNTS.len());
                for threads in THREAD_COUNTS {
                    assert!(dataset.get(variant, size, threads).is_some());
                }
            }
        }
    }

    #[test]
    fn empty_table_builds_an_empty_dataset() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert!(!Dataset::embedded().unwrap().is_empty());
    }

    #[test]
    fn lookup_returns_stored_values() {
        let dataset = Dataset::embedded().unwrap();

        let record = dataset.get(Variant::OneCopy, 1024, 8).unwrap();
        assert_eq!(record.cycles, 4762915157);
        assert_eq!(record.cache_misses, 119332090);

        let record = dataset.get(Variant::ZeroCopy, 64, 1).unwrap();
        assert_eq!(record.cycles, 47243393);
        assert_eq!(record.cache_misses, 1324059);
    }

    #[test]
    fn group_is_ordered_by_threads() {
        let dataset = Dataset::embedded().unwrap();
        let threads: Vec<_> = dataset
            .group(Variant::TwoCopy, 256)
            .map(|record| record.threads)
            .collect();
        assert_eq!(threads, THREAD_COUNTS);
    }

    #[test]
    fn unknown_group_is_empty() {
        let dataset = Dataset::embedded().unwrap();
        assert_eq!(dataset.group(Variant::TwoCopy, 128).count(), 0);
        assert!(dataset.get(Variant::TwoCopy, 1024, 3).is_none());
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let records = Variant::ALL
            .iter()
            .map(|&variant| record(variant, 64, 1, 10))
            .chain(std::iter::once(record(Variant::OneCopy, 64, 1, 20)))
            .collect();

        match Dataset::new(records) {
            Err(ReportError::DuplicateRecord {
                variant,
                field_size,
                threads,
            }) => {
                assert_eq!(variant, Variant::OneCopy);
                assert_eq!((field_size, threads), (64, 1));
            }
            other => panic!("expected duplicate record error, got {other:?}"),
        }
    }

    #[test]
    fn misaligned_variants_are_rejected() {
        let records = vec![
            record(Variant::TwoCopy, 64, 1, 10),
            record(Variant::OneCopy, 64, 1, 10),
            record(Variant::ZeroCopy, 64, 1, 10),
            record(Variant::TwoCopy, 64, 2, 10),
        ];

        match Dataset::new(records) {
            Err(ReportError::MissingRecord {
                variant,
                field_size,
                threads,
            }) => {
                assert_eq!(variant, Variant::OneCopy);
                assert_eq!((field_size, threads), (64, 2));
            }
            other => panic!("expected missing record error, got {other:?}"),
        }
    }

    #[test]
    fn labels_name_the_strategy() {
        assert_eq!(Variant::TwoCopy.to_string(), "Two-Copy");
        assert_eq!(Variant::ZeroCopy.label(), "A3 (Zero-Copy)");
    }
}
