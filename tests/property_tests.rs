//! Property-based tests for the selection and transfer invariants.
//!
//! Uses proptest to verify invariants across large input spaces.

use proptest::prelude::*;

// ============================================================================
// Selection Properties
// ============================================================================

mod selection_properties {
    use super::*;
    use capfill_core::{CandidateFile, SelectorConfig, select};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidates_from(sizes: &[u64]) -> Vec<CandidateFile> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, size)| CandidateFile::new(format!("/src/file_{i}"), *size))
            .collect()
    }

    proptest! {
        /// The committed total never exceeds the capacity, for any input
        /// set and any shuffle.
        #[test]
        fn selection_respects_capacity(
            sizes in prop::collection::vec(0u64..10_000, 0..64),
            capacity in 0u64..100_000,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(candidates_from(&sizes), &SelectorConfig::new(capacity), &mut rng);
            prop_assert!(selection.total_bytes <= capacity);
        }

        /// The reported total equals the sum of the member sizes.
        #[test]
        fn selection_total_matches_members(
            sizes in prop::collection::vec(1u64..10_000, 0..64),
            capacity in 0u64..100_000,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(candidates_from(&sizes), &SelectorConfig::new(capacity), &mut rng);
            let sum: u64 = selection.files.iter().map(|f| f.size).sum();
            prop_assert_eq!(selection.total_bytes, sum);
        }

        /// Every selected file is one of the candidates, and no candidate
        /// is selected twice.
        #[test]
        fn selection_is_a_subset_without_duplicates(
            sizes in prop::collection::vec(1u64..10_000, 0..64),
            capacity in 0u64..100_000,
            seed in any::<u64>(),
        ) {
            let candidates = candidates_from(&sizes);
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(candidates.clone(), &SelectorConfig::new(capacity), &mut rng);

            let mut seen = std::collections::HashSet::new();
            for file in &selection.files {
                prop_assert!(candidates.contains(file));
                prop_assert!(seen.insert(file.path.clone()), "duplicate: {:?}", file.path);
            }
        }

        /// The same seed produces the same selection.
        #[test]
        fn selection_is_deterministic_per_seed(
            sizes in prop::collection::vec(1u64..10_000, 0..64),
            capacity in 0u64..100_000,
            seed in any::<u64>(),
        ) {
            let candidates = candidates_from(&sizes);
            let mut rng_a = StdRng::seed_from_u64(seed);
            let mut rng_b = StdRng::seed_from_u64(seed);
            let config = SelectorConfig::new(capacity);

            let a = select(candidates.clone(), &config, &mut rng_a);
            let b = select(candidates, &config, &mut rng_b);
            prop_assert_eq!(a, b);
        }

        /// Zero capacity selects nothing, whatever the candidates.
        #[test]
        fn zero_capacity_selects_nothing(
            sizes in prop::collection::vec(1u64..10_000, 0..64),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(candidates_from(&sizes), &SelectorConfig::new(0), &mut rng);
            prop_assert!(selection.is_empty());
            prop_assert_eq!(selection.total_bytes, 0);
        }

        /// When every candidate fits simultaneously, all are selected:
        /// the miss limit can never trigger without a rejection.
        #[test]
        fn all_fitting_candidates_are_selected(
            sizes in prop::collection::vec(1u64..100, 0..32),
            seed in any::<u64>(),
        ) {
            let total: u64 = sizes.iter().sum();
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(candidates_from(&sizes), &SelectorConfig::new(total), &mut rng);
            prop_assert_eq!(selection.len(), sizes.len());
            prop_assert_eq!(selection.total_bytes, total);
        }
    }
}

// ============================================================================
// Destination Naming Properties
// ============================================================================

mod naming_properties {
    use super::*;
    use capfill_engine::dest_name;
    use std::path::PathBuf;

    proptest! {
        /// Names are always 10 zero-padded digits, plus the source
        /// extension when one exists.
        #[test]
        fn dest_name_shape(index in 0usize..10_000_000, stem in "[a-z]{1,12}", ext in "[a-z0-9]{1,5}") {
            let source = PathBuf::from(format!("{stem}.{ext}"));
            let name = dest_name(index, &source);
            prop_assert_eq!(&name, &format!("{index:010}.{ext}"));
            prop_assert_eq!(name.len(), 11 + ext.len());
        }

        /// Distinct indices always produce distinct names.
        #[test]
        fn dest_name_is_injective_in_index(a in 0usize..1_000_000, b in 0usize..1_000_000) {
            prop_assume!(a != b);
            let source = PathBuf::from("track.mp3");
            prop_assert_ne!(dest_name(a, &source), dest_name(b, &source));
        }

        /// Extensionless sources get a bare counter.
        #[test]
        fn dest_name_without_extension(index in 0usize..1_000_000, stem in "[a-z]{1,12}") {
            let name = dest_name(index, &PathBuf::from(stem));
            prop_assert_eq!(name, format!("{index:010}"));
        }
    }
}

// ============================================================================
// Transfer Properties
// ============================================================================

mod transfer_properties {
    use super::*;
    use capfill_core::{CandidateFile, Selection, channel};
    use capfill_engine::{TransferEngine, TransferOptions};
    use capfill_integration_tests::{file_hash, make_tree};
    use tempfile::tempdir;

    proptest! {
        // Disk-backed cases, so keep the case count modest.
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Copies are byte-identical for arbitrary file sizes, including
        /// sizes straddling the copy buffer boundary.
        #[test]
        fn copies_are_byte_identical(sizes in prop::collection::vec(0usize..400_000, 1..4)) {
            let src = tempdir().unwrap();
            let dest = tempdir().unwrap();
            let dest_root = dest.path().join("out");

            let entries: Vec<(String, usize)> = sizes
                .iter()
                .enumerate()
                .map(|(i, size)| (format!("f{i}.mp3"), *size))
                .collect();
            let entry_refs: Vec<(&str, usize)> =
                entries.iter().map(|(n, s)| (n.as_str(), *s)).collect();
            let paths = make_tree(src.path(), &entry_refs);

            let files: Vec<CandidateFile> = paths
                .iter()
                .zip(&sizes)
                .map(|(p, size)| CandidateFile::new(p.clone(), *size as u64))
                .collect();
            let total_bytes = files.iter().map(|f| f.size).sum();
            let selection = Selection { files, total_bytes };

            let (tx, rx) = channel(1024);
            let engine = TransferEngine::new(&dest_root, TransferOptions::default());
            let report = engine.run(&selection, &tx).unwrap();
            drop(tx);
            drop(rx);

            prop_assert!(report.is_clean());
            for record in &report.records {
                let copied = dest_root.join(&record.dest_name);
                prop_assert_eq!(file_hash(&record.source), file_hash(&copied));
            }
        }
    }
}
