//! Tests for packed keys, the in-memory store and the JSON loader

#[cfg(test)]
mod tests {
    use crate::file::IntegralFile;
    use crate::index::{idx2, idx4, idx8, idx8_len, pair_count};
    use crate::provider::{Channel, IntegralProvider, MoIntegrals};
    use itertools::iproduct;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use std::io::ErrorKind;

    const E_ALPHA: Channel = Channel::new(0, 0);
    const E_BETA: Channel = Channel::new(0, 1);
    const PROTON: Channel = Channel::new(1, 0);

    #[test]
    fn test_idx2_is_triangular() {
        assert_eq!(idx2(0, 0), 0);
        assert_eq!(idx2(1, 0), 1);
        assert_eq!(idx2(1, 1), 2);
        assert_eq!(idx2(0, 2), 3);
        assert_eq!(idx2(2, 0), idx2(0, 2));
        assert_eq!(pair_count(4), 10);
    }

    #[test]
    fn test_idx8_symmetry_and_density() {
        let n = 5;
        let mut keys = HashSet::new();
        for (i, j, k, l) in iproduct!(0..n, 0..n, 0..n, 0..n) {
            let key = idx8(i, j, k, l);
            assert_eq!(key, idx8(j, i, k, l));
            assert_eq!(key, idx8(i, j, l, k));
            assert_eq!(key, idx8(j, i, l, k));
            assert_eq!(key, idx8(k, l, i, j));
            assert_eq!(key, idx8(l, k, i, j));
            assert_eq!(key, idx8(k, l, j, i));
            assert_eq!(key, idx8(l, k, j, i));
            assert!(key < idx8_len(n));
            keys.insert(key);
        }
        // every slot of the packed block is reachable
        assert_eq!(keys.len(), idx8_len(n));
    }

    #[test]
    fn test_idx4_keeps_pairs_apart() {
        let (n_a, n_b) = (3, 4);
        let mut keys = HashSet::new();
        for (i, j, k, l) in iproduct!(0..n_a, 0..n_a, 0..n_b, 0..n_b) {
            let key = idx4(i, j, k, l, pair_count(n_b));
            assert_eq!(key, idx4(j, i, l, k, pair_count(n_b)));
            keys.insert(key);
        }
        assert_eq!(keys.len(), pair_count(n_a) * pair_count(n_b));
    }

    #[test]
    fn test_mixed_block_lookup_in_both_orders() {
        let mut integrals = MoIntegrals::new([(E_ALPHA, 2), (E_BETA, 2), (PROTON, 3)]);
        integrals.set_two_body(E_ALPHA, PROTON, (0, 1, 2, 0), 0.25);
        integrals.set_two_body(PROTON, E_BETA, (1, 1, 0, 1), -0.5);

        assert!((integrals.eri(E_ALPHA, PROTON, (1, 0, 0, 2)) - 0.25).abs() < 1e-12);
        assert!((integrals.eri(PROTON, E_ALPHA, (2, 0, 0, 1)) - 0.25).abs() < 1e-12);
        assert!((integrals.eri(E_BETA, PROTON, (1, 0, 1, 1)) + 0.5).abs() < 1e-12);
        assert_eq!(integrals.eri(E_ALPHA, PROTON, (1, 1, 2, 0)), 0.0);
        assert_eq!(integrals.eri(E_ALPHA, E_BETA, (0, 1, 0, 1)), 0.0);
    }

    #[test]
    fn test_random_same_channel_entries_share_storage() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 4;
        let mut integrals = MoIntegrals::new([(E_ALPHA, n)]);
        for _ in 0..50 {
            let (i, j, k, l) = (
                rng.gen_range(0..n),
                rng.gen_range(0..n),
                rng.gen_range(0..n),
                rng.gen_range(0..n),
            );
            let value: f64 = rng.gen_range(-1.0..1.0);
            integrals.set_two_body(E_ALPHA, E_ALPHA, (i, j, k, l), value);
            assert_eq!(integrals.eri(E_ALPHA, E_ALPHA, (l, k, j, i)), value);
            assert_eq!(integrals.eri(E_ALPHA, E_ALPHA, (j, i, k, l)), value);
        }
    }

    #[test]
    fn test_unset_block_reads_zero() {
        let integrals = MoIntegrals::new([(E_ALPHA, 2), (E_BETA, 2)]);
        assert_eq!(integrals.eri(E_ALPHA, E_BETA, (0, 0, 1, 1)), 0.0);
        assert_eq!(integrals.one_body(E_ALPHA, 0, 1), 0.0);
        assert_eq!(integrals.n_orbitals(PROTON), None);
    }

    #[test]
    fn test_one_body_is_symmetrized() {
        let mut integrals = MoIntegrals::new([(E_ALPHA, 3)]);
        integrals.set_one_body(E_ALPHA, 2, 0, 0.125);
        assert_eq!(integrals.one_body(E_ALPHA, 0, 2), 0.125);
        assert_eq!(integrals.one_body(E_ALPHA, 2, 0), 0.125);
    }

    const SMALL_FILE: &str = r#"{
        "nuclear_repulsion": 0.5,
        "channels": [
            { "particle": 0, "spin": 0, "n_orbitals": 2 },
            { "particle": 0, "spin": 1, "n_orbitals": 2 }
        ],
        "one_body": [
            { "channel": { "particle": 0, "spin": 0 }, "matrix": [[-1.0, 0.2], [0.2, -0.5]] },
            { "channel": { "particle": 0, "spin": 1 }, "matrix": [[-1.0, 0.2], [0.2, -0.5]] }
        ],
        "two_body": [
            { "a": { "particle": 0, "spin": 0 }, "b": { "particle": 0, "spin": 1 },
              "elements": [[0, 0, 1, 1, 0.3], [0, 1, 0, 1, 0.1]] }
        ]
    }"#;

    #[test]
    fn test_load_small_file() {
        let file = IntegralFile::from_json(SMALL_FILE).unwrap();
        let integrals = MoIntegrals::try_from(file).unwrap();

        assert!((integrals.nuclear_repulsion() - 0.5).abs() < 1e-12);
        assert_eq!(integrals.n_orbitals(E_BETA), Some(2));
        assert!((integrals.one_body(E_BETA, 1, 0) - 0.2).abs() < 1e-12);
        assert!((integrals.eri(E_ALPHA, E_BETA, (0, 0, 1, 1)) - 0.3).abs() < 1e-12);
        assert!((integrals.eri(E_BETA, E_ALPHA, (1, 1, 0, 0)) - 0.3).abs() < 1e-12);
        assert!((integrals.eri(E_BETA, E_ALPHA, (1, 0, 1, 0)) - 0.1).abs() < 1e-12);
        assert_eq!(integrals.eri(E_ALPHA, E_BETA, (1, 1, 0, 0)), 0.0);
    }

    #[test]
    fn test_file_survives_serialization() {
        let file = IntegralFile::from_json(SMALL_FILE).unwrap();
        let reread = IntegralFile::from_json(&file.to_json().unwrap()).unwrap();
        assert_eq!(reread.channels.len(), 2);
        assert_eq!(reread.two_body[0].elements, file.two_body[0].elements);
    }

    fn rejected(content: &str) -> bool {
        match IntegralFile::from_json(content) {
            Err(e) => e.kind() == ErrorKind::InvalidData,
            Ok(file) => MoIntegrals::try_from(file)
                .map(|_| false)
                .unwrap_or_else(|e| e.kind() == ErrorKind::InvalidData),
        }
    }

    #[test]
    fn test_loader_rejects_malformed_files() {
        assert!(rejected("{ not json"));
        // missing one-body matrix for the beta channel
        assert!(rejected(
            r#"{ "channels": [{ "particle": 0, "spin": 0, "n_orbitals": 1 },
                              { "particle": 0, "spin": 1, "n_orbitals": 1 }],
                 "one_body": [{ "channel": { "particle": 0, "spin": 0 }, "matrix": [[-1.0]] }] }"#
        ));
        // non-symmetric matrix
        assert!(rejected(
            r#"{ "channels": [{ "particle": 0, "spin": 0, "n_orbitals": 2 }],
                 "one_body": [{ "channel": { "particle": 0, "spin": 0 },
                                "matrix": [[-1.0, 0.1], [0.2, -0.5]] }] }"#
        ));
        // wrong shape
        assert!(rejected(
            r#"{ "channels": [{ "particle": 0, "spin": 0, "n_orbitals": 2 }],
                 "one_body": [{ "channel": { "particle": 0, "spin": 0 }, "matrix": [[-1.0]] }] }"#
        ));
        // orbital out of range
        assert!(rejected(
            r#"{ "channels": [{ "particle": 0, "spin": 0, "n_orbitals": 1 }],
                 "one_body": [{ "channel": { "particle": 0, "spin": 0 }, "matrix": [[-1.0]] }],
                 "two_body": [{ "a": { "particle": 0, "spin": 0 }, "b": { "particle": 0, "spin": 0 },
                                "elements": [[0, 0, 0, 1, 0.5]] }] }"#
        ));
        // undeclared channel
        assert!(rejected(
            r#"{ "channels": [{ "particle": 0, "spin": 0, "n_orbitals": 1 }],
                 "one_body": [{ "channel": { "particle": 0, "spin": 0 }, "matrix": [[-1.0]] },
                              { "channel": { "particle": 1, "spin": 0 }, "matrix": [[-1.0]] }] }"#
        ));
    }
}
