//! Tests for the determinant dump and integral loading

#[cfg(test)]
mod tests {
    use super::super::{load_integrals, write_determinant_dump};
    use crate::space_impl::DeterminantSpaceBuilder;
    use integrals::{Channel, IntegralProvider};
    use std::path::Path;

    #[test]
    fn test_dump_lists_determinants_and_index_table() {
        let mut builder = DeterminantSpaceBuilder::new(vec![2]);
        builder
            .build_from_occupations(&[vec![vec![0], vec![1]]])
            .unwrap();
        builder.add_excitations(0, 1).unwrap();
        let space = builder.build().unwrap();

        let mut buffer = Vec::new();
        write_determinant_dump(&mut buffer, &space, &["electron".to_string()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Particle 0 (electron) spin 0: 2 determinants"));
        assert!(text.contains("Particle 0 (electron) spin 1: 2 determinants"));
        assert!(text.contains(&format!("{:064b}", 0b01u64)));
        assert!(text.contains(&format!("{:064b}", 0b10u64)));
        assert!(text.contains("Det        3: [[1, 1]]"));
        assert_eq!(text.lines().filter(|l| l.contains("Det ")).count(), 4);
    }

    #[test]
    fn test_load_example_integrals() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("example/h2_sto3g.json");
        let integrals = load_integrals(&path).unwrap();
        assert_eq!(integrals.n_orbitals(Channel::new(0, 0)), Some(2));
        assert_eq!(integrals.n_orbitals(Channel::new(0, 1)), Some(2));
        assert!((integrals.one_body(Channel::new(0, 1), 0, 0) + 1.2528).abs() < 1e-10);
    }

    #[test]
    fn test_missing_integral_file_is_reported() {
        let result = load_integrals(Path::new("does/not/exist.json"));
        let message = format!("{:?}", result.unwrap_err());
        assert!(message.contains("does/not/exist.json"));
    }
}
