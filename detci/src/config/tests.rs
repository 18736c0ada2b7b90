//! Tests for configuration defaults and overrides

#[cfg(test)]
mod tests {
    use super::super::{Args, Config};
    use clap::Parser;

    const MINIMAL: &str = r#"
integrals: h2.json
particles:
  - occupations: [[0], [0]]
"#;

    #[test]
    fn test_defaults_fill_missing_values() {
        let config = serde_yml::from_str::<Config>(MINIMAL)
            .unwrap()
            .with_defaults();

        assert_eq!(config.integrals, "h2.json");
        assert_eq!(config.particles.len(), 1);
        assert_eq!(config.particles[0].excitation_level, Some(2));
        assert_eq!(config.particles[0].label(0), "particle 0");
        assert_eq!(config.n_roots(), 1);
        assert_eq!(config.dense_limit(), 2000);
        assert!(!config.dump_determinants());
        assert_eq!(config.occupations(), vec![vec![vec![0], vec![0]]]);
    }

    #[test]
    fn test_file_values_are_kept() {
        let content = r#"
integrals: ints.json
particles:
  - name: electron
    occupations: [[0, 1], [0]]
    excitation_level: 1
  - name: proton
    occupations: [[0]]
ci_params:
  n_roots: 3
  dump_determinants: true
"#;
        let config = serde_yml::from_str::<Config>(content)
            .unwrap()
            .with_defaults();

        assert_eq!(config.particles[0].label(0), "electron");
        assert_eq!(config.particles[0].excitation_level, Some(1));
        assert_eq!(config.particles[1].excitation_level, Some(2));
        assert_eq!(config.n_roots(), 3);
        assert_eq!(config.dense_limit(), 2000);
        assert!(config.dump_determinants());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let mut config = serde_yml::from_str::<Config>(MINIMAL)
            .unwrap()
            .with_defaults();
        let args = Args::parse_from([
            "detci",
            "--config-file",
            "h2.yaml",
            "--excitation-level",
            "1",
            "--n-roots",
            "4",
            "--dense-limit",
            "10",
            "--dump",
        ]);
        config.apply_overrides(&args);

        assert_eq!(args.config_file, "h2.yaml");
        assert_eq!(config.particles[0].excitation_level, Some(1));
        assert_eq!(config.n_roots(), 4);
        assert_eq!(config.dense_limit(), 10);
        assert!(config.dump_determinants());
    }

    #[test]
    fn test_missing_particles_is_a_parse_error() {
        assert!(serde_yml::from_str::<Config>("integrals: h2.json\n").is_err());
    }
}
