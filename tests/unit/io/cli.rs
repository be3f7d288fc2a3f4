//! Tests for command-line parsing and subcommand execution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use imgproc::analysis::ranking::Metric;
    use imgproc::io::cli::{Cli, Command, Scheme, output_path};
    use imgproc::io::configuration::{DEFAULT_RANKED, DEFAULT_SEED, DEFAULT_SERIGRAPH_COUNT};
    use imgproc::io::image::{load_rgb, save};
    use imgproc::morph::effect::Effect;
    use imgproc::partition::band::Orientation;
    use ndarray::Array3;
    use std::path::{Path, PathBuf};

    // Tests CLI parsing with only the required arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_divide_defaults() {
        let cli = Cli::parse_from(["imgproc", "divide", "in.png"]);

        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!(cli.should_show_progress());
        match cli.command {
            Command::Divide {
                input,
                output,
                scheme,
                effect,
                fraction,
                orientation,
                ..
            } => {
                assert_eq!(input, PathBuf::from("in.png"));
                assert!(output.is_none());
                assert_eq!(scheme, Scheme::Grid);
                assert_eq!(effect, Effect::Paint);
                assert!(fraction.is_none());
                assert_eq!(orientation, Orientation::Horizontal);
            }
            _ => panic!("expected the divide command"),
        }
    }

    // Tests list arguments, global flags and value enums
    // Verified by removing the value delimiter
    #[test]
    fn test_cli_parse_divide_bands() {
        let cli = Cli::parse_from([
            "imgproc",
            "divide",
            "in.png",
            "--scheme",
            "bands",
            "--boundaries",
            "10,4,10",
            "--orientation",
            "vertical",
            "--effect",
            "negative",
            "--quiet",
            "--seed",
            "9",
        ]);

        assert!(!cli.should_show_progress());
        assert_eq!(cli.seed, 9);
        match cli.command {
            Command::Divide {
                scheme,
                boundaries,
                orientation,
                effect,
                ..
            } => {
                assert_eq!(scheme, Scheme::Bands);
                assert_eq!(boundaries, vec![10, 4, 10]);
                assert_eq!(orientation, Orientation::Vertical);
                assert_eq!(effect, Effect::Negative);
            }
            _ => panic!("expected the divide command"),
        }
    }

    // Tests Voronoi keys default to the nearest-seed set and can keep the ranking
    // Verified by defaulting the flag to false
    #[test]
    fn test_cli_parse_voronoi_ordering() {
        let cli = Cli::parse_from(["imgproc", "divide", "in.png", "--scheme", "voronoi"]);
        assert!(matches!(
            cli.command,
            Command::Divide {
                scheme: Scheme::Voronoi,
                ordered: true,
                neighbors: 1,
                ..
            }
        ));

        let cli = Cli::parse_from([
            "imgproc",
            "divide",
            "in.png",
            "--scheme",
            "voronoi",
            "--neighbors",
            "2",
            "--ordered",
            "false",
        ]);
        assert!(matches!(
            cli.command,
            Command::Divide {
                ordered: false,
                neighbors: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_orientation() {
        assert!(Cli::try_parse_from(["imgproc", "divide", "in.png", "--orientation", "diagonal"]).is_err());
    }

    #[test]
    fn test_cli_parse_other_commands() {
        let cli = Cli::parse_from(["imgproc", "rank", "shots", "--metric", "most-entropy"]);
        assert!(matches!(
            cli.command,
            Command::Rank {
                metric: Metric::MostEntropy,
                top: DEFAULT_RANKED,
                ..
            }
        ));

        let cli = Cli::parse_from(["imgproc", "serigraph", "in.png", "--out-dir", "out"]);
        assert!(matches!(
            cli.command,
            Command::Serigraph {
                count: DEFAULT_SERIGRAPH_COUNT,
                budget: None,
                ..
            }
        ));

        let cli = Cli::parse_from(["imgproc", "hack", "in.jpg", "-e", "1:ff", "-e", "2:00aa"]);
        match cli.command {
            Command::Hack { edits, in_place, .. } => {
                assert_eq!(edits.len(), 2);
                assert_eq!(edits[1].hex, "00aa");
                assert!(!in_place);
            }
            _ => panic!("expected the hack command"),
        }

        assert!(Cli::try_parse_from(["imgproc", "hack", "in.jpg"]).is_err());
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("shots/cat.png")),
            PathBuf::from("shots/cat_divided.png")
        );
    }

    // Tests the divide command writes a same-sized grid output
    #[test]
    fn test_run_divide_grid() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cat.png");
        save(&Array3::from_elem((20, 12, 3), 100), &input).unwrap();

        let cli = Cli::parse_from([
            "imgproc",
            "--quiet",
            "divide",
            input.to_str().unwrap(),
            "--cell",
            "4",
            "--effect",
            "negative",
        ]);
        cli.run().unwrap();

        let divided = load_rgb(dir.path().join("cat_divided.png")).unwrap();
        assert_eq!(divided.dim(), (20, 12, 3));
        assert!(divided.iter().all(|&v| v == 155));
    }

    // Tests the serigraph command writes the requested number of variants
    #[test]
    fn test_run_serigraph() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("src.png");
        save(&Array3::from_elem((16, 16, 3), 30), &input).unwrap();
        let out = dir.path().join("out");

        let cli = Cli::parse_from([
            "imgproc",
            "-q",
            "serigraph",
            input.to_str().unwrap(),
            "--out-dir",
            out.to_str().unwrap(),
            "--count",
            "2",
        ]);
        cli.run().unwrap();

        let pngs = std::fs::read_dir(&out)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .is_ok_and(|e| e.path().extension().is_some_and(|x| x == "png"))
            })
            .count();
        assert_eq!(pngs, 2);
        assert!(out.join("src_summary.txt").exists());
    }

    // Tests the divide command runs an ordered multi-seed Voronoi partition
    #[test]
    fn test_run_divide_voronoi() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dot.png");
        save(&Array3::from_elem((10, 10, 3), 0), &input).unwrap();
        let output = dir.path().join("dot_out.png");

        let cli = Cli::parse_from([
            "imgproc",
            "--quiet",
            "divide",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--scheme",
            "voronoi",
            "--seeds",
            "4",
            "--neighbors",
            "2",
            "--effect",
            "negative",
        ]);
        cli.run().unwrap();

        let divided = load_rgb(&output).unwrap();
        assert!(divided.iter().all(|&v| v == 255));
    }
}
