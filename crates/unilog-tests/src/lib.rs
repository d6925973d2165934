//! Integration tests for the unilog crates.
//!
//! End-to-end checks that cross crate boundaries: generate, write, read,
//! chain and resample tables, and compare images decoded from disk.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;
    use unilog_color::{Cat, LogSpace};
    use unilog_compare::{compare, compare_files, CompareOptions};
    use unilog_core::{BatchRunner, CancelToken, Classify, ErrorKind, Settings};
    use unilog_io::Image;
    use unilog_lut::compose::{concat_batch, plan_concat};
    use unilog_lut::generate::{all_targets, generate_batch};
    use unilog_lut::{concatenate, cube, evaluate, generate, resize, GenerateOptions, Lut3D};

    fn opts() -> GenerateOptions {
        GenerateOptions::default()
    }

    /// Every node of a generated table, looked up at its own coordinate.
    #[test]
    fn test_sampler_exact_at_nodes_of_generated_table() {
        let lut = generate(LogSpace::VLog, LogSpace::Log3G10, 17, &opts()).unwrap();
        for (b, g, r) in [(0, 0, 0), (16, 16, 16), (3, 9, 12), (16, 0, 7)] {
            let out = evaluate(&lut, lut.node_coord(r, g, b));
            assert_eq!(out.map(|v| v as f32), lut.node(r, g, b));
        }
    }

    #[test]
    fn test_generate_identity_for_every_space() {
        for space in LogSpace::ALL {
            let lut = generate(space, space, 5, &opts()).unwrap();
            let id = Lut3D::identity(5).unwrap();
            for (a, b) in lut.data.iter().zip(&id.data) {
                for c in 0..3 {
                    assert_abs_diff_eq!(a[c], b[c], epsilon = 1e-5);
                }
            }
        }
    }

    /// A -> B -> A through two generated tables lands near the start.
    #[test]
    fn test_bridge_and_back() {
        let there = generate(LogSpace::SLog3, LogSpace::CLog3, 33, &opts()).unwrap();
        let back = generate(LogSpace::CLog3, LogSpace::SLog3, 33, &opts()).unwrap();
        let round = concatenate(&there, &back, None).unwrap();
        for rgb in [[0.41_f32, 0.41, 0.41], [0.5, 0.5, 0.5], [0.45, 0.42, 0.39]] {
            let out = round.apply(rgb);
            for c in 0..3 {
                assert_abs_diff_eq!(out[c], rgb[c], epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn test_cube_roundtrip_of_generated_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bridge.cube");
        let lut = generate(LogSpace::FLog2, LogSpace::DaVinciIntermediate, 9, &opts()).unwrap();

        cube::write(&path, &lut).unwrap();
        let loaded = cube::read(&path).unwrap();
        assert_eq!(loaded, lut);
    }

    #[test]
    fn test_size_two_identity_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("id2.cube");
        std::fs::write(
            &path,
            "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n",
        )
        .unwrap();
        let lut = cube::read(&path).unwrap();
        assert_eq!(evaluate(&lut, [0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_resize_same_size_and_round_trip_bound() {
        let lut = generate(LogSpace::NLog, LogSpace::LogC3, 65, &opts()).unwrap();
        assert_eq!(resize(&lut, 65).unwrap(), lut);

        let down_up = resize(&resize(&lut, 33).unwrap(), 65).unwrap();
        assert_eq!(down_up.size, 65);
        // Resampling is lossy; only a loose bound holds.
        for (a, b) in down_up.data.iter().zip(&lut.data) {
            for c in 0..3 {
                assert!((a[c] - b[c]).abs() < 0.05);
            }
        }
    }

    #[test]
    fn test_parse_errors_map_to_kinds() {
        let dir = tempdir().unwrap();
        let cases = [
            ("nosize.cube", "0 0 0\n", ErrorKind::MalformedFile),
            ("short.cube", "LUT_3D_SIZE 2\n0 0 0\n", ErrorKind::SizeMismatch),
            ("nan.cube", "LUT_3D_SIZE 2\nnan 0 0\n", ErrorKind::NonFiniteValue),
            ("oned.cube", "LUT_1D_SIZE 2\n0 0 0\n1 1 1\n", ErrorKind::MalformedFile),
        ];
        for (name, text, kind) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, text).unwrap();
            assert_eq!(cube::read(&path).unwrap_err().kind(), kind, "{name}");
        }
        let missing = cube::read(dir.path().join("missing.cube")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_unknown_space_classifies() {
        let err = "Z-Log9".parse::<LogSpace>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownColorSpace);
        assert_eq!(ErrorKind::UnknownColorSpace.exit_code(), 2);
    }

    #[test]
    fn test_generate_batch_then_concat_directory() {
        let root = tempdir().unwrap();
        let bridges = root.path().join("bridges");
        let runner = BatchRunner::new(2);

        let requests = all_targets(LogSpace::SLog3, 5, Some(&[LogSpace::LogC4, LogSpace::VLog][..]));
        let report = generate_batch(requests, &opts(), &runner, &bridges).unwrap();
        assert_eq!(report.succeeded(), 2);

        let look = root.path().join("look.cube");
        cube::write(&look, &Lut3D::identity(9).unwrap()).unwrap();
        let out = root.path().join("chained");
        let jobs = plan_concat(&bridges, &look, &out).unwrap();
        let report = concat_batch(jobs, None, &runner).unwrap();
        assert!(report.is_success());

        let chained = cube::read(out.join("S-Log3_to_LogC4_5_PLUS_look.cube")).unwrap();
        let bridge = cube::read(bridges.join("S-Log3_to_LogC4_5.cube")).unwrap();
        let expected = concatenate(&bridge, &Lut3D::identity(9).unwrap(), None).unwrap();
        assert_eq!(chained.size, 5);
        assert_eq!(chained.data, expected.data);
        // Neutral nodes stay inside the unit cube, so the identity look is transparent.
        for i in 0..5 {
            let (a, b) = (chained.node(i, i, i), bridge.node(i, i, i));
            for c in 0..3 {
                assert_abs_diff_eq!(a[c], b[c], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_cancelled_batch_writes_nothing() {
        let root = tempdir().unwrap();
        let token = CancelToken::new();
        token.cancel();
        let runner = BatchRunner::new(2).with_cancel(token);

        let requests = all_targets(LogSpace::LLog, 3, None);
        let total = requests.len();
        let report = generate_batch(requests, &opts(), &runner, root.path()).unwrap();
        assert_eq!(report.cancelled(), total);
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_compare_images_from_disk() {
        let dir = tempdir().unwrap();
        let data: Vec<u16> = (0..32 * 32 * 3).map(|i| (i * 61 % 65536) as u16).collect();
        let img = Image::from_u16(32, 32, 3, data).unwrap();
        let png = dir.path().join("a.png");
        let tif = dir.path().join("a.tif");
        unilog_io::write(&png, &img).unwrap();
        unilog_io::write(&tif, &img).unwrap();

        let report = compare_files(&png, &tif, &CompareOptions::default()).unwrap();
        assert!(report.is_identical());
        assert_eq!(report.delta_e_max, 0.0);
        assert!(!report.jnd_exceeded);
    }

    /// A graded and an ungraded render differ visibly and measurably.
    #[test]
    fn test_compare_lut_processed_image() {
        let lut = generate(LogSpace::SLog3, LogSpace::LogC4, 17, &opts()).unwrap();
        let w = 16u32;
        let src: Vec<u8> = (0..w * w)
            .flat_map(|i| {
                let v = (i % 256) as u8;
                [v, v / 2 + 60, 255 - v]
            })
            .collect();
        let graded: Vec<u8> = src
            .chunks_exact(3)
            .flat_map(|p| {
                let out = lut.apply([p[0], p[1], p[2]].map(|v| f32::from(v) / 255.0));
                out.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            })
            .collect();

        let a = Image::from_u8(w, w, 3, src).unwrap();
        let b = Image::from_u8(w, w, 3, graded).unwrap();
        let report = compare(&a, &b, &CompareOptions::default()).unwrap();
        assert!(report.differing_pixels > 0);
        assert!(report.delta_e_mean > 0.0);
        assert!(report.delta_e_max >= report.delta_e_mean);
        assert!(report.perceptual_max >= report.perceptual_mean);
    }

    #[test]
    fn test_settings_drive_operations() {
        let settings = Settings::from_yaml_str(
            "lut_size: 9\nintermediate: S-Log3.Cine\ncat: bradford\njnd_threshold: 5.0\n",
        )
        .unwrap();

        let cat: Cat = settings.cat.parse().unwrap();
        let space: LogSpace = settings.intermediate.parse().unwrap();
        let lut = generate(
            LogSpace::FLog,
            space,
            settings.lut_size,
            &GenerateOptions { cat, ..opts() },
        )
        .unwrap();
        assert_eq!(lut.size, 9);

        let compare_opts = CompareOptions::from_settings(&settings).unwrap();
        assert_eq!(compare_opts.space, LogSpace::SLog3Cine);
        assert_eq!(compare_opts.cat, Cat::Bradford);
        assert_eq!(compare_opts.jnd_threshold, 5.0);
    }
}
