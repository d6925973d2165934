//! LUT concatenation.
//!
//! [`concatenate`] bakes two tables into one: every node of the output
//! grid holds `second(first(coordinate))`. Inputs may have different
//! sizes and domains; the output takes the first table's domain.
//!
//! The rest of the module resolves the file and directory forms of a
//! concatenation into [`ConcatJob`]s and runs them.

use crate::{cube, sampler, Lut3D, LutError, LutRange, LutResult};
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};
use unilog_core::{list_files, BatchReport, BatchRunner, CoreError};

/// Concatenates two tables: `first` is applied, then `second`.
///
/// The output grid has `output_size` nodes per axis (default: the size of
/// `first`) over the domain of `first`.
pub fn concatenate(first: &Lut3D, second: &Lut3D, output_size: Option<usize>) -> LutResult<Lut3D> {
    if first.is_empty() || second.is_empty() {
        return Err(LutError::EmptyTable);
    }
    first.validate()?;
    second.validate()?;
    let size = output_size.unwrap_or(first.size);
    trace!(first = first.size, second = second.size, size, "concatenate");

    Lut3D::from_fn(size, first.domain_min, first.domain_max, |c| {
        sampler::evaluate(second, sampler::evaluate(first, c))
    })
}

/// Name of a concatenation result: `{stem1}_PLUS_{stem2}`.
pub fn concat_name(first: &Path, second: &Path) -> String {
    format!("{}_PLUS_{}", stem(first), stem(second))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One concrete concatenation: two input files and an output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatJob {
    /// Applied first.
    pub first: PathBuf,
    /// Applied second.
    pub second: PathBuf,
    /// Where the result is written.
    pub output: PathBuf,
}

/// Resolves file or directory inputs into jobs.
///
/// - file + file: one job; an `output` ending in `.cube` is the output
///   file, anything else is a directory that receives
///   `{stem1}_PLUS_{stem2}.cube`
/// - dir + file: every `.cube` in the directory, then the file
/// - file + dir: the file, then every `.cube` in the directory
/// - dir + dir: rejected
///
/// Directory forms write into `output`, which must be a directory (it is
/// created if missing).
pub fn plan_concat(input1: &Path, input2: &Path, output: &Path) -> LutResult<Vec<ConcatJob>> {
    for input in [input1, input2] {
        if !input.exists() {
            return Err(CoreError::FileNotFound(input.to_path_buf()).into());
        }
    }

    let job_in = |dir: &Path, first: &Path, second: &Path| ConcatJob {
        first: first.to_path_buf(),
        second: second.to_path_buf(),
        output: dir.join(format!("{}.{}", concat_name(first, second), cube::EXTENSION)),
    };

    match (input1.is_dir(), input2.is_dir()) {
        (false, false) => {
            let output = if is_cube_file(output) {
                output.to_path_buf()
            } else {
                job_in(output, input1, input2).output
            };
            Ok(vec![ConcatJob {
                first: input1.to_path_buf(),
                second: input2.to_path_buf(),
                output,
            }])
        }
        (true, true) => Err(LutError::InvalidInput(
            "cannot concatenate two directories; one input must be a file".into(),
        )),
        (dir_first, _) => {
            let (dir, file) = if dir_first { (input1, input2) } else { (input2, input1) };
            let luts = list_files(dir, &[cube::EXTENSION])?;
            if luts.is_empty() {
                return Err(LutError::InvalidInput(format!(
                    "no .{} files in {}",
                    cube::EXTENSION,
                    dir.display()
                )));
            }
            if output.exists() && !output.is_dir() {
                return Err(LutError::InvalidInput(format!(
                    "output must be a directory in batch mode: {}",
                    output.display()
                )));
            }
            std::fs::create_dir_all(output)?;

            Ok(luts
                .iter()
                .map(|lut| {
                    if dir_first {
                        job_in(output, lut.as_path(), file)
                    } else {
                        job_in(output, file, lut.as_path())
                    }
                })
                .collect())
        }
    }
}

fn is_cube_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(cube::EXTENSION))
}

/// Reads both inputs, concatenates, and writes the result.
///
/// The result is titled after its inputs and missing parent directories
/// of the output are created. Returns the value range of the
/// written table; values outside `[0, 1]` are logged as a warning.
pub fn run_concat_job(job: &ConcatJob, output_size: Option<usize>) -> LutResult<LutRange> {
    let first = cube::read(&job.first)?;
    let second = cube::read(&job.second)?;
    let lut = concatenate(&first, &second, output_size)?
        .with_title(concat_name(&job.first, &job.second));

    let range = LutRange::of(&lut);
    if range.is_clipped() {
        warn!(output = %job.output.display(), %range, "concatenated LUT leaves [0, 1]");
    }
    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    cube::write(&job.output, &lut)?;
    info!(output = %job.output.display(), size = lut.size, "wrote concatenated LUT");
    Ok(range)
}

/// Runs every job on the batch runner.
pub fn concat_batch(
    jobs: Vec<ConcatJob>,
    output_size: Option<usize>,
    runner: &BatchRunner,
) -> LutResult<BatchReport<LutRange>> {
    let units = jobs
        .into_iter()
        .map(|job| {
            let label = job
                .output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (label, job)
        })
        .collect();
    Ok(runner.run(units, |job: ConcatJob| run_concat_job(&job, output_size))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use unilog_core::{Classify, ErrorKind};

    fn warm() -> Lut3D {
        Lut3D::from_fn(9, [0.0; 3], [1.0; 3], |c| {
            [(c[0] * 1.1).min(1.0), c[1], c[2] * 0.9]
        })
        .unwrap()
    }

    #[test]
    fn identity_second_preserves_first() {
        let t = warm();
        let id = Lut3D::identity(17).unwrap();
        let out = concatenate(&t, &id, None).unwrap();
        assert_eq!(out.size, t.size);
        for (a, b) in out.data.iter().zip(&t.data) {
            for c in 0..3 {
                assert_abs_diff_eq!(a[c], b[c], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn constant_first_gives_second_at_that_color() {
        let red = Lut3D::from_fn(5, [0.0; 3], [1.0; 3], |_| [1.0, 0.0, 0.0]).unwrap();
        let s = warm();
        let expected = s.apply([1.0, 0.0, 0.0]);
        let out = concatenate(&red, &s, Some(3)).unwrap();
        assert_eq!(out.size, 3);
        assert!(out.data.iter().all(|v| *v == expected));
    }

    #[test]
    fn output_takes_first_domain() {
        let wide = Lut3D::identity(5).unwrap().with_domain([-1.0; 3], [2.0; 3]);
        let out = concatenate(&wide, &Lut3D::identity(3).unwrap(), Some(4)).unwrap();
        assert_eq!(out.domain_min, [-1.0; 3]);
        assert_eq!(out.domain_max, [2.0; 3]);
    }

    #[test]
    fn empty_input_rejected() {
        let empty = Lut3D {
            data: Vec::new(),
            size: 0,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            title: None,
        };
        let err = concatenate(&empty, &warm(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyTable);
        assert!(concatenate(&warm(), &empty, None).is_err());
    }

    #[test]
    fn broken_tables_rejected() {
        let short = Lut3D {
            data: vec![[0.5; 3]; 5],
            size: 2,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            title: None,
        };
        let id = Lut3D::identity(2).unwrap();
        let err = concatenate(&short, &id, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
        let err = concatenate(&id, &short, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);

        let tiny = Lut3D {
            data: vec![[0.5; 3]],
            size: 1,
            ..short
        };
        assert!(matches!(concatenate(&tiny, &id, None), Err(LutError::InvalidSize(1))));
    }

    #[test]
    fn name_joins_stems() {
        assert_eq!(
            concat_name(Path::new("a/S-Log3_to_LogC4_65.cube"), Path::new("look.cube")),
            "S-Log3_to_LogC4_65_PLUS_look"
        );
    }

    fn write_lut(path: &Path) {
        cube::write(path, &Lut3D::identity(2).unwrap()).unwrap();
    }

    #[test]
    fn plan_file_file() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a.cube"), dir.path().join("b.cube"));
        write_lut(&a);
        write_lut(&b);

        let jobs = plan_concat(&a, &b, &dir.path().join("out.cube")).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output, dir.path().join("out.cube"));

        let jobs = plan_concat(&a, &b, dir.path()).unwrap();
        assert_eq!(jobs[0].output, dir.path().join("a_PLUS_b.cube"));

        let jobs = plan_concat(&a, &b, &dir.path().join("results")).unwrap();
        assert_eq!(jobs[0].output, dir.path().join("results").join("a_PLUS_b.cube"));

        let jobs = plan_concat(&a, &b, &dir.path().join("Out.CUBE")).unwrap();
        assert_eq!(jobs[0].output, dir.path().join("Out.CUBE"));
    }

    #[test]
    fn job_creates_missing_output_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a.cube"), dir.path().join("b.cube"));
        write_lut(&a);
        write_lut(&b);

        let nested = dir.path().join("sub").join("x.cube");
        let jobs = plan_concat(&a, &b, &nested).unwrap();
        run_concat_job(&jobs[0], None).unwrap();
        assert!(nested.is_file());

        let jobs = plan_concat(&a, &b, &dir.path().join("results")).unwrap();
        run_concat_job(&jobs[0], None).unwrap();
        let lut = cube::read(dir.path().join("results").join("a_PLUS_b.cube")).unwrap();
        assert_eq!(lut.title.as_deref(), Some("a_PLUS_b"));
    }

    #[test]
    fn plan_dir_file_orders_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let luts = dir.path().join("luts");
        std::fs::create_dir(&luts).unwrap();
        write_lut(&luts.join("x.cube"));
        write_lut(&luts.join("y.cube"));
        std::fs::write(luts.join("readme.txt"), "").unwrap();
        let look = dir.path().join("look.cube");
        write_lut(&look);
        let out = dir.path().join("out");

        let jobs = plan_concat(&luts, &look, &out).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].first, luts.join("x.cube"));
        assert_eq!(jobs[0].second, look);
        assert_eq!(jobs[1].output, out.join("y_PLUS_look.cube"));
        assert!(out.is_dir());

        let jobs = plan_concat(&look, &luts, &out).unwrap();
        assert_eq!(jobs[0].first, look);
        assert_eq!(jobs[0].output, out.join("look_PLUS_x.cube"));
    }

    #[test]
    fn plan_rejects_bad_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = dir.path().join("d2");
        std::fs::create_dir(&d1).unwrap();
        std::fs::create_dir(&d2).unwrap();
        let f = dir.path().join("f.cube");
        write_lut(&f);

        assert!(matches!(plan_concat(&d1, &d2, dir.path()), Err(LutError::InvalidInput(_))));
        assert!(matches!(plan_concat(&d1, &f, dir.path()), Err(LutError::InvalidInput(_))));

        write_lut(&d1.join("a.cube"));
        assert!(matches!(plan_concat(&d1, &f, &f), Err(LutError::InvalidInput(_))));

        let err = plan_concat(&dir.path().join("missing.cube"), &f, dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn batch_runs_every_job() {
        let dir = tempfile::tempdir().unwrap();
        let luts = dir.path().join("luts");
        std::fs::create_dir(&luts).unwrap();
        for name in ["p.cube", "q.cube", "r.cube"] {
            write_lut(&luts.join(name));
        }
        std::fs::write(luts.join("r.cube"), "not a lut").unwrap();
        let look = dir.path().join("look.cube");
        cube::write(&look, &warm()).unwrap();
        let out = dir.path().join("out");

        let jobs = plan_concat(&luts, &look, &out).unwrap();
        let report = concat_batch(jobs, Some(5), &BatchRunner::new(2)).unwrap();
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);

        let lut = cube::read(out.join("p_PLUS_look.cube")).unwrap();
        assert_eq!(lut.size, 5);
        assert_eq!(lut.title.as_deref(), Some("p_PLUS_look"));
        assert!(!out.join("r_PLUS_look.cube").exists());
    }
}
