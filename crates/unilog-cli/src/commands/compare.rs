//! Image comparison command

use super::{print_batch, Context};
use crate::CompareArgs;
use anyhow::{bail, Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::trace;
use unilog_compare::{compare, compare_dirs, heatmap_name, write_heatmap, CompareOptions};
use unilog_core::BatchRunner;

pub fn run(args: CompareArgs, ctx: &Context) -> Result<()> {
    let settings = &ctx.settings;
    let mut opts = CompareOptions::from_settings(settings)?;
    if let Some(space) = &args.space {
        opts.space = space.parse()?;
    }
    if let Some(jnd) = args.jnd {
        opts.jnd_threshold = jnd;
    }
    if let Some(amplify) = args.amplify {
        opts.amplify = amplify;
    }
    trace!(a = %args.a.display(), b = %args.b.display(), space = %opts.space, "compare::run");

    match (args.a.is_dir(), args.b.is_dir()) {
        (false, false) => compare_pair(&args, &opts),
        (true, true) => compare_directories(&args, &opts, ctx),
        _ => bail!("compare needs two files or two directories"),
    }
}

fn compare_pair(args: &CompareArgs, opts: &CompareOptions) -> Result<()> {
    let img_a = unilog_io::read(&args.a)
        .with_context(|| format!("Failed to load: {}", args.a.display()))?;
    let img_b = unilog_io::read(&args.b)
        .with_context(|| format!("Failed to load: {}", args.b.display()))?;

    let report = compare(&img_a, &img_b, opts)?;
    println!("Comparing {} vs {} (as {})", args.a.display(), args.b.display(), opts.space);
    println!("{report}");

    if args.visualize {
        let output = args.output.clone().unwrap_or_else(|| {
            let name = args.a.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            PathBuf::from(heatmap_name(&name))
        });
        write_heatmap(&output, &img_a, &img_b, opts.amplify)?;
        println!("Heatmap saved to {}", output.display());
    }
    Ok(())
}

fn compare_directories(args: &CompareArgs, opts: &CompareOptions, ctx: &Context) -> Result<()> {
    let mut settings = ctx.settings.clone();
    if let Some(w) = args.workers {
        settings.workers = w;
    }
    let runner = BatchRunner::new(settings.compare_workers());

    let heatmap_dir = args
        .visualize
        .then(|| args.output.clone().unwrap_or_else(|| Path::new("diff").to_path_buf()));
    let result = compare_dirs(&args.a, &args.b, opts, &runner, heatmap_dir.as_deref())?;

    for name in &result.only_in_a {
        println!("  only in {}: {}", args.a.display(), name);
    }
    for name in &result.only_in_b {
        println!("  only in {}: {}", args.b.display(), name);
    }
    if ctx.verbose > 0 {
        for (name, report) in result.report.values() {
            println!("{name}\n{report}");
        }
    }
    print_batch(&result.report, |r| {
        format!(
            "perceptual max {:.2}, JND pixels {}, dE max {:.3}",
            r.perceptual_max, r.jnd_pixels, r.delta_e_max
        )
    })
}
