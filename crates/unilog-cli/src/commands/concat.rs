//! LUT concatenation command

use super::{print_batch, Context};
use crate::ConcatArgs;
use anyhow::{bail, Result};
use tracing::trace;
use unilog_core::BatchRunner;
use unilog_lut::compose::{concat_batch, plan_concat, run_concat_job};

pub fn run(args: ConcatArgs, ctx: &Context) -> Result<()> {
    trace!(first = %args.first.display(), second = %args.second.display(), "concat::run");

    let jobs = plan_concat(&args.first, &args.second, &args.output)?;
    let batch = args.first.is_dir() || args.second.is_dir();

    if !batch {
        let Some(job) = jobs.first() else {
            bail!("nothing to concatenate");
        };
        let range = run_concat_job(job, args.size)?;
        println!("Wrote {}", job.output.display());
        println!("  Range: {range}");
        if range.is_clipped() {
            println!("  Warning: values outside [0, 1]");
        }
        return Ok(());
    }

    let workers = args.workers.unwrap_or(ctx.settings.workers);
    let runner = BatchRunner::new(workers);
    if ctx.verbose > 0 {
        println!("Concatenating {} LUTs with {} workers", jobs.len(), runner.workers());
    }
    let report = concat_batch(jobs, args.size, &runner)?;
    print_batch(&report, |range| range.to_string())
}
