//! Bridge LUT generation command

use super::{print_batch, Context};
use crate::GenerateArgs;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::{info, trace};
use unilog_color::{Cat, ColorError, LogSpace};
use unilog_core::BatchRunner;
use unilog_lut::generate::{all_targets, default_file_name, generate_batch};
use unilog_lut::{cube, generate, GenerateOptions, LutRange};

pub fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    if args.list {
        for space in LogSpace::ALL {
            println!("  {:<22} {}", space.name(), space.full_name());
        }
        return Ok(());
    }

    let settings = &ctx.settings;
    let source: LogSpace = args
        .source
        .as_deref()
        .context("--source is required")?
        .parse()?;
    let size = args.size.unwrap_or(settings.lut_size);
    let cat: Cat = args
        .cat
        .as_deref()
        .unwrap_or(&settings.cat)
        .parse()
        .map_err(ColorError::from)?;
    let opts = GenerateOptions {
        cat,
        clip: args.clip,
        domain_min: settings.domain_min,
        domain_max: settings.domain_max,
    };
    trace!(%source, size, %cat, batch = args.batch, "generate::run");

    if args.batch {
        let targets = args
            .targets
            .iter()
            .map(|t| t.parse::<LogSpace>())
            .collect::<Result<Vec<_>, _>>()?;
        let filter = (!targets.is_empty()).then_some(targets.as_slice());
        let requests = all_targets(source, size, filter);
        info!(count = requests.len(), dir = %args.output_dir.display(), "generating batch");

        let runner = BatchRunner::new(settings.workers);
        let report = generate_batch(requests, &opts, &runner, &args.output_dir)?;
        return print_batch(&report, |path| path.display().to_string());
    }

    let target: LogSpace = args
        .target
        .as_deref()
        .context("--target is required (or use --batch)")?
        .parse()?;
    let lut = generate(source, target, size, &opts)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_file_name(source, target, size)));
    cube::write(&output, &lut).with_context(|| format!("Failed to write: {}", output.display()))?;

    println!("Wrote {} ({}^3)", output.display(), size);
    if ctx.verbose > 0 {
        println!("  Range: {}", LutRange::of(&lut));
    }
    Ok(())
}
