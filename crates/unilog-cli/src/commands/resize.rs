//! LUT resize command

use super::Context;
use crate::ResizeArgs;
use anyhow::{Context as _, Result};
use unilog_lut::resize::default_resize_path;
use unilog_lut::{cube, resize};

pub fn run(args: ResizeArgs, ctx: &Context) -> Result<()> {
    let lut = cube::read(&args.input)
        .with_context(|| format!("Failed to load: {}", args.input.display()))?;
    let out = resize(&lut, args.size)?;
    let output = args
        .output
        .unwrap_or_else(|| default_resize_path(&args.input, args.size));
    cube::write(&output, &out).with_context(|| format!("Failed to write: {}", output.display()))?;

    if ctx.verbose > 0 {
        println!("Resized {} -> {}", lut.size, out.size);
    }
    println!("Wrote {}", output.display());
    Ok(())
}
