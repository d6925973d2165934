//! LUT info command

use super::Context;
use crate::InfoArgs;
use anyhow::{Context as _, Result};
use unilog_lut::{cube, LutRange};

pub fn run(args: InfoArgs, _ctx: &Context) -> Result<()> {
    for path in &args.input {
        let lut = cube::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
        let range = LutRange::of(&lut);

        println!("{}", path.display());
        if let Some(title) = &lut.title {
            println!("  Title:   {title}");
        }
        println!("  Size:    {0}x{0}x{0} ({1} entries)", lut.size, lut.entry_count());
        println!("  Domain:  {:?} .. {:?}", lut.domain_min, lut.domain_max);
        println!("  Range:   {range}");
    }
    Ok(())
}
