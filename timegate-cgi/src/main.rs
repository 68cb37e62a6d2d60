use std::io::{Write, stdout};

use anyhow::Result;
use timegate_core::{clock, render};

fn main() -> Result<()> {
    // One clock read per invocation; the page embeds that instant.
    let now = clock::now();
    let response = render::time_response(&now);

    let mut out = stdout().lock();
    response.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
