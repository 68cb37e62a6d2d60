use std::io::{Write, stdout};

use anyhow::Result;
use timegate_core::{cgi::CgiRequest, render};

fn main() -> Result<()> {
    let request = CgiRequest::from_env();
    let response = render::echo_response(&request);

    let mut out = stdout().lock();
    response.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
