//! Prints the GraphQL schema as SDL, or writes it to the path given as the
//! first argument.

use anyhow::Context;
use bank_branches::api::graphql::export_sdl;

fn main() -> anyhow::Result<()> {
    let sdl = export_sdl();

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, &sdl)
                .with_context(|| format!("failed to write schema to {path}"))?;
            eprintln!("schema exported to {path} ({} bytes)", sdl.len());
        }
        None => print!("{sdl}"),
    }

    Ok(())
}
