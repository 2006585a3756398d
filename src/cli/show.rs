//! Show command implementation.

use super::{CliError, load_layout};
use ricochet::Deal;
use std::path::Path;

/// Execute the show command: print a layout file, or the canonical deal
/// for `seed` with its token list.
///
/// # Errors
///
/// Returns an error if the layout cannot be loaded.
pub(crate) fn execute(seed: u64, layout: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = layout {
        let layout = load_layout(path)?;
        print!("{}", layout.draw());
        match layout.validate() {
            Ok(()) => println!("Valid layout, {} interior walls", layout.wall_count()),
            Err(e) => println!("Invalid layout: {e}"),
        }
        if let Some(moves) = layout.moves() {
            println!("Known solution: {moves} moves");
        }
        return Ok(());
    }

    let deal = Deal::canonical(seed);
    print!("{}", deal.puzzle);
    println!("Goal: {} at cell {}", deal.token, deal.puzzle.goal().target);
    println!("Tokens:");
    for site in &deal.tokens {
        let coord = deal.puzzle.board().coord(site.cell);
        println!("  {:<16} ({:>2}, {:>2})", site.token.to_string(), coord.x, coord.y);
    }
    Ok(())
}
