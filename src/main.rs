use anyhow::Result;

use pkgindex::cli;

fn main() -> Result<()> {
    cli::run()
}
