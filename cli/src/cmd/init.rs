use std::path::PathBuf;

use anyhow::ensure;
use hantei_core::{fsutil, Config};

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

pub fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let path = args.dir.join(Config::FILENAME);
    ensure!(!path.exists(), "Already exists: {:?}", path);

    fsutil::write_with_mkdir(&path, Config::example_toml())?;
    println!("Generated {}", path.to_string_lossy());
    Ok(())
}
