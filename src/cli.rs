use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"), about = "修复 Google Takeout 导出媒体文件的时间戳")]
pub struct Args {
    #[clap(help = "Takeout 导出目录")]
    pub source: Option<PathBuf>,

    #[clap(help = "修复后文件的输出目录")]
    pub destination: Option<PathBuf>,
}

impl Args {
    /// Resolve both directories, prompting on the console for any that
    /// were not given as arguments. The source must already exist; the
    /// destination is created if missing.
    pub fn resolve_directories(self) -> Result<(PathBuf, PathBuf)> {
        let source = match self.source {
            Some(path) => path,
            None => prompt("Enter the Google Takeout export directory path: ")?,
        };
        if source.as_os_str().is_empty() || !source.is_dir() {
            bail!("The specified directory does not exist.");
        }

        let destination = match self.destination {
            Some(path) => path,
            None => prompt("Enter the destination directory path: ")?,
        };
        if destination.as_os_str().is_empty() {
            bail!("The specified directory does not exist.");
        }
        if !destination.is_dir() {
            std::fs::create_dir_all(&destination)
                .with_context(|| format!("创建输出目录 {} 失败", destination.display()))?;
        }

        Ok((source, destination))
    }
}

fn prompt(message: &str) -> Result<PathBuf> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read path from stdin failed")?;

    Ok(PathBuf::from(line.trim()))
}
