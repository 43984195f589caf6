//! Build helpers for the workspace.
//!
//! ```text
//! cargo xtask man [--out-dir DIR]
//! cargo xtask completions [--out-dir DIR]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for reading-time and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Cli::parse().command {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = reading_time::command();
    let name = cmd.get_name().to_string();

    write_page(out_dir, &name, cmd.clone())?;
    for sub in cmd.get_subcommands() {
        let page = format!("{name}-{}", sub.get_name());
        write_page(out_dir, &page, sub.clone().name(page.clone()))?;
    }
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn write_page(out_dir: &Path, name: &str, cmd: clap::Command) -> io::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;
    fs::write(out_dir.join(format!("{name}.1")), buffer)
}

fn generate_completions(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = reading_time::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = clap_complete::generate_to(shell, &mut cmd, "reading-time", out_dir)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
