//! Man page generator for flashsniff
//!
//! Writes `flashsniff.1` plus one page per subcommand
//! (`flashsniff-decode.1`, `flashsniff-list-commands.1`).
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::io;
use std::path::PathBuf;

#[path = "../cli.rs"]
#[allow(dead_code)]
mod cli;

/// Render every page as (page name, roff source)
fn render_pages() -> io::Result<Vec<(String, Vec<u8>)>> {
    let mut cmd = cli::Cli::command();
    // Fills in subcommand display names such as "flashsniff-decode"
    cmd.build();

    let mut pages = Vec::new();
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    pages.push((cmd.get_name().to_string(), buffer));

    for sub in cmd.get_subcommands() {
        let name = sub
            .get_display_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}-{}", cmd.get_name(), sub.get_name()));
        let mut buffer = Vec::new();
        clap_mangen::Man::new(sub.clone())
            .title(name.clone())
            .render(&mut buffer)?;
        pages.push((name, buffer));
    }
    Ok(pages)
}

fn main() -> io::Result<()> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    fs::create_dir_all(&output_dir)?;

    for (name, page) in render_pages()? {
        let path = output_dir.join(format!("{}.1", name));
        fs::write(&path, page)?;
        println!("Man page generated at: {}", path.display());
    }

    println!("\nTo view the man page:");
    println!("  man -l {}", output_dir.join("flashsniff.1").display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_page_per_subcommand() {
        let pages = render_pages().unwrap();
        let names: Vec<&str> = pages.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            ["flashsniff", "flashsniff-decode", "flashsniff-list-commands"]
        );

        let decode = String::from_utf8_lossy(&pages[1].1);
        assert!(decode.contains("timestamps"));
        assert!(pages.iter().all(|(_, page)| !page.is_empty()));
    }
}
