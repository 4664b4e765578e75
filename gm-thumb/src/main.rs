use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{Result, ensure};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod thumb;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::Cli::parse();
    run(&args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(args: &cli::Cli) -> Result<()> {
    if args.info {
        return thumb::print_info(args);
    }
    ensure!(
        args.width.is_some() || args.height.is_some(),
        "Provide --width, --height, or both (or --info to inspect the input)"
    );
    let out_path = resolve_out_path(args);
    thumb::run_resize(args, &out_path)
}

fn resolve_out_path(args: &cli::Cli) -> PathBuf {
    args.out
        .clone()
        .unwrap_or_else(|| default_out_for_input(&args.input))
}

/// `<dir>/<stem>-thumb.<ext>`, ignoring a trailing frame selector such as `[0]`.
fn default_out_for_input(input: &str) -> PathBuf {
    let input = strip_frame_selector(input);
    let input_path = Path::new(input);
    let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
    let stem = input_path
        .file_stem()
        .unwrap_or_else(|| OsStr::new("image"));
    let ext = input_path.extension().unwrap_or_else(|| OsStr::new("png"));

    let mut filename = stem.to_os_string();
    filename.push("-thumb");
    filename.push(".");
    filename.push(ext);

    let mut out = parent.to_path_buf();
    out.push(filename);
    out
}

fn strip_frame_selector(input: &str) -> &str {
    match input.strip_suffix(']').and_then(|s| s.rfind('[').map(|i| &input[..i])) {
        Some(base) if !base.is_empty() => base,
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_out_sits_next_to_input() {
        assert_eq!(
            default_out_for_input("photos/cat.jpg"),
            PathBuf::from("photos/cat-thumb.jpg")
        );
        assert_eq!(default_out_for_input("cat.png"), PathBuf::from("cat-thumb.png"));
    }

    #[test]
    fn default_out_drops_frame_selector() {
        assert_eq!(
            default_out_for_input("docs/report.pdf[0]"),
            PathBuf::from("docs/report-thumb.pdf")
        );
    }

    #[test]
    fn default_out_without_extension() {
        assert_eq!(default_out_for_input("scan"), PathBuf::from("scan-thumb.png"));
    }

    #[test]
    fn selector_only_input_is_kept() {
        assert_eq!(strip_frame_selector("[0]"), "[0]");
        assert_eq!(strip_frame_selector("a.gif[2]"), "a.gif");
        assert_eq!(strip_frame_selector("plain.jpg"), "plain.jpg");
    }
}
