// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::charset::Alphabet;

pub const DEFAULT_COLS: u16 = 40;
pub const DEFAULT_ROWS: u16 = 25;
pub const DEFAULT_INITIAL_DROPS: u16 = 5;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  digirain --cols 40 --rows 25 --fps 60 --charset latin --color green --initial-drops 5";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn heading(text: &str) -> String {
    if color_enabled_stdout() {
        format!("\x1b[1;36m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}

pub fn default_params_usage_for_help() -> String {
    match DEFAULT_PARAMS_USAGE.split_once('\n') {
        Some((head, rest)) => format!("{}\n{}", heading(head), rest),
        None => DEFAULT_PARAMS_USAGE.to_string(),
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "digirain", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'x',
        long = "cols",
        default_value_t = DEFAULT_COLS,
        help_heading = "GRID",
        help = "Number of columns (min 1 max 500)"
    )]
    pub cols: u16,

    #[arg(
        short = 'y',
        long = "rows",
        default_value_t = DEFAULT_ROWS,
        help_heading = "GRID",
        help = "Number of rows (min 1 max 500)"
    )]
    pub rows: u16,

    #[arg(
        long = "initial-drops",
        default_value_t = DEFAULT_INITIAL_DROPS,
        help_heading = "GRID",
        help = "Drops started at launch (at most one per column)"
    )]
    pub initial_drops: u16,

    #[arg(
        long = "seed",
        help_heading = "GRID",
        help = "Seed the random source for a repeatable rain"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "charset",
        default_value = "latin",
        help_heading = "CHARSET",
        help = "Charset preset (see --list-charsets)"
    )]
    pub charset: String,

    #[arg(
        long = "chars",
        help_heading = "CHARSET",
        help = "Custom code point range as hex FIRST,LAST (e.g. 30,39)"
    )]
    pub chars: Option<Alphabet>,

    #[arg(
        short = 'c',
        long = "color",
        default_value = "green",
        help_heading = "APPEARANCE",
        help = "Color theme (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: auto-detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "default-background",
        help_heading = "APPEARANCE",
        help = "Keep the terminal background instead of painting it black"
    )]
    pub default_background: bool,

    #[arg(
        short = 'F',
        long = "fullscreen",
        help_heading = "APPEARANCE",
        help = "Start stretched over the whole terminal"
    )]
    pub fullscreen: bool,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 60.0,
        help_heading = "GENERAL",
        help = "Frame rate of the driver loop (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        short = 'p',
        long = "paused",
        help_heading = "GENERAL",
        help = "Start with the animation paused"
    )]
    pub paused: bool,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Append log output to this file; otherwise it is printed to stderr on exit (filter with RUST_LOG)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "list-charsets",
        help_heading = "HELP",
        help = "List available charset presets and exit"
    )]
    pub list_charsets: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color themes and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_charsets() {
    println!("{}", heading("AVAILABLE CHARSET PRESETS:"));
    println!();
    println!("VALUE        RANGE            DESCRIPTION");
    println!("latin        U+0041..U+007E   Letters and punctuation from 'A' (default)");
    println!("auto         -                latin when non-UTF, otherwise katakana");
    println!("ascii        U+0021..U+007E   Printable ASCII");
    println!("digits       U+0030..U+0039   Digits only (aliases: dec, decimal)");
    println!("binary       U+0030..U+0031   0 and 1 (aliases: bin, 01)");
    println!("katakana     U+FF66..U+FF9D   Half-width katakana");
    println!("greek        U+03B1..U+03C9   Greek lowercase");
    println!("cyrillic     U+0410..U+044F   Cyrillic");
    println!("runic        U+16A0..U+16EA   Runic");
    println!("braille      U+2801..U+28FF   Braille");
}

pub fn print_list_colors() {
    println!("{}", heading("AVAILABLE COLOR THEMES:"));
    println!();
    println!("VALUE        DESCRIPTION");
    println!("green        Green theme (default, alias: matrix)");
    println!("cyan         Cyan theme");
    println!("amber        Amber theme (aliases: gold, yellow)");
    println!("red          Red theme");
    println!("blue         Blue theme");
    println!("purple       Purple theme");
    println!("gray         Gray theme (alias: grey)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let args = Args::try_parse_from(["digirain"]).unwrap();
        assert_eq!(args.cols, DEFAULT_COLS);
        assert_eq!(args.rows, DEFAULT_ROWS);
        assert_eq!(args.initial_drops, DEFAULT_INITIAL_DROPS);
        assert_eq!(args.charset, "latin");
        assert!(args.chars.is_none());
        assert!(!args.paused && !args.fullscreen);
    }

    #[test]
    fn chars_flag_parses_hex_range() {
        let args = Args::try_parse_from(["digirain", "--chars", "30,31"]).unwrap();
        assert_eq!(args.chars, Some(Alphabet::BINARY));
        assert!(Args::try_parse_from(["digirain", "--chars", "31"]).is_err());
    }

    #[test]
    fn grid_flags_override_defaults() {
        let args = Args::try_parse_from(["digirain", "-x", "5", "-y", "10", "--seed", "3"]).unwrap();
        assert_eq!((args.cols, args.rows, args.seed), (5, 10, Some(3)));
    }
}
