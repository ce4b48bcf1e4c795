// Copyright (c) 2026 rezky_nightky

mod cell;
mod charset;
mod config;
mod droplet;
mod frame;
mod grid;
mod input;
mod logging;
mod palette;
mod presentation;
mod rain;
mod random;
mod terminal;
mod view;

#[cfg(test)]
#[path = "../build/sha.rs"]
mod sha;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::Event;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::charset::alphabet_from_str;
use crate::config::{
    color_enabled_stdout, default_params_usage_for_help, print_list_charsets, print_list_colors,
    Args,
};
use crate::frame::Frame;
use crate::input::{key_action, Action};
use crate::palette::{build_palette, ColorMode, ColorScheme, Palette};
use crate::presentation::{Mode, Presentation};
use crate::rain::{Rain, RainSettings};
use crate::random::SeededRandom;
use crate::terminal::{restore_terminal_best_effort, Terminal};
use crate::view::{paint_grid, paint_scene};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn default_to_ascii() -> bool {
    let lang = env::var("LANG").unwrap_or_default();
    !lang.to_ascii_uppercase().contains("UTF")
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            16 => ColorMode::Color16,
            8 | 256 => ColorMode::Color256,
            24 | 32 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,16,8/256,24/32)", m);
                std::process::exit(1);
            }
        };
    }

    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }

    ColorMode::Color16
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_charsets {
        print_list_charsets();
        return Ok(());
    }

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", env!("DIGIRAIN_BUILD"));
        let sha = env!("DIGIRAIN_GIT_SHA");
        if !sha.is_empty() {
            println!("Commit: {}", sha);
        }
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let cols = require_u16_range("--cols", args.cols, 1, 500);
    let rows = require_u16_range("--rows", args.rows, 1, 500);
    let initial_drops = require_u16_range("--initial-drops", args.initial_drops, 0, cols);
    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);
    let duration_s = match args.duration {
        Some(s) if !s.is_finite() => {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        Some(s) if s > 0.0 => Some(require_f64_range("--duration", s, 0.1, 86400.0)),
        _ => None,
    };

    let color_scheme = ColorScheme::parse(&args.color).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let alphabet = match args.chars {
        Some(a) => a,
        None => alphabet_from_str(&args.charset, default_to_ascii()).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        }),
    };

    let backlog = match logging::init(args.log_file.as_deref()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("failed to set up logging: {}", e);
            std::process::exit(1);
        }
    };

    let color_mode = detect_color_mode(&args);
    let palette = build_palette(color_scheme, color_mode, args.default_background);

    log::info!(
        "grid {}x{}, glyphs U+{:04X}..U+{:04X}, {:?} {:?}, seed {:?}",
        cols,
        rows,
        alphabet.first() as u32,
        alphabet.last() as u32,
        color_scheme,
        color_mode,
        args.seed
    );

    let settings = RainSettings {
        cols,
        rows,
        alphabet,
        initial_drops,
    };
    let mut rain = Rain::new(&settings, SeededRandom::new(args.seed));
    rain.set_enabled(!args.paused);

    let pacing = Pacing {
        period: Duration::from_secs_f64(1.0 / target_fps),
        duration: duration_s.map(Duration::from_secs_f64),
    };
    let result = run(&args, &mut rain, &palette, pacing);

    if let Some(backlog) = backlog {
        if let Err(e) = backlog.replay(&mut std::io::stderr()) {
            eprintln!("failed to write buffered log: {}", e);
        }
    }
    result
}

struct Pacing {
    period: Duration,
    duration: Option<Duration>,
}

/// Owns the terminal for the lifetime of the frame loop; it is restored
/// before this returns.
fn run(
    args: &Args,
    rain: &mut Rain<SeededRandom>,
    palette: &Palette,
    pacing: Pacing,
) -> std::io::Result<()> {
    let (cols, rows) = (rain.grid().cols(), rain.grid().rows());
    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let start_mode = if args.fullscreen {
        Mode::Fullscreen
    } else {
        Mode::Framed
    };
    let mut presentation = Presentation::new(start_mode, w, h, cols, rows);
    let mut frame = Frame::new(w, h, palette.bg);
    let mut layout_dirty = true;

    let start_time = Instant::now();
    let end_time = pacing.duration.map(|d| start_time + d);
    let mut next_frame = Instant::now();
    let mut running = true;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                let key = match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                        continue;
                    }
                    Event::Key(k) => k,
                    _ => continue,
                };
                match key_action(&key, args.screensaver) {
                    Some(Action::Quit) => {
                        running = false;
                        break;
                    }
                    Some(Action::TogglePause) => {
                        let on = rain.toggle_enabled();
                        log::debug!(
                            "animation {} with {} active drops",
                            if on { "resumed" } else { "paused" },
                            rain.drops().len()
                        );
                        layout_dirty = true;
                    }
                    Some(Action::ToggleFullscreen) => {
                        match presentation.toggle_fullscreen(term.size()) {
                            Ok(mode) => log::debug!("presentation now {:?}", mode),
                            Err(e) => log::error!("failed to toggle fullscreen: {}", e),
                        }
                        layout_dirty = true;
                    }
                    None => {}
                }
            }

            if !running || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }

            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            presentation.resize(nw, nh);
            log::debug!(
                "terminal resized to {}x{} ({:?})",
                nw,
                nh,
                presentation.mode()
            );
            frame = Frame::new(nw, nh, palette.bg);
            layout_dirty = true;
        }

        let now_ms = start_time.elapsed().as_millis() as u64;
        let report = rain.tick(now_ms);

        if layout_dirty {
            paint_scene(
                &mut frame,
                rain.grid(),
                presentation.layout(),
                palette,
                !rain.is_enabled(),
            );
            layout_dirty = false;
        } else if report.changed() {
            paint_grid(&mut frame, rain.grid(), presentation.layout(), palette);
        }

        if frame.is_dirty() {
            term.draw(&mut frame)?;
        }

        next_frame += pacing.period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    Ok(())
}
