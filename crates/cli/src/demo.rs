//! Interactive demo loop.
//!
//! Drives one [`StepProgressBar`] from the keyboard: arrow keys move the
//! active step, `+`/`-` grow and shrink the step list (all the way down to
//! empty), and `r` rebuilds the current list from scratch.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use serde::Deserialize;
use tracing::{debug, warn};

use stepline_tui::{
    PREFERRED_HEIGHT, ProgressBarConfig, RawStep, RenderSurface, StepDescriptor, StepProgressBar,
    StyleSheet, TerminalSurface, glyphs,
};

use crate::Cli;

/// Optional stylesheet section listing the demo's step catalog.
#[derive(Debug, Deserialize)]
struct DemoSection {
    steps: Vec<RawStep>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let styles = load_styles(cli.style.as_deref());
    let config = ProgressBarConfig::from_styles(&styles)?;
    let catalog = step_catalog(&styles);

    let mut bar = StepProgressBar::new(config, TerminalSurface::new());
    bar.initialize(&build_steps(&catalog, cli.steps));

    let tick = Duration::from_millis(cli.tick_ms.max(1));
    let mut terminal = setup_terminal()?;
    let mut needs_draw = true;

    loop {
        if needs_draw || bar.surface().needs_repaint() {
            terminal.draw(|frame| draw(frame, &mut bar))?;
            needs_draw = false;
        }

        if !event::poll(tick)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Right => {
                    let next = bar.active_step().map_or(0, |top| top + 1);
                    if next < bar.len() {
                        bar.set_active_step(next);
                        needs_draw = true;
                    }
                }
                KeyCode::Left => {
                    if let Some(top) = bar.active_step() {
                        bar.set_step_active(top, false);
                        needs_draw = true;
                    }
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    let count = bar.len() + 1;
                    rebuild(&mut bar, &catalog, count);
                    needs_draw = true;
                }
                KeyCode::Char('-') => {
                    let count = bar.len().saturating_sub(1);
                    rebuild(&mut bar, &catalog, count);
                    needs_draw = true;
                }
                KeyCode::Char('r') => {
                    let count = bar.len();
                    rebuild(&mut bar, &catalog, count);
                    needs_draw = true;
                }
                _ => {}
            },
            Event::Resize(_, _) => {
                bar.surface_mut().request_repaint();
                needs_draw = true;
            }
            _ => {}
        }
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}

fn rebuild(bar: &mut StepProgressBar<TerminalSurface>, catalog: &[StepDescriptor], count: usize) {
    debug!(count, "rebuilding step list");
    bar.initialize(&build_steps(catalog, count));
}

fn draw(frame: &mut Frame<'_>, bar: &mut StepProgressBar<TerminalSurface>) {
    let [header, body, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(PREFERRED_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let done = bar.active_step().map_or(0, |top| top + 1);
    let title = Paragraph::new(format!(" stepline  {done}/{} steps done", bar.len()))
        .style(Style::default().fg(Color::Rgb(0xF8, 0xF8, 0xF2)));
    frame.render_widget(title, header);

    bar.surface_mut().render(frame, body);

    let help = Paragraph::new(" ←/→ move | +/- resize | r rebuild | q quit")
        .style(Style::default().fg(Color::Rgb(0x62, 0x72, 0xA4)));
    frame.render_widget(help, hints);
}

/// Effective stylesheet for this run. An unreadable `--style` override
/// degrades to the embedded sheet, same as an unreadable `STEPLINE_STYLE`.
fn load_styles(path: Option<&Path>) -> StyleSheet {
    match path {
        Some(path) => match StyleSheet::from_path(path) {
            Ok(sheet) => sheet,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring unusable stylesheet override");
                StyleSheet::embedded()
            }
        },
        None => StyleSheet::load(),
    }
}

/// Step catalog from the stylesheet's `demo` section, or the built-in one
/// when the section is absent or unusable.
fn step_catalog(styles: &StyleSheet) -> Vec<StepDescriptor> {
    let section = match styles.section::<DemoSection>("demo") {
        Ok(Some(section)) => section,
        Ok(None) => return builtin_catalog(),
        Err(err) => {
            warn!(%err, "demo section is malformed; using the built-in steps");
            return builtin_catalog();
        }
    };

    let mut catalog = Vec::with_capacity(section.steps.len());
    for raw in &section.steps {
        match raw.to_descriptor() {
            Ok(descriptor) => catalog.push(descriptor),
            Err(err) => warn!(%err, "skipping demo step with a bad color"),
        }
    }
    if catalog.is_empty() {
        builtin_catalog()
    } else {
        catalog
    }
}

fn builtin_catalog() -> Vec<StepDescriptor> {
    let inactive = Color::Rgb(0x44, 0x47, 0x5A);
    vec![
        StepDescriptor::new(glyphs::DOT, Color::Rgb(0x8B, 0xE9, 0xFD), inactive),
        StepDescriptor::new(glyphs::DIAMOND, Color::Rgb(0x50, 0xFA, 0x7B), inactive),
        StepDescriptor::new(glyphs::SQUARE, Color::Rgb(0xFF, 0xB8, 0x6C), inactive),
        StepDescriptor::new(glyphs::STAR, Color::Rgb(0xFF, 0x79, 0xC6), inactive),
    ]
}

/// Repeats the catalog until `count` descriptors are produced.
fn build_steps(catalog: &[StepDescriptor], count: usize) -> Vec<StepDescriptor> {
    catalog.iter().copied().cycle().take(count).collect()
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
