use color_eyre::Result;
use radar_core::Legend;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use serde::Serialize;
use std::io::{Stdout, Write};

use crate::app::{handle_key, handle_mouse, App};
use crate::ui;

/// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Prints a summary of the laid-out radar instead of drawing it.
pub fn run_headless(app: &App, json: bool, out: &mut impl Write) -> Result<()> {
    let stats = build_headless_stats(app);
    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        render_headless_stats(&stats, out)?;
    }
    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", stats.title)?;
    writeln!(out, "{}", "=".repeat(stats.title.chars().count()))?;
    writeln!(out, "Total entries: {}", stats.total_entries)?;
    writeln!(out, "Plotted: {}", stats.plotted)?;

    writeln!(out, "\nEntries by Quadrant:")?;
    for (quadrant, count) in &stats.by_quadrant {
        writeln!(out, "- {quadrant}: {count}")?;
    }

    writeln!(out, "\nEntries by Ring:")?;
    for (ring, count) in &stats.by_ring {
        writeln!(out, "- {ring}: {count}")?;
    }

    writeln!(out, "\nEntries:")?;
    for entry in &stats.entries {
        let flag = if entry.is_new { " (new)" } else { "" };
        writeln!(
            out,
            "- {}. {} | {} | {}{flag}",
            entry.number, entry.label, entry.quadrant, entry.ring
        )?;
    }

    if !stats.skipped.is_empty() {
        writeln!(out, "\nSkipped:")?;
        for skipped in &stats.skipped {
            writeln!(out, "- {}. {}: {}", skipped.number, skipped.label, skipped.reason)?;
        }
    }

    Ok(())
}

/// Counts follow the configured quadrant and ring order; empty groups
/// are listed with zero.
pub fn build_headless_stats(app: &App) -> HeadlessStats {
    let markers = &app.scene.markers;

    let by_quadrant = app
        .config
        .quadrants
        .iter()
        .map(|quadrant| {
            let count = markers
                .iter()
                .filter(|marker| marker.entry.quadrant == quadrant.name)
                .count();
            (quadrant.name.clone(), count)
        })
        .collect();

    let by_ring = app
        .config
        .rings
        .iter()
        .enumerate()
        .map(|(index, ring)| {
            let count = markers
                .iter()
                .filter(|marker| marker.entry.ring_index == index)
                .count();
            (ring.name.clone(), count)
        })
        .collect();

    let entries = markers
        .iter()
        .map(|marker| HeadlessEntry {
            number: marker.number(),
            label: marker.entry.label.clone(),
            quadrant: marker.entry.quadrant.clone(),
            ring: marker.entry.ring.clone(),
            is_new: marker.is_new(),
            x: marker.position().x,
            y: marker.position().y,
        })
        .collect();

    let skipped = app
        .scene
        .skipped
        .iter()
        .map(|skipped| HeadlessSkipped {
            number: skipped.number,
            label: skipped.label.clone(),
            reason: skipped.reason.to_string(),
        })
        .collect();

    HeadlessStats {
        title: app.scene.title.clone(),
        total_entries: app.config.entries.len(),
        plotted: markers.len(),
        by_quadrant,
        by_ring,
        entries,
        skipped,
        legend: app.legend.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct HeadlessStats {
    title: String,
    total_entries: usize,
    plotted: usize,
    by_quadrant: Vec<(String, usize)>,
    by_ring: Vec<(String, usize)>,
    entries: Vec<HeadlessEntry>,
    skipped: Vec<HeadlessSkipped>,
    legend: Legend,
}

#[derive(Debug, Serialize)]
struct HeadlessEntry {
    number: usize,
    label: String,
    quadrant: String,
    ring: String,
    is_new: bool,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct HeadlessSkipped {
    number: usize,
    label: String,
    reason: String,
}

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key)?,
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            Event::Resize(_, _) => {
                terminal.autoresize()?;
            }
            _ => {}
        }
    }
    Ok(())
}
