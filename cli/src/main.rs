// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI - headless board surface
//!
//! Replays a move list, lays the board out for a given surface size and
//! prints the resulting draw passes. Useful for inspecting overlays without
//! a window and for scripted regression checks.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use goban_core::{BoardSize, CandidateMove, Evaluation, GameSource, GameTree, Move};
use goban_ui_egui::components::board::{GridGeometry, OverlayRenderer, OverlayToggles, RenderContext};
use goban_ui_egui::BoardUiConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "goban-cli",
    about = "Render a Go position and its analysis overlays without a window",
    version
)]
struct Args {
    /// Board width and height
    #[clap(short, long, default_value = "19")]
    size: u8,

    /// GTP moves to replay, e.g. "Q16 D4 pass"
    #[clap(short, long, default_value = "")]
    moves: String,

    /// Analysis for the final position as JSON
    #[clap(long)]
    analysis: Option<PathBuf>,

    /// Board theme as JSON
    #[clap(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels
    #[clap(long, default_value = "800")]
    width: f32,

    /// Surface height in pixels
    #[clap(long, default_value = "800")]
    height: f32,

    /// Preview a ghost stone at this vertex
    #[clap(long)]
    ghost: Option<String>,

    /// Output format; overlays and --ghost only show in summary and json
    #[clap(short, long, value_enum, default_value = "ascii")]
    format: Format,

    #[clap(long)]
    full_eval: bool,
    #[clap(long)]
    ownership: bool,
    #[clap(long)]
    policy: bool,
    #[clap(long)]
    children: bool,
    #[clap(long)]
    hints: bool,
    /// Both players are engines; allows a one-move-old policy
    #[clap(long)]
    self_play: bool,
    #[clap(long)]
    debug_palette: bool,
}

/// Output format
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Board diagram
    Ascii,
    /// Command counts per layer
    Summary,
    /// Full draw passes
    Json,
}

/// Analysis attached to the final position and its parent
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalysisInput {
    current: Evaluation,
    parent: Option<Evaluation>,
    candidates: Vec<CandidateMove>,
}

impl Args {
    fn toggles(&self) -> OverlayToggles {
        OverlayToggles {
            full_eval: self.full_eval,
            ownership: self.ownership,
            policy: self.policy,
            children: self.children,
            hints: self.hints,
            engine_self_play: self.self_play,
            debug_palette: self.debug_palette,
        }
    }

    /// A ghost or any overlay was asked for
    fn overlays_requested(&self) -> bool {
        self.ghost.is_some() || self.toggles() != OverlayToggles::default()
    }
}

fn load_analysis(path: &Path, game: &mut GameTree) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis file: {}", path.display()))?;
    let input: AnalysisInput = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse analysis file: {}", path.display()))?;

    let current = game.current();
    game.set_evaluation(current, input.current)?;
    game.set_candidate_moves(current, input.candidates)?;
    let parent_id = game.current_node().parent;
    if let Some(parent) = input.parent {
        match parent_id {
            Some(id) => game.set_evaluation(id, parent)?,
            None => tracing::warn!("Ignoring parent analysis at the root"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BoardUiConfig::load_from_file(path)?,
        None => BoardUiConfig::default(),
    };

    let mut game = GameTree::new(BoardSize::square(args.size)?);
    for vertex in args.moves.split_whitespace() {
        game.play_gtp(vertex)
            .with_context(|| format!("Failed to play {}", vertex))?;
    }
    if let Some(path) = &args.analysis {
        load_analysis(path, &mut game)?;
    }
    tracing::info!(size = args.size, node = %game.current(), "Replayed moves");

    if args.format == Format::Ascii {
        if args.overlays_requested() {
            tracing::warn!("Overlays and ghost stones are not shown in ascii output");
        }
        print!("{}", render::render_board(&game));
        return Ok(());
    }

    let ghost = match &args.ghost {
        Some(vertex) => Move::from_gtp(vertex, game.next_player(), game.board_size())?.coord,
        None => None,
    };

    let geometry = GridGeometry::compute(game.board_size(), args.width, args.height, config.stone_size);
    if !geometry.is_drawable() {
        tracing::warn!(width = args.width, height = args.height, "Surface too small to draw");
    }
    let renderer = OverlayRenderer::new(config);
    let grid = renderer.draw_board(&geometry);
    let frame = renderer.draw_contents(&RenderContext {
        geometry: &geometry,
        game: &game,
        toggles: args.toggles(),
        ghost,
        pass_control: None,
    });

    if args.format == Format::Summary {
        print!("{}", render::render_summary(&grid, &frame.contents));
    } else {
        let output = serde_json::json!({
            "geometry": {
                "grid_spacing": geometry.grid_spacing,
                "stone_radius": geometry.stone_radius,
                "x": geometry.x,
                "y": geometry.y,
            },
            "grid": grid,
            "frame": frame,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn analysis_file_attaches_to_current_and_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(
            &path,
            r#"{
                "current": { "points_lost": 1.5 },
                "parent": { "ownership": [0.5] },
                "candidates": [{ "move": "C3", "visits": 12, "pointsLost": 0.0 }]
            }"#,
        )
        .unwrap();

        let mut game = GameTree::new(BoardSize::square(9).unwrap());
        game.play_gtp("E5").unwrap();
        load_analysis(&path, &mut game).unwrap();

        let current = game.current_node();
        assert_eq!(current.points_lost(), Some(1.5));
        assert_eq!(current.candidate_moves.len(), 1);
        let root = game.node(game.root()).unwrap();
        assert_eq!(root.evaluation.ownership.as_deref(), Some(&[0.5f32][..]));
    }

    #[test]
    fn overlay_flags_are_detected() {
        let plain = Args::parse_from(["goban-cli", "--moves", "D4"]);
        assert_eq!(plain.format, Format::Ascii);
        assert!(!plain.overlays_requested());

        let ghost = Args::parse_from(["goban-cli", "--ghost", "E5"]);
        assert!(ghost.overlays_requested());

        let policy = Args::parse_from(["goban-cli", "--policy", "--format", "summary"]);
        assert!(policy.overlays_requested());
        assert_eq!(policy.format, Format::Summary);
    }

    #[test]
    fn missing_analysis_file_is_an_error() {
        let dir = tempdir().unwrap();
        let mut game = GameTree::new(BoardSize::square(9).unwrap());
        let err = load_analysis(&dir.path().join("missing.json"), &mut game).unwrap_err();
        assert!(err.to_string().contains("Failed to read analysis file"));
    }
}
