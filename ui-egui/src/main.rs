// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the egui board viewer

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver, Sender};
use goban_core::{BoardSize, GameSource, GameTree, NodeId};
use goban_ui_egui::{BoardAction, BoardUiConfig, BoardWidget};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "goban-viewer")]
#[command(about = "Go board viewer with analysis overlays")]
struct Args {
    #[arg(long, default_value = "19")]
    board_size: u8,

    /// Board theme as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// GTP moves to replay before showing the board, e.g. "Q16 D4 pass"
    #[arg(long, default_value = "")]
    moves: String,
}

struct ViewerApp {
    game: GameTree,
    board: BoardWidget,
    action_tx: Sender<BoardAction>,
    action_rx: Receiver<BoardAction>,
    info: String,
}

impl ViewerApp {
    fn new(game: GameTree, config: BoardUiConfig) -> Self {
        let (action_tx, action_rx) = unbounded();
        Self {
            game,
            board: BoardWidget::new(config),
            action_tx,
            action_rx,
            info: String::new(),
        }
    }

    fn handle_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            match action {
                BoardAction::ConfirmPlacement(coord) => match self.game.play(coord) {
                    Ok(id) => tracing::info!(node = %id, x = coord.x, y = coord.y, "Move played"),
                    Err(e) => {
                        tracing::warn!("Rejected move: {}", e);
                        self.info = format!("Illegal move: {}", e);
                    }
                },
                BoardAction::InspectNode(id) => self.info = self.describe(id),
            }
            self.board.invalidate();
        }
    }

    fn describe(&self, id: NodeId) -> String {
        let Some(node) = self.game.node(id) else {
            return format!("Unknown node {}", id);
        };
        let mut text = match node.single_move() {
            Some(mv) => format!("{} {:?} {}", id, mv.player, mv.gtp()),
            None => id.to_string(),
        };
        if let Some(points_lost) = node.points_lost() {
            text.push_str(&format!("\nPoints lost: {:.1}", points_lost));
        }
        if let Some(comment) = &node.comment {
            text.push('\n');
            text.push_str(comment);
        }
        text
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let mut toggles = self.board.toggles();
        ui.heading("Overlays");
        ui.checkbox(&mut toggles.full_eval, "Evaluation on all stones");
        ui.checkbox(&mut toggles.ownership, "Ownership");
        ui.checkbox(&mut toggles.policy, "Policy");
        ui.checkbox(&mut toggles.children, "Child moves");
        ui.checkbox(&mut toggles.hints, "Hints");
        ui.checkbox(&mut toggles.engine_self_play, "Engine self-play");
        ui.checkbox(&mut toggles.debug_palette, "Color palette");
        self.board.set_toggles(toggles);

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Undo").clicked() && self.game.undo() {
                self.board.invalidate();
            }
            if ui.button("Redo").clicked() && self.game.redo() {
                self.board.invalidate();
            }
        });

        let pass = ui.add_enabled(!self.game.game_ended(), egui::Button::new("Pass"));
        if pass.clicked() {
            let id = self.game.pass();
            tracing::info!(node = %id, "Pass");
            self.board.invalidate();
        }
        self.board.set_pass_button(Some(pass.rect));
        self.board.paint_pass_glyph(ui);

        ui.separator();
        ui.label(format!("{:?} to play", self.game.next_player()));
        if !self.info.is_empty() {
            ui.label(&self.info);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("controls")
            .resizable(false)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.board.show(ui, &self.game, Some(&self.action_tx));
        });

        self.handle_actions();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BoardUiConfig::load_from_file(path)?,
        None => BoardUiConfig::default(),
    };

    let mut game = GameTree::new(BoardSize::square(args.board_size)?);
    for vertex in args.moves.split_whitespace() {
        game.play_gtp(vertex)?;
    }
    tracing::info!(size = args.board_size, node = %game.current(), "Starting viewer");

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1000.0, 800.0)),
        centered: true,
        resizable: true,
        ..Default::default()
    };

    eframe::run_native(
        "Goban",
        options,
        Box::new(move |_cc| Box::new(ViewerApp::new(game, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))
}
