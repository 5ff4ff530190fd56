//! Outcome report for a single position.

use serde::Serialize;
use std::io::Write;
use tictree_core::{Board, GameTree, Mark, MoveChoice, Tally, best_move, rank_moves};
use tracing::instrument;

/// Enumerated outcomes of a position and of each move from it.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    board: String,
    to_move: Mark,
    positions: usize,
    tally: Tally,
    best: Option<usize>,
    moves: Vec<MoveChoice>,
}

impl Analysis {
    /// Builds the subtree below `board` and summarizes it.
    #[instrument(skip(board), fields(key = %board.key()))]
    pub fn of(board: Board) -> anyhow::Result<Self> {
        let tree = GameTree::build_from(board)?;
        let root = tree.root();
        Ok(Self {
            board: board.squares().iter().map(|s| s.symbol()).collect(),
            to_move: root.to_move(),
            positions: tree.len(),
            tally: root.tally(),
            best: best_move(&tree, root).map(|choice| choice.cell()),
            moves: rank_moves(&tree, root),
        })
    }

    /// Outcomes of the analyzed position.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Square the computer would play, if any move remains.
    pub fn best(&self) -> Option<usize> {
        self.best
    }

    /// Candidate moves in cell order.
    pub fn moves(&self) -> &[MoveChoice] {
        &self.moves
    }

    /// Writes the report as pretty JSON.
    pub fn write_json(&self, mut out: impl Write) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        Ok(())
    }

    /// Writes the report as a plain-text table.
    pub fn write_table(&self, mut out: impl Write) -> anyhow::Result<()> {
        writeln!(out, "Position {} ({} to move)", self.board, self.to_move)?;
        writeln!(out, "Distinct positions: {}", self.positions)?;
        writeln!(
            out,
            "Games: {} (X {}, O {}, tie {})",
            self.tally.total(),
            self.tally.x_wins(),
            self.tally.o_wins(),
            self.tally.ties()
        )?;
        writeln!(out, "Odds: {}", self.tally)?;

        if self.moves.is_empty() {
            writeln!(out, "\nNo moves remain")?;
            return Ok(());
        }

        writeln!(out, "\nCell   X-wins   O-wins     Ties   Win share")?;
        for choice in &self.moves {
            let tally = choice.tally();
            let marker = if Some(choice.cell()) == self.best { " *" } else { "" };
            writeln!(
                out,
                "{:>4} {:>8} {:>8} {:>8} {:>10.2}%{}",
                choice.cell(),
                tally.x_wins(),
                tally.o_wins(),
                tally.ties(),
                choice.fraction() * 100.0,
                marker
            )?;
        }
        Ok(())
    }
}
