//! Plain-text projections of a [`PuzzleSnapshot`].

use std::fmt::Write as _;

use client_core::{PuzzleSnapshot, SolveResult};
use shared::domain::{CubeState, Face, Facelet};

fn face_row(cells: &[Facelet; 9], row: usize) -> String {
    cells[row * 3..row * 3 + 3]
        .iter()
        .map(|c| c.as_char().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unfolded net: Up on top, Left/Front/Right/Back across, Down below.
pub fn cube_net(cube: &CubeState) -> String {
    let up = cube.face(Face::Up);
    let down = cube.face(Face::Down);
    let belt = [Face::Left, Face::Front, Face::Right, Face::Back].map(|f| cube.face(f));
    let pad = " ".repeat(6);

    let mut out = String::new();
    for row in 0..3 {
        let _ = writeln!(out, "{pad}{}", face_row(&up, row));
    }
    for row in 0..3 {
        let line = belt
            .iter()
            .map(|face| face_row(face, row))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
    }
    for row in 0..3 {
        let _ = writeln!(out, "{pad}{}", face_row(&down, row));
    }
    out
}

pub fn solve_result(prior: Option<&CubeState>, result: &SolveResult) -> String {
    let mut out = String::new();
    if let Some(prior) = prior {
        let _ = writeln!(out, "Original cube: {prior}");
    }
    let moves = if result.moves.is_empty() {
        "(none)".to_string()
    } else {
        result.moves.join(" ")
    };
    let _ = writeln!(out, "Moves ({}): {moves}", result.moves.len());
    let _ = writeln!(out, "Time to solve: {}", result.duration_ms);
    out
}

pub fn snapshot(snapshot: &PuzzleSnapshot) -> String {
    let mut out = cube_net(&snapshot.cube);
    let _ = writeln!(out, "Cube: {}", snapshot.cube);
    let _ = writeln!(out, "State: {:?}", snapshot.phase);
    if let Some(color) = snapshot.selected_color {
        let _ = writeln!(out, "Selected color: {color}");
    }
    // The result panel is hidden while an alert is showing.
    match (snapshot.alert.message(), &snapshot.result) {
        (Some(message), _) => {
            let _ = writeln!(out, "Alert: {message}");
        }
        (None, Some(result)) => out.push_str(&solve_result(snapshot.prior_cube.as_ref(), result)),
        (None, None) => {}
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
