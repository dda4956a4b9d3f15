use crate::taxi::{TaxiEnv, ACTION_NAMES, WAITING};
use crate::Discrete;

#[derive(Debug)]
pub enum RenderFrame {
    Ansi(String),
}

impl RenderFrame {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RenderFrame::Ansi(s) => Some(s),
        }
    }
}

const GREEN: u8 = 32;
const YELLOW: u8 = 33;
const BLUE: u8 = 34;
const MAGENTA: u8 = 35;

// Same escape scheme as the gym `utils.colorize` the original render used:
// highlight moves a foreground code to its background counterpart.
fn colorize(text: &str, color: u8, bold: bool, highlight: bool) -> String {
    let num = if highlight { color + 10 } else { color };
    if bold {
        format!("\x1b[1;{num}m{text}\x1b[0m")
    } else {
        format!("\x1b[{num}m{text}\x1b[0m")
    }
}

/// Colorized ANSI view of a state: taxi yellow while empty and green (with
/// `_` for blank cells) while carrying, waiting passenger blue/bold,
/// destination magenta, with the last action named underneath.
pub fn render(env: &TaxiEnv, state: Discrete, last_action: Option<Discrete>) -> RenderFrame {
    let mut out: Vec<Vec<String>> = env
        .map()
        .desc()
        .iter()
        .map(|line| line.iter().map(|c| c.to_string()).collect())
        .collect();

    let (row, col, pass, dest_idx) = env.decode(state);

    if pass == WAITING {
        let taxi = colorize(&out[1 + row][2 * col + 1], YELLOW, false, true);
        out[1 + row][2 * col + 1] = taxi;
        let (pi, pj) = env.config().locs[env.config().pass_idx];
        let passenger = colorize(&out[1 + pi][2 * pj + 1], BLUE, true, false);
        out[1 + pi][2 * pj + 1] = passenger;
    } else {
        let cell = &out[1 + row][2 * col + 1];
        let cell = if cell == " " { "_" } else { cell.as_str() };
        let taxi = colorize(cell, GREEN, false, true);
        out[1 + row][2 * col + 1] = taxi;
    }

    let (di, dj) = env.config().destinations[dest_idx];
    let marker = colorize(&out[1 + di][2 * dj + 1], MAGENTA, false, false);
    out[1 + di][2 * dj + 1] = marker;

    let mut text = out
        .iter()
        .map(|line| line.concat())
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    match last_action {
        Some(a) => text.push_str(&format!("  ({})\n", ACTION_NAMES[a as usize])),
        None => text.push('\n'),
    }

    RenderFrame::Ansi(text)
}
