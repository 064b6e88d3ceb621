//! Rules for the two built-in games, kept free of randomness.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rock, paper, scissors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

impl RpsChoice {
    pub const ALL: [RpsChoice; 3] = [RpsChoice::Rock, RpsChoice::Paper, RpsChoice::Scissors];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    /// Rock breaks scissors, scissors cut paper, paper covers rock.
    pub fn beats(self, other: RpsChoice) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }
}

impl fmt::Display for RpsChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpsChoice {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsOutcome {
    Win,
    Lose,
    Tie,
}

impl RpsOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Win => "You win!",
            Self::Lose => "You lose!",
            Self::Tie => "It's a tie!",
        }
    }
}

/// Resolve one round from the player's point of view.
pub fn play_round(player: RpsChoice, ai: RpsChoice) -> RpsOutcome {
    if player == ai {
        RpsOutcome::Tie
    } else if player.beats(ai) {
        RpsOutcome::Win
    } else {
        RpsOutcome::Lose
    }
}

/// Running score, persisted between sessions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsScore {
    pub player: u32,
    pub ai: u32,
}

impl RpsScore {
    pub fn record(&mut self, outcome: RpsOutcome) {
        match outcome {
            RpsOutcome::Win => self.player += 1,
            RpsOutcome::Lose => self.ai += 1,
            RpsOutcome::Tie => {},
        }
    }
}

impl fmt::Display for RpsScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} - AI {}", self.player, self.ai)
    }
}

// ---------------------------------------------------------------------------
// Tic-tac-toe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "X",
            Self::O => "O",
        })
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner(Mark),
    Tie,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3x3 board. The visitor always plays X and moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    cells: [Option<Mark>; 9],
    turn: Mark,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            turn: Mark::X,
        }
    }

    /// Whose move it is.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Indices (0-8) of empty cells.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.cells[i].is_none()).collect()
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Place `mark` at `index` (0-8). Fails on an occupied or out-of-range
    /// cell.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if cell.is_none() => {
                *cell = Some(mark);
                true
            },
            _ => false,
        }
    }

    /// `None` while the game is still open.
    pub fn result(&self) -> Option<GameResult> {
        for [a, b, c] in LINES {
            if let Some(mark) = self.cells[a]
                && self.cells[b] == Some(mark)
                && self.cells[c] == Some(mark)
            {
                return Some(GameResult::Winner(mark));
            }
        }
        if self.cells.iter().all(Option::is_some) {
            Some(GameResult::Tie)
        } else {
            None
        }
    }

    /// Three rows separated by `-+-+-`; empty cells show their number.
    pub fn render(&self) -> String {
        let cell = |i: usize| match self.cells[i] {
            Some(mark) => mark.to_string(),
            None => (i + 1).to_string(),
        };
        (0..3)
            .map(|row| {
                let base = row * 3;
                format!("{}|{}|{}", cell(base), cell(base + 1), cell(base + 2))
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }
}
