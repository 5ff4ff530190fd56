//! Outcome counts aggregated over enumerated games.

use crate::types::Mark;
use derive_more::{Add, AddAssign};
use serde::{Deserialize, Serialize};

/// Number of X wins, O wins and ties among the games reachable from a
/// position when every continuation is played out.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Add, AddAssign,
)]
pub struct Tally {
    x_wins: u64,
    o_wins: u64,
    ties: u64,
}

impl Tally {
    /// Creates a tally from raw counts.
    pub fn new(x_wins: u64, o_wins: u64, ties: u64) -> Self {
        Self {
            x_wins,
            o_wins,
            ties,
        }
    }

    /// A single game won by `mark`.
    pub fn win(mark: Mark) -> Self {
        match mark {
            Mark::X => Self::new(1, 0, 0),
            Mark::O => Self::new(0, 1, 0),
        }
    }

    /// A single tied game.
    pub fn tie() -> Self {
        Self::new(0, 0, 1)
    }

    /// Games won by X.
    pub fn x_wins(&self) -> u64 {
        self.x_wins
    }

    /// Games won by O.
    pub fn o_wins(&self) -> u64 {
        self.o_wins
    }

    /// Tied games.
    pub fn ties(&self) -> u64 {
        self.ties
    }

    /// Games won by `mark`.
    pub fn wins_for(&self, mark: Mark) -> u64 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Total games counted.
    pub fn total(&self) -> u64 {
        self.x_wins + self.o_wins + self.ties
    }

    /// Share of counted games won by `mark`; 0 when nothing was counted.
    pub fn win_fraction(&self, mark: Mark) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.wins_for(mark) as f64 / total as f64,
        }
    }

    /// X-win, O-win and tie shares in percent.
    pub fn percentages(&self) -> [f64; 3] {
        let total = self.total();
        if total == 0 {
            return [0.0; 3];
        }
        let pct = |n: u64| n as f64 * 100.0 / total as f64;
        [pct(self.x_wins), pct(self.o_wins), pct(self.ties)]
    }

    /// X-win, O-win and tie shares in tenths of a percent, summing to 1000.
    ///
    /// Each share is truncated, then the leftover tenths go to the largest
    /// remainders. Equal remainders favour the earlier share.
    pub fn percent_tenths(&self) -> [u64; 3] {
        let total = self.total();
        if total == 0 {
            return [0; 3];
        }
        let counts = [self.x_wins, self.o_wins, self.ties];
        let mut tenths = counts.map(|n| n * 1000 / total);
        let remainders = counts.map(|n| n * 1000 % total);

        let mut order = [0, 1, 2];
        order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));
        let leftover = 1000 - tenths.iter().sum::<u64>();
        for &i in order.iter().take(leftover as usize) {
            tenths[i] += 1;
        }
        tenths
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Self {
        iter.fold(Tally::default(), |acc, t| acc + t)
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, o, tie] = self.percent_tenths();
        write!(
            f,
            "X {}.{}% | O {}.{}% | tie {}.{}%",
            x / 10,
            x % 10,
            o / 10,
            o % 10,
            tie / 10,
            tie % 10
        )
    }
}
