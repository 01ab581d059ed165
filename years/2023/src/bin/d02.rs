use std::num::ParseIntError;

use lib::prelude::*;
use thiserror::Error;

lib::entry!(
    solve,
    input = "d02.txt",
    labels = ["sum of possible game ids", "sum of set powers"],
    expect = (8, 2286),
);

/// What the bag holds.
const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

#[derive(Debug, Error)]
enum Error {
    #[error("missing `: ` in `{0}`")]
    MissingSeparator(String),
    #[error("expected `Game <id>`, but got `{0}`")]
    BadGame(String),
    #[error("bad number `{0}`")]
    BadNumber(String, #[source] ParseIntError),
    #[error("expected `<count> <color>`, but got `{0}`")]
    BadPull(String),
    #[error("unknown color `{0}`")]
    UnknownColor(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    /// Test if this set could have been drawn from `bag`.
    fn fits_in(&self, bag: &Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    /// Per-color maximum of two sets.
    fn max(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Game {
    id: u32,
    sets: Vec<Cubes>,
}

impl Game {
    fn is_possible(&self) -> bool {
        self.sets.iter().all(|set| set.fits_in(&BAG))
    }

    /// The smallest bag this game could have been played with.
    fn minimum(&self) -> Cubes {
        self.sets.iter().fold(Cubes::default(), |acc, set| acc.max(*set))
    }
}

fn solve(mut input: IStr) -> Result<(u32, u32)> {
    let mut o1 = 0;
    let mut o2 = 0;

    while let Some(line) = input.try_line::<&str>()? {
        let game = parse_game(line)?;

        if game.is_possible() {
            o1 += game.id;
        }

        o2 += game.minimum().power();
    }

    Ok((o1, o2))
}

fn parse_game(line: &str) -> Result<Game, Error> {
    let (game, rest) = line
        .split_once(": ")
        .ok_or_else(|| Error::MissingSeparator(line.to_owned()))?;

    let id = game
        .strip_prefix("Game ")
        .ok_or_else(|| Error::BadGame(game.to_owned()))?;

    let id = parse_number(id)?;

    let sets = rest.split("; ").map(parse_set).collect::<Result<_, _>>()?;
    Ok(Game { id, sets })
}

/// Parse a set like `3 blue, 4 red`. Counts of the same color add up.
fn parse_set(set: &str) -> Result<Cubes, Error> {
    let mut cubes = Cubes::default();

    for pull in set.split(", ") {
        let (count, color) = pull
            .trim()
            .split_once(' ')
            .ok_or_else(|| Error::BadPull(pull.to_owned()))?;

        let count = parse_number(count)?;

        let slot = match color {
            "red" => &mut cubes.red,
            "green" => &mut cubes.green,
            "blue" => &mut cubes.blue,
            other => return Err(Error::UnknownColor(other.to_owned())),
        };

        *slot += count;
    }

    Ok(cubes)
}

fn parse_number(string: &str) -> Result<u32, Error> {
    string
        .parse()
        .map_err(|e| Error::BadNumber(string.to_owned(), e))
}
