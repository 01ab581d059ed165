use lib::prelude::*;

lib::entry!(
    solve,
    input = "d04.txt",
    labels = ["sum of card points", "total scratchcards"],
    expect = (13, 30),
);

fn solve(mut input: IStr) -> Result<(u64, u64)> {
    let mut o1 = 0;
    let mut matches = Vec::new();

    for card in input.lines::<Card>() {
        let card = card?;
        let m = card.matches();
        o1 += points(m).with_context(|| format!("card {}: too many matches ({m})", card.id))?;
        matches.push(m);
    }

    log::debug!("{} cards", matches.len());
    Ok((o1, scratchcards(&matches)))
}

#[derive(Debug)]
struct Card {
    id: u32,
    /// Bit set of winning numbers.
    winning: u128,
    have: Vec<u8>,
}

impl Card {
    /// Number of numbers we have which are winning, duplicates included.
    fn matches(&self) -> u32 {
        let n = self
            .have
            .iter()
            .filter(|&&n| n < 128 && self.winning & (1 << n) != 0)
            .count();

        n as u32
    }
}

struct CardId(u32);

lib::from_input! {
    |value: (W<&'static str>, u32)| -> CardId {
        let (W(word), id) = value;
        ensure!(word == "Card", "expected `Card`, but got `{word}`");
        Ok(CardId(id))
    }
}

lib::from_input! {
    |Split((CardId(id), Split((winning, have)))): Split<':', (CardId, Split<'|', (Vec<u8>, Vec<u8>)>)>| -> Card {
        let mut set = 0u128;

        for n in winning {
            set |= 1u128
                .checked_shl(u32::from(n))
                .with_context(|| format!("winning number `{n}` is out of range"))?;
        }

        Ok(Card { id, winning: set, have })
    }
}

/// One point for the first match, doubled for each one after that.
fn points(matches: u32) -> Option<u64> {
    match matches.checked_sub(1) {
        Some(n) => 1u64.checked_shl(n),
        None => Some(0),
    }
}

/// Count scratchcards, where each card wins a copy of as many of the cards
/// following it as it has matches.
fn scratchcards(matches: &[u32]) -> u64 {
    let mut copies = vec![1u64; matches.len()];

    for (i, &m) in matches.iter().enumerate() {
        let n = copies[i];

        for c in copies.iter_mut().skip(i + 1).take(m as usize) {
            *c += n;
        }
    }

    copies.iter().sum()
}
