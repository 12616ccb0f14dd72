// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;
use std::io::Write;

use rand::Rng;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::practice::PracticeSession;
use crate::practice::Step;
use crate::practice::Summary;
use crate::types::card::Card;

pub async fn practice(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::open(directory).await?;
    let cards: Vec<Card> = coll.store.view().cards().to_vec();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut rng = rand::rng();
    run_session(&cards, &mut rng, stdin.lock(), stdout.lock())?;
    Ok(())
}

enum Answer {
    Known,
    Review,
    Quit,
}

/// Drive a practice session over a line-oriented terminal. End of input
/// exits the session early.
pub fn run_session<G, R, W>(
    cards: &[Card],
    rng: &mut G,
    mut input: R,
    mut output: W,
) -> Fallible<Summary>
where
    G: Rng + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut session = PracticeSession::start(cards, rng);
    while let Some(card) = session.current() {
        writeln!(output, "{}  [{}]", session.progress_label(), card.category)?;
        writeln!(output, "Q: {}", card.front)?;
        writeln!(output, "[press enter to reveal, q to quit]")?;
        output.flush()?;
        match read_line(&mut input)? {
            Some(line) if line != "q" => {}
            _ => break,
        }
        session.reveal();
        if let Some(card) = session.current() {
            writeln!(output, "A: {}", card.display_back())?;
        }
        let answer = read_answer(&mut input, &mut output)?;
        let step = match answer {
            Answer::Known => session.mark_known(),
            Answer::Review => session.mark_review(),
            Answer::Quit => break,
        };
        writeln!(output)?;
        if step == Step::Finished {
            break;
        }
    }
    let review: Vec<String> = session
        .needs_review()
        .iter()
        .map(|card| card.front.clone())
        .collect();
    let summary = session.exit();
    writeln!(
        output,
        "Practice complete! Known: {}. Need review: {}.",
        summary.known, summary.needs_review
    )?;
    for front in review {
        writeln!(output, "  - {front}")?;
    }
    log::debug!("Practice session lasted {}s.", summary.duration.as_secs());
    Ok(summary)
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Fallible<Answer> {
    loop {
        write!(output, "Did you know it? (y/n, q to quit): ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(Answer::Quit);
        };
        match line.as_str() {
            "y" => return Ok(Answer::Known),
            "n" => return Ok(Answer::Review),
            "q" => return Ok(Answer::Quit),
            _ => writeln!(output, "Invalid input. Please enter y, n, or q.")?,
        }
    }
}

/// The next trimmed, lowercased line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
