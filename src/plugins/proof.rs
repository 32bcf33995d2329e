//! Proof joke plugin.
//!
//! `!proof` answers with a randomly assembled "the proof is trivial" line.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use super::Command;
use crate::bot::Bot;
use crate::chatlog::Message;

const OPENERS: &[&str] = &["Just biject it to a", "Just view the problem as a"];

const ADJECTIVES: &[&str] = &[
    "abelian",
    "associative",
    "computable",
    "Lebesgue-measurable",
    "semi-decidable",
    "simple",
    "combinatorial",
    "structure-preserving",
    "diagonalizable",
    "nonsingular",
    "orientable",
    "twice-differentiable",
    "thrice-differentiable",
    "countable",
    "prime",
    "complete",
];

/// A noun and whether it reads well as the containing object.
struct Noun {
    singular: &'static str,
    plural: &'static str,
    container: bool,
}

const NOUNS: &[Noun] = &[
    Noun { singular: "multiset", plural: "multisets", container: true },
    Noun { singular: "integer", plural: "integers", container: false },
    Noun { singular: "metric space", plural: "metric spaces", container: true },
    Noun { singular: "group", plural: "groups", container: true },
    Noun { singular: "monoid", plural: "monoids", container: true },
    Noun { singular: "semigroup", plural: "semigroups", container: true },
    Noun { singular: "bijection", plural: "bijections", container: false },
    Noun { singular: "4-form", plural: "4-forms", container: false },
    Noun { singular: "triangulation", plural: "triangulations", container: false },
];

/// Handle `!proof`.
pub struct ProofCommand;

#[async_trait]
impl Command for ProofCommand {
    async fn execute(&self, bot: &Bot, target: &str, _msg: &Message) -> anyhow::Result<()> {
        let text = build_proof(&mut rand::thread_rng());
        bot.send(target, &text).await;
        Ok(())
    }
}

/// Assemble one proof line.
pub fn build_proof<R: Rng + ?Sized>(rng: &mut R) -> String {
    let opener = OPENERS.choose(rng).copied().unwrap_or_default();
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or_default();
    let container = NOUNS
        .iter()
        .filter(|n| n.container)
        .collect::<Vec<_>>()
        .choose(rng)
        .map(|n| n.singular)
        .unwrap_or_default();
    let element_adjective = ADJECTIVES.choose(rng).copied().unwrap_or_default();
    let elements = NOUNS.choose(rng).map(|n| n.plural).unwrap_or_default();

    format!(
        "The proof is trivial! {}{} {} {} whose elements are {} {}.",
        opener,
        article_suffix(adjective),
        adjective,
        container,
        element_adjective,
        elements
    )
}

/// "n" when the opener's trailing "a" must become "an".
fn article_suffix(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "n",
        _ => "",
    }
}
