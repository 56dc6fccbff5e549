//! Tab completion over the names the evaluator currently knows

use insect_core::lexer::is_identifier_char;
use insect_core::{Environment, Evaluator};
use rustyline::completion::{Completer, Pair};
use rustyline::{Context, Result};

/// Every completion candidate, in a fixed order: bound identifiers,
/// function names, units, then commands. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Gather the candidates valid in `env`
    pub fn collect<E: Evaluator>(evaluator: &E, env: &Environment) -> Self {
        let mut words = evaluator.identifiers(env);
        words.extend(evaluator.functions(env));
        words.extend(evaluator.supported_units());
        words.extend(evaluator.commands());
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Completer for the insect prompt
#[derive(Debug, Default)]
pub struct ReplCompleter {
    vocabulary: Vocabulary,
}

impl ReplCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidates, typically once per prompt
    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) {
        self.vocabulary = vocabulary;
    }

    /// Candidates for the text before the cursor, with the prefix they match.
    ///
    /// Blank input offers everything with an empty prefix. Otherwise the
    /// prefix is the last word-boundary token and matching is a literal,
    /// case-sensitive `starts_with`.
    pub fn complete_line(&self, line: &str) -> (Vec<String>, String) {
        if line.trim().is_empty() {
            return (self.vocabulary.words.clone(), String::new());
        }

        let prefix = last_word(line);
        let matches = self
            .vocabulary
            .words
            .iter()
            .filter(|word| word.starts_with(prefix))
            .cloned()
            .collect();
        (matches, prefix.to_string())
    }
}

/// The trailing run of characters on the same side of a word boundary
fn last_word(line: &str) -> &str {
    let Some(last) = line.chars().last() else {
        return line;
    };
    let word = is_identifier_char(last);
    let start = line
        .char_indices()
        .rev()
        .find(|(_, c)| is_identifier_char(*c) != word)
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &line[start..]
}

impl Completer for ReplCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        let (matches, prefix) = self.complete_line(&line[..pos]);
        let candidates = matches
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((pos - prefix.len(), candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insect_core::Calculator;

    fn completer_for(lines: &[&str]) -> ReplCompleter {
        let calc = Calculator::new();
        let mut env = calc.initial_environment();
        for line in lines {
            env = calc.evaluate(insect_core::Format::Plain, &env, line).new_env;
        }
        let mut completer = ReplCompleter::new();
        completer.set_vocabulary(Vocabulary::collect(&calc, &env));
        completer
    }

    #[test]
    fn test_vocabulary_order() {
        let calc = Calculator::new();
        let env = calc.initial_environment();
        let vocabulary = Vocabulary::collect(&calc, &env);
        let words = vocabulary.words();

        assert_eq!(&words[..2], ["pi", "e"]);
        let position = |w: &str| words.iter().position(|x| x == w).unwrap();
        assert!(position("sqrt") < position("km"));
        assert!(position("km") < position("quit"));
    }

    #[test]
    fn test_blank_offers_everything() {
        let completer = completer_for(&[]);
        let (matches, prefix) = completer.complete_line("   ");
        assert_eq!(prefix, "");
        assert_eq!(matches, completer.vocabulary.words);
    }

    #[test]
    fn test_prefix_filter() {
        let completer = completer_for(&["square(x) = x * x"]);
        let (matches, prefix) = completer.complete_line("sq");
        assert_eq!(prefix, "sq");
        assert_eq!(matches, vec!["sqrt".to_string(), "square".to_string()]);
    }

    #[test]
    fn test_last_word_only() {
        let completer = completer_for(&["distance = 3 km"]);
        let (matches, prefix) = completer.complete_line("2 * dist");
        assert_eq!(prefix, "dist");
        assert_eq!(matches, vec!["distance".to_string()]);

        let (matches, prefix) = completer.complete_line("2 * Dist");
        assert_eq!(prefix, "Dist");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_unit_symbols_complete() {
        let completer = completer_for(&[]);
        let (matches, prefix) = completer.complete_line("3 µ");
        assert_eq!(prefix, "µ");
        assert_eq!(matches, vec!["µm".to_string(), "µs".to_string()]);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(last_word("3 km"), "km");
        assert_eq!(last_word("sqrt(a"), "a");
        assert_eq!(last_word("sqrt("), "(");
        assert_eq!(last_word("1 + "), " + ");
        assert_eq!(last_word("x_1"), "x_1");
        assert_eq!(last_word("5 µ"), "µ");
    }
}
