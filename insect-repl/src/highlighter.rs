//! Syntax highlighting for the insect prompt

use std::borrow::Cow;

use colored::*;
use insect_core::ast::Command;
use insect_core::lexer::Token;
use insect_core::units;
use logos::Logos;
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

use crate::completer::{ReplCompleter, Vocabulary};

/// Colours input using the evaluator's own tokenizer
#[derive(Debug, Default)]
pub struct ReplHighlighter;

impl ReplHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Style for one token, `None` to leave it as typed
    fn style(token: &Token<'_>, text: &str) -> Option<ColoredString> {
        match token {
            Token::Number(_) => Some(text.yellow()),
            Token::Ident(name) if Command::from_word(name).is_some() => Some(text.bright_blue()),
            Token::Ident(name) if units::lookup(name).is_some() => Some(text.cyan()),
            Token::To | Token::Arrow => Some(text.magenta()),
            _ => None,
        }
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut last_end = 0;
        let mut styled = false;

        for (token, span) in Token::lexer(line).spanned() {
            let Ok(token) = token else { continue };
            let text = &line[span.clone()];
            if let Some(coloured) = Self::style(&token, text) {
                result.push_str(&line[last_end..span.start]);
                result.push_str(&coloured.to_string());
                last_end = span.end;
                styled = true;
            }
        }

        if !styled {
            return Cow::Borrowed(line);
        }
        result.push_str(&line[last_end..]);
        Cow::Owned(result)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(prompt.bold().to_string())
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Combined helper for rustyline
#[derive(Debug, Default)]
pub struct ReplHelper {
    pub highlighter: ReplHighlighter,
    pub completer: ReplCompleter,
}

impl ReplHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) {
        self.completer.set_vocabulary(vocabulary);
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = <ReplCompleter as Completer>::Candidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

impl Validator for ReplHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_borrowed() {
        let highlighter = ReplHighlighter::new();
        assert!(matches!(highlighter.highlight("foo + qux", 0), Cow::Borrowed(_)));
    }

    #[test]
    fn test_text_preserved() {
        colored::control::set_override(false);
        let highlighter = ReplHighlighter::new();
        let line = "3 km -> m  # trip";
        assert_eq!(highlighter.highlight(line, 0), line);
    }
}
