//! Word scanner
//!
//! Splits raw text into words and punctuation with a three-state machine
//! over Unicode scalar values. A single `.` or `-` stays inside the word it
//! appears in (`e.g.`, `self-conscious`); a repeated one (`...`, `--`) is
//! split off as its own token.

use crate::domain::token::Token;

/// Characters that can never start a word
fn is_non_word_start(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '(' | '"' | '`' | '{' | '[' | ':' | ';' | '&' | '#' | '*' | '@' | ')' | '}' | ']'
                | '-' | ','
        )
}

/// Punctuation that always forms a one-character token
pub(crate) fn is_isolated_punct(ch: char) -> bool {
    matches!(
        ch,
        '?' | '!' | ')' | '"' | ';' | '}' | ']' | '*' | ':' | '@' | '\'' | '(' | '{' | '[' | ','
    )
}

/// Punctuation that is split off only when repeated
fn is_run_punct(ch: char) -> bool {
    matches!(ch, '.' | '-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    None,
    Word,
    Punct,
}

/// Split `text` into word and punctuation substrings
pub fn scan(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut state = ScanState::None;
    let mut start = 0;
    let mut previous: Option<char> = None;

    for (i, ch) in text.char_indices() {
        let end = i + ch.len_utf8();

        match state {
            ScanState::None => {
                if !is_non_word_start(ch) || is_run_punct(ch) {
                    state = ScanState::Word;
                    start = i;
                } else if !ch.is_whitespace() {
                    words.push(&text[i..end]);
                }
            }
            ScanState::Word => {
                if is_run_punct(ch) {
                    if previous == Some(ch) {
                        // The repeated char is ASCII, so it starts one byte back
                        let run_start = i - 1;
                        if start < run_start {
                            words.push(&text[start..run_start]);
                        }
                        state = ScanState::Punct;
                        start = run_start;
                    }
                } else if is_isolated_punct(ch) || ch.is_whitespace() {
                    words.push(&text[start..i]);
                    state = ScanState::None;
                    if is_isolated_punct(ch) {
                        words.push(&text[i..end]);
                    }
                }
            }
            ScanState::Punct => {
                if !is_run_punct(ch) {
                    words.push(&text[start..i]);
                    if !is_non_word_start(ch) {
                        state = ScanState::Word;
                        start = i;
                    } else {
                        if !ch.is_whitespace() {
                            words.push(&text[i..end]);
                        }
                        state = ScanState::None;
                    }
                }
            }
        }

        previous = Some(ch);
    }

    if state != ScanState::None {
        words.push(&text[start..]);
    }

    words
}

/// Tokenize `text` line by line
///
/// The first token of every line is flagged as a line start; the first token
/// after one or more blank lines is also flagged as a paragraph start.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut paragraph_start = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            paragraph_start = true;
            continue;
        }

        for (j, word) in scan(line).into_iter().enumerate() {
            let mut token = Token::new(word);
            if j == 0 {
                token.set_line_start(true);
                token.set_paragraph_start(paragraph_start);
                paragraph_start = false;
            }
            tokens.push(token);
        }
    }

    tokens
}
