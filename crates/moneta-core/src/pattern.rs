//! # Pattern Compiler
//!
//! Turns a human-authored pattern into a canonical instruction list.
//!
//! ## Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Character            Meaning                                           │
//! │  ─────────            ───────                                           │
//! │  0 #                  digit placeholder (identical)                     │
//! │  <thousands>          grouping inside the digit run, ignored on input   │
//! │  <decimal>            decimal separator literal                         │
//! │  S                    currency symbol literal                           │
//! │  C                    one character of the currency code                │
//! │                       (a lone C stands for the whole code)              │
//! │  whitespace           ignored                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Compilation
//! ```text
//!   "S #,##0.00"   (decimal '.', thousands ',')
//!        │
//!        ▼  1. collapse the one digit-placeholder run
//!   "S " + [MajorDigits, DecimalSeparator, MinorDigits]
//!        │
//!        ▼  2. drop whitespace, map the remaining characters
//!   [Symbol, MajorDigits, DecimalSeparator, MinorDigits]   canonical "S0.0"
//! ```
//!
//! Exactly one digit-placeholder run is allowed. `"0.00.00"` has two and is
//! rejected, as is a pattern without any.

use std::fmt;
use std::ops::Range;

use regex::Regex;

use crate::error::{ParseError, ParseResult};

// =============================================================================
// Instructions
// =============================================================================

/// One step of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Match the currency symbol exactly.
    Symbol,
    /// Match the whole currency code (pattern has a single `C`).
    Code,
    /// Match the next character of the currency code.
    CodeChar,
    /// Match the decimal separator.
    DecimalSeparator,
    /// Read the major-unit digit run, with an optional leading `-`.
    MajorDigits,
    /// Read the minor-unit digit run.
    MinorDigits,
}

/// A pattern reduced to its instruction list.
///
/// ## Invariants
/// - Exactly one [`Instruction::MajorDigits`]
/// - At most one [`Instruction::MinorDigits`], directly after the only
///   [`Instruction::DecimalSeparator`]
/// - A decimal separator never comes before the major digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    decimal: char,
    instructions: Vec<Instruction>,
}

impl CompiledPattern {
    /// The pattern as written by the caller.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of `C` markers in the pattern.
    pub fn code_markers(&self) -> usize {
        self.instructions
            .iter()
            .map(|i| match i {
                Instruction::Code | Instruction::CodeChar => 1,
                _ => 0,
            })
            .sum()
    }

    /// Number of `S` markers in the pattern.
    pub fn symbol_markers(&self) -> usize {
        self.count(Instruction::Symbol)
    }

    /// True if the pattern reads a minor-unit field.
    pub fn has_minor_field(&self) -> bool {
        self.count(Instruction::MinorDigits) == 1
    }

    /// Canonical form, one character per instruction (`"S0.0"`, `"CCC0"`).
    ///
    /// Instruction indices reported in errors index into this string.
    pub fn canonical(&self) -> String {
        self.instructions
            .iter()
            .map(|i| match i {
                Instruction::Symbol => 'S',
                Instruction::Code | Instruction::CodeChar => 'C',
                Instruction::DecimalSeparator => self.decimal,
                Instruction::MajorDigits | Instruction::MinorDigits => '0',
            })
            .collect()
    }

    fn count(&self, wanted: Instruction) -> usize {
        self.instructions.iter().filter(|&&i| i == wanted).count()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

// =============================================================================
// Compilation
// =============================================================================

/// Compiles `pattern` for a currency using the given separators.
///
/// ## Example
/// ```rust
/// use moneta_core::pattern::{compile, Instruction};
///
/// let compiled = compile("S #,##0.00", '.', ',').unwrap();
/// assert_eq!(compiled.canonical(), "S0.0");
/// assert_eq!(
///     compiled.instructions(),
///     &[
///         Instruction::Symbol,
///         Instruction::MajorDigits,
///         Instruction::DecimalSeparator,
///         Instruction::MinorDigits,
///     ]
/// );
///
/// assert!(compile("0.00.00", '.', ',').is_err());
/// ```
pub fn compile(pattern: &str, decimal: char, thousands: char) -> ParseResult<CompiledPattern> {
    let runs = digit_run_regex(decimal, thousands)
        .map_err(|e| ParseError::invalid_pattern(pattern, e.to_string()))?;

    let found: Vec<Range<usize>> = runs
        .find_iter(pattern)
        .filter_map(|m| trim_run(pattern, m.range()))
        .collect();
    let run = match found.as_slice() {
        [run] => run.clone(),
        [] => {
            return Err(ParseError::invalid_pattern(
                pattern,
                "no digit placeholder run",
            ))
        }
        more => {
            return Err(ParseError::invalid_pattern(
                pattern,
                format!("expected one digit placeholder run, found {}", more.len()),
            ))
        }
    };

    let marker_count = pattern.chars().filter(|&c| c == 'C').count();
    let mut instructions = Vec::with_capacity(pattern.len());

    literals(pattern, &pattern[..run.start], decimal, marker_count, &mut instructions)?;
    collapse_run(pattern, &pattern[run.clone()], decimal, &mut instructions)?;
    literals(pattern, &pattern[run.end..], decimal, marker_count, &mut instructions)?;

    check_decimal_placement(pattern, &instructions)?;

    Ok(CompiledPattern {
        source: pattern.to_string(),
        decimal,
        instructions,
    })
}

/// Removes all whitespace from an input value.
///
/// Decoding is whitespace-insensitive: the pattern and the input are both
/// stripped before they meet.
pub fn normalize_input(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `[0#<thousands>]+(<decimal>[0#]+)?`
fn digit_run_regex(decimal: char, thousands: char) -> Result<Regex, regex::Error> {
    let thousands = regex::escape(&thousands.to_string());
    let decimal = regex::escape(&decimal.to_string());
    Regex::new(&format!("[0#{thousands}]+(?:{decimal}[0#]+)?"))
}

/// Narrows a match to its non-whitespace core.
///
/// A whitespace thousands separator lets the run absorb the spaces around
/// it, and a lone space between literals matches on its own.
fn trim_run(pattern: &str, range: Range<usize>) -> Option<Range<usize>> {
    let text = &pattern[range.clone()];
    let start_trimmed = text.trim_start();
    let start = range.start + (text.len() - start_trimmed.len());
    let core = start_trimmed.trim_end();
    (!core.is_empty()).then(|| start..start + core.len())
}

fn collapse_run(
    pattern: &str,
    run: &str,
    decimal: char,
    out: &mut Vec<Instruction>,
) -> ParseResult<()> {
    let (major, minor) = match run.split_once(decimal) {
        Some((major, minor)) => (major, Some(minor)),
        None => (run, None),
    };

    if !major.chars().any(|c| c == '0' || c == '#') {
        return Err(ParseError::invalid_pattern(
            pattern,
            "digit run has no placeholder before the decimal separator",
        ));
    }

    out.push(Instruction::MajorDigits);
    if minor.is_some() {
        out.push(Instruction::DecimalSeparator);
        out.push(Instruction::MinorDigits);
    }
    Ok(())
}

fn literals(
    pattern: &str,
    segment: &str,
    decimal: char,
    code_markers: usize,
    out: &mut Vec<Instruction>,
) -> ParseResult<()> {
    for c in segment.chars().filter(|c| !c.is_whitespace()) {
        let instruction = match c {
            'S' => Instruction::Symbol,
            'C' if code_markers == 1 => Instruction::Code,
            'C' => Instruction::CodeChar,
            c if c == decimal => Instruction::DecimalSeparator,
            other => {
                return Err(ParseError::invalid_pattern(
                    pattern,
                    format!("unexpected character '{}'", other),
                ))
            }
        };
        out.push(instruction);
    }
    Ok(())
}

fn check_decimal_placement(pattern: &str, instructions: &[Instruction]) -> ParseResult<()> {
    let mut decimals = instructions
        .iter()
        .enumerate()
        .filter(|&(_, &i)| i == Instruction::DecimalSeparator)
        .map(|(idx, _)| idx);

    let Some(first) = decimals.next() else {
        return Ok(());
    };
    if decimals.next().is_some() {
        return Err(ParseError::invalid_pattern(
            pattern,
            "more than one decimal separator",
        ));
    }

    let major = instructions
        .iter()
        .position(|&i| i == Instruction::MajorDigits)
        .unwrap_or(usize::MAX);
    if first < major {
        return Err(ParseError::invalid_pattern(
            pattern,
            "decimal separator before the major digits",
        ));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    fn canonical(pattern: &str) -> String {
        compile(pattern, '.', ',').unwrap().canonical()
    }

    #[test]
    fn test_collapses_placeholder_runs() {
        assert_eq!(canonical("S0.00"), "S0.0");
        assert_eq!(canonical("S#,##0.00"), "S0.0");
        assert_eq!(canonical("#,###"), "0");
        assert_eq!(canonical("CCC 0.000"), "CCC0.0");
        assert_eq!(canonical("0.00 S"), "0.0S");
    }

    #[test]
    fn test_strips_whitespace() {
        let compiled = compile("  S   0.00  ", '.', ',').unwrap();
        assert_eq!(compiled.instructions(), &[Symbol, MajorDigits, DecimalSeparator, MinorDigits]);
        assert_eq!(compiled.source(), "  S   0.00  ");
    }

    #[test]
    fn test_two_runs_rejected() {
        let err = compile("0.00.00", '.', ',').unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern { .. }));

        // Stray placeholder in a separate segment
        assert!(compile("0 S 0.00", '.', ',').is_err());
    }

    #[test]
    fn test_no_run_rejected() {
        assert!(compile("SC", '.', ',').is_err());
        assert!(compile("", '.', ',').is_err());
    }

    #[test]
    fn test_unknown_character_rejected() {
        let err = compile("S0.00X", '.', ',').unwrap_err();
        assert!(err.to_string().contains("unexpected character 'X'"));

        assert!(compile("-S0.00", '.', ',').is_err());
    }

    #[test]
    fn test_run_of_separators_only_rejected() {
        assert!(compile("S,.00", '.', ',').is_err());
    }

    #[test]
    fn test_code_markers() {
        let compiled = compile("CCC0.00", '.', ',').unwrap();
        assert_eq!(compiled.code_markers(), 3);
        assert_eq!(&compiled.instructions()[..3], &[CodeChar, CodeChar, CodeChar]);

        // A lone marker stands for the whole code
        let compiled = compile("C0.00", '.', ',').unwrap();
        assert_eq!(compiled.code_markers(), 1);
        assert_eq!(compiled.instructions()[0], Code);

        // Non-contiguous markers still consume one character each
        let compiled = compile("C S C 0", '.', ',').unwrap();
        assert_eq!(compiled.instructions(), &[CodeChar, Symbol, CodeChar, MajorDigits]);
    }

    #[test]
    fn test_swapped_separators() {
        // With '.' as thousands, "0.00" is a single major run
        let compiled = compile("S0.00", ',', '.').unwrap();
        assert_eq!(compiled.instructions(), &[Symbol, MajorDigits]);
        assert!(!compiled.has_minor_field());

        let compiled = compile("S #.##0,00", ',', '.').unwrap();
        assert_eq!(compiled.canonical(), "S0,0");
        assert!(compiled.has_minor_field());
    }

    #[test]
    fn test_space_thousands_separator() {
        let compiled = compile("# ##0,00 S", ',', ' ').unwrap();
        assert_eq!(compiled.instructions(), &[MajorDigits, DecimalSeparator, MinorDigits, Symbol]);

        let compiled = compile("S # ##0,00", ',', ' ').unwrap();
        assert_eq!(compiled.canonical(), "S0,0");

        let compiled = compile("C C C  0 000", ',', ' ').unwrap();
        assert_eq!(compiled.canonical(), "CCC0");

        // Placeholders split by a literal are still two runs
        assert!(compile("0 S 0,00", ',', ' ').is_err());
    }

    #[test]
    fn test_trailing_decimal_literal() {
        let compiled = compile("S0.", '.', ',').unwrap();
        assert_eq!(compiled.instructions(), &[Symbol, MajorDigits, DecimalSeparator]);
    }

    #[test]
    fn test_misplaced_decimal_rejected() {
        assert!(compile(".0", '.', ',').is_err());
        assert!(compile("S0.00.", '.', ',').is_err());
    }

    #[test]
    fn test_regex_metacharacter_separators() {
        let compiled = compile("S0*00", '*', '|').unwrap();
        assert_eq!(compiled.canonical(), "S0*0");

        let compiled = compile("0|000", '*', '|').unwrap();
        assert_eq!(compiled.instructions(), &[MajorDigits]);
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input(" $ 1,234 . 56 "), "$1,234.56");
        assert_eq!(normalize_input("\t1\n2"), "12");
    }
}
