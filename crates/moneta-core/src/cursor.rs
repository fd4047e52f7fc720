//! # Scan Cursor
//!
//! A forward-only cursor over whitespace-stripped input.
//!
//! The decoder reasons in terms of "take a literal" and "take digits"; every
//! bounds check lives here.
//!
//! ```text
//!   input:  $ 1 , 2 3 4 . 5 6
//!           ▲
//!           index (only ever increases)
//!
//!   take_n(1)            → "$"
//!   take_digit_run(',')  → "1234"   (separator consumed, not returned)
//!   take_one()           → '.'
//!   take_digit_run(',')  → "56"
//! ```

use crate::error::{ParseError, ParseResult};

/// Cursor owned by a single decode call.
#[derive(Debug, Clone)]
pub struct ScanCursor {
    chars: Vec<char>,
    index: usize,
}

impl ScanCursor {
    /// Creates a cursor at the start of `input`.
    ///
    /// The input is taken as-is; callers strip whitespace beforehand.
    pub fn new(input: &str) -> Self {
        ScanCursor {
            chars: input.chars().collect(),
            index: 0,
        }
    }

    /// Current character index.
    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }

    /// True once every character has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// The unconsumed tail of the input.
    pub fn remaining(&self) -> String {
        self.chars.iter().skip(self.index).collect()
    }

    /// Returns the current character without advancing.
    pub fn peek(&self) -> ParseResult<char> {
        self.chars
            .get(self.index)
            .copied()
            .ok_or(ParseError::OutOfInput {
                input_index: self.index,
            })
    }

    /// Returns the current character and advances by one.
    pub fn take_one(&mut self) -> ParseResult<char> {
        let c = self.peek()?;
        self.index += 1;
        Ok(c)
    }

    /// Returns up to `n` characters and advances by `n`.
    ///
    /// The result is clipped to what is left; the index still moves by the
    /// full `n`, so a short read leaves the cursor at the end.
    pub fn take_n(&mut self, n: usize) -> String {
        let taken = self.chars.iter().skip(self.index).take(n).collect();
        self.index = self.index.saturating_add(n);
        taken
    }

    /// Consumes a run of ASCII digits and `thousands` separators.
    ///
    /// Separators are consumed but left out of the result. Stops at the first
    /// other character or at the end of input. Fails with
    /// [`ParseError::DigitExpected`] when the run holds no digit.
    pub fn take_digit_run(&mut self, thousands: char) -> ParseResult<String> {
        let start = self.index;
        let mut digits = String::new();

        while let Some(&c) = self.chars.get(self.index) {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c != thousands {
                break;
            }
            self.index += 1;
        }

        if digits.is_empty() {
            return Err(ParseError::DigitExpected { input_index: start });
        }

        Ok(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_take_one() {
        let mut cursor = ScanCursor::new("$1");
        assert_eq!(cursor.peek().unwrap(), '$');
        assert_eq!(cursor.take_one().unwrap(), '$');
        assert_eq!(cursor.take_one().unwrap(), '1');
        assert!(cursor.is_at_end());
        assert_eq!(
            cursor.peek().unwrap_err(),
            ParseError::OutOfInput { input_index: 2 }
        );
        assert!(cursor.take_one().is_err());
    }

    #[test]
    fn test_take_n_clips() {
        let mut cursor = ScanCursor::new("US");
        assert_eq!(cursor.take_n(3), "US");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.take_n(2), "");
    }

    #[test]
    fn test_take_n_multibyte() {
        let mut cursor = ScanCursor::new("€12");
        assert_eq!(cursor.take_n(1), "€");
        assert_eq!(cursor.remaining(), "12");
    }

    #[test]
    fn test_digit_run_discards_separators() {
        let mut cursor = ScanCursor::new("1,234,567.89");
        assert_eq!(cursor.take_digit_run(',').unwrap(), "1234567");
        assert_eq!(cursor.peek().unwrap(), '.');
    }

    #[test]
    fn test_digit_run_stops_at_end() {
        let mut cursor = ScanCursor::new("42");
        assert_eq!(cursor.take_digit_run(',').unwrap(), "42");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_digit_run_requires_a_digit() {
        let mut cursor = ScanCursor::new("USD");
        assert_eq!(
            cursor.take_digit_run(',').unwrap_err(),
            ParseError::DigitExpected { input_index: 0 }
        );

        // Separators alone do not count
        let mut cursor = ScanCursor::new(",,.");
        assert!(cursor.take_digit_run(',').is_err());

        let mut cursor = ScanCursor::new("");
        assert!(cursor.take_digit_run(',').is_err());
    }

    #[test]
    fn test_digit_run_leading_separator() {
        let mut cursor = ScanCursor::new(",5");
        assert_eq!(cursor.take_digit_run(',').unwrap(), "5");
    }
}
