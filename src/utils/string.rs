//! String helpers for generated identifiers and markup.
//!
//! [`safe_string`] turns a human label into an identifier the way generated
//! code expects it: digits become words, everything that is not an ASCII
//! letter is dropped, and whitespace collapses into the spacer.

use crate::constants::INDENT_UNIT;

/// Case applied by [`safe_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeCase {
    /// `lower_snake` (the default for code names)
    Lower,
    /// `UPPER_SNAKE` (language keys)
    Upper,
}

/// Turn `input` into a safe identifier.
///
/// ```rust
/// use component_builder::utils::{SafeCase, safe_string};
///
/// assert_eq!(safe_string("Extra Tab", SafeCase::Lower), "extra_tab");
/// assert_eq!(safe_string("Extra Tab", SafeCase::Upper), "EXTRA_TAB");
/// assert_eq!(safe_string("Page 2", SafeCase::Lower), "page_two");
/// assert_eq!(safe_string("it's-done!", SafeCase::Lower), "itsdone");
/// ```
#[must_use]
pub fn safe_string(input: &str, case: SafeCase) -> String {
    // underscores act as word separators in the input
    let spaced = input.trim().replace('_', " ");
    let worded = replace_numbers(&spaced);

    let letters: String =
        worded.chars().filter(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace()).collect();

    let joined = letters.split_whitespace().collect::<Vec<_>>().join("_");
    match case {
        SafeCase::Lower => joined.to_ascii_lowercase(),
        SafeCase::Upper => joined.to_ascii_uppercase(),
    }
}

/// Replace every run of ASCII digits with its English words, padded with
/// spaces so the words stay separate from surrounding letters.
fn replace_numbers(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut digits = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        flush_digits(&mut digits, &mut output);
        output.push(ch);
    }
    flush_digits(&mut digits, &mut output);

    output
}

fn flush_digits(digits: &mut String, output: &mut String) {
    if digits.is_empty() {
        return;
    }
    output.push(' ');
    match digits.parse::<u64>() {
        Ok(number) => output.push_str(&number_to_words(number)),
        // too long for u64: spell each digit
        Err(_) => {
            let words: Vec<String> = digits
                .chars()
                .filter_map(|ch| ch.to_digit(10))
                .map(|digit| number_to_words(u64::from(digit)))
                .collect();
            output.push_str(&words.join(" "));
        }
    }
    output.push(' ');
    digits.clear();
}

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] =
    ["", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety"];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// English words for `number`, e.g. `112` → `one hundred twelve`.
#[must_use]
pub fn number_to_words(number: u64) -> String {
    if number < 20 {
        return ONES[number as usize].to_string();
    }

    let mut words = Vec::new();
    let mut rest = number;

    for (scale, name) in SCALES {
        if rest >= scale {
            words.push(format!("{} {name}", number_to_words(rest / scale)));
            rest %= scale;
        }
    }

    if rest >= 100 {
        words.push(format!("{} hundred", ONES[(rest / 100) as usize]));
        rest %= 100;
    }

    if rest >= 20 {
        let tens = TENS[(rest / 10) as usize];
        match rest % 10 {
            0 => words.push(tens.to_string()),
            ones => words.push(format!("{tens} {}", ONES[ones as usize])),
        }
    } else if rest > 0 {
        words.push(ONES[rest as usize].to_string());
    }

    words.join(" ")
}

/// `levels` copies of the indent unit.
#[must_use]
pub fn indent(levels: usize) -> String {
    INDENT_UNIT.repeat(levels)
}

/// Join the trimmed lines of `content`, each preceded by a newline and
/// `prefix`.
///
/// ```rust
/// use component_builder::utils::indent_lines;
///
/// assert_eq!(indent_lines("a\nb\n", "\t"), "\n\ta\n\tb");
/// ```
#[must_use]
pub fn indent_lines(content: &str, prefix: &str) -> String {
    let mut output = String::new();
    for line in content.trim().split('\n') {
        output.push('\n');
        output.push_str(prefix);
        output.push_str(line.strip_suffix('\r').unwrap_or(line));
    }
    output
}
