//! Registry mapping property identifiers to prompts, error messages,
//! validators and the target type their input is coerced to.
//!
//! Validators take `Option<&str>` so an absent line (end of input) is just
//! another invalid value; they never panic. Each coercion in
//! [`PropertyValue`] accepts exactly what its matching validator accepts.

use std::ops::RangeInclusive;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::model::song::RATING_RANGE;
use crate::model::{format_timestamp, parse_timestamp};

/// A predicate over one line of raw user input.
pub type Validator = fn(Option<&str>) -> bool;

/// The scalar type a property's input is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Boolean,
    Timestamp,
    List,
}

/// Everything the input pipeline needs to know about one property.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub name: &'static str,
    label: &'static str,
    pub error: &'static str,

    /// `None` for properties whose valid values depend on live state, such
    /// as collection indices; callers must supply their own validator.
    pub validator: Option<Validator>,

    pub kind: ValueKind,

    /// Whether the prompt shows the previous value as a hint.
    hint_old: bool,
}

impl PropertySpec {
    /// Prompt text, with the previous value in parentheses when one exists.
    pub fn prompt(&self, old: Option<&str>) -> String {
        match old {
            Some(old) if self.hint_old => format!("{} ({old}): ", self.label),
            _ => format!("{}: ", self.label),
        }
    }
}

const fn define(
    name: &'static str,
    label: &'static str,
    error: &'static str,
    validator: Option<Validator>,
    kind: ValueKind,
    hint_old: bool,
) -> PropertySpec {
    PropertySpec {
        name,
        label,
        error,
        validator,
        kind,
        hint_old,
    }
}

const TIMESTAMP_ERROR_SONG_UPDATED: &str =
    "Error: song updated at was invalid. Please enter a valid date and time (e.g. 2023-03-09T11:30:00)";
const TIMESTAMP_ERROR_SONG_CREATED: &str =
    "Error: song created at was invalid. Please enter a valid date and time (e.g. 2023-03-09T11:30:00)";

const PROPERTIES: &[PropertySpec] = &[
    define(
        "songTitle",
        "Enter song title",
        "Error: song title was invalid. Please enter a string",
        Some(string_is_valid),
        ValueKind::Text,
        true,
    ),
    define(
        "songRating",
        "Enter song rating (1-low, 2, 3, 4, 5-high)",
        "Error: song rating was invalid. Please enter an integer between 1 and 5",
        Some(rating_is_valid),
        ValueKind::Integer,
        true,
    ),
    define(
        "songCategory",
        "Enter song category",
        "Error: song category was invalid. Please enter a string",
        Some(string_is_valid),
        ValueKind::Text,
        true,
    ),
    define(
        "isSongExplicit",
        "Enter song explicit status (y/n)",
        "Error: song explicit status was invalid. Please enter either 'y' or 'n'",
        Some(yes_no_is_valid),
        ValueKind::Boolean,
        true,
    ),
    define(
        "updatedAt",
        "Enter song updated at (e.g. 2023-03-09T11:30:00)",
        TIMESTAMP_ERROR_SONG_UPDATED,
        Some(timestamp_is_valid),
        ValueKind::Timestamp,
        true,
    ),
    define(
        "createdAt",
        "Enter song created at (e.g. 2023-03-09T11:30:00)",
        TIMESTAMP_ERROR_SONG_CREATED,
        Some(timestamp_is_valid),
        ValueKind::Timestamp,
        true,
    ),
    define(
        "staleDays",
        "Show songs that haven't been updated in this many days",
        "Error: invalid number of days. Please enter a valid positive integer.",
        Some(stale_days_is_valid),
        ValueKind::Integer,
        false,
    ),
    define(
        "songIndex",
        "Enter song index",
        "Error: invalid song index. Please enter one of the listed indices.",
        None,
        ValueKind::Integer,
        false,
    ),
    define(
        "artistName",
        "Enter artist name",
        "Error: artist name was invalid. Please enter a string",
        Some(string_is_valid),
        ValueKind::Text,
        true,
    ),
    define(
        "artistFoundedDate",
        "Enter artist founded date (e.g. 1973-02-14T10:30:00)",
        "Error: artist founded date was invalid. Please enter a valid date and time (e.g. 1973-02-14T10:30:00)",
        Some(timestamp_is_valid),
        ValueKind::Timestamp,
        true,
    ),
    define(
        "artistGenres",
        "Enter artist genres, separated by commas (e.g. Rock,Pop)",
        "Error: artist genres were invalid. Please enter one or more genres separated by commas",
        Some(list_is_valid),
        ValueKind::List,
        true,
    ),
    define(
        "artistGenre",
        "Enter genre",
        "Error: genre was invalid. Please enter a string",
        Some(string_is_valid),
        ValueKind::Text,
        false,
    ),
    define(
        "artistIndex",
        "Enter artist index",
        "Error: invalid artist index. Please enter one of the listed indices.",
        None,
        ValueKind::Integer,
        false,
    ),
    define(
        "yesNo",
        "Enter y or n",
        "Error: invalid input. Please enter either 'y' or 'n'.",
        Some(yes_no_is_valid),
        ValueKind::Boolean,
        false,
    ),
];

/// Look up a property by identifier.
pub fn lookup(name: &str) -> Result<&'static PropertySpec> {
    PROPERTIES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::UnknownProperty(name.to_string()))
}

pub fn prompt_for(name: &str, old: Option<&str>) -> Result<String> {
    lookup(name).map(|p| p.prompt(old))
}

pub fn error_for(name: &str) -> Result<&'static str> {
    lookup(name).map(|p| p.error)
}

/// The registered validator for `name`.
///
/// Index properties have none; asking for one is a programming error.
pub fn validator_for(name: &str) -> Result<Validator> {
    lookup(name)?.validator.ok_or_else(|| {
        Error::InvariantViolation(format!("property {name} needs a caller-supplied validator"))
    })
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

pub fn string_is_valid(input: Option<&str>) -> bool {
    input.is_some_and(|s| !s.trim().is_empty())
}

pub fn int_is_valid(input: Option<&str>) -> bool {
    parse_int(input).is_some()
}

/// Composes [`int_is_valid`] with an inclusive range check.
pub fn int_in_range(input: Option<&str>, range: RangeInclusive<i64>) -> bool {
    parse_int(input).is_some_and(|n| range.contains(&n))
}

pub fn rating_is_valid(input: Option<&str>) -> bool {
    int_in_range(
        input,
        i64::from(*RATING_RANGE.start())..=i64::from(*RATING_RANGE.end()),
    )
}

pub fn stale_days_is_valid(input: Option<&str>) -> bool {
    int_in_range(input, 0..=i64::from(u32::MAX))
}

pub fn yes_no_is_valid(input: Option<&str>) -> bool {
    parse_yes_no(input).is_some()
}

pub fn timestamp_is_valid(input: Option<&str>) -> bool {
    string_is_valid(input) && input.and_then(parse_timestamp).is_some()
}

pub fn list_is_valid(input: Option<&str>) -> bool {
    input.and_then(parse_list).is_some()
}

/// Accepts a decimal index strictly below `len`.
pub fn index_is_valid(input: Option<&str>, len: usize) -> bool {
    parse_int(input)
        .and_then(|n| usize::try_from(n).ok())
        .is_some_and(|n| n < len)
}

fn parse_int(input: Option<&str>) -> Option<i64> {
    input.and_then(|s| s.parse().ok())
}

fn parse_yes_no(input: Option<&str>) -> Option<bool> {
    match input?.chars().next()?.to_ascii_lowercase() {
        'y' => Some(true),
        'n' => Some(false),
        _ => None,
    }
}

/// Comma-separated, trimmed, no empty token anywhere (including trailing).
fn parse_list(input: &str) -> Option<Vec<String>> {
    if !string_is_valid(Some(input)) {
        return None;
    }
    input
        .split(',')
        .map(str::trim)
        .map(|token| (!token.is_empty()).then(|| token.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Coercions
// ---------------------------------------------------------------------------

/// A type a validated input line can be coerced to, and rendered back from
/// for the "keep previous value" substitution.
pub trait PropertyValue: Sized {
    const KIND: ValueKind;

    /// Convert validated input. `None` means the validator and this
    /// coercion have drifted apart.
    fn coerce(input: &str) -> Option<Self>;

    /// Canonical input form; `coerce(&v.to_input())` yields `v` back.
    fn to_input(&self) -> String;
}

impl PropertyValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn coerce(input: &str) -> Option<Self> {
        Some(input.trim().to_string())
    }

    fn to_input(&self) -> String {
        self.clone()
    }
}

macro_rules! integer_property {
    ($($ty:ty),*) => {
        $(
            impl PropertyValue for $ty {
                const KIND: ValueKind = ValueKind::Integer;

                fn coerce(input: &str) -> Option<Self> {
                    input.parse().ok()
                }

                fn to_input(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_property!(i64, u8, u32, usize);

impl PropertyValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn coerce(input: &str) -> Option<Self> {
        parse_yes_no(Some(input))
    }

    fn to_input(&self) -> String {
        String::from(if *self { "y" } else { "n" })
    }
}

impl PropertyValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn coerce(input: &str) -> Option<Self> {
        parse_timestamp(input)
    }

    fn to_input(&self) -> String {
        format_timestamp(self)
    }
}

impl PropertyValue for Vec<String> {
    const KIND: ValueKind = ValueKind::List;

    fn coerce(input: &str) -> Option<Self> {
        parse_list(input)
    }

    fn to_input(&self) -> String {
        self.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_valid() {
        assert!(string_is_valid(Some("valid string")));
        assert!(!string_is_valid(None));
        assert!(!string_is_valid(Some("")));
        assert!(!string_is_valid(Some("   ")));
    }

    #[test]
    fn test_int_is_valid() {
        assert!(int_is_valid(Some("1")));
        assert!(int_is_valid(Some("-7")));
        assert!(!int_is_valid(None));
        assert!(!int_is_valid(Some("")));
        assert!(!int_is_valid(Some("a")));
        assert!(!int_is_valid(Some("1.1")));
    }

    #[test]
    fn test_rating_accepts_exactly_one_to_five() {
        for ok in ["1", "2", "3", "4", "5"] {
            assert!(rating_is_valid(Some(ok)), "{ok} should be accepted");
        }
        for bad in ["0", "6", "3.5", "", "-1", "five"] {
            assert!(!rating_is_valid(Some(bad)), "{bad} should be rejected");
        }
        assert!(!rating_is_valid(None));
    }

    #[test]
    fn test_yes_no_is_valid() {
        assert!(yes_no_is_valid(Some("y")));
        assert!(yes_no_is_valid(Some("Y")));
        assert!(yes_no_is_valid(Some("n")));
        assert!(yes_no_is_valid(Some("No thanks")));
        assert!(!yes_no_is_valid(None));
        assert!(!yes_no_is_valid(Some("")));
        assert!(!yes_no_is_valid(Some("invalid")));
    }

    #[test]
    fn test_timestamp_is_valid() {
        assert!(timestamp_is_valid(Some("2023-03-09T11:30:00")));
        assert!(timestamp_is_valid(Some("2023-03-09T11:30")));
        assert!(!timestamp_is_valid(None));
        assert!(!timestamp_is_valid(Some("")));
        assert!(!timestamp_is_valid(Some("2023-03-09 11:30:00")));
    }

    #[test]
    fn test_stale_days_is_valid() {
        assert!(stale_days_is_valid(Some("0")));
        assert!(stale_days_is_valid(Some("1")));
        assert!(!stale_days_is_valid(Some("-1")));
        assert!(!stale_days_is_valid(None));
    }

    #[test]
    fn test_list_is_valid() {
        assert!(list_is_valid(Some("Rock")));
        assert!(list_is_valid(Some("Rock, Pop ,Funk")));
        assert!(!list_is_valid(Some("Rock,")));
        assert!(!list_is_valid(Some("Rock,,Pop")));
        assert!(!list_is_valid(Some(" ")));
        assert!(!list_is_valid(None));
    }

    #[test]
    fn test_index_is_valid() {
        assert!(index_is_valid(Some("0"), 3));
        assert!(index_is_valid(Some("2"), 3));
        assert!(!index_is_valid(Some("3"), 3));
        assert!(!index_is_valid(Some("-1"), 3));
        assert!(!index_is_valid(Some("0"), 0));
        assert!(!index_is_valid(None, 3));
    }

    #[test]
    fn test_prompt_for() {
        assert_eq!(prompt_for("songTitle", None).unwrap(), "Enter song title: ");
        assert_eq!(
            prompt_for("songTitle", Some("OldTitle")).unwrap(),
            "Enter song title (OldTitle): "
        );
        assert_eq!(
            prompt_for("songRating", None).unwrap(),
            "Enter song rating (1-low, 2, 3, 4, 5-high): "
        );
        assert!(matches!(
            prompt_for("invalidPropertyName", None),
            Err(Error::UnknownProperty(_))
        ));
    }

    #[test]
    fn test_stale_days_prompt_has_no_hint() {
        assert_eq!(
            prompt_for("staleDays", Some("7")).unwrap(),
            "Show songs that haven't been updated in this many days: "
        );
    }

    #[test]
    fn test_error_for() {
        assert_eq!(
            error_for("songTitle").unwrap(),
            "Error: song title was invalid. Please enter a string"
        );
        assert_eq!(
            error_for("staleDays").unwrap(),
            "Error: invalid number of days. Please enter a valid positive integer."
        );
        assert!(error_for("invalidPropertyName").is_err());
    }

    #[test]
    fn test_validator_for() {
        let validator = validator_for("songRating").unwrap();
        assert!(validator(Some("3")));
        assert!(!validator(Some("6")));

        assert!(matches!(
            validator_for("songIndex"),
            Err(Error::InvariantViolation(_))
        ));
        assert!(matches!(
            validator_for("invalidPropertyName"),
            Err(Error::UnknownProperty(_))
        ));
    }

    #[test]
    fn test_every_registered_validator_agrees_with_its_coercion() {
        let samples = [
            "x", "3", "0", "-1", "y", "N", "2023-03-09T11:30", "Rock,Pop", "  ",
        ];
        for property in PROPERTIES {
            let Some(validator) = property.validator else {
                continue;
            };
            for sample in samples {
                if !validator(Some(sample)) {
                    continue;
                }
                let coerced = match property.kind {
                    ValueKind::Text => String::coerce(sample).is_some(),
                    ValueKind::Integer => i64::coerce(sample).is_some(),
                    ValueKind::Boolean => bool::coerce(sample).is_some(),
                    ValueKind::Timestamp => NaiveDateTime::coerce(sample).is_some(),
                    ValueKind::List => Vec::<String>::coerce(sample).is_some(),
                };
                assert!(coerced, "{} accepted {sample:?} but coercion failed", property.name);
            }
        }
    }

    #[test]
    fn test_coercions() {
        assert_eq!(String::coerce("  Smooth "), Some("Smooth".to_string()));
        assert_eq!(u8::coerce("5"), Some(5));
        assert_eq!(bool::coerce("Yes"), Some(true));
        assert_eq!(bool::coerce("n"), Some(false));
        assert_eq!(
            Vec::<String>::coerce("Rock, Pop"),
            Some(vec!["Rock".to_string(), "Pop".to_string()])
        );
    }

    #[test]
    fn test_to_input_is_accepted_back() {
        assert!(yes_no_is_valid(Some(&true.to_input())));
        assert!(yes_no_is_valid(Some(&false.to_input())));

        let ts = parse_timestamp("2023-03-09T11:30:15.125").unwrap();
        assert_eq!(NaiveDateTime::coerce(&ts.to_input()), Some(ts));

        let genres = vec!["Hip Hop".to_string(), "Rap".to_string()];
        assert_eq!(Vec::<String>::coerce(&genres.to_input()), Some(genres));
    }
}
