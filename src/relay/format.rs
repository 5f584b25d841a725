//! Message formatting
//!
//! Joins the canonical text of each argument with a fixed [`Separator`].

use serde::{Deserialize, Serialize};

use super::arg::MessageArg;

/// Text placed between consecutive arguments of a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Separator {
    /// Arguments are concatenated directly
    None,
    /// One space between arguments
    #[default]
    Space,
    /// Two spaces between arguments
    DoubleSpace,
    /// Any other fixed text
    Custom(String),
}

impl Separator {
    /// The literal text inserted between arguments
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::Space => " ",
            Self::DoubleSpace => "  ",
            Self::Custom(text) => text,
        }
    }

    /// Parse a separator name as used on the command line.
    ///
    /// Accepts `none`, `space`, `double-space`; anything else is taken
    /// literally as a custom separator.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "none" => Self::None,
            "space" => Self::Space,
            "double-space" => Self::DoubleSpace,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Format `args` into one message, in call order, joined by `separator`.
///
/// Zero arguments produce an empty string.
#[must_use]
pub fn format_message(args: &[&dyn MessageArg], separator: &Separator) -> String {
    let sep = separator.as_str();
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        arg.write_text(&mut out);
    }
    out
}

/// Concatenate `args` with no separator
#[must_use]
pub fn concat(args: &[&dyn MessageArg]) -> String {
    format_message(args, &Separator::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_space() {
        let msg = format_message(&[&"Hello number:", &4711_i32], &Separator::Space);
        assert_eq!(msg, "Hello number: 4711");
    }

    #[test]
    fn test_double_space_with_range() {
        let msg = format_message(&[&"Show a range", &(3_i32..11)], &Separator::DoubleSpace);
        assert_eq!(msg, "Show a range  [3, 4, 5, 6, 7, 8, 9, 10]");
    }

    #[test]
    fn test_empty_argument_list() {
        assert_eq!(format_message(&[], &Separator::DoubleSpace), "");
        assert_eq!(concat(&[]), "");
    }

    #[test]
    fn test_concat_has_no_separator() {
        assert_eq!(concat(&[&"a", &1_i32, &'b', &2.5_f64]), "a1b2.5");
    }

    #[test]
    fn test_custom_separator() {
        let sep = Separator::Custom(" | ".to_string());
        assert_eq!(format_message(&[&"x", &"y", &"z"], &sep), "x | y | z");
    }

    #[test]
    fn test_every_argument_appears_once_in_order() {
        let msg = format_message(&[&"first", &2_u8, &"third"], &Separator::Space);
        let parts: Vec<&str> = msg.split(' ').collect();
        assert_eq!(parts, vec!["first", "2", "third"]);
    }

    #[test]
    fn test_large_number_has_no_grouping() {
        let msg = format_message(&[&1_000_000_i64], &Separator::Space);
        assert_eq!(msg, "1000000");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Separator::from_name("none"), Separator::None);
        assert_eq!(Separator::from_name("space"), Separator::Space);
        assert_eq!(Separator::from_name("double-space"), Separator::DoubleSpace);
        assert_eq!(
            Separator::from_name(", "),
            Separator::Custom(", ".to_string())
        );
    }

    #[test]
    fn test_default_is_single_space() {
        assert_eq!(Separator::default().as_str(), " ");
    }
}
