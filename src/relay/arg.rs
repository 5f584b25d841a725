//! Canonical text conversion for relay arguments
//!
//! Every value passed to the relay is rendered through [`MessageArg`].
//! Scalars render as their plain text, sequences and ranges render as a
//! bracketed listing of their elements.

use std::collections::VecDeque;
use std::ops::{Range, RangeInclusive};

/// A value that can appear in a relayed message
pub trait MessageArg {
    /// Append the canonical text of this value to `out`
    fn write_text(&self, out: &mut String);

    /// Append the text used when this value is an element of a listing.
    ///
    /// Equal to [`MessageArg::write_text`] except for text, which is quoted
    /// so that `["a b", "c"]` stays distinguishable from `["a", "b c"]`.
    fn write_nested(&self, out: &mut String) {
        self.write_text(out);
    }

    /// Render this value on its own
    fn to_message_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

/// Write `[a, b, c]` using the nested form of each element
fn write_list<I>(out: &mut String, items: I)
where
    I: IntoIterator,
    I::Item: MessageArg,
{
    out.push('[');
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.write_nested(out);
    }
    out.push(']');
}

macro_rules! display_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MessageArg for $ty {
                fn write_text(&self, out: &mut String) {
                    out.push_str(&self.to_string());
                }
            }
        )*
    };
}

display_arg!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl MessageArg for str {
    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }

    fn write_nested(&self, out: &mut String) {
        out.push_str(&format!("{self:?}"));
    }
}

impl MessageArg for String {
    fn write_text(&self, out: &mut String) {
        self.as_str().write_text(out);
    }

    fn write_nested(&self, out: &mut String) {
        self.as_str().write_nested(out);
    }
}

impl<T: MessageArg + ?Sized> MessageArg for &T {
    fn write_text(&self, out: &mut String) {
        (**self).write_text(out);
    }

    fn write_nested(&self, out: &mut String) {
        (**self).write_nested(out);
    }
}

impl<T: MessageArg + ?Sized> MessageArg for Box<T> {
    fn write_text(&self, out: &mut String) {
        (**self).write_text(out);
    }

    fn write_nested(&self, out: &mut String) {
        (**self).write_nested(out);
    }
}

impl<T: MessageArg> MessageArg for Option<T> {
    fn write_text(&self, out: &mut String) {
        match self {
            Some(value) => value.write_text(out),
            None => out.push_str("None"),
        }
    }

    fn write_nested(&self, out: &mut String) {
        match self {
            Some(value) => value.write_nested(out),
            None => out.push_str("None"),
        }
    }
}

impl<T: MessageArg> MessageArg for [T] {
    fn write_text(&self, out: &mut String) {
        write_list(out, self);
    }
}

impl<T: MessageArg, const N: usize> MessageArg for [T; N] {
    fn write_text(&self, out: &mut String) {
        write_list(out, self);
    }
}

impl<T: MessageArg> MessageArg for Vec<T> {
    fn write_text(&self, out: &mut String) {
        write_list(out, self);
    }
}

impl<T: MessageArg> MessageArg for VecDeque<T> {
    fn write_text(&self, out: &mut String) {
        write_list(out, self);
    }
}

impl<T> MessageArg for Range<T>
where
    T: MessageArg,
    Range<T>: Iterator<Item = T> + Clone,
{
    fn write_text(&self, out: &mut String) {
        write_list(out, self.clone());
    }
}

impl<T> MessageArg for RangeInclusive<T>
where
    T: MessageArg,
    RangeInclusive<T>: Iterator<Item = T> + Clone,
{
    fn write_text(&self, out: &mut String) {
        write_list(out, self.clone());
    }
}
