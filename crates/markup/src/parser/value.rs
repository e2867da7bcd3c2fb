//! Payload parsers for tags that carry numbers.

use std::num::NonZeroUsize;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize, value},
    sequence::{pair, tuple},
};

use crate::element::{Extent, ExtentUnit, FontSelector};

/// Parse a signed integer or decimal number.
fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(alt((char('-'), char('+')))),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn parse_unit(input: &str) -> IResult<&str, ExtentUnit> {
    alt((
        value(ExtentUnit::Pixel, tag("px")),
        value(ExtentUnit::Point, tag("pt")),
    ))(input)
}

fn parse_index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// Parse the value of an `O` tag: `5`, `-3px`, `2.5pt`.
pub fn parse_extent(input: &str) -> Option<Extent> {
    let (_, (number, unit)) = all_consuming(pair(parse_number, opt(parse_unit)))(input).ok()?;
    Some(Extent {
        value: number,
        unit: unit.unwrap_or_default(),
    })
}

/// Parse the value of a `T` tag. `-`, the empty string and `0` select the
/// default font.
pub fn parse_font(input: &str) -> Option<FontSelector> {
    if input.is_empty() || input == "-" {
        return Some(FontSelector::Default);
    }
    let (_, index) = all_consuming(parse_index)(input).ok()?;
    Some(NonZeroUsize::new(index).map_or(FontSelector::Default, FontSelector::Index))
}
