/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::{ParseError, ParseErrorKind};
use crate::oper::AffineTransform;

use crysym_array_types::{V3, M3};

type KindResult<T> = Result<T, ParseErrorKind>;

pub(crate) fn parse_transform(text: &str) -> Result<AffineTransform, ParseError>
{
    let result = match text.contains(',') {
        true => parse_algebraic(text),
        false => parse_numeric(text),
    };
    result.map_err(|kind| ParseError { text: text.to_string(), kind })
}

// "-x+1/2,y+1/2,-z"
fn parse_algebraic(text: &str) -> KindResult<AffineTransform>
{Ok({
    let rows = text.split(',').collect::<Vec<_>>();
    if rows.len() != 3 {
        return Err(ParseErrorKind::RowCount(rows.len()));
    }

    let mut rot = [V3::zero(); 3];
    let mut trans = V3::zero();
    for (r, row) in rows.iter().enumerate() {
        let (coefs, offset) = parse_row(row)?;
        rot[r] = coefs;
        trans[r] = offset;
    }
    AffineTransform::new(M3(rot), trans)
})}

// "m00 m01 m02 m10 ... m22 t0 t1 t2", optionally followed by 4 more numbers
fn parse_numeric(text: &str) -> KindResult<AffineTransform>
{Ok({
    if text.chars().any(|c| axis_index(c).is_some()) {
        return Err(ParseErrorKind::RowCount(1));
    }

    let values = text.split_whitespace().map(parse_float).collect::<KindResult<Vec<_>>>()?;
    match values.len() {
        12 | 16 => {},
        n => return Err(ParseErrorKind::NumberCount(n)),
    }

    let rot = M3([
        V3([values[0], values[1], values[2]]),
        V3([values[3], values[4], values[5]]),
        V3([values[6], values[7], values[8]]),
    ]);
    AffineTransform::new(rot, V3([values[9], values[10], values[11]]))
})}

fn parse_row(row: &str) -> KindResult<(V3, f64)>
{
    let row = row.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    if row.is_empty() {
        return Err(ParseErrorKind::EmptyTerm);
    }

    let mut coefs = V3::zero();
    let mut offset = 0.0;
    for term in split_terms(&row) {
        let (sign, body) = match term.as_bytes()[0] {
            b'-' => (-1.0, &term[1..]),
            b'+' => (1.0, &term[1..]),
            _ => (1.0, term),
        };
        if body.is_empty() {
            return Err(ParseErrorKind::EmptyTerm);
        }

        match body.chars().last().and_then(axis_index) {
            Some(axis) => {
                let coef = body[..body.len() - 1].trim_end_matches('*');
                let coef = match coef {
                    "" => 1.0,
                    _ => parse_number(coef)?,
                };
                coefs[axis] += sign * coef;
            },
            None => offset += sign * parse_number(body)?,
        }
    }
    if !(coefs.iter().all(|x: &f64| x.is_finite()) && offset.is_finite()) {
        return Err(ParseErrorKind::BadNumber(row));
    }
    Ok((coefs, offset))
}

/// Split before each `+` or `-` that is not part of an exponent.
fn split_terms(row: &str) -> Vec<&str>
{
    let bytes = row.as_bytes();
    let is_exponent_sign = |i: usize| {
        i >= 2
        && (bytes[i - 1] == b'e' || bytes[i - 1] == b'E')
        && (bytes[i - 2].is_ascii_digit() || bytes[i - 2] == b'.')
    };

    let mut out = vec![];
    let mut start = 0;
    for (i, c) in row.char_indices() {
        if i > start && (c == '+' || c == '-') && !is_exponent_sign(i) {
            out.push(&row[start..i]);
            start = i;
        }
    }
    out.push(&row[start..]);
    out
}

fn axis_index(c: char) -> Option<usize>
{
    match c {
        'x' | 'X' => Some(0),
        'y' | 'Y' => Some(1),
        'z' | 'Z' => Some(2),
        _ => None,
    }
}

// "1/2", "0.25", "3"
fn parse_number(s: &str) -> KindResult<f64>
{
    if s.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return Err(ParseErrorKind::UnknownToken(s.to_string()));
    }
    match s.find('/') {
        None => parse_float(s),
        Some(i) => {
            let numer = parse_float(&s[..i])?;
            let denom = parse_float(&s[i + 1..])?;
            if denom == 0.0 {
                return Err(ParseErrorKind::ZeroDenominator(s.to_string()));
            }
            match numer / denom {
                x if x.is_finite() => Ok(x),
                _ => Err(ParseErrorKind::BadNumber(s.to_string())),
            }
        },
    }
}

// NaN, infinities and overflowing literals are all rejected.
fn parse_float(s: &str) -> KindResult<f64>
{
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(ParseErrorKind::BadNumber(s.to_string())),
    }
}
