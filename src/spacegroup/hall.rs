/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Expansion of Hall symbols (S. R. Hall, Acta Cryst. A37, 517 (1981)).
//!
//! A symbol reads `[-]L N[screw][axis][translations] ... [(vx vy vz)]`.
//! Everything is done in integer arithmetic; translations and the origin
//! shift are in twelfths.

use crate::errors::{HallParseError, HallErrorKind};
use crate::group::generate_finite_group;
use crate::oper::SeitzOp;

use crysym_array_types::{V3, M33, mat};

type KindResult<T> = Result<T, HallErrorKind>;

/// Order of the largest space groups (Fm-3m and friends).
const MAX_ORDER: usize = 192;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Axis { X, Y, Z, Prime, DoublePrime, Star }

/// One rotation word, such as `4bw`, `-2xc` or `61`.
#[derive(Debug)]
struct RotationWord {
    improper: bool,
    order: i32,
    screw: i32,
    axis: Option<Axis>,
    trans: V3<i32>,
}

/// Every operation of the group described by a Hall symbol.
///
/// The identity comes first; the rest are in breadth-first order
/// of generation.
pub fn expand_hall(symbol: &str) -> Result<Vec<SeitzOp>, HallParseError>
{Ok({
    let mut seeds = vec![SeitzOp::eye()];
    seeds.extend(hall_generators(symbol)?);
    match generate_finite_group(&seeds, MAX_ORDER, |a, b| a.of(b)) {
        Some(ops) => ops,
        None => return Err(HallParseError {
            symbol: symbol.to_string(),
            kind: HallErrorKind::NotFinite(MAX_ORDER),
        }),
    }
})}

fn hall_generators(symbol: &str) -> Result<Vec<SeitzOp>, HallParseError>
{
    let fail = |kind| HallParseError { symbol: symbol.to_string(), kind };

    let (body, shift) = split_shift(symbol).map_err(fail)?;
    let mut words = body.split_whitespace();
    let lattice = words.next().ok_or_else(|| fail(HallErrorKind::Empty))?;
    let (centric, centering) = parse_lattice(lattice).map_err(fail)?;

    let mut gens = vec![];
    let mut prev_order = None;
    let mut prev_principal = None;
    for (index, word) in words.enumerate() {
        let rot = parse_rotation(word).map_err(fail)?;
        let axis = match rot.axis {
            Some(axis) => axis,
            None => {
                default_axis(index, rot.order, prev_order)
                    .ok_or_else(|| fail(HallErrorKind::NoDefaultAxis(word.to_string())))?
            },
        };
        let reference = prev_principal.unwrap_or(Axis::Z);

        let matrix = proper_rotation(axis, reference, rot.order)
            .ok_or_else(|| fail(HallErrorKind::BadRotation(word.to_string())))?;
        let matrix = match rot.improper {
            true => -matrix,
            false => matrix,
        };

        let mut trans = rot.trans;
        if rot.screw != 0 {
            let direction = principal_direction(axis)
                .ok_or_else(|| fail(HallErrorKind::BadRotation(word.to_string())))?;
            trans += &(direction * (12 * rot.screw / rot.order));
        }
        gens.push(SeitzOp::new(matrix, trans));

        if principal_direction(axis).is_some() {
            prev_principal = Some(axis);
        }
        prev_order = Some(rot.order);
    }
    if gens.is_empty() {
        return Err(fail(HallErrorKind::Empty));
    }

    if centric {
        gens.push(SeitzOp::new(-M33::eye(), V3([0, 0, 0])));
    }
    gens.extend(centering.into_iter().map(SeitzOp::translation));

    Ok(gens.iter().map(|op| op.shift_origin(&shift)).collect())
}

// "P 31 2 (0 0 4)" -> ("P 31 2 ", [0, 0, 4])
fn split_shift(symbol: &str) -> KindResult<(&str, V3<i32>)>
{
    let start = match symbol.find('(') {
        None => return Ok((symbol, V3([0, 0, 0]))),
        Some(i) => i,
    };
    let bad = || HallErrorKind::BadShift(symbol[start..].to_string());

    let inner = symbol[start + 1..].trim();
    if !inner.ends_with(')') {
        return Err(bad());
    }
    let values = inner[..inner.len() - 1].split_whitespace()
        .map(|s| s.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| bad())?;
    match *values.as_slice() {
        [x, y, z] => Ok((&symbol[..start], V3([x, y, z]))),
        _ => Err(bad()),
    }
}

/// Whether the lattice symbol carries inversion, and its centering vectors.
fn parse_lattice(word: &str) -> KindResult<(bool, Vec<V3<i32>>)>
{
    let (centric, letter) = match word.starts_with('-') {
        true => (true, &word[1..]),
        false => (false, word),
    };
    let centering = match letter {
        "P" => vec![],
        "A" => vec![V3([0, 6, 6])],
        "B" => vec![V3([6, 0, 6])],
        "C" => vec![V3([6, 6, 0])],
        "I" => vec![V3([6, 6, 6])],
        "R" => vec![V3([8, 4, 4]), V3([4, 8, 8])],
        "S" => vec![V3([4, 4, 8]), V3([8, 8, 4])],
        "T" => vec![V3([4, 8, 4]), V3([8, 4, 8])],
        "F" => vec![V3([0, 6, 6]), V3([6, 0, 6]), V3([6, 6, 0])],
        _ => return Err(HallErrorKind::BadLattice(word.to_string())),
    };
    Ok((centric, centering))
}

fn parse_rotation(word: &str) -> KindResult<RotationWord>
{Ok({
    let bad = || HallErrorKind::BadRotation(word.to_string());

    let (improper, rest) = match word.starts_with('-') {
        true => (true, &word[1..]),
        false => (false, word),
    };
    let mut chars = rest.chars().peekable();

    let order = match chars.next() {
        Some(c @ '1'..='4') | Some(c @ '6') => c as i32 - '0' as i32,
        _ => return Err(bad()),
    };
    let screw = match chars.peek().cloned() {
        Some(c @ '1'..='5') => {
            chars.next();
            c as i32 - '0' as i32
        },
        _ => 0,
    };
    if screw >= order && screw != 0 {
        return Err(bad());
    }

    let mut axis = None;
    let mut trans = V3([0, 0, 0]);
    for c in chars {
        let symbol_axis = match c {
            'x' => Axis::X,
            'y' => Axis::Y,
            'z' => Axis::Z,
            '\'' => Axis::Prime,
            '"' => Axis::DoublePrime,
            '*' => Axis::Star,
            _ => {
                trans += &translation_symbol(c).ok_or_else(bad)?;
                continue;
            },
        };
        if axis.replace(symbol_axis).is_some() {
            return Err(bad());
        }
    }
    RotationWord { improper, order, screw, axis, trans }
})}

fn default_axis(index: usize, order: i32, prev_order: Option<i32>) -> Option<Axis>
{
    match (index, order, prev_order) {
        (_, 1, _) => Some(Axis::Z),
        (0, _, _) => Some(Axis::Z),
        (1, 2, Some(2)) | (1, 2, Some(4)) => Some(Axis::X),
        (1, 2, Some(3)) | (1, 2, Some(6)) => Some(Axis::Prime),
        (2, 3, _) => Some(Axis::Star),
        _ => None,
    }
}

fn translation_symbol(c: char) -> Option<V3<i32>>
{
    Some(V3(match c {
        'a' => [6, 0, 0],
        'b' => [0, 6, 0],
        'c' => [0, 0, 6],
        'n' => [6, 6, 6],
        'u' => [3, 0, 0],
        'v' => [0, 3, 0],
        'w' => [0, 0, 3],
        'd' => [3, 3, 3],
        _ => return None,
    }))
}

fn principal_direction(axis: Axis) -> Option<V3<i32>>
{
    match axis {
        Axis::X => Some(V3([1, 0, 0])),
        Axis::Y => Some(V3([0, 1, 0])),
        Axis::Z => Some(V3([0, 0, 1])),
        _ => None,
    }
}

/// Matrices acting on column vectors.
///
/// Primed axes are face diagonals perpendicular to `reference`.
fn proper_rotation(axis: Axis, reference: Axis, order: i32) -> Option<M33<i32>>
{
    use self::Axis::*;

    let m = match (axis, order) {
        (_, 1) => [[1, 0, 0], [0, 1, 0], [0, 0, 1]],

        (Z, 2) => [[-1, 0, 0], [0, -1, 0], [0, 0, 1]],
        (Z, 3) => [[0, -1, 0], [1, -1, 0], [0, 0, 1]],
        (Z, 4) => [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
        (Z, 6) => [[1, -1, 0], [1, 0, 0], [0, 0, 1]],

        (X, 2) => [[1, 0, 0], [0, -1, 0], [0, 0, -1]],
        (X, 3) => [[1, 0, 0], [0, 0, -1], [0, 1, -1]],
        (X, 4) => [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
        (X, 6) => [[1, 0, 0], [0, 1, -1], [0, 1, 0]],

        (Y, 2) => [[-1, 0, 0], [0, 1, 0], [0, 0, -1]],
        (Y, 3) => [[-1, 0, 1], [0, 1, 0], [-1, 0, 0]],
        (Y, 4) => [[0, 0, 1], [0, 1, 0], [-1, 0, 0]],
        (Y, 6) => [[0, 0, 1], [0, 1, 0], [-1, 0, 1]],

        (Prime, 2) => match reference {
            X => [[-1, 0, 0], [0, 0, -1], [0, -1, 0]],
            Y => [[0, 0, -1], [0, -1, 0], [-1, 0, 0]],
            _ => [[0, -1, 0], [-1, 0, 0], [0, 0, -1]],
        },
        (DoublePrime, 2) => match reference {
            X => [[-1, 0, 0], [0, 0, 1], [0, 1, 0]],
            Y => [[0, 0, 1], [0, -1, 0], [1, 0, 0]],
            _ => [[0, 1, 0], [1, 0, 0], [0, 0, -1]],
        },

        (Star, 3) => [[0, 0, 1], [1, 0, 0], [0, 1, 0]],
        _ => return None,
    };
    Some(mat::from_array(m))
}
