/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(unused)]

use crysym::V3;
use ordered_float::NotNan;

/// Order of the point group of each space group number.
pub fn point_group_order(id: u32) -> usize {
    match id {
        1 => 1,
        2..=9 => 2,
        10..=46 => 4,
        47..=74 => 8,
        75..=82 => 4,
        83..=122 => 8,
        123..=142 => 16,
        143..=146 => 3,
        147..=161 => 6,
        162..=167 => 12,
        168..=174 => 6,
        175..=190 => 12,
        191..=194 => 24,
        195..=199 => 12,
        200..=220 => 24,
        221..=230 => 48,
        _ => panic!("bad space group number {}", id),
    }
}

/// Number of lattice points in the cell described by a Hall symbol.
pub fn centering_multiplicity(hall: &str) -> usize {
    match hall.trim_start_matches('-').chars().next() {
        Some('P') => 1,
        Some('A') | Some('B') | Some('C') | Some('I') => 2,
        Some('R') | Some('S') | Some('T') => 3,
        Some('F') => 4,
        _ => panic!("bad Hall symbol {:?}", hall),
    }
}

/// Sort points so that lists can be compared regardless of order.
pub fn sorted(points: impl IntoIterator<Item=V3>) -> Vec<V3> {
    let mut points: Vec<_> = points.into_iter().collect();
    points.sort_by_key(|p| p.map(|x| NotNan::new(x).unwrap()));
    points
}
