/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Generates a finite group from a non-empty set of generators.
///
/// The generators may contain duplicates or extraneous elements.
/// Members appear in breadth-first order of discovery, so if the first
/// generator is the identity it will also be the first member.
///
/// `compose(a, b)` may use either convention, so long as it is
/// used consistently.
///
/// Returns `None` once more than `max_order` members have been found,
/// which is how infinite groups are detected.
pub(crate) fn generate_finite_group<G>(
    generators: &[G],
    max_order: usize,
    mut compose: impl FnMut(&G, &G) -> G,
) -> Option<Vec<G>>
where G: Hash + Eq + Clone,
{
    assert!(generators.len() > 0, "empty groups do not exist!");

    let mut seen = HashSet::new();
    let mut out = vec![];

    let mut queue: VecDeque<_> = generators.iter().cloned().collect();

    while let Some(g) = queue.pop_front() {
        if seen.insert(g.clone()) {
            if out.len() == max_order {
                return None;
            }
            queue.extend(generators.iter().map(|h| compose(&g, h)));
            out.push(g);
        }
    }
    Some(out)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_group() {
        let group = generate_finite_group(&[0, 5], 12, |a, b| (a + b) % 12).unwrap();
        assert_eq!(group.len(), 12);
        assert_eq!(group[0], 0);
        assert_eq!(&group[..3], &[0, 5, 10]);
    }

    #[test]
    fn redundant_generators() {
        let group = generate_finite_group(&[4, 8, 4, 0], 100, |a, b| (a + b) % 12).unwrap();
        let mut sorted = group.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 4, 8]);
    }

    #[test]
    fn order_limit() {
        assert_eq!(generate_finite_group(&[0, 5], 11, |a, b| (a + b) % 12), None);

        // integers under addition never close
        assert_eq!(generate_finite_group(&[0i64, 1], 1000, |a, b| a + b), None);
    }
}
