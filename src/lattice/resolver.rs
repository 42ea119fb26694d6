/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{LatticeFamily, Site};

use std::sync::Arc;

use crysym_spacegroup::{SpaceGroup, SpaceGroupCatalog, UnresolvableGroupError, same_point_periodic};
use itertools::Itertools;

/// The outcome of identifying the space group of a set of sites.
#[derive(Debug, Clone)]
pub struct Resolved<M> {
    pub group: Arc<SpaceGroup>,
    /// The input sites, minus those that are images of other sites.
    pub unique_sites: Vec<Site<M>>,
    /// Indices (into the input) of the removed sites, in increasing order.
    pub removed: Vec<usize>,
}

/// Identifies the most symmetric catalog group that leaves a set of
/// sites invariant.
#[derive(Debug, Clone, Copy)]
pub struct SpaceGroupResolver<'c> {
    catalog: &'c SpaceGroupCatalog,
}

impl<'c> SpaceGroupResolver<'c> {
    pub fn new(catalog: &'c SpaceGroupCatalog) -> Self
    { SpaceGroupResolver { catalog } }

    /// Find the space group of an asymmetric unit.
    ///
    /// Centering copies implied by `family` are added before searching.
    /// Groups are tried from the highest number in the family's range to
    /// the lowest, settings in catalog order, and the first group under
    /// which every site is mapped onto a site with equal metadata wins.
    ///
    /// Sites that turn out to be images of other sites under the chosen
    /// group are then removed.
    pub fn resolve<M>(&self, family: LatticeFamily, sites: &[Site<M>]) -> Result<Resolved<M>, UnresolvableGroupError>
    where M: PartialEq + Clone,
    {
        if sites.is_empty() {
            return Err(UnresolvableGroupError::new(format!("an empty {} cell", family)));
        }

        let known = centered_sites(family, sites);
        let group = self.find_consistent(family, &known).ok_or_else(|| {
            UnresolvableGroupError::new(format!("{} sites in a {} cell", sites.len(), family))
        })?;
        info!("Identified space group #{} {}", group.id(), group);

        let removed = redundant_sites(&group, sites);
        if !removed.is_empty() {
            debug!("Removing {} redundant sites: {:?}", removed.len(), removed);
        }
        let unique_sites = sites.iter().enumerate()
            .filter(|(i, _)| !removed.contains(i))
            .map(|(_, site)| site.clone())
            .collect();
        Ok(Resolved { group, unique_sites, removed })
    }

    /// The first consistent setting, scanning from the most symmetric group.
    pub fn find_consistent<M: PartialEq>(&self, family: LatticeFamily, known: &[Site<M>]) -> Option<Arc<SpaceGroup>>
    {
        for id in family.id_range().rev() {
            for group in self.catalog.by_id(id) {
                if is_consistent(group, known) {
                    return Some(group.clone());
                }
            }
        }
        None
    }
}

/// Shorthand for `SpaceGroupResolver::new(catalog).resolve(family, sites)`.
pub fn resolve<M>(catalog: &SpaceGroupCatalog, family: LatticeFamily, sites: &[Site<M>]) -> Result<Resolved<M>, UnresolvableGroupError>
where M: PartialEq + Clone,
{ SpaceGroupResolver::new(catalog).resolve(family, sites) }

/// Whether every operation maps every site onto a site with the same metadata.
pub fn is_consistent<M: PartialEq>(group: &SpaceGroup, sites: &[Site<M>]) -> bool
{
    sites.iter().all(|site| {
        group.transforms().iter().all(|t| {
            let image = t.apply(&site.frac);
            sites.iter().any(|other| other.meta == site.meta && same_point_periodic(&other.frac, &image))
        })
    })
}

fn centered_sites<M: Clone>(family: LatticeFamily, sites: &[Site<M>]) -> Vec<Site<M>>
{
    sites.iter()
        .flat_map(|site| {
            family.centered_copies(&site.frac).into_iter()
                .map(move |frac| Site { frac, meta: site.meta.clone() })
        })
        .collect()
}

// For every pair of sites (i < j) related by the group, i is redundant if
// any of its coordinates is smaller than j's; otherwise j is.  Sites already
// marked are not compared again.
fn redundant_sites<M: PartialEq>(group: &SpaceGroup, sites: &[Site<M>]) -> Vec<usize>
{
    let mut marked = vec![false; sites.len()];
    for (i, j) in (0..sites.len()).tuple_combinations() {
        if marked[i] || marked[j] || sites[i].meta != sites[j].meta {
            continue;
        }
        let related = group.transforms().iter()
            .any(|t| same_point_periodic(&t.apply(&sites[i].frac), &sites[j].frac));
        if related {
            let redundant = match any_smaller(&sites[i].frac.0, &sites[j].frac.0) {
                true => i,
                false => j,
            };
            marked[redundant] = true;
        }
    }
    marked.iter().enumerate().filter(|&(_, &m)| m).map(|(i, _)| i).collect()
}

fn any_smaller(a: &[f64; 3], b: &[f64; 3]) -> bool
{ izip!(a, b).any(|(x, y)| x < y) }
