//! The package collection produced by decoding.

use std::collections::{hash_map, HashMap};

use serde::{Deserialize, Serialize};

use crate::Package;

/// Maps a package name to its metadata.
///
/// A `Pkgdb` is produced by [`crate::decode`] and friends. Filtering never
/// modifies it; [`Pkgdb::filter`] returns a new collection and
/// [`Pkgdb::filter_keys`] returns a sorted list of names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Pkgdb {
    packages: HashMap<String, Package>,
}

impl Pkgdb {
    /// Returns the names of all packages matching `filter`, sorted
    /// lexicographically.
    ///
    /// # Example
    ///
    /// ```
    /// use xbps_pkgdb::{filter::is_manual, Package, Pkgdb};
    ///
    /// let pkgdb: Pkgdb = [
    ///     ("zsh".to_string(), Package::default()),
    ///     ("bash".to_string(), Package::default()),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// assert_eq!(pkgdb.filter_keys(is_manual), vec!["bash", "zsh"]);
    /// ```
    pub fn filter_keys<F>(&self, filter: F) -> Vec<String>
    where
        F: Fn(&Package) -> bool,
    {
        let mut names: Vec<String> = self
            .packages
            .iter()
            .filter(|&(_, pkg)| filter(pkg))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Returns a new collection holding only the packages matching `filter`.
    pub fn filter<F>(&self, filter: F) -> Pkgdb
    where
        F: Fn(&Package) -> bool,
    {
        self.packages
            .iter()
            .filter(|&(_, pkg)| filter(pkg))
            .map(|(name, pkg)| (name.clone(), pkg.clone()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Iterates over `(name, package)` pairs in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Package> {
        self.packages.iter()
    }

    /// All package names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.filter_keys(|_| true)
    }
}

impl FromIterator<(String, Package)> for Pkgdb {
    fn from_iter<T: IntoIterator<Item = (String, Package)>>(iter: T) -> Self {
        Self {
            packages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Pkgdb {
    type Item = (String, Package);
    type IntoIter = hash_map::IntoIter<String, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pkgdb {
    type Item = (&'a String, &'a Package);
    type IntoIter = hash_map::Iter<'a, String, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
