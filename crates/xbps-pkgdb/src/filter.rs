//! Predicate combinators over [`Package`].
//!
//! A filter is any `Fn(&Package) -> bool`. Plain functions such as
//! [`is_manual`] can be passed directly to [`crate::Pkgdb::filter_keys`];
//! the variadic combinators [`and`] and [`or`] take boxed [`Predicate`]s so
//! that filters of different types can be mixed.
//!
//! ```
//! use xbps_pkgdb::filter::{and, is_manual, not, is_repolocked, Predicate};
//!
//! let filters: Vec<Predicate> = vec![Box::new(is_manual), Box::new(not(is_repolocked))];
//! let manual_unlocked = and(filters);
//! # let _ = manual_unlocked;
//! ```

use crate::{package::split_pkgver, Package};

/// An owned, type-erased filter.
pub type Predicate = Box<dyn Fn(&Package) -> bool + Send + Sync>;

/// Boxes a closure or function as a [`Predicate`].
pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&Package) -> bool + Send + Sync + 'static,
{
    Box::new(f)
}

/// Negates another filter.
pub fn not<F>(f: F) -> impl Fn(&Package) -> bool + Send + Sync
where
    F: Fn(&Package) -> bool + Send + Sync,
{
    move |pkg: &Package| !f(pkg)
}

/// Matches if every filter matches. Stops at the first miss; an empty set
/// matches everything.
pub fn and<I>(filters: I) -> impl Fn(&Package) -> bool + Send + Sync
where
    I: IntoIterator<Item = Predicate>,
{
    let filters: Vec<Predicate> = filters.into_iter().collect();
    move |pkg: &Package| filters.iter().all(|f| f(pkg))
}

/// Matches if any filter matches. Stops at the first hit; an empty set
/// matches nothing.
pub fn or<I>(filters: I) -> impl Fn(&Package) -> bool + Send + Sync
where
    I: IntoIterator<Item = Predicate>,
{
    let filters: Vec<Predicate> = filters.into_iter().collect();
    move |pkg: &Package| filters.iter().any(|f| f(pkg))
}

/// Package was installed explicitly.
pub fn is_manual(pkg: &Package) -> bool {
    !pkg.automatic_install
}

/// Package was installed as a dependency. Always the complement of
/// [`is_manual`].
pub fn is_auto(pkg: &Package) -> bool {
    !is_manual(pkg)
}

pub fn is_repolocked(pkg: &Package) -> bool {
    pkg.repolock
}

pub fn is_preserved(pkg: &Package) -> bool {
    pkg.preserve
}

/// Matches packages whose install state equals `state`.
pub fn has_state(state: &str) -> impl Fn(&Package) -> bool + Send + Sync {
    let state = state.to_owned();
    move |pkg: &Package| pkg.state == state
}

/// Matches packages with a run-time dependency on `pkgname`, whatever
/// version constraint the dependency carries.
pub fn depends_on(pkgname: &str) -> impl Fn(&Package) -> bool + Send + Sync {
    let pkgname = pkgname.to_owned();
    move |pkg: &Package| pkg.run_depends.iter().any(|dep| split_pkgver(dep).0 == pkgname)
}

/// Matches packages listing `virtual_pkg` verbatim in `provides`.
pub fn provides(virtual_pkg: &str) -> impl Fn(&Package) -> bool + Send + Sync {
    let virtual_pkg = virtual_pkg.to_owned();
    move |pkg: &Package| pkg.provides.iter().any(|p| *p == virtual_pkg)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    fn manual() -> Package {
        Package {
            pkgver: "vim-9.1_1".into(),
            state: "installed".into(),
            run_depends: vec!["ncurses-libs>=6.4_1".into(), "acl>=2.3.1_1".into()],
            provides: vec!["vi-1_1".into()],
            ..Default::default()
        }
    }

    fn auto() -> Package {
        Package {
            pkgver: "ncurses-libs-6.4_1".into(),
            automatic_install: true,
            repolock: true,
            state: "unpacked".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_manual_auto_complement() {
        for pkg in [manual(), auto(), Package::default()] {
            assert_eq!(is_manual(&pkg), !is_auto(&pkg));
            assert_eq!(is_auto(&pkg), not(is_manual)(&pkg));
        }
    }

    #[test]
    fn test_vacuous_combinators() {
        let all = and(Vec::new());
        let none = or(Vec::new());

        for pkg in [manual(), auto()] {
            assert!(all(&pkg));
            assert!(!none(&pkg));
        }
    }

    #[test]
    fn test_and_or() {
        let manual_installed = and(vec![predicate(is_manual), predicate(has_state("installed"))]);
        assert!(manual_installed(&manual()));
        assert!(!manual_installed(&auto()));

        let locked_or_manual = or(vec![predicate(is_repolocked), predicate(is_manual)]);
        assert!(locked_or_manual(&manual()));
        assert!(locked_or_manual(&auto()));
        assert!(!or(vec![predicate(is_preserved)])(&manual()));
    }

    #[test]
    fn test_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = {
            let calls = Arc::clone(&calls);
            predicate(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };

        let filter = and(vec![predicate(is_auto), counter]);
        assert!(!filter(&manual()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(filter(&auto()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_or_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = {
            let calls = Arc::clone(&calls);
            predicate(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                false
            })
        };

        let filter = or(vec![predicate(is_manual), counter]);
        assert!(filter(&manual()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!filter(&auto()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_depends_on_ignores_version_constraint() {
        assert!(depends_on("ncurses-libs")(&manual()));
        assert!(depends_on("acl")(&manual()));
        assert!(!depends_on("ncurses")(&manual()));
        assert!(!depends_on("acl")(&auto()));
    }

    #[test]
    fn test_provides_and_state() {
        assert!(provides("vi-1_1")(&manual()));
        assert!(!provides("vi")(&manual()));
        assert!(has_state("unpacked")(&auto()));
        assert!(!has_state("installed")(&auto()));
    }
}
