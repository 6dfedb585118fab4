use tracing::{debug, info};
use xbps_pkgdb::{
    filter::{self, Predicate},
    Pkgdb,
};

use crate::error::Result;

/// Package selection requested on the command line.
#[derive(Debug, Default)]
pub struct Selection {
    pub manual: bool,
    pub auto: bool,
    pub repolocked: bool,
    pub state: Option<String>,
    pub depends_on: Option<String>,
    pub any: bool,
}

impl Selection {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates: Vec<Predicate> = Vec::new();

        if self.manual {
            predicates.push(filter::predicate(filter::is_manual));
        }
        if self.auto {
            predicates.push(filter::predicate(filter::is_auto));
        }
        if self.repolocked {
            predicates.push(filter::predicate(filter::is_repolocked));
        }
        if let Some(ref state) = self.state {
            predicates.push(filter::predicate(filter::has_state(state)));
        }
        if let Some(ref pkgname) = self.depends_on {
            predicates.push(filter::predicate(filter::depends_on(pkgname)));
        }

        predicates
    }

    /// Names of the matching packages, sorted.
    ///
    /// An empty selection matches everything, except under `--any` where
    /// the empty disjunction matches nothing.
    pub fn select(&self, pkgdb: &Pkgdb) -> Vec<String> {
        let predicates = self.predicates();

        if self.any {
            pkgdb.filter_keys(filter::or(predicates))
        } else {
            pkgdb.filter_keys(filter::and(predicates))
        }
    }
}

pub fn list_packages(pkgdb: &Pkgdb, selection: &Selection, json: bool) -> Result<()> {
    debug!(selection = ?selection, "listing packages");

    let names = selection.select(pkgdb);

    if json {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    for name in &names {
        info!(pkgname = name.as_str());
    }

    Ok(())
}
