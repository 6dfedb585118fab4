use std::fmt::Display;

use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Magenta, Yellow};
use tracing::{debug, info};
use xbps_pkgdb::{Package, Pkgdb};

use crate::{
    error::{CliError, Result},
    utils::{format_bytes, Colored},
};

fn field<T: Display>(label: &str, value: T) {
    info!("{}: {}", Colored(Cyan, label), value);
}

fn text_field(label: &str, value: &str) {
    if !value.is_empty() {
        field(label, value);
    }
}

fn list_field(label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    info!("{}:", Colored(Cyan, label));
    for value in values {
        info!("  {}", value);
    }
}

fn blob_field(label: &str, blob: &[u8]) {
    if blob.is_empty() {
        return;
    }
    info!("{}:", Colored(Cyan, label));
    for line in String::from_utf8_lossy(blob).lines() {
        info!("  {}", line);
    }
}

fn flags(pkg: &Package) -> String {
    let mut flags = vec![if pkg.automatic_install {
        format!("{}", Colored(Yellow, "auto"))
    } else {
        format!("{}", Colored(Green, "manual"))
    }];
    if pkg.repolock {
        flags.push(format!("{}", Colored(LightRed, "repolock")));
    }
    if pkg.preserve {
        flags.push(format!("{}", Colored(Magenta, "preserve")));
    }
    flags.join(", ")
}

fn print_package(name: &str, pkg: &Package) {
    info!(
        "{} {}",
        Colored(Blue, name),
        Colored(LightRed, pkg.version().unwrap_or("?"))
    );

    text_field("Description", &pkg.short_desc);
    text_field("State", &pkg.state);
    field("Flags", flags(pkg));
    text_field("Architecture", &pkg.architecture);
    text_field("License", &pkg.license);
    text_field("Homepage", &pkg.homepage);
    text_field("Maintainer", &pkg.maintainer);
    text_field("Repository", &pkg.repository);
    text_field("Build date", &pkg.build_date);
    text_field("Build options", &pkg.build_options);
    text_field("Install date", &pkg.install_date);

    if pkg.installed_size > 0 {
        field("Installed size", format_bytes(pkg.installed_size, 2));
    }
    if pkg.filename_size > 0 {
        field("Download size", format_bytes(pkg.filename_size, 2));
    }
    text_field("SHA256", &pkg.filename_sha256);

    list_field("Dependencies", &pkg.run_depends);
    list_field("Provides", &pkg.provides);
    list_field("Conflicts", &pkg.conflicts);
    list_field("Replaces", &pkg.replaces);
    list_field("Reverts", &pkg.reverts);
    list_field("Shared libraries provided", &pkg.shlib_provides);
    list_field("Shared libraries required", &pkg.shlib_requires);
    list_field("Configuration files", &pkg.conf_files);

    if !pkg.alternatives.is_empty() {
        info!("{}:", Colored(Cyan, "Alternatives"));
        for (group, links) in &pkg.alternatives {
            info!("  {}: {}", Colored(Green, group), links.join(", "));
        }
    }

    blob_field("Install message", &pkg.install_msg);
    blob_field("Remove message", &pkg.remove_msg);
}

pub fn show_package(pkgdb: &Pkgdb, name: &str, json: bool) -> Result<()> {
    debug!(pkgname = name, "showing package");

    let pkg = pkgdb
        .get(name)
        .ok_or_else(|| CliError::PackageNotFound(name.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(pkg)?);
    } else {
        print_package(name, pkg);
    }

    Ok(())
}
