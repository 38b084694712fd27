//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Write as _;
use std::io::Write as _;

use colored::Colorize;

use crate::domain::{
    Domain, Droplet, DropletCreation, Event, EventId, Image, Key, Record, Region, Size,
};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print a progress label without newline, completed later by [`ok`]
pub fn progress(msg: &(impl std::fmt::Display + ?Sized)) {
    print!("{}... ", msg);
    std::io::stdout().flush().ok();
}

/// Print green "OK" closing a progress line
pub fn ok() {
    println!("{}", "OK".green());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print any resource rendering
pub fn show(rendered: String) {
    print!("{rendered}");
}

/// Render `name { Field: value ... }` with a blue name.
fn block(name: &str, fields: &[(&str, String)]) -> String {
    let mut out = format!("{} {{\n", name.blue());
    for (label, value) in fields {
        let _ = writeln!(out, "  {label}: {value}");
    }
    out.push_str("}\n");
    out
}

fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

pub fn render_droplet(d: &Droplet) -> String {
    block(
        &d.name,
        &[
            ("Id", d.id.to_string()),
            ("ImageId", d.image_id.to_string()),
            ("SizeId", d.size_id.to_string()),
            ("RegionId", d.region_id.to_string()),
            ("BackupsActive", d.backups_active.to_string()),
            ("IPAddress", opt(&d.ip_address)),
            ("PrivateIPAddress", opt(&d.private_ip_address)),
            ("Locked", d.locked.to_string()),
            ("Status", d.status.clone()),
            ("CreatedAt", opt(&d.created_at)),
        ],
    )
}

pub fn render_droplet_creation(d: &DropletCreation) -> String {
    block(
        &d.name,
        &[
            ("Id", d.id.to_string()),
            ("ImageId", d.image_id.to_string()),
            ("SizeId", d.size_id.to_string()),
            ("EventId", d.event_id.to_string()),
        ],
    )
}

pub fn render_domain(d: &Domain) -> String {
    block(
        &d.name,
        &[
            ("Id", d.id.to_string()),
            ("TTL", opt(&d.ttl)),
            ("LiveZoneFile", format!("\n{}", opt(&d.live_zone_file))),
            ("Error", opt(&d.error)),
            ("ZoneFileWithError", format!("\n{}", opt(&d.zone_file_with_error))),
        ],
    )
}

pub fn render_record(r: &Record) -> String {
    block(
        r.name.as_deref().unwrap_or("@"),
        &[
            ("Id", r.id.to_string()),
            ("DomainId", r.domain_id.to_string()),
            ("RecordType", r.record_type.clone()),
            ("Data", r.data.clone()),
            ("Priority", opt(&r.priority)),
            ("Port", opt(&r.port)),
            ("Weight", opt(&r.weight)),
        ],
    )
}

pub fn render_key(k: &Key) -> String {
    let mut fields = vec![("Id", k.id.to_string())];
    if let Some(public_key) = k.public_key.as_deref().filter(|s| !s.is_empty()) {
        fields.push(("PublicKey", public_key.trim_end().to_string()));
    }
    block(&k.name, &fields)
}

pub fn render_image(i: &Image) -> String {
    block(
        &i.name,
        &[
            ("Id", i.id.to_string()),
            ("Distribution", opt(&i.distribution)),
        ],
    )
}

pub fn render_region(r: &Region) -> String {
    block(&r.name, &[("Id", r.id.to_string())])
}

pub fn render_size(s: &Size) -> String {
    block(&s.name, &[("Id", s.id.to_string())])
}

pub fn render_event(e: &Event) -> String {
    block(
        &e.id.to_string(),
        &[
            ("Status", opt(&e.status)),
            ("DropletId", opt(&e.droplet_id)),
            ("EventType", opt(&e.event_type)),
            ("Percentage", opt(&e.percentage)),
        ],
    )
}

pub fn render_event_id(id: EventId) -> String {
    format!("Event Id: {}\n", id.to_string().blue())
}
