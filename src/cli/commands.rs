//! Command catalog: wires every CLI command into the command tree
//!
//! Each handler checks its argument count, prints a progress line, calls one service
//! and prints the result. Argument-count mismatches return `InvalidArgs` so the
//! dispatcher prints the command's usage line instead.

use std::env;
use std::io;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, CommandResult, IoResultExt};
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{CommandTree, EventId, HandlerError, NewDroplet, NodeId};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

const DEFAULT_PROGRAM: &str = "faucet";

/// Signature of every command handler in the catalog.
type CommandFn = fn(&ServiceContainer, &[String]) -> CommandResult;

/// Binds handlers to a shared service container while registering them.
struct Registrar {
    tree: CommandTree<ApplicationError>,
    ctx: Arc<ServiceContainer>,
}

impl Registrar {
    fn group(&mut self, parent: NodeId, name: &str, description: &str) -> ApplicationResult<NodeId> {
        Ok(self.tree.add_group(parent, name, description)?)
    }

    fn command(
        &mut self,
        parent: NodeId,
        name: &str,
        description: &str,
        usage: &str,
        handler: CommandFn,
    ) -> ApplicationResult<NodeId> {
        let ctx = Arc::clone(&self.ctx);
        Ok(self
            .tree
            .add_command(parent, name, description, usage, move |args| {
                handler(ctx.as_ref(), args)
            })?)
    }
}

/// Build the full command tree for `program`.
///
/// # Errors
/// [`ApplicationError::Domain`] if the catalog registers a name twice.
#[instrument(level = "debug", skip(ctx))]
pub fn build_command_tree(
    ctx: Arc<ServiceContainer>,
    program: &str,
) -> ApplicationResult<CommandTree<ApplicationError>> {
    let mut r = Registrar {
        tree: CommandTree::new(program),
        ctx,
    };
    let root = r.tree.root();

    let droplets = r.group(root, "droplets", "manage droplets")?;
    r.command(droplets, "list", "list droplets", "", droplets_list)?;
    r.command(droplets, "show", "show details for a droplet", "<droplet id>", droplets_show)?;
    r.command(droplets, "new", "create a new droplet", "", droplets_new)?;
    r.command(droplets, "ssh", "ssh into a droplet", "<droplet id>", droplets_ssh)?;
    r.command(droplets, "scp", "scp a file to a droplet", "<file> <droplet id>", droplets_scp)?;
    r.command(
        droplets,
        "open",
        "open the droplet's ip address in a browser",
        "<droplet id>",
        droplets_open,
    )?;
    r.command(droplets, "shutdown", "cleanly shutdown a droplet", "<droplet id>", droplets_shutdown)?;
    r.command(droplets, "reboot", "cleanly reboot a droplet", "<droplet id>", droplets_reboot)?;
    r.command(droplets, "poweroff", "power off a droplet", "<droplet id>", droplets_poweroff)?;
    r.command(droplets, "poweron", "power on a droplet", "<droplet id>", droplets_poweron)?;
    r.command(
        droplets,
        "powercycle",
        "power off then power on a droplet",
        "<droplet id>",
        droplets_powercycle,
    )?;
    r.command(
        droplets,
        "resize",
        "change the size of a droplet",
        "<droplet id> <size id>",
        droplets_resize,
    )?;
    r.command(
        droplets,
        "snapshot",
        "take a snapshot of a droplet",
        "<droplet id> <name>",
        droplets_snapshot,
    )?;
    r.command(
        droplets,
        "restore",
        "revert a droplet back to a snapshot",
        "<droplet id> <image id>",
        droplets_restore,
    )?;
    r.command(
        droplets,
        "rebuild",
        "reinstall an image to a droplet",
        "<droplet id> <image id>",
        droplets_rebuild,
    )?;
    r.command(
        droplets,
        "rename",
        "change the name of a droplet",
        "<droplet id> <name>",
        droplets_rename,
    )?;
    r.command(
        droplets,
        "resetpass",
        "reset the root password of a droplet",
        "<droplet id>",
        droplets_resetpass,
    )?;
    r.command(
        droplets,
        "destroy",
        "destroy a droplet",
        "<droplet id> <scrub data?>",
        droplets_destroy,
    )?;

    let domains = r.group(root, "domains", "manage domains")?;
    r.command(domains, "list", "list domains", "", domains_list)?;
    r.command(domains, "show", "show details of a domain", "<domain id>", domains_show)?;
    r.command(domains, "new", "create a new domain", "", domains_new)?;
    r.command(domains, "destroy", "destroy a domain", "<domain id>", domains_destroy)?;

    let records = r.group(domains, "records", "manage records")?;
    r.command(records, "list", "list records", "<domain id>", records_list)?;
    r.command(
        records,
        "show",
        "show details for a record",
        "<domain id> <record id>",
        records_show,
    )?;
    r.command(records, "new", "create a new record", "<domain id>", records_new)?;
    r.command(records, "edit", "edit a record", "<domain id> <record id>", records_edit)?;
    r.command(
        records,
        "destroy",
        "destroy a record",
        "<domain id> <record id>",
        records_destroy,
    )?;

    let keys = r.group(root, "keys", "manage ssh keys")?;
    r.command(keys, "list", "list keys", "", keys_list)?;
    r.command(keys, "show", "show details of a key", "<key id>", keys_show)?;
    r.command(keys, "add", "add ~/.ssh/id_rsa.pub to the key list", "<name>", keys_add)?;
    r.command(
        keys,
        "update",
        "change a key to match ~/.ssh/id_rsa.pub",
        "<key id>",
        keys_update,
    )?;
    r.command(keys, "delete", "delete a key", "<key id>", keys_delete)?;

    let images = r.group(root, "images", "manage images")?;
    r.command(images, "list", "list images", "", images_list)?;
    r.command(images, "show", "show details of an image", "<image id>", images_show)?;
    r.command(
        images,
        "transfer",
        "transfer an image to a region",
        "<image id> <region id>",
        images_transfer,
    )?;
    r.command(images, "destroy", "destroy an image", "<image id>", images_destroy)?;

    r.command(root, "regions", "list available regions", "", regions)?;
    r.command(root, "sizes", "list available sizes", "", sizes)?;
    r.command(root, "event", "show progress of an event", "<event id>", event)?;
    r.command(root, "help", "show usage for a specific command", "<command>", help)?;

    Ok(r.tree)
}

/// Load configuration, build the tree and dispatch the command path.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    let credentials = settings.credentials()?;
    let ctx = Arc::new(ServiceContainer::new(settings, credentials));

    let program = env::args()
        .next()
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let tree = build_command_tree(ctx, &program)?;

    let args: Vec<String> = std::iter::once(program)
        .chain(cli.command.iter().cloned())
        .collect();
    let outcome = tree.dispatch(&args, 1, &mut io::stdout().lock())?;
    debug!(?outcome, "dispatch finished");
    Ok(())
}

fn expect_args(args: &[String], count: usize) -> CommandResult {
    if args.len() == count {
        Ok(())
    } else {
        Err(HandlerError::InvalidArgs)
    }
}

/// Run an action that starts an asynchronous event and print its id.
fn issue<F>(args: &[String], count: usize, action: &str, call: F) -> CommandResult
where
    F: FnOnce(&[String]) -> ApplicationResult<EventId>,
{
    expect_args(args, count)?;
    output::progress(&format!("issuing {action} command"));
    let event_id = call(args)?;
    output::ok();
    output::show(output::render_event_id(event_id));
    Ok(())
}

/// Parse a boolean flag: `1`, `t`, `true` and their upper-case forms, or the `0`/`f`/`false` family.
fn parse_flag(value: &str) -> ApplicationResult<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(ApplicationError::invalid_input(format!(
            "scrub data must be true or false, got '{other}'"
        ))),
    }
}

fn not_implemented(command: &str) -> CommandResult {
    Err(ApplicationError::Unimplemented(command.to_string()).into())
}

/// Fetch a droplet and return its public IP address.
fn droplet_ip(ctx: &ServiceContainer, id: &str) -> ApplicationResult<String> {
    output::progress("fetching droplet");
    let droplet = ctx.droplets.show(id)?;
    output::ok();
    droplet
        .ip_address
        .filter(|ip| !ip.is_empty())
        .ok_or_else(|| ApplicationError::invalid_input(format!("droplet {id} has no IP address")))
}

/// Run an external program attached to the terminal.
fn run_attached(ctx: &ServiceContainer, program: &str, args: &[&str]) -> CommandResult {
    debug!(program, ?args, "running external command");
    let status = ctx
        .cmd
        .run_interactive(program, args)
        .map_err(|e| InfraError::io(format!("run {program}"), e))?;
    if !status.success() {
        return Err(InfraError::Command {
            message: format!("{program} exited with {status}"),
            exit_code: status.code(),
        }
        .into());
    }
    Ok(())
}

fn browser_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

// ---------------------------------------------------------------------------
// droplets
// ---------------------------------------------------------------------------

fn droplets_list(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    output::progress("fetching droplets");
    let droplets = ctx.droplets.list()?;
    output::ok();
    if droplets.is_empty() {
        output::info("No droplets.");
    }
    for droplet in &droplets {
        output::show(output::render_droplet(droplet));
    }
    Ok(())
}

fn droplets_show(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("fetching droplet");
    let droplet = ctx.droplets.show(&args[0])?;
    output::ok();
    output::show(output::render_droplet(&droplet));
    Ok(())
}

fn droplets_new(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    let name = ctx.prompter.ask("name")?;
    sizes(ctx, &[])?;
    let size_id = ctx.prompter.ask("size id")?;
    images_list(ctx, &[])?;
    let image_id = ctx.prompter.ask("image id")?;
    regions(ctx, &[])?;
    let region_id = ctx.prompter.ask("region id")?;
    keys_list(ctx, &[])?;
    let ssh_key_ids = ctx.prompter.ask("key ids (comma separated)")?;

    let request = NewDroplet {
        name,
        size_id,
        image_id,
        region_id,
        ssh_key_ids,
    };
    output::progress("creating droplet");
    let created = ctx.droplets.create(&request)?;
    output::ok();
    output::show(output::render_droplet_creation(&created));
    Ok(())
}

fn droplets_ssh(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    let ip = droplet_ip(ctx, &args[0])?;
    output::info("running ssh...");
    let target = format!("root@{ip}");
    run_attached(ctx, "ssh", &[target.as_str()])
}

fn droplets_scp(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 2)?;
    let ip = droplet_ip(ctx, &args[1])?;
    output::info("running scp...");
    let target = format!("root@{ip}:");
    run_attached(ctx, "scp", &[args[0].as_str(), target.as_str()])
}

fn droplets_open(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    let ip = droplet_ip(ctx, &args[0])?;
    output::info("opening...");
    let url = format!("http://{ip}");
    run_attached(ctx, browser_opener(), &[url.as_str()])
}

fn droplets_shutdown(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 1, "shutdown", |a| ctx.droplets.shutdown(&a[0]))
}

fn droplets_reboot(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 1, "reboot", |a| ctx.droplets.reboot(&a[0]))
}

fn droplets_poweroff(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 1, "poweroff", |a| ctx.droplets.power_off(&a[0]))
}

fn droplets_poweron(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 1, "poweron", |a| ctx.droplets.power_on(&a[0]))
}

fn droplets_powercycle(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 1, "powercycle", |a| ctx.droplets.power_cycle(&a[0]))
}

fn droplets_resize(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "resize", |a| ctx.droplets.resize(&a[0], &a[1]))
}

fn droplets_snapshot(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "snapshot", |a| ctx.droplets.snapshot(&a[0], &a[1]))
}

fn droplets_restore(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "restore", |a| ctx.droplets.restore(&a[0], &a[1]))
}

fn droplets_rebuild(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "rebuild", |a| ctx.droplets.rebuild(&a[0], &a[1]))
}

fn droplets_rename(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "rename", |a| ctx.droplets.rename(&a[0], &a[1]))
}

fn droplets_resetpass(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 1, "resetpass", |a| ctx.droplets.reset_password(&a[0]))
}

fn droplets_destroy(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "destroy", |a| {
        let scrub_data = parse_flag(&a[1])?;
        ctx.droplets.destroy(&a[0], scrub_data)
    })
}

// ---------------------------------------------------------------------------
// domains and records
// ---------------------------------------------------------------------------

fn domains_list(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    output::progress("fetching domains");
    let domains = ctx.domains.list()?;
    output::ok();
    for domain in &domains {
        output::show(output::render_domain(domain));
    }
    Ok(())
}

fn domains_show(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("fetching domain");
    let domain = ctx.domains.show(&args[0])?;
    output::ok();
    output::show(output::render_domain(&domain));
    Ok(())
}

fn domains_new(_ctx: &ServiceContainer, _args: &[String]) -> CommandResult {
    not_implemented("domains new")
}

fn domains_destroy(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("destroying the domain");
    ctx.domains.destroy(&args[0])?;
    output::ok();
    Ok(())
}

fn records_list(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("fetching records");
    let records = ctx.domains.records(&args[0])?;
    output::ok();
    for record in &records {
        output::show(output::render_record(record));
    }
    Ok(())
}

fn records_show(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 2)?;
    output::progress("fetching record");
    let record = ctx.domains.record(&args[0], &args[1])?;
    output::ok();
    output::show(output::render_record(&record));
    Ok(())
}

fn records_new(_ctx: &ServiceContainer, _args: &[String]) -> CommandResult {
    not_implemented("records new")
}

fn records_edit(_ctx: &ServiceContainer, _args: &[String]) -> CommandResult {
    not_implemented("records edit")
}

fn records_destroy(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 2)?;
    output::progress("destroying record");
    ctx.domains.destroy_record(&args[0], &args[1])?;
    output::ok();
    Ok(())
}

// ---------------------------------------------------------------------------
// keys
// ---------------------------------------------------------------------------

fn read_public_key(ctx: &ServiceContainer) -> ApplicationResult<String> {
    output::progress("looking for local key");
    let path = &ctx.settings.public_key_path;
    let key = ctx
        .fs
        .read_to_string(path)
        .with_path_context("read public key", path)?;
    output::ok();
    Ok(key)
}

fn keys_list(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    output::progress("fetching ssh keys");
    let keys = ctx.keys.list()?;
    output::ok();
    for key in &keys {
        output::show(output::render_key(key));
    }
    Ok(())
}

fn keys_show(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("fetching ssh key");
    let key = ctx.keys.show(&args[0])?;
    output::ok();
    output::show(output::render_key(&key));
    Ok(())
}

fn keys_add(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    let public_key = read_public_key(ctx)?;
    output::progress("uploading key");
    let key = ctx.keys.add(&args[0], &public_key)?;
    output::ok();
    output::show(output::render_key(&key));
    Ok(())
}

fn keys_update(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    let public_key = read_public_key(ctx)?;
    output::progress("updating remote key to match");
    let key = ctx.keys.update(&args[0], &public_key)?;
    output::ok();
    output::show(output::render_key(&key));
    Ok(())
}

fn keys_delete(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("deleting key");
    ctx.keys.destroy(&args[0])?;
    output::ok();
    Ok(())
}

// ---------------------------------------------------------------------------
// images
// ---------------------------------------------------------------------------

fn images_list(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    output::progress("fetching images");
    let images = ctx.images.list()?;
    output::ok();
    for image in &images {
        output::show(output::render_image(image));
    }
    Ok(())
}

fn images_show(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("fetching image");
    let image = ctx.images.show(&args[0])?;
    output::ok();
    output::show(output::render_image(&image));
    Ok(())
}

fn images_transfer(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    issue(args, 2, "transfer", |a| ctx.images.transfer(&a[0], &a[1]))
}

fn images_destroy(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("destroying image");
    ctx.images.destroy(&args[0])?;
    output::ok();
    Ok(())
}

// ---------------------------------------------------------------------------
// root commands
// ---------------------------------------------------------------------------

fn regions(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    output::progress("fetching regions");
    let regions = ctx.catalog.regions()?;
    output::ok();
    for region in &regions {
        output::show(output::render_region(region));
    }
    Ok(())
}

fn sizes(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 0)?;
    output::progress("fetching sizes");
    let sizes = ctx.catalog.sizes()?;
    output::ok();
    for size in &sizes {
        output::show(output::render_size(size));
    }
    Ok(())
}

fn event(ctx: &ServiceContainer, args: &[String]) -> CommandResult {
    expect_args(args, 1)?;
    output::progress("fetching event status");
    let event = ctx.catalog.event(&args[0])?;
    output::ok();
    output::show(output::render_event(&event));
    Ok(())
}

fn help(_ctx: &ServiceContainer, _args: &[String]) -> CommandResult {
    not_implemented("help")
}
