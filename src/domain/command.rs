//! Command tree: named groups and leaf commands resolved from argument tokens
//!
//! Nodes live in a generational arena and are addressed by [`NodeId`]. A group keeps its
//! children in registration order (for help output) plus a name index for lookup.
//! Resolution never fails on user input: unknown commands and malformed arguments degrade
//! to help text, and only errors raised by a handler itself reach the caller.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::{DomainError, DomainResult};

/// Handle of a node inside a [`CommandTree`].
pub type NodeId = Index;

/// Failure signalled by a command handler.
#[derive(Debug)]
pub enum HandlerError<E> {
    /// Arguments do not match the command's usage; the dispatcher prints usage instead.
    InvalidArgs,
    /// The command ran and failed.
    Failed(E),
}

/// Result returned by a command handler.
pub type HandlerResult<E> = Result<(), HandlerError<E>>;

/// Executable bound to a leaf node. Receives the tokens left after the command path.
pub type Handler<E> = Box<dyn Fn(&[String]) -> HandlerResult<E>>;

/// Group or leaf payload of a node.
pub enum NodeKind<E> {
    Group {
        children: Vec<NodeId>,
        by_name: HashMap<String, NodeId>,
    },
    Command {
        usage: String,
        handler: Handler<E>,
    },
}

/// One point in the command hierarchy.
pub struct CommandNode<E> {
    pub name: String,
    pub description: String,
    pub kind: NodeKind<E>,
}

impl<E> CommandNode<E> {
    fn group(name: String, description: String) -> Self {
        Self {
            name,
            description,
            kind: NodeKind::Group {
                children: Vec::new(),
                by_name: HashMap::new(),
            },
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Usage string of a leaf, `None` for groups.
    pub fn usage(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Command { usage, .. } => Some(usage),
            NodeKind::Group { .. } => None,
        }
    }
}

impl<E> fmt::Debug for CommandNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("CommandNode");
        s.field("name", &self.name)
            .field("description", &self.description);
        match &self.kind {
            NodeKind::Group { children, .. } => s.field("children", &children.len()),
            NodeKind::Command { usage, .. } => s.field("usage", usage),
        };
        s.finish()
    }
}

/// Terminal state of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Path ended at a group; its help was printed.
    GroupHelp,
    /// Token matched no child of the current group; notice and group help were printed.
    UnknownCommand(String),
    /// Handler rejected its arguments; command usage was printed.
    CommandHelp,
    /// Handler ran to completion.
    Executed,
}

/// Immutable-after-startup tree of commands.
pub struct CommandTree<E> {
    arena: Arena<CommandNode<E>>,
    root: NodeId,
}

impl<E> fmt::Debug for CommandTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTree")
            .field("root", &self.arena.get(self.root))
            .field("nodes", &self.arena.len())
            .finish()
    }
}

impl<E> CommandTree<E> {
    /// Create a tree whose root group is named after the program.
    pub fn new(program: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(CommandNode::group(program.into(), String::new()));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&CommandNode<E>> {
        self.arena.get(id)
    }

    /// Children of a group in registration order. Empty for leaves.
    pub fn children(&self, id: NodeId) -> Vec<&CommandNode<E>> {
        match self.arena.get(id).map(|n| &n.kind) {
            Some(NodeKind::Group { children, .. }) => children
                .iter()
                .filter_map(|&child| self.arena.get(child))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Find a direct child of `parent` by exact name.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        match self.arena.get(parent).map(|n| &n.kind) {
            Some(NodeKind::Group { by_name, .. }) => by_name.get(name).copied(),
            _ => None,
        }
    }

    /// Register a group under `parent` and return its id for further nesting.
    #[instrument(level = "trace", skip(self))]
    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: &str,
        description: &str,
    ) -> DomainResult<NodeId> {
        self.attach(
            parent,
            CommandNode::group(name.to_string(), description.to_string()),
        )
    }

    /// Register a leaf command under `parent`.
    #[instrument(level = "trace", skip(self, handler))]
    pub fn add_command<F>(
        &mut self,
        parent: NodeId,
        name: &str,
        description: &str,
        usage: &str,
        handler: F,
    ) -> DomainResult<NodeId>
    where
        F: Fn(&[String]) -> HandlerResult<E> + 'static,
    {
        self.attach(
            parent,
            CommandNode {
                name: name.to_string(),
                description: description.to_string(),
                kind: NodeKind::Command {
                    usage: usage.to_string(),
                    handler: Box::new(handler),
                },
            },
        )
    }

    fn attach(&mut self, parent: NodeId, node: CommandNode<E>) -> DomainResult<NodeId> {
        let parent_node = self
            .arena
            .get(parent)
            .ok_or(DomainError::UnknownNode(parent))?;
        let NodeKind::Group { by_name, .. } = &parent_node.kind else {
            return Err(DomainError::NotAGroup(parent_node.name.clone()));
        };
        if node.name.is_empty() {
            return Err(DomainError::EmptyCommandName {
                parent: parent_node.name.clone(),
            });
        }
        if by_name.contains_key(&node.name) {
            return Err(DomainError::DuplicateCommand {
                parent: parent_node.name.clone(),
                name: node.name,
            });
        }

        let name = node.name.clone();
        let id = self.arena.insert(node);
        if let Some(NodeKind::Group { children, by_name }) =
            self.arena.get_mut(parent).map(|n| &mut n.kind)
        {
            children.push(id);
            by_name.insert(name, id);
        }
        Ok(id)
    }

    fn write_group_help<W: Write>(&self, out: &mut W, matched: &str, id: NodeId) -> io::Result<()> {
        let children = self.children(id);
        let width = children.iter().map(|c| c.name.len()).max().unwrap_or(0);

        writeln!(out, "usage: {matched} <command> [<args>]")?;
        writeln!(out)?;
        writeln!(out, "commands:")?;
        writeln!(out)?;
        for child in children {
            let row = format!("  {:<width$}  {}", child.name, child.description);
            writeln!(out, "{}", row.trim_end())?;
        }
        writeln!(out)
    }

    fn write_command_help<W: Write>(&self, out: &mut W, matched: &str, usage: &str) -> io::Result<()> {
        let line = format!("usage: {matched} {usage}");
        writeln!(out, "{}", line.trim_end())
    }
}

impl<E: From<io::Error>> CommandTree<E> {
    /// Resolve `args[start..]` against the tree and run the matching command.
    ///
    /// `args[..start]` is treated as the already-matched prefix (usually the program name)
    /// and shows up in the printed usage lines. Help goes to `out`.
    ///
    /// # Errors
    /// Only errors raised by the invoked handler, or failures writing help to `out`.
    pub fn dispatch<W: Write>(&self, args: &[String], start: usize, out: &mut W) -> Result<Outcome, E> {
        let mut current = self.root;
        let mut index = start.min(args.len());

        loop {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| io::Error::other(DomainError::UnknownNode(current)))?;
            let matched = args[..index].join(" ");

            match &node.kind {
                NodeKind::Group { by_name, .. } => {
                    let Some(token) = args.get(index) else {
                        debug!(group = %node.name, "no command given, printing help");
                        self.write_group_help(out, &matched, current)?;
                        return Ok(Outcome::GroupHelp);
                    };
                    match by_name.get(token.as_str()) {
                        Some(&child) => {
                            current = child;
                            index += 1;
                        }
                        None => {
                            debug!(group = %node.name, %token, "unknown command");
                            writeln!(out, "invalid command: {token}")?;
                            writeln!(out)?;
                            self.write_group_help(out, &matched, current)?;
                            return Ok(Outcome::UnknownCommand(token.clone()));
                        }
                    }
                }
                NodeKind::Command { usage, handler } => {
                    debug!(command = %matched, args = ?&args[index..], "invoking command");
                    return match handler(&args[index..]) {
                        Ok(()) => Ok(Outcome::Executed),
                        Err(HandlerError::InvalidArgs) => {
                            self.write_command_help(out, &matched, usage)?;
                            Ok(Outcome::CommandHelp)
                        }
                        Err(HandlerError::Failed(e)) => Err(e),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    enum TestError {
        Io(io::Error),
        Boom(String),
    }

    impl From<io::Error> for TestError {
        fn from(e: io::Error) -> Self {
            TestError::Io(e)
        }
    }

    type Calls = Rc<RefCell<Vec<Vec<String>>>>;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn recording(calls: &Calls) -> impl Fn(&[String]) -> HandlerResult<TestError> + 'static {
        let calls = Rc::clone(calls);
        move |a: &[String]| {
            calls.borrow_mut().push(a.to_vec());
            Ok(())
        }
    }

    /// prog
    /// ├── droplets
    /// │   ├── list
    /// │   └── show <droplet id>
    /// └── regions
    fn sample_tree(calls: &Calls) -> CommandTree<TestError> {
        let mut tree = CommandTree::new("prog");
        let root = tree.root();
        let droplets = tree.add_group(root, "droplets", "manage droplets").unwrap();
        tree.add_command(droplets, "list", "list droplets", "", recording(calls))
            .unwrap();
        let show_calls = Rc::clone(calls);
        tree.add_command(
            droplets,
            "show",
            "show details for a droplet",
            "<droplet id>",
            move |a: &[String]| {
                if a.len() != 1 {
                    return Err(HandlerError::InvalidArgs);
                }
                show_calls.borrow_mut().push(a.to_vec());
                Ok(())
            },
        )
        .unwrap();
        tree.add_command(root, "regions", "list available regions", "", recording(calls))
            .unwrap();
        tree
    }

    fn run(tree: &CommandTree<TestError>, tokens: &[&str]) -> (Result<Outcome, TestError>, String) {
        let mut out = Vec::new();
        let result = tree.dispatch(&args(tokens), 1, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    /// Output sink whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn given_closed_output_when_printing_help_then_io_error_is_returned() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let result = tree.dispatch(&args(&["prog", "droplets"]), 1, &mut ClosedPipe);

        match result {
            Err(TestError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn given_group_path_when_dispatching_then_prints_children_in_order() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, out) = run(&tree, &["prog", "droplets"]);

        assert_eq!(result.unwrap(), Outcome::GroupHelp);
        assert_eq!(
            out,
            "usage: prog droplets <command> [<args>]\n\
             \n\
             commands:\n\
             \n\
             \x20 list  list droplets\n\
             \x20 show  show details for a droplet\n\
             \n"
        );
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn given_no_tokens_when_dispatching_then_prints_root_help() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, out) = run(&tree, &["prog"]);

        assert_eq!(result.unwrap(), Outcome::GroupHelp);
        assert!(out.starts_with("usage: prog <command> [<args>]\n"));
        let rows: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("  "))
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(rows, vec!["droplets", "regions"]);
    }

    #[test]
    fn given_leaf_path_when_dispatching_then_invokes_handler_with_empty_args() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, out) = run(&tree, &["prog", "droplets", "list"]);

        assert_eq!(result.unwrap(), Outcome::Executed);
        assert_eq!(*calls.borrow(), vec![Vec::<String>::new()]);
        assert!(out.is_empty());
    }

    #[test]
    fn given_trailing_tokens_when_dispatching_then_handler_receives_them() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, _) = run(&tree, &["prog", "droplets", "show", "42"]);

        assert_eq!(result.unwrap(), Outcome::Executed);
        assert_eq!(*calls.borrow(), vec![args(&["42"])]);
    }

    #[test]
    fn given_unknown_subcommand_when_dispatching_then_prints_notice_and_group_help() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, out) = run(&tree, &["prog", "droplets", "frobnicate"]);

        assert_eq!(
            result.unwrap(),
            Outcome::UnknownCommand("frobnicate".to_string())
        );
        assert!(out.starts_with("invalid command: frobnicate\n\nusage: prog droplets <command> [<args>]\n"));
        assert!(out.contains("  list  list droplets"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn given_unknown_token_with_more_tokens_when_dispatching_then_stops_at_first_miss() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, out) = run(&tree, &["prog", "nope", "list"]);

        assert_eq!(result.unwrap(), Outcome::UnknownCommand("nope".to_string()));
        assert!(out.contains("usage: prog <command> [<args>]"));
        assert!(calls.borrow().is_empty());
    }

    #[rstest]
    #[case(&["prog", "droplets", "show"])]
    #[case(&["prog", "droplets", "show", "1", "2"])]
    fn given_wrong_arity_when_dispatching_then_prints_usage_only(#[case] tokens: &[&str]) {
        let calls = Calls::default();
        let tree = sample_tree(&calls);

        let (result, out) = run(&tree, tokens);

        assert_eq!(result.unwrap(), Outcome::CommandHelp);
        assert_eq!(out, "usage: prog droplets show <droplet id>\n");
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn given_failing_handler_when_dispatching_then_error_is_propagated_unchanged() {
        let mut tree: CommandTree<TestError> = CommandTree::new("prog");
        let root = tree.root();
        tree.add_command(root, "event", "show progress of an event", "<event id>", |_| {
            Err(HandlerError::Failed(TestError::Boom("network down".into())))
        })
        .unwrap();

        let (result, out) = run(&tree, &["prog", "event", "7"]);

        match result {
            Err(TestError::Boom(msg)) => assert_eq!(msg, "network down"),
            other => panic!("expected handler error, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn given_nested_groups_when_dispatching_then_matched_path_accumulates() {
        let calls = Calls::default();
        let mut tree: CommandTree<TestError> = CommandTree::new("prog");
        let root = tree.root();
        let domains = tree.add_group(root, "domains", "manage domains").unwrap();
        let records = tree.add_group(domains, "records", "manage records").unwrap();
        tree.add_command(records, "list", "list records", "<domain id>", |a| {
            if a.len() == 1 {
                Ok(())
            } else {
                Err(HandlerError::InvalidArgs)
            }
        })
        .unwrap();
        tree.add_command(records, "show", "show details for a record", "", recording(&calls))
            .unwrap();

        let (result, out) = run(&tree, &["prog", "domains", "records", "list"]);
        assert_eq!(result.unwrap(), Outcome::CommandHelp);
        assert_eq!(out, "usage: prog domains records list <domain id>\n");

        let (result, out) = run(&tree, &["prog", "domains", "records"]);
        assert_eq!(result.unwrap(), Outcome::GroupHelp);
        assert!(out.starts_with("usage: prog domains records <command> [<args>]\n"));
    }

    #[test]
    fn given_empty_usage_when_printing_command_help_then_no_trailing_space() {
        let mut tree: CommandTree<TestError> = CommandTree::new("prog");
        let root = tree.root();
        tree.add_command(root, "sizes", "list available sizes", "", |_| {
            Err(HandlerError::InvalidArgs)
        })
        .unwrap();

        let (result, out) = run(&tree, &["prog", "sizes", "extra"]);

        assert_eq!(result.unwrap(), Outcome::CommandHelp);
        assert_eq!(out, "usage: prog sizes\n");
    }

    #[test]
    fn given_start_past_end_when_dispatching_then_prints_root_help() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);
        let mut out = Vec::new();

        let result = tree.dispatch(&args(&["prog"]), 5, &mut out);

        assert_eq!(result.unwrap(), Outcome::GroupHelp);
    }

    #[test]
    fn given_duplicate_sibling_when_registering_then_rejected() {
        let mut tree: CommandTree<TestError> = CommandTree::new("prog");
        let root = tree.root();
        tree.add_group(root, "keys", "manage ssh keys").unwrap();

        let err = tree.add_command(root, "keys", "", "", |_| Ok(())).unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateCommand {
                parent: "prog".to_string(),
                name: "keys".to_string()
            }
        );
        assert_eq!(tree.children(root).len(), 1);
    }

    #[test]
    fn given_same_name_in_different_groups_when_registering_then_allowed() {
        let calls = Calls::default();
        let mut tree = sample_tree(&calls);
        let root = tree.root();
        let images = tree.add_group(root, "images", "manage images").unwrap();

        assert!(tree.add_command(images, "list", "list images", "", |_| Ok(())).is_ok());
    }

    #[test]
    fn given_empty_name_when_registering_then_rejected() {
        let mut tree: CommandTree<TestError> = CommandTree::new("prog");
        let root = tree.root();

        let err = tree.add_group(root, "", "nameless").unwrap_err();

        assert_eq!(
            err,
            DomainError::EmptyCommandName {
                parent: "prog".to_string()
            }
        );
    }

    #[test]
    fn given_leaf_parent_when_registering_then_rejected() {
        let mut tree: CommandTree<TestError> = CommandTree::new("prog");
        let root = tree.root();
        let event = tree.add_command(root, "event", "", "<event id>", |_| Ok(())).unwrap();

        let err = tree.add_group(event, "sub", "").unwrap_err();

        assert_eq!(err, DomainError::NotAGroup("event".to_string()));
    }

    #[test]
    fn given_registered_nodes_when_looking_up_then_finds_by_name() {
        let calls = Calls::default();
        let tree = sample_tree(&calls);
        let droplets = tree.child(tree.root(), "droplets").unwrap();
        let show = tree.child(droplets, "show").unwrap();

        let node = tree.get_node(show).unwrap();
        assert!(!node.is_group());
        assert_eq!(node.usage(), Some("<droplet id>"));
        assert!(tree.child(show, "anything").is_none());
        assert!(tree.get_node(droplets).unwrap().is_group());
    }
}
