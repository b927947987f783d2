#![forbid(unsafe_code)]

//! Static command registry and the derived, category-ordered views over it.
//!
//! The registry is immutable once built. Everything the palette shows is a
//! pure function of `(registry, query)`: [`CommandRegistry::filter`] for the
//! flat list that `selected_index` points into, and
//! [`CommandRegistry::grouped`] for the same list split under category
//! headers.

use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Closed set of command groups, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// In-site route changes.
    Navigation,
    /// One-off actions (downloads and the like).
    Action,
    /// Links to external profiles.
    Social,
}

impl Category {
    /// Fixed order in which groups appear in the filtered list.
    pub const ORDER: [Category; 3] = [Category::Navigation, Category::Action, Category::Social];

    /// Group header text.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Action => "Actions",
            Self::Social => "Social",
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// What invoking a command means to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTarget {
    /// Change the current route (e.g. `/work`).
    Navigate(String),
    /// Open a resource outside the current view (URL, `mailto:`, file).
    Open(String),
}

impl fmt::Display for CommandTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(path) => write!(f, "navigate {path}"),
            Self::Open(url) => write!(f, "open {url}"),
        }
    }
}

/// A single entry that can be invoked from the command palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    id: String,
    label: String,
    category: Category,
    shortcut: Option<String>,
    target: CommandTarget,
}

impl Command {
    /// Create a new command.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: Category,
        target: CommandTarget,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            shortcut: None,
            target,
        }
    }

    /// Set the shortcut hint shown next to the label (builder).
    #[must_use]
    pub fn with_shortcut(mut self, hint: impl Into<String>) -> Self {
        self.shortcut = Some(hint.into());
        self
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display text; the only field search looks at.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Group the command is listed under.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Display-only shortcut hint, e.g. `"G H"`.
    #[must_use]
    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }

    /// What the host should do when the command runs.
    #[must_use]
    pub fn target(&self) -> &CommandTarget {
        &self.target
    }

    /// Case-insensitive substring match against the label. `needle` must
    /// already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.label.to_lowercase().contains(needle)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Rejected registry contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Command at this position has an empty id.
    EmptyId(usize),
    /// Command with this id has an empty label.
    EmptyLabel(String),
    /// Two commands share this id.
    DuplicateId(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId(index) => write!(f, "command #{index} has an empty id"),
            Self::EmptyLabel(id) => write!(f, "command '{id}' has an empty label"),
            Self::DuplicateId(id) => write!(f, "duplicate command id '{id}'"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// One non-empty category section of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroup<'a> {
    /// Category of every command in the group.
    pub category: Category,
    /// Flat index of the group's first command in the filtered list.
    pub start_index: usize,
    /// Matching commands in registry order.
    pub commands: Vec<&'a Command>,
}

impl CommandGroup<'_> {
    /// Header text for the group.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.category.title()
    }

    /// Whether flat `index` falls inside this group.
    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index >= self.start_index && index < self.start_index + self.commands.len()
    }
}

/// Immutable list of commands, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Build a registry, rejecting empty ids or labels and duplicate ids.
    pub fn new(commands: Vec<Command>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(commands.len());
        for (index, command) in commands.iter().enumerate() {
            if command.id.is_empty() {
                return Err(RegistryError::EmptyId(index));
            }
            if command.label.is_empty() {
                return Err(RegistryError::EmptyLabel(command.id.clone()));
            }
            if !seen.insert(command.id.as_str()) {
                return Err(RegistryError::DuplicateId(command.id.clone()));
            }
        }
        Ok(Self { commands })
    }

    /// The portfolio site's commands: five routes, the résumé download, and
    /// four social links.
    #[must_use]
    pub fn portfolio() -> Self {
        use Category::{Action, Navigation, Social};
        use CommandTarget::{Navigate, Open};

        let nav = |id: &str, label: &str, hint: &str, path: &str| {
            Command::new(id, label, Navigation, Navigate(path.into())).with_shortcut(hint)
        };
        let social = |id: &str, label: &str, url: &str| {
            Command::new(id, label, Social, Open(url.into()))
        };

        Self {
            commands: vec![
                nav("home", "Go to Home", "G H", "/"),
                nav("work", "View Work", "G W", "/work"),
                nav("about", "About Me", "G A", "/about"),
                nav("blog", "Read Blog", "G B", "/blog"),
                nav("playground", "Playground", "G P", "/playground"),
                Command::new("resume", "Download Resume", Action, Open("/resume.pdf".into()))
                    .with_shortcut("D R"),
                social("github", "GitHub Profile", "https://github.com/chetanoli"),
                social(
                    "linkedin",
                    "LinkedIn Profile",
                    "https://linkedin.com/in/chetanoli",
                ),
                social("twitter", "Twitter Profile", "https://twitter.com/chetanoli"),
                social("email", "Send Email", "mailto:hello@chetanoli.dev"),
            ],
        }
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Look up a command by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Commands whose label contains `query` (case-insensitive), grouped by
    /// [`Category::ORDER`], registry order within each group.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Command> {
        let needle = query.to_lowercase();
        let needle = needle.as_str();
        Category::ORDER
            .iter()
            .flat_map(|&category| {
                self.commands
                    .iter()
                    .filter(move |c| c.category == category && c.matches(needle))
            })
            .collect()
    }

    /// The [`filter`](Self::filter) result split into non-empty groups, each
    /// carrying its flat start index.
    #[must_use]
    pub fn grouped(&self, query: &str) -> Vec<CommandGroup<'_>> {
        let filtered = self.filter(query);
        let mut groups: Vec<CommandGroup<'_>> = Vec::with_capacity(Category::ORDER.len());
        for (index, command) in filtered.into_iter().enumerate() {
            match groups.last_mut() {
                Some(group) if group.category == command.category => {
                    group.commands.push(command);
                }
                _ => groups.push(CommandGroup {
                    category: command.category,
                    start_index: index,
                    commands: vec![command],
                }),
            }
        }
        groups
    }
}
