use crate::cli_utils::CliResult;
use dialoguer::Select;

/// Interactive menu builder
pub struct Menu {
    title: String,
    items: Vec<String>,
}

impl Menu {
    /// Create a new menu with a title
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    /// Add multiple items
    pub fn items(mut self, items: Vec<&str>) -> Self {
        self.items.extend(items.iter().map(|s| s.to_string()));
        self
    }

    /// Show the menu and get the selected index
    pub fn interact(&self) -> CliResult<usize> {
        let item_refs: Vec<&str> = self.items.iter().map(|s| s.as_str()).collect();
        Ok(Select::new()
            .with_prompt(&self.title)
            .items(&item_refs)
            .default(0)
            .interact()?)
    }
}

/// Top level actions of the budget CLI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    ListBudget,
    CreateBudget,
    SeedDefaults,
    CreateUser,
    ListUsers,
    Exit,
}

impl Operation {
    const ALL: [Operation; 6] = [
        Operation::ListBudget,
        Operation::CreateBudget,
        Operation::SeedDefaults,
        Operation::CreateUser,
        Operation::ListUsers,
        Operation::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Operation::ListBudget => "List budget items",
            Operation::CreateBudget => "Create budget item",
            Operation::SeedDefaults => "Seed default budget",
            Operation::CreateUser => "Create user account",
            Operation::ListUsers => "List user accounts",
            Operation::Exit => "Exit",
        }
    }

    /// Show operation selection menu
    pub fn select() -> CliResult<Self> {
        let menu = Menu::new("Select operation")
            .items(Self::ALL.iter().map(|op| op.label()).collect());

        Ok(Self::ALL
            .get(menu.interact()?)
            .copied()
            .unwrap_or(Operation::Exit))
    }
}
