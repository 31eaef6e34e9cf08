use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::io::Write;

use budget_back_end::action_router::{ActionRouterInput, ActionRouterOutput};
use budget_back_end::budget::processor_enums::{
    BudgetProcessorInput, BudgetProcessorOutput, CreateBudgetInputArgs,
};
use budget_back_end::cli_helper::{dispatch, initialize_app_config};
use budget_back_end::cli_utils::{
    confirm, format_record, format_table,
    formatting::{
        Tone, format_amount, format_count, format_datetime, format_optional, print_header,
        print_status,
    },
    input::Input,
    menu::Operation,
};
use budget_back_end::users::processor_enums::{
    SignupInputArgs, UsersProcessorInput, UsersProcessorOutput,
};
use budget_back_end::utils::app_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    eprintln!("{}", "╔═══════════════════════════════════════════════════════╗".bright_cyan());
    eprintln!("{}", "║         Personal Budget Management CLI                ║".bright_cyan());
    eprintln!("{}", "╚═══════════════════════════════════════════════════════╝".bright_cyan());
    eprintln!();

    eprint!("Initializing app config... ");
    std::io::stderr().flush().ok();

    let app_config = match initialize_app_config().await {
        Ok(config) => {
            eprintln!("{} ({} store)", "✓ Ready".green(), config.store.backend_name());
            config
        }
        Err(e) => {
            eprintln!("{}", "✗ Failed".red());
            eprintln!("Error: {}", e);
            return Err(e);
        }
    };

    eprintln!();

    loop {
        let result = match Operation::select() {
            Ok(Operation::ListBudget) => list_budget(&app_config).await,
            Ok(Operation::CreateBudget) => create_budget(&app_config).await,
            Ok(Operation::SeedDefaults) => seed_defaults(&app_config).await,
            Ok(Operation::CreateUser) => create_user(&app_config).await,
            Ok(Operation::ListUsers) => list_users(&app_config).await,
            Ok(Operation::Exit) => {
                eprintln!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {}", e).red());
                break;
            }
        };

        if let Err(e) = result {
            print_status(Tone::Failure, &e.to_string());
        }

        eprintln!();
    }

    Ok(())
}

async fn list_budget(app_config: &AppConfig) -> Result<()> {
    print_header("Budget Items");

    let input = ActionRouterInput::Budget(BudgetProcessorInput::GetBudgets);
    let records = match dispatch(app_config, input).await? {
        ActionRouterOutput::Budget(BudgetProcessorOutput::GetBudgets(records)) => records,
        _ => return Err(anyhow::anyhow!("Unexpected output type")),
    };

    if records.is_empty() {
        print_status(Tone::Info, "No budget items yet");
        return Ok(());
    }

    let total: f64 = records.iter().map(|r| r.amount).sum();
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.title.clone(),
                format_amount(r.amount),
                r.color.clone(),
                format_datetime(&r.created_at),
            ]
        })
        .collect();

    format_table(vec!["Title", "Budget", "Color", "Created"], rows);
    println!();
    println!("{}", format_count("Items", records.len()));
    println!("Total: {}", format_amount(total).bright_cyan());

    Ok(())
}

async fn create_budget(app_config: &AppConfig) -> Result<()> {
    print_header("Create Budget Item");

    let title = Input::get_string("Title")?;
    let amount = Input::get_f64("Budget")?;
    let color = Input::get_string("Color (#RRGGBB)")?;

    let args = CreateBudgetInputArgs {
        title: Some(title),
        budget: Some(json!(amount)),
        color: Some(color),
    };

    let input = ActionRouterInput::Budget(BudgetProcessorInput::CreateBudget(args));
    match dispatch(app_config, input).await? {
        ActionRouterOutput::Budget(BudgetProcessorOutput::CreateBudget(record)) => {
            print_status(Tone::Success, "Budget item created successfully");
            format_record(vec![
                ("ID", record.id.to_string()),
                ("Title", record.title),
                ("Budget", format_amount(record.amount)),
                ("Color", record.color),
            ]);
            Ok(())
        }
        _ => Err(anyhow::anyhow!("Unexpected output type")),
    }
}

async fn seed_defaults(app_config: &AppConfig) -> Result<()> {
    print_header("Seed Default Budget");

    if !confirm("Insert the default budget categories that are missing?")? {
        print_status(Tone::Info, "Nothing changed");
        return Ok(());
    }

    let input = ActionRouterInput::Budget(BudgetProcessorInput::SeedDefaults);
    match dispatch(app_config, input).await? {
        ActionRouterOutput::Budget(BudgetProcessorOutput::SeedDefaults(records)) => {
            print_status(Tone::Success, &format!("{} default items added", records.len()));
            Ok(())
        }
        _ => Err(anyhow::anyhow!("Unexpected output type")),
    }
}

async fn create_user(app_config: &AppConfig) -> Result<()> {
    print_header("Create User Account");

    let args = SignupInputArgs {
        username: Some(Input::get_string("Username")?),
        password: Some(Input::get_password("Password")?),
        email: Input::get_optional_string("Email")?,
        first_name: Input::get_optional_string("First name")?,
        last_name: Input::get_optional_string("Last name")?,
    };

    let input = ActionRouterInput::Users(UsersProcessorInput::Signup(args));
    match dispatch(app_config, input).await? {
        ActionRouterOutput::Users(UsersProcessorOutput::Signup(account)) => {
            print_status(Tone::Success, "User created successfully");
            format_record(vec![
                ("ID", account.id.to_string()),
                ("Username", account.username),
                ("Email", format_optional(account.email.as_deref())),
            ]);
            Ok(())
        }
        _ => Err(anyhow::anyhow!("Unexpected output type")),
    }
}

async fn list_users(app_config: &AppConfig) -> Result<()> {
    print_header("User Accounts");

    let input = ActionRouterInput::Users(UsersProcessorInput::GetUsers);
    let accounts = match dispatch(app_config, input).await? {
        ActionRouterOutput::Users(UsersProcessorOutput::GetUsers(accounts)) => accounts,
        _ => return Err(anyhow::anyhow!("Unexpected output type")),
    };

    if accounts.is_empty() {
        print_status(Tone::Info, "No user accounts yet");
        return Ok(());
    }

    let rows = accounts
        .iter()
        .map(|a| {
            vec![
                a.username.clone(),
                format_optional(a.email.as_deref()),
                format_optional(a.first_name.as_deref()),
                format_optional(a.last_name.as_deref()),
                format_datetime(&a.created_at),
            ]
        })
        .collect();

    format_table(vec!["Username", "Email", "First", "Last", "Created"], rows);
    println!();
    println!("{}", format_count("Accounts", accounts.len()));

    Ok(())
}
