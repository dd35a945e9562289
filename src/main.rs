use clap::Parser;

use mbg_menu::cli::{parse_item, Cli, Command};
use mbg_menu::config::ReferenceSource;
use mbg_menu::engine::{evaluate_menu, get_threshold, normalized_selection};
use mbg_menu::error::{MbgError, Result};
use mbg_menu::interface::{
    display_evaluation, display_food_list, display_logbook, display_menu, display_standards,
    prompt_action, prompt_free_text_foods, prompt_menu_selection, prompt_portions,
    prompt_profile, prompt_yes_no, MenuAction,
};
use mbg_menu::logging::init_logging;
use mbg_menu::models::{ClassLabel, Gender, RecipientProfile};
use mbg_menu::reference::ReferenceData;
use mbg_menu::session::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data = ReferenceSource::resolve(cli.data_dir.clone()).load()?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Interactive => cmd_interactive(&data),
        Command::Validate {
            age,
            class,
            gender,
            items,
            json,
        } => cmd_validate(&data, age, class.as_deref(), &gender, &items, json),
        Command::Foods => {
            display_food_list(&data);
            Ok(())
        }
        Command::Groups => {
            display_standards(&data);
            Ok(())
        }
    }
}

/// Validate a single menu given on the command line.
fn cmd_validate(
    data: &ReferenceData,
    age: Option<u8>,
    class: Option<&str>,
    gender: &str,
    items: &[String],
    json: bool,
) -> Result<()> {
    let gender: Gender = gender.parse()?;
    let profile = match (age, class) {
        (Some(age), _) => RecipientProfile::by_age(age, gender),
        (None, Some(class)) => RecipientProfile::by_class(class.parse::<ClassLabel>()?, gender),
        (None, None) => {
            return Err(MbgError::InvalidInput("give either --age or --class".to_string()));
        }
    };

    let pairs = items
        .iter()
        .map(|raw| parse_item(raw))
        .collect::<Result<Vec<_>>>()?;
    let menu = normalized_selection(&pairs, data);
    if menu.len() != pairs.len() {
        eprintln!("Duplicate menu items were ignored.");
    }

    let result = evaluate_menu(data, &profile, &menu)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_menu(&menu);
        display_evaluation(&result, get_threshold(&result.group_id, data).ok());
    }

    Ok(())
}

/// Build menus step by step and validate them.
fn cmd_interactive(data: &ReferenceData) -> Result<()> {
    println!("MBG menu validation");
    println!("Loaded {} foods, {} standard groups", data.foods().len(), data.standards().len());
    println!();

    let mut session = Session::new(data);
    session.set_profile(prompt_profile()?);

    loop {
        if let Some(profile) = session.profile() {
            println!();
            println!("Student: {}", profile);
        }
        display_menu(session.menu());

        match prompt_action()? {
            MenuAction::ChooseFoods => {
                let change = prompt_menu_selection(&mut session)?;
                println!("Added {} foods, removed {}.", change.added, change.removed);
            }
            MenuAction::TypeFood => {
                prompt_free_text_foods(&mut session)?;
            }
            MenuAction::AdjustPortions => prompt_portions(&mut session)?,
            MenuAction::Validate => {
                if !session.can_evaluate() {
                    println!("Choose some foods first.");
                    continue;
                }
                match session.evaluate() {
                    Ok(result) => {
                        let threshold = get_threshold(&result.group_id, data).ok();
                        display_evaluation(result, threshold);
                    }
                    Err(e @ (MbgError::Resolution(_) | MbgError::Config(_))) => {
                        println!("Cannot validate: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
            MenuAction::ShowLogbook => display_logbook(session.logbook()),
            MenuAction::ResetMenu => {
                if prompt_yes_no("Clear the current menu?", true)? {
                    session.reset();
                }
            }
            MenuAction::ChangeStudent => {
                session.set_profile(prompt_profile()?);
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}
