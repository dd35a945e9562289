use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::engine::is_known;
use crate::error::{MbgError, Result};
use crate::models::{
    ClassLabel, EducationLevel, FoodCategory, FoodFact, Gender, RecipientProfile,
};
use crate::session::Session;

/// Minimum Jaro-Winkler score for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Actions offered by the interactive main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ChooseFoods,
    TypeFood,
    AdjustPortions,
    Validate,
    ShowLogbook,
    ResetMenu,
    ChangeStudent,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 8] = [
        MenuAction::ChooseFoods,
        MenuAction::TypeFood,
        MenuAction::AdjustPortions,
        MenuAction::Validate,
        MenuAction::ShowLogbook,
        MenuAction::ResetMenu,
        MenuAction::ChangeStudent,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::ChooseFoods => "Choose foods by category",
            MenuAction::TypeFood => "Type a food name",
            MenuAction::AdjustPortions => "Adjust portions",
            MenuAction::Validate => "Validate menu",
            MenuAction::ShowLogbook => "Show logbook",
            MenuAction::ResetMenu => "Reset menu",
            MenuAction::ChangeStudent => "Change student",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Prompt for the next main-menu action.
pub fn prompt_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MenuAction::ALL[selection])
}

/// Prompt for the school level.
pub fn prompt_level() -> Result<EducationLevel> {
    let options: Vec<String> = EducationLevel::ALL.iter().map(|l| l.to_string()).collect();
    let selection = Select::new()
        .with_prompt("Education level")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(EducationLevel::ALL[selection])
}

/// Prompt for a class within a level.
pub fn prompt_class(level: EducationLevel) -> Result<ClassLabel> {
    let classes = level.class_labels();
    let options: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
    let selection = Select::new()
        .with_prompt("Class")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(classes[selection])
}

/// Prompt for gender. Primary school standards are shared, so SD is fixed to "all".
pub fn prompt_gender(level: EducationLevel) -> Result<Gender> {
    if level == EducationLevel::Sd {
        println!("Gender: all (primary school standards are shared)");
        return Ok(Gender::All);
    }

    let options = [Gender::Female, Gender::Male, Gender::All];
    let labels: Vec<String> = options.iter().map(|g| g.to_string()).collect();
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&labels)
        .default(2)
        .interact()?;
    Ok(options[selection])
}

/// Collect the student's level, class and gender.
pub fn prompt_profile() -> Result<RecipientProfile> {
    let level = prompt_level()?;
    let class = prompt_class(level)?;
    let gender = prompt_gender(level)?;
    Ok(RecipientProfile::by_class(class, gender))
}

/// Foods added and removed by the category checklists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub added: usize,
    pub removed: usize,
}

/// Make the menu agree with one category checklist.
///
/// Checked foods are added; foods on the menu that were left unchecked are
/// removed.
pub fn apply_checklist(session: &mut Session<'_>, foods: &[String], chosen: &[usize]) -> SelectionChange {
    let mut change = SelectionChange::default();

    for (index, food) in foods.iter().enumerate() {
        if chosen.contains(&index) {
            if session.select_food(food).is_some() {
                change.added += 1;
            }
        } else if session.remove_food(food) {
            change.removed += 1;
        }
    }

    change
}

/// Multi-select foods category by category.
///
/// Foods already on the menu start checked; unchecking one removes it.
pub fn prompt_menu_selection(session: &mut Session<'_>) -> Result<SelectionChange> {
    let mut total = SelectionChange::default();

    for category in FoodCategory::ALL {
        let foods: Vec<String> = session
            .data()
            .foods()
            .in_category(category)
            .into_iter()
            .map(|f| f.name.clone())
            .collect();
        if foods.is_empty() {
            continue;
        }

        let defaults: Vec<bool> = foods.iter().map(|f| session.menu().contains(f)).collect();
        let chosen = MultiSelect::new()
            .with_prompt(format!("Pick {} ({})", category.label(), category))
            .items(&foods)
            .defaults(&defaults)
            .interact()?;

        let change = apply_checklist(session, &foods, &chosen);
        total.added += change.added;
        total.removed += change.removed;
    }

    Ok(total)
}

/// Known foods close to `input`, best match first.
pub fn suggest_foods<'a>(input: &str, foods: &[&'a FoodFact]) -> Vec<&'a FoodFact> {
    let input = input.to_lowercase();
    let mut candidates: Vec<(&FoodFact, f64)> = foods
        .iter()
        .map(|f| (*f, jaro_winkler(&f.name.to_lowercase(), &input)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(f, _)| f).take(5).collect()
}

/// Add foods by free text, with suggestions for unknown names.
pub fn prompt_free_text_foods(session: &mut Session<'_>) -> Result<usize> {
    let mut added = 0;

    loop {
        let input: String = Input::new()
            .with_prompt("Food name (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        let name = if is_known(input, session.data().category_names()) {
            Some(input.to_string())
        } else {
            let foods = session.data().foods().all();
            let suggestions: Vec<String> = suggest_foods(input, &foods)
                .into_iter()
                .map(|f| f.name.clone())
                .collect();
            choose_suggestion(input, &suggestions)?
        };

        let Some(name) = name else {
            continue;
        };

        match session.select_food(&name) {
            Some(stored) => {
                println!("Added: {}", stored);
                added += 1;
            }
            None => println!("'{}' is already on the menu", name),
        }
    }

    Ok(added)
}

fn choose_suggestion(input: &str, suggestions: &[String]) -> Result<Option<String>> {
    if suggestions.is_empty() {
        let keep = Confirm::new()
            .with_prompt(format!(
                "'{}' has no nutrition data and will not count towards totals. Add anyway?",
                input
            ))
            .default(false)
            .interact()?;
        return Ok(keep.then(|| input.to_string()));
    }

    let mut options = suggestions.to_vec();
    options.push(format!("Keep '{}' as typed", input));
    options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(if selection < suggestions.len() {
        Some(suggestions[selection].clone())
    } else if selection == suggestions.len() {
        Some(input.to_string())
    } else {
        None
    })
}

/// Parse a portion entered by the user.
pub fn parse_portion(input: &str) -> Result<u32> {
    input
        .trim()
        .trim_end_matches('g')
        .trim()
        .parse()
        .map_err(|_| MbgError::InvalidInput(format!("'{}' is not a portion in grams", input.trim())))
}

/// Offer a custom portion for every menu line.
pub fn prompt_portions(session: &mut Session<'_>) -> Result<()> {
    let lines = session.menu().lines().to_vec();
    if lines.is_empty() {
        println!("Choose some foods first.");
        return Ok(());
    }

    for line in lines {
        let custom = Confirm::new()
            .with_prompt(format!("Custom portion for {} (now {} g)?", line.food_name, line.portion_grams))
            .default(false)
            .interact()?;
        if !custom {
            continue;
        }

        let input: String = Input::new()
            .with_prompt("Portion in grams")
            .default(line.portion_grams.to_string())
            .interact_text()?;

        match parse_portion(&input) {
            Ok(grams) => session.set_portion(&line.food_name, grams)?,
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
