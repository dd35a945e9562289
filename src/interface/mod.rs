pub mod prompts;
pub mod render;

pub use prompts::{
    apply_checklist, parse_portion, prompt_action, prompt_class, prompt_free_text_foods, prompt_gender,
    prompt_level, prompt_menu_selection, prompt_portions, prompt_profile, prompt_yes_no,
    suggest_foods, MenuAction, SelectionChange,
};
pub use render::{
    display_evaluation, display_food_list, display_logbook, display_menu, display_standards,
};
