use std::fs;
use std::path::Path;

use tempfile::TempDir;

use mbg_menu::config::ReferenceSource;
use mbg_menu::engine::evaluate_menu;
use mbg_menu::error::{MbgError, Warning};
use mbg_menu::models::{ClassLabel, Gender, MenuSelection, RecipientProfile};
use mbg_menu::reference::{load_from_dir, BUILTIN_SOURCES};

/// Write the built-in tables into a temp dir, optionally replacing one file.
fn write_tables(dir: &Path, replace: Option<(&str, &str)>) {
    let files = [
        ("food_nutrition.csv", BUILTIN_SOURCES.food_nutrition),
        ("food_category.csv", BUILTIN_SOURCES.food_category),
        ("protein_source.csv", BUILTIN_SOURCES.protein_source),
        ("age_group.csv", BUILTIN_SOURCES.age_group),
        ("education_level.csv", BUILTIN_SOURCES.education_level),
        ("class_group.csv", BUILTIN_SOURCES.class_group),
        ("standards.csv", BUILTIN_SOURCES.standards),
    ];
    for (name, content) in files {
        let content = match replace {
            Some((target, replacement)) if target == name => replacement,
            _ => content,
        };
        fs::write(dir.join(name), content).unwrap();
    }
}

#[test]
fn test_load_from_dir_matches_builtin() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path(), None);

    let data = ReferenceSource::Directory(dir.path().to_path_buf()).load().unwrap();
    assert_eq!(data.foods().len(), 24);
    assert_eq!(data.standards().len(), 8);
    assert!(data.load_warnings().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_from_dir(dir.path());
    assert!(matches!(result, Err(MbgError::Io(_))));
}

#[test]
fn test_comma_decimals_and_parse_warnings() {
    let nutrition = "name,energy_kcal,protein_g,carbohydrate_g,fiber_g
Nasi Putih,180,\"3,0\",\"39,8\",\"0,3\"
Ayam Goreng,246,26,8,-
Sayur Sop,45,1.8,6.5,1.6
Pisang,108,1,26,1.9
Apel,58,0.3,14.9,2.6
";
    let dir = TempDir::new().unwrap();
    write_tables(dir.path(), Some(("food_nutrition.csv", nutrition)));

    let data = load_from_dir(dir.path()).unwrap();
    let rice = data.foods().get("nasi putih").unwrap();
    assert!((rice.carbohydrate_g - 39.8).abs() < 1e-9);

    let chicken = data.foods().get("ayam goreng").unwrap();
    assert_eq!(chicken.fiber_g, 0.0);

    // Warnings from loading travel with every evaluation
    let menu = MenuSelection::from_pairs(&[("Nasi Putih", 150), ("Ayam Goreng", 80)]);
    let profile = RecipientProfile::by_class(ClassLabel::new(3).unwrap(), Gender::All);
    let result = evaluate_menu(&data, &profile, &menu).unwrap();
    assert_eq!(
        result.warnings,
        vec![Warning::Parse {
            table: "food_nutrition.csv".to_string(),
            row: 2,
            column: "fiber_g".to_string(),
            raw: "-".to_string(),
        }]
    );
}

#[test]
fn test_inverted_energy_band_rejected() {
    let standards = "group_id,min_energy_kcal,max_energy_kcal,min_protein_g,min_animal_protein_g,min_fiber_g,min_carbohydrate_g,required_categories
early-primary,700,500,12,6,3.5,60,staple
";
    let dir = TempDir::new().unwrap();
    write_tables(dir.path(), Some(("standards.csv", standards)));

    assert!(matches!(load_from_dir(dir.path()), Err(MbgError::Config(_))));
}
