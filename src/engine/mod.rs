pub mod aggregator;
pub mod evaluator;
pub mod normalize;
pub mod recommend;
pub mod resolver;
pub mod standards;

pub use aggregator::{aggregate, contribution, Aggregation};
pub use evaluator::{energy_status, evaluate, has_category};
pub use normalize::{canonical_name, is_known, normalize, normalized_selection};
pub use recommend::{category_average, grams_to_close, recommend};
pub use resolver::{find_age_band, group_for_grade, resolve};
pub use standards::get_threshold;

use tracing::debug;

use crate::error::{MbgError, Result};
use crate::models::{EvaluationResult, MenuSelection, RecipientProfile};
use crate::reference::ReferenceData;

/// Run the full evaluation for one recipient and menu.
///
/// Resolution and config errors abort; lookup and parse warnings are
/// collected into the result.
pub fn evaluate_menu(
    data: &ReferenceData,
    profile: &RecipientProfile,
    selection: &MenuSelection,
) -> Result<EvaluationResult> {
    if !profile.is_age_in_bounds() {
        return Err(MbgError::Resolution(format!("{} is outside the supported ages", profile)));
    }

    let group_id = resolve(profile, data)?;
    let threshold = get_threshold(&group_id, data)?;

    let Aggregation { totals, warnings } = aggregate(selection, data.foods());
    let verdict = evaluate(&totals, threshold, selection, data.foods());
    let recommendations = recommend(&totals, threshold, &verdict, selection, data.foods());

    debug!(
        %group_id,
        compliant = verdict.compliant,
        recommendations = recommendations.len(),
        "menu evaluated"
    );

    let mut all_warnings = data.load_warnings().to_vec();
    all_warnings.extend(warnings);

    Ok(EvaluationResult {
        group_id,
        totals,
        verdict,
        recommendations,
        warnings: all_warnings,
        menu_version: selection.version(),
    })
}
