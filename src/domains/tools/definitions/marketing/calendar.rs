//! Publication calendar tool definition.
//!
//! Builds a one-week posting schedule across the requested platforms.

use chrono::Weekday;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::content::ContentBlock;
use crate::domains::tools::error::HandlerError;
use crate::domains::tools::handlers::{HandlerResult, ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
use crate::domains::tools::validator::ArgumentBundle;

/// Parameters for the calendar tool.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarParams {
    /// Business sector.
    pub secteur: String,

    /// Platforms to publish on.
    pub plateformes: Vec<String>,

    /// Posts per day.
    pub frequence_par_jour: u32,
}

const CONTENT_TYPES: &[&str] = &[
    "Post éducatif",
    "Story interactive",
    "Carousel informatif",
    "Vidéo courte",
    "Contenu UGC",
];

const FIRST_SLOT_HOUR: u32 = 8;
const SLOT_SPACING_HOURS: u32 = 4;
const MINUTES: &[&str] = &["00", "30"];

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lundi",
        Weekday::Tue => "Mardi",
        Weekday::Wed => "Mercredi",
        Weekday::Thu => "Jeudi",
        Weekday::Fri => "Vendredi",
        Weekday::Sat => "Samedi",
        Weekday::Sun => "Dimanche",
    }
}

/// Monday through Sunday.
fn week() -> impl Iterator<Item = Weekday> {
    std::iter::successors(Some(Weekday::Mon), |d| Some(d.succ())).take(7)
}

/// Publication calendar tool - plans a week of posts.
#[derive(Debug, Default)]
pub struct CalendarTool;

impl CalendarTool {
    /// Execute the tool logic.
    #[instrument(skip_all, fields(secteur = %params.secteur))]
    pub fn execute(params: &CalendarParams, rng: &mut StdRng) -> Result<String, HandlerError> {
        info!(
            "Calendar tool called ({} platform(s), {} post(s)/day)",
            params.plateformes.len(),
            params.frequence_par_jour
        );

        let mut out = format!("📅 **Calendrier de publication - Secteur {}**\n\n", params.secteur);

        for day in week() {
            out.push_str(&format!("**{}**\n", day_name(day)));
            for slot in 0..params.frequence_par_jour {
                let platform = params
                    .plateformes
                    .choose(rng)
                    .ok_or_else(|| HandlerError::new("at least one platform is required"))?;
                let content = CONTENT_TYPES[rng.gen_range(0..CONTENT_TYPES.len())];
                let minutes = MINUTES[rng.gen_range(0..MINUTES.len())];
                let hour = FIRST_SLOT_HOUR + slot * SLOT_SPACING_HOURS;
                out.push_str(&format!("  • {hour}h{minutes} - {platform} : {content}\n"));
            }
            out.push('\n');
        }

        out.push_str("⏰ **Conseil :** Adaptez les heures selon l'activité de votre audience !");
        Ok(out)
    }
}

impl ToolHandler for CalendarTool {
    fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
        let params: CalendarParams = args.into_params()?;
        Ok(vec![ContentBlock::text(Self::execute(&params, rng)?)])
    }
}

impl ToolDefinition for CalendarTool {
    const NAME: &'static str = "planifier_calendrier";
    const DESCRIPTION: &'static str = "Crée un calendrier de publication pour une semaine";

    fn schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("secteur")
                    .required()
                    .describe("Le secteur d'activité"),
            )
            .field(
                FieldSpec::string_array("plateformes")
                    .required()
                    .min_items(1)
                    .describe("Liste des plateformes (Instagram, Facebook, LinkedIn, etc.)"),
            )
            .field(
                FieldSpec::integer("frequence_par_jour")
                    .describe("Nombre de publications par jour")
                    .range(1, 5)
                    .default_value(1),
            )
    }
}
