//! Content ideas tool definition.
//!
//! Suggests social media post ideas for a sector, adapted to a platform.

use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{Sector, sample};
use crate::domains::tools::content::ContentBlock;
use crate::domains::tools::handlers::{HandlerResult, ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
use crate::domains::tools::validator::ArgumentBundle;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the content ideas tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentIdeasParams {
    /// Business sector (tech, mode, alimentation, ...).
    pub secteur: String,

    /// Target platform (Instagram, LinkedIn, TikTok, ...).
    pub plateforme: String,

    /// Number of ideas to generate.
    pub nombre: usize,
}

const TECH_IDEAS: &[&str] = &[
    "Astuce du jour pour optimiser votre workflow",
    "Comparatif des derniers outils du marché",
    "Behind the scenes de notre équipe dev",
    "Tendances tech 2024 à surveiller",
    "Tutorial rapide sur une nouvelle fonctionnalité",
];

const FASHION_IDEAS: &[&str] = &[
    "Look du jour avec nos nouveautés",
    "Conseils styling pour la saison",
    "Coulisses d'un shooting photo",
    "Tendances mode à adopter maintenant",
    "Comment porter cette pièce de 3 façons",
];

const FOOD_IDEAS: &[&str] = &[
    "Recette healthy de saison",
    "Les bienfaits méconnus de cet aliment",
    "Astuce pour réduire le gaspillage alimentaire",
    "Découverte d'un producteur local",
    "Menu de la semaine équilibré",
];

const GENERIC_IDEAS: &[&str] = &[
    "Contenu éducatif sur votre expertise",
    "Témoignage client authentique",
    "Actualité de votre secteur commentée",
    "Tips pratiques pour votre audience",
    "Coulisses de votre quotidien pro",
];

fn ideas_for(secteur: &str) -> &'static [&'static str] {
    match Sector::parse(secteur) {
        Some(Sector::Tech) => TECH_IDEAS,
        Some(Sector::Fashion) => FASHION_IDEAS,
        Some(Sector::Food) => FOOD_IDEAS,
        None => GENERIC_IDEAS,
    }
}

fn adaptation_for(plateforme: &str) -> &'static str {
    match plateforme.trim().to_lowercase().as_str() {
        "instagram" => "avec de belles photos",
        "linkedin" => "avec un angle professionnel",
        "tiktok" => "format court et dynamique",
        "facebook" => "avec engagement communauté",
        _ => "adapté à votre plateforme",
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Content ideas tool - samples post ideas for a sector and platform.
#[derive(Debug, Default)]
pub struct ContentIdeasTool;

impl ContentIdeasTool {
    /// Execute the tool logic.
    #[instrument(skip_all, fields(secteur = %params.secteur, plateforme = %params.plateforme))]
    pub fn execute(params: &ContentIdeasParams, rng: &mut StdRng) -> String {
        info!("Content ideas tool called ({} ideas)", params.nombre);

        let ideas = sample(ideas_for(&params.secteur), params.nombre, rng);
        let adaptation = adaptation_for(&params.plateforme);

        let mut out = format!(
            "💡 **Idées de contenu {} pour le secteur {}**\n\n",
            params.plateforme, params.secteur
        );
        for (i, idea) in ideas.iter().enumerate() {
            out.push_str(&format!("{}. {} ({})\n", i + 1, idea, adaptation));
        }
        out.push_str(
            "\n📝 **Conseil bonus :** Personnalisez chaque idée avec votre ton de marque unique !",
        );
        out
    }
}

impl ToolHandler for ContentIdeasTool {
    fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
        let params: ContentIdeasParams = args.into_params()?;
        Ok(vec![ContentBlock::text(Self::execute(&params, rng))])
    }
}

impl ToolDefinition for ContentIdeasTool {
    const NAME: &'static str = "generer_idees_contenu";
    const DESCRIPTION: &'static str = "Génère des idées de contenu pour les réseaux sociaux";

    fn schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("secteur")
                    .required()
                    .describe("Le secteur d'activité (ex: tech, mode, alimentation)"),
            )
            .field(
                FieldSpec::string("plateforme")
                    .required()
                    .describe("La plateforme cible (Instagram, LinkedIn, TikTok, etc.)"),
            )
            .field(
                FieldSpec::integer("nombre")
                    .describe("Nombre d'idées à générer (1-10)")
                    .range(1, 10)
                    .default_value(5),
            )
    }
}

// ============================================================================
// Tests
// ============================================================================
