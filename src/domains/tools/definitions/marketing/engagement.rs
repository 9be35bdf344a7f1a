//! Engagement suggestions tool definition.

use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{Sector, push_numbered, sample};
use crate::domains::tools::content::ContentBlock;
use crate::domains::tools::handlers::{HandlerResult, ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
use crate::domains::tools::validator::ArgumentBundle;

/// Parameters for the engagement suggestions tool.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementParams {
    /// The engagement problem encountered.
    pub problematique: String,

    /// Business sector.
    pub secteur: String,
}

const GENERAL_SUGGESTIONS: &[&str] = &[
    "Posez des questions dans vos légendes pour encourager les commentaires",
    "Utilisez des stories interactives (sondages, questions, quiz)",
    "Répondez rapidement aux commentaires et messages",
    "Collaborez avec des influenceurs ou partenaires de votre secteur",
    "Créez du contenu généré par les utilisateurs (UGC)",
];

const SUGGESTION_COUNT: usize = 5;

fn sector_suggestions(secteur: &str) -> &'static [&'static str] {
    match Sector::parse(secteur) {
        Some(Sector::Tech) => &[
            "Partagez des tutoriels pratiques et applicables",
            "Organisez des live coding ou démos produit",
        ],
        Some(Sector::Fashion) => &[
            "Montrez comment porter vos produits",
            "Créez des challenges styling avec votre communauté",
        ],
        Some(Sector::Food) => &[
            "Partagez des recettes faciles à reproduire",
            "Organisez des concours de photos de plats",
        ],
        None => &[],
    }
}

/// Engagement suggestions tool - strategies to improve engagement.
#[derive(Debug, Default)]
pub struct EngagementTool;

impl EngagementTool {
    /// Execute the tool logic.
    #[instrument(skip_all, fields(secteur = %params.secteur))]
    pub fn execute(params: &EngagementParams, rng: &mut StdRng) -> String {
        info!("Engagement suggestions tool called");

        let pool: Vec<&str> = GENERAL_SUGGESTIONS
            .iter()
            .chain(sector_suggestions(&params.secteur))
            .copied()
            .collect();
        let picked = sample(&pool, SUGGESTION_COUNT, rng);

        let mut out = format!("🚀 **Stratégies d'engagement pour {}**\n\n", params.secteur);
        out.push_str(&format!(
            "**Problématique identifiée :** {}\n\n",
            params.problematique
        ));
        out.push_str("**Solutions recommandées :**\n");
        push_numbered(&mut out, &picked);
        out.push_str("\n💡 **Astuce :** Testez une stratégie à la fois et mesurez les résultats !");
        out
    }
}

impl ToolHandler for EngagementTool {
    fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
        let params: EngagementParams = args.into_params()?;
        Ok(vec![ContentBlock::text(Self::execute(&params, rng))])
    }
}

impl ToolDefinition for EngagementTool {
    const NAME: &'static str = "suggestions_engagement";
    const DESCRIPTION: &'static str = "Propose des stratégies pour améliorer l'engagement";

    fn schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("problematique")
                    .required()
                    .describe("Le problème d'engagement rencontré"),
            )
            .field(
                FieldSpec::string("secteur")
                    .required()
                    .describe("Secteur d'activité"),
            )
    }
}
