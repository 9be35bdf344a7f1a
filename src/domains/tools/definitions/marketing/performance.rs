//! Performance analysis tool definition.
//!
//! Simulates reach and engagement metrics for a piece of content.

use rand::Rng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::format_thousands;
use crate::domains::tools::content::ContentBlock;
use crate::domains::tools::handlers::{HandlerResult, ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
use crate::domains::tools::validator::ArgumentBundle;

/// Parameters for the performance analysis tool.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceParams {
    /// Content type (post, story, video, carousel).
    pub type_contenu: String,

    /// Platform the content was published on.
    pub plateforme: String,
}

/// Simulated metrics for one piece of content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl Metrics {
    /// Draw plausible metrics: likes are 5-15% of views, comments 2-8% and
    /// shares 1-5% of likes.
    pub fn simulate(rng: &mut StdRng) -> Self {
        let views: u64 = rng.gen_range(500..=5000);
        let likes = (views as f64 * rng.gen_range(0.05..0.15)) as u64;
        let comments = (likes as f64 * rng.gen_range(0.02..0.08)) as u64;
        let shares = (likes as f64 * rng.gen_range(0.01..0.05)) as u64;
        Self {
            views,
            likes,
            comments,
            shares,
        }
    }

    /// Interactions per view, in percent.
    pub fn engagement_rate(&self) -> f64 {
        (self.likes + self.comments + self.shares) as f64 / self.views as f64 * 100.0
    }
}

fn verdict(rate: f64) -> &'static str {
    if rate > 6.0 {
        "🎉 **Excellent !** Votre contenu performe très bien !"
    } else if rate > 3.0 {
        "👍 **Bien !** Performance correcte, continuez sur cette voie."
    } else {
        "⚠️ **À améliorer.** Essayez d'optimiser l'engagement."
    }
}

/// Performance analysis tool - simulated content metrics.
#[derive(Debug, Default)]
pub struct PerformanceTool;

impl PerformanceTool {
    /// Render a report for the given metrics.
    pub fn report(params: &PerformanceParams, metrics: &Metrics) -> String {
        let rate = metrics.engagement_rate();
        let mut out = format!(
            "📊 **Analyse de performance - {} sur {}**\n\n",
            params.type_contenu, params.plateforme
        );
        out.push_str(&format!("👁️ **Vues :** {}\n", format_thousands(metrics.views)));
        out.push_str(&format!("❤️ **Likes :** {}\n", format_thousands(metrics.likes)));
        out.push_str(&format!(
            "💬 **Commentaires :** {}\n",
            format_thousands(metrics.comments)
        ));
        out.push_str(&format!("🔄 **Partages :** {}\n", format_thousands(metrics.shares)));
        out.push_str(&format!("📈 **Taux d'engagement :** {rate:.2}%\n\n"));
        out.push_str(verdict(rate));
        out
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(type_contenu = %params.type_contenu, plateforme = %params.plateforme))]
    pub fn execute(params: &PerformanceParams, rng: &mut StdRng) -> String {
        info!("Performance analysis tool called");
        Self::report(params, &Metrics::simulate(rng))
    }
}

impl ToolHandler for PerformanceTool {
    fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
        let params: PerformanceParams = args.into_params()?;
        Ok(vec![ContentBlock::text(Self::execute(&params, rng))])
    }
}

impl ToolDefinition for PerformanceTool {
    const NAME: &'static str = "analyser_performance";
    const DESCRIPTION: &'static str = "Simule une analyse de performance de contenu";

    fn schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("type_contenu")
                    .required()
                    .describe("Type de contenu (post, story, video, carousel)"),
            )
            .field(
                FieldSpec::string("plateforme")
                    .required()
                    .describe("Plateforme utilisée"),
            )
    }
}
