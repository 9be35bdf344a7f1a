//! Hashtag analysis tool definition.
//!
//! Recommends hashtags for a subject: sector tags, tags derived from the
//! subject itself and a few generic ones. Output is deterministic.

use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::Sector;
use crate::domains::tools::content::ContentBlock;
use crate::domains::tools::handlers::{HandlerResult, ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
use crate::domains::tools::validator::ArgumentBundle;

/// Parameters for the hashtag analysis tool.
#[derive(Debug, Clone, Deserialize)]
pub struct HashtagsParams {
    /// Main subject or theme of the post.
    pub sujet: String,

    /// Business sector.
    pub secteur: String,
}

const GENERIC_TAGS: &[&str] = &["#inspiration", "#conseil", "#astuce", "#motivation", "#qualité"];
const GENERIC_TAG_COUNT: usize = 3;
const SUBJECT_PREFIX_CHARS: usize = 10;
const PRIMARY_COUNT: usize = 5;
const SECONDARY_COUNT: usize = 5;

fn sector_tags(secteur: &str) -> &'static [&'static str] {
    match Sector::parse(secteur) {
        Some(Sector::Tech) => &["#tech", "#innovation", "#digital", "#startup", "#dev"],
        Some(Sector::Fashion) => &["#mode", "#style", "#fashion", "#look", "#tendance"],
        Some(Sector::Food) => &["#food", "#cuisine", "#healthy", "#bio", "#recette"],
        None => &["#business", "#entrepreneur"],
    }
}

/// Two tags derived from the subject: the whole subject with its spaces
/// removed and its first ten characters, as typed.
fn subject_tags(sujet: &str) -> [String; 2] {
    let lower = sujet.to_lowercase();
    let compact = lower.replace(' ', "");
    let prefix: String = lower.chars().take(SUBJECT_PREFIX_CHARS).collect();
    [format!("#{compact}"), format!("#{prefix}")]
}

/// Hashtag analysis tool - suggests relevant hashtags for a post.
#[derive(Debug, Default)]
pub struct HashtagsTool;

impl HashtagsTool {
    /// All recommended tags, most relevant first.
    pub fn recommend(params: &HashtagsParams) -> Vec<String> {
        sector_tags(&params.secteur)
            .iter()
            .map(|t| t.to_string())
            .chain(subject_tags(&params.sujet))
            .chain(GENERIC_TAGS.iter().take(GENERIC_TAG_COUNT).map(|t| t.to_string()))
            .collect()
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(sujet = %params.sujet, secteur = %params.secteur))]
    pub fn execute(params: &HashtagsParams) -> String {
        info!("Hashtag analysis tool called");

        let tags = Self::recommend(params);
        let primary: Vec<&str> = tags.iter().take(PRIMARY_COUNT).map(String::as_str).collect();
        let secondary: Vec<&str> = tags
            .iter()
            .skip(PRIMARY_COUNT)
            .take(SECONDARY_COUNT)
            .map(String::as_str)
            .collect();

        let mut out = format!(
            "🏷️ **Hashtags recommandés pour '{}' ({})**\n\n",
            params.sujet, params.secteur
        );
        out.push_str(&format!("**Hashtags principaux :** {}\n", primary.join(" ")));
        out.push_str(&format!("**Hashtags secondaires :** {}\n\n", secondary.join(" ")));
        out.push_str(
            "💡 **Conseil :** Mélangez hashtags populaires et de niche pour maximiser votre portée !",
        );
        out
    }
}

impl ToolHandler for HashtagsTool {
    fn call(&self, args: &ArgumentBundle, _rng: &mut StdRng) -> HandlerResult {
        let params: HashtagsParams = args.into_params()?;
        Ok(vec![ContentBlock::text(Self::execute(&params))])
    }
}

impl ToolDefinition for HashtagsTool {
    const NAME: &'static str = "analyser_hashtags";
    const DESCRIPTION: &'static str = "Suggère des hashtags pertinents pour un contenu";

    fn schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("sujet")
                    .required()
                    .describe("Le sujet ou thème principal"),
            )
            .field(
                FieldSpec::string("secteur")
                    .required()
                    .describe("Le secteur d'activité"),
            )
    }
}
