use std::io::Read;
use std::path::PathBuf;

use bondex_config::Config;
use bondex_core::{Document, MatchGroup, extract_batch};
use serde::Deserialize;
use tracing::{info, warn};

/// Input parameters for the extract command.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// Documents to read; stdin when empty.
    pub files: Vec<PathBuf>,
    /// JSON file with one group object or an array of them.
    pub groups: Option<PathBuf>,
    /// Named profile from the config file.
    pub profile: Option<String>,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

/// Accepts either `{...}` or `[{...}, ...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum GroupsFile {
    Many(Vec<MatchGroup>),
    One(MatchGroup),
}

impl From<GroupsFile> for Vec<MatchGroup> {
    fn from(file: GroupsFile) -> Self {
        match file {
            GroupsFile::Many(groups) => groups,
            GroupsFile::One(group) => vec![group],
        }
    }
}

/// Strategy for extracting fields from documents.
///
/// Group source precedence: `--groups` file, `--profile`, the configured
/// default profile, then the demo groups.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl ExtractStrategy {
    fn load_groups(input: &ExtractInput) -> anyhow::Result<Vec<MatchGroup>> {
        if let Some(path) = &input.groups {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            let file: GroupsFile = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid groups file {}: {e}", path.display()))?;
            return Ok(file.into());
        }

        let config = Config::load_or_default()?;
        if let Some(name) = &input.profile {
            return Ok(config.extraction.profile(name)?.to_vec());
        }
        if let Some(groups) = config.extraction.default_groups()? {
            return Ok(groups.to_vec());
        }

        info!("No groups given, using demo groups");
        Ok(super::demo::demo_groups())
    }

    fn load_documents(files: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
        if files.is_empty() {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return Ok(vec![Document::new("-", text)]);
        }

        files
            .iter()
            .map(|path| {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
                Ok::<_, anyhow::Error>(Document::new(path.display().to_string(), text))
            })
            .collect()
    }
}

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let groups = Self::load_groups(&input)?;
        let documents = Self::load_documents(&input.files)?;
        info!(
            "Extracting {} groups from {} documents",
            groups.len(),
            documents.len()
        );

        let results = extract_batch(&documents, &groups);

        let diagnostics: usize = results.iter().map(|r| r.report.diagnostics.len()).sum();
        if diagnostics > 0 {
            warn!("{diagnostics} fields fell back to empty values");
        }

        let json = if input.pretty {
            serde_json::to_string_pretty(&results)?
        } else {
            serde_json::to_string(&results)?
        };
        println!("{json}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bondex_core::PatternSource;

    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn groups_file_accepts_object_or_array() {
        let one: GroupsFile =
            serde_json::from_str(r#"{"到期日": "*自定义*"}"#).expect("object is valid");
        let array = r#"[{"到期日": "*自定义*"}, {"fax": "传真：(\\S+)"}]"#;
        let many: GroupsFile = serde_json::from_str(array).expect("array is valid");

        let one: Vec<MatchGroup> = one.into();
        let many: Vec<MatchGroup> = many.into();
        assert_eq!(one.len(), 1);
        assert_eq!(many.len(), 2);
        assert_eq!(many[1]["fax"], PatternSource::custom(r"传真：(\S+)"));
    }
}
