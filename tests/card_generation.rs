use std::fs;
use std::path::Path;
use modelcard::artifact::ArtifactProvider;
use modelcard::card::{check_template, CardError, CardGenerator, ModelArtifact, ModelSpec, PLACEHOLDERS};
use modelcard::config::Settings;

/// Returns canned dumps instead of loading anything.
struct StubProvider;

impl ArtifactProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn load(&self, model_name: &str) -> Result<ModelArtifact, CardError> {
        if model_name.starts_with("unpublished") {
            return Err(CardError::ArtifactLoad {
                model_name: model_name.to_string(),
                reason: "repository not found".to_string(),
            });
        }
        Ok(ModelArtifact {
            arch_text: "GPTNeoXForCausalLM(\n  (gpt_neox): GPTNeoXModel()\n)".to_string(),
            config_text: "GPTNeoXConfig {\n  \"hidden_size\": 6144\n}".to_string(),
        })
    }
}

fn neox_spec() -> ModelSpec {
    ModelSpec::new(
        "h2ogpt-oasst1-256-20b",
        "EleutherAI/gpt-neox-20b",
        "h2oai/openassistant_oasst1",
        "https://huggingface.co/h2oai/h2ogpt-oasst1-256-20b/blob/main/logs.zip",
    )
}

fn write_template(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("README-template.md");
    fs::write(&path, body).unwrap();
    path
}

fn one_each_template() -> String {
    format!(
        "# {}\n\nSize: {}B\n\nBase: {}\nData: {}\n\n```\n{}\n```\n\n```\n{}\n```\n\nLogs: {}\n",
        PLACEHOLDERS[0], PLACEHOLDERS[1], PLACEHOLDERS[2], PLACEHOLDERS[3],
        PLACEHOLDERS[4], PLACEHOLDERS[5], PLACEHOLDERS[6]
    )
}

#[test]
fn test_end_to_end_card() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path(), &one_each_template());
    let generator = CardGenerator::new(template, dir.path(), &StubProvider);

    let path = generator.generate(&neox_spec()).unwrap();
    assert_eq!(path, dir.path().join("h2ogpt-oasst1-256-20b").join("README.md"));

    let card = fs::read_to_string(&path).unwrap();
    assert!(card.starts_with("# h2ogpt-oasst1-256-20b\n"));
    assert!(card.contains("Size: 20B"));
    assert!(card.contains("[EleutherAI/gpt-neox-20b](https://huggingface.co/EleutherAI/gpt-neox-20b)"));
    assert!(card.contains("[h2oai/openassistant_oasst1](https://huggingface.co/h2oai/openassistant_oasst1)"));
    assert!(card.contains("(gpt_neox): GPTNeoXModel()"));
    assert!(card.contains("\"hidden_size\": 6144"));
    assert!(card.contains("Logs: https://huggingface.co/h2oai/h2ogpt-oasst1-256-20b/blob/main/logs.zip"));
    assert!(!card.contains("<<"));
    assert!(!card.contains(">>"));
}

#[test]
fn test_regenerating_gives_identical_card() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path(), &one_each_template());
    let generator = CardGenerator::new(template, dir.path(), &StubProvider);

    let first = fs::read_to_string(generator.generate(&neox_spec()).unwrap()).unwrap();
    let second = fs::read_to_string(generator.generate(&neox_spec()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_arch_placeholder_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path(), &one_each_template().replace("<<MODEL_ARCH>>", "(none)"));
    let generator = CardGenerator::new(template, dir.path(), &StubProvider);

    let err = generator.generate(&neox_spec()).unwrap_err();
    assert!(matches!(err, CardError::MissingPlaceholder { placeholder: "<<MODEL_ARCH>>", .. }));
    assert!(err.to_string().starts_with("h2ogpt-oasst1-256-20b:"));
    assert!(!dir.path().join("h2ogpt-oasst1-256-20b").exists());
}

#[test]
fn test_unknown_placeholder_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path(), &format!("{}\n<<FOO>>\n", one_each_template()));
    let generator = CardGenerator::new(template, dir.path(), &StubProvider);

    match generator.generate(&neox_spec()) {
        Err(CardError::ResidualPlaceholder { remaining, .. }) => assert_eq!(remaining, vec!["<<FOO>>"]),
        other => panic!("expected residual placeholder error, got {:?}", other),
    }
    assert!(!dir.path().join("h2ogpt-oasst1-256-20b").exists());
}

#[test]
fn test_batch_reports_each_model() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path(), &one_each_template());
    let generator = CardGenerator::new(template, dir.path().join("cards"), &StubProvider);

    let specs = vec![
        neox_spec(),
        ModelSpec::new("h2ogpt-oasst1-256-20m", "a/b", "c/d", "https://logs"),
        ModelSpec::new("unpublished-model-3b", "a/b", "c/d", "https://logs"),
        ModelSpec::new("h2ogpt-oig-oasst1-256-6.9b", "EleutherAI/pythia-6.9b", "c/d", "https://logs"),
    ];
    let outcomes = generator.generate_all(&specs, false);

    let kinds: Vec<&str> = outcomes
        .iter()
        .map(|o| o.result.as_ref().err().map(|e| e.kind()).unwrap_or("ok"))
        .collect();
    assert_eq!(kinds, vec!["ok", "naming convention", "artifact load", "ok"]);

    let card = fs::read_to_string(
        dir.path().join("cards").join("h2ogpt-oig-oasst1-256-6.9b").join("README.md"),
    )
    .unwrap();
    assert!(card.contains("Size: 6.9B"));
}

#[test]
fn test_shipped_template_and_config() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));

    let template = fs::read_to_string(root.join("README-template.md")).unwrap();
    assert!(check_template(&template).is_ok());

    // Placeholder values are markdown links, which are not valid front-matter ids.
    let front_matter = template
        .strip_prefix("---\n")
        .and_then(|rest| rest.split("\n---").next())
        .unwrap();
    assert!(!front_matter.contains("<<"));

    let settings = Settings::from_dir(&root.join("config")).unwrap();
    assert_eq!(settings.models.len(), 4);
    assert!(settings.models.iter().any(|m| m.model_name == "h2ogpt-oasst1-256-20b"));
}
