use rectfix::domain::model::{MalformedPolicy, RunStats};
use rectfix::{CliConfig, FixEngine, LocalStorage, RectFixPipeline};
use tempfile::TempDir;

const SAMPLE_SVG: &str = "\
<?xml version=\"1.0\"?>
<svg xmlns=\"http://www.w3.org/2000/svg\">
<rect x=\"1.0\" y=\"2.0\" fill=\"#000000\"/>
<circle cx=\"5\" cy=\"5\"/>
<rect x=\"0.5\" y=\"0.5\" fill=\"#a0b0c0\"/>
</svg>
";

fn config_for(temp: &TempDir, input: &str, output: &str) -> CliConfig {
    CliConfig {
        input: temp.path().join(input).to_str().unwrap().to_string(),
        output: temp.path().join(output).to_str().unwrap().to_string(),
        scale: 500.0,
        marker: "rect".to_string(),
        on_malformed: MalformedPolicy::Abort,
        report: None,
        verbose: false,
        log_json: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_rect_fix() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("test1.svg"), SAMPLE_SVG).unwrap();

    let config = config_for(&temp_dir, "test1.svg", "fixed.svg");
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RectFixPipeline::new(storage, config);

    let engine = FixEngine::new_with_monitoring(pipeline, false);
    let destination = engine.run().await.unwrap();

    assert!(destination.ends_with("fixed.svg"));

    let output = std::fs::read_to_string(temp_dir.path().join("fixed.svg")).unwrap();
    let expected = "\
<?xml version=\"1.0\"?>
<svg xmlns=\"http://www.w3.org/2000/svg\">
<rect x=\"500.000000\" y =\"1000.000000\" fill=\"#111111\"/>
<circle cx=\"5\" cy=\"5\"/>
<rect x=\"250.000000\" y =\"250.000000\" fill=\"#a1b1c1\"/>
</svg>
";
    assert_eq!(output, expected);

    // Same number of lines in and out, order preserved.
    assert_eq!(output.lines().count(), SAMPLE_SVG.lines().count());
}

#[tokio::test]
async fn test_end_to_end_with_report() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("test1.svg"), SAMPLE_SVG).unwrap();

    let mut config = config_for(&temp_dir, "test1.svg", "fixed.svg");
    config.report = Some(
        temp_dir
            .path()
            .join("report.json")
            .to_str()
            .unwrap()
            .to_string(),
    );

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RectFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);
    engine.run().await.unwrap();

    let report = std::fs::read_to_string(temp_dir.path().join("report.json")).unwrap();
    let stats: RunStats = serde_json::from_str(&report).unwrap();

    assert_eq!(
        stats,
        RunStats {
            total_lines: 6,
            rewritten: 2,
            passed: 4,
            recovered: 0,
        }
    );
}

#[tokio::test]
async fn test_end_to_end_abort_on_malformed_line() {
    let temp_dir = TempDir::new().unwrap();
    // Second rect line has no fill attribute.
    let input = "<svg>\n<rect x=\"1\" y=\"2\" fill=\"#000000\"/>\n<rect x=\"1\" y=\"2\"/>\n</svg>\n";
    std::fs::write(temp_dir.path().join("broken.svg"), input).unwrap();

    let config = config_for(&temp_dir, "broken.svg", "fixed.svg");
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RectFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();
    assert!(err.to_string().contains("Line 3"));

    // Nothing was written under the abort policy.
    assert!(!temp_dir.path().join("fixed.svg").exists());
}

#[tokio::test]
async fn test_end_to_end_skip_policy_keeps_every_line() {
    let temp_dir = TempDir::new().unwrap();
    let input = "<svg>\n<rect x=\"1\" y=\"2\" fill=\"#000000\"/>\n<rect x=\"1\" y=\"2\"/>\n</svg>\n";
    std::fs::write(temp_dir.path().join("broken.svg"), input).unwrap();

    let mut config = config_for(&temp_dir, "broken.svg", "fixed.svg");
    config.on_malformed = MalformedPolicy::Skip;

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RectFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);
    engine.run().await.unwrap();

    let output = std::fs::read_to_string(temp_dir.path().join("fixed.svg")).unwrap();
    assert_eq!(output.lines().count(), 4);
    // The malformed line survives unchanged.
    assert!(output.contains("<rect x=\"1\" y=\"2\"/>"));
    // The well-formed line was still rewritten.
    assert!(output.contains("<rect x=\"500.000000\" y =\"1000.000000\" fill=\"#111111\"/>"));
}

#[tokio::test]
async fn test_end_to_end_custom_scale() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("test1.svg"),
        "<rect x=\"1.0\" y=\"2.0\" fill=\"#000000\"/>\n",
    )
    .unwrap();

    let mut config = config_for(&temp_dir, "test1.svg", "fixed.svg");
    config.scale = 600.0;

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RectFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);
    engine.run().await.unwrap();

    let output = std::fs::read_to_string(temp_dir.path().join("fixed.svg")).unwrap();
    assert_eq!(
        output,
        "<rect x=\"600.000000\" y =\"1200.000000\" fill=\"#111111\"/>\n"
    );
}

#[tokio::test]
async fn test_end_to_end_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();

    let config = config_for(&temp_dir, "does-not-exist.svg", "fixed.svg");
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RectFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);

    assert!(engine.run().await.is_err());
}
