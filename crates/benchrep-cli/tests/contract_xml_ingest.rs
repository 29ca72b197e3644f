use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn benchrep() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("benchrep").unwrap()
}

const BSBM_XML: &str = r#"<?xml version="1.0"?>
<bsbm>
  <querymix>
    <query nr="1">
      <executecount>10</executecount>
      <aqetg>0.25</aqetg>
      <avgresults>42</avgresults>
    </query>
    <query nr="2">
      <aqetg>1.5</aqetg>
    </query>
  </querymix>
</bsbm>
"#;

#[test]
fn xml_output_lands_in_each_experiment_directory() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("exp-a");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("bsbm.xml"), BSBM_XML).unwrap();

    benchrep()
        .current_dir(temp.path())
        .args(["csv", "xml", "exp-a"])
        .assert()
        .success();

    // Durations are seconds in the source, milliseconds in the CSV;
    // a query without a result count serializes as NaN.
    let output = fs::read_to_string(dir.join("query-times.csv")).unwrap();
    assert_eq!(output, "name;id;results;time\n1;0;42;250\n2;0;NaN;1500\n");
}

#[test]
fn xml_converts_every_given_experiment() {
    let temp = tempdir().unwrap();
    for name in ["exp-a", "exp-b"] {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bsbm.xml"), BSBM_XML).unwrap();
    }

    benchrep()
        .current_dir(temp.path())
        .args(["csv", "xml", "exp-a", "exp-b"])
        .assert()
        .success();

    assert!(temp.path().join("exp-a/query-times.csv").exists());
    assert!(temp.path().join("exp-b/query-times.csv").exists());
}

#[test]
fn malformed_xml_aborts_the_command() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("exp-a");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("bsbm.xml"), "<bsbm><query nr=\"1\"").unwrap();

    benchrep()
        .current_dir(temp.path())
        .args(["csv", "xml", "exp-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"));
}

#[test]
fn converted_output_feeds_the_tabular_commands() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("exp-a");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("bsbm.xml"), BSBM_XML).unwrap();

    benchrep()
        .current_dir(temp.path())
        .args(["csv", "xml", "exp-a"])
        .assert()
        .success();
    benchrep()
        .current_dir(temp.path())
        .args(["csv", "summary", "exp-a"])
        .assert()
        .success();

    let output = fs::read_to_string(temp.path().join("data_summary.csv")).unwrap();
    assert!(output.contains("exp-a;1;250;42;"), "{output}");
}
